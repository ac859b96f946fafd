use anyhow::Context as _;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use filmcrew_schema::messages;

use crate::domain::repository::MessageRepository;
use crate::domain::types::ChatMessage;
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbMessageRepository {
    pub db: DatabaseConnection,
}

impl MessageRepository for DbMessageRepository {
    async fn create(&self, message: &ChatMessage) -> Result<(), ApiError> {
        messages::ActiveModel {
            id: Set(message.id),
            project_id: Set(message.project_id),
            sender_id: Set(message.sender_id),
            content: Set(message.content.clone()),
            sent_at: Set(message.sent_at),
            edited_at: Set(message.edited_at),
            is_deleted: Set(message.is_deleted),
        }
        .insert(&self.db)
        .await
        .context("create message")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatMessage>, ApiError> {
        let model = messages::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find message by id")?;
        Ok(model.map(message_from_model))
    }

    async fn list_recent(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        let models = messages::Entity::find()
            .filter(messages::Column::ProjectId.eq(project_id))
            .order_by_desc(messages::Column::SentAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recent messages")?;
        Ok(models.into_iter().map(message_from_model).collect())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        messages::ActiveModel {
            id: Set(id),
            is_deleted: Set(true),
            edited_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("soft delete message")?;
        Ok(())
    }
}

fn message_from_model(model: messages::Model) -> ChatMessage {
    ChatMessage {
        id: model.id,
        project_id: model.project_id,
        sender_id: model.sender_id,
        content: model.content,
        sent_at: model.sent_at,
        edited_at: model.edited_at,
        is_deleted: model.is_deleted,
    }
}
