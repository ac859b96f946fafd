use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use filmcrew_domain::pagination::LimitRequest;

use crate::domain::repository::{
    MemberRepository, MessageRepository, ProfileRepository, ProjectRepository,
};
use crate::domain::types::{ChatMessage, DELETED_MESSAGE_PLACEHOLDER};
use crate::error::ApiError;
use crate::usecase::authz::ensure_project_member;

// ── RecordMessage ─────────────────────────────────────────────────────────────

/// Persist a chat message after confirming the sender belongs to the
/// room's project.
pub struct RecordMessageUseCase<
    Ms: MessageRepository,
    M: MemberRepository,
    P: ProjectRepository,
> {
    pub messages: Ms,
    pub members: M,
    pub projects: P,
}

impl<Ms: MessageRepository, M: MemberRepository, P: ProjectRepository>
    RecordMessageUseCase<Ms, M, P>
{
    pub async fn execute(
        &self,
        sender_id: Uuid,
        project_id: Uuid,
        content: String,
    ) -> Result<ChatMessage, ApiError> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)?;
        let membership = self.members.find(project.id, sender_id).await?;
        ensure_project_member(&project, membership.as_ref(), sender_id)?;

        let message = ChatMessage {
            id: Uuid::new_v4(),
            project_id,
            sender_id: Some(sender_id),
            content,
            sent_at: Utc::now(),
            edited_at: None,
            is_deleted: false,
        };
        self.messages.create(&message).await?;
        Ok(message)
    }
}

// ── MessageHistory ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct MessageView {
    pub id: Uuid,
    pub sender_id: Option<Uuid>,
    pub sender_name: Option<String>,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// Recent room history, oldest first. Deleted messages keep their slot in
/// the timeline but their content is masked.
pub struct MessageHistoryUseCase<
    Ms: MessageRepository,
    M: MemberRepository,
    P: ProjectRepository,
    Pf: ProfileRepository,
> {
    pub messages: Ms,
    pub members: M,
    pub projects: P,
    pub profiles: Pf,
}

impl<Ms: MessageRepository, M: MemberRepository, P: ProjectRepository, Pf: ProfileRepository>
    MessageHistoryUseCase<Ms, M, P, Pf>
{
    pub async fn execute(
        &self,
        caller: Uuid,
        project_id: Uuid,
        limit: LimitRequest,
    ) -> Result<Vec<MessageView>, ApiError> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)?;
        let membership = self.members.find(project.id, caller).await?;
        ensure_project_member(&project, membership.as_ref(), caller)?;

        let mut messages = self
            .messages
            .list_recent(project.id, u64::from(limit.clamped().limit))
            .await?;
        messages.reverse();

        let mut names: HashMap<Uuid, Option<String>> = HashMap::new();
        let mut views = Vec::with_capacity(messages.len());
        for message in messages {
            let sender_name = match message.sender_id {
                Some(sender) => match names.get(&sender) {
                    Some(cached) => cached.clone(),
                    None => {
                        let name = self
                            .profiles
                            .find_by_user(sender)
                            .await?
                            .map(|p| p.name);
                        names.insert(sender, name.clone());
                        name
                    }
                },
                None => None,
            };
            let content = if message.is_deleted {
                DELETED_MESSAGE_PLACEHOLDER.to_owned()
            } else {
                message.content
            };
            views.push(MessageView {
                id: message.id,
                sender_id: message.sender_id,
                sender_name,
                content,
                sent_at: message.sent_at,
                edited_at: message.edited_at,
                is_deleted: message.is_deleted,
            });
        }
        Ok(views)
    }
}

// ── DeleteMessage ─────────────────────────────────────────────────────────────

/// Soft-delete a message. Only its sender may delete it; the row stays so
/// history keeps its shape.
pub struct DeleteMessageUseCase<Ms: MessageRepository> {
    pub messages: Ms,
}

impl<Ms: MessageRepository> DeleteMessageUseCase<Ms> {
    pub async fn execute(&self, caller: Uuid, message_id: Uuid) -> Result<(), ApiError> {
        let message = self
            .messages
            .find_by_id(message_id)
            .await?
            .ok_or(ApiError::MessageNotFound)?;
        if message.sender_id != Some(caller) {
            return Err(ApiError::Forbidden);
        }
        if message.is_deleted {
            return Ok(());
        }
        self.messages.soft_delete(message.id).await
    }
}
