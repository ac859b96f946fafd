use anyhow::Context as _;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use filmcrew_domain::member::MemberTier;
use filmcrew_domain::staffing::role_is_filled;
use filmcrew_schema::{project_members, project_roles};

use crate::domain::repository::MemberRepository;
use crate::domain::types::Member;
use crate::error::ApiError;
use crate::infra::db::{bad_enum, db_internal, refresh_project_staffing, txn_err};

#[derive(Clone)]
pub struct DbMemberRepository {
    pub db: DatabaseConnection,
}

impl MemberRepository for DbMemberRepository {
    async fn find(&self, project_id: Uuid, user_id: Uuid) -> Result<Option<Member>, ApiError> {
        let model = project_members::Entity::find()
            .filter(project_members::Column::ProjectId.eq(project_id))
            .filter(project_members::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find member by project and user")?;
        model.map(member_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, ApiError> {
        let model = project_members::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find member by id")?;
        model.map(member_from_model).transpose()
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Member>, ApiError> {
        let models = project_members::Entity::find()
            .filter(project_members::Column::ProjectId.eq(project_id))
            .order_by_asc(project_members::Column::JoinedAt)
            .all(&self.db)
            .await
            .context("list members by project")?;
        models.into_iter().map(member_from_model).collect()
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Member>, ApiError> {
        let models = project_members::Entity::find()
            .filter(project_members::Column::UserId.eq(user_id))
            .order_by_desc(project_members::Column::JoinedAt)
            .all(&self.db)
            .await
            .context("list members by user")?;
        models.into_iter().map(member_from_model).collect()
    }

    async fn update_tier(&self, id: Uuid, tier: MemberTier) -> Result<(), ApiError> {
        project_members::ActiveModel {
            id: Set(id),
            member_role: Set(tier.as_str().to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update member tier")?;
        Ok(())
    }

    async fn remove_with_slot_release(&self, id: Uuid) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), ApiError>(move |txn| {
                Box::pin(async move {
                    let member = project_members::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(db_internal)?
                        .ok_or(ApiError::MemberNotFound)?;
                    let project_id = member.project_id;
                    let role_id = member.role_id;

                    // A concurrent removal may have deleted the row after our
                    // unlocked read; only the removal that actually deletes
                    // releases the slot.
                    let deleted = member.delete(txn).await.map_err(db_internal)?;
                    if deleted.rows_affected == 0 {
                        return Err(ApiError::MemberNotFound);
                    }

                    if let Some(role_id) = role_id {
                        let role = project_roles::Entity::find_by_id(role_id)
                            .lock_exclusive()
                            .one(txn)
                            .await
                            .map_err(db_internal)?
                            .ok_or(ApiError::RoleNotFound)?;
                        let slots_filled = (role.slots_filled - 1).max(0);
                        project_roles::ActiveModel {
                            id: Set(role.id),
                            slots_filled: Set(slots_filled),
                            is_filled: Set(role_is_filled(slots_filled, role.slots_available)),
                            ..Default::default()
                        }
                        .update(txn)
                        .await
                        .map_err(db_internal)?;
                    }

                    refresh_project_staffing(txn, project_id).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

fn member_from_model(model: project_members::Model) -> Result<Member, ApiError> {
    let tier = MemberTier::parse(&model.member_role)
        .ok_or_else(|| bad_enum("member tier", &model.member_role))?;
    Ok(Member {
        id: model.id,
        project_id: model.project_id,
        user_id: model.user_id,
        role_id: model.role_id,
        tier,
        joined_at: model.joined_at,
    })
}
