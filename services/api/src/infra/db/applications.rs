use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use filmcrew_domain::application::ApplicationStatus;
use filmcrew_domain::member::MemberTier;
use filmcrew_domain::staffing::role_is_filled;
use filmcrew_schema::{applications, project_members, project_roles};

use crate::domain::repository::ApplicationRepository;
use crate::domain::types::Application;
use crate::error::ApiError;
use crate::infra::db::{bad_enum, db_internal, refresh_project_staffing, txn_err};

#[derive(Clone)]
pub struct DbApplicationRepository {
    pub db: DatabaseConnection,
}

impl ApplicationRepository for DbApplicationRepository {
    async fn create(&self, application: &Application) -> Result<(), ApiError> {
        applications::ActiveModel {
            id: Set(application.id),
            project_id: Set(application.project_id),
            role_id: Set(application.role_id),
            applicant_id: Set(application.applicant_id),
            cover_letter: Set(application.cover_letter.clone()),
            status: Set(application.status.as_str().to_owned()),
            applied_at: Set(application.applied_at),
            reviewed_at: Set(application.reviewed_at),
        }
        .insert(&self.db)
        .await
        .context("create application")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>, ApiError> {
        let model = applications::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find application by id")?;
        model.map(application_from_model).transpose()
    }

    async fn find_by_role_and_applicant(
        &self,
        role_id: Uuid,
        applicant_id: Uuid,
    ) -> Result<Option<Application>, ApiError> {
        let model = applications::Entity::find()
            .filter(applications::Column::RoleId.eq(role_id))
            .filter(applications::Column::ApplicantId.eq(applicant_id))
            .one(&self.db)
            .await
            .context("find application by role and applicant")?;
        model.map(application_from_model).transpose()
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Application>, ApiError> {
        let models = applications::Entity::find()
            .filter(applications::Column::ProjectId.eq(project_id))
            .order_by_desc(applications::Column::AppliedAt)
            .all(&self.db)
            .await
            .context("list applications by project")?;
        models.into_iter().map(application_from_model).collect()
    }

    async fn list_by_applicant(&self, applicant_id: Uuid) -> Result<Vec<Application>, ApiError> {
        let models = applications::Entity::find()
            .filter(applications::Column::ApplicantId.eq(applicant_id))
            .order_by_desc(applications::Column::AppliedAt)
            .all(&self.db)
            .await
            .context("list applications by applicant")?;
        models.into_iter().map(application_from_model).collect()
    }

    async fn accept(&self, id: Uuid, reviewed_at: DateTime<Utc>) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), ApiError>(move |txn| {
                Box::pin(async move {
                    // Re-read under a row lock; the usecase's earlier read may
                    // be stale, and a concurrent reviewer must see the final
                    // status, not its snapshot.
                    let application = applications::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(db_internal)?
                        .ok_or(ApiError::ApplicationNotFound)?;
                    if application.status != ApplicationStatus::Pending.as_str() {
                        return Err(ApiError::AlreadyProcessed);
                    }

                    // Row lock serializes concurrent accepts for the same role.
                    let role = project_roles::Entity::find_by_id(application.role_id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(db_internal)?
                        .ok_or(ApiError::RoleNotFound)?;
                    if role_is_filled(role.slots_filled, role.slots_available) {
                        return Err(ApiError::NoSlotsAvailable);
                    }

                    applications::ActiveModel {
                        id: Set(application.id),
                        status: Set(ApplicationStatus::Accepted.as_str().to_owned()),
                        reviewed_at: Set(Some(reviewed_at)),
                        ..Default::default()
                    }
                    .update(txn)
                    .await
                    .map_err(db_internal)?;

                    project_members::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        project_id: Set(application.project_id),
                        user_id: Set(application.applicant_id),
                        role_id: Set(Some(role.id)),
                        member_role: Set(MemberTier::Child.as_str().to_owned()),
                        joined_at: Set(reviewed_at),
                    }
                    .insert(txn)
                    .await
                    .map_err(db_internal)?;

                    let slots_filled = role.slots_filled + 1;
                    project_roles::ActiveModel {
                        id: Set(role.id),
                        slots_filled: Set(slots_filled),
                        is_filled: Set(role_is_filled(slots_filled, role.slots_available)),
                        ..Default::default()
                    }
                    .update(txn)
                    .await
                    .map_err(db_internal)?;

                    refresh_project_staffing(txn, application.project_id).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn reject(&self, id: Uuid, reviewed_at: DateTime<Utc>) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), ApiError>(move |txn| {
                Box::pin(async move {
                    // Locked so a reject racing an accept waits for the
                    // accept's status write instead of overwriting it.
                    let application = applications::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(db_internal)?
                        .ok_or(ApiError::ApplicationNotFound)?;
                    if application.status != ApplicationStatus::Pending.as_str() {
                        return Err(ApiError::AlreadyProcessed);
                    }

                    applications::ActiveModel {
                        id: Set(application.id),
                        status: Set(ApplicationStatus::Rejected.as_str().to_owned()),
                        reviewed_at: Set(Some(reviewed_at)),
                        ..Default::default()
                    }
                    .update(txn)
                    .await
                    .map_err(db_internal)?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

fn application_from_model(model: applications::Model) -> Result<Application, ApiError> {
    let status = ApplicationStatus::parse(&model.status)
        .ok_or_else(|| bad_enum("application status", &model.status))?;
    Ok(Application {
        id: model.id,
        project_id: model.project_id,
        role_id: model.role_id,
        applicant_id: model.applicant_id,
        cover_letter: model.cover_letter,
        status,
        applied_at: model.applied_at,
        reviewed_at: model.reviewed_at,
    })
}
