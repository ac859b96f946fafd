//! sea-orm implementations of the domain repositories.
//!
//! Stored enum strings are converted to domain enums here; an unknown
//! stored value is a 500, not a panic.

pub mod applications;
pub mod members;
pub mod messages;
pub mod profiles;
pub mod projects;
pub mod skills;
pub mod users;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, TransactionError,
};
use uuid::Uuid;

use filmcrew_domain::staffing::{project_fully_staffed, role_is_filled};
use filmcrew_schema::{project_roles, projects as projects_entity};

use crate::error::ApiError;

pub(crate) fn bad_enum(what: &str, value: &str) -> ApiError {
    ApiError::Internal(anyhow::anyhow!("unknown stored {what} value: {value}"))
}

pub(crate) fn db_internal(e: sea_orm::DbErr) -> ApiError {
    ApiError::Internal(anyhow::Error::new(e))
}

/// Unwrap a transaction result, keeping domain errors raised inside the
/// closure intact.
pub(crate) fn txn_err(e: TransactionError<ApiError>) -> ApiError {
    match e {
        TransactionError::Connection(e) => db_internal(e),
        TransactionError::Transaction(e) => e,
    }
}

/// Recompute `projects.is_fully_staffed` from the project's roles. Must
/// run inside the same transaction as any slot mutation.
pub(crate) async fn refresh_project_staffing(
    txn: &DatabaseTransaction,
    project_id: Uuid,
) -> Result<(), ApiError> {
    let roles = project_roles::Entity::find()
        .filter(project_roles::Column::ProjectId.eq(project_id))
        .all(txn)
        .await
        .map_err(db_internal)?;

    let fully_staffed = project_fully_staffed(
        roles
            .iter()
            .map(|r| role_is_filled(r.slots_filled, r.slots_available)),
    );

    projects_entity::ActiveModel {
        id: Set(project_id),
        is_fully_staffed: Set(fully_staffed),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .update(txn)
    .await
    .map_err(db_internal)?;
    Ok(())
}
