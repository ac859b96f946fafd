use anyhow::Context as _;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use filmcrew_schema::{one_time_codes, refresh_tokens, users};

use crate::domain::repository::{OneTimeCodeRepository, RefreshTokenRepository, UserRepository};
use crate::domain::types::{OneTimeCode, RefreshTokenRecord, User};
use crate::error::ApiError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            hashed_password: Set(user.hashed_password.clone()),
            is_verified: Set(user.is_verified),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn update_password(&self, id: Uuid, hashed_password: &str) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            hashed_password: Set(hashed_password.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        hashed_password: model.hashed_password,
        is_verified: model.is_verified,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── One-time code repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOneTimeCodeRepository {
    pub db: DatabaseConnection,
}

impl OneTimeCodeRepository for DbOneTimeCodeRepository {
    async fn find_pending(&self, email: &str) -> Result<Option<OneTimeCode>, ApiError> {
        let now = Utc::now();
        let model = one_time_codes::Entity::find()
            .filter(one_time_codes::Column::Email.eq(email))
            .filter(one_time_codes::Column::UsedAt.is_null())
            .filter(one_time_codes::Column::ExpiresAt.gt(now))
            .order_by_desc(one_time_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find pending one-time code")?;
        Ok(model.map(code_from_model))
    }

    async fn find_valid(&self, email: &str, code: &str) -> Result<Option<OneTimeCode>, ApiError> {
        let now = Utc::now();
        let model = one_time_codes::Entity::find()
            .filter(one_time_codes::Column::Email.eq(email))
            .filter(one_time_codes::Column::Code.eq(code))
            .filter(one_time_codes::Column::UsedAt.is_null())
            .filter(one_time_codes::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find valid one-time code")?;
        Ok(model.map(code_from_model))
    }

    async fn create(&self, code: &OneTimeCode) -> Result<(), ApiError> {
        one_time_codes::ActiveModel {
            email: Set(code.email.clone()),
            code: Set(code.code.clone()),
            hashed_password: Set(code.hashed_password.clone()),
            expires_at: Set(code.expires_at),
            used_at: Set(None),
            created_at: Set(code.created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create one-time code")?;
        Ok(())
    }

    async fn mark_used(&self, id: i32) -> Result<(), ApiError> {
        one_time_codes::ActiveModel {
            id: Set(id),
            used_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark one-time code used")?;
        Ok(())
    }
}

fn code_from_model(model: one_time_codes::Model) -> OneTimeCode {
    OneTimeCode {
        id: model.id,
        email: model.email,
        code: model.code,
        hashed_password: model.hashed_password,
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}

// ── Refresh token repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRefreshTokenRepository {
    pub db: DatabaseConnection,
}

impl RefreshTokenRepository for DbRefreshTokenRepository {
    async fn create(&self, record: &RefreshTokenRecord) -> Result<(), ApiError> {
        refresh_tokens::ActiveModel {
            user_id: Set(record.user_id),
            token_hash: Set(record.token_hash.clone()),
            expires_at: Set(record.expires_at),
            revoked_at: Set(None),
            created_at: Set(record.created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create refresh token")?;
        Ok(())
    }

    async fn find_active_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, ApiError> {
        let now = Utc::now();
        let model = refresh_tokens::Entity::find()
            .filter(refresh_tokens::Column::TokenHash.eq(token_hash))
            .filter(refresh_tokens::Column::RevokedAt.is_null())
            .filter(refresh_tokens::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find active refresh token")?;
        Ok(model.map(refresh_token_from_model))
    }

    async fn revoke(&self, id: i32) -> Result<(), ApiError> {
        refresh_tokens::ActiveModel {
            id: Set(id),
            revoked_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("revoke refresh token")?;
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, ApiError> {
        let result = refresh_tokens::Entity::update_many()
            .col_expr(
                refresh_tokens::Column::RevokedAt,
                sea_orm::sea_query::Expr::value(Some(Utc::now())),
            )
            .filter(refresh_tokens::Column::UserId.eq(user_id))
            .filter(refresh_tokens::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await
            .context("revoke all refresh tokens for user")?;
        Ok(result.rows_affected)
    }
}

fn refresh_token_from_model(model: refresh_tokens::Model) -> RefreshTokenRecord {
    RefreshTokenRecord {
        id: model.id,
        user_id: model.user_id,
        token_hash: model.token_hash,
        expires_at: model.expires_at,
        revoked_at: model.revoked_at,
        created_at: model.created_at,
    }
}
