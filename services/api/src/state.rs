use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use filmcrew_auth_types::identity::JwtSecret;

use crate::chat::ChatRegistry;
use crate::infra::db::applications::DbApplicationRepository;
use crate::infra::db::members::DbMemberRepository;
use crate::infra::db::messages::DbMessageRepository;
use crate::infra::db::profiles::DbProfileRepository;
use crate::infra::db::projects::{DbProjectRepository, DbRoleRepository};
use crate::infra::db::skills::DbSkillRepository;
use crate::infra::db::users::{DbOneTimeCodeRepository, DbRefreshTokenRepository, DbUserRepository};
use crate::infra::email::Mailer;
use crate::infra::storage::StorageClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub chat: ChatRegistry,
    pub mailer: Option<Mailer>,
    pub storage: StorageClient,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn one_time_code_repo(&self) -> DbOneTimeCodeRepository {
        DbOneTimeCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn refresh_token_repo(&self) -> DbRefreshTokenRepository {
        DbRefreshTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn skill_repo(&self) -> DbSkillRepository {
        DbSkillRepository {
            db: self.db.clone(),
        }
    }

    pub fn project_repo(&self) -> DbProjectRepository {
        DbProjectRepository {
            db: self.db.clone(),
        }
    }

    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn application_repo(&self) -> DbApplicationRepository {
        DbApplicationRepository {
            db: self.db.clone(),
        }
    }

    pub fn member_repo(&self) -> DbMemberRepository {
        DbMemberRepository {
            db: self.db.clone(),
        }
    }

    pub fn message_repo(&self) -> DbMessageRepository {
        DbMessageRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        JwtSecret(state.jwt_secret.clone())
    }
}
