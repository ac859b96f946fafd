use chrono::{DateTime, Utc};
use uuid::Uuid;

use filmcrew_domain::application::ApplicationStatus;
use filmcrew_domain::member::MemberTier;
use filmcrew_domain::profile::Gender;
use filmcrew_domain::project::{PaymentType, ProjectStatus, ProjectType};

/// Registered account. Only created through code verification, so
/// `is_verified` holds from birth.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public crew profile, one per user.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub profession: Option<String>,
    pub bio: Option<String>,
    pub is_actor: bool,
    pub profile_photo_url: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub years_of_experience: Option<i32>,
    pub previous_projects: Option<String>,
    pub portfolio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub project_type: ProjectType,
    pub release_platform: Option<String>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub status: ProjectStatus,
    pub is_fully_staffed: bool,
    pub last_status_update: Option<DateTime<Utc>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Role {
    pub id: Uuid,
    pub project_id: Uuid,
    pub skill_id: i32,
    pub role_title: String,
    pub description: Option<String>,
    pub slots_available: i32,
    pub slots_filled: i32,
    pub is_filled: bool,
    pub payment_type: PaymentType,
    pub payment_amount: Option<f64>,
    pub payment_details: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Application {
    pub id: Uuid,
    pub project_id: Uuid,
    pub role_id: Uuid,
    pub applicant_id: Uuid,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Option<Uuid>,
    pub tier: MemberTier,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: Uuid,
    pub project_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// One-time email code for signup and password reset.
#[derive(Debug, Clone)]
pub struct OneTimeCode {
    pub id: i32,
    pub email: String,
    pub code: String,
    /// Argon2 hash captured at signup request; absent for password reset.
    pub hashed_password: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OneTimeCode {
    pub fn is_valid(&self) -> bool {
        self.used_at.is_none() && self.expires_at > Utc::now()
    }
}

/// Stored refresh-token record. Holds only the sha256 digest.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub id: i32,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn is_valid(&self) -> bool {
        self.revoked_at.is_none() && self.expires_at > Utc::now()
    }
}

/// One-time code length in digits.
pub const CODE_LEN: usize = 6;

/// One-time code time-to-live in seconds (5 minutes).
pub const CODE_TTL_SECS: i64 = 300;

/// Opaque refresh-token length in characters.
pub const REFRESH_TOKEN_LEN: usize = 64;

/// Refresh-token time-to-live in seconds (30 days).
pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 3600;

/// Active projects untouched for this long are swept to `dead`.
pub const STALE_AFTER_DAYS: i64 = 30;

/// Placeholder content returned for soft-deleted messages.
pub const DELETED_MESSAGE_PLACEHOLDER: &str = "[message deleted]";
