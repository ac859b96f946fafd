#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use filmcrew_domain::member::MemberTier;
use filmcrew_domain::project::ProjectStatus;

use crate::domain::types::{
    Application, ChatMessage, Member, OneTimeCode, Profile, Project, RefreshTokenRecord, Role,
    Skill, User,
};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    async fn update_password(&self, id: Uuid, hashed_password: &str) -> Result<(), ApiError>;
}

/// Repository for one-time email codes.
pub trait OneTimeCodeRepository: Send + Sync {
    /// Find an unused, unexpired code for an email (any code value).
    async fn find_pending(&self, email: &str) -> Result<Option<OneTimeCode>, ApiError>;

    /// Find an unused, unexpired code matching email + code value.
    async fn find_valid(&self, email: &str, code: &str) -> Result<Option<OneTimeCode>, ApiError>;

    /// Insert a new code. The `id` field of the input is ignored.
    async fn create(&self, code: &OneTimeCode) -> Result<(), ApiError>;

    /// Mark a code as consumed (sets used_at = now).
    async fn mark_used(&self, id: i32) -> Result<(), ApiError>;
}

/// Repository for refresh-token records. Rows are never deleted.
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert a new record. The `id` field of the input is ignored.
    async fn create(&self, record: &RefreshTokenRecord) -> Result<(), ApiError>;

    /// Find an unrevoked, unexpired record by token hash.
    async fn find_active_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, ApiError>;

    /// Revoke a single record (sets revoked_at = now).
    async fn revoke(&self, id: i32) -> Result<(), ApiError>;

    /// Revoke every outstanding record for a user. Returns how many were
    /// revoked.
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, ApiError>;
}

/// Repository for crew profiles and their skill sets.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ApiError>;

    /// Insert a profile together with its skill links, atomically.
    async fn create(&self, profile: &Profile, skill_ids: &[i32]) -> Result<(), ApiError>;

    /// Update a profile and replace its skill set wholesale, atomically.
    async fn update(&self, profile: &Profile, skill_ids: &[i32]) -> Result<(), ApiError>;

    async fn skills_of(&self, profile_id: Uuid) -> Result<Vec<Skill>, ApiError>;

    /// Case-insensitive substring search over name and profession.
    async fn search(
        &self,
        name: Option<&str>,
        profession: Option<&str>,
    ) -> Result<Vec<Profile>, ApiError>;
}

/// Repository for the skill catalog.
pub trait SkillRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Skill>, ApiError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>, ApiError>;

    /// Insert a skill and return it with its assigned id.
    async fn create(&self, name: &str, category: Option<&str>) -> Result<Skill, ApiError>;

    /// List skills ordered by name, optionally filtered by category.
    async fn list(&self, category: Option<&str>) -> Result<Vec<Skill>, ApiError>;

    /// Of the given ids, return the subset that exists. One query; used for
    /// batched validation.
    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError>;
}

/// Repository for projects.
pub trait ProjectRepository: Send + Sync {
    /// Insert a project, its roles, and the creator's admin membership in
    /// one transaction.
    async fn create_with_roles(
        &self,
        project: &Project,
        roles: &[Role],
        admin: &Member,
    ) -> Result<(), ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ApiError>;
    async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Project>, ApiError>;

    /// Active projects that are not fully staffed (the searchable set).
    async fn list_open(&self) -> Result<Vec<Project>, ApiError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: ProjectStatus,
        now: DateTime<Utc>,
    ) -> Result<(), ApiError>;

    /// Transition active projects with no status update since `threshold`
    /// to dead. Returns how many were swept.
    async fn mark_stale_dead(&self, threshold: DateTime<Utc>) -> Result<u64, ApiError>;
}

/// Repository for project roles.
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, ApiError>;
    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Role>, ApiError>;
}

/// Repository for role applications.
///
/// `accept` is the single writer for the staffing invariants: it re-checks
/// state and capacity inside one transaction with the role row locked, so
/// two concurrent accepts of the last slot cannot both succeed.
pub trait ApplicationRepository: Send + Sync {
    async fn create(&self, application: &Application) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>, ApiError>;
    async fn find_by_role_and_applicant(
        &self,
        role_id: Uuid,
        applicant_id: Uuid,
    ) -> Result<Option<Application>, ApiError>;
    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Application>, ApiError>;
    async fn list_by_applicant(&self, applicant_id: Uuid) -> Result<Vec<Application>, ApiError>;

    /// Atomically accept a pending application: flip it to accepted, insert
    /// the child membership, take one slot, and recompute the role and
    /// project staffing flags. Fails with `AlreadyProcessed` or
    /// `NoSlotsAvailable` when the transactional re-check disagrees with
    /// the caller's earlier read.
    async fn accept(&self, id: Uuid, reviewed_at: DateTime<Utc>) -> Result<(), ApiError>;

    /// Mark a pending application rejected. No role or project side
    /// effects.
    async fn reject(&self, id: Uuid, reviewed_at: DateTime<Utc>) -> Result<(), ApiError>;
}

/// Repository for project memberships.
pub trait MemberRepository: Send + Sync {
    async fn find(&self, project_id: Uuid, user_id: Uuid) -> Result<Option<Member>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, ApiError>;
    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Member>, ApiError>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Member>, ApiError>;
    async fn update_tier(&self, id: Uuid, tier: MemberTier) -> Result<(), ApiError>;

    /// Remove a membership and, if it held a role, reopen one slot and
    /// recompute the staffing flags, all in one transaction.
    async fn remove_with_slot_release(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Repository for chat messages.
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &ChatMessage) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatMessage>, ApiError>;

    /// The most recent `limit` messages for a project, newest first.
    async fn list_recent(&self, project_id: Uuid, limit: u64)
        -> Result<Vec<ChatMessage>, ApiError>;

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError>;
}
