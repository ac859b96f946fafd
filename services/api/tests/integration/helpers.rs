//! In-memory implementations of the repository traits, mirroring the
//! transactional semantics of the database layer closely enough to drive
//! the usecases end to end.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use filmcrew_api::domain::repository::{
    ApplicationRepository, MemberRepository, MessageRepository, OneTimeCodeRepository,
    ProfileRepository, ProjectRepository, RefreshTokenRepository, RoleRepository, SkillRepository,
    UserRepository,
};
use filmcrew_api::domain::types::{
    Application, ChatMessage, Member, OneTimeCode, Profile, Project, RefreshTokenRecord, Role,
    Skill, User,
};
use filmcrew_api::error::ApiError;
use filmcrew_domain::application::ApplicationStatus;
use filmcrew_domain::member::MemberTier;
use filmcrew_domain::project::{PaymentType, ProjectStatus, ProjectType};
use filmcrew_domain::staffing::{project_fully_staffed, role_is_filled};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    codes: Vec<OneTimeCode>,
    refresh_tokens: Vec<RefreshTokenRecord>,
    profiles: Vec<Profile>,
    profile_skills: Vec<(Uuid, i32)>,
    skills: Vec<Skill>,
    projects: Vec<Project>,
    roles: Vec<Role>,
    applications: Vec<Application>,
    members: Vec<Member>,
    messages: Vec<ChatMessage>,
    next_code_id: i32,
    next_token_id: i32,
    next_skill_id: i32,
}

#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    fn recompute_staffing(inner: &mut Inner, project_id: Uuid) {
        let fully = project_fully_staffed(
            inner
                .roles
                .iter()
                .filter(|r| r.project_id == project_id)
                .map(|r| role_is_filled(r.slots_filled, r.slots_available)),
        );
        if let Some(project) = inner.projects.iter_mut().find(|p| p.id == project_id) {
            project.is_fully_staffed = fully;
            project.updated_at = Utc::now();
        }
    }

    // ── direct seeding and inspection ─────────────────────────────────────

    pub fn seed_user(&self, email: &str, hashed_password: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            hashed_password: hashed_password.to_owned(),
            is_verified: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.lock().users.push(user.clone());
        user
    }

    pub fn seed_profile(&self, user_id: Uuid, name: &str) -> Profile {
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_owned(),
            age: None,
            gender: None,
            profession: None,
            bio: None,
            is_actor: false,
            profile_photo_url: None,
            city: None,
            state: None,
            country: None,
            latitude: None,
            longitude: None,
            years_of_experience: None,
            previous_projects: None,
            portfolio_url: None,
            created_at: now,
            updated_at: now,
        };
        self.lock().profiles.push(profile.clone());
        profile
    }

    pub fn seed_skill(&self, name: &str) -> Skill {
        let mut inner = self.lock();
        inner.next_skill_id += 1;
        let skill = Skill {
            id: inner.next_skill_id,
            name: name.to_owned(),
            category: None,
            created_at: Utc::now(),
        };
        inner.skills.push(skill.clone());
        skill
    }

    /// Seed an active project with one role and the creator's admin
    /// membership.
    pub fn seed_project(&self, creator_id: Uuid, skill_id: i32, slots: i32) -> (Project, Role) {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            creator_id,
            name: "Midnight Reel".to_owned(),
            description: None,
            project_type: ProjectType::ShortFilm,
            release_platform: None,
            estimated_completion: None,
            status: ProjectStatus::Active,
            is_fully_staffed: false,
            last_status_update: Some(now),
            city: None,
            state: None,
            country: None,
            latitude: None,
            longitude: None,
            created_at: now,
            updated_at: now,
        };
        let role = Role {
            id: Uuid::new_v4(),
            project_id: project.id,
            skill_id,
            role_title: "Gaffer".to_owned(),
            description: None,
            slots_available: slots,
            slots_filled: 0,
            is_filled: false,
            payment_type: PaymentType::Unpaid,
            payment_amount: None,
            payment_details: None,
            created_at: now,
        };
        let admin = Member {
            id: Uuid::new_v4(),
            project_id: project.id,
            user_id: creator_id,
            role_id: None,
            tier: MemberTier::Admin,
            joined_at: now,
        };
        let mut inner = self.lock();
        inner.projects.push(project.clone());
        inner.roles.push(role.clone());
        inner.members.push(admin);
        (project, role)
    }

    pub fn seed_member(&self, project_id: Uuid, user_id: Uuid, tier: MemberTier) -> Member {
        let member = Member {
            id: Uuid::new_v4(),
            project_id,
            user_id,
            role_id: None,
            tier,
            joined_at: Utc::now(),
        };
        self.lock().members.push(member.clone());
        member
    }

    pub fn get_role(&self, role_id: Uuid) -> Role {
        self.lock()
            .roles
            .iter()
            .find(|r| r.id == role_id)
            .cloned()
            .unwrap()
    }

    pub fn get_project(&self, project_id: Uuid) -> Project {
        self.lock()
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .unwrap()
    }

    pub fn get_application(&self, id: Uuid) -> Application {
        self.lock()
            .applications
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .unwrap()
    }

    pub fn member_of(&self, project_id: Uuid, user_id: Uuid) -> Option<Member> {
        self.lock()
            .members
            .iter()
            .find(|m| m.project_id == project_id && m.user_id == user_id)
            .cloned()
    }

    pub fn backdate_project(&self, project_id: Uuid, last_status_update: DateTime<Utc>) {
        if let Some(project) = self
            .lock()
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
        {
            project.last_status_update = Some(last_status_update);
        }
    }

    pub fn set_project_location(&self, project_id: Uuid, latitude: f64, longitude: f64) {
        if let Some(project) = self
            .lock()
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
        {
            project.latitude = Some(latitude);
            project.longitude = Some(longitude);
        }
    }

    pub fn set_project_type(&self, project_id: Uuid, project_type: ProjectType) {
        if let Some(project) = self
            .lock()
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
        {
            project.project_type = project_type;
        }
    }

    pub fn set_profile_location(&self, profile_id: Uuid, latitude: f64, longitude: f64) {
        if let Some(profile) = self
            .lock()
            .profiles
            .iter_mut()
            .find(|p| p.id == profile_id)
        {
            profile.latitude = Some(latitude);
            profile.longitude = Some(longitude);
        }
    }

    pub fn set_profile_actor(&self, profile_id: Uuid, is_actor: bool) {
        if let Some(profile) = self
            .lock()
            .profiles
            .iter_mut()
            .find(|p| p.id == profile_id)
        {
            profile.is_actor = is_actor;
        }
    }

    pub fn link_profile_skill(&self, profile_id: Uuid, skill_id: i32) {
        self.lock().profile_skills.push((profile_id, skill_id));
    }

    pub fn pending_code_for(&self, email: &str) -> Option<OneTimeCode> {
        self.lock()
            .codes
            .iter()
            .find(|c| c.email == email && c.is_valid())
            .cloned()
    }
}

impl UserRepository for MemStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.lock().users.push(user.clone());
        Ok(())
    }

    async fn update_password(&self, id: Uuid, hashed_password: &str) -> Result<(), ApiError> {
        let mut inner = self.lock();
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::InvalidCredentials)?;
        user.hashed_password = hashed_password.to_owned();
        user.updated_at = Utc::now();
        Ok(())
    }
}

impl OneTimeCodeRepository for MemStore {
    async fn find_pending(&self, email: &str) -> Result<Option<OneTimeCode>, ApiError> {
        Ok(self
            .lock()
            .codes
            .iter()
            .find(|c| c.email == email && c.is_valid())
            .cloned())
    }

    async fn find_valid(&self, email: &str, code: &str) -> Result<Option<OneTimeCode>, ApiError> {
        Ok(self
            .lock()
            .codes
            .iter()
            .find(|c| c.email == email && c.code == code && c.is_valid())
            .cloned())
    }

    async fn create(&self, code: &OneTimeCode) -> Result<(), ApiError> {
        let mut inner = self.lock();
        inner.next_code_id += 1;
        let mut code = code.clone();
        code.id = inner.next_code_id;
        inner.codes.push(code);
        Ok(())
    }

    async fn mark_used(&self, id: i32) -> Result<(), ApiError> {
        if let Some(code) = self.lock().codes.iter_mut().find(|c| c.id == id) {
            code.used_at = Some(Utc::now());
        }
        Ok(())
    }
}

impl RefreshTokenRepository for MemStore {
    async fn create(&self, record: &RefreshTokenRecord) -> Result<(), ApiError> {
        let mut inner = self.lock();
        inner.next_token_id += 1;
        let mut record = record.clone();
        record.id = inner.next_token_id;
        inner.refresh_tokens.push(record);
        Ok(())
    }

    async fn find_active_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, ApiError> {
        Ok(self
            .lock()
            .refresh_tokens
            .iter()
            .find(|t| t.token_hash == token_hash && t.is_valid())
            .cloned())
    }

    async fn revoke(&self, id: i32) -> Result<(), ApiError> {
        if let Some(token) = self.lock().refresh_tokens.iter_mut().find(|t| t.id == id) {
            token.revoked_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, ApiError> {
        let mut revoked = 0;
        for token in self
            .lock()
            .refresh_tokens
            .iter_mut()
            .filter(|t| t.user_id == user_id && t.revoked_at.is_none())
        {
            token.revoked_at = Some(Utc::now());
            revoked += 1;
        }
        Ok(revoked)
    }
}

impl ProfileRepository for MemStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ApiError> {
        Ok(self
            .lock()
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn create(&self, profile: &Profile, skill_ids: &[i32]) -> Result<(), ApiError> {
        let mut inner = self.lock();
        inner.profiles.push(profile.clone());
        for &skill_id in skill_ids {
            inner.profile_skills.push((profile.id, skill_id));
        }
        Ok(())
    }

    async fn update(&self, profile: &Profile, skill_ids: &[i32]) -> Result<(), ApiError> {
        let mut inner = self.lock();
        if let Some(existing) = inner.profiles.iter_mut().find(|p| p.id == profile.id) {
            *existing = profile.clone();
        }
        inner.profile_skills.retain(|(pid, _)| *pid != profile.id);
        for &skill_id in skill_ids {
            inner.profile_skills.push((profile.id, skill_id));
        }
        Ok(())
    }

    async fn skills_of(&self, profile_id: Uuid) -> Result<Vec<Skill>, ApiError> {
        let inner = self.lock();
        let ids: Vec<i32> = inner
            .profile_skills
            .iter()
            .filter(|(pid, _)| *pid == profile_id)
            .map(|(_, sid)| *sid)
            .collect();
        Ok(inner
            .skills
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn search(
        &self,
        name: Option<&str>,
        profession: Option<&str>,
    ) -> Result<Vec<Profile>, ApiError> {
        let name = name.map(str::to_lowercase);
        let profession = profession.map(str::to_lowercase);
        Ok(self
            .lock()
            .profiles
            .iter()
            .filter(|p| {
                let name_ok = name
                    .as_deref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n));
                let prof_ok = profession.as_deref().is_none_or(|q| {
                    p.profession
                        .as_deref()
                        .is_some_and(|v| v.to_lowercase().contains(q))
                });
                name_ok && prof_ok
            })
            .cloned()
            .collect())
    }
}

impl SkillRepository for MemStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Skill>, ApiError> {
        Ok(self.lock().skills.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>, ApiError> {
        Ok(self.lock().skills.iter().find(|s| s.name == name).cloned())
    }

    async fn create(&self, name: &str, category: Option<&str>) -> Result<Skill, ApiError> {
        let mut inner = self.lock();
        inner.next_skill_id += 1;
        let skill = Skill {
            id: inner.next_skill_id,
            name: name.to_owned(),
            category: category.map(str::to_owned),
            created_at: Utc::now(),
        };
        inner.skills.push(skill.clone());
        Ok(skill)
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<Skill>, ApiError> {
        let mut skills: Vec<Skill> = self
            .lock()
            .skills
            .iter()
            .filter(|s| category.is_none_or(|c| s.category.as_deref() == Some(c)))
            .cloned()
            .collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }

    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError> {
        Ok(self
            .lock()
            .skills
            .iter()
            .filter(|s| ids.contains(&s.id))
            .map(|s| s.id)
            .collect())
    }
}

impl ProjectRepository for MemStore {
    async fn create_with_roles(
        &self,
        project: &Project,
        roles: &[Role],
        admin: &Member,
    ) -> Result<(), ApiError> {
        let mut inner = self.lock();
        inner.projects.push(project.clone());
        inner.roles.extend(roles.iter().cloned());
        inner.members.push(admin.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ApiError> {
        Ok(self.lock().projects.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Project>, ApiError> {
        Ok(self
            .lock()
            .projects
            .iter()
            .filter(|p| p.creator_id == creator_id)
            .cloned()
            .collect())
    }

    async fn list_open(&self) -> Result<Vec<Project>, ApiError> {
        Ok(self
            .lock()
            .projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active && !p.is_fully_staffed)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ProjectStatus,
        now: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let mut inner = self.lock();
        let project = inner
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ApiError::ProjectNotFound)?;
        project.status = status;
        project.last_status_update = Some(now);
        project.updated_at = now;
        Ok(())
    }

    async fn mark_stale_dead(&self, threshold: DateTime<Utc>) -> Result<u64, ApiError> {
        let now = Utc::now();
        let mut swept = 0;
        for project in self.lock().projects.iter_mut().filter(|p| {
            p.status == ProjectStatus::Active
                && p.last_status_update.is_some_and(|t| t < threshold)
        }) {
            project.status = ProjectStatus::Dead;
            project.last_status_update = Some(now);
            project.updated_at = now;
            swept += 1;
        }
        Ok(swept)
    }
}

impl RoleRepository for MemStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, ApiError> {
        Ok(self.lock().roles.iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Role>, ApiError> {
        Ok(self
            .lock()
            .roles
            .iter()
            .filter(|r| r.project_id == project_id)
            .cloned()
            .collect())
    }
}

impl ApplicationRepository for MemStore {
    async fn create(&self, application: &Application) -> Result<(), ApiError> {
        self.lock().applications.push(application.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>, ApiError> {
        Ok(self
            .lock()
            .applications
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_role_and_applicant(
        &self,
        role_id: Uuid,
        applicant_id: Uuid,
    ) -> Result<Option<Application>, ApiError> {
        Ok(self
            .lock()
            .applications
            .iter()
            .find(|a| a.role_id == role_id && a.applicant_id == applicant_id)
            .cloned())
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Application>, ApiError> {
        Ok(self
            .lock()
            .applications
            .iter()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn list_by_applicant(&self, applicant_id: Uuid) -> Result<Vec<Application>, ApiError> {
        Ok(self
            .lock()
            .applications
            .iter()
            .filter(|a| a.applicant_id == applicant_id)
            .cloned()
            .collect())
    }

    async fn accept(&self, id: Uuid, reviewed_at: DateTime<Utc>) -> Result<(), ApiError> {
        let mut inner = self.lock();

        let (role_id, project_id, applicant_id) = {
            let application = inner
                .applications
                .iter()
                .find(|a| a.id == id)
                .ok_or(ApiError::ApplicationNotFound)?;
            if application.status != ApplicationStatus::Pending {
                return Err(ApiError::AlreadyProcessed);
            }
            (
                application.role_id,
                application.project_id,
                application.applicant_id,
            )
        };

        {
            let role = inner
                .roles
                .iter()
                .find(|r| r.id == role_id)
                .ok_or(ApiError::RoleNotFound)?;
            if role_is_filled(role.slots_filled, role.slots_available) {
                return Err(ApiError::NoSlotsAvailable);
            }
        }

        if let Some(application) = inner.applications.iter_mut().find(|a| a.id == id) {
            application.status = ApplicationStatus::Accepted;
            application.reviewed_at = Some(reviewed_at);
        }
        inner.members.push(Member {
            id: Uuid::new_v4(),
            project_id,
            user_id: applicant_id,
            role_id: Some(role_id),
            tier: MemberTier::Child,
            joined_at: reviewed_at,
        });
        if let Some(role) = inner.roles.iter_mut().find(|r| r.id == role_id) {
            role.slots_filled += 1;
            role.is_filled = role_is_filled(role.slots_filled, role.slots_available);
        }
        Self::recompute_staffing(&mut inner, project_id);
        Ok(())
    }

    async fn reject(&self, id: Uuid, reviewed_at: DateTime<Utc>) -> Result<(), ApiError> {
        let mut inner = self.lock();
        let application = inner
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ApiError::ApplicationNotFound)?;
        if application.status != ApplicationStatus::Pending {
            return Err(ApiError::AlreadyProcessed);
        }
        application.status = ApplicationStatus::Rejected;
        application.reviewed_at = Some(reviewed_at);
        Ok(())
    }
}

impl MemberRepository for MemStore {
    async fn find(&self, project_id: Uuid, user_id: Uuid) -> Result<Option<Member>, ApiError> {
        Ok(self
            .lock()
            .members
            .iter()
            .find(|m| m.project_id == project_id && m.user_id == user_id)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, ApiError> {
        Ok(self.lock().members.iter().find(|m| m.id == id).cloned())
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Member>, ApiError> {
        Ok(self
            .lock()
            .members
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Member>, ApiError> {
        Ok(self
            .lock()
            .members
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_tier(&self, id: Uuid, tier: MemberTier) -> Result<(), ApiError> {
        let mut inner = self.lock();
        let member = inner
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ApiError::MemberNotFound)?;
        member.tier = tier;
        Ok(())
    }

    async fn remove_with_slot_release(&self, id: Uuid) -> Result<(), ApiError> {
        let mut inner = self.lock();
        let member = inner
            .members
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(ApiError::MemberNotFound)?;
        inner.members.retain(|m| m.id != id);
        if let Some(role_id) = member.role_id {
            if let Some(role) = inner.roles.iter_mut().find(|r| r.id == role_id) {
                role.slots_filled = (role.slots_filled - 1).max(0);
                role.is_filled = role_is_filled(role.slots_filled, role.slots_available);
            }
        }
        Self::recompute_staffing(&mut inner, member.project_id);
        Ok(())
    }
}

impl MessageRepository for MemStore {
    async fn create(&self, message: &ChatMessage) -> Result<(), ApiError> {
        self.lock().messages.push(message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatMessage>, ApiError> {
        Ok(self.lock().messages.iter().find(|m| m.id == id).cloned())
    }

    async fn list_recent(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        let mut messages: Vec<ChatMessage> = self
            .lock()
            .messages
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        messages.truncate(limit as usize);
        Ok(messages)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        if let Some(message) = self.lock().messages.iter_mut().find(|m| m.id == id) {
            message.is_deleted = true;
            message.edited_at = Some(Utc::now());
        }
        Ok(())
    }
}
