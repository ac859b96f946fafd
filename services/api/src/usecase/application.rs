use chrono::Utc;
use uuid::Uuid;

use filmcrew_domain::application::ApplicationStatus;
use filmcrew_domain::member::MemberTier;
use filmcrew_domain::staffing::role_is_filled;

use crate::domain::repository::{
    ApplicationRepository, MemberRepository, ProfileRepository, ProjectRepository, RoleRepository,
};
use crate::domain::types::Application;
use crate::error::ApiError;
use crate::usecase::authz::ensure_project_authority;

// ── Apply ─────────────────────────────────────────────────────────────────────

pub struct ApplyInput {
    pub role_id: Uuid,
    pub cover_letter: Option<String>,
}

pub struct ApplyUseCase<
    Pf: ProfileRepository,
    P: ProjectRepository,
    R: RoleRepository,
    A: ApplicationRepository,
> {
    pub profiles: Pf,
    pub projects: P,
    pub roles: R,
    pub applications: A,
}

impl<Pf: ProfileRepository, P: ProjectRepository, R: RoleRepository, A: ApplicationRepository>
    ApplyUseCase<Pf, P, R, A>
{
    pub async fn execute(
        &self,
        applicant_id: Uuid,
        input: ApplyInput,
    ) -> Result<Application, ApiError> {
        if self.profiles.find_by_user(applicant_id).await?.is_none() {
            return Err(ApiError::ProfileRequired);
        }

        let role = self
            .roles
            .find_by_id(input.role_id)
            .await?
            .ok_or(ApiError::RoleNotFound)?;
        let project = self
            .projects
            .find_by_id(role.project_id)
            .await?
            .ok_or(ApiError::RoleNotFound)?;

        if project.creator_id == applicant_id {
            return Err(ApiError::SelfApplication);
        }
        if role_is_filled(role.slots_filled, role.slots_available) {
            return Err(ApiError::RoleFilled);
        }
        if self
            .applications
            .find_by_role_and_applicant(role.id, applicant_id)
            .await?
            .is_some()
        {
            return Err(ApiError::DuplicateApplication);
        }

        let application = Application {
            id: Uuid::new_v4(),
            project_id: project.id,
            role_id: role.id,
            applicant_id,
            cover_letter: input.cover_letter,
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
            reviewed_at: None,
        };
        self.applications.create(&application).await?;
        Ok(application)
    }
}

// ── AcceptApplication ─────────────────────────────────────────────────────────

/// The pre-checks here give callers precise errors; the repository's
/// `accept` re-verifies state and capacity under a row lock, so a stale
/// read can only turn into `AlreadyProcessed` or `NoSlotsAvailable`,
/// never an oversold slot.
pub struct AcceptApplicationUseCase<
    A: ApplicationRepository,
    P: ProjectRepository,
    M: MemberRepository,
    R: RoleRepository,
> {
    pub applications: A,
    pub projects: P,
    pub members: M,
    pub roles: R,
}

impl<A: ApplicationRepository, P: ProjectRepository, M: MemberRepository, R: RoleRepository>
    AcceptApplicationUseCase<A, P, M, R>
{
    pub async fn execute(&self, caller: Uuid, application_id: Uuid) -> Result<(), ApiError> {
        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or(ApiError::ApplicationNotFound)?;
        let project = self
            .projects
            .find_by_id(application.project_id)
            .await?
            .ok_or(ApiError::ApplicationNotFound)?;

        let membership = self.members.find(project.id, caller).await?;
        ensure_project_authority(
            &project,
            membership.as_ref(),
            caller,
            &[MemberTier::Admin, MemberTier::Parent],
        )?;

        if application.status != ApplicationStatus::Pending {
            return Err(ApiError::AlreadyProcessed);
        }
        let role = self
            .roles
            .find_by_id(application.role_id)
            .await?
            .ok_or(ApiError::RoleNotFound)?;
        if role_is_filled(role.slots_filled, role.slots_available) {
            return Err(ApiError::NoSlotsAvailable);
        }

        self.applications.accept(application.id, Utc::now()).await
    }
}

// ── RejectApplication ─────────────────────────────────────────────────────────

pub struct RejectApplicationUseCase<
    A: ApplicationRepository,
    P: ProjectRepository,
    M: MemberRepository,
> {
    pub applications: A,
    pub projects: P,
    pub members: M,
}

impl<A: ApplicationRepository, P: ProjectRepository, M: MemberRepository>
    RejectApplicationUseCase<A, P, M>
{
    pub async fn execute(&self, caller: Uuid, application_id: Uuid) -> Result<(), ApiError> {
        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or(ApiError::ApplicationNotFound)?;
        let project = self
            .projects
            .find_by_id(application.project_id)
            .await?
            .ok_or(ApiError::ApplicationNotFound)?;

        let membership = self.members.find(project.id, caller).await?;
        ensure_project_authority(
            &project,
            membership.as_ref(),
            caller,
            &[MemberTier::Admin, MemberTier::Parent],
        )?;

        if application.status != ApplicationStatus::Pending {
            return Err(ApiError::AlreadyProcessed);
        }

        self.applications.reject(application.id, Utc::now()).await
    }
}

// ── ListProjectApplications ───────────────────────────────────────────────────

pub struct ListProjectApplicationsUseCase<
    A: ApplicationRepository,
    P: ProjectRepository,
    M: MemberRepository,
> {
    pub applications: A,
    pub projects: P,
    pub members: M,
}

impl<A: ApplicationRepository, P: ProjectRepository, M: MemberRepository>
    ListProjectApplicationsUseCase<A, P, M>
{
    pub async fn execute(
        &self,
        caller: Uuid,
        project_id: Uuid,
    ) -> Result<Vec<Application>, ApiError> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)?;

        let membership = self.members.find(project.id, caller).await?;
        ensure_project_authority(
            &project,
            membership.as_ref(),
            caller,
            &[MemberTier::Admin, MemberTier::Parent],
        )?;

        self.applications.list_by_project(project.id).await
    }
}

// ── ListMyApplications ────────────────────────────────────────────────────────

pub struct ListMyApplicationsUseCase<A: ApplicationRepository> {
    pub applications: A,
}

impl<A: ApplicationRepository> ListMyApplicationsUseCase<A> {
    pub async fn execute(&self, applicant_id: Uuid) -> Result<Vec<Application>, ApiError> {
        self.applications.list_by_applicant(applicant_id).await
    }
}
