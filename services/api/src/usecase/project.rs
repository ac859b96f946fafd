use chrono::{DateTime, Utc};
use uuid::Uuid;

use filmcrew_domain::member::MemberTier;
use filmcrew_domain::project::{PaymentType, ProjectStatus, ProjectType};

use crate::domain::repository::{
    MemberRepository, ProfileRepository, ProjectRepository, RoleRepository, SkillRepository,
};
use crate::domain::types::{Member, Project, Role};
use crate::error::ApiError;
use crate::usecase::authz::ensure_project_authority;

// ── CreateProject ─────────────────────────────────────────────────────────────

pub struct RoleInput {
    pub skill_id: i32,
    pub role_title: String,
    pub description: Option<String>,
    pub slots_available: i32,
    pub payment_type: PaymentType,
    pub payment_amount: Option<f64>,
    pub payment_details: Option<String>,
}

pub struct CreateProjectInput {
    pub name: String,
    pub description: Option<String>,
    pub project_type: ProjectType,
    pub release_platform: Option<String>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub roles: Vec<RoleInput>,
}

#[derive(Debug)]
pub struct ProjectWithRoles {
    pub project: Project,
    pub roles: Vec<Role>,
}

/// Create a project with its open roles. The creator must have a profile
/// and is seeded as the admin member in the same transaction.
pub struct CreateProjectUseCase<P: ProjectRepository, S: SkillRepository, Pf: ProfileRepository> {
    pub projects: P,
    pub skills: S,
    pub profiles: Pf,
}

impl<P: ProjectRepository, S: SkillRepository, Pf: ProfileRepository>
    CreateProjectUseCase<P, S, Pf>
{
    pub async fn execute(
        &self,
        creator_id: Uuid,
        input: CreateProjectInput,
    ) -> Result<ProjectWithRoles, ApiError> {
        if self.profiles.find_by_user(creator_id).await?.is_none() {
            return Err(ApiError::ProfileRequired);
        }
        if input.roles.iter().any(|r| r.slots_available < 1) {
            return Err(ApiError::InvalidSlotCount);
        }

        let skill_ids: Vec<i32> = input.roles.iter().map(|r| r.skill_id).collect();
        if !skill_ids.is_empty() {
            let existing = self.skills.find_existing_ids(&skill_ids).await?;
            if skill_ids.iter().any(|id| !existing.contains(id)) {
                return Err(ApiError::UnknownSkill);
            }
        }

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            creator_id,
            name: input.name,
            description: input.description,
            project_type: input.project_type,
            release_platform: input.release_platform,
            estimated_completion: input.estimated_completion,
            status: ProjectStatus::Active,
            // A project with no roles still counts as not fully staffed so
            // the sweep and search treat it like any other open project.
            is_fully_staffed: false,
            last_status_update: Some(now),
            city: input.city,
            state: input.state,
            country: input.country,
            latitude: input.latitude,
            longitude: input.longitude,
            created_at: now,
            updated_at: now,
        };

        let roles: Vec<Role> = input
            .roles
            .into_iter()
            .map(|r| Role {
                id: Uuid::new_v4(),
                project_id: project.id,
                skill_id: r.skill_id,
                role_title: r.role_title,
                description: r.description,
                slots_available: r.slots_available,
                slots_filled: 0,
                is_filled: false,
                payment_type: r.payment_type,
                payment_amount: r.payment_amount,
                payment_details: r.payment_details,
                created_at: now,
            })
            .collect();

        let admin = Member {
            id: Uuid::new_v4(),
            project_id: project.id,
            user_id: creator_id,
            role_id: None,
            tier: MemberTier::Admin,
            joined_at: now,
        };

        self.projects
            .create_with_roles(&project, &roles, &admin)
            .await?;

        Ok(ProjectWithRoles { project, roles })
    }
}

// ── GetProject ────────────────────────────────────────────────────────────────

pub struct GetProjectUseCase<P: ProjectRepository, R: RoleRepository> {
    pub projects: P,
    pub roles: R,
}

impl<P: ProjectRepository, R: RoleRepository> GetProjectUseCase<P, R> {
    pub async fn execute(&self, id: Uuid) -> Result<ProjectWithRoles, ApiError> {
        let project = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ProjectNotFound)?;
        let roles = self.roles.list_by_project(project.id).await?;
        Ok(ProjectWithRoles { project, roles })
    }
}

// ── ListCreatedProjects ───────────────────────────────────────────────────────

pub struct ListCreatedProjectsUseCase<P: ProjectRepository> {
    pub projects: P,
}

impl<P: ProjectRepository> ListCreatedProjectsUseCase<P> {
    pub async fn execute(&self, creator_id: Uuid) -> Result<Vec<Project>, ApiError> {
        self.projects.list_by_creator(creator_id).await
    }
}

// ── ListWorkingProjects ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct WorkingProject {
    pub project: Project,
    pub role_title: Option<String>,
    pub creator_name: Option<String>,
    pub team_size: usize,
}

/// Projects the user works on through an accepted membership, own
/// creations excluded (those live under the created-projects listing).
pub struct ListWorkingProjectsUseCase<
    M: MemberRepository,
    P: ProjectRepository,
    R: RoleRepository,
    Pf: ProfileRepository,
> {
    pub members: M,
    pub projects: P,
    pub roles: R,
    pub profiles: Pf,
}

impl<M: MemberRepository, P: ProjectRepository, R: RoleRepository, Pf: ProfileRepository>
    ListWorkingProjectsUseCase<M, P, R, Pf>
{
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<WorkingProject>, ApiError> {
        let memberships = self.members.list_by_user(user_id).await?;
        let mut out = Vec::with_capacity(memberships.len());
        for membership in memberships {
            let Some(project) = self.projects.find_by_id(membership.project_id).await? else {
                continue;
            };
            if project.creator_id == user_id {
                continue;
            }

            let role_title = match membership.role_id {
                Some(role_id) => self
                    .roles
                    .find_by_id(role_id)
                    .await?
                    .map(|r| r.role_title),
                None => None,
            };
            let creator_name = self
                .profiles
                .find_by_user(project.creator_id)
                .await?
                .map(|p| p.name);
            let team_size = self.members.list_by_project(project.id).await?.len();

            out.push(WorkingProject {
                project,
                role_title,
                creator_name,
                team_size,
            });
        }
        Ok(out)
    }
}

// ── UpdateProjectStatus ───────────────────────────────────────────────────────

/// Manual status transition by the creator or a managing member. Also
/// refreshes the staleness clock.
pub struct UpdateProjectStatusUseCase<P: ProjectRepository, M: MemberRepository> {
    pub projects: P,
    pub members: M,
}

impl<P: ProjectRepository, M: MemberRepository> UpdateProjectStatusUseCase<P, M> {
    pub async fn execute(
        &self,
        caller: Uuid,
        project_id: Uuid,
        status: ProjectStatus,
    ) -> Result<Project, ApiError> {
        let mut project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)?;

        let membership = self.members.find(project_id, caller).await?;
        ensure_project_authority(
            &project,
            membership.as_ref(),
            caller,
            &[MemberTier::Admin, MemberTier::Parent],
        )?;

        let now = Utc::now();
        self.projects.update_status(project.id, status, now).await?;
        project.status = status;
        project.last_status_update = Some(now);
        project.updated_at = now;
        Ok(project)
    }
}
