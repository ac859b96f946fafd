use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use filmcrew_auth_types::identity::Identity;
use filmcrew_core::serde::{to_rfc3339_ms, to_rfc3339_ms_opt};
use filmcrew_domain::project::{PaymentType, ProjectStatus, ProjectType};

use crate::domain::types::{Project, Role};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::project::{
    CreateProjectInput, CreateProjectUseCase, GetProjectUseCase, ListCreatedProjectsUseCase,
    ListWorkingProjectsUseCase, ProjectWithRoles, RoleInput, UpdateProjectStatusUseCase,
    WorkingProject,
};

#[derive(Serialize)]
pub struct RoleResponse {
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
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            project_id: role.project_id,
            skill_id: role.skill_id,
            role_title: role.role_title,
            description: role.description,
            slots_available: role.slots_available,
            slots_filled: role.slots_filled,
            is_filled: role.is_filled,
            payment_type: role.payment_type,
            payment_amount: role.payment_amount,
            payment_details: role.payment_details,
        }
    }
}

#[derive(Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub project_type: ProjectType,
    pub release_platform: Option<String>,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub estimated_completion: Option<DateTime<Utc>>,
    pub status: ProjectStatus,
    pub is_fully_staffed: bool,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub last_status_update: Option<DateTime<Utc>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            creator_id: project.creator_id,
            name: project.name,
            description: project.description,
            project_type: project.project_type,
            release_platform: project.release_platform,
            estimated_completion: project.estimated_completion,
            status: project.status,
            is_fully_staffed: project.is_fully_staffed,
            last_status_update: project.last_status_update,
            city: project.city,
            state: project.state,
            country: project.country,
            latitude: project.latitude,
            longitude: project.longitude,
            created_at: project.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub roles: Vec<RoleResponse>,
}

impl From<ProjectWithRoles> for ProjectDetailResponse {
    fn from(out: ProjectWithRoles) -> Self {
        Self {
            project: ProjectResponse::from(out.project),
            roles: out.roles.into_iter().map(RoleResponse::from).collect(),
        }
    }
}

// ── POST /projects ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRoleRequest {
    pub skill_id: i32,
    pub role_title: String,
    pub description: Option<String>,
    pub slots_available: i32,
    pub payment_type: PaymentType,
    pub payment_amount: Option<f64>,
    pub payment_details: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateProjectRequest {
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
    #[serde(default)]
    pub roles: Vec<CreateRoleRequest>,
}

pub async fn create_project(
    State(state): State<AppState>,
    identity: Identity,
    Json(body): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateProjectUseCase {
        projects: state.project_repo(),
        skills: state.skill_repo(),
        profiles: state.profile_repo(),
    };
    let out = usecase
        .execute(
            identity.user_id,
            CreateProjectInput {
                name: body.name,
                description: body.description,
                project_type: body.project_type,
                release_platform: body.release_platform,
                estimated_completion: body.estimated_completion,
                city: body.city,
                state: body.state,
                country: body.country,
                latitude: body.latitude,
                longitude: body.longitude,
                roles: body
                    .roles
                    .into_iter()
                    .map(|r| RoleInput {
                        skill_id: r.skill_id,
                        role_title: r.role_title,
                        description: r.description,
                        slots_available: r.slots_available,
                        payment_type: r.payment_type,
                        payment_amount: r.payment_amount,
                        payment_details: r.payment_details,
                    })
                    .collect(),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ProjectDetailResponse::from(out))))
}

// ── GET /projects/mine ────────────────────────────────────────────────────────

pub async fn list_my_projects(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ListCreatedProjectsUseCase {
        projects: state.project_repo(),
    };
    let projects = usecase.execute(identity.user_id).await?;
    let body: Vec<ProjectResponse> = projects.into_iter().map(ProjectResponse::from).collect();
    Ok(Json(body))
}

// ── GET /projects/working ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct WorkingProjectResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub role_title: Option<String>,
    pub creator_name: Option<String>,
    pub team_size: usize,
}

impl From<WorkingProject> for WorkingProjectResponse {
    fn from(out: WorkingProject) -> Self {
        Self {
            project: ProjectResponse::from(out.project),
            role_title: out.role_title,
            creator_name: out.creator_name,
            team_size: out.team_size,
        }
    }
}

pub async fn list_working_projects(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ListWorkingProjectsUseCase {
        members: state.member_repo(),
        projects: state.project_repo(),
        roles: state.role_repo(),
        profiles: state.profile_repo(),
    };
    let projects = usecase.execute(identity.user_id).await?;
    let body: Vec<WorkingProjectResponse> = projects
        .into_iter()
        .map(WorkingProjectResponse::from)
        .collect();
    Ok(Json(body))
}

// ── GET /projects/{project_id} ────────────────────────────────────────────────

pub async fn get_project(
    State(state): State<AppState>,
    _identity: Identity,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = GetProjectUseCase {
        projects: state.project_repo(),
        roles: state.role_repo(),
    };
    let out = usecase.execute(project_id).await?;
    Ok(Json(ProjectDetailResponse::from(out)))
}

// ── PATCH /projects/{project_id}/status ───────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ProjectStatus,
}

pub async fn update_project_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(project_id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = UpdateProjectStatusUseCase {
        projects: state.project_repo(),
        members: state.member_repo(),
    };
    let project = usecase
        .execute(identity.user_id, project_id, body.status)
        .await?;
    Ok(Json(ProjectResponse::from(project)))
}
