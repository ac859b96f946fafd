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
use filmcrew_domain::application::ApplicationStatus;

use crate::domain::types::Application;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::application::{
    AcceptApplicationUseCase, ApplyInput, ApplyUseCase, ListMyApplicationsUseCase,
    ListProjectApplicationsUseCase, RejectApplicationUseCase,
};

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub role_id: Uuid,
    pub applicant_id: Uuid,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub applied_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            project_id: application.project_id,
            role_id: application.role_id,
            applicant_id: application.applicant_id,
            cover_letter: application.cover_letter,
            status: application.status,
            applied_at: application.applied_at,
            reviewed_at: application.reviewed_at,
        }
    }
}

// ── POST /applications ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ApplyRequest {
    pub role_id: Uuid,
    pub cover_letter: Option<String>,
}

pub async fn apply(
    State(state): State<AppState>,
    identity: Identity,
    Json(body): Json<ApplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ApplyUseCase {
        profiles: state.profile_repo(),
        projects: state.project_repo(),
        roles: state.role_repo(),
        applications: state.application_repo(),
    };
    let application = usecase
        .execute(
            identity.user_id,
            ApplyInput {
                role_id: body.role_id,
                cover_letter: body.cover_letter,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

// ── GET /applications/mine ────────────────────────────────────────────────────

pub async fn list_my_applications(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ListMyApplicationsUseCase {
        applications: state.application_repo(),
    };
    let applications = usecase.execute(identity.user_id).await?;
    let body: Vec<ApplicationResponse> = applications
        .into_iter()
        .map(ApplicationResponse::from)
        .collect();
    Ok(Json(body))
}

// ── GET /projects/{project_id}/applications ───────────────────────────────────

pub async fn list_project_applications(
    State(state): State<AppState>,
    identity: Identity,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ListProjectApplicationsUseCase {
        applications: state.application_repo(),
        projects: state.project_repo(),
        members: state.member_repo(),
    };
    let applications = usecase.execute(identity.user_id, project_id).await?;
    let body: Vec<ApplicationResponse> = applications
        .into_iter()
        .map(ApplicationResponse::from)
        .collect();
    Ok(Json(body))
}

// ── PATCH /applications/{application_id}/accept ───────────────────────────────

pub async fn accept_application(
    State(state): State<AppState>,
    identity: Identity,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = AcceptApplicationUseCase {
        applications: state.application_repo(),
        projects: state.project_repo(),
        members: state.member_repo(),
        roles: state.role_repo(),
    };
    usecase.execute(identity.user_id, application_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /applications/{application_id}/reject ───────────────────────────────

pub async fn reject_application(
    State(state): State<AppState>,
    identity: Identity,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = RejectApplicationUseCase {
        applications: state.application_repo(),
        projects: state.project_repo(),
        members: state.member_repo(),
    };
    usecase.execute(identity.user_id, application_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
