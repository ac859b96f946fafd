use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use filmcrew_domain::project::ProjectType;

use crate::error::ApiError;
use crate::handlers::profiles::ProfileResponse;
use crate::handlers::projects::{ProjectResponse, RoleResponse};
use crate::state::AppState;
use crate::usecase::profile::ProfileWithSkills;
use crate::usecase::search::{
    SearchPeopleInput, SearchPeopleUseCase, SearchProjectsInput, SearchProjectsUseCase,
};

// ── GET /search/projects ──────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SearchProjectsQuery {
    pub project_type: Option<ProjectType>,
    pub skill_id: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_distance_km: Option<f64>,
}

#[derive(Serialize)]
pub struct ProjectHitResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub open_roles: Vec<RoleResponse>,
    pub distance_km: Option<f64>,
}

pub async fn search_projects(
    State(state): State<AppState>,
    Query(query): Query<SearchProjectsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = SearchProjectsUseCase {
        projects: state.project_repo(),
        roles: state.role_repo(),
    };
    let hits = usecase
        .execute(SearchProjectsInput {
            project_type: query.project_type,
            skill_id: query.skill_id,
            latitude: query.latitude,
            longitude: query.longitude,
            max_distance_km: query.max_distance_km,
        })
        .await?;

    let body: Vec<ProjectHitResponse> = hits
        .into_iter()
        .map(|hit| ProjectHitResponse {
            project: ProjectResponse::from(hit.project),
            open_roles: hit.open_roles.into_iter().map(RoleResponse::from).collect(),
            distance_km: hit.distance_km,
        })
        .collect();
    Ok(Json(body))
}

// ── GET /search/people ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SearchPeopleQuery {
    pub name: Option<String>,
    pub profession: Option<String>,
    pub skill_id: Option<i32>,
    pub is_actor: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_distance_km: Option<f64>,
}

#[derive(Serialize)]
pub struct PersonHitResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub distance_km: Option<f64>,
}

pub async fn search_people(
    State(state): State<AppState>,
    Query(query): Query<SearchPeopleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = SearchPeopleUseCase {
        profiles: state.profile_repo(),
    };
    let hits = usecase
        .execute(SearchPeopleInput {
            name: query.name,
            profession: query.profession,
            skill_id: query.skill_id,
            is_actor: query.is_actor,
            latitude: query.latitude,
            longitude: query.longitude,
            max_distance_km: query.max_distance_km,
        })
        .await?;

    let body: Vec<PersonHitResponse> = hits
        .into_iter()
        .map(|hit| PersonHitResponse {
            profile: ProfileResponse::from(ProfileWithSkills {
                profile: hit.profile,
                skills: hit.skills,
            }),
            distance_km: hit.distance_km,
        })
        .collect();
    Ok(Json(body))
}
