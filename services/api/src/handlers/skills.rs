use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use filmcrew_auth_types::identity::Identity;

use crate::domain::types::Skill;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::skill::{CreateSkillInput, CreateSkillUseCase, GetSkillUseCase, ListSkillsUseCase};

#[derive(Serialize)]
pub struct SkillResponse {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name,
            category: skill.category,
        }
    }
}

// ── POST /skills ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSkillRequest {
    pub name: String,
    pub category: Option<String>,
}

pub async fn create_skill(
    State(state): State<AppState>,
    _identity: Identity,
    Json(body): Json<CreateSkillRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateSkillUseCase {
        skills: state.skill_repo(),
    };
    let skill = usecase
        .execute(CreateSkillInput {
            name: body.name,
            category: body.category,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(SkillResponse::from(skill))))
}

// ── GET /skills ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ListSkillsQuery {
    pub category: Option<String>,
}

pub async fn list_skills(
    State(state): State<AppState>,
    Query(query): Query<ListSkillsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ListSkillsUseCase {
        skills: state.skill_repo(),
    };
    let skills = usecase.execute(query.category.as_deref()).await?;
    let body: Vec<SkillResponse> = skills.into_iter().map(SkillResponse::from).collect();
    Ok(Json(body))
}

// ── GET /skills/{skill_id} ────────────────────────────────────────────────────

pub async fn get_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = GetSkillUseCase {
        skills: state.skill_repo(),
    };
    let skill = usecase.execute(skill_id).await?;
    Ok(Json(SkillResponse::from(skill)))
}
