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
use filmcrew_core::serde::to_rfc3339_ms;
use filmcrew_domain::profile::Gender;

use crate::error::ApiError;
use crate::handlers::skills::SkillResponse;
use crate::state::AppState;
use crate::usecase::profile::{
    CreateProfileInput, CreateProfileUseCase, GetProfileUseCase, ProfileWithSkills,
    UpdateProfileInput, UpdateProfileUseCase,
};

#[derive(Serialize)]
pub struct ProfileResponse {
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
    pub skills: Vec<SkillResponse>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileWithSkills> for ProfileResponse {
    fn from(out: ProfileWithSkills) -> Self {
        let ProfileWithSkills { profile, skills } = out;
        Self {
            id: profile.id,
            user_id: profile.user_id,
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            profession: profile.profession,
            bio: profile.bio,
            is_actor: profile.is_actor,
            profile_photo_url: profile.profile_photo_url,
            city: profile.city,
            state: profile.state,
            country: profile.country,
            latitude: profile.latitude,
            longitude: profile.longitude,
            years_of_experience: profile.years_of_experience,
            previous_projects: profile.previous_projects,
            portfolio_url: profile.portfolio_url,
            skills: skills.into_iter().map(SkillResponse::from).collect(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

// ── POST /profiles ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub profession: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
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
    #[serde(default)]
    pub skill_ids: Vec<i32>,
}

pub async fn create_profile(
    State(state): State<AppState>,
    identity: Identity,
    Json(body): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateProfileUseCase {
        profiles: state.profile_repo(),
        skills: state.skill_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            CreateProfileInput {
                name: body.name,
                age: body.age,
                gender: body.gender,
                profession: body.profession,
                bio: body.bio,
                is_actor: body.is_actor,
                profile_photo_url: body.profile_photo_url,
                city: body.city,
                state: body.state,
                country: body.country,
                latitude: body.latitude,
                longitude: body.longitude,
                years_of_experience: body.years_of_experience,
                previous_projects: body.previous_projects,
                portfolio_url: body.portfolio_url,
                skill_ids: body.skill_ids,
            },
        )
        .await?;

    let created = GetProfileUseCase {
        profiles: state.profile_repo(),
    }
    .execute(identity.user_id)
    .await?;
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(created))))
}

// ── GET /profiles/me ──────────────────────────────────────────────────────────

pub async fn get_my_profile(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse, ApiError> {
    let out = GetProfileUseCase {
        profiles: state.profile_repo(),
    }
    .execute(identity.user_id)
    .await?;
    Ok(Json(ProfileResponse::from(out)))
}

// ── PATCH /profiles/me ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub profession: Option<String>,
    pub bio: Option<String>,
    pub is_actor: Option<bool>,
    pub profile_photo_url: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub years_of_experience: Option<i32>,
    pub previous_projects: Option<String>,
    pub portfolio_url: Option<String>,
    pub skill_ids: Option<Vec<i32>>,
}

pub async fn update_my_profile(
    State(state): State<AppState>,
    identity: Identity,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = UpdateProfileUseCase {
        profiles: state.profile_repo(),
        skills: state.skill_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                name: body.name,
                age: body.age,
                gender: body.gender,
                profession: body.profession,
                bio: body.bio,
                is_actor: body.is_actor,
                profile_photo_url: body.profile_photo_url,
                city: body.city,
                state: body.state,
                country: body.country,
                latitude: body.latitude,
                longitude: body.longitude,
                years_of_experience: body.years_of_experience,
                previous_projects: body.previous_projects,
                portfolio_url: body.portfolio_url,
                skill_ids: body.skill_ids,
            },
        )
        .await?;

    let updated = GetProfileUseCase {
        profiles: state.profile_repo(),
    }
    .execute(identity.user_id)
    .await?;
    Ok(Json(ProfileResponse::from(updated)))
}

// ── GET /profiles/{user_id} ───────────────────────────────────────────────────

pub async fn get_profile(
    State(state): State<AppState>,
    _identity: Identity,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let out = GetProfileUseCase {
        profiles: state.profile_repo(),
    }
    .execute(user_id)
    .await?;
    Ok(Json(ProfileResponse::from(out)))
}
