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
use filmcrew_domain::member::MemberTier;

use crate::domain::types::Member;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::membership::{
    ChangeMemberTierUseCase, ListMembersUseCase, RemoveMemberUseCase,
};

#[derive(Serialize)]
pub struct MemberResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role_id: Option<Uuid>,
    pub tier: MemberTier,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub joined_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            project_id: member.project_id,
            user_id: member.user_id,
            role_id: member.role_id,
            tier: member.tier,
            joined_at: member.joined_at,
        }
    }
}

// ── GET /projects/{project_id}/members ────────────────────────────────────────

pub async fn list_members(
    State(state): State<AppState>,
    identity: Identity,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ListMembersUseCase {
        members: state.member_repo(),
        projects: state.project_repo(),
    };
    let members = usecase.execute(identity.user_id, project_id).await?;
    let body: Vec<MemberResponse> = members.into_iter().map(MemberResponse::from).collect();
    Ok(Json(body))
}

// ── PATCH /projects/{project_id}/members/{member_id} ──────────────────────────

#[derive(Deserialize)]
pub struct ChangeTierRequest {
    pub tier: MemberTier,
}

pub async fn change_member_tier(
    State(state): State<AppState>,
    identity: Identity,
    Path((project_id, member_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<ChangeTierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ChangeMemberTierUseCase {
        members: state.member_repo(),
        projects: state.project_repo(),
    };
    let member = usecase
        .execute(identity.user_id, project_id, member_id, body.tier)
        .await?;
    Ok(Json(MemberResponse::from(member)))
}

// ── DELETE /projects/{project_id}/members/{member_id} ─────────────────────────

pub async fn remove_member(
    State(state): State<AppState>,
    identity: Identity,
    Path((project_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = RemoveMemberUseCase {
        members: state.member_repo(),
        projects: state.project_repo(),
    };
    usecase
        .execute(identity.user_id, project_id, member_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
