use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use filmcrew_auth_types::identity::Identity;

use crate::error::ApiError;
use crate::infra::storage::UploadKind;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

async fn handle_upload(
    state: AppState,
    identity: Identity,
    kind: UploadKind,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .ok_or(ApiError::UnsupportedFileType)?
            .to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| ApiError::FileTooLarge)?;

        let url = state
            .storage
            .upload(kind, identity.user_id, &content_type, bytes.to_vec())
            .await?;
        return Ok((StatusCode::CREATED, Json(UploadResponse { url })));
    }
    Err(ApiError::UnsupportedFileType)
}

// ── POST /uploads/profile-photo ───────────────────────────────────────────────

pub async fn upload_profile_photo(
    State(state): State<AppState>,
    identity: Identity,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    handle_upload(state, identity, UploadKind::ProfilePhoto, multipart).await
}

// ── POST /uploads/portfolio ───────────────────────────────────────────────────

pub async fn upload_portfolio(
    State(state): State<AppState>,
    identity: Identity,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    handle_upload(state, identity, UploadKind::Portfolio, multipart).await
}
