use axum::{
    Json,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;
use uuid::Uuid;

use filmcrew_auth_types::identity::Identity;
use filmcrew_auth_types::token::validate_access_token;
use filmcrew_core::serde::{to_rfc3339_ms, to_rfc3339_ms_opt};
use filmcrew_domain::pagination::LimitRequest;

use crate::domain::repository::{MemberRepository, ProjectRepository};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::authz::ensure_project_member;
use crate::usecase::message::{
    DeleteMessageUseCase, MessageHistoryUseCase, MessageView, RecordMessageUseCase,
};

#[derive(Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Option<Uuid>,
    pub sender_name: Option<String>,
    pub content: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub sent_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub edited_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl From<MessageView> for MessageResponse {
    fn from(view: MessageView) -> Self {
        Self {
            id: view.id,
            sender_id: view.sender_id,
            sender_name: view.sender_name,
            content: view.content,
            sent_at: view.sent_at,
            edited_at: view.edited_at,
            is_deleted: view.is_deleted,
        }
    }
}

// ── GET /chat/ws/{project_id} ─────────────────────────────────────────────────

/// Browsers cannot set an Authorization header on a websocket handshake,
/// so the first frame must be `{"token": "<access token>"}`. Subsequent
/// frames are `{"content": "..."}`.
pub async fn chat_ws(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, project_id, socket))
}

#[derive(Deserialize)]
struct AuthFrame {
    token: String,
}

#[derive(Deserialize)]
struct ContentFrame {
    content: String,
}

async fn close_with_error(mut socket: WebSocket, kind: &str) {
    let frame = json!({ "error": kind }).to_string();
    let _ = socket.send(Message::Text(frame.into())).await;
    let _ = socket.close().await;
}

async fn authenticate(
    state: &AppState,
    project_id: Uuid,
    socket: &mut WebSocket,
) -> Option<Uuid> {
    let first = match socket.recv().await {
        Some(Ok(Message::Text(text))) => text,
        _ => return None,
    };
    let auth: AuthFrame = serde_json::from_str(&first).ok()?;
    let info = validate_access_token(&auth.token, &state.jwt_secret).ok()?;

    let project = state
        .project_repo()
        .find_by_id(project_id)
        .await
        .ok()
        .flatten()?;
    let membership = state
        .member_repo()
        .find(project_id, info.user_id)
        .await
        .ok()?;
    ensure_project_member(&project, membership.as_ref(), info.user_id).ok()?;
    Some(info.user_id)
}

async fn handle_socket(state: AppState, project_id: Uuid, mut socket: WebSocket) {
    let Some(user_id) = authenticate(&state, project_id, &mut socket).await else {
        close_with_error(socket, "UNAUTHORIZED").await;
        return;
    };

    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let conn_id = state.chat.join(project_id, tx).await;

    // Forward room broadcasts to this connection.
    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = stream.next().await {
        let Message::Text(text) = message else {
            continue;
        };
        let Ok(frame) = serde_json::from_str::<ContentFrame>(&text) else {
            continue;
        };
        if frame.content.trim().is_empty() {
            continue;
        }

        let usecase = RecordMessageUseCase {
            messages: state.message_repo(),
            members: state.member_repo(),
            projects: state.project_repo(),
        };
        match usecase.execute(user_id, project_id, frame.content).await {
            Ok(recorded) => {
                let outgoing = json!({
                    "id": recorded.id,
                    "sender_id": recorded.sender_id,
                    "content": recorded.content,
                    "sent_at": recorded.sent_at.to_rfc3339(),
                })
                .to_string();
                state
                    .chat
                    .broadcast_from(project_id, conn_id, Message::Text(outgoing.into()))
                    .await;
            }
            Err(e) => {
                tracing::warn!(error = %e, %project_id, "failed to record chat message");
            }
        }
    }

    state.chat.leave(project_id, conn_id).await;
    send_task.abort();
    let _ = (&mut send_task).await;
}

// ── GET /chat/history/{project_id} ────────────────────────────────────────────

pub async fn message_history(
    State(state): State<AppState>,
    identity: Identity,
    Path(project_id): Path<Uuid>,
    Query(limit): Query<LimitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = MessageHistoryUseCase {
        messages: state.message_repo(),
        members: state.member_repo(),
        projects: state.project_repo(),
        profiles: state.profile_repo(),
    };
    let views = usecase.execute(identity.user_id, project_id, limit).await?;
    let body: Vec<MessageResponse> = views.into_iter().map(MessageResponse::from).collect();
    Ok(Json(body))
}

// ── DELETE /chat/messages/{message_id} ────────────────────────────────────────

pub async fn delete_message(
    State(state): State<AppState>,
    identity: Identity,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = DeleteMessageUseCase {
        messages: state.message_repo(),
    };
    usecase.execute(identity.user_id, message_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
