use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use filmcrew_core::health::{healthz, readyz};
use filmcrew_core::middleware::request_id_layer;

use crate::handlers::{
    applications::{
        accept_application, apply, list_my_applications, list_project_applications,
        reject_application,
    },
    auth::{
        forgot_password, login, refresh_session, request_signup_code, reset_password,
        verify_signup,
    },
    chat::{chat_ws, delete_message, message_history},
    members::{change_member_tier, list_members, remove_member},
    profiles::{create_profile, get_my_profile, get_profile, update_my_profile},
    projects::{
        create_project, get_project, list_my_projects, list_working_projects,
        update_project_status,
    },
    search::{search_people, search_projects},
    skills::{create_skill, get_skill, list_skills},
    uploads::{upload_portfolio, upload_profile_photo},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/signup/code", post(request_signup_code))
        .route("/auth/signup/verify", post(verify_signup))
        .route("/auth/login", post(login))
        .route("/auth/token/refresh", post(refresh_session))
        .route("/auth/password/forgot", post(forgot_password))
        .route("/auth/password/reset", post(reset_password))
        // Profiles
        .route("/profiles", post(create_profile))
        .route("/profiles/me", get(get_my_profile))
        .route("/profiles/me", patch(update_my_profile))
        .route("/profiles/{user_id}", get(get_profile))
        // Skills
        .route("/skills", post(create_skill))
        .route("/skills", get(list_skills))
        .route("/skills/{skill_id}", get(get_skill))
        // Projects
        .route("/projects", post(create_project))
        .route("/projects/mine", get(list_my_projects))
        .route("/projects/working", get(list_working_projects))
        .route("/projects/{project_id}", get(get_project))
        .route("/projects/{project_id}/status", patch(update_project_status))
        // Applications
        .route("/applications", post(apply))
        .route("/applications/mine", get(list_my_applications))
        .route(
            "/projects/{project_id}/applications",
            get(list_project_applications),
        )
        .route(
            "/applications/{application_id}/accept",
            patch(accept_application),
        )
        .route(
            "/applications/{application_id}/reject",
            patch(reject_application),
        )
        // Members
        .route("/projects/{project_id}/members", get(list_members))
        .route(
            "/projects/{project_id}/members/{member_id}",
            patch(change_member_tier),
        )
        .route(
            "/projects/{project_id}/members/{member_id}",
            delete(remove_member),
        )
        // Chat
        .route("/chat/ws/{project_id}", get(chat_ws))
        .route("/chat/history/{project_id}", get(message_history))
        .route("/chat/messages/{message_id}", delete(delete_message))
        // Search
        .route("/search/projects", get(search_projects))
        .route("/search/people", get(search_people))
        // Uploads
        .route("/uploads/profile-photo", post(upload_profile_photo))
        .route("/uploads/portfolio", post(upload_portfolio))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
