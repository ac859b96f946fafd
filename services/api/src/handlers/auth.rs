use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::infra::email::deliver_code;
use crate::state::AppState;
use crate::usecase::signup::{
    LoginInput, LoginUseCase, RequestPasswordResetInput, RequestPasswordResetUseCase,
    RequestSignupCodeInput, RequestSignupCodeUseCase, ResetPasswordInput, ResetPasswordUseCase,
    SessionOutput, VerifySignupCodeInput, VerifySignupCodeUseCase,
};
use crate::usecase::token::RefreshSessionUseCase;

#[derive(Serialize)]
pub struct TokenResponse {
    pub user_id: uuid::Uuid,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

impl From<SessionOutput> for TokenResponse {
    fn from(out: SessionOutput) -> Self {
        Self {
            user_id: out.user_id,
            access_token: out.access_token,
            access_token_exp: out.access_token_exp,
            refresh_token: out.refresh_token,
        }
    }
}

// ── POST /auth/signup/code ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupCodeRequest {
    pub email: String,
    pub password: String,
}

pub async fn request_signup_code(
    State(state): State<AppState>,
    Json(body): Json<SignupCodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = RequestSignupCodeUseCase {
        users: state.user_repo(),
        codes: state.one_time_code_repo(),
    };
    let email = body.email.clone();
    let code = usecase
        .execute(RequestSignupCodeInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    deliver_code(state.mailer.clone(), email, "Your FilmCrew signup code", code);

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "verification code sent" })),
    ))
}

// ── POST /auth/signup/verify ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifySignupRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify_signup(
    State(state): State<AppState>,
    Json(body): Json<VerifySignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = VerifySignupCodeUseCase {
        users: state.user_repo(),
        codes: state.one_time_code_repo(),
        refresh_tokens: state.refresh_token_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(VerifySignupCodeInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(TokenResponse::from(out))))
}

// ── POST /auth/login ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        refresh_tokens: state.refresh_token_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::OK, Json(TokenResponse::from(out))))
}

// ── POST /auth/token/refresh ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub async fn refresh_session(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = RefreshSessionUseCase {
        users: state.user_repo(),
        refresh_tokens: state.refresh_token_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&body.refresh_token).await?;
    let body = TokenResponse {
        user_id: out.user_id,
        access_token: out.access_token,
        access_token_exp: out.access_token_exp,
        refresh_token: out.refresh_token,
    };
    Ok((StatusCode::OK, Json(body)))
}

// ── POST /auth/password/forgot ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Always answers the same way so registered emails cannot be probed.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = RequestPasswordResetUseCase {
        users: state.user_repo(),
        codes: state.one_time_code_repo(),
    };
    let email = body.email.clone();
    if let Some(code) = usecase
        .execute(RequestPasswordResetInput { email: body.email })
        .await?
    {
        deliver_code(
            state.mailer.clone(),
            email,
            "Your FilmCrew password reset code",
            code,
        );
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "if the account exists, a reset code was sent" })),
    ))
}

// ── POST /auth/password/reset ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        codes: state.one_time_code_repo(),
        refresh_tokens: state.refresh_token_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
