use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // validation
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least 8 characters")]
    WeakPassword,
    #[error("actor profiles require age, gender, and a profile photo")]
    MissingActorFields,
    #[error("unknown skill id")]
    UnknownSkill,
    #[error("roles need at least one slot")]
    InvalidSlotCount,
    #[error("create a profile before applying")]
    ProfileRequired,
    #[error("cannot apply to your own project")]
    SelfApplication,
    #[error("the admin tier cannot be changed or assigned")]
    AdminTierImmutable,
    #[error("unsupported file type")]
    UnsupportedFileType,
    #[error("file too large")]
    FileTooLarge,

    // authentication
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid or expired code")]
    InvalidCode,
    #[error("invalid refresh token")]
    InvalidRefreshToken,

    // authorization
    #[error("not authorized for this project")]
    Forbidden,
    #[error("not a member of this project")]
    NotProjectMember,

    // not found
    #[error("profile not found")]
    ProfileNotFound,
    #[error("skill not found")]
    SkillNotFound,
    #[error("project not found")]
    ProjectNotFound,
    #[error("role not found")]
    RoleNotFound,
    #[error("application not found")]
    ApplicationNotFound,
    #[error("member not found")]
    MemberNotFound,
    #[error("message not found")]
    MessageNotFound,

    // state conflicts
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("profile already exists")]
    ProfileAlreadyExists,
    #[error("skill already exists")]
    SkillAlreadyExists,
    #[error("role is already filled")]
    RoleFilled,
    #[error("already applied to this role")]
    DuplicateApplication,
    #[error("application already processed")]
    AlreadyProcessed,
    #[error("no slots available")]
    NoSlotsAvailable,

    // rate limiting
    #[error("a code was already sent recently")]
    CodePending,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::MissingActorFields => "MISSING_ACTOR_FIELDS",
            Self::UnknownSkill => "UNKNOWN_SKILL",
            Self::InvalidSlotCount => "INVALID_SLOT_COUNT",
            Self::ProfileRequired => "PROFILE_REQUIRED",
            Self::SelfApplication => "SELF_APPLICATION",
            Self::AdminTierImmutable => "ADMIN_TIER_IMMUTABLE",
            Self::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidCode => "INVALID_CODE",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::NotProjectMember => "NOT_PROJECT_MEMBER",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::SkillNotFound => "SKILL_NOT_FOUND",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::ApplicationNotFound => "APPLICATION_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::MessageNotFound => "MESSAGE_NOT_FOUND",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::ProfileAlreadyExists => "PROFILE_ALREADY_EXISTS",
            Self::SkillAlreadyExists => "SKILL_ALREADY_EXISTS",
            Self::RoleFilled => "ROLE_FILLED",
            Self::DuplicateApplication => "DUPLICATE_APPLICATION",
            Self::AlreadyProcessed => "ALREADY_PROCESSED",
            Self::NoSlotsAvailable => "NO_SLOTS_AVAILABLE",
            Self::CodePending => "CODE_PENDING",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidEmail
            | Self::WeakPassword
            | Self::MissingActorFields
            | Self::UnknownSkill
            | Self::InvalidSlotCount
            | Self::ProfileRequired
            | Self::SelfApplication
            | Self::AdminTierImmutable
            | Self::UnsupportedFileType
            | Self::FileTooLarge => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidCode | Self::InvalidRefreshToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden | Self::NotProjectMember => StatusCode::FORBIDDEN,
            Self::ProfileNotFound
            | Self::SkillNotFound
            | Self::ProjectNotFound
            | Self::RoleNotFound
            | Self::ApplicationNotFound
            | Self::MemberNotFound
            | Self::MessageNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyRegistered
            | Self::ProfileAlreadyExists
            | Self::SkillAlreadyExists
            | Self::RoleFilled
            | Self::DuplicateApplication
            | Self::AlreadyProcessed
            | Self::NoSlotsAvailable => StatusCode::CONFLICT,
            Self::CodePending => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
