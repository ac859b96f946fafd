use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{OneTimeCodeRepository, RefreshTokenRepository, UserRepository};
use crate::domain::types::{CODE_LEN, CODE_TTL_SECS, OneTimeCode, User};
use crate::error::ApiError;
use crate::usecase::password::{hash_password, verify_password};
use crate::usecase::token::{SessionTokens, open_session};

const DIGITS: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect()
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ApiError::InvalidEmail);
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ApiError::InvalidEmail);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 8 {
        return Err(ApiError::WeakPassword);
    }
    Ok(())
}

// ── RequestSignupCode ─────────────────────────────────────────────────────────

pub struct RequestSignupCodeInput {
    pub email: String,
    pub password: String,
}

/// Start signup: validate credentials, stash the password hash on a
/// one-time code row. Returns the clear code for delivery; no account
/// exists until the code is verified.
pub struct RequestSignupCodeUseCase<U: UserRepository, C: OneTimeCodeRepository> {
    pub users: U,
    pub codes: C,
}

impl<U: UserRepository, C: OneTimeCodeRepository> RequestSignupCodeUseCase<U, C> {
    pub async fn execute(&self, input: RequestSignupCodeInput) -> Result<String, ApiError> {
        validate_email(&input.email)?;
        validate_password(&input.password)?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::EmailAlreadyRegistered);
        }
        if self.codes.find_pending(&input.email).await?.is_some() {
            return Err(ApiError::CodePending);
        }

        let code_str = generate_code();
        let now = Utc::now();
        let code = OneTimeCode {
            id: 0,
            email: input.email,
            code: code_str.clone(),
            hashed_password: Some(hash_password(&input.password)?),
            expires_at: now + Duration::seconds(CODE_TTL_SECS),
            used_at: None,
            created_at: now,
        };
        self.codes.create(&code).await?;

        Ok(code_str)
    }
}

// ── VerifySignupCode ──────────────────────────────────────────────────────────

pub struct VerifySignupCodeInput {
    pub email: String,
    pub code: String,
}

#[derive(Debug)]
pub struct SessionOutput {
    pub user_id: Uuid,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// Finish signup: consume the code, create the account, open a session.
pub struct VerifySignupCodeUseCase<
    U: UserRepository,
    C: OneTimeCodeRepository,
    R: RefreshTokenRepository,
> {
    pub users: U,
    pub codes: C,
    pub refresh_tokens: R,
    pub jwt_secret: String,
}

impl<U: UserRepository, C: OneTimeCodeRepository, R: RefreshTokenRepository>
    VerifySignupCodeUseCase<U, C, R>
{
    pub async fn execute(&self, input: VerifySignupCodeInput) -> Result<SessionOutput, ApiError> {
        let code = self
            .codes
            .find_valid(&input.email, &input.code)
            .await?
            .ok_or(ApiError::InvalidCode)?;
        // A reset code has no stashed password and cannot create an account.
        let hashed_password = code.hashed_password.clone().ok_or(ApiError::InvalidCode)?;

        // Narrow race with a concurrent signup; the unique email index is
        // the real backstop.
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::EmailAlreadyRegistered);
        }

        self.codes.mark_used(code.id).await?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            hashed_password,
            is_verified: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let session = open_session(&self.refresh_tokens, user.id, &self.jwt_secret).await?;
        Ok(SessionOutput {
            user_id: user.id,
            access_token: session.access_token,
            access_token_exp: session.access_token_exp,
            refresh_token: session.refresh_token,
        })
    }
}

// ── Login ─────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Password login. Unknown email, wrong password, and deactivated account
/// all collapse to the same error so accounts cannot be enumerated.
pub struct LoginUseCase<U: UserRepository, R: RefreshTokenRepository> {
    pub users: U,
    pub refresh_tokens: R,
    pub jwt_secret: String,
}

impl<U: UserRepository, R: RefreshTokenRepository> LoginUseCase<U, R> {
    pub async fn execute(&self, input: LoginInput) -> Result<SessionOutput, ApiError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !user.is_active || !verify_password(&input.password, &user.hashed_password)? {
            return Err(ApiError::InvalidCredentials);
        }

        let session: SessionTokens =
            open_session(&self.refresh_tokens, user.id, &self.jwt_secret).await?;
        Ok(SessionOutput {
            user_id: user.id,
            access_token: session.access_token,
            access_token_exp: session.access_token_exp,
            refresh_token: session.refresh_token,
        })
    }
}

// ── RequestPasswordReset ──────────────────────────────────────────────────────

pub struct RequestPasswordResetInput {
    pub email: String,
}

/// Start a password reset. Always succeeds from the caller's view;
/// `Some(code)` comes back only when an account exists and no code is
/// pending, and the handler alone decides whether mail goes out.
pub struct RequestPasswordResetUseCase<U: UserRepository, C: OneTimeCodeRepository> {
    pub users: U,
    pub codes: C,
}

impl<U: UserRepository, C: OneTimeCodeRepository> RequestPasswordResetUseCase<U, C> {
    pub async fn execute(
        &self,
        input: RequestPasswordResetInput,
    ) -> Result<Option<String>, ApiError> {
        if self.users.find_by_email(&input.email).await?.is_none() {
            return Ok(None);
        }
        if self.codes.find_pending(&input.email).await?.is_some() {
            return Ok(None);
        }

        let code_str = generate_code();
        let now = Utc::now();
        let code = OneTimeCode {
            id: 0,
            email: input.email,
            code: code_str.clone(),
            hashed_password: None,
            expires_at: now + Duration::seconds(CODE_TTL_SECS),
            used_at: None,
            created_at: now,
        };
        self.codes.create(&code).await?;

        Ok(Some(code_str))
    }
}

// ── ResetPassword ─────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// Finish a password reset. Every outstanding refresh token is revoked so
/// stolen sessions die with the old password.
pub struct ResetPasswordUseCase<
    U: UserRepository,
    C: OneTimeCodeRepository,
    R: RefreshTokenRepository,
> {
    pub users: U,
    pub codes: C,
    pub refresh_tokens: R,
}

impl<U: UserRepository, C: OneTimeCodeRepository, R: RefreshTokenRepository>
    ResetPasswordUseCase<U, C, R>
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), ApiError> {
        validate_password(&input.new_password)?;

        let code = self
            .codes
            .find_valid(&input.email, &input.code)
            .await?
            .ok_or(ApiError::InvalidCode)?;
        // Signup codes carry a stashed password and cannot reset one.
        if code.hashed_password.is_some() {
            return Err(ApiError::InvalidCode);
        }

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ApiError::InvalidCode)?;

        self.codes.mark_used(code.id).await?;
        self.users
            .update_password(user.id, &hash_password(&input.new_password)?)
            .await?;
        self.refresh_tokens.revoke_all_for_user(user.id).await?;

        Ok(())
    }
}
