use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rand::RngExt;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use filmcrew_auth_types::token::{ACCESS_TOKEN_EXP, JwtClaims};

use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::types::{REFRESH_TOKEN_LEN, REFRESH_TOKEN_TTL_SECS, RefreshTokenRecord};
use crate::error::ApiError;

/// Charset for opaque refresh tokens (alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_access_token(user_id: Uuid, secret: &str) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Generate a fresh opaque refresh token. The clear value goes to the
/// client; only its digest is stored.
pub fn mint_refresh_token() -> String {
    let mut rng = rand::rng();
    (0..REFRESH_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Access + refresh token pair handed out at login, signup, and refresh.
#[derive(Debug)]
pub struct SessionTokens {
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// Issue an access token and a stored refresh token for a user.
pub async fn open_session<R: RefreshTokenRepository>(
    refresh_tokens: &R,
    user_id: Uuid,
    jwt_secret: &str,
) -> Result<SessionTokens, ApiError> {
    let (access_token, access_token_exp) = issue_access_token(user_id, jwt_secret)?;

    let refresh_token = mint_refresh_token();
    let now = Utc::now();
    let record = RefreshTokenRecord {
        id: 0,
        user_id,
        token_hash: hash_refresh_token(&refresh_token),
        expires_at: now + Duration::seconds(REFRESH_TOKEN_TTL_SECS),
        revoked_at: None,
        created_at: now,
    };
    refresh_tokens.create(&record).await?;

    Ok(SessionTokens {
        access_token,
        access_token_exp,
        refresh_token,
    })
}

// ── RefreshSession ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshSessionOutput {
    pub user_id: Uuid,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// Rotate a refresh token: the presented token is revoked and replaced,
/// so each value is usable exactly once.
pub struct RefreshSessionUseCase<U: UserRepository, R: RefreshTokenRepository> {
    pub users: U,
    pub refresh_tokens: R,
    pub jwt_secret: String,
}

impl<U: UserRepository, R: RefreshTokenRepository> RefreshSessionUseCase<U, R> {
    pub async fn execute(&self, refresh_token: &str) -> Result<RefreshSessionOutput, ApiError> {
        let record = self
            .refresh_tokens
            .find_active_by_hash(&hash_refresh_token(refresh_token))
            .await?
            .ok_or(ApiError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(record.user_id)
            .await?
            .ok_or(ApiError::InvalidRefreshToken)?;
        if !user.is_active {
            return Err(ApiError::InvalidRefreshToken);
        }

        self.refresh_tokens.revoke(record.id).await?;
        let session = open_session(&self.refresh_tokens, user.id, &self.jwt_secret).await?;

        Ok(RefreshSessionOutput {
            user_id: user.id,
            access_token: session.access_token,
            access_token_exp: session.access_token_exp,
            refresh_token: session.refresh_token,
        })
    }
}
