//! Bearer-token helpers for integration tests.
//!
//! Handlers authenticate via `Authorization: Bearer <jwt>`. In tests,
//! `TestIdentity` mints a real token signed with the test secret so no
//! login flow is needed.

use axum::http::{HeaderMap, HeaderValue};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use filmcrew_auth_types::token::{ACCESS_TOKEN_EXP, JwtClaims};

/// Shared JWT secret for test setups.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-tests-only";

/// Configurable identity injected into test requests.
pub struct TestIdentity {
    pub user_id: Uuid,
}

impl TestIdentity {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// Mint an access token for this identity, signed with `secret`.
    pub fn token(&self, secret: &str) -> String {
        let exp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock before UNIX epoch")
            .as_secs()
            + ACCESS_TOKEN_EXP;
        let claims = JwtClaims {
            sub: self.user_id.to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode test jwt")
    }

    /// Return headers as if the client had logged in.
    pub fn headers(&self, secret: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token(secret))).unwrap(),
        );
        map
    }
}
