//! List limits for history-style endpoints.

use serde::{Deserialize, Serialize};

/// Limit parameter shared by list endpoints.
///
/// - `limit`: 1–200, default 50
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitRequest {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

impl Default for LimitRequest {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

impl LimitRequest {
    /// Clamp `limit` to the valid range 1–200.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, 200),
        }
    }
}
