//! Project membership tiers.

use serde::{Deserialize, Serialize};

/// Authority tier of a project member.
///
/// Exactly one `Admin` exists per project (the creator). `Parent` members can
/// review applications and change project status; `Child` members are
/// accepted crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberTier {
    Admin,
    Parent,
    Child,
}

impl MemberTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Parent => "parent",
            Self::Child => "child",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "parent" => Some(Self::Parent),
            "child" => Some(Self::Child),
            _ => None,
        }
    }

    /// Whether this tier may review applications and change project status.
    pub fn can_manage(self) -> bool {
        matches!(self, Self::Admin | Self::Parent)
    }
}
