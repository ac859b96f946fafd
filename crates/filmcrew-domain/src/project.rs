//! Project domain enums.

use serde::{Deserialize, Serialize};

/// Production category of a project.
///
/// Wire format: snake_case string, stored as-is in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    ShortFilm,
    FeatureFilm,
    Series,
    Documentary,
    MusicVideo,
    Commercial,
    Other,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortFilm => "short_film",
            Self::FeatureFilm => "feature_film",
            Self::Series => "series",
            Self::Documentary => "documentary",
            Self::MusicVideo => "music_video",
            Self::Commercial => "commercial",
            Self::Other => "other",
        }
    }

    /// Parse from the stored string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "short_film" => Some(Self::ShortFilm),
            "feature_film" => Some(Self::FeatureFilm),
            "series" => Some(Self::Series),
            "documentary" => Some(Self::Documentary),
            "music_video" => Some(Self::MusicVideo),
            "commercial" => Some(Self::Commercial),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Lifecycle status of a project.
///
/// `Dead` is reached either manually or by the stale-project sweep when an
/// active project has had no status update for 30 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
    Shelved,
    Disposed,
    Dead,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Shelved => "shelved",
            Self::Disposed => "disposed",
            Self::Dead => "dead",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "shelved" => Some(Self::Shelved),
            "disposed" => Some(Self::Disposed),
            "dead" => Some(Self::Dead),
            _ => None,
        }
    }
}

/// Compensation model for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Paid,
    Unpaid,
    Negotiable,
}

impl PaymentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::Negotiable => "negotiable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(Self::Paid),
            "unpaid" => Some(Self::Unpaid),
            "negotiable" => Some(Self::Negotiable),
            _ => None,
        }
    }
}
