use chrono::{Duration, Utc};

use crate::domain::repository::ProjectRepository;
use crate::domain::types::STALE_AFTER_DAYS;
use crate::error::ApiError;

/// Sweep active projects whose status has not been touched for
/// `STALE_AFTER_DAYS` to the dead state. Returns how many were swept.
pub struct MarkStaleProjectsUseCase<P: ProjectRepository> {
    pub projects: P,
}

impl<P: ProjectRepository> MarkStaleProjectsUseCase<P> {
    pub async fn execute(&self) -> Result<u64, ApiError> {
        let threshold = Utc::now() - Duration::days(STALE_AFTER_DAYS);
        self.projects.mark_stale_dead(threshold).await
    }
}
