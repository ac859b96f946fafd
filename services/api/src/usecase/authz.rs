use uuid::Uuid;

use filmcrew_domain::member::MemberTier;

use crate::domain::types::{Member, Project};
use crate::error::ApiError;

/// Check that `caller` may act on a project with management authority.
/// The creator always passes; otherwise the caller's membership tier must
/// be one of `allowed`.
pub fn ensure_project_authority(
    project: &Project,
    membership: Option<&Member>,
    caller: Uuid,
    allowed: &[MemberTier],
) -> Result<(), ApiError> {
    if project.creator_id == caller {
        return Ok(());
    }
    match membership {
        Some(member) if allowed.contains(&member.tier) => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}

/// Check that `caller` belongs to the project at all. The creator counts
/// as a member even if the membership row is missing.
pub fn ensure_project_member(
    project: &Project,
    membership: Option<&Member>,
    caller: Uuid,
) -> Result<(), ApiError> {
    if project.creator_id == caller || membership.is_some() {
        Ok(())
    } else {
        Err(ApiError::NotProjectMember)
    }
}
