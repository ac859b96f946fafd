use uuid::Uuid;

use filmcrew_domain::member::MemberTier;

use crate::domain::repository::{MemberRepository, ProjectRepository};
use crate::domain::types::Member;
use crate::error::ApiError;
use crate::usecase::authz::{ensure_project_authority, ensure_project_member};

// ── ListMembers ───────────────────────────────────────────────────────────────

pub struct ListMembersUseCase<M: MemberRepository, P: ProjectRepository> {
    pub members: M,
    pub projects: P,
}

impl<M: MemberRepository, P: ProjectRepository> ListMembersUseCase<M, P> {
    pub async fn execute(&self, caller: Uuid, project_id: Uuid) -> Result<Vec<Member>, ApiError> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)?;

        let membership = self.members.find(project.id, caller).await?;
        ensure_project_member(&project, membership.as_ref(), caller)?;

        self.members.list_by_project(project.id).await
    }
}

// ── ChangeMemberTier ──────────────────────────────────────────────────────────

/// Move a member between parent and child. The admin tier belongs to the
/// creator alone and is never assigned or taken away here.
pub struct ChangeMemberTierUseCase<M: MemberRepository, P: ProjectRepository> {
    pub members: M,
    pub projects: P,
}

impl<M: MemberRepository, P: ProjectRepository> ChangeMemberTierUseCase<M, P> {
    pub async fn execute(
        &self,
        caller: Uuid,
        project_id: Uuid,
        member_id: Uuid,
        tier: MemberTier,
    ) -> Result<Member, ApiError> {
        if tier == MemberTier::Admin {
            return Err(ApiError::AdminTierImmutable);
        }

        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)?;

        let caller_membership = self.members.find(project.id, caller).await?;
        ensure_project_authority(
            &project,
            caller_membership.as_ref(),
            caller,
            &[MemberTier::Admin],
        )?;

        let mut member = self
            .members
            .find_by_id(member_id)
            .await?
            .filter(|m| m.project_id == project.id)
            .ok_or(ApiError::MemberNotFound)?;
        if member.tier == MemberTier::Admin {
            return Err(ApiError::AdminTierImmutable);
        }

        self.members.update_tier(member.id, tier).await?;
        member.tier = tier;
        Ok(member)
    }
}

// ── RemoveMember ──────────────────────────────────────────────────────────────

/// Remove a member, or let a member leave. Removing a role-holding
/// member reopens the slot they occupied.
pub struct RemoveMemberUseCase<M: MemberRepository, P: ProjectRepository> {
    pub members: M,
    pub projects: P,
}

impl<M: MemberRepository, P: ProjectRepository> RemoveMemberUseCase<M, P> {
    pub async fn execute(
        &self,
        caller: Uuid,
        project_id: Uuid,
        member_id: Uuid,
    ) -> Result<(), ApiError> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ApiError::ProjectNotFound)?;

        let member = self
            .members
            .find_by_id(member_id)
            .await?
            .filter(|m| m.project_id == project.id)
            .ok_or(ApiError::MemberNotFound)?;
        if member.tier == MemberTier::Admin {
            return Err(ApiError::AdminTierImmutable);
        }

        // Self-leave skips the authority check.
        if member.user_id != caller {
            let caller_membership = self.members.find(project.id, caller).await?;
            ensure_project_authority(
                &project,
                caller_membership.as_ref(),
                caller,
                &[MemberTier::Admin],
            )?;
        }

        self.members.remove_with_slot_release(member.id).await
    }
}
