use filmcrew_api::domain::repository::MemberRepository;
use filmcrew_api::error::ApiError;
use filmcrew_api::usecase::application::{AcceptApplicationUseCase, ApplyInput, ApplyUseCase};
use filmcrew_api::usecase::maintenance::MarkStaleProjectsUseCase;
use filmcrew_api::usecase::membership::{
    ChangeMemberTierUseCase, ListMembersUseCase, RemoveMemberUseCase,
};
use filmcrew_domain::member::MemberTier;
use filmcrew_domain::project::ProjectStatus;

use crate::helpers::MemStore;

fn remove_usecase(store: &MemStore) -> RemoveMemberUseCase<MemStore, MemStore> {
    RemoveMemberUseCase {
        members: store.clone(),
        projects: store.clone(),
    }
}

fn tier_usecase(store: &MemStore) -> ChangeMemberTierUseCase<MemStore, MemStore> {
    ChangeMemberTierUseCase {
        members: store.clone(),
        projects: store.clone(),
    }
}

#[tokio::test]
async fn should_reopen_slot_when_role_holder_is_removed() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let applicant = store.seed_user("gaffer@example.com", "x");
    store.seed_profile(applicant.id, "Sam Vo");
    let skill = store.seed_skill("Gaffer");
    let (project, role) = store.seed_project(creator.id, skill.id, 1);

    let application = ApplyUseCase {
        profiles: store.clone(),
        projects: store.clone(),
        roles: store.clone(),
        applications: store.clone(),
    }
    .execute(
        applicant.id,
        ApplyInput {
            role_id: role.id,
            cover_letter: None,
        },
    )
    .await
    .unwrap();
    AcceptApplicationUseCase {
        applications: store.clone(),
        projects: store.clone(),
        members: store.clone(),
        roles: store.clone(),
    }
    .execute(creator.id, application.id)
    .await
    .unwrap();
    assert!(store.get_project(project.id).is_fully_staffed);

    let member = store.member_of(project.id, applicant.id).unwrap();
    remove_usecase(&store)
        .execute(creator.id, project.id, member.id)
        .await
        .unwrap();

    let role = store.get_role(role.id);
    assert_eq!(role.slots_filled, 0);
    assert!(!role.is_filled);
    assert!(!store.get_project(project.id).is_fully_staffed);
    assert!(store.member_of(project.id, applicant.id).is_none());
}

#[tokio::test]
async fn should_release_slot_only_once_per_removal() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let applicant = store.seed_user("gaffer@example.com", "x");
    store.seed_profile(applicant.id, "Sam Vo");
    let skill = store.seed_skill("Gaffer");
    let (project, role) = store.seed_project(creator.id, skill.id, 2);

    let application = ApplyUseCase {
        profiles: store.clone(),
        projects: store.clone(),
        roles: store.clone(),
        applications: store.clone(),
    }
    .execute(
        applicant.id,
        ApplyInput {
            role_id: role.id,
            cover_letter: None,
        },
    )
    .await
    .unwrap();
    AcceptApplicationUseCase {
        applications: store.clone(),
        projects: store.clone(),
        members: store.clone(),
        roles: store.clone(),
    }
    .execute(creator.id, application.id)
    .await
    .unwrap();
    let member = store.member_of(project.id, applicant.id).unwrap();
    assert_eq!(store.get_role(role.id).slots_filled, 1);

    store.remove_with_slot_release(member.id).await.unwrap();
    assert_eq!(store.get_role(role.id).slots_filled, 0);

    // A second removal of the same member must not decrement again.
    let err = store.remove_with_slot_release(member.id).await.unwrap_err();
    assert!(matches!(err, ApiError::MemberNotFound));
    assert_eq!(store.get_role(role.id).slots_filled, 0);
}

#[tokio::test]
async fn should_keep_admin_tier_immutable() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let crew = store.seed_user("crew@example.com", "x");
    let skill = store.seed_skill("Gaffer");
    let (project, _) = store.seed_project(creator.id, skill.id, 1);
    let member = store.seed_member(project.id, crew.id, MemberTier::Child);
    let admin = store.member_of(project.id, creator.id).unwrap();

    // No one can be promoted to admin.
    let err = tier_usecase(&store)
        .execute(creator.id, project.id, member.id, MemberTier::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AdminTierImmutable));

    // The admin cannot be demoted or removed.
    let err = tier_usecase(&store)
        .execute(creator.id, project.id, admin.id, MemberTier::Child)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AdminTierImmutable));
    let err = remove_usecase(&store)
        .execute(creator.id, project.id, admin.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AdminTierImmutable));
}

#[tokio::test]
async fn should_promote_child_to_parent() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let crew = store.seed_user("crew@example.com", "x");
    let skill = store.seed_skill("Gaffer");
    let (project, _) = store.seed_project(creator.id, skill.id, 1);
    let member = store.seed_member(project.id, crew.id, MemberTier::Child);

    let updated = tier_usecase(&store)
        .execute(creator.id, project.id, member.id, MemberTier::Parent)
        .await
        .unwrap();
    assert_eq!(updated.tier, MemberTier::Parent);
    assert_eq!(
        store.member_of(project.id, crew.id).unwrap().tier,
        MemberTier::Parent
    );
}

#[tokio::test]
async fn should_allow_member_to_leave() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let crew = store.seed_user("crew@example.com", "x");
    let skill = store.seed_skill("Gaffer");
    let (project, _) = store.seed_project(creator.id, skill.id, 1);
    let member = store.seed_member(project.id, crew.id, MemberTier::Child);

    remove_usecase(&store)
        .execute(crew.id, project.id, member.id)
        .await
        .unwrap();
    assert!(store.member_of(project.id, crew.id).is_none());
}

#[tokio::test]
async fn should_reserve_member_management_for_the_admin() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let crew = store.seed_user("crew@example.com", "x");
    let producer = store.seed_user("producer@example.com", "x");
    let other = store.seed_user("other@example.com", "x");
    let skill = store.seed_skill("Gaffer");
    let (project, _) = store.seed_project(creator.id, skill.id, 1);
    store.seed_member(project.id, crew.id, MemberTier::Child);
    store.seed_member(project.id, producer.id, MemberTier::Parent);
    let target = store.seed_member(project.id, other.id, MemberTier::Child);

    let err = remove_usecase(&store)
        .execute(crew.id, project.id, target.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));

    // Parents manage applications, not the roster.
    let err = remove_usecase(&store)
        .execute(producer.id, project.id, target.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));
    let err = tier_usecase(&store)
        .execute(producer.id, project.id, target.id, MemberTier::Parent)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));
}

#[tokio::test]
async fn should_list_members_for_members_only() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let crew = store.seed_user("crew@example.com", "x");
    let outsider = store.seed_user("outsider@example.com", "x");
    let skill = store.seed_skill("Gaffer");
    let (project, _) = store.seed_project(creator.id, skill.id, 1);
    store.seed_member(project.id, crew.id, MemberTier::Child);

    let usecase = ListMembersUseCase {
        members: store.clone(),
        projects: store.clone(),
    };
    let members = usecase.execute(crew.id, project.id).await.unwrap();
    assert_eq!(members.len(), 2);

    let err = usecase.execute(outsider.id, project.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotProjectMember));
}

#[tokio::test]
async fn should_sweep_stale_active_projects() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let skill = store.seed_skill("Gaffer");
    let (stale, _) = store.seed_project(creator.id, skill.id, 1);
    let (fresh, _) = store.seed_project(creator.id, skill.id, 1);
    store.backdate_project(stale.id, chrono::Utc::now() - chrono::Duration::days(31));

    let swept = MarkStaleProjectsUseCase {
        projects: store.clone(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(swept, 1);
    assert_eq!(store.get_project(stale.id).status, ProjectStatus::Dead);
    assert_eq!(store.get_project(fresh.id).status, ProjectStatus::Active);
}
