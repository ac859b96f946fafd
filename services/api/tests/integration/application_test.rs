use filmcrew_api::error::ApiError;
use filmcrew_api::usecase::application::{
    AcceptApplicationUseCase, ApplyInput, ApplyUseCase, ListProjectApplicationsUseCase,
    RejectApplicationUseCase,
};
use filmcrew_domain::application::ApplicationStatus;
use filmcrew_domain::member::MemberTier;
use uuid::Uuid;

use crate::helpers::MemStore;

fn apply_usecase(store: &MemStore) -> ApplyUseCase<MemStore, MemStore, MemStore, MemStore> {
    ApplyUseCase {
        profiles: store.clone(),
        projects: store.clone(),
        roles: store.clone(),
        applications: store.clone(),
    }
}

fn accept_usecase(
    store: &MemStore,
) -> AcceptApplicationUseCase<MemStore, MemStore, MemStore, MemStore> {
    AcceptApplicationUseCase {
        applications: store.clone(),
        projects: store.clone(),
        members: store.clone(),
        roles: store.clone(),
    }
}

#[tokio::test]
async fn should_accept_application_and_staff_the_role() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let applicant = store.seed_user("gaffer@example.com", "x");
    store.seed_profile(applicant.id, "Sam Vo");
    let skill = store.seed_skill("Gaffer");
    let (project, role) = store.seed_project(creator.id, skill.id, 1);

    let application = apply_usecase(&store)
        .execute(
            applicant.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: Some("available all of March".to_owned()),
            },
        )
        .await
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::Pending);

    accept_usecase(&store)
        .execute(creator.id, application.id)
        .await
        .unwrap();

    let accepted = store.get_application(application.id);
    assert_eq!(accepted.status, ApplicationStatus::Accepted);
    assert!(accepted.reviewed_at.is_some());

    let member = store.member_of(project.id, applicant.id).unwrap();
    assert_eq!(member.tier, MemberTier::Child);
    assert_eq!(member.role_id, Some(role.id));

    let role = store.get_role(role.id);
    assert_eq!(role.slots_filled, 1);
    assert!(role.is_filled);
    assert!(store.get_project(project.id).is_fully_staffed);
}

#[tokio::test]
async fn should_reject_without_side_effects() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let applicant = store.seed_user("gaffer@example.com", "x");
    store.seed_profile(applicant.id, "Sam Vo");
    let skill = store.seed_skill("Gaffer");
    let (project, role) = store.seed_project(creator.id, skill.id, 1);

    let application = apply_usecase(&store)
        .execute(
            applicant.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();

    RejectApplicationUseCase {
        applications: store.clone(),
        projects: store.clone(),
        members: store.clone(),
    }
    .execute(creator.id, application.id)
    .await
    .unwrap();

    let rejected = store.get_application(application.id);
    assert_eq!(rejected.status, ApplicationStatus::Rejected);
    assert!(store.member_of(project.id, applicant.id).is_none());
    assert_eq!(store.get_role(role.id).slots_filled, 0);
    assert!(!store.get_project(project.id).is_fully_staffed);
}

#[tokio::test]
async fn should_fail_accept_when_no_slots_left() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let first = store.seed_user("first@example.com", "x");
    let second = store.seed_user("second@example.com", "x");
    store.seed_profile(first.id, "First");
    store.seed_profile(second.id, "Second");
    let skill = store.seed_skill("Gaffer");
    let (_, role) = store.seed_project(creator.id, skill.id, 1);

    let app_one = apply_usecase(&store)
        .execute(
            first.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();
    let app_two = apply_usecase(&store)
        .execute(
            second.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();

    accept_usecase(&store)
        .execute(creator.id, app_one.id)
        .await
        .unwrap();
    let err = accept_usecase(&store)
        .execute(creator.id, app_two.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NoSlotsAvailable));
}

#[tokio::test]
async fn should_fail_second_accept_of_same_application() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let applicant = store.seed_user("gaffer@example.com", "x");
    store.seed_profile(applicant.id, "Sam Vo");
    let skill = store.seed_skill("Gaffer");
    let (_, role) = store.seed_project(creator.id, skill.id, 2);

    let application = apply_usecase(&store)
        .execute(
            applicant.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();

    accept_usecase(&store)
        .execute(creator.id, application.id)
        .await
        .unwrap();
    let err = accept_usecase(&store)
        .execute(creator.id, application.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AlreadyProcessed));
}

#[tokio::test]
async fn should_not_flip_terminal_application_states() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let applicant = store.seed_user("gaffer@example.com", "x");
    store.seed_profile(applicant.id, "Sam Vo");
    let skill = store.seed_skill("Gaffer");
    let (project, role) = store.seed_project(creator.id, skill.id, 1);

    let reject = RejectApplicationUseCase {
        applications: store.clone(),
        projects: store.clone(),
        members: store.clone(),
    };

    // A reject landing after an accept must not undo it.
    let application = apply_usecase(&store)
        .execute(
            applicant.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();
    accept_usecase(&store)
        .execute(creator.id, application.id)
        .await
        .unwrap();
    let err = reject
        .execute(creator.id, application.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AlreadyProcessed));

    let state = store.get_application(application.id);
    assert_eq!(state.status, ApplicationStatus::Accepted);
    assert!(store.member_of(project.id, applicant.id).is_some());
    assert_eq!(store.get_role(role.id).slots_filled, 1);

    // And an accept landing after a reject stays rejected.
    let late = store.seed_user("late@example.com", "x");
    store.seed_profile(late.id, "Late");
    let (_, other_role) = store.seed_project(creator.id, skill.id, 1);
    let application = apply_usecase(&store)
        .execute(
            late.id,
            ApplyInput {
                role_id: other_role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();
    reject
        .execute(creator.id, application.id)
        .await
        .unwrap();
    let err = accept_usecase(&store)
        .execute(creator.id, application.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AlreadyProcessed));
    assert_eq!(
        store.get_application(application.id).status,
        ApplicationStatus::Rejected
    );
    assert_eq!(store.get_role(other_role.id).slots_filled, 0);
}

#[tokio::test]
async fn should_require_profile_before_applying() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let applicant = store.seed_user("noprofile@example.com", "x");
    let skill = store.seed_skill("Gaffer");
    let (_, role) = store.seed_project(creator.id, skill.id, 1);

    let err = apply_usecase(&store)
        .execute(
            applicant.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ProfileRequired));
}

#[tokio::test]
async fn should_block_applying_to_own_project() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    store.seed_profile(creator.id, "Director");
    let skill = store.seed_skill("Gaffer");
    let (_, role) = store.seed_project(creator.id, skill.id, 1);

    let err = apply_usecase(&store)
        .execute(
            creator.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::SelfApplication));
}

#[tokio::test]
async fn should_block_duplicate_application() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let applicant = store.seed_user("gaffer@example.com", "x");
    store.seed_profile(applicant.id, "Sam Vo");
    let skill = store.seed_skill("Gaffer");
    let (_, role) = store.seed_project(creator.id, skill.id, 2);

    apply_usecase(&store)
        .execute(
            applicant.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();
    let err = apply_usecase(&store)
        .execute(
            applicant.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateApplication));
}

#[tokio::test]
async fn should_block_applying_to_filled_role() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let first = store.seed_user("first@example.com", "x");
    let late = store.seed_user("late@example.com", "x");
    store.seed_profile(first.id, "First");
    store.seed_profile(late.id, "Late");
    let skill = store.seed_skill("Gaffer");
    let (_, role) = store.seed_project(creator.id, skill.id, 1);

    let application = apply_usecase(&store)
        .execute(
            first.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();
    accept_usecase(&store)
        .execute(creator.id, application.id)
        .await
        .unwrap();

    let err = apply_usecase(&store)
        .execute(
            late.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RoleFilled));
}

#[tokio::test]
async fn should_forbid_child_member_from_reviewing() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let child = store.seed_user("crew@example.com", "x");
    let applicant = store.seed_user("gaffer@example.com", "x");
    store.seed_profile(applicant.id, "Sam Vo");
    let skill = store.seed_skill("Gaffer");
    let (project, role) = store.seed_project(creator.id, skill.id, 1);
    store.seed_member(project.id, child.id, MemberTier::Child);

    let application = apply_usecase(&store)
        .execute(
            applicant.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();

    let err = accept_usecase(&store)
        .execute(child.id, application.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));
}

#[tokio::test]
async fn should_allow_parent_member_to_list_applications() {
    let store = MemStore::new();
    let creator = store.seed_user("director@example.com", "x");
    let parent = store.seed_user("producer@example.com", "x");
    let applicant = store.seed_user("gaffer@example.com", "x");
    store.seed_profile(applicant.id, "Sam Vo");
    let skill = store.seed_skill("Gaffer");
    let (project, role) = store.seed_project(creator.id, skill.id, 1);
    store.seed_member(project.id, parent.id, MemberTier::Parent);

    apply_usecase(&store)
        .execute(
            applicant.id,
            ApplyInput {
                role_id: role.id,
                cover_letter: None,
            },
        )
        .await
        .unwrap();

    let list = ListProjectApplicationsUseCase {
        applications: store.clone(),
        projects: store.clone(),
        members: store.clone(),
    };
    let applications = list.execute(parent.id, project.id).await.unwrap();
    assert_eq!(applications.len(), 1);

    let outsider = Uuid::new_v4();
    let err = list.execute(outsider, project.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));
}
