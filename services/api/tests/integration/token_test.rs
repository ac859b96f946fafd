use filmcrew_api::error::ApiError;
use filmcrew_api::usecase::token::{RefreshSessionUseCase, open_session};
use filmcrew_auth_types::token::validate_access_token;
use filmcrew_testing::auth::{TEST_JWT_SECRET, TestIdentity};

use crate::helpers::MemStore;

fn refresh_usecase(store: &MemStore) -> RefreshSessionUseCase<MemStore, MemStore> {
    RefreshSessionUseCase {
        users: store.clone(),
        refresh_tokens: store.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

#[tokio::test]
async fn should_rotate_refresh_token_on_use() {
    let store = MemStore::new();
    let user = store.seed_user("crew@example.com", "x");
    let session = open_session(&store, user.id, TEST_JWT_SECRET).await.unwrap();

    let out = refresh_usecase(&store)
        .execute(&session.refresh_token)
        .await
        .unwrap();
    assert_eq!(out.user_id, user.id);
    assert_ne!(out.refresh_token, session.refresh_token);

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);

    // The presented token was revoked by the rotation.
    let err = refresh_usecase(&store)
        .execute(&session.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidRefreshToken));

    // The replacement still works.
    refresh_usecase(&store)
        .execute(&out.refresh_token)
        .await
        .unwrap();
}

#[tokio::test]
async fn should_reject_unknown_refresh_token() {
    let store = MemStore::new();
    store.seed_user("crew@example.com", "x");

    let err = refresh_usecase(&store)
        .execute("not-a-token-we-issued")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidRefreshToken));
}

#[tokio::test]
async fn should_reject_refresh_when_user_is_gone() {
    let store = MemStore::new();
    let user = store.seed_user("crew@example.com", "x");
    let session = open_session(&store, user.id, TEST_JWT_SECRET).await.unwrap();

    // A session minted by the test helper validates like a real one.
    let minted = TestIdentity { user_id: user.id }.token(TEST_JWT_SECRET);
    assert_eq!(
        validate_access_token(&minted, TEST_JWT_SECRET)
            .unwrap()
            .user_id,
        user.id
    );

    let missing_user_store = MemStore::new();
    let usecase = RefreshSessionUseCase {
        users: missing_user_store,
        refresh_tokens: store.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let err = usecase.execute(&session.refresh_token).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRefreshToken));
}
