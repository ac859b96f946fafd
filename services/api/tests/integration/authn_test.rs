use filmcrew_api::error::ApiError;
use filmcrew_api::usecase::signup::{
    LoginInput, LoginUseCase, RequestPasswordResetInput, RequestPasswordResetUseCase,
    RequestSignupCodeInput, RequestSignupCodeUseCase, ResetPasswordInput, ResetPasswordUseCase,
    VerifySignupCodeInput, VerifySignupCodeUseCase,
};
use filmcrew_api::usecase::token::RefreshSessionUseCase;
use filmcrew_testing::auth::TEST_JWT_SECRET;

use crate::helpers::MemStore;

fn request_code(store: &MemStore) -> RequestSignupCodeUseCase<MemStore, MemStore> {
    RequestSignupCodeUseCase {
        users: store.clone(),
        codes: store.clone(),
    }
}

fn verify_code(store: &MemStore) -> VerifySignupCodeUseCase<MemStore, MemStore, MemStore> {
    VerifySignupCodeUseCase {
        users: store.clone(),
        codes: store.clone(),
        refresh_tokens: store.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

fn login(store: &MemStore) -> LoginUseCase<MemStore, MemStore> {
    LoginUseCase {
        users: store.clone(),
        refresh_tokens: store.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

fn request_reset(store: &MemStore) -> RequestPasswordResetUseCase<MemStore, MemStore> {
    RequestPasswordResetUseCase {
        users: store.clone(),
        codes: store.clone(),
    }
}

fn reset_password(store: &MemStore) -> ResetPasswordUseCase<MemStore, MemStore, MemStore> {
    ResetPasswordUseCase {
        users: store.clone(),
        codes: store.clone(),
        refresh_tokens: store.clone(),
    }
}

async fn sign_up(store: &MemStore, email: &str, password: &str) -> uuid::Uuid {
    let code = request_code(store)
        .execute(RequestSignupCodeInput {
            email: email.to_owned(),
            password: password.to_owned(),
        })
        .await
        .unwrap();
    verify_code(store)
        .execute(VerifySignupCodeInput {
            email: email.to_owned(),
            code,
        })
        .await
        .unwrap()
        .user_id
}

#[tokio::test]
async fn should_sign_up_with_emailed_code() {
    let store = MemStore::new();
    let code = request_code(&store)
        .execute(RequestSignupCodeInput {
            email: "grip@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(code.len(), 6);
    // No account exists until the code is verified.
    assert!(
        login(&store)
            .execute(LoginInput {
                email: "grip@example.com".to_owned(),
                password: "hunter2hunter2".to_owned(),
            })
            .await
            .is_err()
    );

    let session = verify_code(&store)
        .execute(VerifySignupCodeInput {
            email: "grip@example.com".to_owned(),
            code,
        })
        .await
        .unwrap();
    assert!(!session.access_token.is_empty());
    assert!(!session.refresh_token.is_empty());

    let out = login(&store)
        .execute(LoginInput {
            email: "grip@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(out.user_id, session.user_id);
}

#[tokio::test]
async fn should_refuse_second_code_while_one_is_pending() {
    let store = MemStore::new();
    request_code(&store)
        .execute(RequestSignupCodeInput {
            email: "grip@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap();
    let err = request_code(&store)
        .execute(RequestSignupCodeInput {
            email: "grip@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::CodePending));
}

#[tokio::test]
async fn should_refuse_signup_for_registered_email() {
    let store = MemStore::new();
    sign_up(&store, "grip@example.com", "hunter2hunter2").await;
    let err = request_code(&store)
        .execute(RequestSignupCodeInput {
            email: "grip@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmailAlreadyRegistered));
}

#[tokio::test]
async fn should_validate_signup_credentials() {
    let store = MemStore::new();
    let err = request_code(&store)
        .execute(RequestSignupCodeInput {
            email: "not-an-email".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidEmail));

    let err = request_code(&store)
        .execute(RequestSignupCodeInput {
            email: "grip@example.com".to_owned(),
            password: "short".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::WeakPassword));
}

#[tokio::test]
async fn should_reject_wrong_signup_code() {
    let store = MemStore::new();
    let code = request_code(&store)
        .execute(RequestSignupCodeInput {
            email: "grip@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };
    let err = verify_code(&store)
        .execute(VerifySignupCodeInput {
            email: "grip@example.com".to_owned(),
            code: wrong.to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCode));
}

#[tokio::test]
async fn should_not_reveal_which_login_detail_was_wrong() {
    let store = MemStore::new();
    sign_up(&store, "grip@example.com", "hunter2hunter2").await;

    let unknown = login(&store)
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap_err();
    let wrong_password = login(&store)
        .execute(LoginInput {
            email: "grip@example.com".to_owned(),
            password: "wrong-password".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(unknown, ApiError::InvalidCredentials));
    assert!(matches!(wrong_password, ApiError::InvalidCredentials));
}

#[tokio::test]
async fn should_reset_password_and_revoke_sessions() {
    let store = MemStore::new();
    sign_up(&store, "grip@example.com", "hunter2hunter2").await;
    let session = login(&store)
        .execute(LoginInput {
            email: "grip@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap();

    let code = request_reset(&store)
        .execute(RequestPasswordResetInput {
            email: "grip@example.com".to_owned(),
        })
        .await
        .unwrap()
        .unwrap();
    reset_password(&store)
        .execute(ResetPasswordInput {
            email: "grip@example.com".to_owned(),
            code,
            new_password: "correct-horse-battery".to_owned(),
        })
        .await
        .unwrap();

    // Old sessions die with the old password.
    let refresh = RefreshSessionUseCase {
        users: store.clone(),
        refresh_tokens: store.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let err = refresh.execute(&session.refresh_token).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRefreshToken));

    assert!(
        login(&store)
            .execute(LoginInput {
                email: "grip@example.com".to_owned(),
                password: "hunter2hunter2".to_owned(),
            })
            .await
            .is_err()
    );
    login(&store)
        .execute(LoginInput {
            email: "grip@example.com".to_owned(),
            password: "correct-horse-battery".to_owned(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn should_not_reveal_unknown_email_on_reset() {
    let store = MemStore::new();
    let issued = request_reset(&store)
        .execute(RequestPasswordResetInput {
            email: "nobody@example.com".to_owned(),
        })
        .await
        .unwrap();
    assert!(issued.is_none());
    assert!(store.pending_code_for("nobody@example.com").is_none());
}

#[tokio::test]
async fn should_not_allow_codes_to_cross_flows() {
    let store = MemStore::new();
    sign_up(&store, "grip@example.com", "hunter2hunter2").await;

    // A reset code cannot finish a signup.
    let reset_code = request_reset(&store)
        .execute(RequestPasswordResetInput {
            email: "grip@example.com".to_owned(),
        })
        .await
        .unwrap()
        .unwrap();
    let err = verify_code(&store)
        .execute(VerifySignupCodeInput {
            email: "grip@example.com".to_owned(),
            code: reset_code,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCode));

    // A signup code cannot reset a password.
    let store = MemStore::new();
    let signup_code = request_code(&store)
        .execute(RequestSignupCodeInput {
            email: "gaffer@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap();
    store.seed_user("gaffer@example.com", "x");
    let err = reset_password(&store)
        .execute(ResetPasswordInput {
            email: "gaffer@example.com".to_owned(),
            code: signup_code,
            new_password: "correct-horse-battery".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCode));
}
