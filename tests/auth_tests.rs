// Auth lifecycle against an in-memory database: hashed credentials,
// generic rejection, and the fail-closed rule for deleted users.

use minhaty::db::create_test_pool;
use minhaty::error::AppError;
use minhaty::models::user::CreateUser;
use minhaty::services::{auth_service, user_service};
use minhaty::validate::Validate;

fn admin_payload() -> CreateUser {
    CreateUser {
        username: "admin".into(),
        password: "correct horse battery".into(),
        display_name: "مدير الموقع".into(),
        role: "admin".into(),
    }
}

#[tokio::test]
async fn passwords_are_stored_hashed_and_verified() {
    let pool = create_test_pool().await.unwrap();
    user_service::create(&pool, admin_payload()).await.unwrap();

    let user = user_service::find_by_username(&pool, "admin")
        .await
        .unwrap()
        .expect("user must exist");

    // Never plaintext in storage.
    assert_ne!(user.password_hash, "correct horse battery");
    assert!(user.password_hash.starts_with("$2"));

    assert!(auth_service::verify_password("correct horse battery", &user.password_hash)
        .await
        .unwrap());
    assert!(!auth_service::verify_password("wrong password", &user.password_hash)
        .await
        .unwrap());
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let pool = create_test_pool().await.unwrap();
    user_service::create(&pool, admin_payload()).await.unwrap();

    let err = user_service::create(&pool, admin_payload())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn session_identity_for_deleted_user_resolves_to_nothing() {
    let pool = create_test_pool().await.unwrap();
    let user = user_service::create(&pool, admin_payload()).await.unwrap();

    // A session would have stored this id; delete the user out from under it.
    assert!(user_service::delete(&pool, user.id).await.unwrap());

    // The auth gate re-fetches the user per request; a missing row means
    // the request is anonymous, never a stale identity.
    let resolved = user_service::find_by_id(&pool, user.id).await.unwrap();
    assert!(resolved.is_none(), "gate must fail closed");
}

#[tokio::test]
async fn weak_passwords_are_rejected_before_any_insert() {
    let pool = create_test_pool().await.unwrap();
    let payload = CreateUser {
        password: "short".into(),
        ..admin_payload()
    };

    assert!(matches!(payload.validate(), Err(AppError::Validation(_))));

    // Handler order: validate first, then create. Nothing was written.
    let users = user_service::list(&pool).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn password_change_invalidates_the_old_secret() {
    let pool = create_test_pool().await.unwrap();
    let user = user_service::create(&pool, admin_payload()).await.unwrap();

    user_service::change_password(&pool, user.id, "a brand new secret")
        .await
        .unwrap();

    let stored = user_service::find_by_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!auth_service::verify_password("correct horse battery", &stored.password_hash)
        .await
        .unwrap());
    assert!(auth_service::verify_password("a brand new secret", &stored.password_hash)
        .await
        .unwrap());
}

#[tokio::test]
async fn bootstrap_admin_only_runs_on_an_empty_table() {
    let pool = create_test_pool().await.unwrap();

    // No ADMIN_PASSWORD in the test environment: nothing happens.
    std::env::remove_var("ADMIN_PASSWORD");
    user_service::ensure_bootstrap_admin(&pool).await.unwrap();
    assert!(user_service::list(&pool).await.unwrap().is_empty());

    user_service::create(&pool, admin_payload()).await.unwrap();
    user_service::ensure_bootstrap_admin(&pool).await.unwrap();
    assert_eq!(user_service::list(&pool).await.unwrap().len(), 1);
}
