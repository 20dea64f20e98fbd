//! Integration tests for the Users domain
//!
//! These tests use real PostgreSQL via testcontainers. Run with
//! `cargo test -- --ignored` on a machine with Docker.

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_authenticate_user() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("create_and_authenticate");
    let username = builder.username("main");

    let created = service
        .create_user(CreateUser {
            username: username.clone(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();

    let user = service
        .authenticate(&username, "correct horse")
        .await
        .unwrap();
    assert_uuid_eq(user.id, created.id, "authenticated user id");

    let stored = PgUserRepository::new(db.connection())
        .get_by_username(&username)
        .await
        .unwrap();
    let stored = assert_some(stored, "user should exist");
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_username_constraint() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("unique_username");
    let username = builder.username("dup");

    let input = CreateUser {
        username: username.clone(),
        password: "correct horse".to_string(),
    };

    service.create_user(input.clone()).await.unwrap();
    let result = service.create_user(input).await;

    assert!(
        matches!(result, Err(UserError::DuplicateUsername(ref name)) if *name == username),
        "expected duplicate username error, got {:?}",
        result
    );
}
