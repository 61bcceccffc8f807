//! Integration tests for account management.
//!
//! Tests cover:
//! - Registration and duplicate-username rejection
//! - Login verification, disabled accounts, and login logging
//! - Password changes
//! - Default account seeding on an empty database

mod common;

use aquadetect::core::auth::AuthService;
use aquadetect::config::AppConfig;
use common::*;

#[tokio::test]
async fn test_register_and_login() -> anyhow::Result<()> {
    let db = test_db().await;
    let auth = AuthService::new(db.clone());

    let user = auth
        .register("marina", "s3cret", Some("marina@example.org"), Role::User)
        .await?;
    assert!(user.id > 0);
    assert_eq!(user.username, "marina");
    assert_eq!(user.role, Role::User);
    assert_eq!(user.status, UserStatus::Active);

    let logged_in = auth.login("marina", "s3cret", "127.0.0.1").await?;
    assert_eq!(logged_in.map(|u| u.id), Some(user.id));

    let rejected = auth.login("marina", "wrong", "127.0.0.1").await?;
    assert!(rejected.is_none());

    let unknown = auth.login("nobody", "s3cret", "127.0.0.1").await?;
    assert!(unknown.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() -> anyhow::Result<()> {
    let db = test_db().await;
    let auth = AuthService::new(db);

    auth.register("marina", "one", None, Role::User).await?;
    let result = auth.register("marina", "two", None, Role::Admin).await;
    assert!(result.is_err(), "duplicate username should be rejected");
    Ok(())
}

#[tokio::test]
async fn test_login_attempts_are_logged() -> anyhow::Result<()> {
    let db = test_db().await;
    let auth = AuthService::new(db.clone());

    auth.register("marina", "s3cret", None, Role::User).await?;
    auth.login("marina", "s3cret", "10.0.0.2").await?;
    auth.login("marina", "wrong", "10.0.0.3").await?;

    let logs = db.get_login_logs(10).await?;
    assert_eq!(logs.len(), 2);
    // Newest first.
    assert_eq!(logs[0].outcome, aquadetect::core::db::LoginOutcome::Failed);
    assert_eq!(logs[0].ip_address, "10.0.0.3");
    assert_eq!(logs[1].outcome, aquadetect::core::db::LoginOutcome::Success);
    assert_eq!(logs[1].username, "marina");
    Ok(())
}

#[tokio::test]
async fn test_disabled_user_cannot_login() -> anyhow::Result<()> {
    let db = test_db().await;
    let auth = AuthService::new(db.clone());

    let user = auth.register("marina", "s3cret", None, Role::User).await?;
    let update = UserUpdate {
        status: Some(UserStatus::Disabled),
        ..UserUpdate::default()
    };
    db.update_user(&user, &update).await?;

    let result = auth.login("marina", "s3cret", "127.0.0.1").await?;
    assert!(result.is_none(), "disabled account should not log in");
    Ok(())
}

#[tokio::test]
async fn test_change_password() -> anyhow::Result<()> {
    let db = test_db().await;
    let auth = AuthService::new(db);

    let user = auth.register("marina", "old-pass", None, Role::User).await?;

    let wrong = auth.change_password(&user, "not-the-old", "new-pass").await;
    assert!(wrong.is_err());

    auth.change_password(&user, "old-pass", "new-pass").await?;
    assert!(auth.login("marina", "old-pass", "::1").await?.is_none());
    assert!(auth.login("marina", "new-pass", "::1").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_default_users_seeded_once() -> anyhow::Result<()> {
    let db = test_db().await;
    let auth = AuthService::new(db.clone());
    let config = AppConfig::with_default_users();

    auth.seed_default_users(&config.default_users).await?;
    let users = db.get_users().await?;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "admin");
    assert_eq!(users[0].role, Role::Admin);

    // Seeding again is a no-op.
    auth.seed_default_users(&config.default_users).await?;
    assert_eq!(db.get_users().await?.len(), 2);

    // The stock admin account can log in.
    assert!(auth.login("admin", "admin123", "127.0.0.1").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_user_update_and_delete() -> anyhow::Result<()> {
    let db = test_db().await;
    let auth = AuthService::new(db.clone());

    let user = auth.register("marina", "pw", None, Role::User).await?;
    assert_eq!(user.email, None);

    let update = UserUpdate {
        email: Some(Some("new@example.org".to_string())),
        role: Some(Role::Admin),
        status: None,
    };
    let updated = db.update_user(&user, &update).await?;
    assert_eq!(updated.email.as_deref(), Some("new@example.org"));
    assert_eq!(updated.role, Role::Admin);
    assert_eq!(updated.status, UserStatus::Active);

    db.delete_user(updated).await?;
    assert!(db.get_user_by_username("marina").await?.is_none());
    Ok(())
}
