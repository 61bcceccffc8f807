use anyhow::Context;
use log::{info, warn};
use sha2::{Digest, Sha256};

use crate::config::DefaultUser;
use crate::core::db::{
    AppDb, LoginLogRepository, LoginOutcome, Role, User, UserRepository, UserStatus,
};

/// Account management on top of [`AppDb`].
#[derive(Debug, Clone)]
pub struct AuthService {
    db: AppDb,
}

impl AuthService {
    pub fn new(db: AppDb) -> Self {
        Self { db }
    }

    fn hash_password(password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
        role: Role,
    ) -> anyhow::Result<User> {
        if username.trim().is_empty() {
            anyhow::bail!("Username must not be empty");
        }
        if password.is_empty() {
            anyhow::bail!("Password must not be empty");
        }
        if self.db.get_user_by_username(username).await?.is_some() {
            anyhow::bail!("Username {username:?} is already taken");
        }
        let user = self
            .db
            .insert_user(username, &Self::hash_password(password), email, role)
            .await?;
        info!("registered user {} ({})", user.username, user.role.as_str());
        Ok(user)
    }

    /// Verify credentials and record the attempt. Returns `None` on a bad
    /// username or password, or a disabled account.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ip_address: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = self.db.get_user_by_username(username).await?;
        let accepted = match &user {
            Some(user) => {
                user.status == UserStatus::Active
                    && self.db.get_password_hash(user.id).await? == Self::hash_password(password)
            }
            None => false,
        };
        let user_id = user.as_ref().map(|u| u.id);
        let outcome = if accepted {
            LoginOutcome::Success
        } else {
            LoginOutcome::Failed
        };
        self.db
            .record_login(user_id, username, ip_address, outcome)
            .await
            .context("Failed to record login attempt")?;
        if accepted {
            Ok(user)
        } else {
            warn!("rejected login for {username:?} from {ip_address}");
            Ok(None)
        }
    }

    pub async fn change_password(
        &self,
        user: &User,
        old_password: &str,
        new_password: &str,
    ) -> anyhow::Result<()> {
        if new_password.is_empty() {
            anyhow::bail!("Password must not be empty");
        }
        let current = self.db.get_password_hash(user.id).await?;
        if current != Self::hash_password(old_password) {
            anyhow::bail!("Current password is incorrect");
        }
        self.db
            .set_password_hash(user.id, &Self::hash_password(new_password))
            .await?;
        info!("password changed for user {}", user.username);
        Ok(())
    }

    /// Create the configured default accounts on first launch. Does
    /// nothing when any user already exists.
    pub async fn seed_default_users(&self, defaults: &[DefaultUser]) -> anyhow::Result<()> {
        if self.db.count_users().await? > 0 {
            return Ok(());
        }
        for account in defaults {
            self.db
                .insert_user(
                    &account.username,
                    &Self::hash_password(&account.password),
                    account.email.as_deref(),
                    account.role,
                )
                .await
                .with_context(|| {
                    format!("Failed to create default user {:?}", account.username)
                })?;
            info!("created default user {}", account.username);
        }
        Ok(())
    }
}
