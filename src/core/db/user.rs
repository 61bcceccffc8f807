use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(anyhow::anyhow!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Disabled,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Disabled => "disabled",
        }
    }
}

impl TryFrom<&str> for UserStatus {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "active" => Ok(UserStatus::Active),
            "disabled" => Ok(UserStatus::Disabled),
            other => Err(anyhow::anyhow!("unknown user status: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: OffsetDateTime,
    pub(super) _guard: (),
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<Option<String>>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

pub trait UserRepository {
    fn get_users(&self) -> impl Future<Output = anyhow::Result<Vec<User>>>;
    fn get_user_by_id(&self, id: i64) -> impl Future<Output = anyhow::Result<Option<User>>>;
    fn get_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = anyhow::Result<Option<User>>>;
    fn update_user(
        &self,
        user: &User,
        update: &UserUpdate,
    ) -> impl Future<Output = anyhow::Result<User>>;
    fn delete_user(&self, user: User) -> impl Future<Output = anyhow::Result<()>>;
}
