use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned numeric identity of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Verification state. A user only ever moves from `Pending` to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Pending,
    Active,
}

impl UserStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Pending => "PENDING",
            UserStatus::Active => "ACTIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub nickname: String,
    pub address: String,
    pub status: UserStatus,
    pub certification_code: String,
    /// Epoch milliseconds of the most recent login.
    pub last_login_at: Option<i64>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// User as handed to the repository before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub nickname: String,
    pub address: String,
    pub status: UserStatus,
    pub certification_code: String,
}

impl NewUser {
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            nickname: self.nickname,
            address: self.address,
            status: self.status,
            certification_code: self.certification_code,
            last_login_at: None,
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub nickname: String,
    pub address: String,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl UserUpdate {
    pub(crate) fn apply(&self, user: &mut User) {
        if let Some(nickname) = &self.nickname {
            user.nickname.clone_from(nickname);
        }
        if let Some(address) = &self.address {
            user.address.clone_from(address);
        }
    }
}

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub nickname: String,
    pub status: UserStatus,
    pub last_login_at: Option<i64>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            status: user.status,
            last_login_at: user.last_login_at,
        }
    }
}

/// Projection returned to the user themselves; includes the address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyProfileResponse {
    pub id: UserId,
    pub email: String,
    pub nickname: String,
    pub address: String,
    pub status: UserStatus,
    pub last_login_at: Option<i64>,
}

impl From<&User> for MyProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            address: user.address.clone(),
            status: user.status,
            last_login_at: user.last_login_at,
        }
    }
}
