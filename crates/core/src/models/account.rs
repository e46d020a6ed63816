use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Argon2 PHC string. Never leaves the server.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to insert an account. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_staff: bool,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            is_staff: account.is_staff,
        }
    }
}

/// Raw signup form. Every field is optional so that a missing field can be
/// reported as a validation message instead of a rejected request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Login form. Older forms post the address as `username`; when both fields
/// are sent, a non-empty `email` wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn login_email(&self) -> &str {
        [&self.email, &self.username]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default()
    }
}
