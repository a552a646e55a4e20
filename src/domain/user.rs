use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, UserRole, timestamp};

/// Account as reported by the backend auth endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

fn default_active() -> bool {
    true
}

/// Response of `POST /api/auth/login` and `POST /api/auth/register`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /api/auth/register`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
}
