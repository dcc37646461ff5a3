//! Auth-related types shared between the session layer and the views
//!
//! Request/response types for the `/auth` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login form fields (`application/x-www-form-urlencoded`)
///
/// The backend uses the OAuth2 password form, so the email travels as
/// `username`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Token payload returned by `/auth/login` and `/auth/refresh`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Record identifier.
///
/// The backend mostly hands out UUID strings, but development fixtures
/// and older rows use integers. Both are accepted and written back in the
/// form they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    CompanyUser,
    Accountant,
}

/// Profile of the logged-in user (`/auth/me`)
///
/// Only `id` is required. Fields the client does not model are kept in
/// `extra` so a cached profile serializes back to what the backend sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Minimal profile with just an id and a display name.
    pub fn named(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            name: Some(name.into()),
            first_name: None,
            last_name: None,
            role: None,
            is_active: None,
            is_superuser: None,
            company_id: None,
            extra: Map::new(),
        }
    }

    /// Name shown in the header: `name`, then "first last", then email.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.email.clone().unwrap_or_else(|| self.id.to_string())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(UserRole::Admin) || self.is_superuser == Some(true)
    }
}

/// Registration payload (`/auth/register`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<RecordId>,
}

fn default_true() -> bool {
    true
}

impl NewUser {
    /// Mirrors the backend password rule so forms can fail fast.
    pub const MIN_PASSWORD_LEN: usize = 6;

    pub fn password_is_valid(&self) -> bool {
        self.password.chars().count() >= Self::MIN_PASSWORD_LEN
    }
}
