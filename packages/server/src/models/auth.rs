use chrono::{DateTime, Utc};
use common::UserRole;
use serde::{Deserialize, Serialize};

use super::shared::validate_optional_len;
use crate::error::AppError;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique username (3-50 chars, alphanumeric and underscores).
    #[schema(example = "alice_wonder")]
    pub username: String,
    /// Unique email address (max 100 characters).
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password (at least 6 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    #[schema(example = "Alice")]
    pub first_name: Option<String>,
    #[schema(example = "Liddell")]
    pub last_name: Option<String>,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    let username = payload.username.trim();
    let len = username.chars().count();
    if !(3..=50).contains(&len) {
        return Err(AppError::Validation(
            "Username must be between 3 and 50 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::Validation(
            "Username must contain only letters, digits, and underscores".into(),
        ));
    }
    let email = payload.email.trim();
    if email.chars().count() > 100 {
        return Err(AppError::Validation(
            "Email must not exceed 100 characters".into(),
        ));
    }
    if !is_plausible_email(email) {
        return Err(AppError::Validation("Email must be valid".into()));
    }
    if payload.password.chars().count() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }
    validate_optional_len(payload.first_name.as_deref(), "First name", 50)?;
    validate_optional_len(payload.last_name.as_deref(), "Last name", 50)?;
    Ok(())
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Request body for user login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username of the account to log into.
    #[schema(example = "alice_wonder")]
    pub username: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }
    Ok(())
}

/// Returned by both login and registration.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    /// JWT bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Always `Bearer`.
    #[serde(rename = "type")]
    #[schema(example = "Bearer")]
    pub token_type: &'static str,
    /// Random id embedded in the token for client-side correlation.
    #[schema(example = "6f1c4f3e-2b8a-4a8e-9a43-0f5bde9b1c11")]
    pub session_id: String,
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice_wonder")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub role: UserRole,
    /// Public avatar URL, if the user has one.
    pub avatar_url: Option<String>,
}

/// Current authenticated user's profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice_wonder")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
