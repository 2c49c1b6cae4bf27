use axum::{extract::FromRequestParts, http::request::Parts};
use common::UserRole;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;
use crate::utils::visibility::Actor;

/// Authenticated user extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication.
/// Role checks happen via `require_staff()` / `require_author()` in the handler body.
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.user_id,
            role: self.role,
        }
    }

    /// Returns `Ok(())` for ADMIN and EDITOR, `Err(PermissionDenied)` otherwise.
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Returns `Ok(())` for every role allowed to write content.
    pub fn require_author(&self) -> Result<(), AppError> {
        if self.role.can_author() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get("Authorization") else {
        return Ok(None);
    };
    let value = header.to_str().map_err(|_| AppError::TokenInvalid)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AppError::TokenInvalid)?;
    Ok(Some(token))
}

fn decode_user(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let claims =
        jwt::verify(&state.config.auth.jwt_secret, token).map_err(|_| AppError::TokenInvalid)?;

    Ok(AuthUser {
        user_id: claims.uid,
        username: claims.sub,
        role: claims.role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or(AppError::TokenMissing)?;
        decode_user(state, token)
    }
}

/// Like [`AuthUser`] but anonymous requests are let through as `None`.
///
/// A header that is present but invalid is still rejected.
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn actor(&self) -> Option<Actor> {
        self.0.as_ref().map(AuthUser::actor)
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(OptionalAuthUser(Some(decode_user(state, token)?))),
            None => Ok(OptionalAuthUser(None)),
        }
    }
}
