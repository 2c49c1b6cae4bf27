use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::UserRole;
use sea_orm::*;
use tracing::instrument;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{
    AuthResponse, LoginRequest, MeResponse, RegisterRequest, validate_login_request,
    validate_register_request,
};
use crate::models::shared::non_blank;
use crate::services::avatar::AvatarService;
use crate::state::AppState;
use crate::utils::{hash, jwt};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    operation_id = "register",
    summary = "Register a new account",
    description = "Creates a user with the AUTHOR role and returns a bearer token, same as login.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Username or email taken (USERNAME_TAKEN, CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_string();

    let taken = user::Entity::find()
        .filter(user::Column::Username.eq(&username))
        .one(&state.db)
        .await?;
    if taken.is_some() {
        return Err(AppError::UsernameTaken);
    }
    let email_taken = user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;
    if email_taken.is_some() {
        return Err(AppError::Conflict("Email is already registered".into()));
    }

    let hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let now = chrono::Utc::now();
    let new_user = user::ActiveModel {
        username: Set(username),
        email: Set(email),
        password: Set(hash),
        first_name: Set(non_blank(payload.first_name)),
        last_name: Set(non_blank(payload.last_name)),
        role: Set(UserRole::Author),
        avatar_path: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Registration race condition: unique constraint caught on insert");
            AppError::UsernameTaken
        }
        _ => AppError::from(e),
    })?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in with username and password",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Bad credentials or inactive account (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate_login_request(&payload)?;

    let username = payload.username.trim();

    let user = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid || !user.is_active {
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(issue_token(&state, user)?))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current user's profile",
    responses(
        (status = 200, description = "Profile", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AppError> {
    // A valid token for a deleted account is treated like a bad token.
    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    let avatars = AvatarService::new(&state.db, state.avatar_store.as_ref(), &state.config.avatar);
    Ok(Json(MeResponse {
        avatar_url: avatars.url_for_path(user.avatar_path.as_deref()),
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        role: user.role,
        created_at: user.created_at,
    }))
}

fn issue_token(state: &AppState, user: user::Model) -> Result<AuthResponse, AppError> {
    let signed = jwt::sign(
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_secs,
        user.id,
        &user.username,
        user.role,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    let avatars = AvatarService::new(&state.db, state.avatar_store.as_ref(), &state.config.avatar);
    Ok(AuthResponse {
        token: signed.token,
        token_type: "Bearer",
        session_id: signed.session_id.to_string(),
        avatar_url: avatars.url_for_path(user.avatar_path.as_deref()),
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
    })
}
