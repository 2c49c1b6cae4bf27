use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::instrument;

use super::media::{object_response, read_file_field};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::media::AvatarResponse;
use crate::services::avatar::AvatarService;
use crate::services::fetch_object;
use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct AvatarUploadResponse {
    pub success: bool,
    #[schema(example = "Avatar uploaded successfully")]
    pub message: String,
    pub avatar_url: String,
}

#[utoipa::path(
    post,
    path = "/avatar",
    tag = "Avatars",
    operation_id = "uploadAvatar",
    summary = "Upload or replace the caller's avatar",
    description = "Multipart upload with a single `file` field, images only, 5MB by default. \
        Any previous avatar is removed first.",
    request_body(content_type = "multipart/form-data", description = "Image in the `file` field"),
    responses(
        (status = 200, description = "Avatar stored", body = AvatarUploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage backend failure (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(user_id = auth_user.user_id))]
pub async fn upload_avatar(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AvatarUploadResponse>, AppError> {
    let file = read_file_field(multipart).await?;
    let avatar_url = AvatarService::new(&state.db, state.avatar_store.as_ref(), &state.config.avatar)
        .upload(auth_user.user_id, file)
        .await?;
    Ok(Json(AvatarUploadResponse {
        success: true,
        message: "Avatar uploaded successfully".into(),
        avatar_url,
    }))
}

#[utoipa::path(
    get,
    path = "/avatar",
    tag = "Avatars",
    operation_id = "getAvatar",
    summary = "Get the caller's avatar URL",
    responses(
        (status = 200, description = "Avatar URL, null when none is set", body = AvatarResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_avatar(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<AvatarResponse>, AppError> {
    let avatar_url = AvatarService::new(&state.db, state.avatar_store.as_ref(), &state.config.avatar)
        .url(auth_user.user_id)
        .await?;
    Ok(Json(AvatarResponse { avatar_url }))
}

#[utoipa::path(
    delete,
    path = "/avatar",
    tag = "Avatars",
    operation_id = "deleteAvatar",
    summary = "Remove the caller's avatar",
    responses(
        (status = 204, description = "Avatar removed"),
        (status = 400, description = "User has no avatar (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage backend failure (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn delete_avatar(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    AvatarService::new(&state.db, state.avatar_store.as_ref(), &state.config.avatar)
        .delete(auth_user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/avatars/{key}",
    tag = "Avatars",
    operation_id = "getAvatarFile",
    summary = "Download an avatar image",
    description = "Public.",
    params(("key" = String, Path, description = "Avatar storage key")),
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream"),
        (status = 400, description = "Malformed key (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(key = %key))]
pub async fn get_avatar_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let (key, data) = fetch_object(state.avatar_store.as_ref(), &key).await?;
    object_response(&key, data)
}
