use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, body::Body};
use common::storage::StorageKey;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::media::{MediaListResponse, MediaResponse, MediaUploadResponse};
use crate::services::media::MediaService;
use crate::services::{UploadedFile, fetch_object};
use crate::state::AppState;
use crate::utils::upload::content_type_for;

#[utoipa::path(
    post,
    path = "/",
    tag = "Media",
    operation_id = "uploadMedia",
    summary = "Upload an image",
    description = "Multipart upload with a single `file` field. Accepts JPEG, PNG, GIF and WebP up to \
        the configured limit (10MB by default). The stored name is generated; the original name is kept \
        for display only.",
    request_body(content_type = "multipart/form-data", description = "Image in the `file` field"),
    responses(
        (status = 201, description = "Media stored", body = MediaUploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage backend failure (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(user_id = auth_user.user_id))]
pub async fn upload_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let file = read_file_field(multipart).await?;
    let media = MediaService::new(&state.db, state.media_store.as_ref(), &state.config.media)
        .upload(file, &auth_user.actor())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MediaUploadResponse {
            success: true,
            message: "File uploaded successfully".into(),
            media,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/{key}",
    tag = "Media",
    operation_id = "getMediaFile",
    summary = "Download a media file",
    description = "Public. `Content-Type` is derived from the file extension.",
    params(("key" = String, Path, description = "Storage key, e.g. `<uuid>.png`")),
    responses(
        (status = 200, description = "File bytes", content_type = "application/octet-stream"),
        (status = 400, description = "Malformed key (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(key = %key))]
pub async fn get_media_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let (key, data) = fetch_object(state.media_store.as_ref(), &key).await?;
    object_response(&key, data)
}

#[utoipa::path(
    get,
    path = "/info/{id}",
    tag = "Media",
    operation_id = "getMediaInfo",
    summary = "Get media metadata",
    params(("id" = i32, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Media metadata", body = MediaResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Media not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn get_media_info(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MediaResponse>, AppError> {
    let media = MediaService::new(&state.db, state.media_store.as_ref(), &state.config.media)
        .get(id)
        .await?;
    Ok(Json(media))
}

#[utoipa::path(
    get,
    path = "/my-uploads",
    tag = "Media",
    operation_id = "listMyUploads",
    summary = "List the caller's uploads",
    responses(
        (status = 200, description = "Uploads, newest first", body = MediaListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_my_uploads(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MediaListResponse>, AppError> {
    let data = MediaService::new(&state.db, state.media_store.as_ref(), &state.config.media)
        .list_by_uploader(auth_user.user_id)
        .await?;
    let total = data.len() as u64;
    Ok(Json(MediaListResponse { data, total }))
}

#[utoipa::path(
    delete,
    path = "/{key}",
    tag = "Media",
    operation_id = "deleteMedia",
    summary = "Delete a media item",
    description = "Only the uploader may delete. Removes the stored file, clears it as featured image \
        wherever it is used, then removes the metadata.",
    params(("key" = i32, Path, description = "Media ID")),
    responses(
        (status = 204, description = "Media deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the uploader (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Media not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage backend failure (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn delete_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    MediaService::new(&state.db, state.media_store.as_ref(), &state.config.media)
        .delete(id, &auth_user.actor())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pull the `file` field out of a multipart body. Other fields are ignored.
pub(crate) async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let original_filename = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
        return Ok(UploadedFile {
            original_filename,
            content_type,
            data: data.to_vec(),
        });
    }
    Err(AppError::Validation("Missing 'file' field".into()))
}

/// Serve stored bytes inline under their storage key.
pub(crate) fn object_response(key: &StorageKey, data: Vec<u8>) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(key.as_str()))
        .header(header::CONTENT_LENGTH, data.len().to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", key.as_str()),
        )
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
