use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::CommentStatus;
use sea_orm::*;
use tracing::instrument;

use crate::entity::comment;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, OptionalAuthUser};
use crate::extractors::json::AppJson;
use crate::models::comment::{
    CommentResponse, CreateCommentRequest, UpdateCommentStatusRequest, validate_comment_request,
};
use crate::models::shared::non_blank;
use crate::services::content::find_content;
use crate::state::AppState;
use crate::utils::visibility::can_view;

#[utoipa::path(
    post,
    path = "/{id}/comments",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a content item",
    description = "Anonymous callers must give `author_name`. New comments start PENDING until moderated. \
        Content the caller cannot see is reported as not found.",
    params(("id" = i32, Path, description = "Content ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, auth, payload), fields(content_id))]
pub async fn create_comment(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<i32>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_comment_request(&payload)?;

    let actor = auth.actor();
    let content = find_content(&state.db, content_id).await?;
    if !can_view(content.status, content.author_id, actor.as_ref()) {
        return Err(AppError::NotFound("Content not found".into()));
    }

    let (author_id, author_name) = match &auth.0 {
        Some(user) => (Some(user.user_id), Some(user.username.clone())),
        None => {
            let name = non_blank(payload.author_name).ok_or_else(|| {
                AppError::Validation("Author name is required for anonymous comments".into())
            })?;
            (None, Some(name))
        }
    };

    let model = comment::ActiveModel {
        content_id: Set(content_id),
        author_id: Set(author_id),
        author_name: Set(author_name),
        author_email: Set(non_blank(payload.author_email)),
        body: Set(payload.body.trim().to_string()),
        status: Set(CommentStatus::Pending),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}/comments",
    tag = "Comments",
    operation_id = "listComments",
    summary = "List comments on a content item",
    description = "Oldest first. Only APPROVED comments are listed, except for ADMIN and EDITOR who see all.",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Comments", body = Vec<CommentResponse>),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, auth), fields(content_id))]
pub async fn list_comments(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<i32>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let actor = auth.actor();
    let content = find_content(&state.db, content_id).await?;
    if !can_view(content.status, content.author_id, actor.as_ref()) {
        return Err(AppError::NotFound("Content not found".into()));
    }

    let mut select = comment::Entity::find()
        .filter(comment::Column::ContentId.eq(content_id))
        .order_by_asc(comment::Column::CreatedAt)
        .order_by_asc(comment::Column::Id);
    if !actor.is_some_and(|a| a.role.is_staff()) {
        select = select.filter(comment::Column::Status.eq(CommentStatus::Approved));
    }

    let rows = select.all(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = "Comments",
    operation_id = "updateCommentStatus",
    summary = "Moderate a comment",
    description = "Sets the status to any of PENDING, APPROVED, REJECTED. Requires ADMIN or EDITOR.",
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = UpdateCommentStatusRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, status = %payload.status))]
pub async fn update_comment_status(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCommentStatusRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    auth_user.require_staff()?;

    let existing = find_comment(&state.db, id).await?;
    let mut active: comment::ActiveModel = existing.into();
    active.status = Set(payload.status);
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Comments",
    operation_id = "deleteComment",
    summary = "Delete a comment",
    description = "Requires ADMIN or EDITOR.",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_staff()?;

    find_comment(&state.db, id).await?;
    comment::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_comment<C: ConnectionTrait>(db: &C, id: i32) -> Result<comment::Model, AppError> {
    comment::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))
}
