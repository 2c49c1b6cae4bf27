use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, OptionalAuthUser};
use crate::extractors::json::AppJson;
use crate::models::content::{ContentListResponse, ContentRequest, ContentResponse};
use crate::models::shared::{PageQuery, PageRequest};
use crate::services::content::ContentService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Contents",
    operation_id = "listContents",
    summary = "List contents visible to the caller",
    description = "Newest first. Drafts and archived items appear only for their author and admins. \
        Filtering happens after the page is cut, so `total` counts the visible items on this page.",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of contents", body = ContentListResponse),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, auth, query))]
pub async fn list_contents(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ContentListResponse>, AppError> {
    let actor = auth.actor();
    let list = ContentService::new(&state.db)
        .list_all(actor.as_ref(), PageRequest::from(&query))
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/published",
    tag = "Contents",
    operation_id = "listPublishedContents",
    summary = "List published contents",
    description = "Most recently published first.",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of published contents", body = ContentListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_published(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ContentListResponse>, AppError> {
    let list = ContentService::new(&state.db)
        .list_published(PageRequest::from(&query))
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = "Contents",
    operation_id = "getContentBySlug",
    summary = "Get a content item by slug",
    description = "Published items are public and each read increments `view_count`. \
        Unpublished items are returned only to their author and admins; everyone else gets 404.",
    params(("slug" = String, Path, description = "Content slug")),
    responses(
        (status = 200, description = "Content", body = ContentResponse),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, auth), fields(slug = %slug))]
pub async fn get_by_slug(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ContentResponse>, AppError> {
    let actor = auth.actor();
    let content = ContentService::new(&state.db)
        .get_by_slug(&slug, actor.as_ref())
        .await?;
    Ok(Json(content))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Contents",
    operation_id = "createContent",
    summary = "Create a content item",
    description = "The caller becomes the author. Status defaults to DRAFT; creating as PUBLISHED stamps \
        `published_at`. Tags are matched by exact name against existing tags; unknown names are ignored. \
        SUBSCRIBER accounts cannot create content.",
    request_body = ContentRequest,
    responses(
        (status = 201, description = "Content created", body = ContentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Category or featured image not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, slug = %payload.slug))]
pub async fn create_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_author()?;
    let content = ContentService::new(&state.db)
        .create(&auth_user.actor(), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(content)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Contents",
    operation_id = "updateContent",
    summary = "Replace a content item",
    description = "Full replacement: omitted optional fields are cleared, omitted `tags` empties the tag list \
        and omitted `status` means DRAFT. `published_at` is stamped the first time the item becomes \
        PUBLISHED and never changes afterwards. Allowed for the author, ADMIN and EDITOR.",
    params(("id" = i32, Path, description = "Content ID")),
    request_body = ContentRequest,
    responses(
        (status = 200, description = "Content updated", body = ContentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Content, category or featured image not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, id))]
pub async fn update_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ContentRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    let content = ContentService::new(&state.db)
        .update(id, payload, &auth_user.actor())
        .await?;
    Ok(Json(content))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Contents",
    operation_id = "deleteContent",
    summary = "Delete a content item",
    description = "Removes the item with its tag links and comments. Categories, tags and media are kept.",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Content not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn delete_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ContentService::new(&state.db)
        .delete(id, &auth_user.actor())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/category/{category_id}",
    tag = "Contents",
    operation_id = "listContentsByCategory",
    summary = "List contents in a category",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
        PageQuery,
    ),
    responses(
        (status = 200, description = "Page of contents", body = ContentListResponse),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, auth, query))]
pub async fn list_by_category(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ContentListResponse>, AppError> {
    let actor = auth.actor();
    let list = ContentService::new(&state.db)
        .list_by_category(category_id, actor.as_ref(), PageRequest::from(&query))
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/tag/{tag_id}",
    tag = "Contents",
    operation_id = "listContentsByTag",
    summary = "List published contents carrying a tag",
    params(
        ("tag_id" = i32, Path, description = "Tag ID"),
        PageQuery,
    ),
    responses(
        (status = 200, description = "Page of contents", body = ContentListResponse),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, auth, query))]
pub async fn list_by_tag(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(tag_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ContentListResponse>, AppError> {
    let actor = auth.actor();
    let list = ContentService::new(&state.db)
        .list_by_tag(tag_id, actor.as_ref(), PageRequest::from(&query))
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/author/{author_id}",
    tag = "Contents",
    operation_id = "listContentsByAuthor",
    summary = "List contents by author",
    params(
        ("author_id" = i32, Path, description = "Author user ID"),
        PageQuery,
    ),
    responses(
        (status = 200, description = "Page of contents", body = ContentListResponse),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, auth, query))]
pub async fn list_by_author(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ContentListResponse>, AppError> {
    let actor = auth.actor();
    let list = ContentService::new(&state.db)
        .list_by_author(author_id, actor.as_ref(), PageRequest::from(&query))
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/my-contents",
    tag = "Contents",
    operation_id = "listMyContents",
    summary = "List the caller's own contents in every status",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of contents", body = ContentListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_mine(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ContentListResponse>, AppError> {
    let list = ContentService::new(&state.db)
        .list_mine(&auth_user.actor(), PageRequest::from(&query))
        .await?;
    Ok(Json(list))
}
