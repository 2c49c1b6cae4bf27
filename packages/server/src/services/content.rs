use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use common::ContentStatus;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::{info, warn};

use crate::entity::{category, comment, content, content_tag, media, tag, user};
use crate::error::AppError;
use crate::models::category::CategoryResponse;
use crate::models::content::{
    AuthorResponse, ContentListResponse, ContentRequest, ContentResponse,
    validate_content_request,
};
use crate::models::media::MediaResponse;
use crate::models::shared::{PageRequest, Pagination, non_blank};
use crate::models::tag::TagResponse;
use crate::utils::visibility::{Actor, can_modify, can_view, filter_visible};

/// Publish-time stamping: an existing timestamp is never replaced or cleared,
/// and a missing one is stamped the first time the status is PUBLISHED.
pub fn resolve_published_at(
    status: ContentStatus,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match current {
        Some(at) => Some(at),
        None if status.is_published() => Some(now),
        None => None,
    }
}

/// References named by a [`ContentRequest`], resolved against storage.
struct ResolvedRefs {
    category_id: Option<i32>,
    featured_image_id: Option<i32>,
    tag_ids: Vec<i32>,
}

/// Content lifecycle: creation, full-replacement updates, publish stamping,
/// slug lookup with view counting, deletion and paged listings.
///
/// The acting user is always passed in explicitly.
pub struct ContentService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> ContentService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        author: &Actor,
        request: ContentRequest,
    ) -> Result<ContentResponse, AppError> {
        if !author.role.can_author() {
            return Err(AppError::PermissionDenied);
        }
        validate_content_request(&request)?;
        let refs = self.resolve_refs(&request).await?;

        let now = Utc::now();
        let status = request.status.unwrap_or_default();
        let published_at = resolve_published_at(status, None, now);

        let txn = self.conn.begin().await?;
        let model = content::ActiveModel {
            title: Set(request.title.trim().to_string()),
            slug: Set(request.slug.trim().to_string()),
            author_id: Set(Some(author.user_id)),
            category_id: Set(refs.category_id),
            featured_image_id: Set(refs.featured_image_id),
            excerpt: Set(non_blank(request.excerpt)),
            body: Set(request.body),
            status: Set(status),
            published_at: Set(published_at),
            view_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(slug_conflict)?;
        replace_tags(&txn, model.id, &refs.tag_ids).await?;
        txn.commit().await?;

        info!(content_id = model.id, slug = %model.slug, %status, "Content created");
        self.to_response(model).await
    }

    /// Replace every field of an existing item.
    pub async fn update(
        &self,
        id: i32,
        request: ContentRequest,
        actor: &Actor,
    ) -> Result<ContentResponse, AppError> {
        let existing = find_content(self.conn, id).await?;
        if !can_modify(existing.author_id, actor) {
            return Err(AppError::PermissionDenied);
        }
        validate_content_request(&request)?;
        let refs = self.resolve_refs(&request).await?;

        let now = Utc::now();
        let status = request.status.unwrap_or_default();
        let was_published = existing.published_at.is_some();
        let published_at = resolve_published_at(status, existing.published_at, now);

        let txn = self.conn.begin().await?;
        let mut active: content::ActiveModel = existing.into();
        active.title = Set(request.title.trim().to_string());
        active.slug = Set(request.slug.trim().to_string());
        active.category_id = Set(refs.category_id);
        active.featured_image_id = Set(refs.featured_image_id);
        active.excerpt = Set(non_blank(request.excerpt));
        active.body = Set(request.body);
        active.status = Set(status);
        active.published_at = Set(published_at);
        active.updated_at = Set(now);
        let model = active.update(&txn).await.map_err(slug_conflict)?;
        replace_tags(&txn, model.id, &refs.tag_ids).await?;
        txn.commit().await?;

        if !was_published && model.published_at.is_some() {
            info!(content_id = model.id, slug = %model.slug, "Content published");
        }
        self.to_response(model).await
    }

    /// Look up an item by slug, counting the view when it is published.
    ///
    /// Unpublished items the actor may not see are reported as missing.
    /// The increment is a plain read-modify-write: concurrent readers of the
    /// same item can lose increments.
    pub async fn get_by_slug(
        &self,
        slug: &str,
        actor: Option<&Actor>,
    ) -> Result<ContentResponse, AppError> {
        let existing = content::Entity::find()
            .filter(content::Column::Slug.eq(slug))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Content not found".into()))?;

        if !existing.status.is_published() {
            if !can_view(existing.status, existing.author_id, actor) {
                warn!(
                    slug,
                    status = %existing.status,
                    user_id = actor.map(|a| a.user_id),
                    "Denied access to unpublished content"
                );
                return Err(AppError::NotFound("Content not found".into()));
            }
            return self.to_response(existing).await;
        }

        let next = existing.view_count.saturating_add(1);
        let mut active: content::ActiveModel = existing.into();
        active.view_count = Set(next);
        let model = active.update(self.conn).await?;
        self.to_response(model).await
    }

    /// Hard delete with tag links and comments, in one transaction.
    pub async fn delete(&self, id: i32, actor: &Actor) -> Result<(), AppError> {
        let existing = find_content(self.conn, id).await?;
        if !can_modify(existing.author_id, actor) {
            return Err(AppError::PermissionDenied);
        }

        let txn = self.conn.begin().await?;
        content_tag::Entity::delete_many()
            .filter(content_tag::Column::ContentId.eq(id))
            .exec(&txn)
            .await?;
        comment::Entity::delete_many()
            .filter(comment::Column::ContentId.eq(id))
            .exec(&txn)
            .await?;
        content::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(content_id = id, slug = %existing.slug, user_id = actor.user_id, "Content deleted");
        Ok(())
    }

    pub async fn list_all(
        &self,
        actor: Option<&Actor>,
        page: PageRequest,
    ) -> Result<ContentListResponse, AppError> {
        let select = content::Entity::find().order_by_desc(content::Column::CreatedAt);
        self.filtered_page(select, actor, page).await
    }

    pub async fn list_published(&self, page: PageRequest) -> Result<ContentListResponse, AppError> {
        let select = content::Entity::find()
            .filter(content::Column::Status.eq(ContentStatus::Published))
            .order_by_desc(content::Column::PublishedAt);
        self.counted_page(select, page).await
    }

    pub async fn list_by_category(
        &self,
        category_id: i32,
        actor: Option<&Actor>,
        page: PageRequest,
    ) -> Result<ContentListResponse, AppError> {
        let select = content::Entity::find()
            .filter(content::Column::CategoryId.eq(category_id))
            .order_by_desc(content::Column::CreatedAt);
        self.filtered_page(select, actor, page).await
    }

    pub async fn list_by_author(
        &self,
        author_id: i32,
        actor: Option<&Actor>,
        page: PageRequest,
    ) -> Result<ContentListResponse, AppError> {
        let select = content::Entity::find()
            .filter(content::Column::AuthorId.eq(author_id))
            .order_by_desc(content::Column::CreatedAt);
        self.filtered_page(select, actor, page).await
    }

    /// Published items carrying the tag, newest publication first.
    pub async fn list_by_tag(
        &self,
        tag_id: i32,
        actor: Option<&Actor>,
        page: PageRequest,
    ) -> Result<ContentListResponse, AppError> {
        let select = content::Entity::find()
            .filter(
                content::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(content_tag::Column::ContentId)
                        .from(content_tag::Entity)
                        .and_where(content_tag::Column::TagId.eq(tag_id))
                        .to_owned(),
                ),
            )
            .filter(content::Column::Status.eq(ContentStatus::Published))
            .order_by_desc(content::Column::PublishedAt);
        self.filtered_page(select, actor, page).await
    }

    /// Everything the actor authored, in any status.
    pub async fn list_mine(
        &self,
        actor: &Actor,
        page: PageRequest,
    ) -> Result<ContentListResponse, AppError> {
        let select = content::Entity::find()
            .filter(content::Column::AuthorId.eq(actor.user_id))
            .order_by_desc(content::Column::CreatedAt);
        self.counted_page(select, page).await
    }

    /// Fetch one page, then drop what the actor may not see.
    ///
    /// The reported total is the number of surviving items on this page, so a
    /// short page does not imply the last page.
    async fn filtered_page(
        &self,
        select: Select<content::Entity>,
        actor: Option<&Actor>,
        page: PageRequest,
    ) -> Result<ContentListResponse, AppError> {
        let items = select
            .paginate(self.conn, page.per_page)
            .fetch_page(page.index())
            .await?;
        let visible = filter_visible(items, actor);
        let total = visible.len() as u64;
        Ok(ContentListResponse {
            data: self.to_responses(visible).await?,
            pagination: Pagination::new(page, total),
        })
    }

    /// Fetch one page with the total counted by the database.
    async fn counted_page(
        &self,
        select: Select<content::Entity>,
        page: PageRequest,
    ) -> Result<ContentListResponse, AppError> {
        let paginator = select.paginate(self.conn, page.per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.index()).await?;
        Ok(ContentListResponse {
            data: self.to_responses(items).await?,
            pagination: Pagination::new(page, total),
        })
    }

    async fn resolve_refs(&self, request: &ContentRequest) -> Result<ResolvedRefs, AppError> {
        let category_id = match request.category_id {
            Some(id) => Some(
                category::Entity::find_by_id(id)
                    .one(self.conn)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Category not found".into()))?
                    .id,
            ),
            None => None,
        };

        let featured_image_id = match request.featured_image_id {
            Some(id) => Some(
                media::Entity::find_by_id(id)
                    .one(self.conn)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Featured image not found".into()))?
                    .id,
            ),
            None => None,
        };

        // Unknown tag names are dropped, never created.
        let names: Vec<String> = request
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let tag_ids: Vec<i32> = if names.is_empty() {
            Vec::new()
        } else {
            tag::Entity::find()
                .filter(tag::Column::Name.is_in(names))
                .select_only()
                .column(tag::Column::Id)
                .into_tuple()
                .all(self.conn)
                .await?
        };

        Ok(ResolvedRefs {
            category_id,
            featured_image_id,
            tag_ids,
        })
    }

    pub async fn to_response(&self, model: content::Model) -> Result<ContentResponse, AppError> {
        let mut responses = self.to_responses(vec![model]).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::Internal("content response assembly lost an item".into()))
    }

    /// Assemble responses for a batch, loading each kind of related row once.
    pub async fn to_responses(
        &self,
        models: Vec<content::Model>,
    ) -> Result<Vec<ContentResponse>, AppError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let content_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let category_ids: HashSet<i32> = models.iter().filter_map(|m| m.category_id).collect();
        let media_ids: HashSet<i32> = models.iter().filter_map(|m| m.featured_image_id).collect();

        let categories: HashMap<i32, category::Model> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            category::Entity::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(self.conn)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        let images: HashMap<i32, media::Model> = if media_ids.is_empty() {
            HashMap::new()
        } else {
            media::Entity::find()
                .filter(media::Column::Id.is_in(media_ids))
                .all(self.conn)
                .await?
                .into_iter()
                .map(|m| (m.id, m))
                .collect()
        };

        let mut user_ids: HashSet<i32> = models.iter().filter_map(|m| m.author_id).collect();
        user_ids.extend(images.values().filter_map(|m| m.uploaded_by));
        let users: HashMap<i32, user::Model> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(user_ids))
                .all(self.conn)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect()
        };

        let links = content_tag::Entity::find()
            .filter(content_tag::Column::ContentId.is_in(content_ids))
            .all(self.conn)
            .await?;
        let tag_ids: HashSet<i32> = links.iter().map(|l| l.tag_id).collect();
        let tags: HashMap<i32, tag::Model> = if tag_ids.is_empty() {
            HashMap::new()
        } else {
            tag::Entity::find()
                .filter(tag::Column::Id.is_in(tag_ids))
                .all(self.conn)
                .await?
                .into_iter()
                .map(|t| (t.id, t))
                .collect()
        };
        let mut tags_by_content: HashMap<i32, Vec<TagResponse>> = HashMap::new();
        for link in links {
            if let Some(t) = tags.get(&link.tag_id) {
                tags_by_content
                    .entry(link.content_id)
                    .or_default()
                    .push(TagResponse::from(t.clone()));
            }
        }
        for list in tags_by_content.values_mut() {
            list.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(models
            .into_iter()
            .map(|m| ContentResponse {
                author: m
                    .author_id
                    .and_then(|id| users.get(&id))
                    .cloned()
                    .map(AuthorResponse::from),
                category: m
                    .category_id
                    .and_then(|id| categories.get(&id))
                    .cloned()
                    .map(CategoryResponse::from),
                featured_image: m.featured_image_id.and_then(|id| images.get(&id)).map(|img| {
                    let uploader = img.uploaded_by.and_then(|uid| users.get(&uid));
                    MediaResponse::new(img.clone(), uploader)
                }),
                tags: tags_by_content.remove(&m.id).unwrap_or_default(),
                id: m.id,
                title: m.title,
                slug: m.slug,
                excerpt: m.excerpt,
                body: m.body,
                status: m.status,
                published_at: m.published_at,
                view_count: m.view_count,
                created_at: m.created_at,
                updated_at: m.updated_at,
            })
            .collect())
    }
}

/// Look up a content item by ID, returning 404 if not found.
pub async fn find_content<C: ConnectionTrait>(db: &C, id: i32) -> Result<content::Model, AppError> {
    content::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Content not found".into()))
}

async fn replace_tags<C: ConnectionTrait>(
    conn: &C,
    content_id: i32,
    tag_ids: &[i32],
) -> Result<(), DbErr> {
    content_tag::Entity::delete_many()
        .filter(content_tag::Column::ContentId.eq(content_id))
        .exec(conn)
        .await?;

    let mut seen = HashSet::new();
    for &tag_id in tag_ids {
        if !seen.insert(tag_id) {
            continue;
        }
        content_tag::Entity::insert(content_tag::ActiveModel {
            content_id: Set(content_id),
            tag_id: Set(tag_id),
        })
        .exec_without_returning(conn)
        .await?;
    }
    Ok(())
}

fn slug_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Slug already exists".into())
        }
        _ => AppError::from(err),
    }
}
