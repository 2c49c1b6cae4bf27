use chrono::{DateTime, Utc};
use common::ContentStatus;
use serde::{Deserialize, Serialize};

use super::category::CategoryResponse;
use super::media::MediaResponse;
use super::shared::{Pagination, validate_optional_len, validate_title};
use super::tag::TagResponse;
use crate::error::AppError;
use crate::utils::slug::is_valid_slug;

/// Body for creating or fully replacing a content item.
///
/// On update every field is overwritten: absent optional fields become null,
/// absent `tags` becomes empty and absent `status` becomes `DRAFT`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ContentRequest {
    #[schema(example = "Hello, world")]
    pub title: String,
    /// Globally unique, `[a-z0-9-]`, 1-200 characters.
    #[schema(example = "hello-world")]
    pub slug: String,
    pub category_id: Option<i32>,
    pub excerpt: Option<String>,
    #[schema(example = "Body text in Markdown.")]
    pub body: String,
    pub featured_image_id: Option<i32>,
    pub status: Option<ContentStatus>,
    /// Tag names. Names without an existing tag are ignored.
    #[serde(default)]
    pub tags: Vec<String>,
}

pub fn validate_content_request(payload: &ContentRequest) -> Result<(), AppError> {
    validate_title(&payload.title)?;
    if !is_valid_slug(payload.slug.trim()) {
        return Err(AppError::Validation(
            "Slug must be 1-200 characters of lowercase letters, digits and hyphens".into(),
        ));
    }
    if payload.body.trim().is_empty() {
        return Err(AppError::Validation("Body must not be empty".into()));
    }
    validate_optional_len(payload.excerpt.as_deref(), "Excerpt", 1000)?;
    if payload.tags.len() > 50 {
        return Err(AppError::Validation("Too many tags: max 50".into()));
    }
    Ok(())
}

/// Public view of a content item's author.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthorResponse {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<crate::entity::user::Model> for AuthorResponse {
    fn from(user: crate::entity::user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub author: Option<AuthorResponse>,
    pub category: Option<CategoryResponse>,
    pub excerpt: Option<String>,
    pub body: String,
    pub featured_image: Option<MediaResponse>,
    pub status: ContentStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: i32,
    pub tags: Vec<TagResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentListResponse {
    pub data: Vec<ContentResponse>,
    pub pagination: Pagination,
}
