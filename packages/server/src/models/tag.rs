use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::utils::slug::{is_valid_slug, slugify};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTagRequest {
    #[schema(example = "Rust")]
    pub name: String,
    /// Derived from the name when omitted.
    #[schema(example = "rust")]
    pub slug: Option<String>,
}

/// Validate the request and return the slug to store.
pub fn resolve_tag_slug(payload: &CreateTagRequest) -> Result<String, AppError> {
    let name = payload.name.trim();
    if name.is_empty() || name.chars().count() > 50 {
        return Err(AppError::Validation("Name must be 1-50 characters".into()));
    }
    let slug = match payload.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slugify(name),
    };
    if !is_valid_slug(&slug) {
        return Err(AppError::Validation(
            "Slug must be 1-200 characters of lowercase letters, digits and hyphens".into(),
        ));
    }
    Ok(slug)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<crate::entity::tag::Model> for TagResponse {
    fn from(m: crate::entity::tag::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
        }
    }
}
