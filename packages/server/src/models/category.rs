use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_optional_len;
use crate::error::AppError;
use crate::utils::slug::is_valid_slug;

/// Body for creating or fully replacing a category.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CategoryRequest {
    #[schema(example = "Engineering")]
    pub name: String,
    #[schema(example = "engineering")]
    pub slug: String,
    pub description: Option<String>,
}

pub fn validate_category_request(payload: &CategoryRequest) -> Result<(), AppError> {
    let name = payload.name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return Err(AppError::Validation(
            "Name must be 1-100 characters".into(),
        ));
    }
    if !is_valid_slug(payload.slug.trim()) {
        return Err(AppError::Validation(
            "Slug must be 1-200 characters of lowercase letters, digits and hyphens".into(),
        ));
    }
    validate_optional_len(payload.description.as_deref(), "Description", 1000)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::category::Model> for CategoryResponse {
    fn from(m: crate::entity::category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            created_at: m.created_at,
        }
    }
}
