use chrono::{DateTime, Utc};
use common::CommentStatus;
use serde::{Deserialize, Serialize};

use super::shared::validate_optional_len;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    /// Required for anonymous comments; ignored when authenticated.
    #[schema(example = "Guest")]
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    #[schema(example = "Great post!")]
    pub body: String,
}

pub fn validate_comment_request(payload: &CreateCommentRequest) -> Result<(), AppError> {
    let body = payload.body.trim();
    if body.is_empty() || body.chars().count() > 5000 {
        return Err(AppError::Validation(
            "Comment body must be 1-5000 characters".into(),
        ));
    }
    validate_optional_len(payload.author_name.as_deref(), "Author name", 100)?;
    validate_optional_len(payload.author_email.as_deref(), "Author email", 100)
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateCommentStatusRequest {
    pub status: CommentStatus,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub content_id: i32,
    pub author_id: Option<i32>,
    pub author_name: Option<String>,
    pub body: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::comment::Model> for CommentResponse {
    fn from(m: crate::entity::comment::Model) -> Self {
        Self {
            id: m.id,
            content_id: m.content_id,
            author_id: m.author_id,
            author_name: m.author_name,
            body: m.body,
            status: m.status,
            created_at: m.created_at,
        }
    }
}
