use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploaderResponse {
    pub id: i32,
    pub username: String,
}

/// Metadata for a stored media object.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MediaResponse {
    #[schema(example = 7)]
    pub id: i32,
    /// Generated storage key.
    #[schema(example = "0b9e6c1a-6d47-4d1e-9a3b-5f0f6c2f8a11.png")]
    pub filename: String,
    #[schema(example = "holiday.png")]
    pub original_filename: String,
    pub file_url: Option<String>,
    #[schema(example = "image/png")]
    pub mime_type: Option<String>,
    #[schema(example = 142857)]
    pub file_size: Option<i64>,
    pub uploaded_by: Option<UploaderResponse>,
    pub created_at: DateTime<Utc>,
}

impl MediaResponse {
    pub fn new(
        m: crate::entity::media::Model,
        uploader: Option<&crate::entity::user::Model>,
    ) -> Self {
        Self {
            id: m.id,
            filename: m.filename,
            original_filename: m.original_filename,
            file_url: m.file_url,
            mime_type: m.mime_type,
            file_size: m.file_size,
            uploaded_by: uploader.map(|u| UploaderResponse {
                id: u.id,
                username: u.username.clone(),
            }),
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MediaUploadResponse {
    pub success: bool,
    #[schema(example = "File uploaded successfully")]
    pub message: String,
    pub media: MediaResponse,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MediaListResponse {
    pub data: Vec<MediaResponse>,
    pub total: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AvatarResponse {
    /// Public avatar URL, or null when the user has none.
    pub avatar_url: Option<String>,
}
