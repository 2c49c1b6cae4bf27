use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Generated storage key, e.g. `3f2c...e1.png`.
    #[sea_orm(unique)]
    pub filename: String,
    /// Name the client uploaded with. Display only.
    pub original_filename: String,
    /// Backend location (filesystem path or `/bucket/key`).
    pub file_path: String,
    pub file_url: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,

    pub uploaded_by: Option<i32>,
    #[sea_orm(belongs_to, from = "uploaded_by", to = "id")]
    pub uploader: Option<super::user::Entity>,

    #[sea_orm(has_many)]
    pub featured_in: HasMany<super::content::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
