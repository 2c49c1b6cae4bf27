use common::CommentStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub content_id: i32,
    #[sea_orm(belongs_to, from = "content_id", to = "id")]
    pub content: HasOne<super::content::Entity>,

    /// NULL for anonymous comments.
    pub author_id: Option<i32>,
    #[sea_orm(belongs_to, from = "author_id", to = "id")]
    pub author: Option<super::user::Entity>,

    pub author_name: Option<String>,
    pub author_email: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub body: String,

    pub status: CommentStatus,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
