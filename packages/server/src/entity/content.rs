use common::ContentStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,

    pub author_id: Option<i32>,
    #[sea_orm(belongs_to, from = "author_id", to = "id")]
    pub author: Option<super::user::Entity>,

    pub category_id: Option<i32>,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: Option<super::category::Entity>,

    pub featured_image_id: Option<i32>,
    #[sea_orm(belongs_to, from = "featured_image_id", to = "id")]
    pub featured_image: Option<super::media::Entity>,

    pub excerpt: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub body: String,

    pub status: ContentStatus,
    /// Set the first time the item is published, never cleared afterwards.
    pub published_at: Option<DateTimeUtc>,

    #[sea_orm(default_value = 0)]
    pub view_count: i32,

    #[sea_orm(has_many, via = "content_tag")]
    pub tags: HasMany<super::tag::Entity>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
