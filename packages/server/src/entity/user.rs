use common::UserRole;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    pub role: UserRole,

    /// Backend location of the current avatar object.
    pub avatar_path: Option<String>,

    #[sea_orm(default_value = true)]
    pub is_active: bool,

    #[sea_orm(has_many)]
    pub contents: HasMany<super::content::Entity>,

    #[sea_orm(has_many)]
    pub uploads: HasMany<super::media::Entity>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
