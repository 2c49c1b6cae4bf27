#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::parse::ParseEnumError;

/// Role of a registered user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "ADMIN"))]
    Admin,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "EDITOR"))]
    Editor,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "AUTHOR"))]
    Author,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "SUBSCRIBER"))]
    Subscriber,
}

const NAMES: &[&str] = &["ADMIN", "EDITOR", "AUTHOR", "SUBSCRIBER"];

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Editor => "EDITOR",
            Self::Author => "AUTHOR",
            Self::Subscriber => "SUBSCRIBER",
        }
    }

    /// Admins and editors manage shared resources (categories, tags, comments)
    /// and may edit anyone's content.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }

    /// Subscribers read; every other role may write content.
    pub fn can_author(&self) -> bool {
        !matches!(self, Self::Subscriber)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Author
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "EDITOR" => Ok(Self::Editor),
            "AUTHOR" => Ok(Self::Author),
            "SUBSCRIBER" => Ok(Self::Subscriber),
            _ => Err(ParseEnumError::new("user role", s, NAMES)),
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
