#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::parse::ParseEnumError;

/// Publication state of a content item.
///
/// Stored as an uppercase string. Parsing is case-insensitive and total:
/// unknown values are rejected instead of falling back to a default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentStatus {
    /// Work in progress, visible to the author and admins only.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "DRAFT"))]
    Draft,
    /// Publicly visible.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "PUBLISHED"))]
    Published,
    /// Withdrawn from public view, visible to the author and admins only.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "ARCHIVED"))]
    Archived,
}

const NAMES: &[&str] = &["DRAFT", "PUBLISHED", "ARCHIVED"];

impl ContentStatus {
    pub const ALL: &'static [ContentStatus] = &[Self::Draft, Self::Published, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Archived => "ARCHIVED",
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl Default for ContentStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            "ARCHIVED" => Ok(Self::Archived),
            _ => Err(ParseEnumError::new("content status", s, NAMES)),
        }
    }
}

impl<'de> Deserialize<'de> for ContentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
