use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::StorageError;

const MAX_KEY_LEN: usize = 255;

/// Name under which an object's bytes live in a backend.
///
/// Keys are generated from a random UUID, never from user input. Keys that
/// come back from clients (download URLs) go through [`StorageKey::parse`],
/// which only admits a single path component.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Generate a fresh key `<uuid>.<ext>`, or `<prefix>_<uuid>.<ext>`.
    pub fn generate(extension: &str, prefix: Option<&str>) -> Result<Self, StorageError> {
        let extension = extension.to_ascii_lowercase();
        if extension.is_empty()
            || extension.len() > 10
            || !extension.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(StorageError::InvalidKey(format!(
                "unsupported extension '{extension}'"
            )));
        }

        let id = Uuid::new_v4();
        let key = match prefix {
            Some(prefix) => {
                if prefix.is_empty()
                    || !prefix
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
                {
                    return Err(StorageError::InvalidKey(format!(
                        "unsupported prefix '{prefix}'"
                    )));
                }
                format!("{prefix}_{id}.{extension}")
            }
            None => format!("{id}.{extension}"),
        };
        Ok(Self(key))
    }

    /// Validate a key received from outside the process.
    pub fn parse(s: &str) -> Result<Self, StorageError> {
        if s.is_empty() || s.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey(
                "key must be 1-255 characters".into(),
            ));
        }
        if s.starts_with('.') {
            return Err(StorageError::InvalidKey(
                "key must not start with '.'".into(),
            ));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        {
            return Err(StorageError::InvalidKey(
                "key contains invalid characters (allowed: a-zA-Z0-9, ., -, _)".into(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageKey({})", self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
