use chrono::Utc;
use common::storage::{ObjectStore, StorageKey};
use sea_orm::*;
use tracing::{info, warn};

use super::UploadedFile;
use crate::config::UploadConfig;
use crate::entity::user;
use crate::error::AppError;
use crate::utils::upload::validate_upload;

/// Storage key recorded at the end of an avatar location string.
pub fn key_from_location(location: &str) -> Option<&str> {
    location
        .rsplit(['/', '\\'])
        .next()
        .filter(|key| !key.is_empty())
}

/// One avatar per user, stored as `<user id>_<uuid>.<ext>`.
///
/// Replacement is not transactional: the old object is removed before the
/// new one is stored. If storing the new object fails, `avatar_path` is
/// cleared so it never names a deleted object.
pub struct AvatarService<'a, C: ConnectionTrait> {
    conn: &'a C,
    store: &'a dyn ObjectStore,
    config: &'a UploadConfig,
}

impl<'a, C: ConnectionTrait> AvatarService<'a, C> {
    pub fn new(conn: &'a C, store: &'a dyn ObjectStore, config: &'a UploadConfig) -> Self {
        Self {
            conn,
            store,
            config,
        }
    }

    /// Store a new avatar for the user and return its public URL.
    pub async fn upload(&self, user_id: i32, file: UploadedFile) -> Result<String, AppError> {
        let user = find_user(self.conn, user_id).await?;
        let mime_type = file.mime_type();
        let extension = validate_upload(
            file.original_filename.as_deref(),
            mime_type.as_deref(),
            file.size(),
            self.config.max_size,
        )
        .map_err(|e| AppError::Validation(e.message()))?;

        let had_previous = user.avatar_path.is_some();
        if let Some(old) = user.avatar_path.as_deref() {
            self.remove_old(user_id, old).await;
        }

        let key = StorageKey::generate(&extension, Some(&user_id.to_string()))?;
        let stored = self
            .store
            .put(&key, &file.data, &mime_type.unwrap_or_default())
            .await;

        let mut active: user::ActiveModel = user.into();
        active.updated_at = Set(Utc::now());

        if let Err(e) = stored {
            if had_previous {
                active.avatar_path = Set(None);
                if let Err(db) = active.update(self.conn).await {
                    warn!(user_id, error = %db, "Failed to clear avatar path after failed upload");
                }
            }
            return Err(e.into());
        }

        active.avatar_path = Set(Some(self.store.location(&key)));
        active.update(self.conn).await?;

        info!(user_id, key = %key, "Avatar updated");
        Ok(self.config.url_for(key.as_str()))
    }

    /// Public URL of the user's avatar, if any.
    pub async fn url(&self, user_id: i32) -> Result<Option<String>, AppError> {
        let user = find_user(self.conn, user_id).await?;
        Ok(self.url_for_path(user.avatar_path.as_deref()))
    }

    pub fn url_for_path(&self, avatar_path: Option<&str>) -> Option<String> {
        avatar_path
            .and_then(key_from_location)
            .map(|key| self.config.url_for(key))
    }

    pub async fn delete(&self, user_id: i32) -> Result<(), AppError> {
        let user = find_user(self.conn, user_id).await?;
        let Some(path) = user.avatar_path.clone() else {
            return Err(AppError::Validation("User has no avatar".into()));
        };

        if let Some(key) = key_from_location(&path) {
            let key = StorageKey::parse(key)?;
            self.store.delete(&key).await?;
        }

        let mut active: user::ActiveModel = user.into();
        active.avatar_path = Set(None);
        active.updated_at = Set(Utc::now());
        active.update(self.conn).await?;

        info!(user_id, "Avatar deleted");
        Ok(())
    }

    /// Best-effort removal of a replaced avatar object.
    async fn remove_old(&self, user_id: i32, location: &str) {
        let Some(key) = key_from_location(location) else {
            return;
        };
        let result = match StorageKey::parse(key) {
            Ok(key) => self.store.delete(&key).await.map(|_| ()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(user_id, location, error = %e, "Failed to delete previous avatar");
        }
    }
}

async fn find_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}
