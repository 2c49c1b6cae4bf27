use chrono::Utc;
use common::storage::{ObjectStore, StorageKey};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::{error, info, warn};

use super::UploadedFile;
use crate::config::UploadConfig;
use crate::entity::{content, media, user};
use crate::error::AppError;
use crate::models::media::MediaResponse;
use crate::utils::upload::validate_upload;
use crate::utils::visibility::Actor;

/// Media uploads: validation, storage under generated keys, metadata rows
/// and cleanup of both on delete.
pub struct MediaService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
    store: &'a dyn ObjectStore,
    config: &'a UploadConfig,
}

impl<'a, C: ConnectionTrait + TransactionTrait> MediaService<'a, C> {
    pub fn new(conn: &'a C, store: &'a dyn ObjectStore, config: &'a UploadConfig) -> Self {
        Self {
            conn,
            store,
            config,
        }
    }

    pub async fn upload(
        &self,
        file: UploadedFile,
        uploader: &Actor,
    ) -> Result<MediaResponse, AppError> {
        let mime_type = file.mime_type();
        let extension = validate_upload(
            file.original_filename.as_deref(),
            mime_type.as_deref(),
            file.size(),
            self.config.max_size,
        )
        .map_err(|e| AppError::Validation(e.message()))?;

        let key = StorageKey::generate(&extension, None)?;
        let content_type = mime_type.unwrap_or_default();
        self.store.put(&key, &file.data, &content_type).await?;

        let original_filename = file
            .original_filename
            .unwrap_or_else(|| key.as_str().to_string());
        let row = media::ActiveModel {
            filename: Set(key.as_str().to_string()),
            original_filename: Set(original_filename),
            file_path: Set(self.store.location(&key)),
            file_url: Set(Some(self.config.url_for(key.as_str()))),
            mime_type: Set(Some(content_type)),
            file_size: Set(Some(file.data.len() as i64)),
            uploaded_by: Set(Some(uploader.user_id)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await;

        let model = match row {
            Ok(model) => model,
            Err(e) => {
                // Metadata never landed; do not leave the object behind.
                if let Err(cleanup) = self.store.delete(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove orphaned media object");
                }
                return Err(e.into());
            }
        };

        info!(media_id = model.id, key = %key, size = file.data.len(), "Media uploaded");
        let uploader = user::Entity::find_by_id(uploader.user_id)
            .one(self.conn)
            .await?;
        Ok(MediaResponse::new(model, uploader.as_ref()))
    }

    /// Metadata for one media row.
    pub async fn get(&self, id: i32) -> Result<MediaResponse, AppError> {
        let model = find_media(self.conn, id).await?;
        let uploader = match model.uploaded_by {
            Some(uid) => user::Entity::find_by_id(uid).one(self.conn).await?,
            None => None,
        };
        Ok(MediaResponse::new(model, uploader.as_ref()))
    }

    /// Everything the user uploaded, newest first.
    pub async fn list_by_uploader(&self, user_id: i32) -> Result<Vec<MediaResponse>, AppError> {
        let uploader = user::Entity::find_by_id(user_id).one(self.conn).await?;
        let rows = media::Entity::find()
            .filter(media::Column::UploadedBy.eq(user_id))
            .order_by_desc(media::Column::CreatedAt)
            .order_by_desc(media::Column::Id)
            .all(self.conn)
            .await?;
        Ok(rows
            .into_iter()
            .map(|m| MediaResponse::new(m, uploader.as_ref()))
            .collect())
    }

    /// Remove the stored object, then the row and any featured-image links to it.
    ///
    /// Only the uploader may delete. A backend failure keeps the row.
    pub async fn delete(&self, id: i32, requester: &Actor) -> Result<(), AppError> {
        let model = find_media(self.conn, id).await?;
        if model.uploaded_by != Some(requester.user_id) {
            return Err(AppError::PermissionDenied);
        }

        let key = StorageKey::parse(&model.filename)?;
        let removed = self.store.delete(&key).await?;
        if !removed {
            warn!(media_id = id, key = %key, "Media object was already missing from storage");
        }

        if let Err(e) = self.delete_row(id).await {
            error!(
                media_id = id,
                key = %key,
                error = %e,
                "Media object deleted but metadata row could not be removed"
            );
            return Err(AppError::Internal(format!(
                "failed to delete media row {id}: {e}"
            )));
        }

        info!(media_id = id, key = %key, user_id = requester.user_id, "Media deleted");
        Ok(())
    }

    async fn delete_row(&self, id: i32) -> Result<(), DbErr> {
        let txn = self.conn.begin().await?;
        content::Entity::update_many()
            .col_expr(
                content::Column::FeaturedImageId,
                Expr::value(Option::<i32>::None),
            )
            .filter(content::Column::FeaturedImageId.eq(id))
            .exec(&txn)
            .await?;
        media::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await
    }
}

/// Look up a media row by ID, returning 404 if not found.
pub async fn find_media<C: ConnectionTrait>(db: &C, id: i32) -> Result<media::Model, AppError> {
    media::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Media not found".into()))
}
