use sea_orm::*;
use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use tracing::info;

use crate::entity::{comment, content, media};

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        // Published listings: WHERE status = ? ORDER BY published_at DESC
        Index::create()
            .if_not_exists()
            .name("idx_content_status_published")
            .table(content::Entity)
            .col(content::Column::Status)
            .col(content::Column::PublishedAt)
            .to_string(PostgresQueryBuilder),
        // Author listings: WHERE author_id = ? ORDER BY created_at DESC
        Index::create()
            .if_not_exists()
            .name("idx_content_author_created")
            .table(content::Entity)
            .col(content::Column::AuthorId)
            .col(content::Column::CreatedAt)
            .to_string(PostgresQueryBuilder),
        Index::create()
            .if_not_exists()
            .name("idx_content_category_created")
            .table(content::Entity)
            .col(content::Column::CategoryId)
            .col(content::Column::CreatedAt)
            .to_string(PostgresQueryBuilder),
        Index::create()
            .if_not_exists()
            .name("idx_comment_content_created")
            .table(comment::Entity)
            .col(comment::Column::ContentId)
            .col(comment::Column::CreatedAt)
            .to_string(PostgresQueryBuilder),
        Index::create()
            .if_not_exists()
            .name("idx_media_uploader_created")
            .table(media::Entity)
            .col(media::Column::UploadedBy)
            .col(media::Column::CreatedAt)
            .to_string(PostgresQueryBuilder),
    ];

    for stmt in statements {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index: {}", stmt),
            Err(e) => tracing::warn!("Failed to create index ({}): {}", stmt, e),
        }
    }

    Ok(())
}
