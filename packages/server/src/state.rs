use std::sync::Arc;

use common::storage::ObjectStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    /// Backend for general media uploads.
    pub media_store: Arc<dyn ObjectStore>,
    /// Backend for user avatars.
    pub avatar_store: Arc<dyn ObjectStore>,
}
