use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::CourseSyncService;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub sync: Arc<CourseSyncService>,
}
