pub mod collection;
pub mod repository;

use std::sync::Arc;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::collections::CourseCollections;
use crate::error::AppError;
use crate::models::{Course, CourseDetails, CoursePricing};

pub use collection::SqliteCollection;

/// Opens the document store and applies migrations.
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = options.connect(database_url).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::Config(format!("Failed to run migrations: {}", e)))?;

    info!("document store ready at {}", database_url);
    Ok(pool)
}

/// The three course collections served from the local store.
pub fn local_collections(db: &SqlitePool) -> CourseCollections {
    CourseCollections::new(
        Arc::new(SqliteCollection::<Course>::new(db.clone())),
        Arc::new(SqliteCollection::<CourseDetails>::new(db.clone())),
        Arc::new(SqliteCollection::<CoursePricing>::new(db.clone())),
    )
}
