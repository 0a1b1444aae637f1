use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_admin::api::router;
use course_admin::collections::CourseCollections;
use course_admin::config::{AppConfig, DEFAULT_LOG_FILTER};
use course_admin::db;
use course_admin::notify::TracingNotifier;
use course_admin::services::{ConsistencyScheduler, CourseSyncService};
use course_admin::state::AppState;
use course_admin::uploads::{AttachmentUploader, DisabledUploader, HttpUploader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let pool = db::connect_pool(&config.database_url).await?;

    let collections = match &config.remote_store {
        Some(remote) => {
            info!("syncing against remote store at {}", remote.base_url);
            CourseCollections::rest(remote)?
        }
        None => db::local_collections(&pool),
    };

    let uploader: Arc<dyn AttachmentUploader> = match &config.upload_url {
        Some(url) => Arc::new(HttpUploader::new(reqwest::Client::new(), url.clone())),
        None => Arc::new(DisabledUploader),
    };

    let sync = Arc::new(CourseSyncService::new(
        collections,
        uploader,
        Arc::new(TracingNotifier),
    ));

    if config.audit_interval_secs > 0 {
        let scheduler = ConsistencyScheduler::new(sync.clone(), config.audit_interval_secs);
        tokio::spawn(scheduler.start());
    }

    let state = AppState { db: pool, sync };

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
