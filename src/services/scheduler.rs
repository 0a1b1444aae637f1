use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::AppError;
use crate::services::sync_service::CourseSyncService;
use crate::sync::ConsistencyReport;

/// Periodically reloads the three collections and reports drift between
/// them. Reloading also refreshes the local list of unified views.
pub struct ConsistencyScheduler {
    service: Arc<CourseSyncService>,
    interval: Duration,
}

impl ConsistencyScheduler {
    pub fn new(service: Arc<CourseSyncService>, interval_secs: u64) -> Self {
        Self {
            service,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Runs the audit in an endless loop, waiting one interval first.
    pub async fn start(self) {
        info!("Starting consistency scheduler (interval: {:?})", self.interval);

        loop {
            tokio::time::sleep(self.interval).await;

            match self.run_audit().await {
                Ok(report) if report.is_consistent() => {
                    info!("Consistency audit passed for {} courses", report.courses);
                }
                Ok(report) => {
                    warn!(
                        "Consistency audit: {} courses, missing details {:?}, missing pricing {:?}, orphan details {:?}, orphan pricing {:?}, duplicate details {:?}, duplicate pricing {:?}",
                        report.courses,
                        report.missing_details,
                        report.missing_pricing,
                        report.orphan_details,
                        report.orphan_pricing,
                        report.duplicate_details,
                        report.duplicate_pricing
                    );
                }
                Err(e) => {
                    warn!("Consistency audit failed: {}", e);
                }
            }
        }
    }

    async fn run_audit(&self) -> Result<ConsistencyReport, AppError> {
        self.service.audit().await
    }
}
