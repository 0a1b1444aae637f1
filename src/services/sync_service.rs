use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::collections::{CollectionClient, CourseCollections};
use crate::error::AppError;
use crate::models::{Course, CourseDetails, CoursePricing, Document, UnifiedCourseView};
use crate::notify::{Notification, NotificationSink};
use crate::sync::{
    ConsistencyReport, CoursePayloads, DeleteReport, SaveMode, SaveReport, ValidationError,
    WriteOutcome, audit_consistency, decompose, merge_views, validate_view,
};
use crate::uploads::{Attachment, AttachmentUploader};

type Collections = (Vec<Course>, Vec<CourseDetails>, Vec<CoursePricing>);

/// Keeps one logical course consistent across the Course, CourseDetails and
/// CoursePricing collections.
///
/// The Course record is authoritative: its write decides success. Sibling
/// writes are upserts by logical id, so an earlier partial failure heals on
/// the next save.
pub struct CourseSyncService {
    collections: CourseCollections,
    uploader: Arc<dyn AttachmentUploader>,
    notifier: Arc<dyn NotificationSink>,
    views: RwLock<Vec<UnifiedCourseView>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when a save or delete finishes.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CourseSyncService {
    pub fn new(
        collections: CourseCollections,
        uploader: Arc<dyn AttachmentUploader>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            collections,
            uploader,
            notifier,
            views: RwLock::new(Vec::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the unified views from the last successful fetch.
    pub async fn views(&self) -> Vec<UnifiedCourseView> {
        self.views.read().await.clone()
    }

    /// Loads all three collections concurrently and replaces the local list
    /// with their merge. The first failing collection aborts the fetch.
    pub async fn fetch_all(&self) -> Result<Vec<UnifiedCourseView>, AppError> {
        self.reload().await.inspect_err(|e| {
            self.notifier.notify(Notification::error(format!(
                "Could not load courses ({}). Retry to reload.",
                e
            )));
        })
    }

    /// Validates, optionally uploads the course image, then writes the view.
    ///
    /// A view without `course_key` is created in all three collections at
    /// once; otherwise the Course is updated and each sibling is upserted by
    /// logical id.
    pub async fn save(
        &self,
        mut view: UnifiedCourseView,
        image: Option<Attachment>,
    ) -> Result<SaveReport, AppError> {
        let _in_flight = self.begin()?;

        if let Err(e) = self.check(&view).await {
            self.notifier.notify(Notification::error(e.to_string()));
            return Err(e);
        }

        if let Some(attachment) = image {
            let filename = self.upload_attachment(attachment).await?;
            view.image = Some(filename);
        }

        let payloads = decompose(&view);
        let result = match view.course_key.clone() {
            None => self.create_course(payloads).await,
            Some(key) => self.update_course(&key, payloads).await,
        };

        match &result {
            Ok(report) => {
                self.refresh_after_write().await;
                let verb = match report.mode {
                    SaveMode::Create => "created",
                    SaveMode::Update => "updated",
                };
                self.notifier.notify(Notification::success(format!(
                    "Course {} {}",
                    report.course_id, verb
                )));
                if !report.is_complete() {
                    self.notifier.notify(Notification::warning(format!(
                        "Course {} saved, but related records were not: {}",
                        report.course_id,
                        report.failure_summary()
                    )));
                }
            }
            Err(AppError::PartialCreate(report)) => {
                self.refresh_after_write().await;
                self.notifier.notify(Notification::error(format!(
                    "Course {} could not be fully created: {}",
                    report.course_id,
                    report.failure_summary()
                )));
            }
            Err(e) => {
                self.notifier.notify(Notification::error(e.to_string()));
            }
        }

        result
    }

    /// Deletes the Course by internal key, then its siblings by logical id.
    ///
    /// All three deletions are attempted. Only the Course deletion decides
    /// the outcome; once it succeeds the view leaves the local list.
    pub async fn delete(&self, course_key: &str) -> Result<DeleteReport, AppError> {
        let _in_flight = self.begin()?;

        let course_id = self.resolve_course_id(course_key).await?;
        info!(course_id = %course_id, "Deleting course {}", course_key);

        let course_result = self.collections.courses.delete(course_key).await;
        let details = delete_sibling(self.collections.details.as_ref(), &course_id).await;
        let pricing = delete_sibling(self.collections.pricing.as_ref(), &course_id).await;

        if let Err(e) = course_result {
            error!(course_id = %course_id, "Failed to delete course {}: {}", course_key, e);
            let e = AppError::PrimaryWrite {
                action: "delete",
                source: Box::new(e),
            };
            self.notifier.notify(Notification::error(e.to_string()));
            return Err(e);
        }

        self.views
            .write()
            .await
            .retain(|v| v.course_key.as_deref() != Some(course_key));

        let report = DeleteReport {
            course_id,
            course_key: course_key.to_string(),
            course: WriteOutcome::Deleted,
            details,
            pricing,
        };

        self.notifier.notify(Notification::success(format!(
            "Course {} deleted",
            report.course_id
        )));
        if !report.is_complete() {
            self.notifier.notify(Notification::warning(format!(
                "Course {} deleted, but related records were not: {}",
                report.course_id,
                report.failure_summary()
            )));
        }

        Ok(report)
    }

    /// Uploads a file out of band (testimonial avatars, course images) and
    /// returns the stored filename.
    pub async fn upload_attachment(&self, attachment: Attachment) -> Result<String, AppError> {
        self.uploader.upload(attachment).await.inspect_err(|e| {
            warn!("attachment upload failed: {}", e);
            self.notifier.notify(Notification::error(e.to_string()));
        })
    }

    /// Reloads everything and reports cross-collection drift.
    pub async fn audit(&self) -> Result<ConsistencyReport, AppError> {
        let (courses, details, pricing) = self.load_collections().await?;
        let report = audit_consistency(&courses, &details, &pricing);
        *self.views.write().await = merge_views(&courses, &details, &pricing);
        Ok(report)
    }

    fn begin(&self) -> Result<InFlight<'_>, AppError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::Conflict(
                "another save or delete is already in progress".to_string(),
            ));
        }
        Ok(InFlight(&self.in_flight))
    }

    /// Rejects the view before any write: rule violations first, then a
    /// logical id that clashes with the stored Course records.
    ///
    /// A new view must carry an unused id. An existing view must keep the id
    /// stored under its key, and the key must exist.
    async fn check(&self, view: &UnifiedCourseView) -> Result<(), AppError> {
        validate_view(view)?;

        let Some(key) = &view.course_key else {
            let taken = fetch_collection(self.collections.courses.as_ref())
                .await?
                .iter()
                .any(|c| c.id == view.id);
            if taken {
                return Err(ValidationError::DuplicateCourseId {
                    id: view.id.clone(),
                }
                .into());
            }
            return Ok(());
        };

        let stored_id = self.resolve_course_id(key).await?;
        if stored_id != view.id {
            return Err(ValidationError::IdentityChanged {
                from: stored_id,
                to: view.id.clone(),
            }
            .into());
        }

        Ok(())
    }

    async fn create_course(&self, payloads: CoursePayloads) -> Result<SaveReport, AppError> {
        let course_id = payloads.course.id.clone();
        info!(course_id = %course_id, "Creating course in all collections");

        let (course, details, pricing) = tokio::join!(
            self.collections.courses.create(&payloads.course),
            self.collections.details.create(&payloads.details),
            self.collections.pricing.create(&payloads.pricing),
        );

        let course_key = course.as_ref().ok().and_then(|c| c.key.clone());
        let report = SaveReport {
            mode: SaveMode::Create,
            course_key,
            course: outcome(Course::COLLECTION, &course_id, course, WriteOutcome::Created),
            details: outcome(CourseDetails::COLLECTION, &course_id, details, WriteOutcome::Created),
            pricing: outcome(CoursePricing::COLLECTION, &course_id, pricing, WriteOutcome::Created),
            course_id,
        };

        if report.is_complete() {
            Ok(report)
        } else {
            error!(
                course_id = %report.course_id,
                "Course only partially created: {}",
                report.failure_summary()
            );
            Err(AppError::PartialCreate(Box::new(report)))
        }
    }

    async fn update_course(
        &self,
        key: &str,
        payloads: CoursePayloads,
    ) -> Result<SaveReport, AppError> {
        let course_id = payloads.course.id.clone();
        info!(course_id = %course_id, "Updating course {}", key);

        if let Err(e) = self.collections.courses.update(key, &payloads.course).await {
            error!(course_id = %course_id, "Failed to update course {}: {}", key, e);
            return Err(AppError::PrimaryWrite {
                action: "update",
                source: Box::new(e),
            });
        }

        let details =
            reconcile_sibling(self.collections.details.as_ref(), &course_id, payloads.details).await;
        let pricing =
            reconcile_sibling(self.collections.pricing.as_ref(), &course_id, payloads.pricing).await;

        Ok(SaveReport {
            mode: SaveMode::Update,
            course_id,
            course_key: Some(key.to_string()),
            course: WriteOutcome::Updated,
            details,
            pricing,
        })
    }

    async fn resolve_course_id(&self, course_key: &str) -> Result<String, AppError> {
        let cached = self
            .views
            .read()
            .await
            .iter()
            .find(|v| v.course_key.as_deref() == Some(course_key))
            .map(|v| v.id.clone());
        if let Some(id) = cached {
            return Ok(id);
        }

        fetch_collection(self.collections.courses.as_ref())
            .await?
            .into_iter()
            .find(|c| c.key.as_deref() == Some(course_key))
            .map(|c| c.id)
            .ok_or(AppError::NotFound)
    }

    async fn load_collections(&self) -> Result<Collections, AppError> {
        tokio::try_join!(
            fetch_collection(self.collections.courses.as_ref()),
            fetch_collection(self.collections.details.as_ref()),
            fetch_collection(self.collections.pricing.as_ref()),
        )
    }

    async fn reload(&self) -> Result<Vec<UnifiedCourseView>, AppError> {
        let (courses, details, pricing) = self.load_collections().await?;
        let views = merge_views(&courses, &details, &pricing);
        info!(
            "Loaded {} courses ({} details, {} pricing records)",
            courses.len(),
            details.len(),
            pricing.len()
        );
        *self.views.write().await = views.clone();
        Ok(views)
    }

    /// The local list is only ever replaced wholesale from the store.
    async fn refresh_after_write(&self) {
        if let Err(e) = self.reload().await {
            warn!("Reload after write failed, local list is stale: {}", e);
        }
    }
}

async fn fetch_collection<T: Document>(
    client: &dyn CollectionClient<T>,
) -> Result<Vec<T>, AppError> {
    client.list_all().await.map_err(|e| AppError::Fetch {
        collection: T::COLLECTION,
        source: Box::new(e),
    })
}

fn outcome<R>(
    collection: &str,
    course_id: &str,
    result: Result<R, AppError>,
    success: WriteOutcome,
) -> WriteOutcome {
    match result {
        Ok(_) => success,
        Err(e) => {
            warn!(course_id = %course_id, "{} write failed: {}", collection, e);
            WriteOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Writes a sibling record by logical id: update it if present, create it
/// otherwise. Failures are logged and reported, never propagated.
pub async fn reconcile_sibling<T: Document>(
    client: &dyn CollectionClient<T>,
    course_id: &str,
    payload: T,
) -> WriteOutcome {
    match upsert_by_logical_key(client, course_id, payload).await {
        Ok(outcome) => {
            info!(course_id = %course_id, "{} {:?}", T::COLLECTION, outcome);
            outcome
        }
        Err(e) => {
            warn!(course_id = %course_id, "{} upsert failed: {}", T::COLLECTION, e);
            WriteOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

async fn upsert_by_logical_key<T: Document>(
    client: &dyn CollectionClient<T>,
    course_id: &str,
    mut payload: T,
) -> Result<WriteOutcome, AppError> {
    let existing_key = client
        .list_all()
        .await?
        .into_iter()
        .find(|r| r.logical_key() == course_id)
        .and_then(|r| r.key().map(str::to_string));

    payload.set_key(None);
    match existing_key {
        Some(key) => {
            client.update(&key, &payload).await?;
            Ok(WriteOutcome::Updated)
        }
        None => {
            client.create(&payload).await?;
            Ok(WriteOutcome::Created)
        }
    }
}

async fn delete_sibling<T: Document>(
    client: &dyn CollectionClient<T>,
    course_id: &str,
) -> WriteOutcome {
    match remove_by_logical_key(client, course_id).await {
        Ok(true) => WriteOutcome::Deleted,
        Ok(false) => {
            info!(course_id = %course_id, "No {} record to delete", T::COLLECTION);
            WriteOutcome::Absent
        }
        Err(e) => {
            warn!(course_id = %course_id, "{} delete failed: {}", T::COLLECTION, e);
            WriteOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

async fn remove_by_logical_key<T: Document>(
    client: &dyn CollectionClient<T>,
    course_id: &str,
) -> Result<bool, AppError> {
    let existing_key = client
        .list_all()
        .await?
        .into_iter()
        .find(|r| r.logical_key() == course_id)
        .and_then(|r| r.key().map(str::to_string));

    match existing_key {
        Some(key) => {
            client.delete(&key).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}
