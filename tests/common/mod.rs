#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use course_admin::collections::{CollectionClient, CourseCollections};
use course_admin::error::AppError;
use course_admin::models::{
    Accent, Course, CourseDetails, CourseInfo, CoursePricing, CurriculumModule, Document, Feature,
    PricingAccent, PricingDisplay, SuccessStat, Testimonial, Tool, Topic, UnifiedCourseView,
};
use course_admin::notify::{Notification, NotificationLevel, NotificationSink};
use course_admin::services::CourseSyncService;
use course_admin::uploads::{Attachment, AttachmentUploader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calls {
    pub list: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl Calls {
    pub fn writes(&self) -> usize {
        self.create + self.update + self.delete
    }
}

/// In-memory collection with call counting and failure injection.
pub struct MemoryCollection<T> {
    records: Mutex<Vec<T>>,
    calls: Mutex<Calls>,
    failing: Mutex<HashSet<Op>>,
    next_key: AtomicUsize,
    create_delay: Mutex<Option<Duration>>,
}

impl<T: Document> MemoryCollection<T> {
    pub fn with(records: Vec<T>) -> Arc<Self> {
        let collection = Self {
            records: Mutex::new(Vec::new()),
            calls: Mutex::new(Calls::default()),
            failing: Mutex::new(HashSet::new()),
            next_key: AtomicUsize::new(1),
            create_delay: Mutex::new(None),
        };
        for mut record in records {
            if record.key().is_none() {
                record.set_key(Some(collection.fresh_key()));
            }
            collection.records.lock().unwrap().push(record);
        }
        Arc::new(collection)
    }

    pub fn empty() -> Arc<Self> {
        Self::with(Vec::new())
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn slow_create(&self, delay: Duration) {
        *self.create_delay.lock().unwrap() = Some(delay);
    }

    pub fn records(&self) -> Vec<T> {
        self.records.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }

    fn fresh_key(&self) -> String {
        format!("{}-{}", T::COLLECTION, self.next_key.fetch_add(1, Ordering::SeqCst))
    }

    fn enter(&self, op: Op) -> Result<(), AppError> {
        {
            let mut calls = self.calls.lock().unwrap();
            match op {
                Op::List => calls.list += 1,
                Op::Create => calls.create += 1,
                Op::Update => calls.update += 1,
                Op::Delete => calls.delete += 1,
            }
        }
        if self.failing.lock().unwrap().contains(&op) {
            return Err(AppError::Remote {
                collection: T::COLLECTION,
                status: 500,
                body: format!("injected {:?} failure", op),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Document> CollectionClient<T> for MemoryCollection<T> {
    async fn list_all(&self) -> Result<Vec<T>, AppError> {
        self.enter(Op::List)?;
        Ok(self.records())
    }

    async fn create(&self, payload: &T) -> Result<T, AppError> {
        let delay = *self.create_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.enter(Op::Create)?;
        let mut record = payload.clone();
        record.set_key(Some(self.fresh_key()));
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, key: &str, payload: &T) -> Result<T, AppError> {
        self.enter(Op::Update)?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.key() == Some(key))
            .ok_or(AppError::NotFound)?;
        let mut record = payload.clone();
        record.set_key(Some(key.to_string()));
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.enter(Op::Delete)?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.key() != Some(key));
        if records.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notes: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notes(&self) -> Vec<Notification> {
        self.notes.lock().unwrap().clone()
    }

    pub fn has(&self, level: NotificationLevel) -> bool {
        self.notes().iter().any(|n| n.level == level)
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notes.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct FakeUploader {
    pub uploads: AtomicUsize,
    pub broken: AtomicBool,
}

#[async_trait]
impl AttachmentUploader for FakeUploader {
    async fn upload(&self, attachment: Attachment) -> Result<String, AppError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(AppError::Upload("file server down".to_string()));
        }
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("uploaded-{}", attachment.filename))
    }
}

pub struct Harness {
    pub courses: Arc<MemoryCollection<Course>>,
    pub details: Arc<MemoryCollection<CourseDetails>>,
    pub pricing: Arc<MemoryCollection<CoursePricing>>,
    pub notifier: Arc<RecordingNotifier>,
    pub uploader: Arc<FakeUploader>,
    pub service: Arc<CourseSyncService>,
}

impl Harness {
    pub fn new(
        courses: Vec<Course>,
        details: Vec<CourseDetails>,
        pricing: Vec<CoursePricing>,
    ) -> Self {
        let courses = MemoryCollection::with(courses);
        let details = MemoryCollection::with(details);
        let pricing = MemoryCollection::with(pricing);
        let notifier = Arc::new(RecordingNotifier::default());
        let uploader = Arc::new(FakeUploader::default());

        let collections = CourseCollections::new(courses.clone(), details.clone(), pricing.clone());
        let service = Arc::new(CourseSyncService::new(
            collections,
            uploader.clone(),
            notifier.clone(),
        ));

        Self {
            courses,
            details,
            pricing,
            notifier,
            uploader,
            service,
        }
    }

    pub fn total_writes(&self) -> usize {
        self.courses.calls().writes() + self.details.calls().writes() + self.pricing.calls().writes()
    }
}

pub fn course(id: &str, title: &str) -> Course {
    Course {
        key: None,
        id: id.to_string(),
        category: "Programming".to_string(),
        badge: "New".to_string(),
        title: title.to_string(),
        description: format!("{title} from scratch"),
        duration: "8 weeks".to_string(),
        extra_info: "Live online".to_string(),
        accent: Accent::Green,
        icon: Some("code.svg".to_string()),
        image: None,
        featured: false,
    }
}

/// Fills every details and pricing field of `view` with valid content.
pub fn complete(mut view: UnifiedCourseView) -> UnifiedCourseView {
    view.overview = "Hands-on introduction".to_string();
    view.prerequisites = "Basic computer skills".to_string();
    view.features = vec![Feature {
        icon: "star".to_string(),
        title: "Projects".to_string(),
        description: "Build five projects".to_string(),
    }];
    view.curriculum = vec![CurriculumModule {
        name: "Foundations".to_string(),
        duration: "2 weeks".to_string(),
        topics: vec![Topic {
            name: "Syntax".to_string(),
            subtopics: vec!["Variables".to_string(), "Control flow".to_string()],
        }],
    }];
    view.tools = vec![Tool {
        name: "VS Code".to_string(),
        icon: "vscode.svg".to_string(),
    }];
    view.testimonials = vec![Testimonial {
        name: "Asha".to_string(),
        role: "Data Analyst".to_string(),
        avatar: "asha.png".to_string(),
        rating: 5,
        content: "Loved it".to_string(),
        color: "#7c3aed".to_string(),
    }];
    view.success_stats = vec![SuccessStat {
        value: "92%".to_string(),
        label: "Placement rate".to_string(),
    }];
    view.pricing_display = PricingDisplay {
        current_price: "₹19,999".to_string(),
        original_price: "₹24,999".to_string(),
        discount: "20% off".to_string(),
        deadline: "Ends Sunday".to_string(),
        features: vec!["Certificate".to_string()],
    };
    view.course_info = CourseInfo {
        start_date: "2026-11-01".to_string(),
        format: "Online".to_string(),
        support: "24/7".to_string(),
        enrolled: "1,200+".to_string(),
    };
    view.plan_name = "Standard".to_string();
    view.original_price = 24999.0;
    view.current_price = 19999.0;
    view.installment_price = 3500.0;
    view.installment_months = 6;
    view.discount = "20% off".to_string();
    view.pricing_duration = "8 weeks".to_string();
    view.pricing_extra = "Certificate included".to_string();
    view.pricing_description = "Everything you need".to_string();
    view.pricing_features = vec!["Mentor support".to_string(), "Projects".to_string()];
    view.highlighted = true;
    view.pricing_accent = PricingAccent::Orange;
    view.pricing_badge = "Popular".to_string();
    view.cta = "Enroll now".to_string();
    view.popular = true;
    view
}

/// A brand-new, fully valid view for `id`.
pub fn new_view(id: &str, title: &str) -> UnifiedCourseView {
    let course = course(id, title);
    complete(UnifiedCourseView {
        course_key: None,
        id: course.id,
        category: course.category,
        badge: course.badge,
        title: course.title,
        description: course.description,
        duration: course.duration,
        extra_info: course.extra_info,
        accent: course.accent,
        icon: course.icon,
        image: course.image,
        featured: course.featured,
        ..Default::default()
    })
}
