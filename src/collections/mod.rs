pub mod dto;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::RemoteStoreConfig;
use crate::error::AppError;
use crate::models::{Course, CourseDetails, CoursePricing, Document};

pub use http::RestCollectionClient;

/// Typed access to one independently persisted collection.
///
/// `update` and `delete` are expected to be idempotent on retry; `create`
/// is not.
#[async_trait]
pub trait CollectionClient<T: Document>: Send + Sync {
    async fn list_all(&self) -> Result<Vec<T>, AppError>;
    async fn create(&self, payload: &T) -> Result<T, AppError>;
    async fn update(&self, key: &str, payload: &T) -> Result<T, AppError>;
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

/// The three collections that together describe one course.
#[derive(Clone)]
pub struct CourseCollections {
    pub courses: Arc<dyn CollectionClient<Course>>,
    pub details: Arc<dyn CollectionClient<CourseDetails>>,
    pub pricing: Arc<dyn CollectionClient<CoursePricing>>,
}

impl CourseCollections {
    pub fn new(
        courses: Arc<dyn CollectionClient<Course>>,
        details: Arc<dyn CollectionClient<CourseDetails>>,
        pricing: Arc<dyn CollectionClient<CoursePricing>>,
    ) -> Self {
        Self {
            courses,
            details,
            pricing,
        }
    }

    /// Clients for a remote REST store sharing one connection pool.
    pub fn rest(config: &RemoteStoreConfig) -> Result<Self, AppError> {
        let client = http::build_client()?;
        let token = config.api_token.clone();

        Ok(Self::new(
            Arc::new(RestCollectionClient::<Course>::new(
                client.clone(),
                &config.base_url,
                &config.courses_path,
                token.clone(),
            )),
            Arc::new(RestCollectionClient::<CourseDetails>::new(
                client.clone(),
                &config.base_url,
                &config.course_details_path,
                token.clone(),
            )),
            Arc::new(RestCollectionClient::<CoursePricing>::new(
                client,
                &config.base_url,
                &config.course_pricing_path,
                token,
            )),
        ))
    }
}
