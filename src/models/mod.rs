pub mod course;
pub mod course_details;
pub mod course_pricing;
pub mod unified;

use serde::{Serialize, de::DeserializeOwned};

pub use course::{Accent, Course};
pub use course_details::{
    CourseDetails, CourseInfo, CurriculumModule, Feature, PricingDisplay, SuccessStat,
    Testimonial, TestimonialPreview, Tool, Topic, TrustIndicators,
};
pub use course_pricing::{CoursePricing, PricingAccent};
pub use unified::UnifiedCourseView;

/// A record stored in one of the independent course collections.
///
/// Every record has an internal key (`_id`, assigned by the store) and a
/// logical key shared by the three records describing one course.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also used as the store's partition key.
    const COLLECTION: &'static str;

    fn key(&self) -> Option<&str>;

    fn set_key(&mut self, key: Option<String>);

    fn logical_key(&self) -> &str;
}
