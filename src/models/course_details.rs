use serde::{Deserialize, Serialize};

use super::Document;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseDetails {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Logical course id, equal to `Course::id`.
    pub course_id: String,
    pub overview: String,
    pub prerequisites: String,
    pub features: Vec<Feature>,
    pub curriculum: Vec<CurriculumModule>,
    pub tools: Vec<Tool>,
    pub testimonials: Vec<Testimonial>,
    pub success_stats: Vec<SuccessStat>,
    pub pricing: PricingDisplay,
    pub course_info: CourseInfo,
    pub trust_indicators: TrustIndicators,
}

impl Document for CourseDetails {
    const COLLECTION: &'static str = "course_details";

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn set_key(&mut self, key: Option<String>) {
        self.key = key;
    }

    fn logical_key(&self) -> &str {
        &self.course_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// One curriculum module. Must hold at least one topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurriculumModule {
    pub name: String,
    pub duration: String,
    pub topics: Vec<Topic>,
}

/// A topic with its ordered, non-empty list of subtopics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    pub name: String,
    pub subtopics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tool {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    /// Stored filename returned by the attachment uploader.
    pub avatar: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub content: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessStat {
    pub value: String,
    pub label: String,
}

/// Display-only pricing block rendered on the course detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingDisplay {
    pub current_price: String,
    pub original_price: String,
    pub discount: String,
    pub deadline: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseInfo {
    pub start_date: String,
    pub format: String,
    pub support: String,
    pub enrolled: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustIndicators {
    pub rating: String,
    pub reviews: String,
    pub testimonial: TestimonialPreview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialPreview {
    pub name: String,
    pub role: String,
    pub content: String,
}
