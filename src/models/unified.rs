use serde::{Deserialize, Serialize};

use super::{
    Accent, CourseInfo, CurriculumModule, Feature, PricingAccent, PricingDisplay, SuccessStat,
    Testimonial, Tool, TrustIndicators,
};

/// Flat, editable projection of one Course with its CourseDetails and
/// CoursePricing siblings. Rebuilt on every fetch and never persisted.
///
/// Only the Course internal key is carried; sibling records are located by
/// logical id when the view is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnifiedCourseView {
    pub course_key: Option<String>,

    // Course
    pub id: String,
    pub category: String,
    pub badge: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub extra_info: String,
    pub accent: Accent,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub featured: bool,

    // CourseDetails
    pub overview: String,
    pub prerequisites: String,
    pub features: Vec<Feature>,
    pub curriculum: Vec<CurriculumModule>,
    pub tools: Vec<Tool>,
    pub testimonials: Vec<Testimonial>,
    pub success_stats: Vec<SuccessStat>,
    pub pricing_display: PricingDisplay,
    pub course_info: CourseInfo,
    pub trust_indicators: TrustIndicators,

    // CoursePricing
    pub plan_name: String,
    pub original_price: f64,
    pub current_price: f64,
    pub installment_price: f64,
    pub installment_months: u32,
    pub discount: String,
    pub pricing_duration: String,
    pub pricing_extra: String,
    pub pricing_description: String,
    pub pricing_features: Vec<String>,
    pub highlighted: bool,
    pub pricing_accent: PricingAccent,
    pub pricing_badge: String,
    pub cta: String,
    pub popular: bool,
}
