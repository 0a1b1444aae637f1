use crate::models::{Course, CourseDetails, CoursePricing, UnifiedCourseView};

/// The three collection payloads a [`UnifiedCourseView`] decomposes into.
#[derive(Debug, Clone, PartialEq)]
pub struct CoursePayloads {
    pub course: Course,
    pub details: CourseDetails,
    pub pricing: CoursePricing,
}

/// Joins the three collections by logical course id.
///
/// Produces exactly one view per Course, in Course order. The first
/// matching sibling wins; a missing sibling contributes empty defaults.
pub fn merge_views(
    courses: &[Course],
    details: &[CourseDetails],
    pricing: &[CoursePricing],
) -> Vec<UnifiedCourseView> {
    courses
        .iter()
        .map(|course| {
            let course_details = details.iter().find(|d| d.course_id == course.id);
            let course_pricing = pricing.iter().find(|p| p.id == course.id);
            merge_one(course, course_details, course_pricing)
        })
        .collect()
}

pub fn merge_one(
    course: &Course,
    details: Option<&CourseDetails>,
    pricing: Option<&CoursePricing>,
) -> UnifiedCourseView {
    let details = details.cloned().unwrap_or_default();
    let pricing = pricing.cloned().unwrap_or_default();

    UnifiedCourseView {
        course_key: course.key.clone(),

        id: course.id.clone(),
        category: course.category.clone(),
        badge: course.badge.clone(),
        title: course.title.clone(),
        description: course.description.clone(),
        duration: course.duration.clone(),
        extra_info: course.extra_info.clone(),
        accent: course.accent,
        icon: course.icon.clone(),
        image: course.image.clone(),
        featured: course.featured,

        overview: details.overview,
        prerequisites: details.prerequisites,
        features: details.features,
        curriculum: details.curriculum,
        tools: details.tools,
        testimonials: details.testimonials,
        success_stats: details.success_stats,
        pricing_display: details.pricing,
        course_info: details.course_info,
        trust_indicators: details.trust_indicators,

        plan_name: pricing.plan_name,
        original_price: pricing.original_price,
        current_price: pricing.current_price,
        installment_price: pricing.installment_price,
        installment_months: pricing.installment_months,
        discount: pricing.discount,
        pricing_duration: pricing.duration,
        pricing_extra: pricing.extra,
        pricing_description: pricing.description,
        pricing_features: pricing.features,
        highlighted: pricing.highlighted,
        pricing_accent: pricing.accent,
        pricing_badge: pricing.badge,
        cta: pricing.cta,
        popular: pricing.popular,
    }
}

/// Inverse of [`merge_one`].
///
/// Sibling payloads carry no internal key; they are located by logical id
/// when written.
pub fn decompose(view: &UnifiedCourseView) -> CoursePayloads {
    let course = Course {
        key: view.course_key.clone(),
        id: view.id.clone(),
        category: view.category.clone(),
        badge: view.badge.clone(),
        title: view.title.clone(),
        description: view.description.clone(),
        duration: view.duration.clone(),
        extra_info: view.extra_info.clone(),
        accent: view.accent,
        icon: view.icon.clone(),
        image: view.image.clone(),
        featured: view.featured,
    };

    let details = CourseDetails {
        key: None,
        course_id: view.id.clone(),
        overview: view.overview.clone(),
        prerequisites: view.prerequisites.clone(),
        features: view.features.clone(),
        curriculum: view.curriculum.clone(),
        tools: view.tools.clone(),
        testimonials: view.testimonials.clone(),
        success_stats: view.success_stats.clone(),
        pricing: view.pricing_display.clone(),
        course_info: view.course_info.clone(),
        trust_indicators: view.trust_indicators.clone(),
    };

    let pricing = CoursePricing {
        key: None,
        id: view.id.clone(),
        plan_name: view.plan_name.clone(),
        category: view.category.clone(),
        original_price: view.original_price,
        current_price: view.current_price,
        installment_price: view.installment_price,
        installment_months: view.installment_months,
        discount: view.discount.clone(),
        duration: view.pricing_duration.clone(),
        extra: view.pricing_extra.clone(),
        description: view.pricing_description.clone(),
        features: view.pricing_features.clone(),
        highlighted: view.highlighted,
        accent: view.pricing_accent,
        badge: view.pricing_badge.clone(),
        cta: view.cta.clone(),
        popular: view.popular,
    };

    CoursePayloads {
        course,
        details,
        pricing,
    }
}
