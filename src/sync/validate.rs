use thiserror::Error;

use crate::models::UnifiedCourseView;

/// The first rule a unified course view violates. Messages are shown to
/// the admin as-is; positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Curriculum must contain at least one module")]
    EmptyCurriculum,

    #[error("Module {module} needs a name")]
    ModuleName { module: usize },

    #[error("Module {module} needs a duration")]
    ModuleDuration { module: usize },

    #[error("Module {module} must contain at least one topic")]
    ModuleWithoutTopics { module: usize },

    #[error("Topic {topic} in module {module} needs a name")]
    TopicName { module: usize, topic: usize },

    #[error("Topic {topic} in module {module} must contain at least one subtopic")]
    TopicWithoutSubtopics { module: usize, topic: usize },

    #[error("{0} must be a non-negative amount")]
    InvalidPrice(&'static str),

    #[error("Installment months must be at least 1 when an installment price is set")]
    InstallmentMonths,

    #[error("Testimonial {testimonial} rating must be between 1 and 5")]
    TestimonialRating { testimonial: usize },

    #[error("Course id cannot be changed from {from} to {to}")]
    IdentityChanged { from: String, to: String },

    #[error("Course id {id} is already in use")]
    DuplicateCourseId { id: String },
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| is_blank(value)) {
        Some((name, _)) => Err(ValidationError::MissingField(*name)),
        None => Ok(()),
    }
}

/// Checks a view before any write is issued.
///
/// Rules run in a fixed order (Course, CourseDetails, curriculum,
/// CoursePricing, amounts and ratings) and the first violation is returned.
pub fn validate_view(view: &UnifiedCourseView) -> Result<(), ValidationError> {
    require(&[
        ("Course id", view.id.as_str()),
        ("Category", view.category.as_str()),
        ("Badge", view.badge.as_str()),
        ("Title", view.title.as_str()),
        ("Description", view.description.as_str()),
        ("Duration", view.duration.as_str()),
        ("Extra info", view.extra_info.as_str()),
    ])?;

    require(&[
        ("Overview", view.overview.as_str()),
        ("Prerequisites", view.prerequisites.as_str()),
    ])?;

    validate_curriculum(view)?;

    require(&[
        ("Plan name", view.plan_name.as_str()),
        ("Pricing description", view.pricing_description.as_str()),
        ("Pricing badge", view.pricing_badge.as_str()),
        ("Call to action", view.cta.as_str()),
        ("Pricing duration", view.pricing_duration.as_str()),
        ("Pricing extra", view.pricing_extra.as_str()),
        ("Discount", view.discount.as_str()),
    ])?;

    for (name, amount) in [
        ("Original price", view.original_price),
        ("Current price", view.current_price),
        ("Installment price", view.installment_price),
    ] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ValidationError::InvalidPrice(name));
        }
    }
    if view.installment_price > 0.0 && view.installment_months == 0 {
        return Err(ValidationError::InstallmentMonths);
    }

    if let Some(index) = view
        .testimonials
        .iter()
        .position(|t| !(1..=5).contains(&t.rating))
    {
        return Err(ValidationError::TestimonialRating {
            testimonial: index + 1,
        });
    }

    Ok(())
}

fn validate_curriculum(view: &UnifiedCourseView) -> Result<(), ValidationError> {
    if view.curriculum.is_empty() {
        return Err(ValidationError::EmptyCurriculum);
    }

    for (m, module) in view.curriculum.iter().enumerate() {
        let module_no = m + 1;
        if is_blank(&module.name) {
            return Err(ValidationError::ModuleName { module: module_no });
        }
        if is_blank(&module.duration) {
            return Err(ValidationError::ModuleDuration { module: module_no });
        }
        if module.topics.is_empty() {
            return Err(ValidationError::ModuleWithoutTopics { module: module_no });
        }

        for (t, topic) in module.topics.iter().enumerate() {
            if is_blank(&topic.name) {
                return Err(ValidationError::TopicName {
                    module: module_no,
                    topic: t + 1,
                });
            }
            if topic.subtopics.iter().all(|s| is_blank(s)) {
                return Err(ValidationError::TopicWithoutSubtopics {
                    module: module_no,
                    topic: t + 1,
                });
            }
        }
    }

    Ok(())
}
