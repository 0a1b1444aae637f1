//! Unified view over the Course, CourseDetails and CoursePricing
//! collections: pure merge and decomposition, validation, and the reports
//! produced by the orchestrators in [`crate::services`].

pub mod audit;
pub mod merge;
pub mod report;
pub mod validate;

pub use audit::{ConsistencyReport, audit_consistency};
pub use merge::{CoursePayloads, decompose, merge_one, merge_views};
pub use report::{DeleteReport, SaveMode, SaveReport, WriteOutcome};
pub use validate::{ValidationError, validate_view};
