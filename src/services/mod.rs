pub mod scheduler;
pub mod sync_service;

pub use scheduler::ConsistencyScheduler;
pub use sync_service::{CourseSyncService, reconcile_sibling};
