// tasktrack - Personal task tracker with priority ordering and flat-file persistence

pub mod error;
pub mod models;
pub mod persist;
pub mod store;

// Re-export main types for convenience
pub use error::{Result, TrackerError};
pub use models::Task;
pub use store::TaskStore;
