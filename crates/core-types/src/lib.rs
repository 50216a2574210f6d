pub mod enums;
pub mod error;
pub mod number;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{MetricKey, MetricStatus};
pub use error::CoreError;
pub use structs::{MetricResult, MetricSet, RawValues, Threshold, Thresholds};
