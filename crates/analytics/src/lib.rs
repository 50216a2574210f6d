//! # Pyra Analytics Engine
//!
//! This crate turns a company's raw accounting figures into ten classified
//! financial health ratios and an executive digest of them.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Both entry points are total, deterministic functions of
//!   their arguments. Indeterminate ratios (division by zero, missing optional inputs)
//!   come out as `None` rather than as errors.
//!
//! ## Public API
//!
//! - `compute_metrics` / `MetricsEngine`: raw values in, a full `MetricSet` out.
//! - `make_executive_summary`: headline, bullets and status groups for a `MetricSet`.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{compute_metrics, MetricsEngine};
pub use summary::{format_value, make_executive_summary, ExecutiveSummary, NO_DATA};
