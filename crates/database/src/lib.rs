//! # Pyra Database Crate
//!
//! This crate is the application-specific interface to the optional
//! PostgreSQL archive of analyses.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** This crate encapsulates all database-specific logic
//!   behind the `AnalysisStore` trait, hiding the SQL from the HTTP layer.
//! - **Optional by Construction:** The service runs without a database; callers
//!   only build a `DbRepository` when a URL is configured and the pool connects.
//! - **Asynchronous & Pooled:** All operations are asynchronous over a `PgPool`.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: Applies the embedded migrations.
//! - `AnalysisStore` / `DbRepository`: storing an analysis and getting its id back.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{AnalysisStore, DbRepository, NewAnalysis};
