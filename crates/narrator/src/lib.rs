//! # Pyra Narrator
//!
//! Optional natural-language commentary on a computed metric set. The service
//! treats every failure here as "no commentary": callers log the error and move on.

use crate::error::NarratorError;
use async_trait::async_trait;
use core_types::MetricSet;
use serde::{Deserialize, Serialize};

mod client;
pub mod error;
pub mod prompt;

// --- Public API ---
pub use client::OpenAiNarrator;

/// Who and what the metrics describe.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub company: &'a str,
    pub period: &'a str,
    pub currency: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSummary {
    pub summary: String,
}

/// The abstract interface for a narrative generator, so the HTTP layer can run
/// against the real API client or a fake.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Returns `Ok(None)` when the model answered without usable text.
    async fn interpret(
        &self,
        metrics: &MetricSet,
        context: &AnalysisContext<'_>,
    ) -> Result<Option<AiSummary>, NarratorError>;
}
