use analytics::ExecutiveSummary;
use core_types::{CoreError, MetricSet, RawValues, Thresholds};
use narrator::AiSummary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /v1/analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub company: String,
    pub period: String,
    /// Falls back to the configured default currency.
    #[serde(default)]
    pub currency: Option<String>,
    pub values: RawValues,
}

impl AnalyzeRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.company.is_empty() {
            return Err(CoreError::InvalidInput(
                "company".to_string(),
                "must not be empty".to_string(),
            ));
        }
        if self.period.is_empty() {
            return Err(CoreError::InvalidInput(
                "period".to_string(),
                "must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body of `POST /v1/metrics`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsRequest {
    pub values: RawValues,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Present only when the analysis was persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub thresholds: Thresholds,
    pub executive: ExecutiveSummary,
    pub ai: Option<AiSummary>,
    pub metrics: MetricSet,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: MetricSet,
    pub thresholds: Thresholds,
}
