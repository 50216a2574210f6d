use crate::DbError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPool;
use uuid::Uuid;

/// Everything stored for one analysis request. Structured parts are kept as
/// JSON so the table does not need to track the metric catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysis {
    pub company: String,
    pub period: String,
    pub currency: String,
    pub raw_values: JsonValue,
    pub metrics: JsonValue,
    pub executive: JsonValue,
    pub ai_summary: Option<String>,
}

impl NewAnalysis {
    /// Serializes the structured parts of an analysis into a storable record.
    pub fn new(
        company: &str,
        period: &str,
        currency: &str,
        raw_values: &impl Serialize,
        metrics: &impl Serialize,
        executive: &impl Serialize,
        ai_summary: Option<String>,
    ) -> Result<Self, DbError> {
        Ok(Self {
            company: company.to_string(),
            period: period.to_string(),
            currency: currency.to_string(),
            raw_values: serde_json::to_value(raw_values)?,
            metrics: serde_json::to_value(metrics)?,
            executive: serde_json::to_value(executive)?,
            ai_summary,
        })
    }
}

/// Persistence seam used by the HTTP layer.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Stores the analysis and returns its generated identifier.
    async fn save_analysis(&self, analysis: &NewAnalysis) -> Result<Uuid, DbError>;
}

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for DbRepository {
    async fn save_analysis(&self, analysis: &NewAnalysis) -> Result<Uuid, DbError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO analyses (
                id, company, period, currency, raw_values, metrics, executive, ai_summary, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            "#,
        )
        .bind(id)
        .bind(&analysis.company)
        .bind(&analysis.period)
        .bind(&analysis.currency)
        .bind(&analysis.raw_values)
        .bind(&analysis.metrics)
        .bind(&analysis.executive)
        .bind(analysis.ai_summary.as_deref())
        .execute(&self.pool)
        .await?;

        tracing::debug!(analysis_id = %id, company = %analysis.company, "Analysis saved.");
        Ok(id)
    }
}
