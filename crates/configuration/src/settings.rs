use crate::error::ConfigError;
use core_types::Thresholds;
use serde::Deserialize;
use std::net::SocketAddr;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty configuration is a valid one: the
/// service then runs without persistence and without AI commentary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub ai: AiSettings,
    pub analysis: AnalysisSettings,
    pub logging: LoggingSettings,
    /// The process-wide threshold table handed to the metrics engine.
    pub thresholds: Thresholds,
}

/// Where and how the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit_bytes: usize,
}

/// Optional PostgreSQL persistence. Without a URL, analyses are not stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Optional narrative generation through an OpenAI-compatible chat API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// How many metrics are quoted in the prompt.
    pub max_metrics: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Applied when a request does not name its currency.
    pub default_currency: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

// --- Default Implementations ---

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout_secs: 20,
            max_metrics: 6,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_currency: "COP".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("invalid server address: {e}")))
    }
}

impl Settings {
    /// Fills unset values from the conventional, unprefixed variables
    /// (`DATABASE_URL`, `OPENAI_API_KEY`, `PORT`) and drops blank secrets.
    pub fn apply_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.database.url.is_none() {
            self.database.url = lookup("DATABASE_URL");
        }
        if self.ai.api_key.is_none() {
            self.ai.api_key = lookup("OPENAI_API_KEY");
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }

        self.database.url = self.database.url.take().filter(|url| !url.trim().is_empty());
        self.ai.api_key = self.ai.api_key.take().filter(|key| !key.trim().is_empty());
    }

    /// Rejects settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.default_currency.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "analysis.default_currency must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than zero".to_string(),
            ));
        }
        if self.ai.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "ai.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
