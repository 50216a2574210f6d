use crate::error::NarratorError;
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::{AiSummary, AnalysisContext, NarrativeGenerator};
use async_trait::async_trait;
use configuration::AiSettings;
use core_types::MetricSet;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The JSON payload for the `POST /chat/completions` endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Only the fields we read; the API sends many more.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// A client for any OpenAI-compatible Chat Completions endpoint.
pub struct OpenAiNarrator {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_metrics: usize,
}

impl OpenAiNarrator {
    /// Creates a new `OpenAiNarrator`.
    ///
    /// Returns `None` if no API key is configured or the HTTP client cannot be
    /// built, allowing the service to run without AI commentary.
    pub fn from_settings(settings: &AiSettings) -> Option<Self> {
        let Some(api_key) = settings.api_key.clone() else {
            tracing::info!("AI narrator is not configured (missing api key).");
            return None;
        };

        let client = match Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = ?e, "Failed to build the AI HTTP client; narrator disabled.");
                return None;
            }
        };

        Some(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_metrics: settings.max_metrics,
        })
    }
}

#[async_trait]
impl NarrativeGenerator for OpenAiNarrator {
    async fn interpret(
        &self,
        metrics: &MetricSet,
        context: &AnalysisContext<'_>,
    ) -> Result<Option<AiSummary>, NarratorError> {
        let prompt = build_prompt(metrics, context, self.max_metrics);
        let payload = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(NarratorError::ApiError(status.as_u16(), text));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| NarratorError::Deserialization(e.to_string()))?;

        Ok(extract_summary(parsed))
    }
}

fn extract_summary(response: ChatResponse) -> Option<AiSummary> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .map(|summary| AiSummary { summary })
}
