//! Chat-completions client for card generation.
//!
//! Talks to an Azure-style OpenAI deployment over plain HTTP. Generation is
//! best-effort by contract: `generate_session_cards` never returns an error,
//! it logs and yields an empty list so the card flow can continue on the
//! existing pool.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::config::LlmConfig;
use crate::models::{GeneratedCard, Selection};
use crate::services::prompts;

const DEFAULT_TEMPERATURE: f64 = 0.2;
const MAX_COMPLETION_TOKENS: u32 = 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the completion call itself. These never cross the service
/// boundary; `generate_session_cards` swallows them into an empty result.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Empty completion")]
    EmptyCompletion,
}

#[derive(Debug, Clone)]
pub struct LlmClient {
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
    http: Client,
}

impl LlmClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            // trailing slash would produce "//openai/..." in the URL
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            http,
        })
    }

    /// One chat completion: system + user message in, assistant text out.
    pub async fn complete(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        );

        let body = serde_json::json!({
            "messages": [
                { "role": "system", "content": system_message },
                { "role": "user", "content": user_message }
            ],
            "temperature": DEFAULT_TEMPERATURE,
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, message });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }
}

// Minimal slice of the chat-completions response shape.

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Extracts the card list from a raw completion.
///
/// Models wrap their JSON in prose or code fences, so the widest bracket
/// span (first `[` to last `]`) is taken before parsing. Two failure cases,
/// both returning an empty list: no bracket span found, and the span not
/// parsing as an array of objects with a `description`.
pub fn parse_card_list(raw: &str) -> Vec<GeneratedCard> {
    let Some(start) = raw.find('[') else {
        tracing::warn!("No JSON array found in completion");
        return Vec::new();
    };
    let Some(end) = raw.rfind(']').filter(|end| *end > start) else {
        tracing::warn!("No JSON array found in completion");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<GeneratedCard>>(&raw[start..=end]) {
        Ok(cards) => cards,
        Err(e) => {
            tracing::warn!("Failed to parse completion as card list: {}", e);
            Vec::new()
        }
    }
}

/// Generates card descriptions for a selection. Never fails: template
/// problems, network errors, bad status codes and garbled output all log
/// and produce an empty list, leaving the caller on the existing pool.
pub async fn generate_session_cards(
    pool: &SqlitePool,
    llm: Option<&LlmClient>,
    selection: &Selection,
) -> Vec<String> {
    let Some(client) = llm else {
        tracing::warn!("LLM not configured, skipping card generation");
        return Vec::new();
    };

    let (system_message, user_message) = match prompts::format_prompt_templates(pool, selection).await
    {
        Ok(messages) => messages,
        Err(e) => {
            tracing::error!("Error generating session cards: {}", e);
            return Vec::new();
        }
    };

    let raw = match client.complete(&system_message, &user_message).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("Error generating session cards: {}", e);
            return Vec::new();
        }
    };

    tracing::debug!("LLM response: {}", raw);

    parse_card_list(&raw)
        .into_iter()
        .map(|card| card.description)
        .collect()
}
