//! Gemini REST API client.
//!
//! Sync HTTP client for the `generateContent` endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ureq::Agent;

use crate::error::AiError;
use crate::{ContentGenerator, GenerationMode};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Gemini API client.
pub struct GeminiClient {
    agent: Agent,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client.
    ///
    /// # Arguments
    /// * `api_key` - API key sent with every request; empty disables generation
    /// * `model` - Model name, e.g. `gemini-2.5-flash`
    /// * `base_url` - API base URL including the version segment
    #[must_use]
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Self {
        Self::with_timeout(
            api_key,
            model,
            base_url,
            Duration::from_secs(DEFAULT_TIMEOUT),
        )
    }

    /// Create a client with a custom request timeout.
    #[must_use]
    pub fn with_timeout(api_key: &str, model: &str, base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl ContentGenerator for GeminiClient {
    fn generate(&self, topic: &str, mode: GenerationMode) -> Result<String, AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::MissingApiKey);
        }

        let payload = GenerateRequest::new(mode.prompt(topic));
        let payload_bytes = serde_json::to_vec(&payload)?;
        let url = self.endpoint();

        info!(model = %self.model, %mode, "Generating content");

        let response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(AiError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body: GenerateResponse = body_reader.read_json()?;
        let text = body.text();
        debug!(chars = text.len(), "Received generated content");
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

impl GenerateRequest {
    fn new(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}
