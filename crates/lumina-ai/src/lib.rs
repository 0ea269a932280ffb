//! AI-assisted content generation for Lumina.
//!
//! A [`ContentGenerator`] turns a topic into Markdown text for one of three
//! [`GenerationMode`]s. [`GeminiClient`] is the HTTP implementation;
//! [`generate_or_message`] wraps any generator so failures come back as a
//! user-facing message instead of an error.

mod client;
mod error;
mod mode;

pub use client::GeminiClient;
pub use error::AiError;
pub use mode::{GenerationMode, UnknownMode};

use tracing::warn;

/// Returned when the service answers with no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Failed to generate content.";

/// Returned when the service cannot be reached or rejects the request.
pub const SERVICE_ERROR_MESSAGE: &str = "Error connecting to AI service. Please check your API key.";

/// Source of generated content.
pub trait ContentGenerator: Send + Sync {
    /// Generate text for `topic` in the given mode.
    ///
    /// An empty string means the service produced nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the service is unconfigured or the request fails.
    fn generate(&self, topic: &str, mode: GenerationMode) -> Result<String, AiError>;
}

/// Generate content, mapping every failure to a display message.
///
/// Never fails: an empty response yields [`EMPTY_RESPONSE_MESSAGE`] and an
/// error yields [`SERVICE_ERROR_MESSAGE`] after being logged.
pub fn generate_or_message(
    generator: &dyn ContentGenerator,
    topic: &str,
    mode: GenerationMode,
) -> String {
    match generator.generate(topic, mode) {
        Ok(text) if text.is_empty() => EMPTY_RESPONSE_MESSAGE.to_owned(),
        Ok(text) => text,
        Err(error) => {
            warn!(%error, %mode, "AI generation failed");
            SERVICE_ERROR_MESSAGE.to_owned()
        }
    }
}
