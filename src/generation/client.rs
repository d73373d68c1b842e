//! Image generator trait and the blocking Gemini client.
//!
//! The orchestrator only sees [`ImageGenerator`], so tests can swap in a mock
//! that never touches the network. [`GeminiClient`] is the production
//! implementation: one `ureq` POST per call, a global timeout, no retries.

use super::wire::{GenerateContentRequest, parse_image_response};
use crate::config::Settings;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Upper bound on a response body. Inline images arrive base64-encoded, so a
/// few megapixels of PNG easily exceed ureq's default 10 MB limit.
const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

/// How much of an error body is kept for the log.
const ERROR_BODY_CHARS: usize = 500;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("No candidates in response")]
    NoCandidates,
    #[error("No image in response{}", model_said(.text))]
    NoImage { text: Option<String> },
    #[error("Request timed out")]
    Timeout,
    #[error("Request failed: {0}")]
    Transport(ureq::Error),
    #[error("Invalid response JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl From<ureq::Error> for GenerationError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Timeout(_) => GenerationError::Timeout,
            ureq::Error::Io(ref io) if io.kind() == std::io::ErrorKind::TimedOut => {
                GenerationError::Timeout
            }
            other => GenerationError::Transport(other),
        }
    }
}

fn model_said(text: &Option<String>) -> String {
    text.as_ref()
        .map(|t| format!(" (model said: {t})"))
        .unwrap_or_default()
}

/// Inputs for a single image generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    /// PNG bytes of the style reference, when one is available.
    pub style_reference: Option<&'a [u8]>,
}

/// Anything that can turn a prompt into encoded image bytes.
pub trait ImageGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Vec<u8>, GenerationError>;
}

/// Blocking client for `models/<model>:generateContent`.
pub struct GeminiClient {
    agent: ureq::Agent,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.config.api.generate_url(),
            settings.api_key.clone(),
            settings.config.api.timeout(),
        )
    }

    /// POST the request and return the raw body of a 200 response.
    fn post(&self, body: &GenerateContentRequest) -> Result<String, GenerationError> {
        debug!(url = %self.url, "sending generateContent request");
        let mut response = self
            .agent
            .post(&self.url)
            .query("key", &self.api_key)
            .header("Content-Type", "application/json")
            .send_json(body)?;

        let status = response.status();
        let text = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_string();

        if status != ureq::http::StatusCode::OK {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text
                    .map(|t| t.chars().take(ERROR_BODY_CHARS).collect())
                    .unwrap_or_default(),
            });
        }

        Ok(text?)
    }
}

impl ImageGenerator for GeminiClient {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Vec<u8>, GenerationError> {
        let body = GenerateContentRequest::new(request.prompt, request.style_reference);
        parse_image_response(&self.post(&body)?)
    }
}

/// Agent that hands back non-2xx responses instead of erroring, so the body
/// can be logged.
fn build_agent(timeout: Duration) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build();
    config.into()
}
