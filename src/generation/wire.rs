//! JSON wire format for `generateContent`.
//!
//! Request (style reference part only when a reference image exists):
//!
//! ```json
//! {
//!   "contents": [{ "parts": [
//!     { "inline_data": { "mime_type": "image/png", "data": "<base64>" } },
//!     { "text": "<prompt>" }
//!   ]}],
//!   "generationConfig": { "responseModalities": ["image", "text"] }
//! }
//! ```
//!
//! Response, trimmed to the fields we read:
//!
//! ```json
//! { "candidates": [{ "content": { "parts": [
//!     { "text": "Here is your image" },
//!     { "inlineData": { "mimeType": "image/png", "data": "<base64>" } }
//! ]}}]}
//! ```

use super::client::GenerationError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Image { inline_data: InlineData },
    Text { text: String },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    pub response_modalities: Vec<String>,
}

impl GenerateContentRequest {
    /// Build a request for `prompt`, optionally steered by a PNG style reference.
    pub fn new(prompt: &str, style_reference: Option<&[u8]>) -> Self {
        let mut parts = Vec::with_capacity(2);
        if let Some(png) = style_reference {
            parts.push(RequestPart::Image {
                inline_data: InlineData {
                    mime_type: "image/png".to_string(),
                    data: STANDARD.encode(png),
                },
            });
        }
        parts.push(RequestPart::Text {
            text: prompt.to_string(),
        });

        Self {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_modalities: vec!["image".to_string(), "text".to_string()],
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CandidateContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponsePart {
    #[serde(rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<InlineBlob>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InlineBlob {
    #[serde(default, rename = "mimeType", alias = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentResponse {
    /// Decode the first inline image in the response.
    ///
    /// Candidates are searched in order. When none carries an image, any text
    /// the model returned instead is kept on the error for the log.
    pub fn into_image(self) -> Result<Vec<u8>, GenerationError> {
        if self.candidates.is_empty() {
            return Err(GenerationError::NoCandidates);
        }

        let mut texts = Vec::new();
        for part in self.candidates.into_iter().flat_map(|c| c.content.parts) {
            if let Some(blob) = part.inline_data {
                return Ok(STANDARD.decode(blob.data.trim())?);
            }
            if let Some(text) = part.text.filter(|t| !t.trim().is_empty()) {
                texts.push(text);
            }
        }

        Err(GenerationError::NoImage {
            text: (!texts.is_empty()).then(|| texts.join(" ")),
        })
    }
}

/// Parse a raw response body and extract its image.
pub fn parse_image_response(json: &str) -> Result<Vec<u8>, GenerationError> {
    let response: GenerateContentResponse = serde_json::from_str(json)?;
    response.into_image()
}
