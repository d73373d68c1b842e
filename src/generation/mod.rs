//! Image generation through the Gemini `generateContent` API.
//!
//! | Piece | Role |
//! |---|---|
//! | [`wire`] | Request/response JSON shapes and payload extraction |
//! | [`client`] | [`ImageGenerator`] trait + the blocking [`GeminiClient`] |
//!
//! One post means one POST request. Nothing is retried: any failure comes
//! back as a [`GenerationError`] and the orchestrator moves on.

pub mod client;
pub mod wire;

pub use client::{GeminiClient, GenerationError, GenerationRequest, ImageGenerator};
