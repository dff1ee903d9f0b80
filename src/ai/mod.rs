//! AI-assisted recipe text generation.
//!
//! A provider trait abstracts the external text generation API. The gateway on top
//! of it never fails: when the provider is missing or errors, it answers from
//! deterministic templates instead.

mod fallback;
mod gateway;
mod gemini;

pub use gateway::{Generation, TextGateway};
pub use gemini::GeminiProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for text generation calls.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Model returned no text")]
    EmptyResponse,
}

/// A text generation backend.
///
/// Implementations must be thread-safe; one provider is shared by all requests.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and return the model's text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name, e.g. "gemini".
    fn provider_name(&self) -> &'static str;

    /// Model name, e.g. "gemini-2.5-flash".
    fn model_name(&self) -> &str;
}
