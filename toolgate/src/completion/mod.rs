//! Text completion collaborator used by copy generation.

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAiCompletion;

use crate::errors::CompletionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single-shot completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System prompt.
    pub system: String,
    /// User prompt.
    pub prompt: String,
}

impl CompletionRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
        }
    }
}

/// Produces the full text of a completion.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Runs the request to completion and returns the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
