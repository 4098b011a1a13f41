//! The LLM backend trait seam, grounded on the teacher's
//! `voice_agent_llm::LlmBackend` / `voice_agent_core::traits::LanguageModel`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    Error,
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub text: String,
    pub total_time_ms: u64,
    pub finish_reason: FinishReason,
}

#[derive(Error, Debug, Clone)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("upstream API error: {0}")]
    Api(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request timed out")]
    Timeout,

    #[error("rate limited, retry after {0:?}")]
    RateLimited(std::time::Duration),
}

impl LlmError {
    /// Whether a retry loop should attempt this request again (§5, §7
    /// point 2: only transient upstream errors are retried).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::Network(_) | LlmError::Timeout | LlmError::RateLimited(_)
        )
    }
}

/// A prompted-completion LLM backend. Implementations live in
/// `interview-llm`; `interview-persona` and `interview-planner` depend only
/// on this trait, never on a concrete backend, so tests can supply a
/// deterministic mock.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<GenerationResult, LlmError>;

    fn model_name(&self) -> &str;
}
