//! Deterministic [`LlmBackend`] for tests across the workspace: no network,
//! content derived purely from the prompt so assertions can be exact.

use async_trait::async_trait;
use interview_core::traits::{ChatMessage, FinishReason, GenerationResult, LlmBackend, LlmError};
use parking_lot::Mutex;

/// Programmable mock: returns queued responses in order, or an error if the
/// queue is configured to fail, or else echoes a deterministic completion
/// derived from the last user message.
pub struct MockLlmBackend {
    model_name: String,
    queued_responses: Mutex<Vec<MockResponse>>,
}

pub enum MockResponse {
    Text(String),
    Fail(LlmError),
}

impl Default for MockLlmBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmBackend {
    pub fn new() -> Self {
        Self {
            model_name: "mock-llm".to_string(),
            queued_responses: Mutex::new(Vec::new()),
        }
    }

    /// Queues a successful completion to be returned on the next call.
    pub fn push_response(&self, text: impl Into<String>) {
        self.queued_responses.lock().push(MockResponse::Text(text.into()));
    }

    /// Queues a failure to be returned on the next call.
    pub fn push_failure(&self, error: LlmError) {
        self.queued_responses.lock().push(MockResponse::Fail(error));
    }
}

#[async_trait]
impl LlmBackend for MockLlmBackend {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<GenerationResult, LlmError> {
        let queued = self.queued_responses.lock().pop();
        let text = match queued {
            Some(MockResponse::Text(text)) => text,
            Some(MockResponse::Fail(error)) => return Err(error),
            None => {
                let last_user = messages
                    .iter()
                    .rev()
                    .find(|m| matches!(m.role, interview_core::traits::ChatRole::User))
                    .map(|m| m.content.as_str())
                    .unwrap_or("");
                format!("mock response to: {}\nintent: exercise the mocked path", truncate(last_user, 80))
            }
        };

        Ok(GenerationResult {
            text,
            total_time_ms: 1,
            finish_reason: FinishReason::Stop,
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_core::traits::ChatMessage;

    #[tokio::test]
    async fn echoes_deterministically_without_queued_response() {
        let backend = MockLlmBackend::new();
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("tell me about yourself")];
        let first = backend.generate(&messages).await.unwrap();
        let second = backend.generate(&messages).await.unwrap();
        assert_eq!(first.text, second.text);
    }

    #[tokio::test]
    async fn returns_queued_response_first() {
        let backend = MockLlmBackend::new();
        backend.push_response("queued answer\nintent: test");
        let messages = vec![ChatMessage::user("hi")];
        let result = backend.generate(&messages).await.unwrap();
        assert_eq!(result.text, "queued answer\nintent: test");
    }

    #[tokio::test]
    async fn returns_queued_failure() {
        let backend = MockLlmBackend::new();
        backend.push_failure(LlmError::Timeout);
        let messages = vec![ChatMessage::user("hi")];
        let result = backend.generate(&messages).await;
        assert!(matches!(result, Err(LlmError::Timeout)));
    }
}
