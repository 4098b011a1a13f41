//! HTTP-backed [`LlmBackend`], grounded on the teacher's `OllamaBackend`
//! (`crates/llm/src/backend.rs`): same retry-with-backoff shape, generalized
//! to a provider-agnostic OpenAI-compatible chat-completions endpoint since
//! §6.4 names only `LLM_API_KEY`, not a fixed vendor.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use interview_core::traits::{ChatMessage, ChatRole, FinishReason, GenerationResult, LlmBackend, LlmError};
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::rate_limit::RateLimiter;

#[derive(Debug, Clone)]
pub struct HttpLlmConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub rate_limit_per_min: u32,
}

impl Default for HttpLlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 512,
            temperature: 0.7,
            timeout: Duration::from_secs(60),
            max_retries: 5,
            initial_backoff: Duration::from_millis(200),
            rate_limit_per_min: 20,
        }
    }
}

pub struct HttpLlmBackend {
    client: Client,
    config: HttpLlmConfig,
    limiter: RateLimiter,
}

impl HttpLlmBackend {
    pub fn new(config: HttpLlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;
        let limiter = RateLimiter::new(config.rate_limit_per_min);
        Ok(Self {
            client,
            config,
            limiter,
        })
    }

    async fn execute_request(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let mut builder = self.client.post(&self.config.endpoint).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::Network(e.to_string())
            }
        })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(1));
            return Err(LlmError::RateLimited(retry_after));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(LlmError::Network(format!("server error {status}: {body}")));
            }
            return Err(LlmError::Api(format!("{status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }

    /// Full jitter exponential backoff, matching the teacher's doubling
    /// scheme plus randomized jitter to avoid a retry stampede across
    /// concurrent sessions.
    fn backoff_with_jitter(base: Duration, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        let max = base.saturating_mul(factor.max(1));
        let jittered_millis = rand::thread_rng().gen_range(0..=max.as_millis().max(1) as u64);
        Duration::from_millis(jittered_millis)
    }
}

#[async_trait]
impl LlmBackend for HttpLlmBackend {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<GenerationResult, LlmError> {
        let start = Instant::now();
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: messages.iter().map(ApiMessage::from).collect(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let mut last_error = None;
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let wait = Self::backoff_with_jitter(self.config.initial_backoff, attempt - 1);
                tracing::warn!(attempt, ?wait, "retrying LLM request");
                tokio::time::sleep(wait).await;
            }

            self.limiter.acquire().await;

            match self.execute_request(&request).await {
                Ok(response) => {
                    let text = response
                        .choices
                        .into_iter()
                        .next()
                        .map(|c| c.message.content)
                        .unwrap_or_default();
                    return Ok(GenerationResult {
                        text,
                        total_time_ms: start.elapsed().as_millis() as u64,
                        finish_reason: FinishReason::Stop,
                    });
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(LlmError::Network("max retries exceeded".to_string())))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

impl From<&ChatMessage> for ApiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: match msg.role {
                ChatRole::System => "system",
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            },
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_with_attempt_and_never_exceeds_bound() {
        let base = Duration::from_millis(100);
        for attempt in 0..5 {
            let wait = HttpLlmBackend::backoff_with_jitter(base, attempt);
            let max = base.saturating_mul(2u32.saturating_pow(attempt).max(1));
            assert!(wait <= max);
        }
    }
}
