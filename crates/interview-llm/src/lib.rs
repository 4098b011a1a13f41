//! `LlmBackend` implementations.
//!
//! [`HttpLlmBackend`] is the production backend: a generic chat-completions
//! HTTP client with retry/backoff and client-side rate limiting, grounded on
//! the teacher's `OllamaBackend` (`crates/llm/src/backend.rs`). [`MockLlmBackend`]
//! is a deterministic in-memory backend used by every other crate's tests.

pub mod backend;
pub mod mock;
pub mod rate_limit;

pub use backend::{HttpLlmBackend, HttpLlmConfig};
pub use mock::MockLlmBackend;
pub use rate_limit::RateLimiter;
