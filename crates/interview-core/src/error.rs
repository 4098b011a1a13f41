//! Error types for the interview orchestration core.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can escape the core to the adapter.
///
/// Per the error handling design (§7), only validation and session-lookup
/// errors are meant to reach the adapter as explicit error types; everything
/// else (transient upstream failures, malformed LLM output, pipeline
/// failures) is absorbed internally and turned into fallback content or a
/// structured envelope instead of a `Result::Err`. `UpstreamUnavailable` is
/// the one exception that both gets constructed here and is still caught by
/// `interview-orchestrator::run_flow` before it would ever reach an adapter
/// as a raw `Result::Err` — it surfaces instead as a 503 error envelope, per
/// the propagation policy above (see DESIGN.md's Open Question decisions:
/// the deterministic fallback bank in `interview-planner` can't itself be
/// exhausted, so a distinct `GENERATION_FAILED` variant was dropped rather
/// than kept unreachable).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("session already completed: {0}")]
    AlreadyCompleted(String),

    #[error("session state is inconsistent: {0}")]
    InconsistentState(String),

    #[error("upstream LLM provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("company not found: {0}")]
    CompanyNotFound(String),
}

impl Error {
    /// Maps to the numeric error codes enumerated in §6.5.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidSettings(_) => "INVALID_SETTINGS",
            Error::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Error::AlreadyCompleted(_) => "ALREADY_COMPLETED",
            Error::InconsistentState(_) => "INCONSISTENT_STATE",
            Error::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Error::CompanyNotFound(_) => "COMPANY_NOT_FOUND",
        }
    }

    /// Maps to the HTTP status codes enumerated in §6.5, for the thin adapter.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidSettings(_) => 400,
            Error::SessionNotFound(_) => 404,
            Error::CompanyNotFound(_) => 404,
            Error::AlreadyCompleted(_) => 409,
            Error::InconsistentState(_) => 409,
            Error::UpstreamUnavailable(_) => 503,
        }
    }
}
