//! Core domain types for the interview orchestration core.
//!
//! This crate provides foundational types shared by every other crate in the
//! workspace:
//! - Session/question/answer domain types (§3 of the spec)
//! - The message envelope exchanged between the orchestrator and its
//!   logical agents (§4.4.1)
//! - Error types
//! - Trait seams implemented by `interview-llm` (LLM backends) and
//!   `interview-persistence` (repositories, object storage)

pub mod answer;
pub mod api;
pub mod company;
pub mod envelope;
pub mod error;
pub mod persona;
pub mod question;
pub mod role;
pub mod session;
pub mod traits;
pub mod turn_state;

pub use answer::{AnswerRecord, Answerer};
pub use company::CompanyProfile;
pub use envelope::{AgentKind, Content, ContentType, Envelope, Metadata, Metrics};
pub use error::{Error, Result};
pub use persona::{AICandidatePersona, Background};
pub use question::{
    IndividualQuestions, PendingQuestion, QAEntry, QuestionKind, QuestionRecord,
};
pub use role::Role;
pub use session::SessionState;
pub use turn_state::InterviewerTurnState;
