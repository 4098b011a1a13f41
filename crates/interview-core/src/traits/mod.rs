//! Trait seams implemented by other crates in the workspace.
//!
//! # Trait Hierarchy
//!
//! ```text
//! LLM:
//!   - LlmBackend: prompted text generation (interview-llm)
//!
//! Persistence (interview-persistence):
//!   - CompanyRepository, ResumeRepository, InterviewRepository,
//!     MediaRepository, GazeRepository
//!
//! Object storage (interview-persistence):
//!   - ObjectStore
//!
//! External collaborators (interview-persistence):
//!   - EvaluationClient, GazeAnalyzer
//! ```

mod evaluation;
mod llm;
mod object_store;
mod repository;

pub use evaluation::{
    EvaluationClient, EvaluationError, EvaluationOutcome, GazeAnalysisOutcome, GazeAnalyzer,
    GazeError, PresignedGazeTask,
};
pub use llm::{ChatMessage, ChatRole, FinishReason, GenerationResult, LlmBackend, LlmError};
pub use object_store::{keys, ObjectStore, ObjectStoreError};
pub use repository::{
    AiResumeRecord, GazeAnalysisRecord, HistoryDetailRecord, InterviewRecord, InterviewRepository,
    MediaFileRecord, MediaRepository, RepositoryError, ResumeRepository, CompanyRepository,
    GazeRepository, UserResumeRecord,
};
