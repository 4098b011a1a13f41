//! The external evaluation service and gaze-analysis engine, specified only
//! at their interface (§1, §4.5 step 2-3).

use async_trait::async_trait;
use thiserror::Error;

use crate::question::QAEntry;

#[derive(Error, Debug, Clone)]
pub enum EvaluationError {
    #[error("evaluation backend error: {0}")]
    Backend(String),
}

/// Result of scoring a completed interview's user/AI answer sets.
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub interview_id: String,
    pub user_score: f64,
    pub ai_score: f64,
}

/// The candidate's ML/LLM evaluator: scores a batch of question/answer
/// pairs and returns a single interview record (§1, §4.5 step 2).
#[async_trait]
pub trait EvaluationClient: Send + Sync {
    async fn evaluate(
        &self,
        user_qa: &[QAEntry],
        ai_qa: &[QAEntry],
    ) -> Result<EvaluationOutcome, EvaluationError>;

    /// Attaches improvement plans to an already-scored interview
    /// (§4.5 step 3c).
    async fn generate_improvement_plan(&self, interview_id: &str) -> Result<(), EvaluationError>;
}

#[derive(Error, Debug, Clone)]
pub enum GazeError {
    #[error("gaze analysis backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone)]
pub struct GazeAnalysisOutcome {
    pub gaze_score: f64,
    pub jitter_score: f64,
    pub compliance_score: f64,
    pub stability_rating: String,
}

/// A previously completed gaze-analysis task, looked up by `session_id` in
/// the gaze subsystem's own task registry (§4.5 step 3b, the "pre-signed
/// URL path").
#[derive(Debug, Clone)]
pub struct PresignedGazeTask {
    pub session_id: String,
    pub s3_key: String,
    pub outcome: GazeAnalysisOutcome,
}

/// The separate gaze-analysis engine: consumes object-store keys, produces
/// scored artifacts (§1). The core only links its output to interviews.
#[async_trait]
pub trait GazeAnalyzer: Send + Sync {
    /// Synchronously analyzes a just-uploaded object (temp-file path,
    /// §4.5 step 3a).
    async fn analyze(&self, s3_key: &str) -> Result<GazeAnalysisOutcome, GazeError>;

    /// Looks up a completed task keyed by `session_id` (pre-signed-URL
    /// path, §4.5 step 3b).
    async fn find_completed_task(
        &self,
        session_id: &str,
    ) -> Result<Option<PresignedGazeTask>, GazeError>;
}
