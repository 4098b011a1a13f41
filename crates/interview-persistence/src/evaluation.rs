//! Deterministic stand-ins for the two externally-specified services (§1):
//! the ML/LLM evaluator and the gaze-analysis engine. Neither has an
//! algorithm in scope here — only the interface and the two gaze-linkage
//! paths §4.5 step 3 distinguishes matter, so these implementations just
//! return plausible canned scores.

use std::collections::HashMap;

use async_trait::async_trait;
use interview_core::traits::{
    EvaluationClient, EvaluationError, EvaluationOutcome, GazeAnalyzer, GazeAnalysisOutcome,
    GazeError, PresignedGazeTask,
};
use parking_lot::RwLock;

use crate::repository::InMemoryInterviewRepository;

#[derive(Default)]
pub struct MockEvaluationClient {
    plans_generated: RwLock<Vec<String>>,
}

impl MockEvaluationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan_was_generated_for(&self, interview_id: &str) -> bool {
        self.plans_generated.read().iter().any(|id| id == interview_id)
    }
}

#[async_trait]
impl EvaluationClient for MockEvaluationClient {
    async fn evaluate(
        &self,
        user_qa: &[interview_core::question::QAEntry],
        ai_qa: &[interview_core::question::QAEntry],
    ) -> Result<EvaluationOutcome, EvaluationError> {
        // No real model here; a stable score derived from answer length is
        // enough to exercise callers without faking precision we don't have.
        let score_for = |entries: &[interview_core::question::QAEntry]| {
            if entries.is_empty() {
                return 0.0;
            }
            let total: usize = entries.iter().map(|e| e.answer_content.len()).sum();
            (total as f64 / entries.len() as f64).min(100.0)
        };

        Ok(EvaluationOutcome {
            interview_id: String::new(),
            user_score: score_for(user_qa),
            ai_score: score_for(ai_qa),
        })
    }

    async fn generate_improvement_plan(&self, interview_id: &str) -> Result<(), EvaluationError> {
        self.plans_generated.write().push(interview_id.to_string());
        Ok(())
    }
}

impl InMemoryInterviewRepository {
    /// Convenience for tests wiring an evaluation step against a stored
    /// interview's history.
    pub fn qa_for_evaluation(
        &self,
        interview_id: &str,
    ) -> Vec<interview_core::question::QAEntry> {
        self.history_for(interview_id).into_iter().map(|d| d.qa).collect()
    }
}

/// Always analyzes synchronously and never has a pending pre-signed task,
/// exercising the temp-file linkage path (§4.5 step 3a) by default.
#[derive(Default)]
pub struct MockGazeAnalyzer {
    presigned_tasks: RwLock<HashMap<String, PresignedGazeTask>>,
}

impl MockGazeAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a completed pre-signed-URL task for `find_completed_task`
    /// to return, exercising the other linkage path (§4.5 step 3b).
    pub fn register_presigned_task(&self, task: PresignedGazeTask) {
        self.presigned_tasks.write().insert(task.session_id.clone(), task);
    }
}

#[async_trait]
impl GazeAnalyzer for MockGazeAnalyzer {
    async fn analyze(&self, s3_key: &str) -> Result<GazeAnalysisOutcome, GazeError> {
        if s3_key.is_empty() {
            return Err(GazeError::Backend("empty object key".to_string()));
        }
        Ok(GazeAnalysisOutcome {
            gaze_score: 0.82,
            jitter_score: 0.11,
            compliance_score: 0.95,
            stability_rating: "stable".to_string(),
        })
    }

    async fn find_completed_task(
        &self,
        session_id: &str,
    ) -> Result<Option<PresignedGazeTask>, GazeError> {
        Ok(self.presigned_tasks.read().get(session_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn evaluate_scores_both_sides_from_answer_length() {
        let client = MockEvaluationClient::new();
        let entry = |content: &str| interview_core::question::QAEntry {
            question_id: 1,
            question_content: "q".to_string(),
            question_intent: "probe depth".to_string(),
            interviewer_role: Some(interview_core::role::Role::Tech),
            answerer: interview_core::answer::Answerer::User,
            answer_content: content.to_string(),
            duration_seconds: Some(10.0),
        };

        let outcome = client.evaluate(&[entry("a longer answer")], &[entry("short")]).await.unwrap();
        assert!(outcome.user_score > outcome.ai_score);
    }

    #[tokio::test]
    async fn improvement_plan_is_recorded_once_generated() {
        let client = MockEvaluationClient::new();
        assert!(!client.plan_was_generated_for("i1"));
        client.generate_improvement_plan("i1").await.unwrap();
        assert!(client.plan_was_generated_for("i1"));
    }

    #[tokio::test]
    async fn analyze_rejects_empty_key() {
        let analyzer = MockGazeAnalyzer::new();
        assert!(analyzer.analyze("").await.is_err());
        assert!(analyzer.analyze("temp_gaze/s1.mp4").await.is_ok());
    }

    #[tokio::test]
    async fn find_completed_task_reflects_registration() {
        let analyzer = MockGazeAnalyzer::new();
        assert!(analyzer.find_completed_task("s1").await.unwrap().is_none());

        analyzer.register_presigned_task(PresignedGazeTask {
            session_id: "s1".to_string(),
            s3_key: "post_interview_gaze/s1/result.json".to_string(),
            outcome: GazeAnalysisOutcome {
                gaze_score: 0.5,
                jitter_score: 0.2,
                compliance_score: 0.9,
                stability_rating: "stable".to_string(),
            },
        });

        assert!(analyzer.find_completed_task("s1").await.unwrap().is_some());
    }
}
