//! Logical request/response shapes for the Orchestrator ⇄ Adapter interface
//! (§6.1). Transport-agnostic: the thin HTTP adapter in `interview-server`
//! serializes these directly as JSON.

use serde::{Deserialize, Serialize};

use crate::question::QAEntry;
use crate::role::Role;

#[derive(Debug, Clone, Deserialize)]
pub struct StartInterviewRequest {
    pub company: String,
    pub position: String,
    pub candidate_name: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub posting_id: Option<String>,
    #[serde(default)]
    pub user_resume_id: Option<String>,
    #[serde(default)]
    pub calibration_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiMetadata {
    pub resume_id: Option<String>,
}

/// The AI candidate's own answer-side metadata, distinct from
/// `turn_info.ai_metadata` (§6.1: `ai_answer:{metadata:{ai_resume_id}}`).
#[derive(Debug, Clone, Serialize)]
pub struct AiAnswerMetadata {
    pub ai_resume_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiAnswerContent {
    pub metadata: AiAnswerMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionMetadata {
    pub ai_resume_id: Option<String>,
    pub interviewer_type: Option<Role>,
    pub question_type: &'static str,
    pub turn_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionContent {
    pub question: String,
    pub metadata: QuestionMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnInfo {
    pub current_turn: u32,
    pub is_user_turn: bool,
    pub next_action: &'static str,
    pub ai_metadata: AiMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartInterviewResponse {
    pub session_id: String,
    pub intro_message: String,
    pub first_question: String,
    pub content: QuestionContent,
    pub ai_resume_id: Option<String>,
    pub ai_answer: AiAnswerContent,
    pub turn_info: TurnInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
}

/// `SubmitAnswer` response: either still waiting on the user, or the
/// interview has completed (§6.1).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnResponse {
    WaitingForUser {
        session_id: String,
        content: QuestionContent,
        /// The AI candidate's own individualized follow-up text, present
        /// only when the current turn is an `IndividualQuestions` pair.
        #[serde(skip_serializing_if = "Option::is_none")]
        ai_question: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ai_answer: Option<AiAnswerContent>,
        #[serde(skip_serializing_if = "Option::is_none")]
        intro_message: Option<String>,
        turn_info: TurnInfo,
    },
    Completed {
        session_id: String,
        qa_history: Vec<QAEntry>,
        turn_info: TurnInfo,
    },
}
