//! The authoritative session record (§3.1, §3.2, §3.3).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::persona::AICandidatePersona;
use crate::question::{PendingQuestion, QAEntry};
use crate::role::Role;
use crate::turn_state::InterviewerTurnState;

/// Default per spec.md §4.5 step 3 / §6.4.
pub const DEFAULT_TOTAL_QUESTION_LIMIT: u32 = 15;

/// The authoritative, in-memory session record. Owned by its `Orchestrator`
/// (invariant: mutated only from within the orchestrator's own task, §4.4.2).
#[derive(Debug)]
pub struct SessionState {
    // identity
    pub session_id: String,
    pub company_id: String,
    pub position: String,
    pub user_name: String,
    pub user_id: Option<String>,
    pub posting_id: Option<String>,
    pub user_resume_id: Option<String>,
    pub ai_resume_id: Option<String>,

    // config
    pub total_question_limit: u32,

    // progress
    pub turn_count: u32,
    pub current_interviewer: Role,
    pub current_question: Option<PendingQuestion>,
    pub interviewer_turn_state: HashMap<Role, InterviewerTurnState>,

    // history
    pub qa_history: Vec<QAEntry>,
    pub intro_message: Option<String>,

    // participants
    pub ai_persona: AICandidatePersona,

    // temporal
    pub start_time: Instant,
    pub is_completed: bool,

    /// Fatal-error marker (§7 point 6): the session is not completed but
    /// carries a sticky error the caller may retry past.
    pub error: Option<String>,

    /// Consecutive question-generation attempts that fell back because the
    /// LLM call itself errored (§7 point 2), reset on any clean success.
    /// Crosses `interview-orchestrator`'s persistent-outage threshold into
    /// `Error::UpstreamUnavailable`.
    pub consecutive_llm_failures: u32,

    /// Out-of-band artifact forwarded to the gaze pipeline untouched.
    pub calibration_data: Option<serde_json::Value>,

    /// At-most-once guard for the background feedback pipeline (§9).
    feedback_triggered: AtomicBool,
}

impl SessionState {
    pub fn new(
        session_id: impl Into<String>,
        company_id: impl Into<String>,
        position: impl Into<String>,
        user_name: impl Into<String>,
        ai_persona: AICandidatePersona,
        total_question_limit: u32,
    ) -> Self {
        let mut interviewer_turn_state = HashMap::new();
        for role in Role::ROTATION {
            interviewer_turn_state.insert(role, InterviewerTurnState::default());
        }

        Self {
            session_id: session_id.into(),
            company_id: company_id.into(),
            position: position.into(),
            user_name: user_name.into(),
            user_id: None,
            posting_id: None,
            user_resume_id: None,
            ai_resume_id: ai_persona.resume_id.clone(),
            total_question_limit,
            turn_count: 0,
            current_interviewer: Role::Hr,
            current_question: None,
            interviewer_turn_state,
            qa_history: Vec::new(),
            intro_message: None,
            ai_persona,
            start_time: Instant::now(),
            is_completed: false,
            error: None,
            consecutive_llm_failures: 0,
            calibration_data: None,
            feedback_triggered: AtomicBool::new(false),
        }
    }

    /// Marks the feedback pipeline as triggered, returning `true` the first
    /// time (so the caller knows it actually won the race) and `false` on
    /// every subsequent call. This is what guarantees "at most once"
    /// execution for `trigger_feedback_for_session` (§4.5, §8).
    pub fn try_mark_feedback_triggered(&self) -> bool {
        self.feedback_triggered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn feedback_triggered(&self) -> bool {
        self.feedback_triggered.load(Ordering::SeqCst)
    }

    pub fn turn_state(&self, role: Role) -> InterviewerTurnState {
        self.interviewer_turn_state
            .get(&role)
            .copied()
            .unwrap_or_default()
    }

    pub fn turn_state_mut(&mut self, role: Role) -> &mut InterviewerTurnState {
        self.interviewer_turn_state.entry(role).or_default()
    }

    /// A read-only, serializable snapshot of the fields the post-interview
    /// pipeline needs, taken at completion time (§5: "completion-time
    /// `qa_history` is a consistent snapshot read by the feedback task").
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            company_id: self.company_id.clone(),
            position: self.position.clone(),
            user_id: self.user_id.clone(),
            posting_id: self.posting_id.clone(),
            ai_resume_id: self.ai_resume_id.clone(),
            qa_history: self.qa_history.clone(),
            calibration_data: self.calibration_data.clone(),
        }
    }
}

/// Pass-by-value snapshot handed to the background feedback/gaze pipeline,
/// decoupling it from the live `SessionState` the orchestrator keeps
/// mutating (§5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub company_id: String,
    pub position: String,
    pub user_id: Option<String>,
    pub posting_id: Option<String>,
    pub ai_resume_id: Option<String>,
    pub qa_history: Vec<QAEntry>,
    pub calibration_data: Option<serde_json::Value>,
}

impl SessionSnapshot {
    /// Splits `qa_history` into the user-only and AI-only answer sets the
    /// external evaluation service expects (§4.5 step 1).
    pub fn split_by_answerer(&self) -> (Vec<&QAEntry>, Vec<&QAEntry>) {
        let user: Vec<&QAEntry> = self
            .qa_history
            .iter()
            .filter(|e| e.answerer == crate::answer::Answerer::User)
            .collect();
        let ai: Vec<&QAEntry> = self
            .qa_history
            .iter()
            .filter(|e| e.answerer == crate::answer::Answerer::Ai)
            .collect();
        (user, ai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona() -> AICandidatePersona {
        AICandidatePersona::default_for("naver", "backend")
    }

    #[test]
    fn feedback_triggers_exactly_once() {
        let session = SessionState::new(
            "s1",
            "naver",
            "backend",
            "Alice",
            persona(),
            DEFAULT_TOTAL_QUESTION_LIMIT,
        );

        assert!(session.try_mark_feedback_triggered());
        assert!(!session.try_mark_feedback_triggered());
        assert!(!session.try_mark_feedback_triggered());
    }

    #[test]
    fn new_session_has_zeroed_turn_state() {
        let session = SessionState::new(
            "s1",
            "naver",
            "backend",
            "Alice",
            persona(),
            DEFAULT_TOTAL_QUESTION_LIMIT,
        );
        assert_eq!(session.turn_count, 0);
        assert!(session.current_question.is_none());
        for role in Role::ROTATION {
            let state = session.turn_state(role);
            assert!(!state.main_question_asked);
            assert_eq!(state.follow_up_count, 0);
        }
    }
}
