//! Question types (§3.1) and the `current_question | current_questions`
//! sum type called for by the REDESIGN FLAGS in §9.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Tagged variant describing what kind of question comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    IntroFixed,
    MotivationFixed,
    RoleMain(RoleKind),
    RoleFollowUpCommon(RoleKind),
    RoleFollowUpIndividual(RoleKind),
    EndOfInterview,
}

/// Newtype wrapper so `QuestionKind`'s serde tag carries a plain `role`
/// field rather than nesting another object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleKind {
    pub role: Role,
}

impl From<Role> for RoleKind {
    fn from(role: Role) -> Self {
        RoleKind { role }
    }
}

impl QuestionKind {
    pub fn is_fixed(&self) -> bool {
        matches!(self, QuestionKind::IntroFixed | QuestionKind::MotivationFixed)
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            QuestionKind::RoleMain(r)
            | QuestionKind::RoleFollowUpCommon(r)
            | QuestionKind::RoleFollowUpIndividual(r) => Some(r.role),
            _ => None,
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self, QuestionKind::RoleMain(_) | QuestionKind::IntroFixed | QuestionKind::MotivationFixed)
    }

    pub fn is_follow_up(&self) -> bool {
        matches!(
            self,
            QuestionKind::RoleFollowUpCommon(_) | QuestionKind::RoleFollowUpIndividual(_)
        )
    }
}

/// One generated question (append-only, never mutated after creation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u64,
    pub kind: QuestionKind,
    pub content: String,
    pub intent: String,
    pub interviewer_role: Option<Role>,
    pub is_fixed: bool,
    pub time_limit_seconds: u32,
}

impl QuestionRecord {
    pub const DEFAULT_TIME_LIMIT_SECONDS: u32 = 120;
}

/// A pair of distinct, individualized follow-up questions (§4.3.2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualQuestions {
    pub user_question: QuestionRecord,
    pub ai_question: QuestionRecord,
    pub is_individual: bool,
    pub interviewer_type: Role,
}

/// Sum type replacing the `current_question | current_questions` either-or
/// pair from the source system (§9 REDESIGN FLAGS): a session has either one
/// pending question shared by both answerers, a pair of individualized
/// follow-ups, or nothing pending (invariant 3.2.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PendingQuestion {
    Single(QuestionRecord),
    Individual(IndividualQuestions),
}

impl PendingQuestion {
    /// The question id the next answer from `answerer` should be recorded
    /// against.
    pub fn question_id_for(&self, answerer: crate::answer::Answerer) -> u64 {
        match self {
            PendingQuestion::Single(q) => q.id,
            PendingQuestion::Individual(pair) => match answerer {
                crate::answer::Answerer::User => pair.user_question.id,
                crate::answer::Answerer::Ai => pair.ai_question.id,
            },
        }
    }

    pub fn is_individual(&self) -> bool {
        matches!(self, PendingQuestion::Individual(_))
    }
}

/// One (question, answer) pair as stored in `qa_history`; each question
/// appears twice, once per answerer, per invariant 3.2.2.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QAEntry {
    pub question_id: u64,
    pub question_content: String,
    pub question_intent: String,
    pub interviewer_role: Option<Role>,
    pub answerer: crate::answer::Answerer,
    pub answer_content: String,
    pub duration_seconds: Option<f64>,
}
