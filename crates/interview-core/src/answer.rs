//! Answer types (§3.1).

use serde::{Deserialize, Serialize};

/// Who answered a given question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answerer {
    User,
    Ai,
}

impl Answerer {
    pub fn other(self) -> Answerer {
        match self {
            Answerer::User => Answerer::Ai,
            Answerer::Ai => Answerer::User,
        }
    }
}

/// One submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u64,
    pub answerer: Answerer,
    pub content: String,
    pub duration_seconds: Option<f64>,
}
