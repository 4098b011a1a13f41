//! Per-interviewer turn bookkeeping (§3.1, §4.3.1, §4.4.6).

use serde::{Deserialize, Serialize};

/// Per-role counters tracking whether the role's main question has been
/// asked and how many follow-ups it has used. Invariant 3.2.3:
/// `follow_up_count <= 2` at all times.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterviewerTurnState {
    pub main_question_asked: bool,
    pub follow_up_count: u8,
}

impl InterviewerTurnState {
    pub const MAX_FOLLOW_UPS: u8 = 2;

    pub fn reset(&mut self) {
        self.main_question_asked = false;
        self.follow_up_count = 0;
    }

    pub fn has_follow_up_budget(&self) -> bool {
        self.follow_up_count < Self::MAX_FOLLOW_UPS
    }
}
