//! The plan selector: `next_kind` implements §4.3.1's five ordered rules.
//!
//! The selector is invoked only when `current_question` is `None`. Rule 4's
//! rotation step both reads and mutates `SessionState` (resetting the
//! departing role's turn state, advancing `current_interviewer`), so unlike
//! a pure decision function it takes `&mut SessionState` and applies its own
//! bookkeeping directly — the orchestrator does not need a second pass to
//! commit the rotation.

use interview_core::question::QuestionKind;
use interview_core::role::Role;
use interview_core::session::SessionState;
use interview_core::turn_state::InterviewerTurnState;

/// Decides the next `QuestionKind` for `session`, per §4.3.1.
///
/// Open Question resolution (recorded in DESIGN.md): the fixed intro and
/// motivation turns count toward `total_question_limit`, and the end-of-
/// interview comparison is `>=`, not `>`.
pub fn next_kind(session: &mut SessionState) -> QuestionKind {
    if session.turn_count == 0 {
        return QuestionKind::IntroFixed;
    }
    if session.turn_count == 1 {
        return QuestionKind::MotivationFixed;
    }
    if session.turn_count >= session.total_question_limit {
        return QuestionKind::EndOfInterview;
    }

    // Rule 4's rotation can visit each role at most once before returning to
    // the role it started from (every visited role's turn state is reset on
    // the way out), so this loop always terminates within `Role::ROTATION`'s
    // length. Nothing in the loop body mutates `turn_count` — only
    // `advance_turn`, called after `next_kind` returns, does — so the guard
    // above already covers every iteration; no re-check is needed here.
    for _ in 0..Role::ROTATION.len() {
        let role = session.current_interviewer;
        let state = session.turn_state(role);

        if !state.main_question_asked {
            return QuestionKind::RoleMain(role.into());
        }

        if state.follow_up_count < InterviewerTurnState::MAX_FOLLOW_UPS
            && last_two_share_question_id(session)
        {
            return QuestionKind::RoleFollowUpIndividual(role.into());
        }

        session.turn_state_mut(role).reset();
        session.current_interviewer = role.next();
    }

    // Unreachable under the invariant above, but returning EndOfInterview
    // rather than panicking keeps the selector infallible if that invariant
    // is ever violated by a future change.
    QuestionKind::EndOfInterview
}

/// True when the last two `qa_history` entries answer the same question —
/// i.e. both the user and the AI have now answered the current main
/// question, which is the individualized-follow-up trigger condition.
fn last_two_share_question_id(session: &SessionState) -> bool {
    let len = session.qa_history.len();
    if len < 2 {
        return false;
    }
    session.qa_history[len - 1].question_id == session.qa_history[len - 2].question_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_core::answer::Answerer;
    use interview_core::persona::AICandidatePersona;
    use interview_core::question::QAEntry;

    fn session() -> SessionState {
        SessionState::new(
            "s1",
            "naver",
            "backend",
            "Alice",
            AICandidatePersona::default_for("naver", "backend"),
            15,
        )
    }

    fn qa(question_id: u64, answerer: Answerer) -> QAEntry {
        QAEntry {
            question_id,
            question_content: "q".to_string(),
            question_intent: "i".to_string(),
            interviewer_role: Some(Role::Hr),
            answerer,
            answer_content: "a".to_string(),
            duration_seconds: None,
        }
    }

    #[test]
    fn turn_zero_is_intro() {
        let mut s = session();
        assert_eq!(next_kind(&mut s), QuestionKind::IntroFixed);
    }

    #[test]
    fn turn_one_is_motivation() {
        let mut s = session();
        s.turn_count = 1;
        assert_eq!(next_kind(&mut s), QuestionKind::MotivationFixed);
    }

    #[test]
    fn at_or_past_limit_ends_interview() {
        let mut s = session();
        s.turn_count = 15;
        assert_eq!(next_kind(&mut s), QuestionKind::EndOfInterview);

        let mut s2 = session();
        s2.turn_count = 16;
        assert_eq!(next_kind(&mut s2), QuestionKind::EndOfInterview);
    }

    #[test]
    fn first_turn_for_a_role_is_main() {
        let mut s = session();
        s.turn_count = 2;
        assert_eq!(next_kind(&mut s), QuestionKind::RoleMain(Role::Hr.into()));
    }

    #[test]
    fn paired_answers_to_main_trigger_individual_follow_up() {
        let mut s = session();
        s.turn_count = 3;
        s.turn_state_mut(Role::Hr).main_question_asked = true;
        s.qa_history.push(qa(10, Answerer::User));
        s.qa_history.push(qa(10, Answerer::Ai));

        assert_eq!(
            next_kind(&mut s),
            QuestionKind::RoleFollowUpIndividual(Role::Hr.into())
        );
    }

    #[test]
    fn exhausted_follow_up_budget_rotates_to_next_role() {
        let mut s = session();
        s.turn_count = 3;
        s.turn_state_mut(Role::Hr).main_question_asked = true;
        s.turn_state_mut(Role::Hr).follow_up_count = InterviewerTurnState::MAX_FOLLOW_UPS;
        s.qa_history.push(qa(10, Answerer::User));
        s.qa_history.push(qa(10, Answerer::Ai));

        let kind = next_kind(&mut s);

        assert_eq!(kind, QuestionKind::RoleMain(Role::Tech.into()));
        assert_eq!(s.current_interviewer, Role::Tech);
        assert!(!s.turn_state(Role::Hr).main_question_asked);
    }

    #[test]
    fn no_paired_answer_with_asked_main_rotates_without_follow_up() {
        let mut s = session();
        s.turn_count = 3;
        s.turn_state_mut(Role::Hr).main_question_asked = true;
        // Last two entries don't share a question id, so the individual
        // follow-up condition is not met and rule 4 rotates instead.
        s.qa_history.push(qa(9, Answerer::User));
        s.qa_history.push(qa(10, Answerer::User));

        let kind = next_kind(&mut s);

        assert_eq!(kind, QuestionKind::RoleMain(Role::Tech.into()));
    }
}
