//! The generator: turns a `QuestionKind` into question text via the LLM,
//! with sanitization and deterministic fallback semantics (§4.3.3, §4.3.4).

use interview_core::company::CompanyProfile;
use interview_core::persona::AICandidatePersona;
use interview_core::question::{IndividualQuestions, PendingQuestion, QuestionKind, QuestionRecord};
use interview_core::role::Role;
use interview_core::session::SessionState;
use interview_core::traits::{ChatMessage, LlmBackend};
use interview_config::prompts;

/// Turn ids are derived from `turn_count` rather than a separate counter:
/// `base(turn_count)` for a single question, `base(turn_count) + 1` for the
/// paired AI follow-up in an individualized turn. `turn_count` only ever
/// increases across a session, so this stays globally unique without the
/// orchestrator needing to thread an id allocator through.
fn base_id(turn_count: u32) -> u64 {
    turn_count as u64 * 2
}

/// A produced question plus whether producing it required falling back
/// because the LLM call itself errored (§7 taxonomy point 2: transient
/// upstream failure), as distinct from a clean success or a semantic
/// fallback (malformed-but-received output, taxonomy point 3). Only the
/// former counts toward the orchestrator's persistent-outage tracking —
/// see `interview-orchestrator::generate_with_retry`.
pub struct Generated {
    pub pending: PendingQuestion,
    pub llm_unavailable: bool,
}

impl Generated {
    fn ok(pending: PendingQuestion) -> Self {
        Self { pending, llm_unavailable: false }
    }
}

/// Produces the pending question for `kind`. Returns `None` for
/// `QuestionKind::EndOfInterview`, which carries no question of its own —
/// callers should have already special-cased it before calling `generate`.
pub async fn generate(
    kind: QuestionKind,
    session: &SessionState,
    company: &CompanyProfile,
    persona: &AICandidatePersona,
    llm: &dyn LlmBackend,
) -> Option<Generated> {
    match kind {
        QuestionKind::EndOfInterview => None,
        QuestionKind::IntroFixed => Some(Generated::ok(PendingQuestion::Single(QuestionRecord {
            id: base_id(session.turn_count),
            kind,
            content: prompts::INTRO_QUESTION_TEXT.to_string(),
            intent: "Warm up and let the candidate introduce themself.".to_string(),
            interviewer_role: None,
            is_fixed: true,
            time_limit_seconds: QuestionRecord::DEFAULT_TIME_LIMIT_SECONDS,
        }))),
        QuestionKind::MotivationFixed => Some(Generated::ok(PendingQuestion::Single(QuestionRecord {
            id: base_id(session.turn_count),
            kind,
            content: prompts::motivation_question_text(&company.display_name),
            intent: "Gauge genuine interest in the company.".to_string(),
            interviewer_role: None,
            is_fixed: true,
            time_limit_seconds: QuestionRecord::DEFAULT_TIME_LIMIT_SECONDS,
        }))),
        QuestionKind::RoleMain(role_kind) => {
            let (record, llm_unavailable) = generate_single(
                kind,
                role_kind.role,
                session,
                company,
                persona,
                llm,
                prompts::main_question_directive(role_kind.role),
            )
            .await;
            Some(Generated { pending: PendingQuestion::Single(record), llm_unavailable })
        }
        QuestionKind::RoleFollowUpCommon(role_kind) => {
            let (record, llm_unavailable) = generate_single(
                kind,
                role_kind.role,
                session,
                company,
                persona,
                llm,
                prompts::common_follow_up_directive(role_kind.role),
            )
            .await;
            Some(Generated { pending: PendingQuestion::Single(record), llm_unavailable })
        }
        QuestionKind::RoleFollowUpIndividual(role_kind) => {
            let (pending, llm_unavailable) = generate_individual(role_kind.role, session, company, persona, llm).await;
            Some(Generated { pending, llm_unavailable })
        }
    }
}

async fn generate_single(
    kind: QuestionKind,
    role: Role,
    session: &SessionState,
    company: &CompanyProfile,
    persona: &AICandidatePersona,
    llm: &dyn LlmBackend,
    directive: String,
) -> (QuestionRecord, bool) {
    let messages = vec![
        ChatMessage::system(prompts::interviewer_system_prompt(company, role)),
        ChatMessage::user(prompts::interviewer_user_prompt(
            company,
            persona,
            &recent_context(session),
            &directive,
        )),
    ];

    match llm.generate(&messages).await {
        Ok(result) => {
            let (content, intent) = parse_and_sanitize(&result.text);
            let record = QuestionRecord {
                id: base_id(session.turn_count),
                kind,
                content,
                intent,
                interviewer_role: Some(role),
                is_fixed: false,
                time_limit_seconds: QuestionRecord::DEFAULT_TIME_LIMIT_SECONDS,
            };
            (record, false)
        }
        Err(err) => {
            tracing::warn!(error = %err, ?role, "question generation failed, using fallback question");
            (fallback_question(kind, role, session.turn_count), true)
        }
    }
}

async fn generate_individual(
    role: Role,
    session: &SessionState,
    company: &CompanyProfile,
    persona: &AICandidatePersona,
    llm: &dyn LlmBackend,
) -> (PendingQuestion, bool) {
    let messages = vec![
        ChatMessage::system(prompts::interviewer_system_prompt(company, role)),
        ChatMessage::user(prompts::interviewer_user_prompt(
            company,
            persona,
            &recent_context(session),
            &prompts::individual_follow_up_directive(role),
        )),
    ];

    let kind = QuestionKind::RoleFollowUpIndividual(role.into());
    let base = base_id(session.turn_count);

    match llm.generate(&messages).await {
        Ok(result) => match split_individual(&result.text) {
            Some((user_text, ai_text)) => {
                let (user_content, user_intent) = parse_and_sanitize(&user_text);
                let (ai_content, ai_intent) = parse_and_sanitize(&ai_text);
                let pending = PendingQuestion::Individual(IndividualQuestions {
                    user_question: QuestionRecord {
                        id: base,
                        kind,
                        content: user_content,
                        intent: user_intent,
                        interviewer_role: Some(role),
                        is_fixed: false,
                        time_limit_seconds: QuestionRecord::DEFAULT_TIME_LIMIT_SECONDS,
                    },
                    ai_question: QuestionRecord {
                        id: base + 1,
                        kind,
                        content: ai_content,
                        intent: ai_intent,
                        interviewer_role: Some(role),
                        is_fixed: false,
                        time_limit_seconds: QuestionRecord::DEFAULT_TIME_LIMIT_SECONDS,
                    },
                    is_individual: true,
                    interviewer_type: role,
                });
                (pending, false)
            }
            None => {
                // The LLM responded; the output just didn't parse. A
                // semantic fallback (§7 point 3), not an upstream failure —
                // it doesn't count toward the persistent-outage tracker.
                tracing::warn!(?role, "individualized follow-up output was malformed, falling back to a common follow-up");
                let common_kind = QuestionKind::RoleFollowUpCommon(role.into());
                (PendingQuestion::Single(fallback_question(common_kind, role, session.turn_count)), false)
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, ?role, "individualized follow-up generation failed, falling back to a common follow-up");
            let common_kind = QuestionKind::RoleFollowUpCommon(role.into());
            (PendingQuestion::Single(fallback_question(common_kind, role, session.turn_count)), true)
        }
    }
}

/// Splits a two-question completion on the individual-follow-up marker;
/// `None` if the marker is missing (malformed output → caller falls back).
fn split_individual(text: &str) -> Option<(String, String)> {
    let (user_part, ai_part) = text.split_once(prompts::INDIVIDUAL_SPLIT_MARKER)?;
    if user_part.trim().is_empty() || ai_part.trim().is_empty() {
        return None;
    }
    Some((user_part.to_string(), ai_part.to_string()))
}

/// Splits on the `intent:` delimiter, sanitizes control characters, strips
/// markdown emphasis/heading markers, and collapses newlines (§4.3.3).
fn parse_and_sanitize(raw: &str) -> (String, String) {
    let (content_part, intent_part) = match raw.to_lowercase().find(prompts::INTENT_DELIMITER) {
        Some(idx) => (&raw[..idx], &raw[idx + prompts::INTENT_DELIMITER.len()..]),
        None => (raw, ""),
    };

    (sanitize(content_part), sanitize(intent_part))
}

fn sanitize(text: &str) -> String {
    let no_control: String = text.chars().filter(|c| !c.is_control() || *c == ' ').collect();
    let no_markdown = no_control
        .replace(['*', '#', '`', '_'], "")
        .trim()
        .to_string();
    no_markdown.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Last 2-3 `qa_history` entries rendered as plain text context.
fn recent_context(session: &SessionState) -> String {
    session
        .qa_history
        .iter()
        .rev()
        .take(3)
        .rev()
        .map(|entry| format!("Q: {}\nA: {}", entry.question_content, entry.answer_content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deterministic fallback question bank, keyed on `(role, turn_count)` so
/// repeated fallbacks within a test run are reproducible and never return an
/// empty string (§4.3.4, §8 boundary behaviors).
fn fallback_question(kind: QuestionKind, role: Role, turn_count: u32) -> QuestionRecord {
    let bank: [&str; 3] = match role {
        Role::Hr => [
            "Tell me about a time you handled conflict on a team.",
            "What motivates you day to day at work?",
            "How do you prioritize when everything feels urgent?",
        ],
        Role::Tech => [
            "Walk me through a system you designed end to end.",
            "How would you debug a service that's suddenly slow?",
            "What trade-offs do you consider when choosing a data store?",
        ],
        Role::Collaboration => [
            "Describe a disagreement with a teammate and how you resolved it.",
            "How do you keep a cross-functional project on track?",
            "Tell me about giving feedback that was hard to deliver.",
        ],
    };
    let content = bank[(turn_count as usize) % bank.len()].to_string();

    QuestionRecord {
        id: base_id(turn_count),
        kind,
        content,
        intent: "Fallback question used after a generation failure.".to_string(),
        interviewer_role: Some(role),
        is_fixed: false,
        time_limit_seconds: QuestionRecord::DEFAULT_TIME_LIMIT_SECONDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_question_is_never_empty() {
        for role in Role::ROTATION {
            for turn in 0..10u32 {
                let q = fallback_question(QuestionKind::RoleMain(role.into()), role, turn);
                assert!(!q.content.trim().is_empty());
            }
        }
    }

    #[test]
    fn sanitize_strips_markdown_and_collapses_whitespace() {
        assert_eq!(sanitize("**bold**   text\n\nhere"), "bold text here");
    }

    #[test]
    fn parse_and_sanitize_splits_on_intent_delimiter() {
        let (content, intent) = parse_and_sanitize("What is your approach?\nintent: probe for depth");
        assert_eq!(content, "What is your approach?");
        assert_eq!(intent, "probe for depth");
    }

    #[test]
    fn split_individual_requires_marker_and_both_halves() {
        assert!(split_individual("only one question").is_none());
        assert!(split_individual("first\n---AI---\n").is_none());
        assert!(split_individual("first\n---AI---\nsecond").is_some());
    }

    #[tokio::test]
    async fn individual_follow_up_falls_back_to_common_on_malformed_output() {
        use interview_core::persona::AICandidatePersona;
        use interview_llm::MockLlmBackend;

        let llm = MockLlmBackend::new();
        llm.push_response("no marker in this completion");
        let session = SessionState::new(
            "s1",
            "naver",
            "backend",
            "Alice",
            AICandidatePersona::default_for("naver", "backend"),
            15,
        );
        let company = CompanyProfile::generic_fallback("naver");
        let persona = AICandidatePersona::default_for("naver", "backend");

        let (pending, llm_unavailable) = generate_individual(Role::Hr, &session, &company, &persona, &llm).await;

        assert!(!llm_unavailable, "malformed-but-received output is a semantic fallback, not an upstream failure");
        match pending {
            PendingQuestion::Single(q) => assert!(!q.content.trim().is_empty()),
            PendingQuestion::Individual(_) => panic!("expected fallback to a single common question"),
        }
    }

    #[tokio::test]
    async fn generate_single_signals_llm_unavailable_on_backend_error() {
        use interview_core::persona::AICandidatePersona;
        use interview_core::traits::LlmError;
        use interview_llm::MockLlmBackend;

        let llm = MockLlmBackend::new();
        llm.push_failure(LlmError::Network("backend is down".to_string()));
        let session = SessionState::new(
            "s1",
            "naver",
            "backend",
            "Alice",
            AICandidatePersona::default_for("naver", "backend"),
            15,
        );
        let company = CompanyProfile::generic_fallback("naver");
        let persona = AICandidatePersona::default_for("naver", "backend");

        let generated = generate(
            QuestionKind::RoleMain(Role::Hr.into()),
            &session,
            &company,
            &persona,
            &llm,
        )
        .await
        .expect("RoleMain always produces a question");

        assert!(generated.llm_unavailable);
        assert!(!matches!(generated.pending, PendingQuestion::Individual(_)));
    }
}
