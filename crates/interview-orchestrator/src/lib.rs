//! The per-session Orchestrator (§4.4): a cooperative, single-session state
//! machine serialized behind a `tokio::sync::Mutex` so `process_user_answer`
//! can be `&self` without the service layer needing its own per-session
//! lock. `tokio::sync::Mutex`, not the teacher's usual `parking_lot`, since
//! the critical section spans `.await` points for LLM calls — noted in
//! DESIGN.md as the one place that convention doesn't fit.

mod ai_answer;
mod envelopes;
mod first_responder;
mod vocative;

use interview_core::answer::Answerer;
use interview_core::company::CompanyProfile;
use interview_core::envelope::Envelope;
use interview_core::error::{Error, Result};
use interview_core::persona::AICandidatePersona;
use interview_core::question::{PendingQuestion, QuestionKind};
use interview_core::session::SessionState;
use interview_core::traits::LlmBackend;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Transient per-turn bookkeeping. Not part of `SessionState`: it only makes
/// sense while a question is pending and is fully determined by
/// `current_question`, so persisting it would just be a second source of
/// truth for the same fact.
struct PendingCoordination {
    kind: QuestionKind,
    needs_ai: bool,
    ai_answered: bool,
    user_answered: bool,
    first_responder: Answerer,
}

impl PendingCoordination {
    fn for_kind(kind: QuestionKind, first_responder: Answerer) -> Self {
        let needs_ai = !kind.is_fixed();
        Self {
            kind,
            needs_ai,
            ai_answered: !needs_ai,
            user_answered: false,
            first_responder,
        }
    }

    fn ai_should_answer_now(&self) -> bool {
        if self.ai_answered || !self.needs_ai {
            return false;
        }
        self.user_answered || self.first_responder == Answerer::Ai
    }

    fn both_answered(&self) -> bool {
        self.user_answered && (!self.needs_ai || self.ai_answered)
    }
}

struct Locked {
    session: SessionState,
    coordination: Option<PendingCoordination>,
    rng: StdRng,
}

/// Consecutive LLM-error-triggered fallbacks tolerated before a session is
/// treated as a persistent upstream outage (§4.4.7, §7 point 2).
const PERSISTENT_FAILURE_THRESHOLD: u32 = 3;

/// One Orchestrator per session (§4.4.2's concurrency contract).
pub struct Orchestrator {
    inner: Mutex<Locked>,
    company: CompanyProfile,
    persona: AICandidatePersona,
    llm: Arc<dyn LlmBackend>,
    vocative_pattern: Regex,
}

impl Orchestrator {
    pub fn new(
        session: SessionState,
        company: CompanyProfile,
        persona: AICandidatePersona,
        llm: Arc<dyn LlmBackend>,
    ) -> Self {
        let vocative_pattern = vocative::compile_vocative_pattern(&session.user_name);
        Self {
            inner: Mutex::new(Locked {
                session,
                coordination: None,
                rng: StdRng::from_entropy(),
            }),
            company,
            persona,
            llm,
            vocative_pattern,
        }
    }

    /// Test/deterministic constructor: seeds the first-responder RNG
    /// (Testable Properties §8's 1000-sample fraction test relies on this).
    pub fn with_seed(
        session: SessionState,
        company: CompanyProfile,
        persona: AICandidatePersona,
        llm: Arc<dyn LlmBackend>,
        seed: u64,
    ) -> Self {
        let vocative_pattern = vocative::compile_vocative_pattern(&session.user_name);
        Self {
            inner: Mutex::new(Locked {
                session,
                coordination: None,
                rng: StdRng::seed_from_u64(seed),
            }),
            company,
            persona,
            llm,
            vocative_pattern,
        }
    }

    /// Initial flow (§4.5 step 5): generates the fixed intro message and
    /// runs the event loop through to the first question the user must
    /// answer.
    pub async fn start(&self) -> Result<Envelope> {
        let mut locked = self.inner.lock().await;
        self.run_flow(&mut locked).await
    }

    /// `process_user_answer(user_answer, duration)` (§4.4.3).
    pub async fn process_user_answer(
        &self,
        answer: &str,
        duration_seconds: Option<f64>,
    ) -> Result<Envelope> {
        let mut locked = self.inner.lock().await;

        if locked.session.is_completed {
            // Repeated submission after completion: same envelope, no
            // further mutation (§7 point: "Repeated submission after
            // completion returns the same Completed envelope").
            return Ok(envelopes::completion_envelope(&locked.session));
        }

        // A prior call already recorded the user's answer and then failed
        // while generating the next question (§7 point 6): there's nothing
        // new to record, so a retry just re-attempts generation.
        if locked.session.error.is_some() && locked.session.current_question.is_none() {
            return self.run_flow(&mut locked).await;
        }

        self.record_user_answer(&mut locked, answer, duration_seconds)?;
        self.run_flow(&mut locked).await
    }

    /// A read-only snapshot for the service layer to build its external API
    /// response from, without holding the lock across that translation.
    pub async fn snapshot(&self) -> interview_core::session::SessionSnapshot {
        self.inner.lock().await.session.snapshot()
    }

    pub async fn is_completed(&self) -> bool {
        self.inner.lock().await.session.is_completed
    }

    /// The currently pending question, if any — lets the service layer
    /// surface the AI-facing side of an individualized follow-up pair
    /// (§6.1's `ai_question`/`ai_answer`) without holding the lock itself.
    pub async fn current_question(&self) -> Option<PendingQuestion> {
        self.inner.lock().await.session.current_question.clone()
    }

    pub async fn try_mark_feedback_triggered(&self) -> bool {
        self.inner.lock().await.session.try_mark_feedback_triggered()
    }

    fn record_user_answer(
        &self,
        locked: &mut Locked,
        answer: &str,
        duration_seconds: Option<f64>,
    ) -> Result<()> {
        let pending = locked
            .session
            .current_question
            .clone()
            .ok_or_else(|| Error::InconsistentState("no question is pending".to_string()))?;

        let record = envelopes::user_facing_record(&pending);
        let question_id = pending.question_id_for(Answerer::User);

        locked.session.qa_history.push(interview_core::question::QAEntry {
            question_id,
            question_content: record.content.clone(),
            question_intent: record.intent.clone(),
            interviewer_role: record.interviewer_role,
            answerer: Answerer::User,
            answer_content: answer.to_string(),
            duration_seconds,
        });

        match &mut locked.coordination {
            Some(coord) => coord.user_answered = true,
            None => {
                return Err(Error::InconsistentState(
                    "current_question set without turn coordination".to_string(),
                ))
            }
        }

        Ok(())
    }

    /// `_process_complete_flow` (§4.4.3 step 2): repeats selector → generate
    /// → answer steps until the orchestrator must either hand control back
    /// to the user or complete the session.
    async fn run_flow(&self, locked: &mut Locked) -> Result<Envelope> {
        loop {
            if locked.session.current_question.is_none() {
                let kind = interview_planner::next_kind(&mut locked.session);

                if kind == QuestionKind::EndOfInterview {
                    locked.session.is_completed = true;
                    locked.coordination = None;
                    return Ok(envelopes::completion_envelope(&locked.session));
                }

                let pending = match self.generate_with_retry(&mut locked.session, kind).await {
                    Ok(pending) => {
                        locked.session.error = None;
                        pending
                    }
                    Err(err) => {
                        locked.coordination = None;
                        let message = err.to_string();
                        locked.session.error = Some(message.clone());
                        return Ok(envelopes::error_envelope(&locked.session, &message));
                    }
                };
                let first_responder = if kind.is_fixed() {
                    Answerer::User
                } else {
                    first_responder::choose_first_responder(&mut locked.rng)
                };

                locked.session.current_question = Some(pending);
                locked.coordination = Some(PendingCoordination::for_kind(kind, first_responder));
                continue;
            }

            let ai_should_answer_now = locked
                .coordination
                .as_ref()
                .map(|c| c.ai_should_answer_now())
                .unwrap_or(false);

            if ai_should_answer_now {
                self.answer_as_ai(locked).await;
                continue;
            }

            let both_answered = locked
                .coordination
                .as_ref()
                .map(|c| c.both_answered())
                .unwrap_or(false);

            if both_answered {
                self.advance_turn(locked);
                continue;
            }

            let pending = locked.session.current_question.as_ref().expect("checked above");
            let record = envelopes::user_facing_record(pending);
            return Ok(envelopes::waiting_envelope(&locked.session, record));
        }
    }

    /// `interview-planner::generate` substitutes a deterministic fallback
    /// question the instant the LLM call itself errors, so a single call
    /// here never fails outright. What it does signal back is whether that
    /// substitution happened — tracked as `session.consecutive_llm_failures`
    /// and reset on any clean success. Once the LLM has failed
    /// `PERSISTENT_FAILURE_THRESHOLD` times in a row, this surfaces as
    /// `Error::UpstreamUnavailable` (§4.4.7, §7 point 2) rather than
    /// silently falling back forever, so a real outage still produces the
    /// spec's distinct error state instead of an endless stream of
    /// look-alike fallback questions.
    async fn generate_with_retry(&self, session: &mut SessionState, kind: QuestionKind) -> Result<PendingQuestion> {
        let generated = interview_planner::generate(kind, session, &self.company, &self.persona, self.llm.as_ref())
            .await
            .expect("EndOfInterview is special-cased by run_flow before generate_with_retry runs");

        if !generated.llm_unavailable {
            session.consecutive_llm_failures = 0;
            return Ok(generated.pending);
        }

        session.consecutive_llm_failures += 1;
        tracing::warn!(
            consecutive_failures = session.consecutive_llm_failures,
            ?kind,
            "question generation fell back to a deterministic question after an LLM error"
        );

        if session.consecutive_llm_failures < PERSISTENT_FAILURE_THRESHOLD {
            return Ok(generated.pending);
        }

        session.consecutive_llm_failures = 0;
        Err(Error::UpstreamUnavailable(format!(
            "LLM backend failed {PERSISTENT_FAILURE_THRESHOLD} consecutive times while generating {kind:?}"
        )))
    }

    async fn answer_as_ai(&self, locked: &mut Locked) {
        let pending = locked
            .session
            .current_question
            .clone()
            .expect("ai_should_answer_now implies a pending question");
        let record = envelopes::ai_facing_record(&pending);

        let (content, total_time_ms) =
            ai_answer::generate_ai_answer(record, &self.persona, &self.vocative_pattern, self.llm.as_ref()).await;

        let question_id = pending.question_id_for(Answerer::Ai);
        locked.session.qa_history.push(interview_core::question::QAEntry {
            question_id,
            question_content: record.content.clone(),
            question_intent: record.intent.clone(),
            interviewer_role: record.interviewer_role,
            answerer: Answerer::Ai,
            answer_content: content,
            duration_seconds: Some(total_time_ms as f64 / 1000.0),
        });

        if let Some(coord) = &mut locked.coordination {
            coord.ai_answered = true;
        }
    }

    /// Turn-state bookkeeping (§4.4.6) and clearing the pending question once
    /// both answerers have responded.
    fn advance_turn(&self, locked: &mut Locked) {
        if let Some(coord) = locked.coordination.take() {
            // Fixed intro/motivation questions don't participate in role
            // accounting (§4.4.6: "only questions generated after turn_count
            // > 2 ... participate").
            if !coord.kind.is_fixed() {
                if let Some(role) = coord.kind.role() {
                    if coord.kind.is_main() {
                        locked.session.turn_state_mut(role).main_question_asked = true;
                    } else if coord.kind.is_follow_up() {
                        // Both the common and the individualized follow-up
                        // increment by exactly 1 per pair, not per answerer
                        // (Open Question resolution, recorded in DESIGN.md).
                        locked.session.turn_state_mut(role).follow_up_count += 1;
                    }
                }
            }
        }

        locked.session.current_question = None;
        locked.session.turn_count += 1;
    }
}
