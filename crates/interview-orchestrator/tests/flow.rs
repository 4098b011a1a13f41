use std::sync::Arc;

use interview_core::company::CompanyProfile;
use interview_core::envelope::{AgentKind, ContentType};
use interview_core::persona::AICandidatePersona;
use interview_core::session::SessionState;
use interview_core::traits::LlmError;
use interview_llm::MockLlmBackend;
use interview_orchestrator::Orchestrator;

fn build_orchestrator(seed: u64) -> Orchestrator {
    let session = SessionState::new("s1", "naver", "backend", "Alice", persona(), 15);
    Orchestrator::with_seed(session, company(), persona(), Arc::new(MockLlmBackend::new()), seed)
}

fn build_orchestrator_with_llm(seed: u64, llm: Arc<MockLlmBackend>) -> Orchestrator {
    let session = SessionState::new("s1", "naver", "backend", "Alice", persona(), 15);
    Orchestrator::with_seed(session, company(), persona(), llm, seed)
}

fn persona() -> AICandidatePersona {
    AICandidatePersona::default_for("naver", "backend")
}

fn company() -> CompanyProfile {
    CompanyProfile::generic_fallback("naver")
}

#[tokio::test]
async fn start_returns_intro_waiting_for_user() {
    let orchestrator = build_orchestrator(1);
    let envelope = orchestrator.start().await.unwrap();
    assert_eq!(envelope.metadata.next_agent, AgentKind::User);
    assert_eq!(envelope.content.content, "Self-introduction, please.");
}

#[tokio::test]
async fn happy_path_completes_with_expected_history_length() {
    let orchestrator = build_orchestrator(2);
    orchestrator.start().await.unwrap();

    let mut completed = false;
    for _ in 0..200 {
        let envelope = orchestrator
            .process_user_answer("A trivial but complete answer.", Some(12.0))
            .await
            .unwrap();
        if envelope.metadata.next_agent == AgentKind::System {
            completed = true;
            break;
        }
    }

    assert!(completed, "interview did not complete within the iteration budget");
    assert!(orchestrator.is_completed().await);

    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.qa_history.len(), 15 * 2 - 2);
}

#[tokio::test]
async fn repeated_submission_after_completion_is_idempotent() {
    let orchestrator = build_orchestrator(3);
    orchestrator.start().await.unwrap();

    loop {
        let envelope = orchestrator
            .process_user_answer("A trivial but complete answer.", Some(12.0))
            .await
            .unwrap();
        if envelope.metadata.next_agent == AgentKind::System {
            break;
        }
    }

    let before = orchestrator.snapshot().await;
    let envelope = orchestrator.process_user_answer("late answer", Some(1.0)).await.unwrap();
    assert_eq!(envelope.metadata.next_agent, AgentKind::System);
    let after = orchestrator.snapshot().await;
    assert_eq!(before.qa_history.len(), after.qa_history.len());

    assert!(orchestrator.try_mark_feedback_triggered().await);
    assert!(!orchestrator.try_mark_feedback_triggered().await);
}

#[tokio::test]
async fn persistent_llm_outage_surfaces_as_error_envelope_and_is_retryable() {
    let llm = Arc::new(MockLlmBackend::new());
    for _ in 0..3 {
        llm.push_failure(LlmError::Network("connection refused".to_string()));
    }
    let orchestrator = build_orchestrator_with_llm(4, llm.clone());

    orchestrator.start().await.unwrap();

    let mut saw_error_envelope = false;
    let mut envelope = None;
    for _ in 0..10 {
        let next = orchestrator.process_user_answer("A trivial but complete answer.", Some(12.0)).await.unwrap();
        if next.content.content_type == ContentType::Error {
            saw_error_envelope = true;
            envelope = Some(next);
            break;
        }
    }

    let envelope = envelope.expect("3 consecutive LLM failures should surface as an error envelope");
    assert!(saw_error_envelope);
    assert_eq!(envelope.metadata.status_code, 503);
    assert_eq!(envelope.metadata.next_agent, AgentKind::User);

    // The session is marked errored but not completed, and a bare retry
    // (no new answer needed — the prior one was already recorded) succeeds
    // once the LLM recovers.
    assert!(!orchestrator.is_completed().await);
    llm.push_response("a recovered question\nintent: probe recovery");
    let recovered = orchestrator.process_user_answer("ignored while retrying", Some(1.0)).await.unwrap();
    assert_ne!(recovered.content.content_type, ContentType::Error);
}
