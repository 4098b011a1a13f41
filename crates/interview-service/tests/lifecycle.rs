use std::sync::Arc;
use std::time::Duration;

use interview_config::Settings;
use interview_core::api::{StartInterviewRequest, SubmitAnswerRequest, TurnResponse};
use interview_core::error::Error;
use interview_core::traits::{LlmBackend, LlmError};
use interview_llm::MockLlmBackend;
use interview_persistence::{
    InMemoryGazeRepository, InMemoryInterviewRepository, InMemoryMediaRepository, LocalObjectStore,
    MockEvaluationClient, MockGazeAnalyzer,
};
use interview_service::{FeedbackCollaborators, InterviewService};

fn build_service() -> InterviewService {
    build_service_with_llm(Arc::new(MockLlmBackend::new()))
}

fn build_service_with_llm(llm: Arc<dyn LlmBackend>) -> InterviewService {
    let mut temp_dir = std::env::temp_dir();
    temp_dir.push(format!("interview-service-test-{}", uuid::Uuid::new_v4()));

    let feedback = FeedbackCollaborators {
        interviews: Arc::new(InMemoryInterviewRepository::new()),
        media: Arc::new(InMemoryMediaRepository::new()),
        gaze_repo: Arc::new(InMemoryGazeRepository::new()),
        object_store: Arc::new(LocalObjectStore::new(temp_dir)),
        evaluation: Arc::new(MockEvaluationClient::new()),
        gaze_analyzer: Arc::new(MockGazeAnalyzer::new()),
    };

    InterviewService::new(Settings::default(), llm, None, feedback)
}

#[tokio::test]
async fn start_then_reject_unknown_session() {
    let service = build_service();

    let response = service
        .start_ai_competition(StartInterviewRequest {
            company: "네이버".to_string(),
            position: "backend".to_string(),
            candidate_name: "Alice".to_string(),
            user_id: None,
            posting_id: None,
            user_resume_id: None,
            calibration_data: None,
        })
        .await
        .unwrap();

    assert_eq!(response.first_question, "Self-introduction, please.");
    assert!(response.intro_message.contains("네이버"));

    let missing = service
        .submit_user_answer("does-not-exist", SubmitAnswerRequest { answer: "hi".to_string(), duration_seconds: None })
        .await;
    assert!(missing.is_err());
}

#[tokio::test]
async fn rejects_empty_required_fields() {
    let service = build_service();
    let result = service
        .start_ai_competition(StartInterviewRequest {
            company: "".to_string(),
            position: "backend".to_string(),
            candidate_name: "Alice".to_string(),
            user_id: None,
            posting_id: None,
            user_resume_id: None,
            calibration_data: None,
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn interview_runs_to_completion_and_triggers_feedback() {
    let mut settings = Settings::default();
    settings.total_question_limit = 15;

    let feedback_interviews = Arc::new(InMemoryInterviewRepository::new());
    let mut temp_dir = std::env::temp_dir();
    temp_dir.push(format!("interview-service-test-{}", uuid::Uuid::new_v4()));

    let feedback = FeedbackCollaborators {
        interviews: feedback_interviews.clone(),
        media: Arc::new(InMemoryMediaRepository::new()),
        gaze_repo: Arc::new(InMemoryGazeRepository::new()),
        object_store: Arc::new(LocalObjectStore::new(temp_dir)),
        evaluation: Arc::new(MockEvaluationClient::new()),
        gaze_analyzer: Arc::new(MockGazeAnalyzer::new()),
    };

    let service = InterviewService::new(settings, Arc::new(MockLlmBackend::new()), None, feedback);

    let start = service
        .start_ai_competition(StartInterviewRequest {
            company: "kakao".to_string(),
            position: "backend".to_string(),
            candidate_name: "Bob".to_string(),
            user_id: Some("u1".to_string()),
            posting_id: None,
            user_resume_id: None,
            calibration_data: None,
        })
        .await
        .unwrap();

    let session_id = start.session_id.clone();
    let mut completed = false;

    for _ in 0..200 {
        let response = service
            .submit_user_answer(
                &session_id,
                SubmitAnswerRequest { answer: "A reasonably complete answer.".to_string(), duration_seconds: Some(10.0) },
            )
            .await
            .unwrap();

        if matches!(response, TurnResponse::Completed { .. }) {
            completed = true;
            break;
        }
    }
    assert!(completed, "interview did not complete within the iteration budget");

    // Let the spawned feedback task register its 5s cooperative-delay timer,
    // then advance virtual time past it and let it run to completion.
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(6)).await;
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;

    assert_eq!(feedback_interviews.count(), 1, "feedback pipeline should have written one interview record");

    // Re-submitting after completion is rejected.
    let again = service
        .submit_user_answer(&session_id, SubmitAnswerRequest { answer: "late".to_string(), duration_seconds: None })
        .await;
    assert!(again.is_err());
}

#[tokio::test]
async fn persistent_llm_outage_surfaces_as_upstream_unavailable() {
    let llm = Arc::new(MockLlmBackend::new());
    for _ in 0..3 {
        llm.push_failure(LlmError::Network("connection refused".to_string()));
    }
    let service = build_service_with_llm(llm.clone());

    let start = service
        .start_ai_competition(StartInterviewRequest {
            company: "kakao".to_string(),
            position: "backend".to_string(),
            candidate_name: "Carol".to_string(),
            user_id: None,
            posting_id: None,
            user_resume_id: None,
            calibration_data: None,
        })
        .await
        .unwrap();
    let session_id = start.session_id.clone();

    let mut saw_upstream_unavailable = false;
    for _ in 0..10 {
        let result = service
            .submit_user_answer(
                &session_id,
                SubmitAnswerRequest { answer: "A trivial but complete answer.".to_string(), duration_seconds: Some(12.0) },
            )
            .await;

        match result {
            Ok(_) => continue,
            Err(Error::UpstreamUnavailable(_)) => {
                saw_upstream_unavailable = true;
                break;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert!(saw_upstream_unavailable, "3 consecutive LLM failures should surface as Error::UpstreamUnavailable");

    // A bare retry (no new answer recorded — the prior one already was)
    // succeeds once the LLM recovers.
    llm.push_response("a recovered question\nintent: probe recovery");
    let recovered = service
        .submit_user_answer(
            &session_id,
            SubmitAnswerRequest { answer: "ignored while retrying".to_string(), duration_seconds: Some(1.0) },
        )
        .await;
    assert!(recovered.is_ok());
}
