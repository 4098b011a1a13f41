//! HTTP endpoints
//!
//! REST API mapping §6.1's `StartInterview`/`SubmitAnswer` contracts onto
//! [`InterviewService`], grounded on the teacher's `crates/server/src/http.rs`
//! router (route table + `TraceLayer`/`CorsLayer`/`CompressionLayer`
//! ordering), trimmed down since this adapter carries none of the
//! teacher's voice/WebRTC/tool surface.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use interview_core::api::{StartInterviewRequest, SubmitAnswerRequest};
use interview_core::error::Error;
use interview_service::InterviewService;
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InterviewService>,
}

/// Wraps [`interview_core::error::Error`] so it can implement
/// [`IntoResponse`], mapping onto the numeric codes and HTTP statuses
/// enumerated in §6.5.
struct ApiError(Error);

#[derive(Serialize)]
struct ApiErrorBody<'a> {
    error: ApiErrorDetail<'a>,
}

#[derive(Serialize)]
struct ApiErrorDetail<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ApiErrorBody { error: ApiErrorDetail { code: self.0.code(), message: self.0.to_string() } };
        (status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/interviews", post(start_interview))
        .route("/api/interviews/:session_id/answers", post(submit_answer))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn start_interview(
    State(state): State<AppState>,
    Json(request): Json<StartInterviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state.service.start_ai_competition(request).await?;
    Ok(Json(response))
}

async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state.service.submit_user_answer(&session_id, request).await?;
    Ok(Json(response))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "healthy" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_config::Settings;
    use interview_llm::MockLlmBackend;
    use interview_persistence::{
        InMemoryGazeRepository, InMemoryInterviewRepository, InMemoryMediaRepository, LocalObjectStore,
        MockEvaluationClient, MockGazeAnalyzer,
    };
    use interview_service::FeedbackCollaborators;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let mut temp_dir = std::env::temp_dir();
        temp_dir.push(format!("interview-server-test-{}", uuid::Uuid::new_v4()));

        let feedback = FeedbackCollaborators {
            interviews: Arc::new(InMemoryInterviewRepository::new()),
            media: Arc::new(InMemoryMediaRepository::new()),
            gaze_repo: Arc::new(InMemoryGazeRepository::new()),
            object_store: Arc::new(LocalObjectStore::new(temp_dir)),
            evaluation: Arc::new(MockEvaluationClient::new()),
            gaze_analyzer: Arc::new(MockGazeAnalyzer::new()),
        };

        AppState {
            service: Arc::new(InterviewService::new(
                Settings::default(),
                Arc::new(MockLlmBackend::new()),
                None,
                feedback,
            )),
        }
    }

    #[test]
    fn router_builds() {
        let _ = create_router(test_state());
    }

    #[tokio::test]
    async fn health_check_returns_ok() {
        let router = create_router(test_state());
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn start_interview_rejects_missing_fields() {
        let router = create_router(test_state());
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/interviews")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(
                        serde_json::json!({ "company": "", "position": "backend", "candidate_name": "Alice" })
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn submit_answer_for_unknown_session_returns_404() {
        let router = create_router(test_state());
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/interviews/does-not-exist/answers")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(serde_json::json!({ "answer": "hi" }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
