//! Interview orchestration core server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use interview_config::Settings;
use interview_llm::{HttpLlmBackend, HttpLlmConfig, MockLlmBackend};
use interview_persistence::{
    InMemoryGazeRepository, InMemoryInterviewRepository, InMemoryMediaRepository, InMemoryResumeRepository,
    LocalObjectStore, MockEvaluationClient, MockGazeAnalyzer,
};
use interview_server::{create_router, AppState};
use interview_service::{FeedbackCollaborators, InterviewService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let settings = Settings::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load settings from environment, using defaults");
        Settings::default()
    });

    tracing::info!("starting interview orchestration server v{}", env!("CARGO_PKG_VERSION"));

    let llm: Arc<dyn interview_core::traits::LlmBackend> = match settings.llm_api_key.clone() {
        Some(api_key) => {
            let config = HttpLlmConfig {
                api_key: Some(api_key),
                timeout: settings.llm_timeout,
                max_retries: settings.llm_max_retries,
                rate_limit_per_min: settings.llm_rate_limit_per_min,
                ..HttpLlmConfig::default()
            };
            Arc::new(HttpLlmBackend::new(config)?)
        }
        None => {
            tracing::warn!("LLM_API_KEY not set, falling back to the deterministic mock LLM backend");
            Arc::new(MockLlmBackend::new())
        }
    };

    let object_store_root = std::env::temp_dir().join("interview-orchestration-core/object-store");
    let feedback = FeedbackCollaborators {
        interviews: Arc::new(InMemoryInterviewRepository::new()),
        media: Arc::new(InMemoryMediaRepository::new()),
        gaze_repo: Arc::new(InMemoryGazeRepository::new()),
        object_store: Arc::new(LocalObjectStore::new(object_store_root)),
        evaluation: Arc::new(MockEvaluationClient::new()),
        gaze_analyzer: Arc::new(MockGazeAnalyzer::new()),
    };

    let service = Arc::new(InterviewService::new(
        settings,
        llm,
        Some(Arc::new(InMemoryResumeRepository::new())),
        feedback,
    ));
    service.spawn_idle_cleanup();

    let app = create_router(AppState { service });

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => tracing::info!("received SIGTERM, initiating graceful shutdown"),
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "interview_server=info,interview_service=info,tower_http=info".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
