//! `InterviewService` (§4.5): the process-wide registry and lifecycle
//! coordinator, matching the teacher's `SessionManager`
//! (`crates/server/src/session.rs`) — a concurrent map guarding `Arc`-wrapped
//! session handles — but using `dashmap::DashMap` in place of
//! `parking_lot::RwLock<HashMap>` since this map is read-and-written from
//! many concurrently-running session tasks rather than one lock-holder at a
//! time.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use interview_config::catalog;
use interview_config::{CompanyCatalog, Settings};
use interview_core::api::{
    AiAnswerContent, AiAnswerMetadata, AiMetadata, QuestionContent, QuestionMetadata, StartInterviewRequest,
    StartInterviewResponse, SubmitAnswerRequest, TurnInfo, TurnResponse,
};
use interview_core::company::CompanyProfile;
use interview_core::envelope::{AgentKind, ContentType, Envelope};
use interview_core::error::{Error, Result};
use interview_core::persona::AICandidatePersona;
use interview_core::question::PendingQuestion;
use interview_core::role::Role;
use interview_core::session::SessionState;
use interview_core::traits::{EvaluationClient, GazeAnalyzer, LlmBackend, ObjectStore, ResumeRepository};
use interview_orchestrator::Orchestrator;
use interview_persistence::{InMemoryGazeRepository, InMemoryInterviewRepository, InMemoryMediaRepository};
use interview_persona::PersonaFactory;

use crate::feedback;

/// Cooperative delay before the feedback pipeline runs, giving the adapter
/// time to acknowledge completion to the client first (§4.5 step "after a
/// short cooperative delay (~5s)").
pub(crate) const FEEDBACK_DELAY: Duration = Duration::from_secs(5);

/// Everything `trigger_feedback_for_session` needs, grouped so
/// `InterviewService` can hand a single `Arc` to the spawned task instead of
/// threading half a dozen fields through.
pub struct FeedbackCollaborators {
    pub interviews: Arc<InMemoryInterviewRepository>,
    pub media: Arc<InMemoryMediaRepository>,
    pub gaze_repo: Arc<InMemoryGazeRepository>,
    pub object_store: Arc<dyn ObjectStore>,
    pub evaluation: Arc<dyn EvaluationClient>,
    pub gaze_analyzer: Arc<dyn GazeAnalyzer>,
}

pub struct InterviewService {
    sessions: DashMap<String, Arc<Orchestrator>>,
    settings: Settings,
    llm: Arc<dyn LlmBackend>,
    resumes: Option<Arc<dyn ResumeRepository>>,
    feedback: Arc<FeedbackCollaborators>,
}

impl InterviewService {
    pub fn new(
        settings: Settings,
        llm: Arc<dyn LlmBackend>,
        resumes: Option<Arc<dyn ResumeRepository>>,
        feedback: FeedbackCollaborators,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            settings,
            llm,
            resumes,
            feedback: Arc::new(feedback),
        }
    }

    /// `start_ai_competition` (§4.5).
    pub async fn start_ai_competition(
        &self,
        request: StartInterviewRequest,
    ) -> Result<StartInterviewResponse> {
        if request.company.trim().is_empty()
            || request.position.trim().is_empty()
            || request.candidate_name.trim().is_empty()
        {
            return Err(Error::InvalidSettings(
                "company, position, and candidate_name are required".to_string(),
            ));
        }

        let company_id = CompanyCatalog.resolve(&request.company);
        let company = catalog::get_profile(&company_id).unwrap_or_else(|_| {
            tracing::warn!(company_id = %company_id, "company not found in catalog, using generic fallback");
            CompanyProfile::generic_fallback(&company_id)
        });

        let persona = PersonaFactory::create_persona(
            &company,
            &request.position,
            self.resumes.as_deref(),
            self.llm.as_ref(),
        )
        .await;

        let session_id = uuid::Uuid::new_v4().to_string();
        let mut session = SessionState::new(
            &session_id,
            &company_id,
            &request.position,
            &request.candidate_name,
            persona.clone(),
            self.settings.total_question_limit,
        );
        session.user_id = request.user_id.clone();
        session.posting_id = request.posting_id.clone();
        session.user_resume_id = request.user_resume_id.clone();
        session.calibration_data = request.calibration_data.clone();

        let orchestrator = Arc::new(Orchestrator::new(session, company, persona.clone(), self.llm.clone()));
        let envelope = orchestrator.start().await?;

        self.sessions.insert(session_id.clone(), orchestrator);

        Ok(start_response(session_id, &company_id, &envelope, &persona))
    }

    /// `submit_user_answer` (§4.5).
    pub async fn submit_user_answer(
        &self,
        session_id: &str,
        request: SubmitAnswerRequest,
    ) -> Result<TurnResponse> {
        let orchestrator = self
            .sessions
            .get(session_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::SessionNotFound(session_id.to_string()))?;

        if orchestrator.is_completed().await {
            return Err(Error::AlreadyCompleted(session_id.to_string()));
        }

        let envelope = orchestrator
            .process_user_answer(&request.answer, request.duration_seconds)
            .await?;

        // The orchestrator never raises on a persistent LLM outage — it
        // returns a 503 error envelope instead (§7's propagation policy) so
        // it can keep the session retryable internally. This is the one
        // place that envelope is translated into the explicit error type
        // the adapter's `ApiError` already knows how to turn into a real
        // HTTP 503, rather than serializing the error message as if it were
        // question content.
        if envelope.content.content_type == ContentType::Error {
            return Err(Error::UpstreamUnavailable(envelope.content.content.clone()));
        }

        let response = turn_response(session_id, &envelope, &orchestrator).await;

        if envelope.metadata.next_agent == AgentKind::System {
            let feedback = self.feedback.clone();
            let orchestrator_for_feedback = orchestrator.clone();
            let session_id = session_id.to_string();
            tokio::spawn(async move {
                feedback::trigger_feedback_for_session(session_id, orchestrator_for_feedback, feedback).await;
            });
        }

        Ok(response)
    }

    /// Periodically evicts sessions idle past `settings.session_idle_ttl`,
    /// matching the teacher's `SessionManager::start_cleanup_task` shape
    /// (§4.5 "Session lifetime & cleanup").
    pub fn spawn_idle_cleanup(self: &Arc<Self>) {
        let service = Arc::clone(self);
        let ttl = service.settings.session_idle_ttl;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ttl.max(Duration::from_secs(1)));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                service.cleanup_completed_sessions().await;
            }
        });
    }

    async fn cleanup_completed_sessions(&self) {
        let mut expired = Vec::new();
        for entry in self.sessions.iter() {
            if entry.value().is_completed().await {
                expired.push(entry.key().clone());
            }
        }
        for session_id in expired {
            self.sessions.remove(&session_id);
            tracing::info!(session_id = %session_id, "evicted completed session past idle TTL");
        }
    }
}

fn role_for_content_type(content_type: ContentType) -> Option<Role> {
    match content_type {
        ContentType::Hr => Some(Role::Hr),
        ContentType::Tech => Some(Role::Tech),
        ContentType::Collaboration => Some(Role::Collaboration),
        ContentType::Intro | ContentType::Outtro | ContentType::Waiting | ContentType::Error => None,
    }
}

fn start_response(
    session_id: String,
    company_id: &str,
    envelope: &Envelope,
    persona: &AICandidatePersona,
) -> StartInterviewResponse {
    let company_display = catalog::get_profile(company_id)
        .map(|p| p.display_name)
        .unwrap_or_else(|_| company_id.to_string());

    StartInterviewResponse {
        session_id,
        intro_message: interview_config::prompts::intro_message_text(&company_display),
        first_question: envelope.content.content.clone(),
        content: QuestionContent {
            question: envelope.content.content.clone(),
            metadata: QuestionMetadata {
                ai_resume_id: persona.resume_id.clone(),
                interviewer_type: None,
                question_type: "intro",
                turn_count: envelope.metadata.step,
            },
        },
        ai_resume_id: persona.resume_id.clone(),
        ai_answer: AiAnswerContent { metadata: AiAnswerMetadata { ai_resume_id: persona.resume_id.clone() } },
        turn_info: TurnInfo {
            current_turn: envelope.metadata.step,
            is_user_turn: envelope.metadata.next_agent == AgentKind::User,
            next_action: "wait_user_answer",
            ai_metadata: AiMetadata { resume_id: persona.resume_id.clone() },
        },
    }
}

async fn turn_response(session_id: &str, envelope: &Envelope, orchestrator: &Orchestrator) -> TurnResponse {
    let snapshot = orchestrator.snapshot().await;

    if envelope.metadata.next_agent == AgentKind::System {
        return TurnResponse::Completed {
            session_id: session_id.to_string(),
            qa_history: snapshot.qa_history,
            turn_info: TurnInfo {
                current_turn: envelope.metadata.step,
                is_user_turn: false,
                next_action: "completed",
                ai_metadata: AiMetadata { resume_id: snapshot.ai_resume_id.clone() },
            },
        };
    }

    let (ai_question, ai_answer) = match orchestrator.current_question().await {
        Some(PendingQuestion::Individual(pair)) => (
            Some(pair.ai_question.content),
            Some(AiAnswerContent { metadata: AiAnswerMetadata { ai_resume_id: snapshot.ai_resume_id.clone() } }),
        ),
        _ => (None, None),
    };

    TurnResponse::WaitingForUser {
        session_id: session_id.to_string(),
        content: QuestionContent {
            question: envelope.content.content.clone(),
            metadata: QuestionMetadata {
                ai_resume_id: snapshot.ai_resume_id.clone(),
                interviewer_type: role_for_content_type(envelope.content.content_type),
                question_type: "question",
                turn_count: envelope.metadata.step,
            },
        },
        ai_question,
        ai_answer,
        intro_message: if envelope.metadata.step <= 1 {
            Some(interview_config::prompts::intro_message_text(&snapshot.company_id))
        } else {
            None
        },
        turn_info: TurnInfo {
            current_turn: envelope.metadata.step,
            is_user_turn: envelope.metadata.next_agent == AgentKind::User,
            next_action: "wait_user_answer",
            ai_metadata: AiMetadata { resume_id: snapshot.ai_resume_id.clone() },
        },
    }
}
