//! Builders for the envelopes `process_user_answer`/`start` return (§4.4.1).

use interview_core::envelope::{AgentKind, Content, ContentType, Envelope, Metadata, Metrics};
use interview_core::question::{PendingQuestion, QuestionRecord};
use interview_core::role::Role;
use interview_core::session::SessionState;

fn content_type_for_role(role: Option<Role>) -> ContentType {
    match role {
        Some(Role::Hr) => ContentType::Hr,
        Some(Role::Tech) => ContentType::Tech,
        Some(Role::Collaboration) => ContentType::Collaboration,
        None => ContentType::Intro,
    }
}

/// The envelope presenting the user-facing question text, returned whenever
/// the orchestrator is waiting on the user to answer (§4.4.3 step c).
pub fn waiting_envelope(session: &SessionState, record: &QuestionRecord) -> Envelope {
    Envelope::new(
        Metadata {
            interview_id: session.session_id.clone(),
            step: session.turn_count,
            task: "await_user_answer".to_string(),
            from_agent: AgentKind::Orchestrator,
            next_agent: AgentKind::User,
            status_code: 200,
        },
        Content {
            content_type: content_type_for_role(record.interviewer_role),
            content: record.content.clone(),
        },
    )
}

/// The completion envelope returned once `EndOfInterview` is selected
/// (§4.4.3 step b). Carries no question content of its own.
pub fn completion_envelope(session: &SessionState) -> Envelope {
    Envelope::new(
        Metadata {
            interview_id: session.session_id.clone(),
            step: session.turn_count,
            task: "interview_completed".to_string(),
            from_agent: AgentKind::Orchestrator,
            next_agent: AgentKind::System,
            status_code: 200,
        },
        Content {
            content_type: ContentType::Outtro,
            content: "The interview is complete. Thank you for your time.".to_string(),
        },
    )
    .with_metrics(Metrics {
        duration: None,
        total_time: Some(session.start_time.elapsed().as_secs_f64()),
    })
}

/// Envelope returned for a persistent upstream failure (§4.4.7): the session
/// stays alive for the user to retry, so this is never a completion.
pub fn error_envelope(session: &SessionState, message: &str) -> Envelope {
    Envelope::new(
        Metadata {
            interview_id: session.session_id.clone(),
            step: session.turn_count,
            task: "generation_error".to_string(),
            from_agent: AgentKind::Orchestrator,
            next_agent: AgentKind::User,
            status_code: 503,
        },
        Content {
            content_type: ContentType::Error,
            content: message.to_string(),
        },
    )
}

/// Pulls the `QuestionRecord` the user should currently see out of a pending
/// question, regardless of whether it's a single or individualized pair.
pub fn user_facing_record(pending: &PendingQuestion) -> &QuestionRecord {
    match pending {
        PendingQuestion::Single(record) => record,
        PendingQuestion::Individual(pair) => &pair.user_question,
    }
}

/// Pulls the AI-facing `QuestionRecord` out of a pending question.
pub fn ai_facing_record(pending: &PendingQuestion) -> &QuestionRecord {
    match pending {
        PendingQuestion::Single(record) => record,
        PendingQuestion::Individual(pair) => &pair.ai_question,
    }
}
