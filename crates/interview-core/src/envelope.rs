//! The message envelope exchanged between the Orchestrator and its logical
//! agents (interviewer, ai, user), per §4.4.1.
//!
//! Grounded on the `Metadata`/`Content`/`Metrics`/`AgentMessage` dataclasses
//! in the original `Orchestrator.py`, translated into plain Rust structs.

use serde::{Deserialize, Serialize};

/// The logical agent a message is from/to. The orchestrator invokes these
/// synchronously within its own task; none of them have an independent
/// thread of control (§4.4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Orchestrator,
    Interviewer,
    Ai,
    User,
    System,
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AgentKind::Orchestrator => "orchestrator",
            AgentKind::Interviewer => "interviewer",
            AgentKind::Ai => "ai",
            AgentKind::User => "user",
            AgentKind::System => "system",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub interview_id: String,
    /// `turn_count` snapshot at the time this message was produced.
    pub step: u32,
    pub task: String,
    pub from_agent: AgentKind,
    pub next_agent: AgentKind,
    pub status_code: u16,
}

/// The envelope's content discriminator, matching the `type` field used
/// throughout the original source (`INTRO`, `HR`, `TECH`, `COLLABORATION`,
/// `OUTTRO`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Intro,
    Hr,
    Tech,
    Collaboration,
    Outtro,
    Waiting,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
}

/// The sole carrier between the Orchestrator and the logical agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub metadata: Metadata,
    pub content: Content,
    #[serde(default)]
    pub metrics: Metrics,
}

impl Envelope {
    pub fn new(metadata: Metadata, content: Content) -> Self {
        Self {
            metadata,
            content,
            metrics: Metrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }
}
