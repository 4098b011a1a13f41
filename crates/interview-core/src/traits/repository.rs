//! Row-oriented persistence trait seams (§6.2). Schemas describe only the
//! columns the core actually reads/writes; real deployments implement these
//! traits against whatever database they use. `interview-persistence` ships
//! in-memory implementations used by default and by tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::company::CompanyProfile;
use crate::question::QAEntry;

#[derive(Error, Debug, Clone)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// `company(company_id, name, talent_profile, core_competencies[], ...)`.
/// `CompanyCatalog` (interview-config) is the default reader of this data;
/// this trait models the "persisted tables" alternative named in §4.1.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn get_profile(&self, company_id: &str) -> Result<CompanyProfile, RepositoryError>;
}

/// `ai_resume(ai_resume_id, position_id, title, content)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResumeRecord {
    pub ai_resume_id: String,
    pub position_id: String,
    pub title: String,
    pub content: String,
}

/// `user_resume(user_resume_id, user_id, title, content)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResumeRecord {
    pub user_resume_id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
}

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn find_ai_resume(
        &self,
        company_id: &str,
        position: &str,
    ) -> Result<Option<AiResumeRecord>, RepositoryError>;

    async fn get_user_resume(
        &self,
        user_resume_id: &str,
    ) -> Result<Option<UserResumeRecord>, RepositoryError>;
}

/// `interview(interview_id, user_id, company_id, position_id, posting_id?, date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub interview_id: String,
    pub user_id: Option<String>,
    pub company_id: String,
    pub position_id: String,
    pub posting_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// `history_detail(interview_id, who, question_index, question_content,
/// question_intent, question_level, answer, feedback, sequence, duration)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDetailRecord {
    pub interview_id: String,
    pub who: String,
    pub sequence: u32,
    pub qa: QAEntry,
    pub feedback: Option<String>,
}

#[async_trait]
pub trait InterviewRepository: Send + Sync {
    async fn create_interview(
        &self,
        record: InterviewRecord,
    ) -> Result<(), RepositoryError>;

    async fn write_history_details(
        &self,
        details: Vec<HistoryDetailRecord>,
    ) -> Result<(), RepositoryError>;
}

/// `media_files(media_id, user_id, interview_id, file_name, file_type,
/// s3_key, s3_url, file_size, duration, created_at, updated_at)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFileRecord {
    pub media_id: String,
    pub user_id: Option<String>,
    pub interview_id: String,
    pub file_name: String,
    pub file_type: String,
    pub s3_key: String,
    pub s3_url: Option<String>,
    pub file_size: u64,
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn insert_media_file(&self, record: MediaFileRecord) -> Result<(), RepositoryError>;
}

/// `gaze_analysis(gaze_id, interview_id, user_id, gaze_score, jitter_score,
/// compliance_score, stability_rating, gaze_points, calibration_points,
/// video_metadata)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazeAnalysisRecord {
    pub gaze_id: String,
    pub interview_id: String,
    pub user_id: Option<String>,
    pub gaze_score: f64,
    pub jitter_score: f64,
    pub compliance_score: f64,
    pub stability_rating: String,
}

#[async_trait]
pub trait GazeRepository: Send + Sync {
    async fn insert_gaze_analysis(
        &self,
        record: GazeAnalysisRecord,
    ) -> Result<(), RepositoryError>;
}
