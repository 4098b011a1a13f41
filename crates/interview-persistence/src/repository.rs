//! In-memory implementations of the §6.2 persistence traits, grounded on the
//! teacher's `InMemorySessionStore` (`crates/server/src/session.rs`):
//! `parking_lot::RwLock<HashMap<..>>` behind a trait, no `.await` in the
//! critical section so the plain `RwLock` (not `tokio::sync`) is the right
//! fit here, unlike the orchestrator's session mutex.

use std::collections::HashMap;

use async_trait::async_trait;
use interview_core::company::CompanyProfile;
use interview_core::traits::{
    AiResumeRecord, CompanyRepository, GazeAnalysisRecord, GazeRepository, HistoryDetailRecord,
    InterviewRecord, InterviewRepository, MediaFileRecord, MediaRepository, RepositoryError,
    ResumeRepository, UserResumeRecord,
};
use parking_lot::RwLock;

#[derive(Default)]
pub struct InMemoryCompanyRepository {
    profiles: RwLock<HashMap<String, CompanyProfile>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, profile: CompanyProfile) {
        self.profiles.write().insert(profile.company_id.clone(), profile);
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn get_profile(&self, company_id: &str) -> Result<CompanyProfile, RepositoryError> {
        self.profiles
            .read()
            .get(company_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(company_id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryResumeRepository {
    ai_resumes: RwLock<HashMap<(String, String), AiResumeRecord>>,
    user_resumes: RwLock<HashMap<String, UserResumeRecord>>,
}

impl InMemoryResumeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_ai_resume(&self, record: AiResumeRecord) {
        self.ai_resumes
            .write()
            .insert((record.position_id.clone(), record.ai_resume_id.clone()), record);
    }

    pub fn insert_user_resume(&self, record: UserResumeRecord) {
        self.user_resumes.write().insert(record.user_resume_id.clone(), record);
    }
}

#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    async fn find_ai_resume(
        &self,
        company_id: &str,
        position: &str,
    ) -> Result<Option<AiResumeRecord>, RepositoryError> {
        // The bundled table is keyed `(position_id, ai_resume_id)`; company
        // scoping happens via the ai_resume_id's prefix convention
        // (`{company_id}-{position_id}-...`), matching how the gaze/media
        // keys in §6.3 embed their owning identifiers in the key itself.
        let prefix = format!("{company_id}-");
        Ok(self
            .ai_resumes
            .read()
            .iter()
            .find(|((pos, ai_resume_id), _)| pos == position && ai_resume_id.starts_with(&prefix))
            .map(|(_, record)| record.clone()))
    }

    async fn get_user_resume(
        &self,
        user_resume_id: &str,
    ) -> Result<Option<UserResumeRecord>, RepositoryError> {
        Ok(self.user_resumes.read().get(user_resume_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryInterviewRepository {
    interviews: RwLock<HashMap<String, InterviewRecord>>,
    history: RwLock<Vec<HistoryDetailRecord>>,
}

impl InMemoryInterviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, interview_id: &str) -> Option<InterviewRecord> {
        self.interviews.read().get(interview_id).cloned()
    }

    pub fn history_for(&self, interview_id: &str) -> Vec<HistoryDetailRecord> {
        self.history
            .read()
            .iter()
            .filter(|d| d.interview_id == interview_id)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.interviews.read().len()
    }
}

#[async_trait]
impl InterviewRepository for InMemoryInterviewRepository {
    async fn create_interview(&self, record: InterviewRecord) -> Result<(), RepositoryError> {
        self.interviews.write().insert(record.interview_id.clone(), record);
        Ok(())
    }

    async fn write_history_details(
        &self,
        details: Vec<HistoryDetailRecord>,
    ) -> Result<(), RepositoryError> {
        self.history.write().extend(details);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMediaRepository {
    files: RwLock<Vec<MediaFileRecord>>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_interview(&self, interview_id: &str) -> Vec<MediaFileRecord> {
        self.files
            .read()
            .iter()
            .filter(|f| f.interview_id == interview_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn insert_media_file(&self, record: MediaFileRecord) -> Result<(), RepositoryError> {
        self.files.write().push(record);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryGazeRepository {
    analyses: RwLock<Vec<GazeAnalysisRecord>>,
}

impl InMemoryGazeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_interview(&self, interview_id: &str) -> Vec<GazeAnalysisRecord> {
        self.analyses
            .read()
            .iter()
            .filter(|g| g.interview_id == interview_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl GazeRepository for InMemoryGazeRepository {
    async fn insert_gaze_analysis(&self, record: GazeAnalysisRecord) -> Result<(), RepositoryError> {
        self.analyses.write().push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn company_repository_round_trips() {
        let repo = InMemoryCompanyRepository::new();
        repo.insert(CompanyProfile::generic_fallback("naver"));
        let profile = repo.get_profile("naver").await.unwrap();
        assert_eq!(profile.company_id, "naver");
    }

    #[tokio::test]
    async fn company_repository_reports_not_found() {
        let repo = InMemoryCompanyRepository::new();
        assert!(matches!(
            repo.get_profile("does-not-exist").await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn resume_repository_finds_by_company_and_position() {
        let repo = InMemoryResumeRepository::new();
        repo.insert_ai_resume(AiResumeRecord {
            ai_resume_id: "naver-backend-1".to_string(),
            position_id: "backend".to_string(),
            title: "Backend engineer".to_string(),
            content: "skills: Java, SQL".to_string(),
        });

        let found = repo.find_ai_resume("naver", "backend").await.unwrap();
        assert!(found.is_some());
        assert!(repo.find_ai_resume("kakao", "backend").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn interview_repository_stores_history_details() {
        let repo = InMemoryInterviewRepository::new();
        repo.create_interview(InterviewRecord {
            interview_id: "i1".to_string(),
            user_id: Some("u1".to_string()),
            company_id: "naver".to_string(),
            position_id: "backend".to_string(),
            posting_id: None,
            created_at: chrono::Utc::now(),
        })
        .await
        .unwrap();

        assert!(repo.get("i1").is_some());
        assert!(repo.history_for("i1").is_empty());
    }
}
