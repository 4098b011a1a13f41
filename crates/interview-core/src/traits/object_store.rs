//! Object storage trait seam (§6.3): pre-signed URL generation and
//! key-based reads. `interview-persistence` ships a local-filesystem
//! stand-in used by tests.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ObjectStoreError {
    #[error("object store backend error: {0}")]
    Backend(String),

    #[error("key not found: {0}")]
    NotFound(String),
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Generates a pre-signed PUT URL for uploading an object under `key`.
    async fn presign_put(&self, key: &str) -> Result<String, ObjectStoreError>;

    /// Generates a pre-signed GET URL for downstream analyzers to read `key`.
    async fn presign_get(&self, key: &str) -> Result<String, ObjectStoreError>;

    /// Uploads bytes directly to `key` (used for the temp-file → object-store
    /// hop in the gaze linkage pipeline, §4.5 step 3a).
    async fn put_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), ObjectStoreError>;
}

/// Key layout helpers (§6.3).
pub mod keys {
    pub fn pre_interview_gaze_key(user_id: &str, session_id: &str, timestamp: i64, ext: &str) -> String {
        format!("gaze-videos/{user_id}/{session_id}/{timestamp}.{ext}")
    }

    pub fn post_interview_gaze_prefix(interview_id: &str) -> String {
        format!("gaze_tracking/{interview_id}/")
    }

    pub fn temp_gaze_path(session_id: &str, ext: &str) -> String {
        format!("temp_gaze/{session_id}.{ext}")
    }
}
