//! Local-filesystem stand-in [`ObjectStore`] (§6.3). A real deployment
//! backs this trait with S3 or similar; this implementation is what the
//! default wiring and tests use instead, matching "Persistent storage...
//! specified only at their interface" in spec.md §1.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use interview_core::traits::{ObjectStore, ObjectStoreError};

pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    /// There's no real pre-signing to do locally; this returns a `file://`
    /// URL the caller can treat as opaque, same shape as a pre-signed S3 URL.
    async fn presign_put(&self, key: &str) -> Result<String, ObjectStoreError> {
        Ok(format!("file://{}", self.path_for(key).display()))
    }

    async fn presign_get(&self, key: &str) -> Result<String, ObjectStoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(ObjectStoreError::NotFound(key.to_string()));
        }
        Ok(format!("file://{}", path.display()))
    }

    async fn put_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), ObjectStoreError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ObjectStoreError::Backend(e.to_string()))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ObjectStoreError::Backend(e.to_string()))
    }
}

impl LocalObjectStore {
    pub async fn read_bytes(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let path = self.path_for(key);
        tokio::fs::read(&path)
            .await
            .map_err(|_| ObjectStoreError::NotFound(key.to_string()))
    }

    pub fn exists(&self, key: &str) -> bool {
        Path::new(&self.path_for(key)).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips_bytes() {
        let dir = tempdir();
        let store = LocalObjectStore::new(&dir);
        store.put_bytes("temp_gaze/s1.mp4", b"frames".to_vec()).await.unwrap();

        assert!(store.exists("temp_gaze/s1.mp4"));
        let bytes = store.read_bytes("temp_gaze/s1.mp4").await.unwrap();
        assert_eq!(bytes, b"frames");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn presign_get_of_missing_key_errors() {
        let dir = tempdir();
        let store = LocalObjectStore::new(&dir);
        assert!(matches!(
            store.presign_get("missing").await,
            Err(ObjectStoreError::NotFound(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    fn tempdir() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("interview-core-test-{}", uuid::Uuid::new_v4()));
        path
    }
}
