//! Temporary storage for the uploaded logo image.
//!
//! The accepted multipart file lands here before the pipeline runs; the
//! pipeline reads the payload once when packaging the email attachment and
//! deletes the file in its terminal cleanup step.

use std::path::PathBuf;

use uuid::Uuid;

use crate::domain::LogoFileDescriptor;

use super::{Result, SubmitError};

/// Upload constraints enforced at the transport boundary.
pub const MAX_LOGO_BYTES: u64 = 5 * 1024 * 1024;

/// Multipart field name carrying the logo image.
pub const LOGO_FIELD: &str = "logoFile";

/// Handle to one stored upload: descriptor metadata plus the on-disk path
/// owning the byte payload.
#[derive(Debug, Clone)]
pub struct StoredLogo {
    pub descriptor: LogoFileDescriptor,
    pub path: PathBuf,
}

/// Filesystem store for temporary uploads, directory created on demand.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist an accepted upload under a fresh stored name.
    pub async fn store(
        &self,
        original_name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<StoredLogo> {
        let stored_name = Uuid::new_v4().to_string();
        let path = self.dir.join(&stored_name);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SubmitError::Internal(format!("create upload dir: {e}")))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| SubmitError::Internal(format!("store upload: {e}")))?;

        Ok(StoredLogo {
            descriptor: LogoFileDescriptor {
                original_name: original_name.to_string(),
                stored_name,
                size_bytes: bytes.len() as u64,
                mime_type: mime_type.to_string(),
            },
            path,
        })
    }

    /// Read the byte payload of a stored upload.
    pub async fn read(&self, logo: &StoredLogo) -> Result<Vec<u8>> {
        tokio::fs::read(&logo.path)
            .await
            .map_err(|e| SubmitError::Internal(format!("read upload: {e}")))
    }

    /// Delete a stored upload.
    pub async fn remove(&self, logo: &StoredLogo) -> Result<()> {
        tokio::fs::remove_file(&logo.path)
            .await
            .map_err(SubmitError::Cleanup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_read_remove_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("uploads"));

        let logo = store
            .store("logo.png", "image/png", b"\x89PNG fake bytes")
            .await
            .unwrap();
        assert_eq!(logo.descriptor.original_name, "logo.png");
        assert_eq!(logo.descriptor.mime_type, "image/png");
        assert_eq!(logo.descriptor.size_bytes, 15);

        let bytes = store.read(&logo).await.unwrap();
        assert_eq!(bytes, b"\x89PNG fake bytes");

        store.remove(&logo).await.unwrap();
        assert!(!logo.path.exists());
    }

    #[tokio::test]
    async fn remove_missing_file_is_cleanup_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());
        let logo = store.store("a.png", "image/png", b"x").await.unwrap();
        store.remove(&logo).await.unwrap();

        let err = store.remove(&logo).await.unwrap_err();
        assert!(matches!(err, SubmitError::Cleanup(_)));
    }
}
