//! Backup persistence for submission documents.
//!
//! One indented-JSON file per submission, keyed by the submission
//! identifier. A failed backup write is logged by the pipeline and never
//! affects the caller-visible outcome.

use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::SubmissionDocument;

use super::{Result, SubmitError};

/// Write-once backup store for assembled submission documents.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BackupStore: Send + Sync {
    /// Persist a backup copy keyed by the submission identifier.
    async fn write(&self, submission_id: &str, document: &SubmissionDocument) -> Result<()>;
}

/// Filesystem-backed store: `<dir>/submission_<id>.json`, directory created
/// on demand.
#[derive(Debug, Clone)]
pub struct FsBackupStore {
    dir: PathBuf,
}

impl FsBackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the backup file for one submission.
    pub fn backup_path(&self, submission_id: &str) -> PathBuf {
        self.dir.join(format!("submission_{submission_id}.json"))
    }
}

#[async_trait]
impl BackupStore for FsBackupStore {
    async fn write(&self, submission_id: &str, document: &SubmissionDocument) -> Result<()> {
        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| SubmitError::Internal(format!("serialize backup: {e}")))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(SubmitError::BackupWrite)?;
        tokio::fs::write(self.backup_path(submission_id), json)
            .await
            .map_err(SubmitError::BackupWrite)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{align_all, assemble, RawFieldBag};
    use chrono::{TimeZone, Utc};

    fn sample_document() -> SubmissionDocument {
        let mut bag = RawFieldBag::new();
        bag.insert("partnerName", "Hotel Aurora");
        bag.insert("tierName[]", "Bronze");
        let groups = align_all(&bag);
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap();
        assemble(&bag, &groups, None, now).unwrap()
    }

    #[tokio::test]
    async fn writes_indented_json_and_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsBackupStore::new(tmp.path().join("submissions"));
        let doc = sample_document();

        store.write("1754524800000", &doc).await.unwrap();

        let written = tokio::fs::read_to_string(store.backup_path("1754524800000"))
            .await
            .unwrap();
        assert!(written.contains('\n'), "expected indented output");
        let parsed: SubmissionDocument = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, doc);
    }
}
