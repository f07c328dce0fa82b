//! Common test utilities and fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use loyalty_intake::domain::{RawFieldBag, SubmissionDocument};
use loyalty_intake::infra::{
    BackupStore, FixedClock, FsBackupStore, Mailer, OutboundEmail, SubmissionPipeline,
    SubmitError, UploadStore,
};

/// Fixed submission instant used across scenarios.
pub fn test_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 30, 45).unwrap()
}

/// Submission identifier derived from [`test_instant`].
pub const TEST_SUBMISSION_ID: &str = "1786105845000";

/// The Bronze/Silver sample submission: 2 tiers, 2 point credits, 1 reward
/// category, 2 rewards, no logo.
pub fn sample_submission_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("partnerName", "Grand Horizon Hotel"),
        ("cardKey", "GHH-2026"),
        ("tagline", "Where every stay counts"),
        ("website", "https://grandhorizon.example"),
        ("primaryColor", "#1a2b3c"),
        ("secondaryColor", "#4d5e6f"),
        ("accentColor", "#d4af37"),
        ("primaryFont", "Lato"),
        ("headerFont", "Playfair Display"),
        ("tierName[]", "Bronze"),
        ("tierName[]", "Silver"),
        ("tierBasePoints[]", "0"),
        ("tierBasePoints[]", "1000"),
        ("tierRoomNights[]", "0"),
        ("tierRoomNights[]", "10"),
        ("tierDiscount[]", "5"),
        ("tierDiscount[]", "10"),
        ("tierColorOne[]", "#cd7f32"),
        ("tierColorOne[]", "#c0c0c0"),
        ("tierColorTwo[]", "#8b5a2b"),
        ("tierColorTwo[]", "#a9a9a9"),
        ("tierImage[]", ""),
        ("tierImage[]", ""),
        ("tierDescription[]", "Entry tier for new members"),
        ("tierDescription[]", ""),
        ("spendingTypeName[]", "Room Spend"),
        ("spendingTypeName[]", "Dining"),
        ("spendingTypeCurrency[]", "USD"),
        ("spendingTypeCurrency[]", "USD"),
        ("spendingTypeMultiplier[]", "1"),
        ("spendingTypeMultiplier[]", "2"),
        ("rewardCategoryName[]", "Stays"),
        ("rewardCategoryDescription[]", "Free and discounted nights"),
        ("rewardName[]", "Free Night"),
        ("rewardName[]", "Late Checkout"),
        ("rewardPoints[]", "25000"),
        ("rewardPoints[]", "5000"),
        ("rewardCategory[]", "Stays"),
        ("rewardCategory[]", "Stays"),
    ]
}

/// Build a raw field bag from ordered name/value pairs.
pub fn field_bag(pairs: &[(&str, &str)]) -> RawFieldBag {
    let mut bag = RawFieldBag::new();
    for (name, value) in pairs {
        bag.insert(*name, *value);
    }
    bag
}

/// Mailer double recording every send; optionally failing each one.
pub struct RecordingMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> loyalty_intake::Result<()> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail {
            Err(SubmitError::Dispatch("sendgrid responded 503".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Backup double counting writes without touching the filesystem.
pub struct CountingBackupStore {
    writes: AtomicUsize,
}

impl CountingBackupStore {
    pub fn new() -> Self {
        Self {
            writes: AtomicUsize::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackupStore for CountingBackupStore {
    async fn write(
        &self,
        _submission_id: &str,
        _document: &SubmissionDocument,
    ) -> loyalty_intake::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Wire a pipeline around the fixed clock and the given doubles.
pub fn test_pipeline(
    backup: Arc<dyn BackupStore>,
    mailer: Arc<dyn Mailer>,
    uploads: Arc<UploadStore>,
) -> SubmissionPipeline {
    SubmissionPipeline::new(
        Arc::new(FixedClock(test_instant())),
        backup,
        mailer,
        uploads,
        vec!["reviewer@example.com".to_string()],
        "sender@example.com",
    )
}

/// Pipeline writing real backups under `backup_dir`.
pub fn fs_backed_pipeline(
    backup_dir: &std::path::Path,
    mailer: Arc<dyn Mailer>,
    uploads: Arc<UploadStore>,
) -> SubmissionPipeline {
    test_pipeline(Arc::new(FsBackupStore::new(backup_dir)), mailer, uploads)
}
