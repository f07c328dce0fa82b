//! Submission pipeline: align -> assemble -> backup -> render -> dispatch.
//!
//! Side effects run strictly in sequence and are isolated from each other:
//! a failed backup or dispatch is logged and swallowed, while validation
//! aborts before any side effect. Terminal cleanup of the temporary upload
//! runs on every exit path.

use std::sync::Arc;

use base64::Engine;
use tracing::{error, info, warn};

use crate::domain::{align_all, assemble, RawFieldBag, SubmissionDocument};
use crate::render::render;

use super::backup::BackupStore;
use super::clock::Clock;
use super::mailer::{EmailAttachment, Mailer, OutboundEmail};
use super::upload::{StoredLogo, UploadStore};
use super::Result;

/// Outcome of one processed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Millisecond-timestamp token; distinct under normal request spacing,
    /// not collision-proof.
    pub submission_id: String,
    pub document: SubmissionDocument,
}

/// Orchestrates one submission as an independent unit of work. Holds no
/// mutable state; safe to share across concurrent requests.
pub struct SubmissionPipeline {
    clock: Arc<dyn Clock>,
    backup: Arc<dyn BackupStore>,
    mailer: Arc<dyn Mailer>,
    uploads: Arc<UploadStore>,
    recipients: Vec<String>,
    sender: String,
}

impl SubmissionPipeline {
    pub fn new(
        clock: Arc<dyn Clock>,
        backup: Arc<dyn BackupStore>,
        mailer: Arc<dyn Mailer>,
        uploads: Arc<UploadStore>,
        recipients: Vec<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            clock,
            backup,
            mailer,
            uploads,
            recipients,
            sender: sender.into(),
        }
    }

    /// Process one submission. The stored upload, when present, is deleted
    /// before this returns, whatever the outcome.
    pub async fn process(
        &self,
        bag: RawFieldBag,
        logo: Option<StoredLogo>,
    ) -> Result<SubmissionReceipt> {
        let outcome = self.run(&bag, logo.as_ref()).await;

        if let Some(logo) = &logo {
            if let Err(e) = self.uploads.remove(logo).await {
                warn!(stored_name = %logo.descriptor.stored_name, error = %e,
                    "failed to clean up uploaded logo");
            }
        }

        outcome
    }

    async fn run(
        &self,
        bag: &RawFieldBag,
        logo: Option<&StoredLogo>,
    ) -> Result<SubmissionReceipt> {
        // (a) align + assemble: fail fast, no side effects yet.
        let now = self.clock.now();
        let groups = align_all(bag);
        let document = assemble(bag, &groups, logo.map(|l| l.descriptor.clone()), now)?;

        let submission_id = now.timestamp_millis().to_string();
        info!(submission_id = %submission_id,
            business = %document.partner_info.business_name,
            "processing loyalty program submission");

        // (b) backup copy: first side effect, non-fatal.
        if let Err(e) = self.backup.write(&submission_id, &document).await {
            error!(submission_id = %submission_id, error = %e,
                "failed to back up submission document");
        }

        // (c) render notification.
        let rendered = render(&document);

        // (d) package attachment from the stored payload, read once.
        let mut attachments = Vec::new();
        if let Some(logo) = logo {
            let bytes = self.uploads.read(logo).await?;
            attachments.push(EmailAttachment {
                content: base64::engine::general_purpose::STANDARD.encode(bytes),
                filename: logo.descriptor.original_name.clone(),
                mime_type: logo.descriptor.mime_type.clone(),
                disposition: "attachment".to_string(),
            });
        }

        // (e) dispatch: best-effort, the recorded submission is the durable
        // unit of work.
        let email = OutboundEmail {
            to: self.recipients.clone(),
            from: self.sender.clone(),
            subject: rendered.subject,
            html: rendered.html,
            attachments,
        };
        match self.mailer.send(&email).await {
            Ok(()) => info!(submission_id = %submission_id, "notification email sent"),
            Err(e) => error!(submission_id = %submission_id, error = %e,
                "failed to send notification email"),
        }

        Ok(SubmissionReceipt {
            submission_id,
            document,
        })
    }
}
