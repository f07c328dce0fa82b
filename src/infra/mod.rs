//! Infrastructure for the submission pipeline.
//!
//! Collaborator seams (clock, backup store, mailer), their filesystem and
//! SendGrid implementations, and the orchestrating pipeline.

mod backup;
mod clock;
mod error;
mod mailer;
mod pipeline;
mod upload;

pub use backup::{BackupStore, FsBackupStore};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, SubmitError, UploadRejection};
pub use mailer::{EmailAttachment, Mailer, OutboundEmail, SendGridMailer};
pub use pipeline::{SubmissionPipeline, SubmissionReceipt};
pub use upload::{StoredLogo, UploadStore, LOGO_FIELD, MAX_LOGO_BYTES};
