//! Error types for the submission pipeline and its collaborators.

use thiserror::Error;

use crate::domain::ValidationError;

/// Why an uploaded file was refused at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    /// MIME type does not start with `image/`.
    NotAnImage,
    /// Payload exceeds the upload size limit.
    TooLarge,
}

impl std::fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadRejection::NotAnImage => write!(f, "Only image files are allowed!"),
            UploadRejection::TooLarge => write!(f, "File too large. Maximum size is 5MB."),
        }
    }
}

/// Errors that can occur while processing one submission.
///
/// Only `Validation` and `UploadRejected` flip the caller-visible result to
/// failure. `BackupWrite`, `Dispatch`, and `Cleanup` are logged and swallowed
/// by the pipeline so a partial side-effect failure never prevents the
/// submission from being recorded.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Required singleton field was empty; aborts before any side effect.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Wrong MIME type or oversized upload; the pipeline is never invoked.
    #[error("upload rejected: {0}")]
    UploadRejected(UploadRejection),

    /// Backup copy could not be written.
    #[error("backup write failed: {0}")]
    BackupWrite(#[source] std::io::Error),

    /// Notification dispatch failed.
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    /// Temporary upload cleanup failed. Logged only, never propagated.
    #[error("cleanup failed: {0}")]
    Cleanup(#[source] std::io::Error),

    /// Unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, SubmitError>;
