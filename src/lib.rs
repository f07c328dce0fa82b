//! Loyalty Intake Library
//!
//! Accepts multi-section loyalty-program setup submissions, normalizes the
//! parallel-array form fields into a canonical document, persists a backup
//! copy, and dispatches an HTML notification with the logo attached.
//!
//! ## Modules
//!
//! - [`domain`] - Pure core: raw fields, group alignment, document assembly
//! - [`render`] - Notification rendering (HTML + subject line)
//! - [`infra`] - Collaborator seams and the submission pipeline
//! - [`api`] - REST API routes and structured errors
//! - [`server`] - Configuration and HTTP server bootstrap

pub mod api;
pub mod domain;
pub mod infra;
pub mod render;
pub mod server;

// Re-export commonly used types
pub use domain::{
    AlignedGroup, Branding, FieldValue, LogoFileDescriptor, PartnerInfo, PointCredit,
    RawFieldBag, Reward, RewardCategory, SubmissionDocument, Tier, ValidationError,
};

pub use infra::{
    BackupStore, Clock, Mailer, Result, SubmissionPipeline, SubmissionReceipt, SubmitError,
};
