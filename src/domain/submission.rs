//! Canonical submission document.
//!
//! The immutable nested representation of one loyalty-program setup
//! submission. Child fields stay plain strings; points, discounts, and
//! multipliers are opaque and keep their source formatting. Serializes with
//! camelCase names so the backup JSON matches the submitted wire shape.

use serde::{Deserialize, Serialize};

/// Metadata of the uploaded logo image. The byte payload stays with the
/// upload store; only the attachment packaging step reads it, once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoFileDescriptor {
    pub original_name: String,
    pub stored_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

/// Business partner identity section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInfo {
    pub business_name: String,
    pub card_key: String,
    pub tagline: String,
    pub website: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_file: Option<LogoFileDescriptor>,
}

/// Program-wide branding section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub primary_font: String,
    pub header_font: String,
}

/// One membership tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub name: String,
    pub base_points: String,
    pub room_nights: String,
    pub discount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    pub image_url: String,
    pub description: String,
}

/// One spending-to-point rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCredit {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<String>,
}

/// One reward category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCategory {
    pub name: String,
    pub description: String,
}

/// One reward. `category` holds the *name* of a reward category verbatim;
/// referential integrity against `reward_categories` is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub name: String,
    pub points_required: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// The canonical, immutable document built from one submission. Constructed
/// once per request by the assembler, never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDocument {
    /// RFC 3339 UTC timestamp with millisecond precision, captured once at
    /// assembly start. Sortable.
    pub submission_timestamp: String,
    pub partner_info: PartnerInfo,
    pub branding: Branding,
    pub tiers: Vec<Tier>,
    pub point_credits: Vec<PointCredit>,
    pub reward_categories: Vec<RewardCategory>,
    pub rewards: Vec<Reward>,
}
