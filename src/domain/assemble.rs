//! Document assembler: aligned groups + singletons -> canonical document.
//!
//! Defaulting happens here, positionally, from the group rule table. The
//! pipeline trades strict validation for submission availability: the only
//! hard requirement is a non-empty business name.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use super::align::{align, AlignedGroup, FieldDefault, GROUP_SPECS};
use super::fields::RawFieldBag;
use super::submission::{
    Branding, LogoFileDescriptor, PartnerInfo, PointCredit, Reward, RewardCategory,
    SubmissionDocument, Tier,
};

/// A required singleton field was empty. Aborts the pipeline before any side
/// effect.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("missing required field: {field}")]
pub struct ValidationError {
    pub field: &'static str,
}

/// The four aligned groups of one submission.
#[derive(Debug, Clone)]
pub struct AlignedGroups {
    pub tiers: AlignedGroup,
    pub point_credits: AlignedGroup,
    pub reward_categories: AlignedGroup,
    pub rewards: AlignedGroup,
}

/// Align every repeated section of the form against the rule table.
pub fn align_all(bag: &RawFieldBag) -> AlignedGroups {
    AlignedGroups {
        tiers: align(bag, GROUP_SPECS.tiers),
        point_credits: align(bag, GROUP_SPECS.point_credits),
        reward_categories: align(bag, GROUP_SPECS.reward_categories),
        rewards: align(bag, GROUP_SPECS.rewards),
    }
}

/// Resolve one member value of an aligned row per its defaulting class.
fn resolve(group: &AlignedGroup, row: &[Option<String>], member: usize) -> Option<String> {
    match &row[member] {
        Some(v) => Some(v.clone()),
        None => match group.spec.members[member].default {
            FieldDefault::Zero => Some("0".to_string()),
            FieldDefault::Empty => Some(String::new()),
            FieldDefault::Absent => None,
        },
    }
}

fn required(group: &AlignedGroup, row: &[Option<String>], member: usize) -> String {
    resolve(group, row, member).unwrap_or_default()
}

/// Build the canonical document from one request's inputs.
///
/// Pure in its inputs; `now` is the injected clock reading captured once at
/// assembly start. Missing or malformed optional data never fails assembly.
pub fn assemble(
    bag: &RawFieldBag,
    groups: &AlignedGroups,
    logo: Option<LogoFileDescriptor>,
    now: DateTime<Utc>,
) -> Result<SubmissionDocument, ValidationError> {
    let business_name = bag.single("partnerName");
    if business_name.is_empty() {
        return Err(ValidationError { field: "partnerName" });
    }

    let tiers = groups
        .tiers
        .rows()
        .iter()
        .map(|row| Tier {
            name: required(&groups.tiers, row, 0),
            base_points: required(&groups.tiers, row, 1),
            room_nights: required(&groups.tiers, row, 2),
            discount: required(&groups.tiers, row, 3),
            primary_color: resolve(&groups.tiers, row, 4),
            secondary_color: resolve(&groups.tiers, row, 5),
            image_url: required(&groups.tiers, row, 6),
            description: required(&groups.tiers, row, 7),
        })
        .collect();

    let point_credits = groups
        .point_credits
        .rows()
        .iter()
        .map(|row| PointCredit {
            category: required(&groups.point_credits, row, 0),
            currency: resolve(&groups.point_credits, row, 1),
            multiplier: resolve(&groups.point_credits, row, 2),
        })
        .collect();

    let reward_categories = groups
        .reward_categories
        .rows()
        .iter()
        .map(|row| RewardCategory {
            name: required(&groups.reward_categories, row, 0),
            description: required(&groups.reward_categories, row, 1),
        })
        .collect();

    let rewards = groups
        .rewards
        .rows()
        .iter()
        .map(|row| Reward {
            name: required(&groups.rewards, row, 0),
            points_required: required(&groups.rewards, row, 1),
            // Stored verbatim; whether the named category exists is not
            // this stage's concern.
            category: resolve(&groups.rewards, row, 2),
        })
        .collect();

    Ok(SubmissionDocument {
        submission_timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        partner_info: PartnerInfo {
            business_name: business_name.to_string(),
            card_key: bag.single("cardKey").to_string(),
            tagline: bag.single("tagline").to_string(),
            website: bag.single("website").to_string(),
            logo_file: logo,
        },
        branding: Branding {
            primary_color: bag.single("primaryColor").to_string(),
            secondary_color: bag.single("secondaryColor").to_string(),
            accent_color: bag.single("accentColor").to_string(),
            primary_font: bag.single("primaryFont").to_string(),
            header_font: bag.single("headerFont").to_string(),
        },
        tiers,
        point_credits,
        reward_categories,
        rewards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 30, 45).unwrap()
    }

    fn minimal_bag() -> RawFieldBag {
        let mut bag = RawFieldBag::new();
        bag.insert("partnerName", "Hotel Aurora");
        bag
    }

    #[test]
    fn missing_business_name_is_rejected() {
        let bag = RawFieldBag::new();
        let groups = align_all(&bag);
        let err = assemble(&bag, &groups, None, fixed_now()).unwrap_err();
        assert_eq!(err.field, "partnerName");
    }

    #[test]
    fn absent_singletons_become_empty_strings() {
        let bag = minimal_bag();
        let groups = align_all(&bag);
        let doc = assemble(&bag, &groups, None, fixed_now()).unwrap();
        assert_eq!(doc.partner_info.card_key, "");
        assert_eq!(doc.branding.primary_color, "");
    }

    #[test]
    fn timestamp_is_sortable_rfc3339_millis() {
        let bag = minimal_bag();
        let groups = align_all(&bag);
        let doc = assemble(&bag, &groups, None, fixed_now()).unwrap();
        assert_eq!(doc.submission_timestamp, "2026-08-07T12:30:45.000Z");
    }

    #[test]
    fn short_member_sequences_default_by_class() {
        let mut bag = minimal_bag();
        bag.insert("tierName[]", "Bronze");
        bag.insert("tierName[]", "Silver");
        bag.insert("tierBasePoints[]", "500");
        bag.insert("tierColorOne[]", "#cd7f32");

        let groups = align_all(&bag);
        let doc = assemble(&bag, &groups, None, fixed_now()).unwrap();

        assert_eq!(doc.tiers.len(), 2);
        assert_eq!(doc.tiers[0].base_points, "500");
        assert_eq!(doc.tiers[1].base_points, "0"); // Zero class
        assert_eq!(doc.tiers[1].image_url, ""); // Empty class
        assert_eq!(doc.tiers[0].primary_color.as_deref(), Some("#cd7f32"));
        assert_eq!(doc.tiers[1].primary_color, None); // Absent class
    }

    #[test]
    fn reward_category_reference_is_stored_verbatim() {
        let mut bag = minimal_bag();
        bag.insert("rewardName[]", "Free Night");
        bag.insert("rewardPoints[]", "25000");
        bag.insert("rewardCategory[]", "No Such Category");

        let groups = align_all(&bag);
        let doc = assemble(&bag, &groups, None, fixed_now()).unwrap();
        assert!(doc.reward_categories.is_empty());
        assert_eq!(doc.rewards[0].category.as_deref(), Some("No Such Category"));
    }
}
