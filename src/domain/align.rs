//! Field aligner: zips parallel `name[]` form sequences into per-item rows.
//!
//! The form submits each repeated section (tiers, point credits, reward
//! categories, rewards) as independent parallel sequences keyed by position.
//! Alignment happens once, centrally, against a static rule table; the
//! positional-indexing logic never leaks into the assembler.

use super::fields::RawFieldBag;

/// Defaulting class for one member field, applied by the document assembler
/// when a position is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// Numeric-looking field, absent positions become `"0"`.
    Zero,
    /// Free-text field, absent positions become `""`.
    Empty,
    /// No defined default; absent positions stay absent.
    Absent,
}

/// One member field of a group: its wire key and defaulting class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberSpec {
    pub key: &'static str,
    pub default: FieldDefault,
}

/// Specification of one aligned group. `members[0]` is the name-bearing
/// field; its sequence length is the group length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    pub name: &'static str,
    pub members: &'static [MemberSpec],
}

/// Rule table for every repeated section of the setup form.
pub static GROUP_SPECS: GroupSpecs = GroupSpecs {
    tiers: GroupSpec {
        name: "tier",
        members: &[
            MemberSpec { key: "tierName[]", default: FieldDefault::Empty },
            MemberSpec { key: "tierBasePoints[]", default: FieldDefault::Zero },
            MemberSpec { key: "tierRoomNights[]", default: FieldDefault::Zero },
            MemberSpec { key: "tierDiscount[]", default: FieldDefault::Zero },
            MemberSpec { key: "tierColorOne[]", default: FieldDefault::Absent },
            MemberSpec { key: "tierColorTwo[]", default: FieldDefault::Absent },
            MemberSpec { key: "tierImage[]", default: FieldDefault::Empty },
            MemberSpec { key: "tierDescription[]", default: FieldDefault::Empty },
        ],
    },
    point_credits: GroupSpec {
        name: "pointCredit",
        members: &[
            MemberSpec { key: "spendingTypeName[]", default: FieldDefault::Empty },
            MemberSpec { key: "spendingTypeCurrency[]", default: FieldDefault::Absent },
            MemberSpec { key: "spendingTypeMultiplier[]", default: FieldDefault::Absent },
        ],
    },
    reward_categories: GroupSpec {
        name: "rewardCategory",
        members: &[
            MemberSpec { key: "rewardCategoryName[]", default: FieldDefault::Empty },
            MemberSpec { key: "rewardCategoryDescription[]", default: FieldDefault::Empty },
        ],
    },
    rewards: GroupSpec {
        name: "reward",
        members: &[
            MemberSpec { key: "rewardName[]", default: FieldDefault::Empty },
            MemberSpec { key: "rewardPoints[]", default: FieldDefault::Zero },
            MemberSpec { key: "rewardCategory[]", default: FieldDefault::Absent },
        ],
    },
};

/// The four groups of the setup form, one spec per repeated section.
#[derive(Debug, Clone, Copy)]
pub struct GroupSpecs {
    pub tiers: GroupSpec,
    pub point_credits: GroupSpec,
    pub reward_categories: GroupSpec,
    pub rewards: GroupSpec,
}

/// Positionally aligned view over one group's member sequences.
///
/// `rows[i][m]` is member `m`'s value for item `i`, `None` when the member's
/// own sequence is shorter than the group. Shape normalization only; content
/// validation and defaulting belong downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedGroup {
    pub spec: GroupSpec,
    rows: Vec<Vec<Option<String>>>,
}

impl AlignedGroup {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }
}

/// Align one group. Pure and deterministic: identical bag + spec yields an
/// identical group. Group length equals the name-bearing member's sequence
/// length; other members are read positionally.
pub fn align(bag: &RawFieldBag, spec: GroupSpec) -> AlignedGroup {
    let len = spec
        .members
        .first()
        .map(|m| bag.sequence(m.key).len())
        .unwrap_or(0);

    let rows = (0..len)
        .map(|i| {
            spec.members
                .iter()
                .map(|m| bag.sequence(m.key).get(i).cloned())
                .collect()
        })
        .collect();

    AlignedGroup { spec, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_bag() -> RawFieldBag {
        let mut bag = RawFieldBag::new();
        for name in ["Bronze", "Silver", "Gold"] {
            bag.insert("tierName[]", name);
        }
        // Shorter than the name-bearing field on purpose.
        bag.insert("tierBasePoints[]", "0");
        bag.insert("tierBasePoints[]", "1000");
        bag.insert("tierDescription[]", "Entry tier");
        bag
    }

    #[test]
    fn group_length_follows_name_bearing_field() {
        let group = align(&tier_bag(), GROUP_SPECS.tiers);
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn positions_beyond_member_length_are_absent() {
        let group = align(&tier_bag(), GROUP_SPECS.tiers);
        let rows = group.rows();

        // member 1 = tierBasePoints[]
        assert_eq!(rows[0][1].as_deref(), Some("0"));
        assert_eq!(rows[1][1].as_deref(), Some("1000"));
        assert_eq!(rows[2][1], None);

        // member 7 = tierDescription[], only one submitted
        assert_eq!(rows[0][7].as_deref(), Some("Entry tier"));
        assert_eq!(rows[1][7], None);
    }

    #[test]
    fn empty_bag_aligns_to_empty_group() {
        let group = align(&RawFieldBag::new(), GROUP_SPECS.rewards);
        assert!(group.is_empty());
    }

    #[test]
    fn alignment_is_deterministic() {
        let bag = tier_bag();
        let a = align(&bag, GROUP_SPECS.tiers);
        let b = align(&bag, GROUP_SPECS.tiers);
        assert_eq!(a, b);
    }
}
