//! Raw form field representation.
//!
//! The upload transport hands every text part over one at a time and does not
//! distinguish single from repeated fields ahead of time. `RawFieldBag`
//! captures that shape: the first value under a name is `Single`, a second
//! occurrence promotes it to `Repeated`.

use std::collections::HashMap;

/// A submitted form value: one string, or the ordered values of a repeated
/// field (the `name[]` wire convention).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    Repeated(Vec<String>),
}

impl FieldValue {
    /// View the value as an ordered sequence. A single string is a
    /// one-element sequence.
    pub fn as_sequence(&self) -> &[String] {
        match self {
            FieldValue::Single(v) => std::slice::from_ref(v),
            FieldValue::Repeated(vs) => vs.as_slice(),
        }
    }
}

/// Unnormalized mapping of submitted field names to values. Ephemeral;
/// owned by one request.
#[derive(Debug, Clone, Default)]
pub struct RawFieldBag {
    fields: HashMap<String, FieldValue>,
}

impl RawFieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one submitted value. Repeated names accumulate in submission
    /// order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.fields.entry(name.into()) {
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(FieldValue::Single(value));
            }
            std::collections::hash_map::Entry::Occupied(mut e) => {
                let slot = e.get_mut();
                match slot {
                    FieldValue::Single(first) => {
                        let first = std::mem::take(first);
                        *slot = FieldValue::Repeated(vec![first, value]);
                    }
                    FieldValue::Repeated(vs) => vs.push(value),
                }
            }
        }
    }

    /// Singleton accessor: the first value under `name`, or the empty string
    /// when absent. Missing singletons are never an error.
    pub fn single(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .and_then(|v| v.as_sequence().first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Sequence accessor: all values under `name` in submission order, empty
    /// when absent.
    pub fn sequence(&self, name: &str) -> &[String] {
        self.fields.get(name).map(FieldValue::as_sequence).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_then_repeated_promotion() {
        let mut bag = RawFieldBag::new();
        bag.insert("tierName[]", "Bronze");
        assert_eq!(bag.sequence("tierName[]"), ["Bronze"]);

        bag.insert("tierName[]", "Silver");
        assert_eq!(bag.sequence("tierName[]"), ["Bronze", "Silver"]);
    }

    #[test]
    fn absent_field_is_empty() {
        let bag = RawFieldBag::new();
        assert_eq!(bag.single("partnerName"), "");
        assert!(bag.sequence("tierName[]").is_empty());
    }

    #[test]
    fn single_accessor_reads_first_value() {
        let mut bag = RawFieldBag::new();
        bag.insert("partnerName", "Hotel Aurora");
        bag.insert("partnerName", "duplicate");
        assert_eq!(bag.single("partnerName"), "Hotel Aurora");
    }
}
