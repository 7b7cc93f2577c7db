//! Attribute sets for sparse config updates.

use std::collections::BTreeSet;

/// The set of config-record fields a given update call is authorized to change.
///
/// An update submits `(old, new, attrs)`; only the fields named here are
/// taken from `new`, letting callers patch one attribute without clobbering
/// the rest of the record. Names must come from the record's declared
/// mutable-field list; anything else is a validation error, never silently
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSet(BTreeSet<String>);

impl AttrSet {
    /// Builds an attribute set from any collection of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// True if `name` is in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// True if the set names no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the attribute names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the names in the set that are not in `mutable`.
    ///
    /// An empty result means the set is valid against that record's
    /// declared mutable fields.
    pub fn unknown_names(&self, mutable: &[&str]) -> Vec<String> {
        self.0
            .iter()
            .filter(|name| !mutable.contains(&name.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let attrs = AttrSet::new(["admin_speed"]);
        assert!(attrs.contains("admin_speed"));
        assert!(!attrs.contains("admin_direction"));
    }

    #[test]
    fn test_unknown_names_empty_for_valid_set() {
        let attrs = AttrSet::new(["admin_speed", "admin_direction"]);
        let unknown = attrs.unknown_names(&["admin_speed", "admin_direction"]);
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_unknown_names_reports_invalid_entries() {
        let attrs = AttrSet::new(["admin_speed", "speed", "fan_id"]);
        let unknown = attrs.unknown_names(&["admin_speed", "admin_direction"]);
        assert_eq!(unknown, vec!["fan_id".to_string(), "speed".to_string()]);
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let attrs = AttrSet::new(["admin_speed", "admin_speed"]);
        assert_eq!(attrs.iter().count(), 1);
    }
}
