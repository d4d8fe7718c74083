use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::UnknownListKind;
use crate::schedule::SlotField;

/// The four independently maintained value lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Rooms,
    Groups,
    Lectures,
    Teachers,
}

impl ListKind {
    pub const ALL: [ListKind; 4] = [
        ListKind::Rooms,
        ListKind::Groups,
        ListKind::Lectures,
        ListKind::Teachers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Rooms => "rooms",
            ListKind::Groups => "groups",
            ListKind::Lectures => "lectures",
            ListKind::Teachers => "teachers",
        }
    }

    /// Slot field referencing this list. Rooms are keys of the store, not a slot field.
    pub fn slot_field(&self) -> Option<SlotField> {
        match self {
            ListKind::Rooms => None,
            ListKind::Groups => Some(SlotField::Group),
            ListKind::Lectures => Some(SlotField::Lecture),
            ListKind::Teachers => Some(SlotField::Teacher),
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListKind {
    type Err = UnknownListKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownListKind(s.to_string()))
    }
}

impl Serialize for ListKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ordered set of distinct, non-empty strings. Insertion order is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceList {
    values: Vec<String>,
}

impl ReferenceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from arbitrary input, dropping empty strings and later duplicates
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self {
            values: values.into_iter().map(Into::into).collect(),
        };
        list.normalize();
        list
    }

    /// Appends `value` and re-normalizes. Returns whether the list grew.
    pub fn add(&mut self, value: impl Into<String>) -> bool {
        let before = self.values.len();
        self.values.push(value.into());
        self.normalize();
        self.values.len() > before
    }

    /// Removes the matching entry. Returns whether anything was removed.
    pub fn remove(&mut self, value: &str) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(pos) => {
                self.values.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    /// Alphabetical copy for display; never used for persistence
    pub fn sorted(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.iter().collect();
        values.sort_unstable();
        values
    }

    fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.values.retain(|v| !v.is_empty() && seen.insert(v.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_dedups_and_drops_empty() {
        let mut list = ReferenceList::new();
        assert!(list.add("G2"));
        assert!(list.add("G1"));
        assert!(!list.add("G2"));
        assert!(!list.add(""));
        assert_eq!(list.as_slice(), &["G2".to_string(), "G1".to_string()]);
    }

    #[test]
    fn from_values_keeps_first_occurrence() {
        let list = ReferenceList::from_values(["b", "", "a", "b", "c", "a"]);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(list.sorted(), vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut list = ReferenceList::from_values(["T1", "T2"]);
        assert!(list.remove("T1"));
        assert!(!list.remove("T1"));
        assert!(!list.remove("t2"));
        assert_eq!(list.len(), 1);
        assert!(list.contains("T2"));
    }

    #[test]
    fn kind_parses_plural_names() {
        assert_eq!("groups".parse::<ListKind>().unwrap(), ListKind::Groups);
        assert_eq!("Teachers".parse::<ListKind>().unwrap(), ListKind::Teachers);
        assert!("group".parse::<ListKind>().is_err());
        assert_eq!(ListKind::Rooms.slot_field(), None);
        assert_eq!(ListKind::Lectures.slot_field(), Some(SlotField::Lecture));
    }
}
