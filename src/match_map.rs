//! Values extracted by a single match attempt, keyed by pattern name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pattern name to matched text. The first value recorded for a name wins;
/// later records under the same name are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchMap {
    values: BTreeMap<String, String>,
}

impl MatchMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `name` unless the name already has a value.
    /// Returns whether the value was stored.
    pub fn record(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.values.contains_key(name) {
            return false;
        }
        self.values.insert(name.to_owned(), value.into());
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MatchMap {
    /// Collects with the same first-write-wins rule as [`MatchMap::record`].
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.record(&name.into(), value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_wins() {
        let mut map = MatchMap::new();
        assert!(map.record("unit", "kg"));
        assert!(!map.record("unit", "g"));
        assert_eq!(map.get("unit"), Some("kg"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_collect_keeps_first() {
        let map: MatchMap = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let map: MatchMap = [("svars, skaitlis", "2")].into_iter().collect();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"svars, skaitlis":"2"}"#);
    }
}
