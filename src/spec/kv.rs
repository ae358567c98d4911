//! # Key-Value Rows
//!
//! Ordered name/value rows shared by headers, query parameters, and form
//! fields. Duplicate names are permitted and order is preserved.

use serde::{Deserialize, Serialize};

/// A single editable name/value row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl KeyValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Rows with an empty name are skipped by every derived computation
    pub fn is_active(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Which half of a row an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvField {
    Name,
    Value,
}

/// Ordered list of editable rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KvList(Vec<KeyValue>);

impl KvList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a list from name/value tuples
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(n, v)| KeyValue::new(n, v)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&KeyValue> {
        self.0.get(index)
    }

    /// All rows, inactive ones included
    pub fn rows(&self) -> &[KeyValue] {
        &self.0
    }

    /// Replace one field of one row. Rows at other indices are untouched;
    /// an out-of-range index is a no-op.
    pub fn set(&mut self, index: usize, field: KvField, value: impl Into<String>) {
        if let Some(row) = self.0.get_mut(index) {
            match field {
                KvField::Name => row.name = value.into(),
                KvField::Value => row.value = value.into(),
            }
        }
    }

    /// Add an empty row at the end
    pub fn append(&mut self) {
        self.0.push(KeyValue::default());
    }

    /// Delete the row at `index`. An out-of-range index is a no-op.
    pub fn remove(&mut self, index: usize) {
        if index < self.0.len() {
            self.0.remove(index);
        }
    }

    /// Rows with a non-empty name, in original order. The stored list is
    /// never filtered in place, so this can be restarted any number of
    /// times.
    pub fn active_entries(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter().filter(|row| row.is_active())
    }
}

impl FromIterator<KeyValue> for KvList {
    fn from_iter<I: IntoIterator<Item = KeyValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KvList {
        KvList::from_pairs([("a", "1"), ("", "orphan"), ("b", "2")])
    }

    #[test]
    fn active_entries_should_skip_unnamed_rows_and_keep_order() {
        let list = sample();

        let names: Vec<&str> = list.active_entries().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["a", "b"]);
        // The stored list still holds all three rows
        assert_eq!(list.rows().len(), 3);
    }

    #[test]
    fn active_entries_should_be_restartable() {
        let list = sample();

        assert_eq!(list.active_entries().count(), 2);
        assert_eq!(list.active_entries().count(), 2);
    }

    #[test]
    fn set_should_only_touch_the_addressed_row() {
        let mut list = sample();

        list.set(0, KvField::Value, "changed");

        assert_eq!(list.get(0).unwrap().value, "changed");
        assert_eq!(list.get(1).unwrap().value, "orphan");
        assert_eq!(list.get(2).unwrap().value, "2");
    }

    #[test]
    fn set_out_of_range_should_be_a_no_op() {
        let mut list = sample();
        list.set(99, KvField::Name, "x");
        assert_eq!(list, sample());
    }

    #[test]
    fn append_should_add_an_empty_row() {
        let mut list = KvList::new();

        list.append();

        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0), Some(&KeyValue::default()));
        assert_eq!(list.active_entries().count(), 0);
    }

    #[test]
    fn remove_should_delete_the_row_at_index() {
        let mut list = sample();

        list.remove(1);

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().name, "b");
    }

    #[test]
    fn remove_out_of_range_should_not_panic() {
        let mut list = sample();
        list.remove(99);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn kv_list_should_round_trip_through_json() {
        let list = sample();

        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"a","value":"1"},{"name":"","value":"orphan"},{"name":"b","value":"2"}]"#
        );

        let back: KvList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }
}
