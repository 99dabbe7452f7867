//! Foreign-key index over child-member rows.

use std::collections::BTreeMap;

use kobo_model::Record;

/// Child rows indexed by canonical foreign key.
///
/// Rows under one key keep configuration order then source row order,
/// which is the order they appear in the submission document.
#[derive(Debug, Default, Clone)]
pub struct ChildIndex {
    by_key: BTreeMap<String, Vec<Record>>,
    row_count: usize,
}

impl ChildIndex {
    pub fn insert(&mut self, key: String, record: Record) {
        self.by_key.entry(key).or_default().push(record);
        self.row_count += 1;
    }

    /// Child rows matching the given canonical parent key.
    ///
    /// An empty result is a valid, common case.
    pub fn matching(&self, parent_key: &str) -> &[Record] {
        self.by_key
            .get(parent_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total indexed child rows across all keys.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of distinct parent keys with at least one child row.
    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(row: usize, fid: &str, name: &str) -> Record {
        Record::new(
            row,
            vec![
                ("FID".to_string(), fid.to_string()),
                ("Individual_FullName".to_string(), name.to_string()),
            ],
        )
    }

    #[test]
    fn matching_preserves_insertion_order() {
        let mut index = ChildIndex::default();
        index.insert("1".to_string(), member(1, "1", "First"));
        index.insert("2".to_string(), member(2, "2", "Other"));
        index.insert("1".to_string(), member(3, "1", "Second"));

        let matched = index.matching("1");
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].get("Individual_FullName"), Some("First"));
        assert_eq!(matched[1].get("Individual_FullName"), Some("Second"));
    }

    #[test]
    fn matching_unknown_key_is_empty() {
        let index = ChildIndex::default();
        assert!(index.matching("42").is_empty());
    }
}
