use crate::contact::{name_key, ContactRecord};
use crate::contact_list::ContactList;
use std::collections::HashMap;

/// Case-insensitive name lookup over the contact list.
///
/// Holds copies of the records in the list; the store keeps the two in step
/// on every mutation.
#[derive(Debug, Default, Clone)]
pub struct ContactIndex {
    entries: HashMap<String, ContactRecord>,
}

impl ContactIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, name: &str, record: ContactRecord) {
        self.entries.insert(name_key(name), record);
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.remove(&name_key(name));
    }

    pub fn get(&self, name: &str) -> Option<&ContactRecord> {
        self.entries.get(&name_key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name_key(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear and repopulate from a single scan of `list`.
    ///
    /// Later records overwrite earlier ones with the same name, which matches
    /// what a run of `put` calls in list order would leave behind.
    pub fn rebuild(&mut self, list: &ContactList) {
        self.entries.clear();
        for record in list {
            self.entries.insert(record.name_key(), record.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContactRecord)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get_ignore_case() {
        let mut index = ContactIndex::new();
        index.put("Alice", ContactRecord::new("Alice", "alice@example.com"));

        assert_eq!(
            index.get("ALICE").map(|r| r.email.as_str()),
            Some("alice@example.com")
        );
        assert!(index.contains("alice"));
        assert!(index.get("bob").is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let mut index = ContactIndex::new();
        index.put("Alice", ContactRecord::new("Alice", "old@example.com"));
        index.put("alice", ContactRecord::new("alice", "new@example.com"));

        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get("Alice").map(|r| r.email.as_str()),
            Some("new@example.com")
        );
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut index = ContactIndex::new();
        index.put("Alice", ContactRecord::new("Alice", "alice@example.com"));
        index.remove("nobody");
        assert_eq!(index.len(), 1);

        index.remove("ALICE");
        assert!(index.is_empty());
    }

    #[test]
    fn test_rebuild_drops_stale_entries() {
        let mut index = ContactIndex::new();
        index.put("Ghost", ContactRecord::new("Ghost", "ghost@example.com"));

        let list: ContactList = vec![
            ContactRecord::new("Alice", "a1@example.com"),
            ContactRecord::new("Bob", "bob@example.com"),
            ContactRecord::new("alice", "a2@example.com"),
        ]
        .into_iter()
        .collect();
        index.rebuild(&list);

        assert_eq!(index.len(), 2);
        assert!(!index.contains("ghost"));
        assert_eq!(
            index.get("alice").map(|r| r.email.as_str()),
            Some("a2@example.com")
        );
    }
}
