use crate::contact::{name_key, ContactRecord};
use std::fmt;

/// Singly linked list of contacts.
///
/// Nodes live in a slot arena and link to each other by slot number, so the
/// list owns every node outright and no link ever escapes to callers. Slots
/// freed by `delete` are reused by later appends.
#[derive(Default)]
pub struct ContactList {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

struct Node {
    record: ContactRecord,
    next: Option<usize>,
}

impl ContactList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add a record as the new tail node
    pub fn append(&mut self, record: ContactRecord) {
        let slot = self.allocate(Node { record, next: None });

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.nodes[tail].as_mut() {
                    node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }

        self.tail = Some(slot);
        self.len += 1;
    }

    /// Remove the first node equal to `record`.
    ///
    /// Returns false (and leaves the list untouched) when nothing matches.
    pub fn delete(&mut self, record: &ContactRecord) -> bool {
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(slot) = cursor {
            let (matches, next) = match self.nodes[slot].as_ref() {
                Some(node) => (node.record == *record, node.next),
                None => break,
            };

            if matches {
                self.unlink(prev, slot, next);
                return true;
            }

            prev = Some(slot);
            cursor = next;
        }

        false
    }

    /// Case-insensitive scan, first match wins
    pub fn find_by_name(&self, name: &str) -> Option<&ContactRecord> {
        let key = name_key(name);
        self.iter().find(|record| record.name_key() == key)
    }

    /// Case-insensitive scan, last match wins
    pub fn find_last_by_name(&self, name: &str) -> Option<&ContactRecord> {
        let key = name_key(name);
        self.iter().filter(|record| record.name_key() == key).last()
    }

    /// Independent copies of every record, in list order
    pub fn to_sequence(&self) -> Vec<ContactRecord> {
        self.iter().cloned().collect()
    }

    /// Replace the whole list with nodes built from `records`, in order
    pub fn from_sequence<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = ContactRecord>,
    {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;

        for record in records {
            self.append(record);
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn allocate(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn unlink(&mut self, prev: Option<usize>, slot: usize, next: Option<usize>) {
        match prev {
            Some(prev_slot) => {
                if let Some(node) = self.nodes[prev_slot].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        if self.tail == Some(slot) {
            self.tail = prev;
        }

        self.nodes[slot] = None;
        self.free.push(slot);
        self.len -= 1;
    }
}

pub struct Iter<'a> {
    list: &'a ContactList,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ContactRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.cursor?)?.as_ref()?;
        self.cursor = node.next;
        Some(&node.record)
    }
}

impl<'a> IntoIterator for &'a ContactList {
    type Item = &'a ContactRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ContactRecord> for ContactList {
    fn from_iter<I: IntoIterator<Item = ContactRecord>>(iter: I) -> Self {
        let mut list = Self::new();
        list.from_sequence(iter);
        list
    }
}

impl fmt::Debug for ContactList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ContactRecord {
        ContactRecord::new(name, format!("{}@example.com", name.to_lowercase()))
    }

    fn names(list: &ContactList) -> Vec<String> {
        list.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut list = ContactList::new();
        list.append(record("Alice"));
        list.append(record("Bob"));
        list.append(record("Carol"));

        assert_eq!(names(&list), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_delete_head_middle_and_tail() {
        let mut list: ContactList = ["A", "B", "C", "D"].iter().map(|n| record(n)).collect();

        assert!(list.delete(&record("A")));
        assert_eq!(names(&list), vec!["B", "C", "D"]);

        assert!(list.delete(&record("C")));
        assert_eq!(names(&list), vec!["B", "D"]);

        assert!(list.delete(&record("D")));
        assert_eq!(names(&list), vec!["B"]);

        // Tail must be repaired so appends still land at the end
        list.append(record("E"));
        assert_eq!(names(&list), vec!["B", "E"]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut list: ContactList = ["A", "B"].iter().map(|n| record(n)).collect();

        assert!(!list.delete(&record("Z")));
        // Same name, different email is a different record
        assert!(!list.delete(&ContactRecord::new("A", "other@example.com")));
        assert_eq!(names(&list), vec!["A", "B"]);
    }

    #[test]
    fn test_delete_only_first_duplicate() {
        let mut list = ContactList::new();
        list.append(record("A"));
        list.append(record("B"));
        list.append(record("A"));

        list.delete(&record("A"));
        assert_eq!(names(&list), vec!["B", "A"]);
    }

    #[test]
    fn test_delete_last_node_empties_list() {
        let mut list = ContactList::new();
        list.append(record("Solo"));
        list.delete(&record("Solo"));

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);

        list.append(record("Next"));
        assert_eq!(names(&list), vec!["Next"]);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list: ContactList = ["A", "B", "C"].iter().map(|n| record(n)).collect();
        list.delete(&record("B"));
        list.append(record("D"));

        assert_eq!(list.nodes.len(), 3);
        assert_eq!(names(&list), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let mut list = ContactList::new();
        list.append(ContactRecord::new("Alice", "first@example.com"));
        list.append(ContactRecord::new("ALICE", "second@example.com"));

        assert_eq!(
            list.find_by_name("alice").map(|r| r.email.as_str()),
            Some("first@example.com")
        );
        assert_eq!(
            list.find_last_by_name("alice").map(|r| r.email.as_str()),
            Some("second@example.com")
        );
        assert!(list.find_by_name("bob").is_none());
    }

    #[test]
    fn test_sequence_export_is_independent() {
        let mut list: ContactList = ["A", "B"].iter().map(|n| record(n)).collect();
        let snapshot = list.to_sequence();

        list.append(record("C"));
        list.delete(&record("A"));

        assert_eq!(snapshot, vec![record("A"), record("B")]);
    }

    #[test]
    fn test_from_sequence_replaces_contents() {
        let mut list: ContactList = ["A", "B", "C"].iter().map(|n| record(n)).collect();
        list.from_sequence(vec![record("C"), record("A")]);

        assert_eq!(names(&list), vec!["C", "A"]);
        assert_eq!(list.len(), 2);

        list.from_sequence(Vec::new());
        assert!(list.is_empty());
    }
}
