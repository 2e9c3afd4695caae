use crate::config::StoreConfig;
use crate::contact::ContactRecord;
use crate::contact_index::ContactIndex;
use crate::contact_list::ContactList;
use crate::history::HistoryManager;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, trace};

/// Records every fresh store starts with
pub const SEED_CONTACTS: [(&str, &str); 2] = [
    ("Alice", "alice@example.com"),
    ("Bob", "bob@example.com"),
];

/// Result of a name search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(ContactRecord),
    NotFound,
    /// The query was empty, so nothing was looked up
    NoQuery,
}

impl SearchOutcome {
    pub fn found(&self) -> Option<&ContactRecord> {
        match self {
            SearchOutcome::Found(record) => Some(record),
            _ => None,
        }
    }
}

/// In-memory contact book: the list, its name index and the undo/redo log.
///
/// Every mutation snapshots the list first, then updates list and index
/// together. Undo and redo swap whole snapshots in and rebuild the index from
/// the restored list.
#[derive(Debug)]
pub struct ContactStore {
    list: ContactList,
    index: ContactIndex,
    history: HistoryManager,
}

/// The one lock every caller goes through, reads included
pub type SharedStore = Arc<Mutex<ContactStore>>;

impl ContactStore {
    /// Store seeded with the default contacts
    pub fn new() -> Self {
        Self::with_history(HistoryManager::new(), true)
    }

    /// Store with no contacts at all
    pub fn empty() -> Self {
        Self::with_history(HistoryManager::new(), false)
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        let history = match config.max_history_depth {
            Some(depth) => HistoryManager::with_max_depth(depth),
            None => HistoryManager::new(),
        };
        Self::with_history(history, config.seed_defaults)
    }

    fn with_history(history: HistoryManager, seed: bool) -> Self {
        let mut store = Self {
            list: ContactList::new(),
            index: ContactIndex::new(),
            history,
        };

        if seed {
            for (name, email) in SEED_CONTACTS {
                let record = ContactRecord::new(name, email);
                store.index.put(name, record.clone());
                store.list.append(record);
            }
        }

        store
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn list_all(&self) -> Vec<ContactRecord> {
        self.list.to_sequence()
    }

    /// Add a contact. Both fields are trimmed; nothing else is validated.
    pub fn add(&mut self, name: &str, email: &str) {
        let record = ContactRecord::new(name.trim(), email.trim());
        debug!(target: "store", "Adding contact {}", record);

        self.history.record_mutation(self.list.to_sequence());
        self.index.put(&record.name, record.clone());
        self.list.append(record);
    }

    /// Delete the contact the index holds for `name`. Unknown names are ignored.
    pub fn delete(&mut self, name: &str) {
        let Some(record) = self.index.get(name).cloned() else {
            trace!(target: "store", "Delete of unknown contact '{}' ignored", name);
            return;
        };
        debug!(target: "store", "Deleting contact {}", record);

        self.history.record_mutation(self.list.to_sequence());
        self.list.delete(&record);
        self.index.remove(name);

        // Another contact with the same name takes over the index slot
        if let Some(remaining) = self.list.find_last_by_name(name) {
            self.index.put(name, remaining.clone());
        }
    }

    pub fn search(&self, name: &str) -> SearchOutcome {
        if name.is_empty() {
            return SearchOutcome::NoQuery;
        }

        trace!(target: "store", "Searching for '{}'", name);
        match self.index.get(name) {
            Some(record) => SearchOutcome::Found(record.clone()),
            None => SearchOutcome::NotFound,
        }
    }

    /// Step back one mutation. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo() else {
            trace!(target: "store", "Nothing to undo");
            return false;
        };

        self.history.push_redo(self.list.to_sequence());
        self.restore(previous);
        debug!(
            target: "store",
            "Undo applied ({} undo / {} redo left)",
            self.history.undo_depth(),
            self.history.redo_depth()
        );
        true
    }

    /// Reapply one undone mutation. Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo() else {
            trace!(target: "store", "Nothing to redo");
            return false;
        };

        self.history.push_undo(self.list.to_sequence());
        self.restore(next);
        debug!(
            target: "store",
            "Redo applied ({} undo / {} redo left)",
            self.history.undo_depth(),
            self.history.redo_depth()
        );
        true
    }

    fn restore(&mut self, snapshot: Vec<ContactRecord>) {
        self.list.from_sequence(snapshot);
        self.index.rebuild(&self.list);
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.list.iter().map(|r| r.name.clone()).collect()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Whether the index holds exactly one entry per distinct lowercased name
    /// in the list, each pointing at a record the list still contains.
    pub fn index_consistent(&self) -> bool {
        let list_keys: HashSet<String> = self.list.iter().map(|r| r.name_key()).collect();
        if list_keys.len() != self.index.len() {
            return false;
        }

        self.index.iter().all(|(key, record)| {
            list_keys.contains(key)
                && record.name_key() == *key
                && self.list.find_last_by_name(key) == Some(record)
        })
    }
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock a shared store, recovering the guard if a previous holder panicked
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, ContactStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
