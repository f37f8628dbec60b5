//! Per-session, append-only lists of generated playbooks.
//!
//! Nothing here is persisted: a session's history lives until the session is
//! reset or the process exits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// One past generation. `number` is its 1-based insertion position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub number: usize,
    pub text: String,
}

/// Ordered history of one session. Unbounded, no deduplication.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    entries: Vec<String>,
}

impl SessionHistory {
    /// Appends a playbook and returns its 1-based number.
    pub fn append(&mut self, text: impl Into<String>) -> usize {
        self.entries.push(text.into());
        self.entries.len()
    }

    /// Most recently appended playbook.
    pub fn latest(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Entries in display order: newest first.
    pub fn newest_first(&self) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .map(|(idx, text)| HistoryEntry {
                number: idx + 1,
                text: text.clone(),
            })
            .collect()
    }
}

/// All live sessions, keyed by session id. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, SessionHistory>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionHistory>> {
        // A panic while holding the lock cannot leave a Vec half-appended.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new, empty session.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().insert(id, SessionHistory::default());
        info!("Session {id} started");
        id
    }

    /// Returns `id` if it names a live session, otherwise starts a new one.
    pub fn resume_or_create(&self, id: Option<Uuid>) -> Uuid {
        match id {
            Some(id) if self.contains(id) => id,
            _ => self.create(),
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.lock().contains_key(&id)
    }

    /// Ends a session. Returns false if it did not exist.
    pub fn end(&self, id: Uuid) -> bool {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            info!("Session {id} ended");
        }
        removed
    }

    /// Appends to a session's history; `None` if the session is unknown.
    pub fn append(&self, id: Uuid, text: impl Into<String>) -> Option<usize> {
        self.lock().get_mut(&id).map(|h| h.append(text))
    }

    /// Snapshot of a session's history; `None` if the session is unknown.
    pub fn snapshot(&self, id: Uuid) -> Option<SessionHistory> {
        self.lock().get(&id).cloned()
    }

    pub fn latest(&self, id: Uuid) -> Option<String> {
        self.lock()
            .get(&id)
            .and_then(|h| h.latest().map(str::to_string))
    }
}
