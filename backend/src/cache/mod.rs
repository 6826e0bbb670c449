//! Session store - in-memory map of live sessions keyed by id.
//!
//! Nothing is persisted. When the store is full the oldest session is
//! evicted to make room.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::config::{DEFAULT_MAX_SESSIONS, DEFAULT_MAX_UPLOAD_BYTES};
use crate::error::{ServerError, ServerResult};
use crate::session::Session;

#[derive(Default)]
struct Inner {
    sessions: HashMap<Uuid, Session>,
    /// Ids in creation order, oldest first
    order: VecDeque<Uuid>,
}

/// Shared handle to all sessions. Cloning shares the same store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
    max_sessions: usize,
    max_upload_bytes: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize, max_upload_bytes: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            max_sessions: max_sessions.max(1),
            max_upload_bytes,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Open a new empty session and return its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut inner = self.lock();

        while inner.sessions.len() >= self.max_sessions {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.sessions.remove(&oldest);
                }
                None => break,
            }
        }

        inner
            .sessions
            .insert(id, Session::with_max_upload(self.max_upload_bytes));
        inner.order.push_back(id);
        id
    }

    /// Run `f` on session `id` while holding the store lock.
    ///
    /// The lock is shared by every session, so `f` should not parse or do
    /// other heavy work.
    pub fn with_session<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> ServerResult<T> {
        let mut inner = self.lock();
        let session = inner.sessions.get_mut(&id).ok_or(ServerError::NotFound(id))?;
        Ok(f(session))
    }

    /// Drop session `id`. Returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        let mut inner = self.lock();
        inner.order.retain(|existing| *existing != id);
        inner.sessions.remove(&id).is_some()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.lock().sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS, DEFAULT_MAX_UPLOAD_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CleanOptions;

    #[test]
    fn test_create_and_use() {
        let store = SessionStore::default();
        let id = store.create();

        let loaded = store
            .with_session(id, |s| s.on_file_loaded("a.csv", b"x\n1\n1\n").map(|l| l.stats.row_count))
            .unwrap()
            .unwrap();
        assert_eq!(loaded, 2);

        let report = store
            .with_session(id, |s| s.on_clean_requested(CleanOptions::all()))
            .unwrap()
            .unwrap()
            .report;
        assert_eq!(report.removed_duplicates, 1);
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::default();
        let result = store.with_session(Uuid::new_v4(), |s| s.can_clean());
        assert!(matches!(result, Err(ServerError::NotFound(_))));
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::default();
        let id = store.create();
        assert!(store.contains(id));
        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_oldest_evicted_when_full() {
        let store = SessionStore::new(2, 1024);
        let first = store.create();
        let second = store.create();
        let third = store.create();

        assert_eq!(store.len(), 2);
        assert!(!store.contains(first));
        assert!(store.contains(second));
        assert!(store.contains(third));
    }

    #[test]
    fn test_clones_share_sessions() {
        let store = SessionStore::default();
        let handle = store.clone();
        let id = store.create();
        assert!(handle.contains(id));
    }

    #[test]
    fn test_upload_limit_applies_to_sessions() {
        let store = SessionStore::new(4, 4);
        let id = store.create();
        let result = store
            .with_session(id, |s| s.on_file_loaded("a.csv", b"x\n1\n2\n"))
            .unwrap();
        assert!(result.is_err());
    }
}
