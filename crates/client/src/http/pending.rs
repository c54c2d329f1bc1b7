//! Pending-request registry
//!
//! Tracks every in-flight request by a fingerprint of its identity so a
//! duplicate can cancel its predecessor (last-writer-wins). Entries are
//! removed by an RAII guard when the request settles, whatever the
//! outcome.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fingerprint of a request's identity: method, absolute URL and the
/// serialized query/body parameters.
pub(crate) fn fingerprint(method: &Method, url: &str, params: &str) -> String {
    format!("{method}&{url}&{params}")
}

struct PendingEntry {
    id: u64,
    token: CancellationToken,
}

#[derive(Default)]
struct Inner {
    entries: Mutex<HashMap<String, PendingEntry>>,
    next_id: AtomicU64,
}

/// Registry of in-flight requests keyed by fingerprint.
///
/// Invariant: at most one live entry per key. Registering a colliding key
/// cancels the earlier request before the new one is dispatched; the
/// cancel-then-replace step runs synchronously under the lock, so it
/// cannot interleave with another mutation of the same key.
#[derive(Clone, Default)]
pub(crate) struct PendingRequests {
    inner: Arc<Inner>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh entry under `key`, cancelling any predecessor.
    ///
    /// The returned guard owns the entry: dropping it removes the entry
    /// from the registry (unless a newer request already replaced it).
    pub fn register(&self, key: String) -> PendingGuard {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        let mut entries = self.inner.entries.lock();
        if let Some(previous) = entries.insert(key.clone(), PendingEntry { id, token: token.clone() })
        {
            debug!(%key, "cancelling duplicate in-flight request");
            previous.token.cancel();
        }
        drop(entries);

        PendingGuard { registry: self.clone(), key, id, token }
    }

    /// Number of in-flight entries. Used by leak checks in tests.
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    fn remove(&self, key: &str, id: u64) {
        let mut entries = self.inner.entries.lock();
        // Only remove our own entry: a superseded request settling late
        // must not evict its successor.
        if entries.get(key).is_some_and(|entry| entry.id == id) {
            entries.remove(key);
        }
    }
}

/// RAII handle for one registered request.
pub(crate) struct PendingGuard {
    registry: PendingRequests,
    key: String,
    id: u64,
    token: CancellationToken,
}

impl PendingGuard {
    /// Token cancelled when a duplicate request supersedes this one.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.registry.remove(&self.key, self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_combines_method_url_and_params() {
        let key = fingerprint(&Method::GET, "https://api/x", r#"{"a":1}"#);
        assert_eq!(key, r#"GET&https://api/x&{"a":1}"#);
        assert_ne!(key, fingerprint(&Method::POST, "https://api/x", r#"{"a":1}"#));
    }

    #[test]
    fn colliding_key_cancels_the_earlier_request() {
        let registry = PendingRequests::new();
        let first = registry.register("k".into());
        assert!(!first.token().is_cancelled());

        let second = registry.register("k".into());
        assert!(first.token().is_cancelled());
        assert!(!second.token().is_cancelled());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn guard_drop_removes_the_entry() {
        let registry = PendingRequests::new();
        let guard = registry.register("k".into());
        assert_eq!(registry.len(), 1);
        drop(guard);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn superseded_guard_does_not_evict_its_successor() {
        let registry = PendingRequests::new();
        let first = registry.register("k".into());
        let second = registry.register("k".into());

        // The cancelled request settles late; its entry is already gone.
        drop(first);
        assert_eq!(registry.len(), 1);
        assert!(!second.token().is_cancelled());

        drop(second);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn distinct_keys_do_not_interfere() {
        let registry = PendingRequests::new();
        let a = registry.register("a".into());
        let b = registry.register("b".into());
        assert!(!a.token().is_cancelled());
        assert!(!b.token().is_cancelled());
        assert_eq!(registry.len(), 2);
    }
}
