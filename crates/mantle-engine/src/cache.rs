//! Identity-keyed caches with weak key retention
//!
//! Descriptors and invokers are cached per type identity: the key is the
//! `Arc<ClassDef>` pointer, held as a `Weak` so a cache entry never keeps a
//! type alive. Dead entries are swept opportunistically on insert; eviction
//! is a memory optimization, not a correctness requirement — a stale entry
//! for a still-live type is harmless.
//!
//! One mutex guards each cache. The lock is never held across descriptor or
//! invoker construction; callers compute outside the lock and publish
//! last-writer-wins, so a concurrent duplicate build is benign wasted work.

use std::sync::{Arc, Weak};

use mantle_sdk::ClassDef;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

struct Entry<V> {
    key: Weak<ClassDef>,
    value: V,
}

/// Cache keyed by `Arc<ClassDef>` pointer identity with weak key retention
pub struct IdentityCache<V> {
    entries: Mutex<FxHashMap<usize, Entry<V>>>,
}

impl<V: Clone> IdentityCache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    fn key_of(class: &Arc<ClassDef>) -> usize {
        Arc::as_ptr(class) as usize
    }

    /// Look up the cached value for a type identity.
    ///
    /// An entry whose weak key no longer upgrades to *this* `Arc` is treated
    /// as absent; this also guards against address reuse after a type dies.
    pub fn get(&self, class: &Arc<ClassDef>) -> Option<V> {
        let entries = self.entries.lock();
        let entry = entries.get(&Self::key_of(class))?;
        let live = entry.key.upgrade()?;
        if Arc::ptr_eq(&live, class) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Publish a value for a type identity, replacing any previous entry
    /// (last writer wins), and sweep entries whose key has died.
    pub fn insert(&self, class: &Arc<ClassDef>, value: V) {
        let mut entries = self.entries.lock();
        entries.retain(|_, e| e.key.strong_count() > 0);
        entries.insert(
            Self::key_of(class),
            Entry {
                key: Arc::downgrade(class),
                value,
            },
        );
    }

    /// Drop entries whose key has died; returns the number of live entries
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries.lock();
        entries.retain(|_, e| e.key.strong_count() > 0);
        entries.len()
    }

    /// Number of entries currently held, dead or alive
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True when no entries are held
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<V: Clone> Default for IdentityCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for IdentityCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityCache")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}
