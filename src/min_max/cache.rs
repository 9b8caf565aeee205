use std::sync::Arc;

use ahash::HashMap;
use lazy_static::lazy_static;
use parking_lot::RwLock;

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum CacheFlag {
    Exact,
    LowerBound,
    UpperBound,
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub struct CacheEntry {
    pub(super) value: i32,
    pub(super) flag: CacheFlag,
}

impl CacheEntry {
    pub fn exact(value: i32) -> Self {
        Self { value, flag: CacheFlag::Exact }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn flag(&self) -> CacheFlag {
        self.flag
    }
}

/// Memoization of search results. Takes `&self` so one instance can be
/// shared between concurrent searches.
pub trait Cache<S: ?Sized> {
    fn cache(&self, state: &S, entry: CacheEntry);
    fn lookup(&self, state: &S) -> Option<CacheEntry>;
}

impl<S: ?Sized, C: Cache<S> + ?Sized> Cache<S> for Arc<C> {
    fn cache(&self, state: &S, entry: CacheEntry) {
        (**self).cache(state, entry)
    }

    fn lookup(&self, state: &S) -> Option<CacheEntry> {
        (**self).lookup(state)
    }
}

/// A state that has several strategically identical encodings.
pub trait Transpositions {
    /// Keys of every transposition of this state, the identity included.
    fn transposition_keys(&self) -> Vec<String>;
}

/// String keyed transposition table.
///
/// Every entry is written under all keys of its transpositions at once, so a
/// lookup through any rotation or reflection of the state hits.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

lazy_static! {
    static ref PROCESS_TABLE: Arc<TranspositionTable> = Arc::new(TranspositionTable::new());
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shared by every search in this process that opts into it.
    pub fn process_wide() -> Arc<Self> {
        PROCESS_TABLE.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear()
    }
}

impl<S: Transpositions + ?Sized> Cache<S> for TranspositionTable {
    fn cache(&self, state: &S, entry: CacheEntry) {
        let keys = state.transposition_keys();
        // one write lock for the whole set: readers see all of it or none of it
        let mut entries = self.entries.write();
        for key in keys {
            match entries.get(&key) {
                Some(existing) if existing.flag == CacheFlag::Exact && entry.flag != CacheFlag::Exact => {}
                _ => {
                    entries.insert(key, entry);
                }
            }
        }
    }

    fn lookup(&self, state: &S) -> Option<CacheEntry> {
        let keys = state.transposition_keys();
        let entries = self.entries.read();
        keys.iter().find_map(|key| entries.get(key).copied())
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Default)]
pub struct NullCache;

impl<S: ?Sized> Cache<S> for NullCache {
    fn cache(&self, _state: &S, _entry: CacheEntry) {}

    fn lookup(&self, _state: &S) -> Option<CacheEntry> {
        None
    }
}
