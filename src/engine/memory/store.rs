//! Memory Store Module
//!
//! Synchronous storage behind the memory engine: a HashMap of entries keyed
//! by composite `namespace:resource` keys, with lazy expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::{MemoryEntry, MemoryStats};
use crate::engine::{namespace_from_key, NO_EXPIRY};

// == Memory Store ==
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, MemoryEntry>,
    /// Read statistics
    stats: MemoryStats,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a value, overwriting any previous entry and resetting its TTL.
    pub fn set(&mut self, key: String, value: String, ttl: Duration) {
        self.entries.insert(key, MemoryEntry::new(value, ttl));
    }

    // == Get ==
    /// Returns the live value for `key`. Expired entries are removed and
    /// counted as misses.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.live_entry(key) {
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes `key`. Returns whether a live entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => !entry.is_expired(),
            None => false,
        }
    }

    // == Flush ==
    /// Removes every entry in `namespace`, returning how many were removed.
    pub fn flush(&mut self, namespace: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| namespace_from_key(key) != namespace);
        before - self.entries.len()
    }

    // == Keys ==
    /// Live composite keys in `namespace`, sorted.
    pub fn keys(&self, namespace: &str) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, entry)| {
                namespace_from_key(key) == namespace && !entry.is_expired_at(now)
            })
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    // == Time To Live ==
    /// Remaining lifetime of `key`. `None` when absent; entries stored without
    /// expiry report [`NO_EXPIRY`].
    pub fn ttl(&mut self, key: &str) -> Option<Duration> {
        self.live_entry(key)
            .map(|entry| entry.remaining().unwrap_or(NO_EXPIRY))
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        removed
    }

    // == Stats ==
    /// Snapshot of the counters. `total_entries` skips entries that have
    /// expired but not yet been purged.
    pub fn stats(&self) -> MemoryStats {
        let now = Instant::now();
        let mut stats = self.stats.clone();
        stats.total_entries = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .count();
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry for `key` unless it has expired, in which case it is
    /// dropped.
    fn live_entry(&mut self, key: &str) -> Option<&MemoryEntry> {
        if self.entries.get(key).is_some_and(MemoryEntry::is_expired) {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            return None;
        }
        self.entries.get(key)
    }
}
