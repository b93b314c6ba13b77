//! Memory Engine Statistics
//!
//! Counts hits, misses and expirations observed by the memory engine.

use serde::Serialize;

// == Memory Stats ==
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoryStats {
    /// Reads that found a live entry
    pub hits: u64,
    /// Reads that found nothing (absent or expired)
    pub misses: u64,
    /// Entries dropped because their deadline passed
    pub expirations: u64,
    /// Live entries across all namespaces
    pub total_entries: usize,
}

impl MemoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}
