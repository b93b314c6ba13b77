//! Memory Engine Module
//!
//! In-process engine implementing the full contract over a HashMap with
//! per-entry deadlines. Expired entries read as absent and are removed lazily
//! or by the sweep task.

mod entry;
mod stats;
mod store;

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::engine::Engine;
use crate::error::EngineResult;

pub use entry::MemoryEntry;
pub use stats::MemoryStats;
pub use store::MemoryStore;

// == Memory Engine ==
/// Thread-safe in-memory engine.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    store: RwLock<MemoryStore>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.store.write().await.purge_expired()
    }

    pub async fn stats(&self) -> MemoryStats {
        self.store.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl Engine for MemoryEngine {
    async fn get(&self, key: &str) -> EngineResult<Option<String>> {
        // Write lock: reads may drop expired entries and update stats
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> EngineResult<()> {
        self.store.write().await.set(key.to_string(), value, ttl);
        Ok(())
    }

    async fn del(&self, key: &str) -> EngineResult<()> {
        let removed = self.store.write().await.delete(key);
        debug!(key, removed, "memory engine del");
        Ok(())
    }

    async fn flush(&self, namespace: &str) -> EngineResult<()> {
        let removed = self.store.write().await.flush(namespace);
        debug!(namespace, removed, "memory engine flush");
        Ok(())
    }

    async fn keys(&self, namespace: &str) -> EngineResult<Vec<String>> {
        Ok(self.store.read().await.keys(namespace))
    }

    async fn ttl(&self, key: &str) -> EngineResult<Option<Duration>> {
        Ok(self.store.write().await.ttl(key))
    }
}
