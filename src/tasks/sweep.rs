//! Expiry Sweep Task
//!
//! Background task that periodically purges expired entries from the memory
//! engine, so keys nobody reads again do not linger.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::engine::{duration_millis, MemoryEngine};

/// Spawns a task purging expired entries from `engine` every `interval`.
///
/// The task loops until aborted through the returned handle.
///
/// # Example
/// ```ignore
/// let engine = Arc::new(MemoryEngine::new());
/// let sweep = spawn_sweep_task(engine.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep.abort();
/// ```
pub fn spawn_sweep_task(engine: Arc<MemoryEngine>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = duration_millis(interval), "starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = engine.purge_expired().await;
            if removed > 0 {
                info!("expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let engine = Arc::new(MemoryEngine::new());
        engine
            .set("ns:expire_soon", "value".to_string(), Duration::from_millis(50))
            .await
            .unwrap();
        engine
            .set("ns:long_lived", "value".to_string(), Duration::from_secs(3600))
            .await
            .unwrap();

        let handle = spawn_sweep_task(engine.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(350)).await;

        // Checked through len so the read itself does not purge the entry
        assert_eq!(engine.len().await, 1);
        assert_eq!(engine.stats().await.expirations, 1);
        assert_eq!(
            engine.get("ns:long_lived").await.unwrap(),
            Some("value".to_string())
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_can_be_aborted() {
        let engine = Arc::new(MemoryEngine::new());

        let handle = spawn_sweep_task(engine, Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
