//! Engine Module
//!
//! The capability contract every storage backend satisfies, plus the pure
//! helpers engines use to take apart the composite keys the facade hands them.

pub mod memory;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{EngineError, EngineResult};

pub use memory::{MemoryEngine, MemoryStats};

// == Namespace Separator ==
/// Separates the namespace from the resource in a composite key.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Remaining lifetime reported by [`Engine::ttl`] for entries stored without
/// an expiry.
pub const NO_EXPIRY: Duration = Duration::MAX;

// == Operation ==
/// The six operations an engine may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Set,
    Del,
    Flush,
    Keys,
    Ttl,
}

impl Operation {
    /// Every operation, in contract order.
    pub const ALL: &'static [Operation] = &[
        Operation::Get,
        Operation::Set,
        Operation::Del,
        Operation::Flush,
        Operation::Keys,
        Operation::Ttl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Set => "set",
            Operation::Del => "del",
            Operation::Flush => "flush",
            Operation::Keys => "keys",
            Operation::Ttl => "ttl",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Engine Trait ==
/// Storage backend driven by the facade.
///
/// Per-resource operations (`get`, `set`, `del`, `ttl`) receive a composite
/// `namespace:resource` key. Bulk operations (`flush`, `keys`) receive the bare
/// namespace.
///
/// Every method has a default body failing with
/// [`EngineError::NotImplemented`], so a partial engine only overrides what it
/// supports and lists those operations in [`Engine::operations`].
#[async_trait]
pub trait Engine: Send + Sync {
    /// Operations this engine actually implements.
    fn operations(&self) -> &'static [Operation] {
        Operation::ALL
    }

    /// Returns the stored value, or `None` when nothing is stored.
    async fn get(&self, _key: &str) -> EngineResult<Option<String>> {
        Err(EngineError::NotImplemented(Operation::Get))
    }

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> EngineResult<()> {
        Err(EngineError::NotImplemented(Operation::Set))
    }

    async fn del(&self, _key: &str) -> EngineResult<()> {
        Err(EngineError::NotImplemented(Operation::Del))
    }

    /// Removes every entry belonging to `namespace`.
    async fn flush(&self, _namespace: &str) -> EngineResult<()> {
        Err(EngineError::NotImplemented(Operation::Flush))
    }

    /// Lists the composite keys stored under `namespace`.
    async fn keys(&self, _namespace: &str) -> EngineResult<Vec<String>> {
        Err(EngineError::NotImplemented(Operation::Keys))
    }

    /// Remaining time to live of `key`, `None` when the key is not stored.
    ///
    /// Entries that never expire report [`NO_EXPIRY`], never a finite
    /// duration.
    async fn ttl(&self, _key: &str) -> EngineResult<Option<Duration>> {
        Err(EngineError::NotImplemented(Operation::Ttl))
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// == Key Helpers ==
/// Returns the namespace portion of a composite key.
///
/// Empty when the key starts with the separator; the whole key when there is
/// no separator at all.
pub fn namespace_from_key(key: &str) -> &str {
    match key.split_once(NAMESPACE_SEPARATOR) {
        Some((namespace, _)) => namespace,
        None => key,
    }
}

/// Returns the resource portion of a composite key (everything after the
/// first separator).
pub fn key_without_namespace(key: &str) -> EngineResult<&str> {
    key.split_once(NAMESPACE_SEPARATOR)
        .map(|(_, resource)| resource)
        .ok_or_else(|| EngineError::MissingNamespace(key.to_string()))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    struct BareEngine;

    #[async_trait]
    impl Engine for BareEngine {}

    #[tokio::test]
    async fn test_defaults_report_not_implemented() {
        let engine = BareEngine;

        let results = vec![
            (Operation::Get, engine.get("ns:key").await.err()),
            (
                Operation::Set,
                engine
                    .set("ns:key", "v".to_string(), Duration::from_secs(1))
                    .await
                    .err(),
            ),
            (Operation::Del, engine.del("ns:key").await.err()),
            (Operation::Flush, engine.flush("ns").await.err()),
            (Operation::Keys, engine.keys("ns").await.err()),
            (Operation::Ttl, engine.ttl("ns:key").await.err()),
        ];

        for (op, err) in results {
            let err = err.expect("default should fail");
            assert!(matches!(err, EngineError::NotImplemented(failed) if failed == op));
            let msg = err.to_string();
            assert!(msg.contains(op.as_str()));
            assert!(msg.contains("not implemented"));
        }
    }

    #[test]
    fn test_duration_millis_saturates() {
        assert_eq!(duration_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(duration_millis(Duration::from_secs(u64::MAX)), u64::MAX);
        assert_eq!(duration_millis(NO_EXPIRY), u64::MAX);
    }

    #[test]
    fn test_namespace_from_key_leading_colon() {
        assert_eq!(namespace_from_key(":testing"), "");
    }

    #[test]
    fn test_namespace_from_key() {
        assert_eq!(namespace_from_key("testing:more-stuff"), "testing");
        assert_eq!(namespace_from_key("testing:more:and:more:stuff"), "testing");
    }

    #[test]
    fn test_namespace_from_key_without_separator() {
        assert_eq!(namespace_from_key("testing"), "testing");
    }

    #[test]
    fn test_key_without_namespace() {
        assert_eq!(key_without_namespace("testing:more-stuff").unwrap(), "more-stuff");
        assert_eq!(key_without_namespace("testing:more:stuff").unwrap(), "more:stuff");
        assert_eq!(key_without_namespace("testing:").unwrap(), "");
    }

    #[test]
    fn test_key_without_namespace_missing_separator() {
        let result = key_without_namespace("testing");
        assert!(matches!(
            result,
            Err(EngineError::MissingNamespace(ref key)) if key == "testing"
        ));
    }

    #[test]
    fn test_default_operations_is_full_set() {
        assert_eq!(BareEngine.operations(), Operation::ALL);
        assert_eq!(Operation::ALL.len(), 6);
    }
}
