//! Response DTOs for the demo HTTP API

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::engine::{duration_millis, MemoryStats, NO_EXPIRY};

/// Response body for `GET /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for `PUT /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for `DELETE /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for `GET /cache/:key/ttl`
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    pub key: String,
    /// Remaining milliseconds, null when the entry never expires
    pub ttl_ms: Option<u64>,
}

impl TtlResponse {
    pub fn new(key: impl Into<String>, remaining: Duration) -> Self {
        let ttl_ms = if remaining == NO_EXPIRY {
            None
        } else {
            Some(duration_millis(remaining))
        };
        Self {
            key: key.into(),
            ttl_ms,
        }
    }
}

/// Response body for `GET /keys`
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub namespace: String,
    pub keys: Vec<String>,
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    pub message: String,
    pub namespace: String,
}

impl FlushResponse {
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            message: format!("Namespace '{}' flushed", namespace),
            namespace,
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl From<MemoryStats> for StatsResponse {
    fn from(stats: MemoryStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub namespace: String,
    pub object_mode: bool,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(namespace: impl Into<String>, object_mode: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            namespace: namespace.into(),
            object_mode,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_keeps_structure() {
        let resp = GetResponse::new("k", json!({"cache": "ftw"}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"key": "k", "value": {"cache": "ftw"}}));
    }

    #[test]
    fn test_ttl_response_never_expires() {
        let resp = TtlResponse::new("k", NO_EXPIRY);
        assert!(resp.ttl_ms.is_none());

        let resp = TtlResponse::new("k", Duration::from_millis(1500));
        assert_eq!(resp.ttl_ms, Some(1500));
    }

    #[test]
    fn test_stats_response_from_memory_stats() {
        let stats = MemoryStats {
            hits: 80,
            misses: 20,
            expirations: 5,
            total_entries: 100,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expirations, 5);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy("test", true);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
        assert!(json.contains("\"object_mode\":true"));
    }

    #[test]
    fn test_flush_response_names_namespace() {
        let resp = FlushResponse::new("test");
        assert!(resp.message.contains("test"));
    }
}
