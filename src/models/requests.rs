//! Request DTOs for the demo HTTP API

use serde::Deserialize;
use serde_json::Value;

/// Request body for `PUT /cache/:key`
///
/// # Fields
/// - `value`: The value to store; must be a JSON string unless object mode is on
/// - `ttl`: Optional TTL in milliseconds (the facade default applies otherwise)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let req: SetRequest = serde_json::from_str(r#"{"value": "hello"}"#).unwrap();
        assert_eq!(req.value, Value::String("hello".to_string()));
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_object_value_with_ttl() {
        let req: SetRequest =
            serde_json::from_str(r#"{"value": {"cache": "ftw"}, "ttl": 1500}"#).unwrap();
        assert_eq!(req.value["cache"], "ftw");
        assert_eq!(req.ttl, Some(1500));
    }

    #[test]
    fn test_set_request_requires_value() {
        assert!(serde_json::from_str::<SetRequest>(r#"{"ttl": 10}"#).is_err());
    }
}
