//! Value Codecs
//!
//! A codec turns the caller's value type into the string an engine stores and
//! back. `Passthrough` hands strings through untouched; `Json<T>` is object
//! mode.

use std::fmt;
use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

// == Codec Trait ==
pub trait Codec: Send + Sync + 'static {
    /// Value type accepted by `set` and returned by `get`.
    type Value: Send + 'static;

    /// Whether values are serialized on the way to the engine.
    const OBJECT_MODE: bool;

    fn encode(value: Self::Value) -> Result<String, serde_json::Error>;

    fn decode(raw: String) -> Result<Self::Value, serde_json::Error>;
}

// == Passthrough ==
/// Stores strings exactly as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Codec for Passthrough {
    type Value = String;
    const OBJECT_MODE: bool = false;

    fn encode(value: String) -> Result<String, serde_json::Error> {
        Ok(value)
    }

    fn decode(raw: String) -> Result<String, serde_json::Error> {
        Ok(raw)
    }
}

// == Json ==
/// Object mode: values are JSON encoded with serde_json.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Json")
    }
}

impl<T> Codec for Json<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    type Value = T;
    const OBJECT_MODE: bool = true;

    fn encode(value: T) -> Result<String, serde_json::Error> {
        serde_json::to_string(&value)
    }

    fn decode(raw: String) -> Result<T, serde_json::Error> {
        serde_json::from_str(&raw)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        visits: u32,
    }

    #[test]
    fn test_passthrough_keeps_text() {
        let raw = Passthrough::encode("{not json".to_string()).unwrap();
        assert_eq!(raw, "{not json");
        assert_eq!(Passthrough::decode(raw).unwrap(), "{not json");
    }

    #[test]
    fn test_json_encodes_struct() {
        let raw = Json::<Profile>::encode(Profile {
            name: "ada".to_string(),
            visits: 3,
        })
        .unwrap();
        assert_eq!(raw, r#"{"name":"ada","visits":3}"#);
    }

    #[test]
    fn test_json_rejects_malformed_input() {
        assert!(Json::<serde_json::Value>::decode("{invalid json".to_string()).is_err());
    }

    #[test]
    fn test_json_rejects_non_string_map_keys() {
        let mut value = HashMap::new();
        value.insert((1, 2), "tuple keys cannot be encoded".to_string());
        assert!(Json::<HashMap<(i32, i32), String>>::encode(value).is_err());
    }

    #[test]
    fn test_object_mode_flags() {
        assert!(!Passthrough::OBJECT_MODE);
        assert!(Json::<Profile>::OBJECT_MODE);
    }
}
