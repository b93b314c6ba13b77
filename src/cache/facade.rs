//! Cache Facade
//!
//! Validates options, derives namespaced keys, runs values through the codec
//! and delegates to the engine, wrapping engine errors with the operation
//! that produced them.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::codec::{Codec, Passthrough};
use crate::engine::{duration_millis, Engine, Operation, NAMESPACE_SEPARATOR};
use crate::error::{CacheError, ConfigError, Result};

// == Options ==
/// Construction-time configuration of a facade.
#[derive(Clone)]
pub struct Options {
    /// Alphanumeric prefix isolating this facade's keys
    pub namespace: String,
    /// TTL applied when `set` is called without one
    pub default_ttl: Duration,
    /// Backend shared by the facade for its whole lifetime
    pub engine: Option<Arc<dyn Engine>>,
}

impl Options {
    pub fn new(namespace: impl Into<String>, default_ttl: Duration) -> Self {
        Self {
            namespace: namespace.into(),
            default_ttl,
            engine: None,
        }
    }

    pub fn engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Runs every construction check, returning the first failure.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.engine.is_none() {
            return Err(ConfigError::MissingEngine);
        }
        if self.default_ttl.is_zero() {
            return Err(ConfigError::InvalidDefaultTtl(format!(
                "{}ms",
                self.default_ttl.as_millis()
            )));
        }
        if self.namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if !self.namespace.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidNamespace(self.namespace.clone()));
        }
        Ok(())
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("namespace", &self.namespace)
            .field("default_ttl", &self.default_ttl)
            .field("engine", &self.engine.as_ref().map(|_| "<engine>"))
            .finish()
    }
}

// == Set Params ==
/// Arguments of a `set` call.
#[derive(Debug, Clone)]
pub struct SetParams<V> {
    /// Resource key, empty when absent
    pub key: Option<String>,
    pub val: V,
    /// Overrides the default TTL when present and non-zero
    pub ttl: Option<Duration>,
}

impl<V> SetParams<V> {
    pub fn new(val: V) -> Self {
        Self {
            key: None,
            val,
            ttl: None,
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

// == Cache ==
struct Inner {
    namespace: String,
    default_ttl: Duration,
    engine: Arc<dyn Engine>,
}

/// Namespace-scoped facade over an engine.
///
/// The codec parameter decides whether values are passed through as strings
/// ([`Passthrough`]) or JSON encoded ([`Json`](super::Json), object mode).
/// Cloning is cheap; clones share configuration and engine.
pub struct Cache<C: Codec = Passthrough> {
    inner: Arc<Inner>,
    _codec: PhantomData<fn() -> C>,
}

impl<C: Codec> Clone for Cache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _codec: PhantomData,
        }
    }
}

impl<C: Codec> fmt::Debug for Cache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("namespace", &self.inner.namespace)
            .field("default_ttl", &self.inner.default_ttl)
            .field("object_mode", &C::OBJECT_MODE)
            .finish()
    }
}

impl<C: Codec> Cache<C> {
    // == Constructor ==
    /// Validates `options` and binds the engine.
    ///
    /// Logs one warning per contract operation the engine does not declare in
    /// [`Engine::operations`]; those calls will fail at use time.
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        let Options {
            namespace,
            default_ttl,
            engine,
        } = options;
        let engine = engine.ok_or(ConfigError::MissingEngine)?;

        let supported = engine.operations();
        for op in Operation::ALL {
            if !supported.contains(op) {
                warn!(
                    namespace = %namespace,
                    operation = %op,
                    "engine supplied to expeditious has not implemented \"{}\"",
                    op
                );
            }
        }

        Ok(Self {
            inner: Arc::new(Inner {
                namespace,
                default_ttl,
                engine,
            }),
            _codec: PhantomData,
        })
    }

    // == Accessors ==
    pub fn is_object_mode(&self) -> bool {
        C::OBJECT_MODE
    }

    pub fn default_ttl(&self) -> Duration {
        self.inner.default_ttl
    }

    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    // == Key Generation ==
    /// `namespace:resource`, with an absent resource treated as empty.
    pub fn generate_cache_key(&self, resource: Option<&str>) -> String {
        let resource = resource.unwrap_or_default();
        let mut key =
            String::with_capacity(self.inner.namespace.len() + 1 + resource.len());
        key.push_str(&self.inner.namespace);
        key.push(NAMESPACE_SEPARATOR);
        key.push_str(resource);
        key
    }

    // == Get ==
    /// Reads `key`. `Ok(None)` when the engine has nothing stored.
    pub async fn get(&self, key: Option<&str>) -> Result<Option<C::Value>> {
        let cache_key = self.generate_cache_key(key);
        debug!(namespace = %self.inner.namespace, key = %cache_key, "get called");

        let raw = self
            .inner
            .engine
            .get(&cache_key)
            .await
            .map_err(|e| CacheError::engine(Operation::Get, e))?;

        raw.map(C::decode)
            .transpose()
            .map_err(CacheError::Deserialization)
    }

    // == Set ==
    /// Encodes and stores a value. An encoding failure is returned before the
    /// engine is contacted.
    pub async fn set(&self, params: SetParams<C::Value>) -> Result<()> {
        let SetParams { key, val, ttl } = params;
        let cache_key = self.generate_cache_key(key.as_deref());
        let ttl = self.effective_ttl(ttl);
        debug!(
            namespace = %self.inner.namespace,
            key = %cache_key,
            ttl_ms = duration_millis(ttl),
            "set called"
        );

        let raw = C::encode(val).map_err(CacheError::Serialization)?;

        self.inner
            .engine
            .set(&cache_key, raw, ttl)
            .await
            .map_err(|e| CacheError::engine(Operation::Set, e))
    }

    /// Runs `set` on the runtime; dropping the handle discards the outcome.
    pub fn set_detached(&self, params: SetParams<C::Value>) -> JoinHandle<Result<()>> {
        let cache = self.clone();
        tokio::spawn(async move { cache.set(params).await })
    }

    // == Delete ==
    pub async fn del(&self, key: Option<&str>) -> Result<()> {
        let cache_key = self.generate_cache_key(key);
        debug!(namespace = %self.inner.namespace, key = %cache_key, "del called");

        self.inner
            .engine
            .del(&cache_key)
            .await
            .map_err(|e| CacheError::engine(Operation::Del, e))
    }

    /// Runs `del` on the runtime; dropping the handle discards the outcome.
    pub fn del_detached(&self, key: Option<&str>) -> JoinHandle<Result<()>> {
        let cache = self.clone();
        let key = key.map(str::to_owned);
        tokio::spawn(async move { cache.del(key.as_deref()).await })
    }

    // == Flush ==
    /// Removes this facade's whole namespace from the engine.
    pub async fn flush(&self) -> Result<()> {
        debug!(namespace = %self.inner.namespace, "flush called");

        self.inner
            .engine
            .flush(&self.inner.namespace)
            .await
            .map_err(|e| CacheError::engine(Operation::Flush, e))
    }

    /// Runs `flush` on the runtime; dropping the handle discards the outcome.
    pub fn flush_detached(&self) -> JoinHandle<Result<()>> {
        let cache = self.clone();
        tokio::spawn(async move { cache.flush().await })
    }

    // == Keys ==
    /// Keys the engine reports for this namespace.
    pub async fn keys(&self) -> Result<Vec<String>> {
        debug!(namespace = %self.inner.namespace, "keys called");

        self.inner
            .engine
            .keys(&self.inner.namespace)
            .await
            .map_err(|e| CacheError::engine(Operation::Keys, e))
    }

    // == Time To Live ==
    pub async fn ttl(&self, key: Option<&str>) -> Result<Option<Duration>> {
        let cache_key = self.generate_cache_key(key);
        debug!(namespace = %self.inner.namespace, key = %cache_key, "ttl called");

        self.inner
            .engine
            .ttl(&cache_key)
            .await
            .map_err(|e| CacheError::engine(Operation::Ttl, e))
    }

    fn effective_ttl(&self, ttl: Option<Duration>) -> Duration {
        ttl.filter(|ttl| !ttl.is_zero())
            .unwrap_or(self.inner.default_ttl)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Json;
    use crate::engine::{namespace_from_key, MemoryEngine};

    const TTL: Duration = Duration::from_millis(5000);

    fn options(namespace: &str) -> Options {
        Options::new(namespace, TTL).engine(Arc::new(MemoryEngine::new()))
    }

    fn config_error(options: Options) -> ConfigError {
        match Cache::<Passthrough>::new(options) {
            Err(CacheError::Config(err)) => err,
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_valid_options() {
        let cache = Cache::<Passthrough>::new(options("testCache")).unwrap();
        assert_eq!(cache.namespace(), "testCache");
        assert_eq!(cache.default_ttl(), TTL);
        assert!(!cache.is_object_mode());
    }

    #[test]
    fn test_new_object_mode() {
        let cache = Cache::<Json<serde_json::Value>>::new(options("test")).unwrap();
        assert!(cache.is_object_mode());
    }

    #[test]
    fn test_new_missing_engine() {
        let err = config_error(Options::new("test", TTL));
        assert_eq!(err, ConfigError::MissingEngine);
        assert!(err.to_string().contains("engine"));
    }

    #[test]
    fn test_new_zero_default_ttl() {
        let mut opts = options("test");
        opts.default_ttl = Duration::ZERO;
        let err = config_error(opts);
        assert!(matches!(err, ConfigError::InvalidDefaultTtl(_)));
        assert!(err.to_string().contains("default_ttl"));
    }

    #[test]
    fn test_new_empty_namespace() {
        let err = config_error(options(""));
        assert_eq!(err, ConfigError::EmptyNamespace);
    }

    #[test]
    fn test_new_non_alphanumeric_namespace() {
        for namespace in ["test-cache", "test cache", "test:cache", "tést"] {
            let err = config_error(options(namespace));
            assert_eq!(err, ConfigError::InvalidNamespace(namespace.to_string()));
        }
    }

    #[test]
    fn test_generate_cache_key() {
        let cache = Cache::<Passthrough>::new(options("test")).unwrap();

        assert_eq!(cache.generate_cache_key(Some("some key")), "test:some key");
        assert_eq!(cache.generate_cache_key(Some("")), "test:");
        assert_eq!(cache.generate_cache_key(None), "test:");
        assert_eq!(
            namespace_from_key(&cache.generate_cache_key(Some("a:b"))),
            "test"
        );
    }

    #[test]
    fn test_effective_ttl() {
        let cache = Cache::<Passthrough>::new(options("test")).unwrap();

        assert_eq!(cache.effective_ttl(None), TTL);
        assert_eq!(cache.effective_ttl(Some(Duration::ZERO)), TTL);
        assert_eq!(
            cache.effective_ttl(Some(Duration::from_secs(1))),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_set_params_builder() {
        let params = SetParams::new("v").key("k").ttl(Duration::from_secs(2));
        assert_eq!(params.key.as_deref(), Some("k"));
        assert_eq!(params.val, "v");
        assert_eq!(params.ttl, Some(Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn test_clones_share_engine() {
        let cache = Cache::<Passthrough>::new(options("test")).unwrap();
        let clone = cache.clone();

        cache
            .set(SetParams::new("shared".to_string()).key("k"))
            .await
            .unwrap();
        assert_eq!(clone.get(Some("k")).await.unwrap(), Some("shared".to_string()));
    }
}
