//! Expeditious - a namespace-aware caching facade
//!
//! Wraps any [`Engine`] with namespaced keys, default TTLs, optional JSON
//! object mode and uniform error reporting.
//!
//! ```ignore
//! let engine = Arc::new(MemoryEngine::new());
//! let cache: Cache = Cache::new(Options::new("users", Duration::from_secs(60)).engine(engine))?;
//!
//! cache.set(SetParams::new("some data".to_string()).key("some key")).await?;
//! assert_eq!(cache.get(Some("some key")).await?, Some("some data".to_string()));
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, Codec, Json, ObjectCache, Options, Passthrough, SetParams};
pub use config::Config;
pub use engine::{Engine, MemoryEngine, Operation};
pub use error::{BoxError, CacheError, ConfigError, EngineError, Result};
pub use tasks::spawn_sweep_task;
