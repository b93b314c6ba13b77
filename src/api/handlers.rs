//! API Handlers
//!
//! HTTP request handlers exposing one facade over the memory engine.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Cache, Json as JsonCodec, Options, Passthrough, SetParams};
use crate::config::Config;
use crate::engine::MemoryEngine;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, FlushResponse, GetResponse, HealthResponse, KeysResponse, SetRequest,
    SetResponse, StatsResponse, TtlResponse,
};

/// The facade behind the API, in whichever mode the server was configured.
#[derive(Debug, Clone)]
pub enum Facade {
    Raw(Cache<Passthrough>),
    Object(Cache<JsonCodec<Value>>),
}

impl Facade {
    pub fn new(options: Options, object_mode: bool) -> Result<Self> {
        if object_mode {
            Ok(Facade::Object(Cache::new(options)?))
        } else {
            Ok(Facade::Raw(Cache::new(options)?))
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Facade::Raw(cache) => cache.namespace(),
            Facade::Object(cache) => cache.namespace(),
        }
    }

    pub fn is_object_mode(&self) -> bool {
        match self {
            Facade::Raw(cache) => cache.is_object_mode(),
            Facade::Object(cache) => cache.is_object_mode(),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        match self {
            Facade::Raw(cache) => Ok(cache.get(Some(key)).await?.map(Value::String)),
            Facade::Object(cache) => cache.get(Some(key)).await,
        }
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        match self {
            Facade::Raw(cache) => {
                let Value::String(text) = value else {
                    return Err(CacheError::InvalidRequest(
                        "value must be a string unless object mode is enabled".to_string(),
                    ));
                };
                cache.set(with_ttl(SetParams::new(text).key(key), ttl)).await
            }
            Facade::Object(cache) => {
                cache.set(with_ttl(SetParams::new(value).key(key), ttl)).await
            }
        }
    }

    async fn del(&self, key: &str) -> Result<()> {
        match self {
            Facade::Raw(cache) => cache.del(Some(key)).await,
            Facade::Object(cache) => cache.del(Some(key)).await,
        }
    }

    async fn flush(&self) -> Result<()> {
        match self {
            Facade::Raw(cache) => cache.flush().await,
            Facade::Object(cache) => cache.flush().await,
        }
    }

    async fn keys(&self) -> Result<Vec<String>> {
        match self {
            Facade::Raw(cache) => cache.keys().await,
            Facade::Object(cache) => cache.keys().await,
        }
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        match self {
            Facade::Raw(cache) => cache.ttl(Some(key)).await,
            Facade::Object(cache) => cache.ttl(Some(key)).await,
        }
    }
}

fn with_ttl<V>(params: SetParams<V>, ttl: Option<Duration>) -> SetParams<V> {
    match ttl {
        Some(ttl) => params.ttl(ttl),
        None => params,
    }
}

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: Facade,
    /// The engine behind `cache`, kept for stats and the sweep task
    pub engine: Arc<MemoryEngine>,
}

impl AppState {
    pub fn new(cache: Facade, engine: Arc<MemoryEngine>) -> Self {
        Self { cache, engine }
    }

    /// Builds a memory engine and a facade over it from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let engine = Arc::new(MemoryEngine::new());
        let cache = Facade::new(config.options(engine.clone()), config.object_mode)?;
        Ok(Self::new(cache, engine))
    }
}

/// Handler for PUT /cache/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    let ttl = req.ttl.map(Duration::from_millis);
    state.cache.set(&key, req.value, ttl).await?;

    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.cache.del(&key).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /cache/:key/ttl
pub async fn ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TtlResponse>> {
    match state.cache.ttl(&key).await? {
        Some(remaining) => Ok(Json(TtlResponse::new(key, remaining))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Result<Json<KeysResponse>> {
    let keys = state.cache.keys().await?;

    Ok(Json(KeysResponse {
        namespace: state.cache.namespace().to_string(),
        keys,
    }))
}

/// Handler for DELETE /cache
pub async fn flush_handler(State(state): State<AppState>) -> Result<Json<FlushResponse>> {
    state.cache.flush().await?;

    Ok(Json(FlushResponse::new(state.cache.namespace())))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.engine.stats().await))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.cache.namespace(),
        state.cache.is_object_mode(),
    ))
}
