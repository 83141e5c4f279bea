//! API Handlers
//!
//! HTTP request handlers exposing the `cache` binding.

use axum::{
    extract::{Path, State},
    Json,
};
use crate::cache::{shared, CacheAdapter, SharedCache};
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, FlushResponse, GetResponse, HasResponse, HealthResponse, KeyResponse,
    PutRequest,
};
use crate::provider::{Bindings, CacheServiceProvider};

/// Application state shared across all handlers.
///
/// Holds the adapter published under the `cache` alias.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache adapter
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState owning the given adapter.
    pub fn new(adapter: Box<dyn CacheAdapter>) -> Self {
        Self {
            cache: shared(adapter),
        }
    }

    /// Creates a new AppState from the `cache` binding.
    pub fn from_bindings(bindings: &Bindings) -> Result<Self> {
        let cache = bindings
            .resolve(CacheServiceProvider::ALIAS)
            .ok_or_else(|| CacheError::Configuration("no `cache` service is bound".to_string()))?;
        Ok(Self { cache })
    }
}

fn checked_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

// == Blocking Adapter Calls ==
/// Runs `op` against the adapter on the blocking thread pool.
///
/// Adapters do synchronous disk and network I/O, so the call and the write
/// lock it holds stay off the async workers.
async fn with_adapter<T, F>(cache: &SharedCache, op: F) -> Result<T>
where
    F: FnOnce(&mut dyn CacheAdapter) -> T + Send + 'static,
    T: Send + 'static,
{
    let cache = cache.clone();
    tokio::task::spawn_blocking(move || {
        // Write lock: reads may refresh an adapter's mirror
        let mut adapter = cache.blocking_write();
        op(&mut **adapter)
    })
    .await
    .map_err(|e| CacheError::BackendUnavailable(format!("cache task failed: {}", e)))
}

/// Handler for GET /cache/:key
///
/// Returns the stored value, or 404 when the key is absent or expired.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    checked_key(&key)?;

    let lookup_key = key.clone();
    match with_adapter(&state.cache, move |cache| cache.lookup(&lookup_key)).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /cache/:key/exists
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    checked_key(&key)?;

    let exists_key = key.clone();
    let exists = with_adapter(&state.cache, move |cache| cache.has(&exists_key)).await?;

    Ok(Json(HasResponse::new(key, exists)))
}

/// Handler for PUT /cache/:key
///
/// Stores any JSON value with an optional TTL.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<PutRequest>,
) -> Result<Json<KeyResponse>> {
    checked_key(&key)?;

    let put_key = key.clone();
    with_adapter(&state.cache, move |cache| {
        cache.put(&put_key, req.value, req.seconds)
    })
    .await??;

    Ok(Json(KeyResponse::stored(key)))
}

/// Handler for DELETE /cache/:key
///
/// Succeeds whether or not the key existed.
pub async fn forget_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KeyResponse>> {
    checked_key(&key)?;

    let forget_key = key.clone();
    with_adapter(&state.cache, move |cache| cache.forget(&forget_key)).await??;

    Ok(Json(KeyResponse::forgotten(key)))
}

/// Handler for DELETE /cache
pub async fn flush_handler(State(state): State<AppState>) -> Result<Json<FlushResponse>> {
    with_adapter(&state.cache, |cache| cache.flush()).await??;

    Ok(Json(FlushResponse::flushed()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.cache.read().await;
    Json(HealthResponse::healthy(cache.name()))
}
