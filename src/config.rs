//! Configuration Module
//!
//! Loads server settings and the `cache` section from environment variables,
//! or the `cache` section from a JSON file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map};

use crate::cache::DEFAULT_MEMCACHE_PORT;
use crate::error::{CacheError, Result};
use crate::provider::CacheSection;

/// Default TTL when nothing is configured: one year.
pub const DEFAULT_SECONDS: u64 = 31_536_000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Optional JSON file holding the `cache` section
    pub cache_config: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_CONFIG` - path to a JSON `cache` section (default: none)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cache_config: env::var("CACHE_CONFIG")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// The `cache` section: read from `cache_config` when set, otherwise
    /// assembled from the environment.
    pub fn cache_section(&self) -> Result<CacheSection> {
        match &self.cache_config {
            Some(path) => load_cache_section(path),
            None => Ok(cache_section_from_env()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_config: None,
        }
    }
}

/// Reads a `cache` section from a JSON file.
pub fn load_cache_section(path: &Path) -> Result<CacheSection> {
    let text = fs::read_to_string(path).map_err(|e| {
        CacheError::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&text).map_err(|e| {
        CacheError::Configuration(format!("invalid cache config {}: {}", path.display(), e))
    })
}

/// Builds a `cache` section with one store per backend.
///
/// # Environment Variables
/// - `CACHE_DEFAULT` - store to publish (default: file)
/// - `CACHE_PATH` - file store directory (default: storage/cache)
/// - `CACHE_SECONDS` - default TTL (default: one year)
/// - `MEMCACHE_HOST` - memcached host (default: 127.0.0.1)
/// - `MEMCACHE_PORT` - memcached port (default: 11211)
pub fn cache_section_from_env() -> CacheSection {
    let seconds: u64 = env::var("CACHE_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SECONDS);
    let path = env::var("CACHE_PATH").unwrap_or_else(|_| "storage/cache".to_string());
    let host = env::var("MEMCACHE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("MEMCACHE_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MEMCACHE_PORT);

    let mut stores = Map::new();
    stores.insert(
        "file".to_string(),
        json!({ "type": "file", "path": path, "seconds": seconds }),
    );
    stores.insert(
        "memcache".to_string(),
        json!({ "type": "memcache", "host": host, "port": port, "seconds": seconds }),
    );
    stores.insert(
        "memory".to_string(),
        json!({ "type": "memory", "seconds": seconds }),
    );

    CacheSection {
        default: env::var("CACHE_DEFAULT").unwrap_or_else(|_| "file".to_string()),
        stores,
    }
}
