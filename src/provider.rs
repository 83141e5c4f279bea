//! Cache Service Provider
//!
//! Reads the `cache` configuration section, builds the default store through
//! the factory and publishes it under the `cache` alias.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::cache::{shared, AdapterConfig, SharedCache};
use crate::error::{CacheError, Result};
use crate::factory::CacheFactory;

// == Cache Section ==
/// The `cache` section of the application configuration.
///
/// ```json
/// {
///   "default": "file",
///   "file":   { "type": "file", "path": "storage/cache", "seconds": 31536000 },
///   "memory": { "type": "memory", "seconds": 31536000 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSection {
    /// Name of the store to publish
    pub default: String,
    /// Every named store configuration
    #[serde(flatten)]
    pub stores: Map<String, Value>,
}

impl CacheSection {
    /// Configuration of the store named by `default`.
    pub fn default_store(&self) -> Result<AdapterConfig> {
        let store = self.stores.get(&self.default).ok_or_else(|| {
            CacheError::Configuration(format!("cache store `{}` is not configured", self.default))
        })?;

        AdapterConfig::try_from(store.clone())
    }
}

// == Bindings ==
/// Published services, resolved by alias.
#[derive(Default, Clone)]
pub struct Bindings {
    services: HashMap<String, SharedCache>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `cache` under `alias`, replacing any previous binding.
    pub fn bind(&mut self, alias: impl Into<String>, cache: SharedCache) {
        self.services.insert(alias.into(), cache);
    }

    /// The service published under `alias`.
    pub fn resolve(&self, alias: &str) -> Option<SharedCache> {
        self.services.get(alias).cloned()
    }
}

// == Cache Service Provider ==
/// Wires the cache factory into [`Bindings`].
pub struct CacheServiceProvider {
    factory: CacheFactory,
}

impl CacheServiceProvider {
    /// Alias the default store is published under.
    pub const ALIAS: &'static str = "cache";

    pub fn new(factory: CacheFactory) -> Self {
        Self { factory }
    }

    /// Builds the default store of `section` and binds it under [`Self::ALIAS`].
    pub fn register(&self, section: &CacheSection, bindings: &mut Bindings) -> Result<SharedCache> {
        let adapter = self.factory.create(section.default_store()?)?;
        info!(store = %section.default, backend = adapter.name(), "cache service registered");

        let cache = shared(adapter);
        bindings.bind(Self::ALIAS, cache.clone());
        Ok(cache)
    }
}

impl Default for CacheServiceProvider {
    fn default() -> Self {
        Self::new(CacheFactory::default())
    }
}
