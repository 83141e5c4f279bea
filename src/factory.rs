//! Cache Factory Module
//!
//! Resolves an adapter configuration to a constructed adapter by looking its
//! `type` up in a registry of drivers.

use std::collections::HashMap;

use tracing::info;

use crate::cache::{AdapterConfig, CacheAdapter, FileAdapter, MemcacheAdapter, MemoryAdapter};
use crate::error::{CacheError, Result};

/// Builds an adapter from its configuration.
pub type Driver = Box<dyn Fn(AdapterConfig) -> Result<Box<dyn CacheAdapter>> + Send + Sync>;

// == Cache Factory ==
/// Registry of drivers keyed by alias (`file`, `memcache`, `memory`, ...).
///
/// Drivers are registered once at startup; afterwards the factory is only
/// read. [`CacheFactory::default`] comes with the built-in drivers.
pub struct CacheFactory {
    drivers: HashMap<String, Driver>,
}

impl CacheFactory {
    // == Constructor ==
    /// Creates a factory with no drivers registered.
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    // == Register ==
    /// Registers (or replaces) the driver for `alias`.
    pub fn register<F>(&mut self, alias: impl Into<String>, driver: F) -> &mut Self
    where
        F: Fn(AdapterConfig) -> Result<Box<dyn CacheAdapter>> + Send + Sync + 'static,
    {
        self.drivers.insert(alias.into(), Box::new(driver));
        self
    }

    /// Registered aliases, sorted.
    pub fn drivers(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    // == Create ==
    /// Builds the adapter selected by `config.type`.
    ///
    /// The whole configuration is passed to the driver unchanged. A missing or
    /// unknown `type` is a [`CacheError::UnsupportedAdapter`]; there is no
    /// fallback backend.
    pub fn create(&self, config: AdapterConfig) -> Result<Box<dyn CacheAdapter>> {
        let kind = config
            .kind()
            .ok_or_else(|| CacheError::UnsupportedAdapter("type is not defined".to_string()))?
            .to_string();

        let driver = self
            .drivers
            .get(&kind)
            .ok_or_else(|| CacheError::UnsupportedAdapter(format!("unrecognised type `{}`", kind)))?;

        let adapter = driver(config)?;
        info!(kind = %kind, "cache adapter created");
        Ok(adapter)
    }
}

impl Default for CacheFactory {
    fn default() -> Self {
        let mut factory = Self::new();
        factory
            .register("file", |config| Ok(Box::new(FileAdapter::new(config)?)))
            .register("memcache", |config| Ok(Box::new(MemcacheAdapter::new(config)?)))
            .register("memory", |config| Ok(Box::new(MemoryAdapter::new(config)?)));
        factory
    }
}
