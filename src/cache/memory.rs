//! Memory Adapter Module
//!
//! Process-local cache backed by a HashMap. Nothing survives a restart.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::options::resolve_seconds;
use crate::cache::{AdapterConfig, CacheAdapter, CacheEntry};
use crate::error::Result;

// == Memory Adapter ==
/// In-process cache storage with TTL support.
#[derive(Debug)]
pub struct MemoryAdapter {
    /// Configuration supplied at construction
    config: AdapterConfig,
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Default TTL in seconds for entries without explicit TTL
    default_seconds: Option<u64>,
}

impl MemoryAdapter {
    // == Constructor ==
    /// Creates an empty MemoryAdapter.
    ///
    /// Only `seconds` is read from the configuration.
    pub fn new(config: AdapterConfig) -> Result<Self> {
        let default_seconds = config.seconds()?;

        Ok(Self {
            config,
            entries: HashMap::new(),
            default_seconds,
        })
    }

    /// The configuration this adapter was built from.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet overwritten.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheAdapter for MemoryAdapter {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn has(&mut self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    fn lookup(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                debug!(key, "memory cache hit");
                Some(entry.value.clone())
            }
            _ => {
                debug!(key, "memory cache miss");
                None
            }
        }
    }

    fn put(&mut self, key: &str, value: Value, seconds: Option<u64>) -> Result<()> {
        let seconds = resolve_seconds(seconds, self.default_seconds)?;
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, seconds));
        Ok(())
    }

    fn forget(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}
