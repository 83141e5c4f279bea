//! Adapter Configuration Module
//!
//! The string-keyed option map every adapter is constructed from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CacheError, Result};

/// Port used when a memcache configuration omits `port`.
pub const DEFAULT_MEMCACHE_PORT: u16 = 11211;

// == Adapter Config ==
/// Configuration handed to the factory and, unchanged, to the adapter it builds.
///
/// Each adapter reads only the fields it needs:
/// - `type` - backend selector (`file`, `memcache`, `memory`)
/// - `seconds` - default TTL for `put` calls that omit one
/// - `path` - base directory (file)
/// - `host`, `port` - server endpoint (memcache)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdapterConfig(Map<String, Value>);

impl AdapterConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an option, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw access to an option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The backend selector, if present.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    // == Typed Accessors ==
    /// Reads a required string option.
    pub fn require_str(&self, key: &str) -> Result<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
            Some(_) => Err(CacheError::Configuration(format!(
                "`{}` must be a non-empty string",
                key
            ))),
            None => Err(CacheError::Configuration(format!("`{}` is not defined", key))),
        }
    }

    /// Reads an optional integer option.
    ///
    /// Accepts JSON numbers and numeric strings, since configuration files
    /// often quote numbers.
    pub fn integer(&self, key: &str) -> Result<Option<u64>> {
        let parsed = match self.0.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        };

        parsed.map(Some).ok_or_else(|| {
            CacheError::Configuration(format!("`{}` must be a non-negative integer", key))
        })
    }

    /// Reads an optional boolean flag, defaulting to `false`.
    pub fn flag(&self, key: &str) -> Result<bool> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(CacheError::Configuration(format!(
                "`{}` must be a boolean",
                key
            ))),
        }
    }

    /// Default TTL in seconds.
    pub fn seconds(&self) -> Result<Option<u64>> {
        self.integer("seconds")
    }

    /// Base directory for the file adapter.
    pub fn path(&self) -> Result<PathBuf> {
        self.require_str("path").map(PathBuf::from)
    }

    /// Memcache server host.
    pub fn host(&self) -> Result<&str> {
        self.require_str("host")
    }

    /// Memcache server port, [`DEFAULT_MEMCACHE_PORT`] when omitted.
    pub fn port(&self) -> Result<u16> {
        match self.integer("port")? {
            None => Ok(DEFAULT_MEMCACHE_PORT),
            Some(port) => u16::try_from(port)
                .map_err(|_| CacheError::Configuration(format!("`port` {} is out of range", port))),
        }
    }
}

impl From<Map<String, Value>> for AdapterConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for AdapterConfig {
    type Error = CacheError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CacheError::Configuration(format!(
                "adapter configuration must be an object, got {}",
                other
            ))),
        }
    }
}

// == Default Seconds ==
/// Resolves the TTL for a `put`: the explicit value, else the configured default.
pub(crate) fn resolve_seconds(explicit: Option<u64>, default: Option<u64>) -> Result<u64> {
    explicit.or(default).ok_or_else(|| {
        CacheError::Configuration("`seconds` is not defined and no TTL was given".to_string())
    })
}
