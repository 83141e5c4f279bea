//! Memcache Adapter Module
//!
//! Delegates every operation to a memcached server. Values travel as JSON
//! text so any payload round-trips.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::entry::expires_in;
use crate::cache::options::resolve_seconds;
use crate::cache::{AdapterConfig, CacheAdapter};
use crate::error::{CacheError, Result};

// == Memcache Client ==
/// The subset of a memcached client the adapter relies on.
///
/// Implemented for `memcache::Client` when the `memcache` feature is on.
pub trait MemcacheClient: Send + Sync {
    /// Raw item text, `None` when the server has no such item.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores an item. `expiration` is an absolute Unix timestamp.
    fn set(&self, key: &str, value: &str, expiration: u32) -> Result<()>;

    /// Deletes an item, returning whether it existed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Invalidates every item on the server.
    fn flush(&self) -> Result<()>;
}

#[cfg(feature = "memcache")]
impl MemcacheClient for ::memcache::Client {
    fn get(&self, key: &str) -> Result<Option<String>> {
        ::memcache::Client::get::<String>(self, key).map_err(unavailable)
    }

    fn set(&self, key: &str, value: &str, expiration: u32) -> Result<()> {
        ::memcache::Client::set(self, key, value, expiration).map_err(unavailable)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        ::memcache::Client::delete(self, key).map_err(unavailable)
    }

    fn flush(&self) -> Result<()> {
        ::memcache::Client::flush(self).map_err(unavailable)
    }
}

#[cfg(feature = "memcache")]
fn unavailable(err: ::memcache::MemcacheError) -> CacheError {
    CacheError::BackendUnavailable(err.to_string())
}

// == Memcache Adapter ==
/// Cache adapter backed by a memcached server.
pub struct MemcacheAdapter {
    /// Configuration supplied at construction
    config: AdapterConfig,
    /// Connection to the server
    client: Box<dyn MemcacheClient>,
    /// Default TTL in seconds for entries without explicit TTL
    default_seconds: Option<u64>,
    /// Treat falsy values (`0`, `false`, `""`, ...) as misses
    falsy_as_miss: bool,
}

impl MemcacheAdapter {
    // == Constructor ==
    /// Connects to the server at `host`:`port`.
    ///
    /// Fails with [`CacheError::UnsupportedBackend`] when the crate was built
    /// without the `memcache` feature.
    pub fn new(config: AdapterConfig) -> Result<Self> {
        let host = config.host()?.to_string();
        let port = config.port()?;
        let client = connect(&host, port)?;

        info!(host = %host, port, "memcache cache ready");
        Self::with_client(config, client)
    }

    /// Builds the adapter around an existing client.
    pub fn with_client(config: AdapterConfig, client: Box<dyn MemcacheClient>) -> Result<Self> {
        let default_seconds = config.seconds()?;
        let falsy_as_miss = config.flag("falsy_as_miss")?;

        Ok(Self {
            config,
            client,
            default_seconds,
            falsy_as_miss,
        })
    }

    /// The configuration this adapter was built from.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Fetches and decodes an item. Server errors read as a miss.
    fn fetch(&self, key: &str) -> Option<Value> {
        match self.client.get(key) {
            Ok(Some(text)) => {
                // Items written by other clients may not be JSON
                Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "memcache read failed");
                None
            }
        }
    }
}

#[cfg(feature = "memcache")]
fn connect(host: &str, port: u16) -> Result<Box<dyn MemcacheClient>> {
    let url = format!("memcache://{}:{}", host, port);
    let client = ::memcache::Client::connect(url).map_err(unavailable)?;
    Ok(Box::new(client))
}

#[cfg(not(feature = "memcache"))]
fn connect(_host: &str, _port: u16) -> Result<Box<dyn MemcacheClient>> {
    Err(CacheError::UnsupportedBackend(
        "memcache client is not available; build with the `memcache` feature".to_string(),
    ))
}

impl CacheAdapter for MemcacheAdapter {
    fn name(&self) -> &'static str {
        "memcache"
    }

    fn has(&mut self, key: &str) -> bool {
        match self.fetch(key) {
            Some(Value::Bool(false)) if self.falsy_as_miss => false,
            Some(_) => true,
            None => false,
        }
    }

    fn lookup(&mut self, key: &str) -> Option<Value> {
        match self.fetch(key) {
            Some(value) if self.falsy_as_miss && is_falsy(&value) => {
                debug!(key, "memcache falsy value read as miss");
                None
            }
            Some(value) => {
                debug!(key, "memcache hit");
                Some(value)
            }
            None => {
                debug!(key, "memcache miss");
                None
            }
        }
    }

    fn put(&mut self, key: &str, value: Value, seconds: Option<u64>) -> Result<()> {
        let seconds = resolve_seconds(seconds, self.default_seconds)?;
        let expiration = u32::try_from(expires_in(seconds)).unwrap_or(u32::MAX);

        self.client.set(key, &value.to_string(), expiration)
    }

    fn forget(&mut self, key: &str) -> Result<()> {
        self.client.delete(key).map(|_| ())
    }

    fn flush(&mut self) -> Result<()> {
        self.client.flush()
    }
}

// == Falsy ==
/// Values a loosely typed caller would read as "nothing there".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}
