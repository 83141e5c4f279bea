//! Cache Adapter Contract
//!
//! The interface every storage backend implements.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::Result;

// == Cache Adapter ==
/// Uniform key/value contract with lazy time-based expiry.
///
/// Reads never fail: a missing key, an expired entry or an unreadable backing
/// store all look the same to the caller (`has` is false, `get` yields the
/// default). Writes return a [`Result`] so I/O failures are visible.
///
/// Every operation takes `&mut self`. Share an adapter between tasks through
/// [`SharedCache`].
pub trait CacheAdapter: Send + Sync {
    /// Backend identifier, e.g. `"memory"`.
    fn name(&self) -> &'static str;

    /// True iff `key` holds an entry whose expiration is still in the future.
    fn has(&mut self, key: &str) -> bool;

    /// The stored value for `key`, or `None` when absent or expired.
    ///
    /// One backend round trip. Use it when a miss must be told apart from a
    /// stored value equal to some default.
    fn lookup(&mut self, key: &str) -> Option<Value>;

    /// The stored value for `key`, or `default` when absent or expired.
    fn get(&mut self, key: &str, default: Value) -> Value {
        self.lookup(key).unwrap_or(default)
    }

    /// Stores `value` for `seconds`, or for the configured default TTL when
    /// `seconds` is `None`. Replaces any previous entry.
    fn put(&mut self, key: &str, value: Value, seconds: Option<u64>) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn forget(&mut self, key: &str) -> Result<()>;

    /// Removes every entry the backend can see.
    fn flush(&mut self) -> Result<()>;
}

/// An adapter shared across tasks.
pub type SharedCache = Arc<RwLock<Box<dyn CacheAdapter>>>;

/// Wraps an adapter for shared use.
pub fn shared(adapter: Box<dyn CacheAdapter>) -> SharedCache {
    Arc::new(RwLock::new(adapter))
}
