//! Cache Module
//!
//! The adapter contract and its three backends: in-process memory, JSON files
//! on local disk, and a memcached server. Expiry is lazy and checked on
//! access; nothing sweeps expired entries in the background.

mod adapter;
mod entry;
mod file;
mod memcached;
mod memory;
mod options;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use adapter::{shared, CacheAdapter, SharedCache};
pub use entry::{current_timestamp, CacheEntry};
pub use file::{hash_key, FileAdapter, FILE_EXTENSION};
pub use memcached::{MemcacheAdapter, MemcacheClient};
pub use memory::MemoryAdapter;
pub use options::{AdapterConfig, DEFAULT_MEMCACHE_PORT};
