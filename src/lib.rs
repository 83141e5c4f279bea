//! Polycache - Pluggable cache adapters
//!
//! One key/value contract with lazy TTL expiry, backed by memory, local JSON
//! files or a memcached server, selected at runtime through a driver factory.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod factory;
pub mod models;
pub mod provider;

pub use api::AppState;
pub use cache::{AdapterConfig, CacheAdapter, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use factory::CacheFactory;
pub use provider::{Bindings, CacheSection, CacheServiceProvider};
