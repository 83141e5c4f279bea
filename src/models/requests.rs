//! Request DTOs for the cache HTTP API
//!
//! Defines the structure of incoming HTTP request bodies and key validation.

use serde::Deserialize;
use serde_json::Value;

/// Longest key accepted over HTTP, matching memcached's limit.
pub const MAX_KEY_LENGTH: usize = 250;

/// Request body for the PUT operation (PUT /cache/:key)
///
/// # Fields
/// - `value`: Any JSON value to store
/// - `seconds`: Optional TTL in seconds (uses the store default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub seconds: Option<u64>,
}

/// Validates a cache key taken from the URL.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Some("Key cannot contain whitespace or control characters".to_string());
    }
    None
}
