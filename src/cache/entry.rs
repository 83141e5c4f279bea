//! Cache Entry Module
//!
//! Defines a stored value together with its absolute expiration time.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A stored value and the Unix second after which it is considered absent.
///
/// This is also the on-disk shape used by the file adapter:
/// `{"value": ..., "expires": 1700000000}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored payload, opaque to every adapter
    pub value: Value,
    /// Expiration timestamp (Unix seconds)
    pub expires: i64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that lives for `seconds` from now.
    pub fn new(value: Value, seconds: u64) -> Self {
        Self {
            value,
            expires: expires_in(seconds),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry whose expiration equals the current second is already
    /// expired: it is only live while `expires > now`.
    pub fn is_expired(&self) -> bool {
        self.expires <= current_timestamp()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Absolute timestamp `seconds` from now, saturating instead of overflowing.
pub fn expires_in(seconds: u64) -> i64 {
    let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
    current_timestamp().saturating_add(seconds)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_creation_with_ttl() {
        let before = current_timestamp();
        let entry = CacheEntry::new(json!("test_value"), 60);

        assert_eq!(entry.value, json!("test_value"));
        assert!(entry.expires >= before + 60);
        assert!(entry.expires <= current_timestamp() + 60);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(json!("test_value"), 1);

        assert!(!entry.is_expired());

        // Second granularity: wait past the next full second boundary
        sleep(Duration::from_millis(2100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_seconds_is_expired_immediately() {
        let entry = CacheEntry::new(json!(1), 0);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp();
        let entry = CacheEntry {
            value: json!("test"),
            expires: now,
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_expires_in_saturates() {
        assert_eq!(expires_in(u64::MAX), i64::MAX);
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = CacheEntry {
            value: json!({"a": [1, 2]}),
            expires: 1_700_000_000,
        };
        let text = serde_json::to_string(&entry).unwrap();
        assert_eq!(text, r#"{"value":{"a":[1,2]},"expires":1700000000}"#);
    }
}
