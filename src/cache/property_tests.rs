//! Property-Based Tests for Cache Adapters
//!
//! Uses proptest to check the adapter contract against the memory and file
//! backends with arbitrary keys and JSON payloads.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;

use crate::cache::{AdapterConfig, CacheAdapter, FileAdapter, MemoryAdapter};

// == Test Configuration ==
const TEST_DEFAULT_SECONDS: u64 = 300;

fn memory_adapter() -> MemoryAdapter {
    MemoryAdapter::new(AdapterConfig::new().with("seconds", TEST_DEFAULT_SECONDS)).unwrap()
}

fn file_adapter(dir: &TempDir) -> FileAdapter {
    FileAdapter::new(
        AdapterConfig::new()
            .with("path", dir.path().to_str().unwrap())
            .with("seconds", TEST_DEFAULT_SECONDS),
    )
    .unwrap()
}

// == Strategies ==
/// Generates cache keys, including characters that are not filename-safe
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:/. -]{1,64}".prop_map(|s| s)
}

/// Generates JSON payloads, including falsy scalars
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("JSON has no NaN or infinity", |f| f.is_finite())
            .prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,32}".prop_map(Value::from),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::hash_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|m| json!(m)),
        ]
    })
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: Value },
    Get { key: String },
    Forget { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Forget { key }),
    ]
}

/// Replays `ops` against `cache` and a HashMap model, comparing every read.
fn check_against_model(
    cache: &mut dyn CacheAdapter,
    ops: Vec<CacheOp>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, Value> = HashMap::new();
    let sentinel = json!({"__miss__": true});

    for op in ops {
        match op {
            CacheOp::Put { key, value } => {
                cache.put(&key, value.clone(), None).unwrap();
                model.insert(key, value);
            }
            CacheOp::Get { key } => {
                let expected = model.get(&key).cloned().unwrap_or_else(|| sentinel.clone());
                prop_assert_eq!(cache.get(&key, sentinel.clone()), expected);
                prop_assert_eq!(cache.has(&key), model.contains_key(&key));
            }
            CacheOp::Forget { key } => {
                cache.forget(&key).unwrap();
                model.remove(&key);
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Memory adapter behaves like a plain map while nothing expires
    #[test]
    fn prop_memory_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut cache = memory_adapter();
        check_against_model(&mut cache, ops)?;
    }

    // Storing then reading returns the exact value, falsy values included
    #[test]
    fn prop_memory_roundtrip(key in key_strategy(), value in value_strategy()) {
        let mut cache = memory_adapter();

        cache.put(&key, value.clone(), Some(60)).unwrap();
        prop_assert_eq!(cache.get(&key, json!("miss")), value);
    }

    // After forget, the key reads as the caller's default
    #[test]
    fn prop_memory_forget_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut cache = memory_adapter();

        cache.put(&key, value, None).unwrap();
        prop_assert!(cache.has(&key));

        cache.forget(&key).unwrap();
        prop_assert!(!cache.has(&key));
        prop_assert_eq!(cache.get(&key, json!("default")), json!("default"));
    }

    // Storing V1 then V2 under one key yields V2
    #[test]
    fn prop_memory_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut cache = memory_adapter();

        cache.put(&key, value1, None).unwrap();
        cache.put(&key, value2.clone(), None).unwrap();

        prop_assert_eq!(cache.get(&key, Value::Null), value2);
        prop_assert_eq!(cache.len(), 1);
    }

    // Flush hides every previously stored key
    #[test]
    fn prop_memory_flush_clears_all(keys in prop::collection::vec(key_strategy(), 1..20)) {
        let mut cache = memory_adapter();

        for key in &keys {
            cache.put(key, json!(key), None).unwrap();
        }
        cache.flush().unwrap();

        for key in &keys {
            prop_assert!(!cache.has(key));
        }
    }
}

// Disk-backed cases are slower, so run fewer of them
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_file_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..30)) {
        let dir = TempDir::new().unwrap();
        let mut cache = file_adapter(&dir);
        check_against_model(&mut cache, ops)?;
    }

    // A fresh adapter over the same directory sees what the first one wrote
    #[test]
    fn prop_file_roundtrip_across_instances(key in key_strategy(), value in value_strategy()) {
        let dir = TempDir::new().unwrap();

        file_adapter(&dir).put(&key, value.clone(), Some(60)).unwrap();

        let mut reader = file_adapter(&dir);
        prop_assert_eq!(reader.get(&key, json!("miss")), value);
    }

    #[test]
    fn prop_file_flush_clears_all(keys in prop::collection::vec(key_strategy(), 1..10)) {
        let dir = TempDir::new().unwrap();
        let mut cache = file_adapter(&dir);

        for key in &keys {
            cache.put(key, json!(key), None).unwrap();
        }
        cache.flush().unwrap();

        for key in &keys {
            prop_assert!(!cache.has(key));
        }
    }
}

// Separate proptest block with very few cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(3))]

    // After the TTL elapses both backends report the entry as absent
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in value_strategy()) {
        let dir = TempDir::new().unwrap();
        let mut memory = memory_adapter();
        let mut file = file_adapter(&dir);

        memory.put(&key, value.clone(), Some(1)).unwrap();
        file.put(&key, value.clone(), Some(1)).unwrap();

        prop_assert!(memory.has(&key), "Entry should exist before TTL expires");
        prop_assert!(file.has(&key), "Entry should exist before TTL expires");

        // Expiry has second granularity
        sleep(Duration::from_millis(2100));

        prop_assert!(!memory.has(&key));
        prop_assert!(!file.has(&key));
        prop_assert_eq!(memory.get(&key, json!("d")), json!("d"));
        prop_assert_eq!(file.get(&key, json!("d")), json!("d"));
    }
}
