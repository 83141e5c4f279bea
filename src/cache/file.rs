//! File Adapter Module
//!
//! Stores each entry as a JSON file named after the SHA-1 digest of its key.
//!
//! `flush` removes every `*.json` file under the base directory, so two
//! adapters sharing a directory also share (and clear) each other's entries.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use sha1::{Digest, Sha1};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::cache::options::resolve_seconds;
use crate::cache::{AdapterConfig, CacheAdapter, CacheEntry};
use crate::error::Result;

/// Extension of every cache file.
pub const FILE_EXTENSION: &str = "json";

// == File Adapter ==
/// Disk-backed cache with an in-memory mirror of the entries it has seen.
#[derive(Debug)]
pub struct FileAdapter {
    /// Configuration supplied at construction
    config: AdapterConfig,
    /// Base directory holding the cache files
    base: PathBuf,
    /// Read-through mirror of the files
    cached: HashMap<String, CacheEntry>,
    /// Default TTL in seconds for entries without explicit TTL
    default_seconds: Option<u64>,
}

impl FileAdapter {
    // == Constructor ==
    /// Creates a FileAdapter rooted at the configured `path`.
    ///
    /// The directory is created when missing.
    pub fn new(config: AdapterConfig) -> Result<Self> {
        let base = config.path()?;
        let default_seconds = config.seconds()?;

        fs::create_dir_all(&base)?;
        info!(path = %base.display(), "file cache ready");

        Ok(Self {
            config,
            base,
            cached: HashMap::new(),
            default_seconds,
        })
    }

    /// The configuration this adapter was built from.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Base directory of the cache files.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base
            .join(format!("{}.{}", hash_key(key), FILE_EXTENSION))
    }

    // == Read ==
    /// Loads the entry for `key` from disk.
    ///
    /// A missing file is a plain miss. An unreadable or malformed file is
    /// logged and also treated as a miss.
    fn read(&self, key: &str) -> Option<CacheEntry> {
        let path = self.path_for(key);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable cache file");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed cache file");
                None
            }
        }
    }

    // == Write ==
    /// Writes `entry` through a temp file renamed over the key file.
    fn write(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        let path = self.path_for(key);
        let body = serde_json::to_vec(entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut tmp = NamedTempFile::new_in(&self.base)?;
        tmp.write_all(&body)?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!(key, path = %path.display(), "cache file written");
        Ok(())
    }
}

impl CacheAdapter for FileAdapter {
    fn name(&self) -> &'static str {
        "file"
    }

    fn has(&mut self, key: &str) -> bool {
        match self.read(key) {
            Some(entry) => {
                let live = !entry.is_expired();
                self.cached.insert(key.to_string(), entry);
                live
            }
            None => {
                self.cached.remove(key);
                false
            }
        }
    }

    fn lookup(&mut self, key: &str) -> Option<Value> {
        if self.has(key) {
            if let Some(entry) = self.cached.get(key) {
                debug!(key, "file cache hit");
                return Some(entry.value.clone());
            }
        }

        debug!(key, "file cache miss");
        None
    }

    fn put(&mut self, key: &str, value: Value, seconds: Option<u64>) -> Result<()> {
        let seconds = resolve_seconds(seconds, self.default_seconds)?;
        let entry = CacheEntry::new(value, seconds);

        self.write(key, &entry)?;
        self.cached.insert(key.to_string(), entry);
        Ok(())
    }

    fn forget(&mut self, key: &str) -> Result<()> {
        self.cached.remove(key);

        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.cached.clear();

        let mut removed = 0usize;
        for dir_entry in fs::read_dir(&self.base)? {
            let path = dir_entry?.path();
            let is_cache_file = path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(FILE_EXTENSION);

            if is_cache_file {
                match fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                }
            }
        }

        info!(path = %self.base.display(), removed, "file cache flushed");
        Ok(())
    }
}

// == Key Hashing ==
/// Lowercase hex SHA-1 digest of a cache key.
pub fn hash_key(key: &str) -> String {
    hex::encode(Sha1::digest(key.as_bytes()))
}
