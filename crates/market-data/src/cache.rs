//! On-disk symbol listing cache.
//!
//! Listings change rarely, so a fetched listing is kept as a JSON file
//! under the cache directory and served from disk while its last-access
//! timestamp is under 24 hours old. Every failure mode of a cache read
//! is recovered by falling through to a remote fetch; only the write-back
//! after a fetch can fail the enclosing operation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::SymbolRecord;

/// How long a cache entry stays fresh after its last access.
pub const MAX_CACHE_AGE_HOURS: i64 = 24;

/// Outcome of a cache lookup.
///
/// Everything except `Hit` means the caller should fetch remotely; the
/// variants are kept separate so the gate can log why the cache was
/// bypassed.
#[derive(Debug)]
pub enum CacheState {
    /// Fresh entry found and parsed.
    Hit(Vec<SymbolRecord>),
    /// No entry, or the entry could not be read.
    Miss,
    /// Entry exists but its last access is older than the freshness window.
    Stale,
    /// Entry exists and is fresh but its content does not parse.
    Corrupt,
}

/// Disk cache for symbol listings, one JSON file per logical key.
pub struct SymbolCache {
    cache_dir: PathBuf,
}

impl SymbolCache {
    /// Creates a cache rooted at the given directory.
    ///
    /// The directory is created if it does not exist.
    pub fn new(cache_dir: impl AsRef<Path>) -> Result<Self, MarketDataError> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir).map_err(|source| MarketDataError::CacheWriteFailed {
            path: cache_dir.clone(),
            source,
        })?;

        Ok(Self { cache_dir })
    }

    /// Look up the entry for `key`.
    ///
    /// Never errors: any failure is folded into the returned state.
    pub fn load(&self, key: &str) -> CacheState {
        self.load_at(key, Utc::now())
    }

    fn load_at(&self, key: &str, now: DateTime<Utc>) -> CacheState {
        let path = self.entry_path(key);

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!("cache miss for {}: {}", key, e);
                return CacheState::Miss;
            }
        };
        let accessed = match metadata.accessed() {
            Ok(accessed) => accessed,
            Err(e) => {
                debug!("cache miss for {}: no access time ({})", key, e);
                return CacheState::Miss;
            }
        };

        if !is_fresh(accessed.into(), now) {
            return CacheState::Stale;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!("cache miss for {}: {}", key, e);
                return CacheState::Miss;
            }
        };

        match serde_json::from_str::<Vec<SymbolRecord>>(&content) {
            Ok(records) => {
                debug!("cache hit for {}: {} records", key, records.len());
                CacheState::Hit(records)
            }
            Err(e) => {
                warn!("cache entry for {} is corrupt: {}", key, e);
                CacheState::Corrupt
            }
        }
    }

    /// Write the entry for `key`, replacing any prior content.
    pub fn store(&self, key: &str, records: &[SymbolRecord]) -> Result<(), MarketDataError> {
        let path = self.entry_path(key);
        let json = serde_json::to_string(records)?;

        fs::write(&path, json).map_err(|source| MarketDataError::CacheWriteFailed {
            path: path.clone(),
            source,
        })?;

        debug!("cached {} records under {}", records.len(), key);
        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

/// Freshness test: the entry is fresh while `now - last_access` is under
/// the 24-hour window. A timestamp in the future counts as fresh, matching
/// the signed subtraction this policy was defined with.
fn is_fresh(last_access: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - last_access < Duration::hours(MAX_CACHE_AGE_HOURS)
}
