//! Cache Store Module
//!
//! Filesystem-backed request/response store: one directory per entry, sharded
//! by key prefix, with lazy expiration checked at read time.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::entry::{CacheEntry, EntryMetadata};
use crate::cache::key::{shard_prefix, KeyDeriver};
use crate::cache::stats::CacheStats;
use crate::cache::transform::ByteTransform;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{CacheRequest, CacheResponse};

/// Clock used for entry timestamps and freshness checks; injectable so tests
/// can control entry age.
pub type ClockFn = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

// == Artifact Names ==
const METADATA: &str = "metadata";
const RESPONSE_HEADERS: &str = "response_headers";
const RESPONSE_BODY: &str = "response_body";
const REQUEST_HEADERS: &str = "request_headers";
const REQUEST_BODY: &str = "request_body";

// == Filesystem Cache Store ==
/// Disk-backed request/response cache.
///
/// Exclusively owns the directory tree under its root. Entries live at
/// `<root>/<scope>/<key[0:2]>/<key>/` and hold five artifacts: the metadata
/// record plus raw request/response headers and bodies, each written through
/// the configured byte-stream transform.
///
/// Expiration is purely lazy: expired entries read back as misses but are
/// only deleted by the out-of-band [`remove_expired`](Self::remove_expired)
/// sweep.
pub struct FilesystemCacheStore {
    /// Base directory for all scopes
    root: PathBuf,
    /// Maximum entry age in seconds; zero or negative disables expiration
    expiration_secs: i64,
    /// Transform applied to every artifact read and write
    transform: ByteTransform,
    /// Key deriver for request identity
    keys: KeyDeriver,
    /// Wall clock, injectable for tests
    clock: ClockFn,
    /// Performance counters
    stats: CacheStats,
}

impl FilesystemCacheStore {
    // == Constructor ==
    /// Creates a store from configuration. No directories are created until
    /// the first `put`.
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.cache_dir.clone(),
            expiration_secs: config.expiration_secs,
            transform: if config.use_gzip {
                ByteTransform::Gzip
            } else {
                ByteTransform::Identity
            },
            keys: KeyDeriver::default(),
            clock: Arc::new(Utc::now),
            stats: CacheStats::new(),
        }
    }

    /// Replaces the default key deriver with one wrapping a caller-supplied
    /// fingerprint function.
    pub fn with_key_deriver(mut self, keys: KeyDeriver) -> Self {
        self.keys = keys;
        self
    }

    /// Replaces the wall clock. Entry timestamps and freshness checks both
    /// use this clock.
    pub fn with_clock(mut self, clock: ClockFn) -> Self {
        self.clock = clock;
        self
    }

    // == Open ==
    /// Prepares the store for `scope`. Idempotent; creates no directories and
    /// never fails, even if the scope has no entries yet.
    pub fn open(&self, scope: &str) {
        debug!(scope, root = %self.root.display(), "using filesystem cache storage");
    }

    // == Close ==
    /// Releases per-scope state. The store keeps none, so this is a no-op.
    pub fn close(&self, _scope: &str) {}

    // == Get ==
    /// Looks up the cached response for `request` under `scope`.
    ///
    /// Returns `Ok(None)` when the entry is absent or expired; neither is an
    /// error and neither has side effects on disk. Returns
    /// [`CacheError::CorruptEntry`] when the metadata is present and fresh
    /// but a payload artifact cannot be read back.
    pub fn get(&mut self, scope: &str, request: &CacheRequest) -> Result<Option<CacheResponse>> {
        Ok(self.get_entry(scope, request)?.map(CacheEntry::into_response))
    }

    /// Like [`get`](Self::get) but returns the full stored entry, including
    /// the original request artifacts.
    pub fn get_entry(&mut self, scope: &str, request: &CacheRequest) -> Result<Option<CacheEntry>> {
        let key = self.keys.derive(request);
        let dir = self.entry_path(scope, &key);

        let metadata = match self.read_metadata(&dir)? {
            Some(metadata) => metadata,
            None => {
                self.stats.record_miss();
                return Ok(None);
            }
        };
        if metadata.is_expired((self.clock)(), self.expiration_secs) {
            self.stats.record_expired();
            return Ok(None);
        }

        let entry = CacheEntry {
            request_headers: self.read_artifact(&dir, REQUEST_HEADERS)?,
            request_body: self.read_artifact(&dir, REQUEST_BODY)?,
            response_headers: self.read_artifact(&dir, RESPONSE_HEADERS)?,
            response_body: self.read_artifact(&dir, RESPONSE_BODY)?,
            metadata,
        };
        self.stats.record_hit();
        Ok(Some(entry))
    }

    // == Put ==
    /// Stores a completed request/response pair, replacing any prior entry
    /// for the same key.
    ///
    /// All artifacts are written into a temporary sibling directory which is
    /// then renamed into place in one step, so concurrent readers observe the
    /// entry either fully absent or fully present.
    ///
    /// Precondition: at most one writer per key per scope at a time. Callers
    /// that cannot guarantee this must coordinate externally.
    pub fn put(
        &mut self,
        scope: &str,
        request: &CacheRequest,
        response: &CacheResponse,
    ) -> Result<()> {
        let key = self.keys.derive(request);
        let shard = self.root.join(scope).join(shard_prefix(&key));
        let dir = shard.join(&key);

        fs::create_dir_all(&shard).map_err(|e| CacheError::write(&shard, e))?;

        let tmp = shard.join(format!(".{key}.tmp"));
        if tmp.exists() {
            // Leftover from an interrupted write; replace it wholesale.
            fs::remove_dir_all(&tmp).map_err(|e| CacheError::write(&tmp, e))?;
        }
        fs::create_dir(&tmp).map_err(|e| CacheError::write(&tmp, e))?;

        let entry = CacheEntry::assemble(request, response, (self.clock)());
        if let Err(err) = self.write_artifacts(&tmp, &entry) {
            let _ = fs::remove_dir_all(&tmp);
            return Err(err);
        }

        if dir.exists() {
            if let Err(e) = fs::remove_dir_all(&dir) {
                let _ = fs::remove_dir_all(&tmp);
                return Err(CacheError::write(&dir, e));
            }
        }
        if let Err(e) = fs::rename(&tmp, &dir) {
            let _ = fs::remove_dir_all(&tmp);
            return Err(CacheError::write(&dir, e));
        }

        debug!(
            scope,
            key = %key,
            url = %entry.metadata.url,
            method = %entry.metadata.method,
            status = entry.metadata.status,
            response_url = entry.metadata.response_url.as_deref().unwrap_or(""),
            created_at = %entry.metadata.created_at,
            "stored cache entry"
        );
        self.stats.record_store();
        Ok(())
    }

    // == Remove Expired ==
    /// Deletes every expired entry under `scope`, returning how many were
    /// removed.
    ///
    /// Out-of-band maintenance; the read path never deletes. Entries whose
    /// metadata cannot be read are left in place for `get` to report.
    pub fn remove_expired(&mut self, scope: &str) -> Result<usize> {
        let scope_dir = self.root.join(scope);
        let now = (self.clock)();
        let mut removed = 0;

        for shard in subdirectories(&scope_dir)? {
            for entry_dir in subdirectories(&shard)? {
                if is_hidden(&entry_dir) {
                    continue;
                }
                let metadata = match self.read_metadata(&entry_dir) {
                    Ok(Some(metadata)) => metadata,
                    _ => continue,
                };
                if metadata.is_expired(now, self.expiration_secs) {
                    fs::remove_dir_all(&entry_dir)
                        .map_err(|e| CacheError::write(&entry_dir, e))?;
                    removed += 1;
                }
            }
        }

        if removed > 0 {
            debug!(scope, removed, "swept expired cache entries");
        }
        Ok(removed)
    }

    // == Paths ==
    /// On-disk directory for the entry stored under `key` in `scope`:
    /// `<root>/<scope>/<key[0:2]>/<key>`.
    pub fn entry_path(&self, scope: &str, key: &str) -> PathBuf {
        self.root.join(scope).join(shard_prefix(key)).join(key)
    }

    /// Derives the cache key for `request` with this store's key deriver.
    pub fn derive_key(&self, request: &CacheRequest) -> String {
        self.keys.derive(request)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    // == Artifact I/O ==
    /// Reads and decodes the metadata artifact. An absent file is a miss
    /// (`Ok(None)`); a present file that cannot be decoded or parsed is a
    /// corrupt entry.
    fn read_metadata(&self, dir: &Path) -> Result<Option<EntryMetadata>> {
        let path = dir.join(METADATA);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(CacheError::corrupt(&path, err.to_string())),
        };
        let decoded = self
            .transform
            .decode(&raw)
            .map_err(|e| CacheError::corrupt(&path, e.to_string()))?;
        let metadata = serde_json::from_slice(&decoded)
            .map_err(|e| CacheError::corrupt(&path, e.to_string()))?;
        Ok(Some(metadata))
    }

    /// Reads a payload artifact that a fresh metadata record says must exist.
    fn read_artifact(&self, dir: &Path, name: &str) -> Result<Vec<u8>> {
        let path = dir.join(name);
        let raw = fs::read(&path).map_err(|e| CacheError::corrupt(&path, e.to_string()))?;
        self.transform
            .decode(&raw)
            .map_err(|e| CacheError::corrupt(&path, e.to_string()))
    }

    fn write_artifacts(&self, dir: &Path, entry: &CacheEntry) -> Result<()> {
        let metadata = serde_json::to_vec(&entry.metadata).map_err(|e| {
            CacheError::write(dir.join(METADATA), io::Error::new(ErrorKind::InvalidData, e))
        })?;
        self.write_artifact(dir, METADATA, &metadata)?;
        self.write_artifact(dir, RESPONSE_HEADERS, &entry.response_headers)?;
        self.write_artifact(dir, RESPONSE_BODY, &entry.response_body)?;
        self.write_artifact(dir, REQUEST_HEADERS, &entry.request_headers)?;
        self.write_artifact(dir, REQUEST_BODY, &entry.request_body)?;
        Ok(())
    }

    fn write_artifact(&self, dir: &Path, name: &str, bytes: &[u8]) -> Result<()> {
        let path = dir.join(name);
        let encoded = self
            .transform
            .encode(bytes)
            .map_err(|e| CacheError::write(&path, e))?;
        fs::write(&path, encoded).map_err(|e| CacheError::write(&path, e))
    }
}

/// Lists subdirectories of `dir`. A missing directory yields an empty list.
fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(CacheError::write(dir, err)),
    };
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CacheError::write(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

/// In-progress temporary directories are dot-prefixed and skipped by sweeps.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
