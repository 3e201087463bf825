//! Per-kind response cache scoped to one calendar day

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[cfg(unix)]
use std::os::unix::fs::{MetadataExt, PermissionsExt};

use crate::cache::{CacheEntryStatus, CacheKind};
use crate::error::{DaywallError, Result};
use crate::solar::DayWindow;

/// One persisted provider response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub kind: CacheKind,
    /// Unix timestamp of the fetch
    pub fetched_at: i64,
    /// Raw response body
    pub payload: Value,
}

/// File-backed cache holding at most one entry per kind
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the cache files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for a kind
    pub fn path(&self, kind: CacheKind) -> PathBuf {
        self.dir.join(format!("{}_data.json", kind.as_str()))
    }

    /// Read the entry for a kind, if a well-formed one owned by this user exists
    pub fn find(&self, kind: CacheKind) -> Option<CacheEntry> {
        let file = self.path(kind);
        let data = match fs::read_to_string(&file) {
            Ok(data) => data,
            Err(_) => {
                debug!(%kind, path = %file.display(), "no cache file");
                return None;
            }
        };

        if !self.owned_by_user(&file) {
            debug!(%kind, path = %file.display(), "cache file is owned by another user");
            return None;
        }

        let entry: CacheEntry = match serde_json::from_str(&data) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(%kind, error = %e, "cache file is unreadable");
                return None;
            }
        };

        if entry.kind != kind {
            debug!(%kind, found = %entry.kind, "cache file holds the wrong kind");
            return None;
        }

        Some(entry)
    }

    /// Cached payload for a kind, only if it was fetched inside `window`
    pub fn load(&self, kind: CacheKind, window: &DayWindow) -> Option<Value> {
        let entry = self.find(kind)?;

        if !window.contains(entry.fetched_at) {
            debug!(
                %kind,
                fetched_at = entry.fetched_at,
                day_begin = window.begin,
                "cache entry is stale"
            );
            return None;
        }

        debug!(%kind, fetched_at = entry.fetched_at, "using cached data");
        Some(entry.payload)
    }

    /// Replace the entry for a kind with a payload fetched at `fetched_at`
    ///
    /// The file is written beside its final name and renamed into place, so
    /// concurrent readers see either the old or the new entry.
    pub fn store_at(&self, kind: CacheKind, payload: &Value, fetched_at: i64) -> Result<()> {
        self.ensure_dir()?;

        let entry = CacheEntry {
            kind,
            fetched_at,
            payload: payload.clone(),
        };
        let json = serde_json::to_string_pretty(&entry)?;

        let file = self.path(kind);
        let staging = self
            .dir
            .join(format!(".{}_data.{}.tmp", kind.as_str(), std::process::id()));
        fs::write(&staging, json)?;
        if let Err(e) = fs::rename(&staging, &file) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        debug!(%kind, fetched_at, path = %file.display(), "cached response");
        Ok(())
    }

    /// Delete the entry for a kind
    pub fn purge(&self, kind: CacheKind) -> Result<()> {
        let file = self.path(kind);
        match fs::remove_file(&file) {
            Ok(()) => {
                debug!(%kind, path = %file.display(), "purged cache");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Describe the entry for a kind relative to `window` and `now`
    pub fn status(&self, kind: CacheKind, window: &DayWindow, now: i64) -> CacheEntryStatus {
        let file = self.path(kind);
        if !file.exists() {
            return CacheEntryStatus {
                kind,
                exists: false,
                fetched_at: None,
                age_secs: None,
                fresh: false,
            };
        }

        match self.find(kind) {
            Some(entry) => CacheEntryStatus {
                kind,
                exists: true,
                fetched_at: Some(entry.fetched_at),
                age_secs: Some(now.saturating_sub(entry.fetched_at).max(0) as u64),
                fresh: window.contains(entry.fetched_at),
            },
            None => CacheEntryStatus {
                kind,
                exists: true,
                fetched_at: None,
                age_secs: None,
                fresh: false,
            },
        }
    }

    /// Create the directory, readable by the owner only
    ///
    /// A directory that already exists must belong to this user.
    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        #[cfg(unix)]
        {
            let owner = fs::metadata(&self.dir)?.uid();
            if current_uid().is_some_and(|uid| uid != owner) {
                return Err(DaywallError::Environment(format!(
                    "cache directory {} is owned by another user",
                    self.dir.display()
                )));
            }

            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.dir, perms)?;
        }

        Ok(())
    }

    /// Both the cache directory and `file` belong to the invoking user
    #[cfg(unix)]
    fn owned_by_user(&self, file: &Path) -> bool {
        let (Ok(dir), Ok(entry)) = (fs::metadata(&self.dir), fs::symlink_metadata(file)) else {
            return false;
        };
        let owner = current_uid().unwrap_or_else(|| dir.uid());

        dir.uid() == owner && entry.uid() == owner
    }

    #[cfg(not(unix))]
    fn owned_by_user(&self, _file: &Path) -> bool {
        true
    }
}

/// Uid of this process, read from procfs where available
#[cfg(unix)]
fn current_uid() -> Option<u32> {
    fs::metadata("/proc/self").ok().map(|meta| meta.uid())
}
