//! Cache module for reducing API calls
//!
//! Geolocation and sun data are fetched at most once per calendar day and
//! kept on disk between invocations.

mod store;

pub use store::{CacheEntry, CacheStore};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Category of cached data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    Geo,
    Sun,
}

impl CacheKind {
    pub const ALL: [CacheKind; 2] = [CacheKind::Geo, CacheKind::Sun];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Geo => "geo",
            Self::Sun => "sun",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clear all cached data
pub fn clear_all(store: &CacheStore) -> Result<()> {
    for kind in CacheKind::ALL {
        store.purge(kind)?;
    }
    Ok(())
}

/// Status of a single cache entry
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntryStatus {
    pub kind: CacheKind,
    pub exists: bool,
    pub fetched_at: Option<i64>,
    pub age_secs: Option<u64>,
    /// Fetched during the current local day
    pub fresh: bool,
}
