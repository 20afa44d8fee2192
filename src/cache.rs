//! Indicator result cache
//!
//! A persisted record of previously computed scalar indicator values plus
//! one "last computed" date used for staleness. The serialized blob is
//! deserialized lazily, once per instance lifetime, into an explicit
//! two-state buffer. The cache date marks the OLDEST unrefreshed entry:
//! it is stamped when the first value lands after a reset and left alone
//! by later writes until the next reset.
//!
//! The record itself is single-threaded (`&mut` mutators). Two copies of
//! the same persisted record written back concurrently race with last
//! writer wins; known limitation, kept as-is.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::Result;

/// Staleness sentinel returned when no cache date is set.
pub const CACHE_AGE_UNBOUNDED: i64 = i64::MAX;

/// Splits the visible-key string on runs of `, ; : /` with surrounding
/// whitespace.
static KEY_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[,;:/]+\s*").unwrap());

/// In-memory image of the serialized values blob.
#[derive(Debug, Clone, Default)]
enum CacheBuffer {
    #[default]
    Unloaded,
    Loaded(BTreeMap<String, f64>),
}

/// Cached indicator values for one scope (typically one deployment).
///
/// Mutation goes through [`set_cached_value`](Self::set_cached_value) and
/// [`reset_cached_values`](Self::reset_cached_values) only; everything
/// else is a read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorCacheRecord {
    pub id: Uuid,
    /// Ordered, delimiter-separated indicator keys to show; the order is
    /// meaningful and drives display/aggregation order downstream.
    visible_keys: Option<String>,
    /// Stamp of the oldest unrefreshed cached entry. `None` means the
    /// cached map is absent regardless of blob content.
    cache_date: Option<NaiveDate>,
    /// Serialized key→value map (JSON object).
    values_blob: Option<String>,
    #[serde(skip)]
    buffer: CacheBuffer,
    #[serde(skip)]
    visible_list: Option<Vec<String>>,
}

impl IndicatorCacheRecord {
    pub fn new() -> Self {
        IndicatorCacheRecord {
            id: Uuid::new_v4(),
            visible_keys: None,
            cache_date: None,
            values_blob: None,
            buffer: CacheBuffer::Unloaded,
            visible_list: None,
        }
    }

    /// Deserialize the blob into the buffer if that has not happened yet,
    /// and hand out the loaded map. A `None` cache date forces an empty
    /// buffer whatever the blob says.
    fn loaded_map(&mut self) -> &mut BTreeMap<String, f64> {
        if matches!(self.buffer, CacheBuffer::Unloaded) {
            let map = if self.cache_date.is_none() {
                BTreeMap::new()
            } else {
                match self.values_blob.as_deref() {
                    None => BTreeMap::new(),
                    Some(blob) => match serde_json::from_str(blob) {
                        Ok(map) => map,
                        Err(e) => {
                            warn!(error = %e, "Unreadable indicator cache blob, starting empty");
                            BTreeMap::new()
                        }
                    },
                }
            };
            self.buffer = CacheBuffer::Loaded(map);
        }
        match &mut self.buffer {
            CacheBuffer::Loaded(map) => map,
            CacheBuffer::Unloaded => unreachable!("buffer was just loaded"),
        }
    }

    /// Immutable view of the cached key→value map.
    pub fn cached_values(&mut self) -> &BTreeMap<String, f64> {
        &*self.loaded_map()
    }

    /// One cached value, if present.
    pub fn cached_value(&mut self, key: &str) -> Option<f64> {
        self.cached_values().get(key).copied()
    }

    /// Upsert one value and re-serialize the whole buffer to the blob.
    ///
    /// Stamps the cache date with today ONLY when no date is set, so the
    /// date keeps marking the oldest unrefreshed entry rather than the
    /// most recent write.
    pub fn set_cached_value(&mut self, key: &str, value: f64) -> Result<()> {
        let map = self.loaded_map();
        map.insert(key.to_string(), value);
        let blob = serde_json::to_string(&*map)?;
        self.values_blob = Some(blob);
        if self.cache_date.is_none() {
            self.cache_date = Some(chrono::Utc::now().date_naive());
        }
        Ok(())
    }

    /// Days elapsed since the cache date, or [`CACHE_AGE_UNBOUNDED`] when
    /// no date is set.
    pub fn cache_age_days(&self, today: NaiveDate) -> i64 {
        match self.cache_date {
            Some(date) => (today - date).num_days(),
            None => CACHE_AGE_UNBOUNDED,
        }
    }

    pub fn cache_date(&self) -> Option<NaiveDate> {
        self.cache_date
    }

    /// Clear date, blob and buffer together; the three never go out of
    /// step with each other.
    pub fn reset_cached_values(&mut self) {
        self.cache_date = None;
        self.values_blob = None;
        self.buffer = CacheBuffer::Loaded(BTreeMap::new());
    }

    /// Reassign the backing visible-key string, dropping the parsed list.
    pub fn set_visible_keys(&mut self, keys: Option<String>) {
        self.visible_keys = keys;
        self.visible_list = None;
    }

    pub fn visible_keys_raw(&self) -> Option<&str> {
        self.visible_keys.as_deref()
    }

    /// Visible indicator keys in the exact order given in the backing
    /// string. Parsed on first use, then cached until the string is
    /// reassigned.
    pub fn visible_key_list(&mut self) -> &[String] {
        if self.visible_list.is_none() {
            let parsed = match self.visible_keys.as_deref() {
                None => Vec::new(),
                Some(raw) => KEY_SEPARATOR
                    .split(raw.trim())
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect(),
            };
            self.visible_list = Some(parsed);
        }
        self.visible_list.as_deref().unwrap_or(&[])
    }
}

impl Default for IndicatorCacheRecord {
    fn default() -> Self {
        Self::new()
    }
}
