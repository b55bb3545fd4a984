//! In-memory snapshot caching
//!
//! Keeps the last fetched chain for each (ticker, expiry) so repeated
//! selections within the validity window skip the provider. Validity is
//! checked on every access; nothing expires in the background.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::provider::ChainProvider;
use crate::core::{DashboardError, DashboardResult, OptionsSnapshot};

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum age before refetch (in hours)
    pub max_age_hours: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_hours: 2,
            enabled: true,
        }
    }
}

impl CacheConfig {
    /// Validity window, saturating at `Duration::MAX` for out-of-range hours
    pub fn max_age(&self) -> Duration {
        Duration::try_hours(self.max_age_hours).unwrap_or(Duration::MAX)
    }
}

/// Stored snapshot and when it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub snapshot: Arc<OptionsSnapshot>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Valid while `now - fetched_at < max_age`
    pub fn is_valid(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.fetched_at < max_age
    }
}

type CacheKey = (String, NaiveDate);

/// Snapshot cache owned by a dashboard session
#[derive(Debug, Default)]
pub struct SnapshotCache {
    config: CacheConfig,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl SnapshotCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn key(ticker: &str, expiry: NaiveDate) -> CacheKey {
        (ticker.to_string(), expiry)
    }

    /// Get a snapshot (from cache or fetch)
    pub fn get_snapshot<P: ChainProvider>(
        &mut self,
        provider: &P,
        ticker: &str,
        expiry: NaiveDate,
    ) -> DashboardResult<Arc<OptionsSnapshot>> {
        self.get_snapshot_at(provider, ticker, expiry, Utc::now())
    }

    /// Same as [`get_snapshot`](Self::get_snapshot) with an explicit clock reading
    pub fn get_snapshot_at<P: ChainProvider>(
        &mut self,
        provider: &P,
        ticker: &str,
        expiry: NaiveDate,
        now: DateTime<Utc>,
    ) -> DashboardResult<Arc<OptionsSnapshot>> {
        if let Some(entry) = self.valid_entry(ticker, expiry, now) {
            tracing::debug!(ticker, %expiry, fetched_at = %entry.fetched_at, "snapshot cache hit");
            return Ok(Arc::clone(&entry.snapshot));
        }

        tracing::info!(ticker, %expiry, "Fetching options data");
        let snapshot = match provider.option_chain(ticker, expiry) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                tracing::warn!(ticker, %expiry, error = %e, "option chain fetch failed");
                return Err(DashboardError::fetch(ticker, expiry, e));
            }
        };

        if self.config.enabled {
            self.entries.insert(
                Self::key(ticker, expiry),
                CacheEntry {
                    snapshot: Arc::clone(&snapshot),
                    fetched_at: now,
                },
            );
            tracing::info!(
                ticker,
                %expiry,
                calls = snapshot.calls.len(),
                puts = snapshot.puts.len(),
                "Cached snapshot"
            );
        }

        Ok(snapshot)
    }

    fn valid_entry(&self, ticker: &str, expiry: NaiveDate, now: DateTime<Utc>) -> Option<&CacheEntry> {
        if !self.config.enabled {
            return None;
        }
        self.entries
            .get(&Self::key(ticker, expiry))
            .filter(|entry| entry.is_valid(now, self.config.max_age()))
    }

    /// Check if a cached entry exists and has not expired
    pub fn is_valid(&self, ticker: &str, expiry: NaiveDate, now: DateTime<Utc>) -> bool {
        self.valid_entry(ticker, expiry, now).is_some()
    }

    /// When the stored snapshot for a key was fetched
    pub fn fetched_at(&self, ticker: &str, expiry: NaiveDate) -> Option<DateTime<Utc>> {
        self.entries
            .get(&Self::key(ticker, expiry))
            .map(|entry| entry.fetched_at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all cache
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionRecord, OptionTable};
    use chrono::TimeZone;
    use std::cell::Cell;

    /// Counts chain fetches and fails on demand
    struct CountingProvider {
        calls: Cell<usize>,
        fail: Cell<bool>,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
                fail: Cell::new(false),
            }
        }
    }

    impl ChainProvider for CountingProvider {
        fn expirations(&self, _ticker: &str) -> DashboardResult<Vec<NaiveDate>> {
            Ok(vec![expiry()])
        }

        fn option_chain(&self, ticker: &str, expiry: NaiveDate) -> DashboardResult<OptionsSnapshot> {
            self.calls.set(self.calls.get() + 1);
            if self.fail.get() {
                return Err(DashboardError::network("connection reset"));
            }
            let strike = 100.0 + self.calls.get() as f64;
            Ok(OptionsSnapshot::new(
                ticker,
                expiry,
                OptionTable::from_rows(vec![OptionRecord::new(strike)]),
                OptionTable::from_rows(vec![]),
            ))
        }
    }

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_second_call_within_window_hits_cache() {
        let provider = CountingProvider::new();
        let mut cache = SnapshotCache::new(CacheConfig::default());

        let first = cache.get_snapshot_at(&provider, "SPY", expiry(), t0()).unwrap();
        let second = cache
            .get_snapshot_at(&provider, "SPY", expiry(), t0() + Duration::minutes(119))
            .unwrap();

        assert_eq!(provider.calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.fetched_at("SPY", expiry()), Some(t0()));
    }

    #[test]
    fn test_refetch_after_window_replaces_entry() {
        let provider = CountingProvider::new();
        let mut cache = SnapshotCache::new(CacheConfig::default());

        cache.get_snapshot_at(&provider, "SPY", expiry(), t0()).unwrap();

        // exactly two hours old is no longer valid
        let later = t0() + Duration::hours(2);
        let refreshed = cache.get_snapshot_at(&provider, "SPY", expiry(), later).unwrap();

        assert_eq!(provider.calls.get(), 2);
        assert_eq!(refreshed.calls.rows[0].strike, Some(102.0));
        assert_eq!(cache.fetched_at("SPY", expiry()), Some(later));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let provider = CountingProvider::new();
        let mut cache = SnapshotCache::new(CacheConfig::default());
        let other_expiry = NaiveDate::from_ymd_opt(2024, 7, 19).unwrap();

        cache.get_snapshot_at(&provider, "SPY", expiry(), t0()).unwrap();
        cache.get_snapshot_at(&provider, "SPY", other_expiry, t0()).unwrap();
        cache.get_snapshot_at(&provider, "AAPL", expiry(), t0()).unwrap();

        assert_eq!(provider.calls.get(), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_fetch_error_does_not_serve_stale_data() {
        let provider = CountingProvider::new();
        let mut cache = SnapshotCache::new(CacheConfig::default());

        cache.get_snapshot_at(&provider, "SPY", expiry(), t0()).unwrap();
        provider.fail.set(true);

        let err = cache
            .get_snapshot_at(&provider, "SPY", expiry(), t0() + Duration::hours(3))
            .unwrap_err();

        assert!(err.is_fetch());
        assert_eq!(provider.calls.get(), 2);
        // old entry is untouched, still expired
        assert_eq!(cache.fetched_at("SPY", expiry()), Some(t0()));
        assert!(!cache.is_valid("SPY", expiry(), t0() + Duration::hours(3)));
    }

    #[test]
    fn test_disabled_cache_always_fetches() {
        let provider = CountingProvider::new();
        let mut cache = SnapshotCache::new(CacheConfig {
            enabled: false,
            ..Default::default()
        });

        cache.get_snapshot_at(&provider, "SPY", expiry(), t0()).unwrap();
        cache.get_snapshot_at(&provider, "SPY", expiry(), t0()).unwrap();

        assert_eq!(provider.calls.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let provider = CountingProvider::new();
        let mut cache = SnapshotCache::new(CacheConfig::default());

        cache.get_snapshot_at(&provider, "SPY", expiry(), t0()).unwrap();
        cache.clear();
        assert!(cache.is_empty());

        cache.get_snapshot_at(&provider, "SPY", expiry(), t0()).unwrap();
        assert_eq!(provider.calls.get(), 2);
    }

    #[test]
    fn test_max_age_saturates_for_huge_hours() {
        let config = CacheConfig {
            max_age_hours: i64::MAX,
            ..Default::default()
        };
        assert_eq!(config.max_age(), Duration::MAX);
        assert_eq!(CacheConfig::default().max_age(), Duration::hours(2));

        let provider = CountingProvider::new();
        let mut cache = SnapshotCache::new(config);
        cache.get_snapshot_at(&provider, "SPY", expiry(), t0()).unwrap();
        assert!(cache.is_valid("SPY", expiry(), t0() + Duration::days(3650)));
    }
}
