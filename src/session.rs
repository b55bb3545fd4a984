//! DashboardSession - request context for one user's selections
//!
//! Owns the snapshot cache and the provider, and runs a selection through
//! cache, summary and table formatting to produce everything a front end
//! needs to render.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::config::DashboardConfig;
use crate::core::{
    validate_ticker, Column, DashboardError, DashboardResult, OptionSide, OptionsSnapshot, TICKERS,
};
use crate::data::{ChainProvider, SnapshotCache};
use crate::table::{format_table, sort_options, summarize, ChainSummary, DisplayTable, TableSort};

/// One user selection
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRequest {
    pub ticker: String,
    pub expiry: NaiveDate,
    pub calls_sort: TableSort,
    pub puts_sort: TableSort,
}

impl ViewRequest {
    /// Request sorted by strike, low to high, on both sides
    pub fn new(ticker: impl Into<String>, expiry: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            expiry,
            calls_sort: TableSort::default(),
            puts_sort: TableSort::default(),
        }
    }

    pub fn with_calls_sort(mut self, sort: TableSort) -> Self {
        self.calls_sort = sort;
        self
    }

    pub fn with_puts_sort(mut self, sort: TableSort) -> Self {
        self.puts_sort = sort;
        self
    }
}

/// Everything the dashboard renders for a selection
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub snapshot: Arc<OptionsSnapshot>,
    pub fetched_at: DateTime<Utc>,
    pub summary: ChainSummary,
    pub calls: DisplayTable,
    pub puts: DisplayTable,
}

impl DashboardView {
    /// Build the view for a snapshot with the given sorts
    pub fn from_snapshot(
        snapshot: Arc<OptionsSnapshot>,
        fetched_at: DateTime<Utc>,
        calls_sort: TableSort,
        puts_sort: TableSort,
    ) -> DashboardResult<Self> {
        let summary = summarize(&snapshot.calls, &snapshot.puts);
        let calls = format_table(&snapshot.calls, calls_sort.column, calls_sort.order.is_ascending())?;
        let puts = format_table(&snapshot.puts, puts_sort.column, puts_sort.order.is_ascending())?;

        Ok(Self {
            snapshot,
            fetched_at,
            summary,
            calls,
            puts,
        })
    }

    /// Re-sort one side without touching the cache or provider
    pub fn resort(&mut self, side: OptionSide, sort: TableSort) -> DashboardResult<()> {
        let table = self.snapshot.table(side);
        let display = format_table(table, sort.column, sort.order.is_ascending())?;
        match side {
            OptionSide::Call => self.calls = display,
            OptionSide::Put => self.puts = display,
        }
        Ok(())
    }

    pub fn ticker(&self) -> &str {
        &self.snapshot.ticker
    }

    pub fn expiry(&self) -> NaiveDate {
        self.snapshot.expiry
    }

    /// Fetch time in local wall-clock form, e.g. `02:15:09 PM`
    pub fn last_pulled(&self) -> String {
        self.fetched_at
            .with_timezone(&Local)
            .format("%I:%M:%S %p")
            .to_string()
    }

    /// Columns available for sorting a side
    pub fn sort_options(&self, side: OptionSide) -> Vec<Column> {
        sort_options(self.snapshot.table(side))
    }
}

/// Session state for one dashboard user
pub struct DashboardSession<P: ChainProvider> {
    provider: P,
    cache: SnapshotCache,
}

impl<P: ChainProvider> DashboardSession<P> {
    pub fn new(provider: P, config: &DashboardConfig) -> Self {
        Self {
            provider,
            cache: SnapshotCache::new(config.cache.clone()),
        }
    }

    /// Supported tickers in selector order
    pub fn tickers(&self) -> &'static [&'static str] {
        &TICKERS
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Expiries currently offered for a ticker. Always asks the provider.
    pub fn expirations(&self, ticker: &str) -> DashboardResult<Vec<NaiveDate>> {
        let ticker = validate_ticker(ticker)?;
        self.provider.expirations(ticker)
    }

    /// Resolve a snapshot for a validated ticker and offered expiry
    pub fn snapshot(&mut self, ticker: &str, expiry: NaiveDate) -> DashboardResult<Arc<OptionsSnapshot>> {
        self.snapshot_at(ticker, expiry, Utc::now())
    }

    fn snapshot_at(
        &mut self,
        ticker: &str,
        expiry: NaiveDate,
        now: DateTime<Utc>,
    ) -> DashboardResult<Arc<OptionsSnapshot>> {
        let ticker = validate_ticker(ticker)?;
        let offered = self
            .provider
            .expirations(ticker)
            .map_err(|e| DashboardError::fetch(ticker, expiry, e))?;
        self.offered_snapshot_at(ticker, expiry, &offered, now)
    }

    fn offered_snapshot_at(
        &mut self,
        ticker: &'static str,
        expiry: NaiveDate,
        offered: &[NaiveDate],
        now: DateTime<Utc>,
    ) -> DashboardResult<Arc<OptionsSnapshot>> {
        if !offered.contains(&expiry) {
            let cause = DashboardError::InvalidExpiry {
                ticker: ticker.to_string(),
                expiry,
            };
            return Err(DashboardError::fetch(ticker, expiry, cause));
        }
        self.cache.get_snapshot_at(&self.provider, ticker, expiry, now)
    }

    /// Run a selection end to end
    pub fn view(&mut self, request: &ViewRequest) -> DashboardResult<DashboardView> {
        self.view_at(request, Utc::now())
    }

    /// Same as [`view`](Self::view) with an explicit clock reading
    pub fn view_at(&mut self, request: &ViewRequest, now: DateTime<Utc>) -> DashboardResult<DashboardView> {
        let snapshot = self.snapshot_at(&request.ticker, request.expiry, now)?;
        self.build_view(request, snapshot, now)
    }

    /// Run a selection against an expiry list the caller already fetched
    /// with [`expirations`](Self::expirations), without asking the provider again
    pub fn view_with_offered(
        &mut self,
        request: &ViewRequest,
        offered: &[NaiveDate],
    ) -> DashboardResult<DashboardView> {
        self.view_with_offered_at(request, offered, Utc::now())
    }

    pub fn view_with_offered_at(
        &mut self,
        request: &ViewRequest,
        offered: &[NaiveDate],
        now: DateTime<Utc>,
    ) -> DashboardResult<DashboardView> {
        let ticker = validate_ticker(&request.ticker)?;
        let snapshot = self.offered_snapshot_at(ticker, request.expiry, offered, now)?;
        self.build_view(request, snapshot, now)
    }

    fn build_view(
        &self,
        request: &ViewRequest,
        snapshot: Arc<OptionsSnapshot>,
        now: DateTime<Utc>,
    ) -> DashboardResult<DashboardView> {
        let fetched_at = self
            .cache
            .fetched_at(&snapshot.ticker, snapshot.expiry)
            .unwrap_or(now);

        DashboardView::from_snapshot(snapshot, fetched_at, request.calls_sort, request.puts_sort)
    }
}
