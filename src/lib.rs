//! # Options Dashboard
//!
//! Options chain dashboard for the MAG7 tickers plus SPY, backed by Yahoo
//! Finance.
//!
//! ## Overview
//!
//! A selection (ticker, expiry, sort choices) flows through:
//! - **Snapshot cache**: serves a chain fetched less than two hours ago,
//!   otherwise refetches from the provider
//! - **Summary**: open interest and volume totals for calls and puts
//! - **Table formatter**: projects the known columns, renames them, sorts
//!   stably and formats every cell for display
//!
//! ## Usage
//!
//! ```rust,no_run
//! use options_dashboard::prelude::*;
//!
//! let config = DashboardConfig::load().unwrap();
//! let client = YahooClient::with_config(&config.provider).unwrap();
//! let mut session = DashboardSession::new(client, &config);
//!
//! let expiries = session.expirations("SPY").unwrap();
//! let view = session.view(&ViewRequest::new("SPY", expiries[0])).unwrap();
//!
//! println!("Calls OI: {}", view.summary.calls_oi_display());
//! for row in &view.calls.rows {
//!     println!("{}", row.join(" | "));
//! }
//! ```

pub mod config;
pub mod core;
pub mod data;
pub mod session;
pub mod table;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::config::{DashboardConfig, ProviderConfig};

    // Core types
    pub use crate::core::{
        validate_ticker, Column, ColumnSet, DashboardError, DashboardResult, OptionRecord,
        OptionSide, OptionTable, OptionsSnapshot, TICKERS,
    };

    // Data fetching
    pub use crate::data::{CacheConfig, CacheEntry, ChainProvider, SnapshotCache, YahooClient};

    // Tables
    pub use crate::table::{
        format_table, format_table_by_name, sort_options, summarize, ChainSummary, DisplayTable,
        SortOrder, TableSort,
    };

    pub use crate::session::{DashboardSession, DashboardView, ViewRequest};
}

// Re-export main types at crate root
pub use crate::core::{DashboardError, DashboardResult};
pub use crate::session::{DashboardSession, DashboardView};

/// Install the `tracing` subscriber used by the binaries.
///
/// Honours `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
