//! Upstream chain provider seam

use chrono::NaiveDate;

use crate::core::{DashboardResult, OptionsSnapshot};

/// Source of option chain data
pub trait ChainProvider {
    /// Expiry dates currently offered for a ticker
    fn expirations(&self, ticker: &str) -> DashboardResult<Vec<NaiveDate>>;

    /// Calls and puts for one ticker and expiry
    fn option_chain(&self, ticker: &str, expiry: NaiveDate) -> DashboardResult<OptionsSnapshot>;
}

impl<P: ChainProvider + ?Sized> ChainProvider for &P {
    fn expirations(&self, ticker: &str) -> DashboardResult<Vec<NaiveDate>> {
        (**self).expirations(ticker)
    }

    fn option_chain(&self, ticker: &str, expiry: NaiveDate) -> DashboardResult<OptionsSnapshot> {
        (**self).option_chain(ticker, expiry)
    }
}
