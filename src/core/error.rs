//! Error types for the options dashboard

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// Provider call failed while resolving a snapshot. The request halts here.
    #[error("Error fetching data for {ticker} {expiry}: {source}")]
    Fetch {
        ticker: String,
        expiry: NaiveDate,
        #[source]
        source: Box<DashboardError>,
    },

    #[error("Invalid sort column: {0}")]
    InvalidSortColumn(String),

    #[error("Unsupported ticker: {0}")]
    InvalidTicker(String),

    #[error("Expiry {expiry} is not offered for {ticker}")]
    InvalidExpiry { ticker: String, expiry: NaiveDate },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    pub fn fetch(ticker: impl Into<String>, expiry: NaiveDate, cause: DashboardError) -> Self {
        Self::Fetch {
            ticker: ticker.into(),
            expiry,
            source: Box::new(cause),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures that came from the upstream provider.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}
