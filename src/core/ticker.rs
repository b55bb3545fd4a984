//! Supported tickers

use super::error::{DashboardError, DashboardResult};

/// The MAG7 names plus SPY, in selector order
pub const TICKERS: [&str; 8] = ["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "SPY"];

/// Normalise a ticker and check it against the allow-list
pub fn validate_ticker(ticker: &str) -> DashboardResult<&'static str> {
    let wanted = ticker.trim().to_uppercase();
    TICKERS
        .iter()
        .find(|t| **t == wanted)
        .copied()
        .ok_or_else(|| DashboardError::InvalidTicker(ticker.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ticker() {
        assert_eq!(validate_ticker("spy").unwrap(), "SPY");
        assert_eq!(validate_ticker(" NVDA ").unwrap(), "NVDA");
        assert!(matches!(validate_ticker("QQQ"), Err(DashboardError::InvalidTicker(_))));
    }
}
