//! Yahoo Finance data fetcher
//!
//! Fetches options chains for the supported tickers from Yahoo Finance's
//! unofficial options API.
//!
//! Note: Yahoo Finance data is delayed ~15 minutes and intended for
//! personal use.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

use super::provider::ChainProvider;
use crate::config::ProviderConfig;
use crate::core::{DashboardError, DashboardResult, OptionRecord, OptionTable, OptionsSnapshot};

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    /// Client with the default provider settings
    pub fn new() -> DashboardResult<Self> {
        Self::with_config(&ProviderConfig::default())
    }

    pub fn with_config(config: &ProviderConfig) -> DashboardResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| DashboardError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fetch_options(&self, url: &str) -> DashboardResult<YahooOptionChainData> {
        let response: YahooOptionsResponse = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| DashboardError::network(e.to_string()))?
            .json()
            .map_err(|e| DashboardError::data(format!("Failed to parse options: {}", e)))?;

        if let Some(error) = response.option_chain.error {
            return Err(DashboardError::data(format!("Provider error: {}", error)));
        }

        response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::data("No options data returned"))
    }

    /// Get available option expiration dates
    pub fn get_expirations(&self, ticker: &str) -> DashboardResult<Vec<NaiveDate>> {
        let url = format!("{}/options/{}", self.base_url, ticker);
        let chain = self.fetch_options(&url)?;

        let expiries: Vec<NaiveDate> = chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect();

        tracing::debug!(ticker, count = expiries.len(), "Fetched expirations");
        Ok(expiries)
    }

    /// Get option chain for a specific expiration
    pub fn get_option_chain(&self, ticker: &str, expiry: NaiveDate) -> DashboardResult<OptionsSnapshot> {
        // Yahoo keys expiries by midnight UTC
        let expiry_ts = expiry.and_time(NaiveTime::MIN).and_utc().timestamp();
        let url = format!("{}/options/{}?date={}", self.base_url, ticker, expiry_ts);

        let chain_data = self.fetch_options(&url)?;
        let options = chain_data
            .options
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::data(format!("No chain for expiry {}", expiry)))?;

        let calls = OptionTable::from_rows(options.calls.into_iter().map(convert_option).collect());
        let puts = OptionTable::from_rows(options.puts.into_iter().map(convert_option).collect());

        Ok(OptionsSnapshot::new(ticker, expiry, calls, puts))
    }
}

impl ChainProvider for YahooClient {
    fn expirations(&self, ticker: &str) -> DashboardResult<Vec<NaiveDate>> {
        self.get_expirations(ticker)
    }

    fn option_chain(&self, ticker: &str, expiry: NaiveDate) -> DashboardResult<OptionsSnapshot> {
        self.get_option_chain(ticker, expiry)
    }
}

/// Convert Yahoo option data to our record format
fn convert_option(data: YahooOptionData) -> OptionRecord {
    OptionRecord {
        contract_symbol: data.contract_symbol,
        strike: data.strike,
        last_price: data.last_price,
        volume: data.volume.and_then(to_count),
        open_interest: data.open_interest.and_then(to_count),
        implied_volatility: data.implied_volatility,
        delta: data.delta,
        theta: data.theta,
        gamma: data.gamma,
        vega: data.vega,
    }
}

/// Counts arrive as JSON numbers, sometimes with a fractional part
fn to_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.round() as u64)
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    #[serde(default)]
    result: Vec<YahooOptionChainData>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    volume: Option<f64>,
    #[serde(rename = "openInterest")]
    open_interest: Option<f64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
    // Greeks (may not always be present)
    delta: Option<f64>,
    theta: Option<f64>,
    gamma: Option<f64>,
    vega: Option<f64>,
}
