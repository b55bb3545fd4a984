//! Dashboard configuration
//!
//! Loaded with layered precedence (highest wins):
//! 1. Environment variables prefixed with `OPTIONS_DASHBOARD_` (nested keys
//!    separated by `__`, e.g. `OPTIONS_DASHBOARD_CACHE__MAX_AGE_HOURS=4`)
//! 2. TOML file named by `OPTIONS_DASHBOARD_CONFIG_FILE` (if set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::{DashboardError, DashboardResult};
use crate::data::CacheConfig;

const ENV_PREFIX: &str = "OPTIONS_DASHBOARD_";
const CONFIG_FILE_ENV: &str = "OPTIONS_DASHBOARD_CONFIG_FILE";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Snapshot cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Upstream provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Yahoo Finance provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the options API
    /// Default: https://query1.finance.yahoo.com/v7/finance
    pub base_url: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    /// Default: 30
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DashboardConfig {
    /// Load from defaults, optional TOML file, and environment
    pub fn load() -> DashboardResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        Self::from_figment(figment)
    }

    /// Extract and validate from an already assembled figment
    pub fn from_figment(figment: Figment) -> DashboardResult<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| DashboardError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.cache.max_age_hours <= 0 {
            return Err(DashboardError::config(format!(
                "cache.max_age_hours must be positive, got {}",
                self.cache.max_age_hours
            )));
        }
        if chrono::Duration::try_hours(self.cache.max_age_hours).is_none() {
            return Err(DashboardError::config(format!(
                "cache.max_age_hours is out of range, got {}",
                self.cache.max_age_hours
            )));
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(DashboardError::config("provider.base_url must not be empty"));
        }
        if self.provider.timeout_secs == 0 {
            return Err(DashboardError::config("provider.timeout_secs must be positive"));
        }
        Ok(())
    }
}
