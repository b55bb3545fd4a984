//! Option contract records
//!
//! One row of a calls or puts table as delivered by the provider. Every field
//! is optional; the provider omits values it does not have.

use serde::{Deserialize, Serialize};

use super::column::Column;

/// Side of the chain (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    pub fn label(&self) -> &'static str {
        match self {
            OptionSide::Call => "Calls",
            OptionSide::Put => "Puts",
        }
    }
}

/// A single option contract row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    /// Contract symbol (exchange-specific)
    pub contract_symbol: Option<String>,
    /// Strike price
    pub strike: Option<f64>,
    /// Last traded price
    pub last_price: Option<f64>,
    /// Trading volume
    pub volume: Option<u64>,
    /// Open interest
    pub open_interest: Option<u64>,
    /// Implied volatility as a fraction (0.25 = 25%)
    pub implied_volatility: Option<f64>,
    pub delta: Option<f64>,
    pub theta: Option<f64>,
    pub gamma: Option<f64>,
    pub vega: Option<f64>,
}

impl OptionRecord {
    pub fn new(strike: f64) -> Self {
        Self {
            strike: Some(strike),
            ..Default::default()
        }
    }

    pub fn with_last_price(mut self, price: f64) -> Self {
        self.last_price = Some(price);
        self
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_open_interest(mut self, open_interest: u64) -> Self {
        self.open_interest = Some(open_interest);
        self
    }

    pub fn with_implied_volatility(mut self, iv: f64) -> Self {
        self.implied_volatility = Some(iv);
        self
    }

    pub fn with_greeks(mut self, delta: f64, theta: f64, gamma: f64, vega: f64) -> Self {
        self.delta = Some(delta);
        self.theta = Some(theta);
        self.gamma = Some(gamma);
        self.vega = Some(vega);
        self
    }

    /// Numeric value of a column, used for sorting
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Strike => self.strike,
            Column::Premium => self.last_price,
            Column::Volume => self.volume.map(|v| v as f64),
            Column::OpenInterest => self.open_interest.map(|oi| oi as f64),
            Column::ImpliedVolatility => self.implied_volatility,
            Column::Delta => self.delta,
            Column::Theta => self.theta,
            Column::Gamma => self.gamma,
            Column::Vega => self.vega,
        }
    }
}
