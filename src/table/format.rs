//! Display formatting for numeric cells
//!
//! Rounding is half away from zero on the shortest decimal representation of
//! the value, so `1.005` renders as `$1.01` even though the nearest `f64` is
//! slightly below it.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{Column, OptionRecord};

pub const NOT_AVAILABLE: &str = "N/A";

fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

/// Round half away from zero and render with exactly `dp` decimals
pub fn round_fixed(value: f64, dp: u32) -> String {
    match to_decimal(value) {
        Some(d) => render_decimal(d, dp),
        None => format!("{:.*}", dp as usize, value),
    }
}

fn render_decimal(d: Decimal, dp: u32) -> String {
    let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Insert thousands separators into an integer
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Strike as its shortest decimal form (500, 502.5)
pub fn strike(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// `$` plus two decimals
pub fn premium(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("${}", round_fixed(v, 2)))
}

/// Thousands-separated count, missing counts render as zero
pub fn count(value: Option<u64>) -> String {
    thousands(value.unwrap_or(0))
}

/// Fraction as percent with one decimal
pub fn percent(value: Option<f64>) -> String {
    let Some(v) = value else {
        return NOT_AVAILABLE.to_string();
    };
    match to_decimal(v).and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED)) {
        Some(pct) => format!("{}%", render_decimal(pct, 1)),
        None => format!("{:.1}%", v * 100.0),
    }
}

/// Greek with four decimals
pub fn greek(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| round_fixed(v, 4))
}

/// Render one cell of a record
pub fn cell(record: &OptionRecord, column: Column) -> String {
    match column {
        Column::Strike => strike(record.strike),
        Column::Premium => premium(record.last_price),
        Column::Volume => count(record.volume),
        Column::OpenInterest => count(record.open_interest),
        Column::ImpliedVolatility => percent(record.implied_volatility),
        Column::Delta | Column::Theta | Column::Gamma | Column::Vega => greek(record.value(column)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_rounds_half_up() {
        assert_eq!(premium(Some(1.005)), "$1.01");
        assert_eq!(premium(Some(2.345)), "$2.35");
        assert_eq!(premium(Some(3.0)), "$3.00");
        assert_eq!(premium(Some(0.004)), "$0.00");
        assert_eq!(premium(None), "N/A");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(Some(0.1234)), "12.3%");
        assert_eq!(percent(Some(0.25)), "25.0%");
        assert_eq!(percent(Some(1.0)), "100.0%");
        assert_eq!(percent(Some(0.12345)), "12.3%");
        assert_eq!(percent(Some(0.12355)), "12.4%");
        assert_eq!(percent(None), "N/A");
    }

    #[test]
    fn test_counts() {
        assert_eq!(count(Some(1_234_567)), "1,234,567");
        assert_eq!(count(Some(100)), "100");
        assert_eq!(count(Some(1000)), "1,000");
        assert_eq!(count(Some(0)), "0");
        assert_eq!(count(None), "0");
    }

    #[test]
    fn test_greeks_and_strike() {
        assert_eq!(greek(Some(0.51234)), "0.5123");
        assert_eq!(greek(Some(-0.03125)), "-0.0313");
        assert_eq!(greek(Some(1.0)), "1.0000");
        assert_eq!(greek(None), "N/A");

        assert_eq!(strike(Some(500.0)), "500");
        assert_eq!(strike(Some(502.5)), "502.5");
    }

    #[test]
    fn test_non_finite_values_still_render() {
        assert_eq!(round_fixed(f64::INFINITY, 2), "inf");
    }

    #[test]
    fn test_percent_beyond_decimal_range_falls_back() {
        // 1e27 fits a Decimal but 1e29 does not
        let rendered = percent(Some(1e27));
        assert!(rendered.ends_with(".0%"));
        assert!(rendered.len() > 29);
        assert_eq!(percent(Some(f64::NAN)), "NaN%");
    }
}
