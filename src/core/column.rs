//! Option chain columns
//!
//! The fixed set of provider columns the dashboard understands, in display
//! order, with their raw provider names and display names.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{DashboardError, DashboardResult};

/// A projected option chain column.
///
/// Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    Strike,
    Premium,
    Volume,
    OpenInterest,
    ImpliedVolatility,
    Delta,
    Theta,
    Gamma,
    Vega,
}

impl Column {
    /// All columns in display order
    pub const ALL: [Column; 9] = [
        Column::Strike,
        Column::Premium,
        Column::Volume,
        Column::OpenInterest,
        Column::ImpliedVolatility,
        Column::Delta,
        Column::Theta,
        Column::Gamma,
        Column::Vega,
    ];

    /// Columns every provider table carries
    pub const BASE: [Column; 5] = [
        Column::Strike,
        Column::Premium,
        Column::Volume,
        Column::OpenInterest,
        Column::ImpliedVolatility,
    ];

    /// Greek columns, present only when the provider supplies them
    pub const GREEKS: [Column; 4] = [Column::Delta, Column::Theta, Column::Gamma, Column::Vega];

    /// Field name used by the provider
    pub fn raw_name(&self) -> &'static str {
        match self {
            Column::Strike => "strike",
            Column::Premium => "lastPrice",
            Column::Volume => "volume",
            Column::OpenInterest => "openInterest",
            Column::ImpliedVolatility => "impliedVolatility",
            Column::Delta => "delta",
            Column::Theta => "theta",
            Column::Gamma => "gamma",
            Column::Vega => "vega",
        }
    }

    /// Header shown to the user
    pub fn display_name(&self) -> &'static str {
        match self {
            Column::Strike => "Strike",
            Column::Premium => "Premium",
            Column::Volume => "Volume",
            Column::OpenInterest => "OI",
            Column::ImpliedVolatility => "IV",
            Column::Delta => "Delta",
            Column::Theta => "Theta",
            Column::Gamma => "Gamma",
            Column::Vega => "Vega",
        }
    }

    /// Parse a sort selection by its display header
    pub fn from_display_name(name: &str) -> DashboardResult<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| DashboardError::InvalidSortColumn(name.to_string()))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Columns a provider table actually carries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet(BTreeSet<Column>);

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The five base columns
    pub fn base() -> Self {
        Column::BASE.into_iter().collect()
    }

    pub fn all() -> Self {
        Column::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, column: Column) {
        self.0.insert(column);
    }

    pub fn contains(&self, column: Column) -> bool {
        self.0.contains(&column)
    }

    /// Present columns in display order
    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Column::Premium.raw_name(), "lastPrice");
        assert_eq!(Column::OpenInterest.display_name(), "OI");
        assert_eq!(Column::ImpliedVolatility.raw_name(), "impliedVolatility");
        assert_eq!(Column::Vega.to_string(), "Vega");
    }

    #[test]
    fn test_from_display_name() {
        assert_eq!(Column::from_display_name("IV").unwrap(), Column::ImpliedVolatility);
        assert_eq!(Column::from_display_name("premium").unwrap(), Column::Premium);
        assert!(matches!(
            Column::from_display_name("Bid"),
            Err(DashboardError::InvalidSortColumn(name)) if name == "Bid"
        ));
    }

    #[test]
    fn test_column_set_keeps_display_order() {
        let set: ColumnSet = [Column::Vega, Column::Strike, Column::ImpliedVolatility]
            .into_iter()
            .collect();

        let order: Vec<Column> = set.iter().collect();
        assert_eq!(order, vec![Column::Strike, Column::ImpliedVolatility, Column::Vega]);
        assert!(!set.contains(Column::Delta));
        assert_eq!(ColumnSet::base().len(), 5);
    }
}
