//! Options chain snapshots
//!
//! The calls and puts tables for one (ticker, expiry) pair, as fetched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::column::{Column, ColumnSet};
use super::option::{OptionRecord, OptionSide};

/// One side of a chain: the rows plus the columns the provider supplied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionTable {
    /// Columns present in the provider's dataset
    pub columns: ColumnSet,
    /// Rows in provider order
    pub rows: Vec<OptionRecord>,
}

impl OptionTable {
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Table with the base columns plus any Greek populated on some row
    pub fn from_rows(rows: Vec<OptionRecord>) -> Self {
        let mut columns = ColumnSet::base();
        for greek in Column::GREEKS {
            if rows.iter().any(|r| r.value(greek).is_some()) {
                columns.insert(greek);
            }
        }
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Calls and puts for one ticker and expiry. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsSnapshot {
    /// Underlying symbol
    pub ticker: String,
    /// Expiry date
    pub expiry: NaiveDate,
    pub calls: OptionTable,
    pub puts: OptionTable,
}

impl OptionsSnapshot {
    pub fn new(ticker: impl Into<String>, expiry: NaiveDate, calls: OptionTable, puts: OptionTable) -> Self {
        Self {
            ticker: ticker.into(),
            expiry,
            calls,
            puts,
        }
    }

    pub fn table(&self, side: OptionSide) -> &OptionTable {
        match side {
            OptionSide::Call => &self.calls,
            OptionSide::Put => &self.puts,
        }
    }
}
