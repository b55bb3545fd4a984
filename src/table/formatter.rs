//! Chain table formatting
//!
//! Projection, renaming, sorting and formatting of one side of a chain:
//! 1. **Projection**: keep the known columns the dataset carries, in display order
//! 2. **Renaming**: provider names become display headers (see [`Column`])
//! 3. **Sorting**: stable sort on the numeric values of the chosen column
//! 4. **Formatting**: every cell becomes a display string

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::format;
use crate::core::{Column, DashboardError, DashboardResult, OptionRecord, OptionTable};

/// Sort direction as offered in the order selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    LowToHigh,
    HighToLow,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::LowToHigh, SortOrder::HighToLow];

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::LowToHigh)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::LowToHigh => "Low to High",
            SortOrder::HighToLow => "High to Low",
        }
    }

    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::LowToHigh
        } else {
            SortOrder::HighToLow
        }
    }
}

/// Sort selection for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSort {
    pub column: Column,
    pub order: SortOrder,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            column: Column::Strike,
            order: SortOrder::LowToHigh,
        }
    }
}

/// Display-ready table: headers plus string cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayTable {
    /// Projected columns in display order
    pub columns: Vec<Column>,
    /// Formatted rows, one cell per column
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.display_name()).collect()
    }

    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }

    /// Cell at a row for a column, if the column was projected
    pub fn cell(&self, row: usize, column: Column) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Columns a table can be sorted by, same projection as the output
pub fn sort_options(table: &OptionTable) -> Vec<Column> {
    table.columns.iter().collect()
}

/// Project, sort and format one side of a chain
pub fn format_table(
    table: &OptionTable,
    sort_column: Column,
    ascending: bool,
) -> DashboardResult<DisplayTable> {
    let columns = sort_options(table);
    if !columns.contains(&sort_column) {
        return Err(DashboardError::InvalidSortColumn(sort_column.display_name().to_string()));
    }

    let mut sorted: Vec<&OptionRecord> = table.rows.iter().collect();
    // sort_by is stable: equal keys keep provider order
    sorted.sort_by(|a, b| compare(a.value(sort_column), b.value(sort_column), ascending));

    let rows = sorted
        .into_iter()
        .map(|record| columns.iter().map(|&c| format::cell(record, c)).collect())
        .collect();

    Ok(DisplayTable { columns, rows })
}

/// Like [`format_table`] with the sort column given by its display header
pub fn format_table_by_name(
    table: &OptionTable,
    sort_column: &str,
    ascending: bool,
) -> DashboardResult<DisplayTable> {
    format_table(table, Column::from_display_name(sort_column)?, ascending)
}

/// Missing values sort last in either direction
fn compare(a: Option<f64>, b: Option<f64>, ascending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.total_cmp(&y);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnSet;

    fn record(symbol: &str, strike: f64, volume: Option<u64>) -> OptionRecord {
        OptionRecord {
            contract_symbol: Some(symbol.to_string()),
            strike: Some(strike),
            last_price: Some(1.0),
            volume,
            open_interest: Some(10),
            implied_volatility: Some(0.2),
            ..Default::default()
        }
    }

    fn strikes(table: &DisplayTable) -> Vec<&str> {
        (0..table.len()).map(|i| table.cell(i, Column::Strike).unwrap()).collect()
    }

    #[test]
    fn test_end_to_end_row() {
        let table = OptionTable::from_rows(vec![OptionRecord::new(500.0)
            .with_last_price(2.345)
            .with_open_interest(100)
            .with_implied_volatility(0.25)]);

        let display = format_table(&table, Column::Strike, true).unwrap();

        assert_eq!(display.headers(), vec!["Strike", "Premium", "Volume", "OI", "IV"]);
        assert_eq!(display.rows[0], vec!["500", "$2.35", "0", "100", "25.0%"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let table = OptionTable::from_rows(vec![
            record("a", 100.0, Some(5)),
            record("b", 105.0, Some(1)),
            record("c", 110.0, Some(5)),
            record("d", 115.0, Some(1)),
        ]);

        let asc = format_table(&table, Column::Volume, true).unwrap();
        assert_eq!(strikes(&asc), vec!["105", "115", "100", "110"]);

        let desc = format_table(&table, Column::Volume, false).unwrap();
        assert_eq!(strikes(&desc), vec!["100", "110", "105", "115"]);
    }

    #[test]
    fn test_descending_reverses_distinct_keys() {
        let table = OptionTable::from_rows(vec![
            record("a", 110.0, Some(3)),
            record("b", 100.0, Some(9)),
            record("c", 105.0, Some(1)),
        ]);

        let asc = format_table(&table, Column::Strike, true).unwrap();
        let desc = format_table(&table, Column::Strike, false).unwrap();

        let mut reversed = asc.rows.clone();
        reversed.reverse();
        assert_eq!(desc.rows, reversed);
        assert_eq!(strikes(&asc), vec!["100", "105", "110"]);
    }

    #[test]
    fn test_sorts_on_numeric_values_not_strings() {
        let table = OptionTable::from_rows(vec![
            record("a", 1.0, Some(1_000)),
            record("b", 2.0, Some(90)),
        ]);

        let asc = format_table(&table, Column::Volume, true).unwrap();
        assert_eq!(asc.cell(0, Column::Volume), Some("90"));
        assert_eq!(asc.cell(1, Column::Volume), Some("1,000"));
    }

    #[test]
    fn test_missing_values_sort_last() {
        let table = OptionTable::from_rows(vec![
            record("a", 100.0, None),
            record("b", 105.0, Some(2)),
            record("c", 110.0, Some(7)),
        ]);

        let asc = format_table(&table, Column::Volume, true).unwrap();
        assert_eq!(strikes(&asc), vec!["105", "110", "100"]);

        let desc = format_table(&table, Column::Volume, false).unwrap();
        assert_eq!(strikes(&desc), vec!["110", "105", "100"]);
    }

    #[test]
    fn test_absent_greeks_are_omitted() {
        let table = OptionTable::from_rows(vec![record("a", 100.0, Some(1))]);
        let display = format_table(&table, Column::Strike, true).unwrap();

        assert_eq!(display.columns, Column::BASE.to_vec());
        assert!(display.column_index(Column::Delta).is_none());
        assert!(display.rows[0].iter().all(|cell| cell != "N/A"));
    }

    #[test]
    fn test_present_greeks_are_formatted() {
        let mut with_greeks = record("a", 100.0, Some(1)).with_greeks(0.51234, -0.0213, 0.00871, 0.1);
        with_greeks.vega = None;
        let table = OptionTable {
            columns: ColumnSet::all(),
            rows: vec![with_greeks],
        };

        let display = format_table(&table, Column::Delta, false).unwrap();
        assert_eq!(display.headers().len(), 9);
        assert_eq!(display.cell(0, Column::Delta), Some("0.5123"));
        assert_eq!(display.cell(0, Column::Theta), Some("-0.0213"));
        assert_eq!(display.cell(0, Column::Gamma), Some("0.0087"));
        assert_eq!(display.cell(0, Column::Vega), Some("N/A"));
    }

    #[test]
    fn test_invalid_sort_column() {
        let table = OptionTable::from_rows(vec![record("a", 100.0, Some(1))]);

        let err = format_table(&table, Column::Gamma, true).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSortColumn(ref c) if c == "Gamma"));

        let err = format_table_by_name(&table, "Bid", true).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSortColumn(_)));

        let ok = format_table_by_name(&table, "OI", false).unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn test_empty_table() {
        let table = OptionTable::new(ColumnSet::base());
        let display = format_table(&table, Column::Strike, true).unwrap();
        assert!(display.is_empty());
        assert_eq!(display.columns.len(), 5);
    }

    #[test]
    fn test_sort_order_labels() {
        assert!(SortOrder::LowToHigh.is_ascending());
        assert_eq!(SortOrder::from_ascending(false), SortOrder::HighToLow);
        assert_eq!(SortOrder::HighToLow.label(), "High to Low");
    }
}
