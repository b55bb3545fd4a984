//! Open interest and volume totals for the summary cards

use serde::{Deserialize, Serialize};

use super::format::thousands;
use crate::core::{OptionRecord, OptionTable};

/// Totals for calls and puts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSummary {
    pub calls_oi: u64,
    pub calls_volume: u64,
    pub puts_oi: u64,
    pub puts_volume: u64,
}

impl ChainSummary {
    pub fn calls_oi_display(&self) -> String {
        thousands(self.calls_oi)
    }

    pub fn calls_volume_display(&self) -> String {
        thousands(self.calls_volume)
    }

    pub fn puts_oi_display(&self) -> String {
        thousands(self.puts_oi)
    }

    pub fn puts_volume_display(&self) -> String {
        thousands(self.puts_volume)
    }
}

/// Sum open interest and volume per side, missing values count as zero
pub fn summarize(calls: &OptionTable, puts: &OptionTable) -> ChainSummary {
    ChainSummary {
        calls_oi: total(&calls.rows, |r| r.open_interest),
        calls_volume: total(&calls.rows, |r| r.volume),
        puts_oi: total(&puts.rows, |r| r.open_interest),
        puts_volume: total(&puts.rows, |r| r.volume),
    }
}

fn total(rows: &[OptionRecord], field: impl Fn(&OptionRecord) -> Option<u64>) -> u64 {
    rows.iter().filter_map(field).sum()
}
