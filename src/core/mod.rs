//! Core data types for the options dashboard
//!
//! Defines fundamental types:
//! - Column: the fixed provider columns and their display names
//! - OptionRecord: one contract row with optional fields
//! - OptionsSnapshot: calls and puts for one ticker/expiry
//! - TICKERS: the supported symbols

pub mod column;
pub mod error;
pub mod option;
pub mod snapshot;
pub mod ticker;

pub use column::*;
pub use error::*;
pub use option::*;
pub use snapshot::*;
pub use ticker::*;
