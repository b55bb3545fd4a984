//! Table shaping for the dashboard
//!
//! Turns raw chain tables into display rows and summary totals.

pub mod format;
mod formatter;
mod summary;

pub use formatter::*;
pub use summary::*;
