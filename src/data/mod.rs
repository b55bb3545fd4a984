//! Data fetching and caching
//!
//! Handles:
//! - The provider seam (`ChainProvider`)
//! - Yahoo Finance options API
//! - In-memory snapshot caching

pub mod cache;
pub mod provider;
pub mod yahoo;

pub use cache::*;
pub use provider::*;
pub use yahoo::*;
