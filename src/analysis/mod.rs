//! Analysis modules.
//!
//! Statistics derived from fetched vault data.

pub mod aggregator;

pub use aggregator::*;
