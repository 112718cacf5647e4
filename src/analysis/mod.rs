//! Analysis modules.
//!
//! Pure functions over collected data: deduplication and filtering of
//! search results, trend tallies and the watch list.

pub mod aggregator;
pub mod trends;

pub use aggregator::*;
pub use trends::*;
