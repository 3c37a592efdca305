//! Analysis modules.
//!
//! Aggregation of a submitted rating record into the overall score
//! and ranked insights.

pub mod aggregator;

pub use aggregator::*;
