//! Ranks alternatives against weighted, hierarchical criteria.
//!
//! Raw values are z-score normalized per axis, merged through a weight tree and mapped
//! to percentiles with the standard normal CDF.

pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod stats;
