//! Season segmentation, aggregation and normalization.
//!
//! Observations are grouped into September-to-August seasons, counted into
//! three histograms over the full seasons, and divided by the span of full
//! season labels to give empirical annual exceedence probabilities.

pub mod aggregate;
pub mod analyzer;
pub mod normalize;
pub mod season;
pub mod types;
pub mod utility;
