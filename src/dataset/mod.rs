//! Survey data loading and enrichment.
//!
//! The loader reads the raw CSV export once; the enricher derives the score,
//! satisfaction group and bucket labels and produces the read-only
//! [`Dataset`](types::Dataset) every analyzer works from.

pub mod bucket;
pub mod enrich;
pub mod loader;
pub mod types;
