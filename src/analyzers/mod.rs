//! Read-only projections of the enriched dataset.
//!
//! Each analyzer takes the dataset (or a subset of it) plus request
//! parameters and returns ready-to-plot rows: grouped satisfaction counts,
//! filtered subsets and their score distribution, service feature means with
//! tiers, and headline summary figures.

pub mod barchart;
pub mod cards;
pub mod dimension;
pub mod histogram;
pub mod services;
pub mod tier;
pub mod types;
pub mod utility;
