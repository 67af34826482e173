//! Feature-importance ranking of the service features.
//!
//! The model sits behind the [`Trainer`](trainer::Trainer) trait; the shipped
//! implementation is a Gini decision tree.

pub mod rank;
pub mod trainer;
pub mod tree;
