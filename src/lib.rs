pub mod analyzers;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod output;
pub mod ranking;

#[cfg(test)]
pub(crate) mod testing;

pub use context::EngineContext;
pub use error::{EngineError, Result};
