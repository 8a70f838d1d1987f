//! Outlier Detection Service Provider Interface
//!
//! Defines the capability trait, error type and result models shared by
//! every outlier algorithm.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::OutlierAlgorithm;
pub use error::{OutlierError, Result};
pub use model::{FitResult, OutlierReport};
