//! Outlier Detection Facade
//!
//! Unified re-exports for windowed outlier detection.
//!
//! This facade provides a single entry point:
//! - `OutlierAlgorithm` trait, `OutlierError` and result models from SPI
//! - Configuration types from API
//! - `WindowStatistics` and `OutlierDetector` from Core

// Re-export everything from SPI
pub use outlier_spi::*;

// Re-export everything from API
pub use outlier_api::*;

// Re-export everything from Core
pub use outlier_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::OutlierAlgorithm;
    pub use crate::{DetectorConfig, ImputeStrategy, WindowConfig, WindowMode};
    pub use crate::{OutlierDetector, WindowStatistics};
    pub use crate::{OutlierError, OutlierReport, Result};
}
