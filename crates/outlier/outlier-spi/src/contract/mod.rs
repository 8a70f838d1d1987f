//! Contract definitions for outlier detection.
//!
//! This module contains trait definitions that algorithms must implement.

mod outlier_algorithm;

pub use outlier_algorithm::OutlierAlgorithm;
