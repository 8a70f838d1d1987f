//! Error types for outlier detection.
//!
//! This module contains error types and the Result alias.

mod outlier_error;

pub use outlier_error::{OutlierError, Result};
