//! Data models for outlier detection.
//!
//! This module contains the structures produced by a fitted algorithm.

mod fit_result;
mod outlier_report;

pub use fit_result::FitResult;
pub use outlier_report::OutlierReport;
