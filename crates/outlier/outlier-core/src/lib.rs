//! Outlier Detection Core
//!
//! Window statistics and the threshold-based outlier detector.

mod detector;
mod window;

pub use detector::*;
pub use window::*;
