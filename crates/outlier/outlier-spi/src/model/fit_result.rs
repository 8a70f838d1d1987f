//! Fit result types.

use serde::{Deserialize, Serialize};

/// Output of a successful fit.
///
/// Every vector has the length of the fitted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Cleaned series.
    pub filtered: Vec<f64>,
    /// `true` where the observation was flagged as an outlier.
    pub mask: Vec<bool>,
    /// Lower bound each observation was compared against.
    pub lower: Vec<f64>,
    /// Upper bound each observation was compared against.
    pub upper: Vec<f64>,
}

impl FitResult {
    /// Create a new fit result.
    pub fn new(filtered: Vec<f64>, mask: Vec<bool>, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self {
            filtered,
            mask,
            lower,
            upper,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Get indices of flagged observations.
    pub fn outlier_indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &is_outlier)| if is_outlier { Some(i) } else { None })
            .collect()
    }

    /// Count of flagged observations.
    pub fn outlier_count(&self) -> usize {
        self.mask.iter().filter(|&&x| x).count()
    }
}
