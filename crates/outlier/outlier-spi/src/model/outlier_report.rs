//! Summary report of a fitted algorithm.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Summary of the outliers found by the last fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Number of observations in the fitted series.
    pub len: usize,
    pub outlier_count: usize,
    /// `outlier_count / len`, or 0 for an empty mask.
    pub outlier_ratio: f64,
    pub outlier_indices: Vec<usize>,
}

impl OutlierReport {
    /// Build a report from an outlier mask.
    pub fn from_mask(mask: &[bool]) -> Self {
        let outlier_indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &flagged)| flagged.then_some(i))
            .collect();
        let outlier_count = outlier_indices.len();
        let outlier_ratio = if mask.is_empty() {
            0.0
        } else {
            outlier_count as f64 / mask.len() as f64
        };

        Self {
            len: mask.len(),
            outlier_count,
            outlier_ratio,
            outlier_indices,
        }
    }
}

impl fmt::Display for OutlierReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "observations: {}", self.len)?;
        writeln!(
            f,
            "outliers:     {} ({:.2}%)",
            self.outlier_count,
            self.outlier_ratio * 100.0
        )?;
        write!(f, "indices:      {:?}", self.outlier_indices)
    }
}
