//! Per-index window statistics.

use std::slice::Windows;

use outlier_api::{WindowConfig, WindowMode};
use outlier_spi::{OutlierError, Result};
use rayon::prelude::*;

/// Rolling series with at least this many windows are computed in parallel.
const PARALLEL_MIN_WINDOWS: usize = 4_096;

/// Overlapping read-only windows of `window` consecutive observations.
///
/// Yields `series.len() - window + 1` windows, or none when the window is
/// longer than the series.
pub fn sliding_windows(series: &[f64], window: usize) -> Result<Windows<'_, f64>> {
    if window == 0 {
        return Err(OutlierError::invalid_config("window", "must be positive"));
    }
    Ok(series.windows(window))
}

/// Mean and sample standard deviation of a non-empty window.
///
/// A single observation has a standard deviation of 0.
fn window_moments(window: &[f64]) -> (f64, f64) {
    let n = window.len();
    let sum: f64 = window.iter().sum();
    // Large finite values can overflow the plain sum; scale before summing.
    let mean = if sum.is_finite() {
        sum / n as f64
    } else {
        window.iter().map(|x| x / n as f64).sum()
    };
    if n < 2 {
        return (mean, 0.0);
    }

    let sum_sq: f64 = window.iter().map(|x| (x - mean).powi(2)).sum();
    (mean, (sum_sq / (n - 1) as f64).sqrt())
}

/// Mean and standard deviation of the window ending at each index.
///
/// Rolling mode: index `i >= window - 1` covers `[i - window + 1, i]`,
/// earlier indices are `NaN`. Expanding mode: index `i` covers `[0, i]`
/// and the window size is not used as a minimum period.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowStatistics {
    pub means: Vec<f64>,
    /// Sample (n - 1) standard deviations.
    pub stds: Vec<f64>,
}

impl WindowStatistics {
    /// Compute the statistics for every index of `series`.
    pub fn compute(series: &[f64], config: &WindowConfig) -> Result<Self> {
        config.validate()?;
        if series.is_empty() {
            return Err(OutlierError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        match config.mode {
            WindowMode::Rolling => Self::rolling(series, config.window),
            WindowMode::Expanding => Ok(Self::expanding(series)),
        }
    }

    /// Split into `(means, stds)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.means, self.stds)
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    fn rolling(series: &[f64], window: usize) -> Result<Self> {
        let n = series.len();
        let windows: Vec<&[f64]> = sliding_windows(series, window)?.collect();

        let moments: Vec<(f64, f64)> = if windows.len() >= PARALLEL_MIN_WINDOWS {
            windows.par_iter().map(|w| window_moments(w)).collect()
        } else {
            windows.iter().map(|w| window_moments(w)).collect()
        };

        let mut means = vec![f64::NAN; n];
        let mut stds = vec![f64::NAN; n];
        for (offset, (mean, std)) in moments.into_iter().enumerate() {
            means[offset + window - 1] = mean;
            stds[offset + window - 1] = std;
        }

        Ok(Self { means, stds })
    }

    // Welford update, one pass.
    fn expanding(series: &[f64]) -> Self {
        let mut means = Vec::with_capacity(series.len());
        let mut stds = Vec::with_capacity(series.len());
        let mut mean = 0.0;
        let mut m2 = 0.0;

        for (i, &x) in series.iter().enumerate() {
            let delta = x - mean;
            mean += delta / (i + 1) as f64;
            m2 += delta * (x - mean);

            means.push(mean);
            stds.push(if i == 0 { 0.0 } else { (m2 / i as f64).sqrt() });
        }

        Self { means, stds }
    }
}
