//! Threshold outlier detector.

use outlier_api::{DetectorConfig, ImputeStrategy, WindowMode};
use outlier_spi::{FitResult, OutlierAlgorithm, OutlierError, Result};
use tracing::{debug, warn};

use crate::window::WindowStatistics;

// ============================================================================
// Outlier Detector
// ============================================================================

/// Moving-window mean/standard-deviation outlier detector.
///
/// An observation is flagged when it falls outside
/// `[mean - threshold * std, mean + threshold * std]` of its reference
/// window:
///
/// - rolling mode: the `window` observations immediately before it, i.e.
///   the [`WindowStatistics`] entry at `i - 1`. This differs from a rolling
///   window ending at `i`: the observation under test never enters its own
///   reference window, so a single spike after a flat stretch is flagged.
///   The statistic for the last index is therefore unused. The first
///   `window` observations have no full reference window and are never
///   flagged.
/// - expanding mode: every observation from the start up to and including
///   it. Nothing is suppressed; the first observation is its own mean with
///   zero deviation.
///
/// The filtered series is currently a copy of the input; the configured
/// [`ImputeStrategy`] is validated and stored but not applied.
///
/// # Example
///
/// ```rust
/// use outlier_core::OutlierDetector;
/// use outlier_spi::OutlierAlgorithm;
///
/// let mut series = vec![1.0; 10];
/// series.push(100.0);
///
/// let mut detector = OutlierDetector::new(3.0, "mean", "rolling", 10)?;
/// let (_, mask) = detector.fit(&series)?.transform()?;
/// assert!(mask[10]);
/// # Ok::<(), outlier_spi::OutlierError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OutlierDetector {
    config: DetectorConfig,
    result: Option<FitResult>,
}

impl OutlierDetector {
    /// Create a new detector from loosely typed parameters.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Number of standard deviations for the bounds
    /// * `impute` - `"mean"` or `"median"`
    /// * `mode` - `"rolling"` or `"expanding"`
    /// * `window` - Rolling window size
    pub fn new(threshold: f64, impute: &str, mode: &str, window: usize) -> Result<Self> {
        Self::from_config(DetectorConfig::parse(threshold, impute, mode, window)?)
    }

    /// Create from configuration.
    pub fn from_config(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            result: None,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn window(&self) -> usize {
        self.config.window
    }

    pub fn mode(&self) -> WindowMode {
        self.config.mode
    }

    pub fn impute(&self) -> ImputeStrategy {
        self.config.impute
    }

    /// Lower and upper bounds from the last fit.
    ///
    /// Rolling-mode indices without a full reference window hold `NaN`.
    pub fn bounds(&self) -> Result<(&[f64], &[f64])> {
        let result = self.fitted_result()?;
        Ok((&result.lower, &result.upper))
    }

    /// The full result of the last fit.
    pub fn fit_result(&self) -> Result<&FitResult> {
        self.fitted_result()
    }

    fn fitted_result(&self) -> Result<&FitResult> {
        self.result.as_ref().ok_or(OutlierError::NotFitted)
    }

    fn compute(&self, series: &[f64]) -> Result<FitResult> {
        if series.is_empty() {
            return Err(OutlierError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if let Some(index) = series.iter().position(|x| !x.is_finite()) {
            return Err(OutlierError::InvalidData(format!(
                "non-finite value {} at index {}",
                series[index], index
            )));
        }

        let window = self.config.window;
        let threshold = self.config.threshold;
        let (means, stds) =
            WindowStatistics::compute(series, &self.config.window_config())?.into_parts();

        // Index of the statistics each observation is compared against.
        let reference = |i: usize| match self.config.mode {
            WindowMode::Rolling => i.checked_sub(1),
            WindowMode::Expanding => Some(i),
        };

        let (lower, upper): (Vec<f64>, Vec<f64>) = (0..series.len())
            .map(|i| match reference(i) {
                Some(r) => (means[r] - threshold * stds[r], means[r] + threshold * stds[r]),
                None => (f64::NAN, f64::NAN),
            })
            .unzip();

        // Rolling indices below `window` have no reference window and stay NaN.
        let first_defined = match self.config.mode {
            WindowMode::Rolling => window,
            WindowMode::Expanding => 0,
        };
        if let Some(index) =
            (first_defined..series.len()).find(|&i| lower[i].is_nan() || upper[i].is_nan())
        {
            return Err(OutlierError::InvalidData(format!(
                "window statistics for index {} are not finite",
                index
            )));
        }

        let mut mask: Vec<bool> = series
            .iter()
            .zip(lower.iter().zip(&upper))
            .map(|(&x, (&lo, &hi))| !(lo <= x && x <= hi))
            .collect();

        if self.config.mode == WindowMode::Rolling {
            if window >= series.len() {
                warn!(
                    window,
                    len = series.len(),
                    "rolling window covers the whole series, no observation can be flagged"
                );
            }
            mask.iter_mut().take(window).for_each(|flag| *flag = false);
        }

        Ok(FitResult::new(series.to_vec(), mask, lower, upper))
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self {
            config: DetectorConfig::default(),
            result: None,
        }
    }
}

impl OutlierAlgorithm for OutlierDetector {
    fn fit(&mut self, series: &[f64]) -> Result<&mut Self> {
        debug!(
            len = series.len(),
            mode = %self.config.mode,
            window = self.config.window,
            threshold = self.config.threshold,
            "fitting outlier detector"
        );

        let result = self.compute(series)?;
        debug!(outliers = result.outlier_count(), "outlier detector fitted");

        self.result = Some(result);
        Ok(self)
    }

    fn transform(&self) -> Result<(&[f64], &[bool])> {
        let result = self.fitted_result()?;
        Ok((&result.filtered, &result.mask))
    }

    fn check_is_fitted(&self) -> bool {
        self.result.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike_series() -> Vec<f64> {
        let mut series = vec![1.0; 10];
        series.push(100.0);
        series
    }

    #[test]
    fn test_new_validates_mode() {
        let err = OutlierDetector::new(3.0, "mean", "bogus", 10).unwrap_err();
        assert!(matches!(err, OutlierError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_new_validates_threshold_and_window() {
        assert!(OutlierDetector::new(0.0, "mean", "rolling", 10).is_err());
        assert!(OutlierDetector::new(3.0, "mean", "rolling", 0).is_err());
    }

    #[test]
    fn test_default() {
        let detector = OutlierDetector::default();
        assert_eq!(detector.threshold(), 3.0);
        assert_eq!(detector.impute(), ImputeStrategy::Mean);
        assert_eq!(detector.mode(), WindowMode::Rolling);
        assert_eq!(detector.window(), 261);
        assert!(!detector.check_is_fitted());
    }

    #[test]
    fn test_transform_before_fit() {
        let detector = OutlierDetector::default();
        assert!(matches!(detector.transform(), Err(OutlierError::NotFitted)));
        assert!(matches!(detector.bounds(), Err(OutlierError::NotFitted)));
        assert!(matches!(detector.report(), Err(OutlierError::NotFitted)));
    }

    #[test]
    fn test_rolling_spike_is_flagged() {
        let series = spike_series();
        let mut detector = OutlierDetector::new(3.0, "mean", "rolling", 10).unwrap();
        let (filtered, mask) = detector.fit(&series).unwrap().transform().unwrap();

        assert_eq!(filtered, series.as_slice());
        assert!(mask[..10].iter().all(|&m| !m));
        assert!(mask[10]);
    }

    #[test]
    fn test_rolling_bounds() {
        let mut detector = OutlierDetector::new(3.0, "mean", "rolling", 10).unwrap();
        detector.fit(&spike_series()).unwrap();
        let (lower, upper) = detector.bounds().unwrap();

        assert!(lower[9].is_nan());
        assert_eq!(lower[10], 1.0);
        assert_eq!(upper[10], 1.0);
    }

    #[test]
    fn test_near_max_constant_series_no_outliers() {
        let series = vec![1e308; 6];
        for mode in ["rolling", "expanding"] {
            let mut detector = OutlierDetector::new(3.0, "mean", mode, 2).unwrap();
            let (_, mask) = detector.fit(&series).unwrap().transform().unwrap();
            assert!(mask.iter().all(|&m| !m), "mode {}", mode);
        }
    }

    #[test]
    fn test_overflowing_statistics_are_an_error() {
        let mut detector = OutlierDetector::new(3.0, "mean", "expanding", 2).unwrap();
        let err = detector.fit(&[1e308, -1e308]).unwrap_err();
        assert!(matches!(err, OutlierError::InvalidData(_)));
        assert!(!detector.check_is_fitted());
    }

    #[test]
    fn test_rolling_edge_suppression() {
        // Every point in the first window would otherwise be flagged.
        let series = vec![0.0, 50.0, -50.0, 80.0, 1.0, 1.0, 1.0];
        let mut detector = OutlierDetector::new(1.0, "mean", "rolling", 4).unwrap();
        let (_, mask) = detector.fit(&series).unwrap().transform().unwrap();
        assert!(mask[..4].iter().all(|&m| !m));
    }

    #[test]
    fn test_expanding_first_point_not_flagged() {
        let mut detector = OutlierDetector::new(3.0, "mean", "expanding", 5).unwrap();
        let (_, mask) = detector.fit(&[42.0, 42.0, 42.0]).unwrap().transform().unwrap();
        assert_eq!(mask, &[false, false, false]);
    }

    #[test]
    fn test_expanding_flags_jump() {
        let mut series = vec![5.0; 30];
        series.push(6.0);
        let mut detector = OutlierDetector::new(3.0, "mean", "expanding", 261).unwrap();
        let (_, mask) = detector.fit(&series).unwrap().transform().unwrap();

        assert!(mask[30]);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 1);
    }

    #[test]
    fn test_constant_series_no_outliers() {
        let series = vec![5.0; 20];
        for mode in ["rolling", "expanding"] {
            let mut detector = OutlierDetector::new(3.0, "mean", mode, 5).unwrap();
            let (_, mask) = detector.fit(&series).unwrap().transform().unwrap();
            assert!(mask.iter().all(|&m| !m), "mode {}", mode);
        }
    }

    #[test]
    fn test_fit_rejects_empty_series() {
        let mut detector = OutlierDetector::default();
        let err = detector.fit(&[]).unwrap_err();
        assert!(matches!(err, OutlierError::InsufficientData { .. }));
        assert!(!detector.check_is_fitted());
    }

    #[test]
    fn test_fit_rejects_non_finite() {
        let mut detector = OutlierDetector::new(3.0, "mean", "rolling", 2).unwrap();
        let err = detector.fit(&[1.0, f64::NAN, 2.0]).unwrap_err();
        assert!(matches!(err, OutlierError::InvalidData(_)));
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_failed_refit_keeps_previous_result() {
        let series = spike_series();
        let mut detector = OutlierDetector::new(3.0, "mean", "rolling", 10).unwrap();
        detector.fit(&series).unwrap();

        assert!(detector.fit(&[]).is_err());
        assert!(detector.check_is_fitted());
        assert_eq!(detector.transform().unwrap().0.len(), series.len());
    }

    #[test]
    fn test_refit_replaces_result() {
        let mut detector = OutlierDetector::new(3.0, "mean", "rolling", 3).unwrap();
        detector.fit(&[1.0; 8]).unwrap();
        detector.fit(&[2.0; 4]).unwrap();

        let (filtered, mask) = detector.transform().unwrap();
        assert_eq!(filtered, &[2.0; 4]);
        assert_eq!(mask.len(), 4);
    }

    #[test]
    fn test_fit_transform_and_report() {
        let series = spike_series();
        let mut detector = OutlierDetector::new(3.0, "median", "rolling", 10).unwrap();
        let (filtered, mask) = detector.fit_transform(&series).unwrap();
        assert_eq!(filtered, series);
        assert_eq!(mask.len(), series.len());

        let report = detector.report().unwrap();
        assert_eq!(report.outlier_indices, vec![10]);
        assert_eq!(detector.fit_result().unwrap().outlier_count(), 1);
    }
}
