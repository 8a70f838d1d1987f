//! Outlier algorithm trait definition.

use crate::error::Result;
use crate::model::OutlierReport;

/// Outlier algorithm trait.
///
/// Implementations run one batch pass over a univariate series in `fit` and
/// keep the cleaned series and outlier mask until the next `fit`. Results
/// are only readable once the algorithm has been fitted.
pub trait OutlierAlgorithm: Send + Sync {
    /// Fit the algorithm to a series, replacing any previous result.
    ///
    /// Returns `self` so calls can be chained:
    /// `detector.fit(&series)?.transform()?`.
    fn fit(&mut self, series: &[f64]) -> Result<&mut Self>;

    /// Filtered series and outlier mask from the last successful fit.
    ///
    /// Both slices have the length of the fitted series and are aligned with
    /// it index for index.
    fn transform(&self) -> Result<(&[f64], &[bool])>;

    /// Check if the algorithm has been fitted.
    fn check_is_fitted(&self) -> bool;

    /// Fit, then return owned copies of the filtered series and mask.
    fn fit_transform(&mut self, series: &[f64]) -> Result<(Vec<f64>, Vec<bool>)> {
        let (filtered, mask) = self.fit(series)?.transform()?;
        Ok((filtered.to_vec(), mask.to_vec()))
    }

    /// Summarize the last fit.
    fn report(&self) -> Result<OutlierReport> {
        let (_, mask) = self.transform()?;
        Ok(OutlierReport::from_mask(mask))
    }
}
