//! Outlier Detection API
//!
//! Configuration types and builders for windowed outlier detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use outlier_spi::{FitResult, OutlierError, OutlierReport, Result};

/// Default number of standard deviations for the outlier bounds.
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Default window size (roughly one year of business days).
pub const DEFAULT_WINDOW: usize = 261;

// ============================================================================
// Window Configuration
// ============================================================================

/// How the window behind each observation grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// Fixed-size trailing window.
    #[default]
    Rolling,
    /// Every observation from the start of the series.
    Expanding,
}

impl WindowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowMode::Rolling => "rolling",
            WindowMode::Expanding => "expanding",
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowMode {
    type Err = OutlierError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("rolling") {
            Ok(WindowMode::Rolling)
        } else if s.eq_ignore_ascii_case("expanding") {
            Ok(WindowMode::Expanding)
        } else {
            Err(OutlierError::invalid_config(
                "mode",
                format!("expected 'rolling' or 'expanding', got '{}'", s),
            ))
        }
    }
}

/// Window mode and size used for the per-index statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub mode: WindowMode,
    /// Rolling window length; must be positive.
    pub window: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            mode: WindowMode::Rolling,
            window: DEFAULT_WINDOW,
        }
    }
}

impl WindowConfig {
    pub fn new(mode: WindowMode, window: usize) -> Self {
        Self { mode, window }
    }

    pub fn rolling(window: usize) -> Self {
        Self::new(WindowMode::Rolling, window)
    }

    pub fn expanding(window: usize) -> Self {
        Self::new(WindowMode::Expanding, window)
    }

    /// Reject a zero-length window.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(OutlierError::invalid_config("window", "must be positive"));
        }
        Ok(())
    }
}

// ============================================================================
// Detector Configuration
// ============================================================================

/// Replacement strategy for flagged observations.
///
/// Declared and validated, but not applied: the filtered series is a copy of
/// the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImputeStrategy {
    #[default]
    Mean,
    Median,
}

impl ImputeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImputeStrategy::Mean => "mean",
            ImputeStrategy::Median => "median",
        }
    }
}

impl fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImputeStrategy {
    type Err = OutlierError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("mean") {
            Ok(ImputeStrategy::Mean)
        } else if s.eq_ignore_ascii_case("median") {
            Ok(ImputeStrategy::Median)
        } else {
            Err(OutlierError::invalid_config(
                "impute",
                format!("expected 'mean' or 'median', got '{}'", s),
            ))
        }
    }
}

/// Threshold detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Number of standard deviations for the outlier bounds (default: 3.0).
    pub threshold: f64,
    /// Replacement strategy (default: mean).
    pub impute: ImputeStrategy,
    /// Window mode (default: rolling).
    pub mode: WindowMode,
    /// Window size (default: 261).
    pub window: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            impute: ImputeStrategy::default(),
            mode: WindowMode::default(),
            window: DEFAULT_WINDOW,
        }
    }
}

impl DetectorConfig {
    pub fn builder() -> DetectorConfigBuilder {
        DetectorConfigBuilder::new()
    }

    /// Parse a configuration from loosely typed parameters.
    pub fn parse(threshold: f64, impute: &str, mode: &str, window: usize) -> Result<Self> {
        let config = Self {
            threshold,
            impute: impute.parse()?,
            mode: mode.parse()?,
            window,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from JSON. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| OutlierError::invalid_config("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The window part of the configuration.
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig::new(self.mode, self.window)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(OutlierError::invalid_config(
                "threshold",
                format!("must be positive and finite, got {}", self.threshold),
            ));
        }
        self.window_config().validate()
    }
}

/// Builder for [`DetectorConfig`].
#[derive(Debug, Clone, Default)]
pub struct DetectorConfigBuilder {
    config: DetectorConfig,
}

impl DetectorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn impute(mut self, impute: ImputeStrategy) -> Self {
        self.config.impute = impute;
        self
    }

    pub fn mode(mut self, mode: WindowMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn window(mut self, window: usize) -> Self {
        self.config.window = window;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<DetectorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
