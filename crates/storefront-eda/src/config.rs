//! Configuration types for the cleaning and analysis stages.
//!
//! Both stages use the builder pattern. Defaults hold the catalog file names
//! and the analysis constants such as the price bin width.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default raw export read by the cleaner.
pub const DEFAULT_RAW_DATASET: &str = "gog_games_dataset.csv";

/// Default cleaned dataset written by the cleaner and read by the analyzer.
pub const DEFAULT_CLEANED_DATASET: &str = "cleaned_gog_dataset.csv";

/// Configuration for the cleaning stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Raw catalog export.
    /// Default: "gog_games_dataset.csv"
    pub input_path: PathBuf,

    /// Destination of the cleaned table.
    /// Default: "cleaned_gog_dataset.csv"
    pub output_path: PathBuf,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_RAW_DATASET),
            output_path: PathBuf::from(DEFAULT_CLEANED_DATASET),
        }
    }
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_path".to_string()));
        }
        if self.input_path == self.output_path {
            return Err(ConfigValidationError::OutputOverwritesInput(
                self.input_path.display().to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

impl CleanerConfigBuilder {
    /// Set the raw dataset path.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the cleaned dataset path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<CleanerConfig, ConfigValidationError> {
        let config = CleanerConfig {
            input_path: self
                .input_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RAW_DATASET)),
            output_path: self
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CLEANED_DATASET)),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration for the analysis stage.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_eda::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .charts_dir("out/charts")
///     .top_genres(8)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Width of one price bin, in currency units.
    /// Default: 2.0
    pub price_bin_width: f64,

    /// Exclusive upper bound of the binned price range; bins start at 0.
    /// Default: 52.0
    pub price_upper_bound: f64,

    /// Number of genres shown individually in the genre pie chart.
    /// Default: 6
    pub top_genres: usize,

    /// Label of the bucket that aggregates the remaining genres.
    /// Default: "Other"
    pub other_label: String,

    /// Review counts strictly above this value are listed as outliers.
    /// Default: 2000
    pub review_outlier_threshold: f64,

    /// Upper limit for the number of year ticks on the release chart.
    /// Default: 20
    pub max_year_ticks: usize,

    /// Directory the charts are written to.
    /// Default: "charts"
    pub charts_dir: PathBuf,

    /// Whether charts are rendered at all.
    /// Default: true
    pub render_charts: bool,

    /// Chart width in pixels.
    /// Default: 1200
    pub chart_width: u32,

    /// Chart height in pixels.
    /// Default: 800
    pub chart_height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            price_bin_width: 2.0,
            price_upper_bound: 52.0,
            top_genres: 6,
            other_label: "Other".to_string(),
            review_outlier_threshold: 2000.0,
            max_year_ticks: 20,
            charts_dir: PathBuf::from("charts"),
            render_charts: true,
            chart_width: 1200,
            chart_height: 800,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.price_bin_width.is_finite() && self.price_bin_width > 0.0) {
            return Err(ConfigValidationError::InvalidBinning {
                width: self.price_bin_width,
                upper: self.price_upper_bound,
            });
        }

        if !(self.price_upper_bound.is_finite() && self.price_upper_bound >= self.price_bin_width)
        {
            return Err(ConfigValidationError::InvalidBinning {
                width: self.price_bin_width,
                upper: self.price_upper_bound,
            });
        }

        if self.top_genres == 0 {
            return Err(ConfigValidationError::InvalidTopGenres(self.top_genres));
        }

        if self.max_year_ticks < 2 {
            return Err(ConfigValidationError::InvalidTickLimit(self.max_year_ticks));
        }

        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigValidationError::InvalidChartSize {
                width: self.chart_width,
                height: self.chart_height,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Path '{0}' must not be empty")]
    EmptyPath(String),

    #[error("Cleaned output would overwrite the raw input '{0}'")]
    OutputOverwritesInput(String),

    #[error("Invalid price binning: width {width}, upper bound {upper} (need 0 < width <= upper)")]
    InvalidBinning { width: f64, upper: f64 },

    #[error("Invalid top genre count: {0} (must be at least 1)")]
    InvalidTopGenres(usize),

    #[error("Invalid year tick limit: {0} (must be at least 2)")]
    InvalidTickLimit(usize),

    #[error("Invalid chart size: {width}x{height}")]
    InvalidChartSize { width: u32, height: u32 },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    price_bin_width: Option<f64>,
    price_upper_bound: Option<f64>,
    top_genres: Option<usize>,
    other_label: Option<String>,
    review_outlier_threshold: Option<f64>,
    max_year_ticks: Option<usize>,
    charts_dir: Option<PathBuf>,
    render_charts: Option<bool>,
    chart_width: Option<u32>,
    chart_height: Option<u32>,
}

impl AnalysisConfigBuilder {
    /// Set the price bin width.
    pub fn price_bin_width(mut self, width: f64) -> Self {
        self.price_bin_width = Some(width);
        self
    }

    /// Set the exclusive upper bound of the binned price range.
    pub fn price_upper_bound(mut self, upper: f64) -> Self {
        self.price_upper_bound = Some(upper);
        self
    }

    /// Set how many genres get their own pie slice.
    pub fn top_genres(mut self, count: usize) -> Self {
        self.top_genres = Some(count);
        self
    }

    /// Set the label of the aggregated genre bucket.
    pub fn other_label(mut self, label: impl Into<String>) -> Self {
        self.other_label = Some(label.into());
        self
    }

    /// Set the review count above which titles are listed as outliers.
    pub fn review_outlier_threshold(mut self, threshold: f64) -> Self {
        self.review_outlier_threshold = Some(threshold);
        self
    }

    /// Set the maximum number of x ticks on the release chart.
    pub fn max_year_ticks(mut self, ticks: usize) -> Self {
        self.max_year_ticks = Some(ticks);
        self
    }

    /// Set the chart output directory.
    pub fn charts_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.charts_dir = Some(path.into());
        self
    }

    /// Enable or disable chart rendering.
    ///
    /// Numeric results are computed and printed either way.
    pub fn render_charts(mut self, render: bool) -> Self {
        self.render_charts = Some(render);
        self
    }

    /// Set the chart size in pixels.
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_width = Some(width);
        self.chart_height = Some(height);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            price_bin_width: self.price_bin_width.unwrap_or(defaults.price_bin_width),
            price_upper_bound: self.price_upper_bound.unwrap_or(defaults.price_upper_bound),
            top_genres: self.top_genres.unwrap_or(defaults.top_genres),
            other_label: self.other_label.unwrap_or(defaults.other_label),
            review_outlier_threshold: self
                .review_outlier_threshold
                .unwrap_or(defaults.review_outlier_threshold),
            max_year_ticks: self.max_year_ticks.unwrap_or(defaults.max_year_ticks),
            charts_dir: self.charts_dir.unwrap_or(defaults.charts_dir),
            render_charts: self.render_charts.unwrap_or(defaults.render_charts),
            chart_width: self.chart_width.unwrap_or(defaults.chart_width),
            chart_height: self.chart_height.unwrap_or(defaults.chart_height),
        };

        config.validate()?;
        Ok(config)
    }
}
