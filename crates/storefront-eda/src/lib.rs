//! Storefront Catalog Analysis Library
//!
//! Cleaning and exploratory analysis of a video-game storefront catalog
//! export, built with Rust and Polars.
//!
//! # Overview
//!
//! The work happens in two stages that communicate through a CSV file:
//!
//! - **Cleaning**: keep actual games, project a fixed column set, derive the
//!   main genre and release year, drop unreviewed and incomplete rows
//! - **Analysis**: price and genre distributions, releases per year,
//!   popularity against price, discounts, genre and release year, with
//!   charts and significance tests
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storefront_eda::{AnalysisConfig, Analyzer, CleanerConfig, DataCleaner, GameTable};
//!
//! // Stage 1: raw export -> cleaned table
//! let config = CleanerConfig::builder()
//!     .input_path("gog_games_dataset.csv")
//!     .output_path("cleaned_gog_dataset.csv")
//!     .build()?;
//! let (cleaned, summary) = DataCleaner.run(&config)?;
//! println!("Kept {} of {} rows", summary.rows_kept, summary.rows_read);
//!
//! // Stage 2: cleaned table -> results and charts
//! let table = GameTable::load("cleaned_gog_dataset.csv".as_ref())?;
//! let report = Analyzer::new(AnalysisConfig::default()).run(&table)?;
//! println!("Pearson r (price vs reviews): {:.3}", report.price_vs_popularity.correlation.r);
//! ```
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to change binning, the number of genres shown and
//! where charts go:
//!
//! ```rust,ignore
//! let config = AnalysisConfig::builder()
//!     .price_bin_width(5.0)
//!     .price_upper_bound(60.0)
//!     .top_genres(8)
//!     .charts_dir("out/charts")
//!     .build()?;
//! ```

pub mod analysis;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod io;
pub mod plotting;
pub mod reporting;
pub mod stats;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analysis::{Analyzer, GameTable};
pub use cleaner::{DataCleaner, main_genre, release_year};
pub use config::{
    AnalysisConfig, AnalysisConfigBuilder, CleanerConfig, CleanerConfigBuilder,
    ConfigValidationError,
};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use plotting::PlotError;
pub use reporting::ReportWriter;
pub use types::{
    AnalysisReport, CategoryCount, CleaningSummary, CorrelationResult, DiscountEffect,
    DiscountGroup, GenreDistribution, GenreReviews, LinearFit, MannWhitneyResult, PriceBin,
    PriceDistribution, PricePopularity, ReviewOutlier, YearCount, YearPopularity,
};

static_assertions::assert_impl_all!(AnalysisReport: Send, Sync);
static_assertions::assert_impl_all!(Analyzer: Send, Sync);
static_assertions::assert_impl_all!(EdaError: Send, Sync);
