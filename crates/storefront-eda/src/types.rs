//! Core data types shared by the cleaning and analysis stages.

use serde::{Deserialize, Serialize};

/// Column names of the catalog export and of the cleaned table.
pub mod columns {
    pub const TITLE: &str = "title";
    pub const DEVELOPER: &str = "developer";
    pub const PUBLISHER: &str = "publisher";
    pub const GENRES: &str = "genres";
    pub const CATEGORY: &str = "category";
    pub const OVERALL_AVG_RATING: &str = "overallAvgRating";
    pub const REVIEW_COUNT: &str = "reviewCount";
    pub const FINAL_AMOUNT: &str = "finalAmount";
    pub const BASE_AMOUNT: &str = "baseAmount";
    pub const DISCOUNT_PERCENTAGE: &str = "discountPercentage";
    pub const IS_DISCOUNTED: &str = "isDiscounted";
    pub const IS_FREE: &str = "isFree";
    pub const GLOBAL_RELEASE_DATE: &str = "globalReleaseDate";
    pub const IS_GAME: &str = "isGame";

    // Derived by the cleaner.
    pub const MAIN_GENRE: &str = "main_genre";
    pub const RELEASE_YEAR: &str = "release_year";

    /// Columns kept from the raw export, in output order.
    pub const RECORD_COLUMNS: [&str; 14] = [
        TITLE,
        DEVELOPER,
        PUBLISHER,
        GENRES,
        CATEGORY,
        OVERALL_AVG_RATING,
        REVIEW_COUNT,
        FINAL_AMOUNT,
        BASE_AMOUNT,
        DISCOUNT_PERCENTAGE,
        IS_DISCOUNTED,
        IS_FREE,
        GLOBAL_RELEASE_DATE,
        IS_GAME,
    ];

    /// Columns that must be non-null for a row to survive cleaning.
    pub const REQUIRED_NON_NULL: [&str; 3] = [OVERALL_AVG_RATING, FINAL_AMOUNT, RELEASE_YEAR];
}

/// Row accounting of one cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Rows in the raw export
    pub rows_read: usize,
    /// Rows dropped because `isGame` was not true
    pub non_game_rows: usize,
    /// Rows dropped because `reviewCount` was missing or not positive
    pub unreviewed_rows: usize,
    /// Rows dropped for a missing rating, price or release year
    pub incomplete_rows: usize,
    /// Rows written to the cleaned table
    pub rows_kept: usize,
    /// Columns written to the cleaned table
    pub columns_kept: usize,
}

impl CleaningSummary {
    /// Total number of dropped rows.
    pub fn rows_dropped(&self) -> usize {
        self.non_game_rows + self.unreviewed_rows + self.incomplete_rows
    }

    /// Share of raw rows that survived cleaning, in percent.
    pub fn kept_percentage(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.rows_kept as f64 / self.rows_read as f64) * 100.0
        }
    }
}

// ============================================================================
// Analysis results
// ============================================================================

/// One half-open price interval `[lower, upper)` and its record count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBin {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
    pub count: usize,
}

/// Result of the price distribution analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDistribution {
    pub bins: Vec<PriceBin>,
    /// Records priced outside the binned range
    pub out_of_range: usize,
}

impl PriceDistribution {
    /// Records that fell into one of the bins.
    pub fn binned_total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

/// A label with a record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Result of the genre distribution analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreDistribution {
    /// The most frequent genres, most frequent first
    pub top: Vec<CategoryCount>,
    /// Aggregated bucket for every other genre
    pub other: CategoryCount,
    /// Records with a genre label
    pub total: usize,
}

impl GenreDistribution {
    /// Pie slices: the top genres followed by the aggregated bucket.
    pub fn slices(&self) -> Vec<CategoryCount> {
        let mut slices = self.top.clone();
        slices.push(self.other.clone());
        slices
    }
}

/// Number of releases in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// A title listed for an unusually high review count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutlier {
    pub title: String,
    pub review_count: f64,
    pub final_amount: f64,
}

/// First-degree least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Value of the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Pearson correlation with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub r: f64,
    pub p_value: f64,
    pub n: usize,
}

/// Two-sided Mann-Whitney U test result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MannWhitneyResult {
    /// U statistic of the first sample
    pub u: f64,
    pub p_value: f64,
}

/// Result of the price vs. popularity analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePopularity {
    pub outliers: Vec<ReviewOutlier>,
    pub fit: LinearFit,
    pub correlation: CorrelationResult,
}

/// Mean review count and size of one `isDiscounted` group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountGroup {
    pub is_discounted: bool,
    pub mean_reviews: f64,
    pub count: usize,
}

/// Result of the discount effect analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountEffect {
    /// Non-discounted group first
    pub groups: Vec<DiscountGroup>,
    pub test: MannWhitneyResult,
}

/// Mean review count of one genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreReviews {
    pub genre: String,
    pub mean_reviews: f64,
    pub count: usize,
}

/// Result of the release year vs. popularity analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearPopularity {
    pub points: usize,
    pub correlation: CorrelationResult,
}

/// All analysis results of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path of the analysed table
    pub input_file: String,
    /// Shape of the analysed table (rows, columns)
    pub shape: (usize, usize),
    pub price_distribution: PriceDistribution,
    pub genre_distribution: GenreDistribution,
    pub releases_by_year: Vec<YearCount>,
    pub price_vs_popularity: PricePopularity,
    pub discount_effect: DiscountEffect,
    pub genre_popularity: Vec<GenreReviews>,
    pub year_vs_popularity: YearPopularity,
    /// Chart files written during the run
    pub charts: Vec<String>,
}
