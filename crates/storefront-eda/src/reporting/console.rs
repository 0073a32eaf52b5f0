//! Human-readable console output.
//!
//! Note: output here goes through `println!` on purpose. These are the
//! results the operator asked for, so they stay visible regardless of the
//! log level.

use std::fmt::Write;
use std::path::Path;

use polars::prelude::*;

use crate::error::Result;
use crate::types::{AnalysisReport, CleaningSummary, CorrelationResult, columns};
use crate::utils::{collect_sample_values, series};

/// Rows shown in the cleaned-table preview.
const PREVIEW_ROWS: usize = 10;

/// Values shown per column in the genre preview.
const GENRE_PREVIEW_VALUES: usize = 5;

fn rule(out: &mut String, ch: char) {
    let _ = writeln!(out, "{}", ch.to_string().repeat(80));
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(40));
}

/// Truncate a string to max length with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pearson result as printed: `r` with 3 decimals, `p` with 5.
pub fn correlation_lines(correlation: &CorrelationResult) -> [String; 2] {
    [
        format!("Correlation (Pearson r): {:.3}", correlation.r),
        format!("p-value: {:.5}", correlation.p_value),
    ]
}

/// Column name, dtype and non-null count of every column.
pub fn frame_info(df: &DataFrame) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} rows x {} columns", df.height(), df.width());
    let _ = writeln!(out, "{:<4} {:<22} {:<16} {:<10}", "#", "Column", "Non-Null Count", "Dtype");
    let _ = writeln!(out, "{}", "-".repeat(56));
    for (i, column) in df.get_columns().iter().enumerate() {
        let non_null = column.len() - column.null_count();
        let _ = writeln!(
            out,
            "{:<4} {:<22} {:<16} {:<10}",
            i,
            truncate_str(column.name().as_str(), 21),
            format!("{} non-null", non_null),
            column.dtype()
        );
    }
    out
}

/// Cleaning stage output: confirmation, structure, preview and genre samples.
pub fn cleaning_summary(df: &DataFrame, summary: &CleaningSummary, output_path: &Path) -> Result<String> {
    let mut out = String::new();
    rule(&mut out, '=');
    let _ = writeln!(out, "Cleaned dataset saved to {}", output_path.display());
    rule(&mut out, '=');

    let _ = writeln!(
        out,
        "Rows: {} -> {} ({} removed: {} non-game, {} without reviews, {} incomplete)",
        summary.rows_read,
        summary.rows_kept,
        summary.rows_dropped(),
        summary.non_game_rows,
        summary.unreviewed_rows,
        summary.incomplete_rows
    );
    let _ = writeln!(out, "Kept: {:.1}%", summary.kept_percentage());

    heading(&mut out, "STRUCTURE");
    out.push_str(&frame_info(df));

    heading(&mut out, "FIRST ROWS");
    let _ = writeln!(out, "{}", df.head(Some(PREVIEW_ROWS)));

    for name in [columns::GENRES, columns::MAIN_GENRE] {
        heading(&mut out, name);
        for value in collect_sample_values(series(df, name)?, GENRE_PREVIEW_VALUES) {
            let _ = writeln!(out, "  {}", value);
        }
    }

    Ok(out)
}

/// Print the cleaning stage output.
pub fn print_cleaning(df: &DataFrame, summary: &CleaningSummary, output_path: &Path) -> Result<()> {
    print!("{}", cleaning_summary(df, summary, output_path)?);
    Ok(())
}

/// Analysis stage output for all seven analyses.
pub fn analysis_summary(report: &AnalysisReport) -> String {
    let mut out = String::new();
    rule(&mut out, '=');
    let _ = writeln!(
        out,
        "Dataset loaded: {} ({} rows x {} columns)",
        if report.input_file.is_empty() { "<memory>" } else { report.input_file.as_str() },
        report.shape.0,
        report.shape.1
    );
    rule(&mut out, '=');

    // 1. Prices
    heading(&mut out, "1. PRICE DISTRIBUTION");
    let prices = &report.price_distribution;
    for bin in &prices.bins {
        let _ = writeln!(out, "  {:<12} {:>6}", bin.label, bin.count);
    }
    let _ = writeln!(out, "  Outside the binned range: {}", prices.out_of_range);

    // 2. Genres
    heading(&mut out, "2. GENRE DISTRIBUTION");
    let genres = &report.genre_distribution;
    for slice in genres.slices() {
        let share = if genres.total == 0 {
            0.0
        } else {
            slice.count as f64 / genres.total as f64 * 100.0
        };
        let _ = writeln!(
            out,
            "  {:<24} {:>6} ({:.1}%)",
            truncate_str(&slice.label, 24),
            slice.count,
            share
        );
    }

    // 3. Releases
    heading(&mut out, "3. RELEASES BY YEAR");
    for entry in &report.releases_by_year {
        let _ = writeln!(out, "  {:<6} {:>6}", entry.year, entry.count);
    }

    // 4. Price vs. popularity
    heading(&mut out, "4. PRICE VS. POPULARITY");
    let popularity = &report.price_vs_popularity;
    let _ = writeln!(out, "Review count outliers:");
    if popularity.outliers.is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        let _ = writeln!(out, "  {:<40} {:>12} {:>12}", "title", "reviewCount", "finalAmount");
        for outlier in &popularity.outliers {
            let _ = writeln!(
                out,
                "  {:<40} {:>12} {:>12.2}",
                truncate_str(&outlier.title, 40),
                outlier.review_count,
                outlier.final_amount
            );
        }
    }
    let _ = writeln!(
        out,
        "Trend line: reviews = {:.3} * price + {:.3}",
        popularity.fit.slope, popularity.fit.intercept
    );
    for line in correlation_lines(&popularity.correlation) {
        let _ = writeln!(out, "{}", line);
    }

    // 5. Discounts
    heading(&mut out, "5. EFFECT OF DISCOUNTS ON POPULARITY");
    let discount = &report.discount_effect;
    let _ = writeln!(out, "  {:<14} {:>14} {:>8}", "isDiscounted", "mean reviews", "count");
    for group in &discount.groups {
        let _ = writeln!(
            out,
            "  {:<14} {:>14.2} {:>8}",
            group.is_discounted, group.mean_reviews, group.count
        );
    }
    let _ = writeln!(out, "Mann-Whitney U: {}", discount.test.u);
    let _ = writeln!(out, "Mann-Whitney U test p-value: {:.5}", discount.test.p_value);

    // 6. Genre popularity
    heading(&mut out, "6. MEAN REVIEW COUNT BY GENRE");
    for genre in &report.genre_popularity {
        let _ = writeln!(
            out,
            "  {:<24} {:>12.2}",
            truncate_str(&genre.genre, 24),
            genre.mean_reviews
        );
    }

    // 7. Year vs. popularity
    heading(&mut out, "7. RELEASE YEAR VS. POPULARITY");
    for line in correlation_lines(&report.year_vs_popularity.correlation) {
        let _ = writeln!(out, "{}", line);
    }

    if !report.charts.is_empty() {
        heading(&mut out, "CHARTS");
        for chart in &report.charts {
            let _ = writeln!(out, "  - {}", chart);
        }
    }

    out
}

/// Print the analysis stage output.
pub fn print_analysis(report: &AnalysisReport) {
    print!("{}", analysis_summary(report));
}
