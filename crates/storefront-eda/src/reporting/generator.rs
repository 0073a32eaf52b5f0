use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::types::AnalysisReport;

/// Writes analysis reports as pretty-printed JSON files.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
        }
    }
}

impl ReportWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write a report to `<output_dir>/<report_base_name>_report.json`.
    pub fn write_report_to_file(
        &self,
        report: &AnalysisReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

/// File stem (name without extension) of an input path.
pub fn report_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use tempfile::tempdir;

    fn report() -> AnalysisReport {
        let correlation = CorrelationResult {
            r: 0.5,
            p_value: 0.01,
            n: 10,
        };
        AnalysisReport {
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            input_file: "cleaned_gog_dataset.csv".to_string(),
            shape: (10, 16),
            price_distribution: PriceDistribution {
                bins: Vec::new(),
                out_of_range: 0,
            },
            genre_distribution: GenreDistribution {
                top: Vec::new(),
                other: CategoryCount {
                    label: "Other".to_string(),
                    count: 0,
                },
                total: 0,
            },
            releases_by_year: vec![YearCount {
                year: 2015,
                count: 10,
            }],
            price_vs_popularity: PricePopularity {
                outliers: Vec::new(),
                fit: LinearFit {
                    slope: 1.0,
                    intercept: 0.0,
                },
                correlation,
            },
            discount_effect: DiscountEffect {
                groups: Vec::new(),
                test: MannWhitneyResult {
                    u: 12.0,
                    p_value: 0.2,
                },
            },
            genre_popularity: Vec::new(),
            year_vs_popularity: YearPopularity {
                points: 10,
                correlation,
            },
            charts: Vec::new(),
        }
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("out"));
        let path = writer.write_report_to_file(&report(), "games").unwrap();

        assert_eq!(path.file_name().unwrap(), "games_report.json");
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["shape"][0], 10);
        assert_eq!(json["discount_effect"]["test"]["u"], 12.0);
    }

    #[test]
    fn test_report_file_stem() {
        assert_eq!(
            report_file_stem(Path::new("data/cleaned_gog_dataset.csv")),
            "cleaned_gog_dataset"
        );
        assert_eq!(report_file_stem(Path::new("")), "output");
    }
}
