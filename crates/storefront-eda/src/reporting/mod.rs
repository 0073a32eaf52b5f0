//! Report output.
//!
//! - [`console`] formats the results that each stage prints for the operator
//! - [`ReportWriter`] writes an [`AnalysisReport`](crate::types::AnalysisReport)
//!   as JSON (`--emit-report`)
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_eda::reporting::{ReportWriter, console};
//!
//! let report = analyzer.run(&table)?;
//! console::print_analysis(&report);
//!
//! let writer = ReportWriter::new(PathBuf::from("charts"));
//! writer.write_report_to_file(&report, "cleaned_gog_dataset")?;
//! ```

pub mod console;
mod generator;

pub use generator::{ReportWriter, report_file_stem};
