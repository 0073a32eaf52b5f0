//! CLI entry point for the storefront catalog cleaning and analysis.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use storefront_eda::config::{DEFAULT_CLEANED_DATASET, DEFAULT_RAW_DATASET};
use storefront_eda::reporting::{ReportWriter, console, report_file_stem};
use storefront_eda::{AnalysisConfig, Analyzer, CleanerConfig, DataCleaner, GameTable};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Storefront catalog cleaning and exploratory analysis",
    long_about = "Cleans a storefront catalog export and runs exploratory analyses on it.\n\n\
                  EXAMPLES:\n  \
                  # Clean the raw export\n  \
                  storefront-eda clean -i gog_games_dataset.csv\n\n  \
                  # Analyze the cleaned table, charts into ./charts\n  \
                  storefront-eda analyze\n\n  \
                  # Analysis results as JSON, no charts\n  \
                  storefront-eda analyze --no-charts --json | jq .discount_effect\n\n  \
                  # Both stages with default file names\n  \
                  storefront-eda run"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and results)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean the raw catalog export and write the cleaned table
    Clean(CleanArgs),
    /// Run the analyses on the cleaned table
    Analyze(AnalyzeArgs),
    /// Clean, then analyze, with default file names
    Run,
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// Path to the raw catalog CSV
    #[arg(short, long, default_value = DEFAULT_RAW_DATASET)]
    input: PathBuf,

    /// Path of the cleaned CSV to write
    #[arg(short, long, default_value = DEFAULT_CLEANED_DATASET)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Path to the cleaned CSV
    #[arg(short, long, default_value = DEFAULT_CLEANED_DATASET)]
    input: PathBuf,

    /// Directory the charts are written to
    #[arg(long, default_value = "charts")]
    charts_dir: PathBuf,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Output JSON to stdout instead of human-readable results
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the charts directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_CLEANED_DATASET),
            charts_dir: PathBuf::from("charts"),
            no_charts: false,
            json: false,
            emit_report: false,
        }
    }
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let json_output = matches!(&cli.command, Command::Analyze(args) if args.json);
    init_logging(&cli.log_level, cli.quiet, json_output);

    match cli.command {
        Command::Clean(args) => run_clean(&args.input, &args.output),
        Command::Analyze(args) => run_analyze(&args),
        Command::Run => {
            run_clean(Path::new(DEFAULT_RAW_DATASET), Path::new(DEFAULT_CLEANED_DATASET))?;
            run_analyze(&AnalyzeArgs::default())
        }
    }
}

fn run_clean(input: &Path, output: &Path) -> Result<()> {
    let config = CleanerConfig::builder()
        .input_path(input)
        .output_path(output)
        .build()?;

    let (cleaned, summary) = DataCleaner.run(&config)?;
    console::print_cleaning(&cleaned, &summary, &config.output_path)?;
    Ok(())
}

/// Run the analyses and handle output based on CLI flags.
///
/// - Default: print human-readable results to stdout
/// - `--json`: print the JSON report to stdout only (no logs)
/// - `--emit-report`: also write the JSON report to the charts directory
fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let config = AnalysisConfig::builder()
        .charts_dir(&args.charts_dir)
        .render_charts(!args.no_charts)
        .build()?;

    let table = GameTable::load(&args.input)?;
    let report = Analyzer::new(config).run(&table)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let writer = ReportWriter::new(args.charts_dir.clone());
        let report_path = writer.write_report_to_file(&report, &report_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    console::print_analysis(&report);
    Ok(())
}
