//! CSV input and output for both stages.

use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EdaError, Result, ResultExt};

/// Number of rows sampled for schema inference on the first attempt.
const INFER_SCHEMA_ROWS: usize = 100;

/// Load a CSV file with a header row.
///
/// The first attempt infers the schema from a sample of rows; if a later row
/// does not fit the inferred types, the file is read again with inference
/// over every row.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(EdaError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file not found: {}", path.display()),
        )));
    }

    info!("Loading dataset from: {}", path.display());

    // Strategy 1: sampled schema inference
    match read_with_inference(path, Some(INFER_SCHEMA_ROWS)) {
        Ok(df) => {
            debug!("Loaded {:?} with sampled schema inference", df.shape());
            return Ok(df);
        }
        Err(e) => {
            debug!("Sampled schema inference failed: {}", e);
        }
    }

    // Strategy 2: full-file schema inference
    let df = read_with_inference(path, None)
        .context(format!("Failed to parse CSV file {}", path.display()))?;
    debug!("Loaded {:?} with full schema inference", df.shape());
    Ok(df)
}

fn read_with_inference(path: &Path, infer_rows: Option<usize>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(infer_rows)
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

/// Write a frame as CSV with a header row and no index column.
///
/// Parent directories are created when missing.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)
        .context(format!("Failed to write CSV file {}", path.display()))?;

    info!("Dataset saved: {}", path.display());
    Ok(())
}
