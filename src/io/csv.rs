//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::CsvWriter};

/// Write a DataFrame to a CSV file.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("[io::csv] Failed to write CSV to {}", path.display()))
}

/// Write a DataFrame to a CSV string (for in-memory exports).
pub(crate) fn write_csv_string(df: &mut DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(df)
        .context("[io::csv] Failed to write CSV to string")?;
    String::from_utf8(buffer).context("[io::csv] CSV output is not valid UTF-8")
}
