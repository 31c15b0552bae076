//! Per-block CSV export.

use std::path::Path;

use anyhow::{anyhow, Result};
use polars::frame::DataFrame;

use crate::atlas::Atlas;

impl Atlas {
    /// Export one block's row as a CSV file. Geometry is excluded (it never
    /// enters the table).
    pub fn export_csv(&self, name: &str, path: &Path) -> Result<()> {
        let mut df = self.block_row(name)?;
        crate::io::csv::write_csv(&mut df, path)
    }

    /// Export one block's row as a CSV string.
    pub fn export_csv_string(&self, name: &str) -> Result<String> {
        let mut df = self.block_row(name)?;
        crate::io::csv::write_csv_string(&mut df)
    }

    /// One-row frame for a block.
    fn block_row(&self, name: &str) -> Result<DataFrame> {
        let idx = self
            .row_of(name)
            .ok_or_else(|| anyhow!("[atlas] Unknown block: {name:?}"))?;
        Ok(self.data().slice(idx as i64, 1))
    }
}
