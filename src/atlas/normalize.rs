//! Canonical schema normalization for raw risk tables.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Fixed renaming table: legacy upstream name → canonical name.
const RENAME_MAP: &[(&str, &str)] = &[
    ("flood_pressure", "flood_risk_score"),
    ("gw_stress_index", "gw_stress_score"),
    ("compound_class", "risk_category"),
    ("compound_risk", "compound_score"),
    ("stress_slope", "degradation_rate"),
    ("block", "block_name"),
];

/// Canonical unique key column.
pub(crate) const KEY_COLUMN: &str = "block_name";

/// Canonical category column.
pub(crate) const CATEGORY_COLUMN: &str = "risk_category";

/// Canonical numeric columns, held as Float64.
pub(crate) const SCORE_COLUMNS: &[&str] = &[
    "flood_risk_score",
    "gw_stress_score",
    "compound_score",
    "degradation_rate",
];

/// Rewrite a raw property table into the canonical schema: canonical column
/// names, a guaranteed-string key column, Float64 scores.
///
/// Idempotent: a second pass over already-canonical columns is a no-op.
pub(crate) fn normalize(mut df: DataFrame) -> Result<DataFrame> {
    for (legacy, canonical) in RENAME_MAP {
        let has_legacy = has_column(&df, legacy);
        if has_legacy && !has_column(&df, canonical) {
            df.rename(legacy, (*canonical).into())
                .with_context(|| format!("[atlas::normalize] Failed to rename {legacy:?}"))?;
        }
    }

    // Key column: synthesize from row position when absent, stringify otherwise.
    if !has_column(&df, KEY_COLUMN) {
        df.with_column(Series::new(KEY_COLUMN.into(), synthetic_names(df.height())))?;
    } else if df.column(KEY_COLUMN)?.dtype() != &DataType::String {
        let cast = df
            .column(KEY_COLUMN)?
            .cast(&DataType::String)
            .context("[atlas::normalize] Key column is not castable to String")?;
        df.with_column(cast)?;
    }

    // Scores: unify numeric dtypes on Float64. Non-numeric score columns are
    // left alone here; lookups on them simply yield "unavailable".
    for name in SCORE_COLUMNS {
        let needs_cast = matches!(
            df.column(name).map(|column| column.dtype().clone()),
            Ok(DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
                | DataType::Float32)
        );
        if needs_cast {
            let cast = df.column(name)?.cast(&DataType::Float64)?;
            df.with_column(cast)?;
        }
    }

    Ok(df)
}

/// Table for a source whose features carry no properties at all: just the
/// synthesized key column, one row per feature. A zero-column frame has
/// height 0, so the feature count has to be carried in explicitly.
pub(crate) fn key_only_table(height: usize) -> Result<DataFrame> {
    DataFrame::new(vec![
        Series::new(KEY_COLUMN.into(), synthetic_names(height)).into(),
    ])
    .context("[atlas::normalize] Failed to build key table")
}

fn synthetic_names(height: usize) -> Vec<String> {
    (0..height).map(|idx| format!("block_{idx}")).collect()
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|n| n.as_str() == name)
}
