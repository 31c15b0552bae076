use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use anyhow::{anyhow, bail, Result};
use geo::{BoundingRect, Coord, MultiPolygon, Rect};
use polars::frame::DataFrame;

use crate::io::{geojson, proj};

use super::{
    normalize::{self, CATEGORY_COLUMN, KEY_COLUMN},
    BlockRecord, RiskCategory, Selection,
};

/// Candidate dataset locations, relative to the working directory.
pub const DATASET_CANDIDATES: &[&str] = &[
    "data/risk_atlas.geojson",
    "frontend/data/risk_atlas.geojson",
    "risk_atlas.geojson",
];

/// The in-memory risk dataset: one canonical table row and one lon/lat
/// geometry per block. Read once at startup, never mutated.
#[derive(Debug)]
pub struct Atlas {
    data: DataFrame,
    geoms: Vec<MultiPolygon<f64>>,
    index: HashMap<String, usize>, // block name -> row
}

static SHARED: OnceLock<Result<Atlas, String>> = OnceLock::new();

impl Atlas {
    /// Load and normalize a dataset file. A missing file is fatal and the
    /// message names the path.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("[atlas] Dataset file not found: {}", path.display());
        }
        let raw = geojson::read_feature_collection(path)?;
        Self::from_raw(raw)
    }

    /// Resolve the dataset through the fixed candidate paths under `root`.
    pub fn open_default(root: &Path) -> Result<Self> {
        for candidate in DATASET_CANDIDATES {
            let path = root.join(candidate);
            if path.exists() {
                return Self::load(&path);
            }
        }
        bail!(
            "[atlas] No dataset found under {}; tried: {}",
            root.display(),
            DATASET_CANDIDATES.join(", "),
        );
    }

    /// Process-wide dataset handle, loaded once on first access.
    ///
    /// The one-time-initialization guard makes concurrent first accesses
    /// converge on a single load. The source file is static for the process
    /// lifetime, so there is no invalidation.
    pub fn shared() -> Result<&'static Atlas> {
        let slot = SHARED.get_or_init(|| {
            let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Self::open_default(&root).map_err(|err| format!("{err:#}"))
        });
        slot.as_ref().map_err(|msg| anyhow!("{msg}"))
    }

    /// Build the atlas from parsed GeoJSON: reproject once if the source is
    /// not geographic, normalize the table, index the unique key column.
    pub(crate) fn from_raw(raw: geojson::RawDataset) -> Result<Self> {
        let geoms = if proj::is_geographic(raw.epsg) {
            raw.geoms
        } else {
            proj::reproject_to_geographic(&raw.geoms, raw.epsg)?
        };

        let table = if raw.table.width() == 0 {
            normalize::key_only_table(geoms.len())?
        } else {
            raw.table
        };
        let data = normalize::normalize(table)?;
        if data.height() != geoms.len() {
            bail!(
                "[atlas] {} property rows for {} geometries",
                data.height(),
                geoms.len(),
            );
        }

        let names = data.column(KEY_COLUMN)?.str()?;
        let mut index = HashMap::with_capacity(geoms.len());
        for (idx, name) in names.into_iter().enumerate() {
            let name = name.ok_or_else(|| anyhow!("[atlas] Row {idx} has a null block name"))?;
            if index.insert(name.to_string(), idx).is_some() {
                bail!("[atlas] Duplicate block name: {name:?}");
            }
        }

        Ok(Self { data, geoms, index })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.geoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geoms.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    #[inline]
    pub fn geoms(&self) -> &[MultiPolygon<f64>] {
        &self.geoms
    }

    /// Sorted unique block names (the selector contents).
    pub fn block_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Row index for a block name.
    pub fn row_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Resolve a requested block name. Names not in the dataset mean
    /// "no selection / whole-region view".
    pub fn select(&self, name: Option<&str>) -> Selection {
        match name {
            Some(requested) if self.index.contains_key(requested) => {
                Selection::Block(requested.to_string())
            }
            _ => Selection::AllBlocks,
        }
    }

    /// Per-block metrics. Missing numeric fields stay `None`.
    pub fn record(&self, name: &str) -> Option<BlockRecord> {
        let idx = self.row_of(name)?;
        Some(BlockRecord {
            block_name: name.to_string(),
            flood_risk_score: self.score_at("flood_risk_score", idx),
            gw_stress_score: self.score_at("gw_stress_score", idx),
            compound_score: self.score_at("compound_score", idx),
            risk_category: self.category_at(idx),
            degradation_rate: self.score_at("degradation_rate", idx),
        })
    }

    /// A numeric cell, if the column exists and the value is present and finite.
    pub(crate) fn score_at(&self, column: &str, idx: usize) -> Option<f64> {
        let values = self.data.column(column).ok()?.f64().ok()?;
        values.get(idx).filter(|value| value.is_finite())
    }

    /// The upstream category label at a row, parsed leniently.
    pub(crate) fn category_at(&self, idx: usize) -> RiskCategory {
        let label = self
            .data
            .column(CATEGORY_COLUMN)
            .ok()
            .and_then(|column| column.str().ok().and_then(|labels| labels.get(idx)));
        RiskCategory::parse(label)
    }

    /// The key column value at a row.
    pub(crate) fn name_at(&self, idx: usize) -> String {
        self.data
            .column(KEY_COLUMN)
            .ok()
            .and_then(|column| column.str().ok().and_then(|names| names.get(idx)))
            .unwrap_or_default()
            .to_string()
    }

    /// Lon/lat extent of the whole dataset.
    pub fn bounds(&self) -> Result<Rect<f64>> {
        let mut rects = self.geoms.iter().filter_map(|g| g.bounding_rect());
        let first = rects
            .next()
            .ok_or_else(|| anyhow!("[atlas] No geometries; nothing to frame"))?;
        Ok(rects.fold(first, merge_rects))
    }

    /// Lon/lat extent of one block.
    pub fn block_bounds(&self, idx: usize) -> Result<Rect<f64>> {
        self.geoms
            .get(idx)
            .and_then(|g| g.bounding_rect())
            .ok_or_else(|| anyhow!("[atlas] Block {idx} has no drawable geometry"))
    }
}

fn merge_rects(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}
