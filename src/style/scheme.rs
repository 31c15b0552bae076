//! Risk classification: a categorical palette plus a banded score ramp.
//!
//! Both mappers are pure and total. The palette and band table travel
//! together in one injectable `ColorScheme` so callers (and tests) can
//! exercise exact boundary values instead of relying on hard-coded cuts.

use anyhow::{bail, Result};

use crate::atlas::RiskCategory;

use super::color::Rgb;

/// One continuous band: scores in `[lower, upper)` map to `color`.
/// The final band of a scheme also includes its upper bound.
#[derive(Clone, Copy, Debug)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub color: Rgb,
}

/// Display colors for categories and score bands.
#[derive(Clone, Debug)]
pub struct ColorScheme {
    pub critical: Rgb,
    pub high: Rgb,
    pub moderate: Rgb,
    pub low: Rgb,
    /// Neutral color for missing values and unrecognized categories.
    pub fallback: Rgb,
    /// Ordered, contiguous bands covering [0, 1].
    pub bands: Vec<Band>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        let critical = Rgb::new(0xb2, 0x18, 0x2b);
        let high = Rgb::new(0xef, 0x8a, 0x62);
        let moderate = Rgb::new(0xfd, 0xdb, 0xc7);
        let low = Rgb::new(0x67, 0xa9, 0xcf);
        Self {
            critical,
            high,
            moderate,
            low,
            fallback: Rgb::new(0xf7, 0xf7, 0xf7),
            // Cut points belong to the band they open: 0.4 reads moderate
            // and 0.7 reads critical. The dashboard variants disagree here;
            // this table standardizes on lower-inclusive bands.
            bands: vec![
                Band { lower: 0.0, upper: 0.4, color: low },
                Band { lower: 0.4, upper: 0.7, color: moderate },
                Band { lower: 0.7, upper: 1.0, color: critical },
            ],
        }
    }
}

impl ColorScheme {
    /// Color for a discrete risk category. Unknown labels get the fallback.
    pub fn category_color(&self, category: RiskCategory) -> Rgb {
        match category {
            RiskCategory::Critical => self.critical,
            RiskCategory::High => self.high,
            RiskCategory::Moderate => self.moderate,
            RiskCategory::Low => self.low,
            RiskCategory::Unknown => self.fallback,
        }
    }

    /// Color for a continuous score in [0, 1].
    ///
    /// Missing or non-finite scores get the fallback; finite out-of-range
    /// scores are clamped into the nominal domain.
    pub fn band_color(&self, score: Option<f64>) -> Rgb {
        let Some(value) = score else { return self.fallback };
        if !value.is_finite() {
            return self.fallback;
        }

        let x = value.clamp(0.0, 1.0);
        let last = self.bands.len().saturating_sub(1);
        for (i, band) in self.bands.iter().enumerate() {
            // [lower, upper), except the last band which includes upper.
            if x >= band.lower && (x < band.upper || (i == last && x <= band.upper)) {
                return band.color;
            }
        }

        self.fallback
    }

    /// Check that the band table is ascending, contiguous, and covers [0, 1].
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.bands.first() else {
            bail!("[style] Band table is empty");
        };
        if first.lower != 0.0 {
            bail!("[style] Band table starts at {} instead of 0", first.lower);
        }

        let mut cursor = 0.0;
        for band in &self.bands {
            if band.lower != cursor {
                bail!("[style] Band gap at {}: next band starts at {}", cursor, band.lower);
            }
            if band.upper <= band.lower {
                bail!("[style] Band [{}, {}) is not ascending", band.lower, band.upper);
            }
            cursor = band.upper;
        }

        if cursor != 1.0 {
            bail!("[style] Band table ends at {} instead of 1", cursor);
        }
        Ok(())
    }
}
