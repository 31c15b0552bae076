use serde::Serialize;

/// Discrete risk label assigned upstream from the composite score.
/// The bucket boundaries live upstream; this layer trusts the label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RiskCategory {
    Critical,
    High,
    Moderate,
    Low,
    /// Missing or unrecognized label; classifies to the neutral fallback.
    Unknown,
}

impl RiskCategory {
    /// Parse an upstream label. Anything unrecognized is `Unknown`.
    pub fn parse(label: Option<&str>) -> Self {
        match label {
            Some("Critical") => Self::Critical,
            Some("High") => Self::High,
            Some("Moderate") => Self::Moderate,
            Some("Low") => Self::Low,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }
}

/// One administrative block's risk metrics (geometry lives in the `Atlas`).
/// Missing per-field values stay `None` and render as "unavailable".
#[derive(Clone, Debug, Serialize)]
pub struct BlockRecord {
    pub block_name: String,
    pub flood_risk_score: Option<f64>,
    pub gw_stress_score: Option<f64>,
    pub compound_score: Option<f64>,
    pub risk_category: RiskCategory,
    pub degradation_rate: Option<f64>,
}
