use clap::ValueEnum;

/// Which dataset measure a choropleth colors by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Overlay {
    /// Upstream risk label, via the categorical palette.
    Category,
    /// Flood pressure score, via the band table.
    Flood,
    /// Groundwater stress score, via the band table.
    Groundwater,
    /// Composite risk score, via the band table.
    Compound,
}

impl Overlay {
    pub const ALL: [Overlay; 4] = [
        Overlay::Category,
        Overlay::Flood,
        Overlay::Groundwater,
        Overlay::Compound,
    ];

    /// Canonical column backing this overlay.
    pub fn column(self) -> &'static str {
        match self {
            Self::Category => "risk_category",
            Self::Flood => "flood_risk_score",
            Self::Groundwater => "gw_stress_score",
            Self::Compound => "compound_score",
        }
    }

    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Category)
    }

    /// Human-readable layer name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Risk Category",
            Self::Flood => "Flood Pressure",
            Self::Groundwater => "Groundwater Stress",
            Self::Compound => "Compound Risk",
        }
    }

    /// Stable identifier for element ids and option values.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Flood => "flood",
            Self::Groundwater => "groundwater",
            Self::Compound => "compound",
        }
    }
}
