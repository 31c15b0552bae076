//! Risk atlas: load a block-level risk dataset and derive choropleth
//! overlays, trend projections, and per-block exports.

pub mod atlas;
pub mod cli;
pub mod commands;
mod io;
pub mod style;

#[doc(inline)]
pub use atlas::{project_trend, Atlas, BlockRecord, Overlay, RiskCategory, Selection};

#[doc(inline)]
pub use style::{Band, ColorScheme, Rgb};
