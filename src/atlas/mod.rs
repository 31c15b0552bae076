//! The in-memory risk dataset and its derived views.

mod atlas;
mod io;
mod normalize;
mod overlay;
mod record;
mod select;
mod trend;

pub use atlas::{Atlas, DATASET_CANDIDATES};
pub use overlay::Overlay;
pub use record::{BlockRecord, RiskCategory};
pub use select::Selection;
pub use trend::{project_trend, TrendProjection, TREND_WINDOW};
