//! Color classification for risk display.

mod color;
mod scheme;

pub use color::Rgb;
pub use scheme::{Band, ColorScheme};
