//! Export and rendering surfaces for the atlas.

mod csv;
mod html;
mod svg;
