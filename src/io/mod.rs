//! Low-level readers and writers.

pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod proj;
pub(crate) mod svg;
