//! Reprojection of source geometries into geographic coordinates.

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};

/// EPSG codes already in latitude/longitude degrees.
pub(crate) fn is_geographic(epsg: u32) -> bool {
    matches!(epsg, 4326 | 4269 | 4937)
}

/// PROJ.4 string for a supported projected source CRS.
fn source_proj4(epsg: u32) -> Result<String> {
    match epsg {
        // WGS84 UTM, north and south.
        32601..=32660 => Ok(format!(
            "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs +type=crs",
            epsg - 32600
        )),
        32701..=32760 => Ok(format!(
            "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs +type=crs",
            epsg - 32700
        )),
        // NAD83 UTM (north only).
        26901..=26923 => Ok(format!(
            "+proj=utm +zone={} +datum=NAD83 +units=m +no_defs +type=crs",
            epsg - 26900
        )),
        _ => bail!("[io::proj] Unsupported source CRS: EPSG:{epsg}"),
    }
}

/// Reproject shapes from a projected CRS into lon/lat degrees (WGS84).
/// Runs once at load time; downstream code assumes geographic coordinates.
pub(crate) fn reproject_to_geographic(
    shapes: &[MultiPolygon<f64>],
    epsg: u32,
) -> Result<Vec<MultiPolygon<f64>>> {
    let from = {
        let proj_string = source_proj4(epsg)?;
        Proj4::from_proj_string(&proj_string)
            .with_context(|| anyhow!("[io::proj] failed to build source PROJ.4: {proj_string}"))?
    };
    let to = Proj4::from_proj_string("+proj=longlat +datum=WGS84 +no_defs +type=crs")
        .context("[io::proj] failed to build target PROJ.4")?;

    // Meters in, radians out.
    shapes
        .iter()
        .map(|shape| {
            shape.try_map_coords(|coord: Coord<f64>| {
                let mut point = (coord.x, coord.y, 0.0);
                transform(&from, &to, &mut point)
                    .map_err(|e| anyhow!("[io::proj] CRS transform failed: {e}"))?;
                Ok(Coord {
                    x: point.0.to_degrees(),
                    y: point.1.to_degrees(),
                })
            })
        })
        .collect()
}
