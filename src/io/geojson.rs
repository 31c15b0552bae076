//! GeoJSON FeatureCollection reading.

use std::{collections::BTreeSet, fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use polars::prelude::*;
use serde_json::{Map, Value};

/// A parsed feature collection: one property row and one geometry per
/// feature, plus the declared coordinate reference system.
#[derive(Debug)]
pub(crate) struct RawDataset {
    pub(crate) table: DataFrame,
    pub(crate) geoms: Vec<MultiPolygon<f64>>,
    pub(crate) epsg: u32,
}

/// Read a GeoJSON file into a raw dataset.
pub(crate) fn read_feature_collection(path: &Path) -> Result<RawDataset> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::geojson] Failed to read {}", path.display()))?;
    parse_feature_collection(&bytes)
        .with_context(|| format!("[io::geojson] Failed to load {}", path.display()))
}

/// Parse GeoJSON bytes into a raw dataset.
pub(crate) fn parse_feature_collection(bytes: &[u8]) -> Result<RawDataset> {
    let value: Value =
        serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON")?;
    let features = value["features"]
        .as_array()
        .ok_or_else(|| anyhow!("[io::geojson] Not a FeatureCollection: no features array"))?;

    let epsg = parse_crs(&value)?;

    let mut geoms = Vec::with_capacity(features.len());
    let mut rows: Vec<Option<&Map<String, Value>>> = Vec::with_capacity(features.len());
    for (idx, feature) in features.iter().enumerate() {
        let geometry = feature
            .get("geometry")
            .and_then(Value::as_object)
            .ok_or_else(|| anyhow!("[io::geojson] Feature {idx} has no geometry"))?;
        let shape = parse_geometry(geometry)
            .with_context(|| format!("[io::geojson] Feature {idx}"))?;
        geoms.push(shape);
        rows.push(feature.get("properties").and_then(Value::as_object));
    }

    let table = properties_to_table(&rows)?;
    Ok(RawDataset { table, geoms, epsg })
}

/// EPSG code from the (legacy, optional) top-level `crs` member.
/// GeoJSON without one is WGS84.
fn parse_crs(value: &Value) -> Result<u32> {
    let Some(name) = value
        .pointer("/crs/properties/name")
        .and_then(Value::as_str)
    else {
        return Ok(4326);
    };

    // "CRS84" is lon/lat WGS84 under another name.
    if name.ends_with("CRS84") {
        return Ok(4326);
    }

    // Accept "EPSG:nnnn" and "urn:ogc:def:crs:EPSG::nnnn" forms.
    let digits: String = name
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if digits.is_empty() {
        bail!("[io::geojson] Unrecognized CRS declaration: {name:?}");
    }
    digits
        .parse()
        .with_context(|| format!("[io::geojson] Bad EPSG code in {name:?}"))
}

/// Build the property table: one column per key seen across all features.
/// A column is Float64 when every non-null value is numeric, String otherwise.
fn properties_to_table(rows: &[Option<&Map<String, Value>>]) -> Result<DataFrame> {
    let mut keys: BTreeSet<&str> = BTreeSet::new();
    for row in rows.iter().flatten() {
        for key in row.keys() {
            keys.insert(key.as_str());
        }
    }

    let mut columns = Vec::with_capacity(keys.len());
    for key in keys {
        let values: Vec<Option<&Value>> = rows
            .iter()
            .map(|row| row.and_then(|map| map.get(key)).filter(|v| !v.is_null()))
            .collect();

        let numeric = values.iter().flatten().all(|v| v.is_number());
        let column: Column = if numeric {
            let floats: Vec<Option<f64>> = values
                .iter()
                .map(|v| v.and_then(Value::as_f64))
                .collect();
            Series::new(key.into(), floats).into()
        } else {
            let strings: Vec<Option<String>> =
                values.iter().map(|v| v.map(json_to_string)).collect();
            Series::new(key.into(), strings).into()
        };
        columns.push(column);
    }

    DataFrame::new(columns).context("[io::geojson] Failed to build property table")
}

fn json_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a GeoJSON geometry object. Polygons are widened to MultiPolygons.
fn parse_geometry(geometry: &Map<String, Value>) -> Result<MultiPolygon<f64>> {
    let ty = geometry.get("type").and_then(Value::as_str).unwrap_or("");
    let coords = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("geometry has no coordinates"))?;

    match ty {
        "Polygon" => Ok(MultiPolygon(vec![parse_polygon_coords(coords)?])),
        "MultiPolygon" => {
            let polygons = coords
                .iter()
                .map(|polygon| {
                    polygon
                        .as_array()
                        .ok_or_else(|| anyhow!("MultiPolygon member is not an array"))
                        .and_then(|rings| parse_polygon_coords(rings))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(MultiPolygon(polygons))
        }
        other => bail!("unsupported geometry type {other:?}"),
    }
}

/// Parse Polygon coordinates: ring 0 is the exterior, the rest are holes.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let exterior = rings
        .first()
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("polygon has no exterior ring"))?;
    let exterior = parse_ring_coords(exterior)?;

    let interiors = rings[1..]
        .iter()
        .map(|ring| {
            ring.as_array()
                .ok_or_else(|| anyhow!("interior ring is not an array"))
                .and_then(|ring| parse_ring_coords(ring))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring: [[x, y], [x, y], ...]. Unclosed rings are closed.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());
    for pair in coords {
        let pair = pair
            .as_array()
            .ok_or_else(|| anyhow!("coordinate is not an array"))?;
        if pair.len() < 2 {
            bail!("coordinate has fewer than two components");
        }
        let x = pair[0]
            .as_f64()
            .ok_or_else(|| anyhow!("coordinate x is not a number"))?;
        let y = pair[1]
            .as_f64()
            .ok_or_else(|| anyhow!("coordinate y is not a number"))?;
        points.push(Coord { x, y });
    }

    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[85.0, 25.0], [85.1, 25.0], [85.1, 25.1], [85.0, 25.1]]]},
                "properties": {"block": "Araria", "compound_risk": 0.82}
            },
            {
                "type": "Feature",
                "geometry": {"type": "MultiPolygon", "coordinates": [[[[86.0, 25.0], [86.1, 25.0], [86.1, 25.1], [86.0, 25.0]]]]},
                "properties": {"block": "Madhepura", "compound_risk": null}
            }
        ]
    }"#;

    #[test]
    fn parses_polygon_and_multipolygon() {
        let raw = parse_feature_collection(FIXTURE.as_bytes()).unwrap();
        assert_eq!(raw.geoms.len(), 2);
        assert_eq!(raw.table.height(), 2);
        assert_eq!(raw.epsg, 4326);
        // Unclosed exterior rings are closed during parsing.
        let exterior = raw.geoms[0].0[0].exterior();
        assert_eq!(exterior.0.first(), exterior.0.last());
    }

    #[test]
    fn numeric_columns_keep_nulls() {
        let raw = parse_feature_collection(FIXTURE.as_bytes()).unwrap();
        let scores = raw.table.column("compound_risk").unwrap().f64().unwrap();
        assert_eq!(scores.get(0), Some(0.82));
        assert_eq!(scores.get(1), None);
    }

    #[test]
    fn mixed_type_columns_become_strings() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1]]]}, "properties": {"block": 7}},
            {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[2,0],[3,0],[3,1]]]}, "properties": {"block": "eight"}}
        ]}"#;
        let raw = parse_feature_collection(json.as_bytes()).unwrap();
        let names = raw.table.column("block").unwrap().str().unwrap();
        assert_eq!(names.get(0), Some("7"));
        assert_eq!(names.get(1), Some("eight"));
    }

    #[test]
    fn reads_legacy_crs_member() {
        let json = r#"{"type": "FeatureCollection",
            "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::32645"}},
            "features": []}"#;
        let raw = parse_feature_collection(json.as_bytes()).unwrap();
        assert_eq!(raw.epsg, 32645);
    }

    #[test]
    fn missing_geometry_is_an_error() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": null, "properties": {"block": "x"}}
        ]}"#;
        let err = parse_feature_collection(json.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("no geometry"));
    }
}
