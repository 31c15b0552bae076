//! Polygon drawing for choropleth SVGs.

use std::io::Write;

use anyhow::Result;
use geo::{Coord, CoordsIter, LineString, MultiPolygon};

use crate::style::Rgb;

/// Projection function: lon/lat -> SVG coords (x,y)
pub(crate) type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Draw filled polygons, each wrapped in a group carrying a tooltip title.
pub(crate) fn draw_polygons(
    writer: &mut impl Write,
    polygons: &[MultiPolygon<f64>],
    colors: &[Rgb],
    titles: &[String],
    project: &Projection,
) -> Result<()> {
    assert_eq!(
        colors.len(),
        polygons.len(),
        "[io::svg] length mismatch: {} colors for {} geometries",
        colors.len(),
        polygons.len(),
    );
    assert_eq!(titles.len(), polygons.len());

    for ((polygon, color), title) in polygons.iter().zip(colors).zip(titles) {
        writeln!(writer, r#"<g class="blk">"#)?;
        writeln!(writer, "<title>{}</title>", escape_xml(title))?;
        writeln!(
            writer,
            r#"<path d="{}" fill="{}"/>"#,
            multipolygon_to_path(polygon, project),
            color,
        )?;
        writeln!(writer, "</g>")?;
    }

    Ok(())
}

/// Escape text for embedding in XML/HTML, including attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), project));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, project));
        }
    }

    out
}

/// Build a compact SVG path string for a LineString (ring).
fn ring_to_path(ring: &LineString<f64>, project: &Projection) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter().map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn path_closes_each_ring() {
        let shape = MultiPolygon(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ]]);
        let identity = |c: &Coord<f64>| (c.x, c.y);
        let path = multipolygon_to_path(&shape, &identity);
        assert!(path.starts_with(" M0.000,0.000"));
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn titles_are_escaped() {
        assert_eq!(escape_xml("A & B <C>"), "A &amp; B &lt;C&gt;");
        assert_eq!(escape_xml(r#"O"Brien"#), "O&quot;Brien");
    }
}
