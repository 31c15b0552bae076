//! Choropleth SVG rendering.

use std::{io::Write, path::Path};

use anyhow::Result;
use geo::{Coord, Rect};

use crate::{
    atlas::{Atlas, Overlay, Selection},
    io::svg::{
        draw_polygons, write_svg_footer, write_svg_header, write_svg_styles, SvgStringWriter,
        SvgWriter,
    },
    style::{ColorScheme, Rgb},
};

/// How far a focused block's box is inflated to give map context.
const FOCUS_BUFFER: f64 = 1.5;

/// Margin around the drawing, in SVG pixels.
const MARGIN: f64 = 10.0;

impl Atlas {
    /// Render one overlay as an SVG file.
    pub fn render_svg(
        &self,
        path: &Path,
        overlay: Overlay,
        scheme: &ColorScheme,
        selection: &Selection,
        width: u32,
    ) -> Result<()> {
        let mut writer = SvgWriter::new(path)?;
        self.render_overlay(&mut writer, overlay, scheme, selection, width)?;
        writer.flush()?;
        Ok(())
    }

    /// Render one overlay as an SVG string (embedded by the dashboard page).
    pub fn render_svg_string(
        &self,
        overlay: Overlay,
        scheme: &ColorScheme,
        selection: &Selection,
        width: u32,
    ) -> Result<String> {
        let mut writer = SvgStringWriter::new();
        self.render_overlay(&mut writer, overlay, scheme, selection, width)?;
        writer.into_string()
    }

    fn render_overlay(
        &self,
        writer: &mut impl Write,
        overlay: Overlay,
        scheme: &ColorScheme,
        selection: &Selection,
        width: u32,
    ) -> Result<()> {
        let bounds = self.frame_bounds(selection)?;

        let width = f64::from(width.max(1));
        let span_x = bounds.width().max(1e-9);
        let span_y = bounds.height().max(1e-9);
        let scale = (width - 2.0 * MARGIN) / span_x;
        let height = span_y * scale + 2.0 * MARGIN;

        // Map lon/lat -> SVG coords (preserve aspect, Y down).
        let project = move |coord: &Coord<f64>| -> (f64, f64) {
            let x = MARGIN + (coord.x - bounds.min().x) * scale;
            let y = MARGIN + (bounds.max().y - coord.y) * scale;
            (x, y)
        };

        write_svg_header(writer, width, height)?;
        write_svg_styles(writer)?;
        draw_polygons(
            writer,
            self.geoms(),
            &self.overlay_colors(overlay, scheme),
            &self.overlay_titles(overlay),
            &project,
        )?;
        write_svg_footer(writer)?;
        Ok(())
    }

    /// Fill color for every block under the given overlay.
    pub fn overlay_colors(&self, overlay: Overlay, scheme: &ColorScheme) -> Vec<Rgb> {
        (0..self.len())
            .map(|idx| {
                if overlay.is_categorical() {
                    scheme.category_color(self.category_at(idx))
                } else {
                    scheme.band_color(self.score_at(overlay.column(), idx))
                }
            })
            .collect()
    }

    /// Tooltip line for every block: name plus the overlay's value.
    fn overlay_titles(&self, overlay: Overlay) -> Vec<String> {
        (0..self.len())
            .map(|idx| {
                let name = self.name_at(idx);
                if overlay.is_categorical() {
                    format!("{name}: {}", self.category_at(idx).as_str())
                } else {
                    match self.score_at(overlay.column(), idx) {
                        Some(value) => format!("{name}: {value:.2}"),
                        None => format!("{name}: unavailable"),
                    }
                }
            })
            .collect()
    }

    /// Viewport for a selection: the whole region, or the focused block's
    /// box inflated for context.
    fn frame_bounds(&self, selection: &Selection) -> Result<Rect<f64>> {
        match selection {
            Selection::AllBlocks => self.bounds(),
            Selection::Block(name) => match self.row_of(name) {
                Some(idx) => Ok(inflate(self.block_bounds(idx)?, FOCUS_BUFFER)),
                None => self.bounds(),
            },
        }
    }
}

fn inflate(rect: Rect<f64>, factor: f64) -> Rect<f64> {
    let pad_x = rect.width().max(1e-9) * factor / 2.0;
    let pad_y = rect.height().max(1e-9) * factor / 2.0;
    Rect::new(
        Coord {
            x: rect.min().x - pad_x,
            y: rect.min().y - pad_y,
        },
        Coord {
            x: rect.max().x + pad_x,
            y: rect.max().y + pad_y,
        },
    )
}
