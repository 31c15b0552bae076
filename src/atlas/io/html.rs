//! Self-contained dashboard page.
//!
//! One HTML file, no network: the overlay SVGs, the block selector, the
//! per-block metric panel, the trend sparkline, and the CSV downloads are
//! all embedded at generation time.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::json;

use crate::{
    atlas::{project_trend, Atlas, Overlay, Selection},
    io::svg::escape_xml,
    style::ColorScheme,
};

/// Width of the embedded overlay maps, in pixels.
const MAP_WIDTH: u32 = 800;

impl Atlas {
    /// Write the dashboard page to a file.
    pub fn write_page(&self, path: &Path, scheme: &ColorScheme, final_year: i32) -> Result<()> {
        let page = self.page_string(scheme, final_year)?;
        fs::write(path, page)
            .with_context(|| format!("[atlas] Failed to write page to {}", path.display()))
    }

    /// Build the dashboard page as a string.
    pub fn page_string(&self, scheme: &ColorScheme, final_year: i32) -> Result<String> {
        let selection = Selection::AllBlocks;

        let mut overlay_options = String::new();
        let mut overlay_divs = String::new();
        for (i, overlay) in Overlay::ALL.iter().enumerate() {
            let svg = self.render_svg_string(*overlay, scheme, &selection, MAP_WIDTH)?;
            overlay_options.push_str(&format!(
                "<option value=\"{}\">{}</option>",
                overlay.slug(),
                overlay.label(),
            ));
            overlay_divs.push_str(&format!(
                "<div class=\"overlay\" id=\"overlay-{}\"{}>{}</div>\n",
                overlay.slug(),
                if i == 0 { "" } else { " style=\"display:none\"" },
                svg,
            ));
        }

        let mut block_options = String::new();
        let mut blocks = serde_json::Map::new();
        for name in self.block_names() {
            let Some(record) = self.record(name) else { continue };
            let trend: Option<Vec<(i32, f64)>> = record
                .compound_score
                .zip(record.degradation_rate)
                .map(|(score, rate)| project_trend(score, rate, final_year).collect());
            let csv = self.export_csv_string(name)?;
            block_options.push_str(&format!(
                "<option value=\"{0}\">{0}</option>",
                escape_xml(name),
            ));
            blocks.insert(
                name.to_string(),
                json!({ "record": record, "trend": trend, "csv": csv }),
            );
        }

        // "</" must not appear inside an inline <script> block.
        let data = serde_json::to_string(&json!({ "blocks": blocks }))?.replace("</", "<\\/");

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Risk Atlas</title>
<style>{css}</style>
</head>
<body>
<div class="container">
<h1>Risk Atlas</h1>
<div class="controls">
<label for="overlay">Overlay</label>
<select id="overlay">{overlay_options}</select>
<label for="block">Block</label>
<select id="block"><option value="">All blocks</option>{block_options}</select>
</div>
<div class="layout">
<div class="map">
{overlay_divs}</div>
<aside class="detail">
<h2 id="detail-name">Whole region</h2>
<dl id="metrics"></dl>
<svg id="trend" viewBox="0 0 300 90" width="300" height="90"></svg>
<a id="download" download hidden>Download CSV</a>
<p id="hint">Pick a block to see its metrics.</p>
</aside>
</div>
</div>
<script>const DATA = {data};</script>
<script>{js}</script>
</body>
</html>
"#,
            css = inline_css(),
            js = inline_js(),
        ))
    }
}

fn inline_css() -> &'static str {
    r##"
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #111827; }
.container { max-width: 1200px; margin: 0 auto; padding: 16px; }
.controls { display: flex; gap: 8px; align-items: center; margin-bottom: 12px; }
.layout { display: flex; gap: 16px; align-items: flex-start; }
.map { flex: 3; background: #ffffff; border: 1px solid #e5e7eb; }
.map svg { width: 100%; height: auto; display: block; }
.detail { flex: 1; background: #ffffff; border: 1px solid #e5e7eb; padding: 12px; }
dl { display: grid; grid-template-columns: auto auto; gap: 2px 12px; }
dt { color: #6b7280; }
dd { margin: 0; text-align: right; font-variant-numeric: tabular-nums; }
"##
}

fn inline_js() -> &'static str {
    r##"
const overlaySelect = document.getElementById('overlay');
const blockSelect = document.getElementById('block');

function showOverlay() {
  document.querySelectorAll('.overlay').forEach(el => { el.style.display = 'none'; });
  const active = document.getElementById('overlay-' + overlaySelect.value);
  if (active) { active.style.display = 'block'; }
}

function fmt(value, digits) {
  return value == null ? 'unavailable' : value.toFixed(digits || 2);
}

function drawTrend(svg, points) {
  const ys = points.map(p => p[1]);
  const ymin = Math.min(...ys);
  const span = (Math.max(...ys) - ymin) || 1;
  const px = i => 10 + i * (280 / (points.length - 1));
  const py = v => 70 - ((v - ymin) / span) * 60;
  const path = points.map((p, i) => (i ? 'L' : 'M') + px(i).toFixed(1) + ',' + py(p[1]).toFixed(1)).join(' ');
  svg.innerHTML =
    '<path d="' + path + '" fill="none" stroke="#2563eb" stroke-width="2"/>' +
    points.map((p, i) => '<text x="' + px(i).toFixed(1) + '" y="85" text-anchor="middle" font-size="8">' + p[0] + '</text>').join('');
}

function showBlock() {
  const name = blockSelect.value;
  const title = document.getElementById('detail-name');
  const panel = document.getElementById('metrics');
  const trend = document.getElementById('trend');
  const link = document.getElementById('download');
  const hint = document.getElementById('hint');
  trend.innerHTML = '';
  if (!name || !(name in DATA.blocks)) {
    title.textContent = 'Whole region';
    panel.innerHTML = '';
    link.hidden = true;
    hint.hidden = false;
    return;
  }
  hint.hidden = true;
  const entry = DATA.blocks[name];
  const r = entry.record;
  title.textContent = name;
  panel.innerHTML =
    '<dt>Risk category</dt><dd>' + r.risk_category + '</dd>' +
    '<dt>Compound risk</dt><dd>' + fmt(r.compound_score) + '</dd>' +
    '<dt>Flood pressure</dt><dd>' + fmt(r.flood_risk_score) + '</dd>' +
    '<dt>Groundwater stress</dt><dd>' + fmt(r.gw_stress_score) + '</dd>' +
    '<dt>Degradation rate</dt><dd>' + fmt(r.degradation_rate, 3) + '</dd>';
  if (entry.trend) { drawTrend(trend, entry.trend); }
  link.hidden = false;
  link.download = name + '.csv';
  link.href = 'data:text/csv;charset=utf-8,' + encodeURIComponent(entry.csv);
}

overlaySelect.addEventListener('change', showOverlay);
blockSelect.addEventListener('change', showBlock);
showOverlay();
showBlock();
"##
}
