//! SVG document writers.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

/// File-backed SVG writer.
pub(crate) struct SvgWriter {
    writer: BufWriter<File>,
}

/// In-memory SVG writer (for page embedding and tests).
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>,
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SvgWriter {
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl SvgStringWriter {
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer).context("[io::svg] SVG output is not valid UTF-8")
    }
}

/// Write the XML declaration and opening <svg> tag.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    writeln!(
        writer,
        r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##
    )?;
    writeln!(
        writer,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"##
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// Write shared styles for map features.
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        r##"<defs>
<style>
    .blk {{ stroke: #ffffff; stroke-width: 0.5; fill-opacity: 0.7; }}
</style>
</defs>"##
    )?;
    Ok(())
}

/// Write the closing </svg> tag.
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}
