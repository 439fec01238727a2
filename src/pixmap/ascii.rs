//! ASCII-art rendering.
//!
//! One output line per pixmap row, one glyph per pixel, drawn from a
//! 10-step density ramp. 3-channel input maps BT.709 luma onto the ramp
//! directly; 4-channel input is assumed to carry darkness in its alpha
//! channel (the [`to_grayscale`](super::Pixmap::to_grayscale) encoding)
//! and is inverted back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::pixmap::Pixmap;

/// Density ramp, lightest to darkest.
pub const ASCII_GLYPHS: [u8; 10] = *b" .:-=+*#%@";

impl Pixmap {
    /// Render the pixmap as ASCII art into `out`.
    ///
    /// Emits `height` lines of `width` glyphs, each line terminated by a
    /// newline.
    pub fn to_ascii<W: Write>(&self, out: &mut W) -> Result<()> {
        let channels = self.n_channels();
        if channels != 3 && channels != 4 {
            return Err(Error::UnsupportedFormat(format!(
                "ASCII rendering needs 3 or 4 channels, pixmap has {channels}"
            )));
        }

        let mut line = Vec::with_capacity(self.width() as usize + 1);
        for row in self.data().chunks_exact(self.scanline_bytes()) {
            line.clear();
            for px in row.chunks_exact(channels) {
                line.push(ASCII_GLYPHS[glyph_index(px, channels)]);
            }
            line.push(b'\n');
            out.write_all(&line)?;
        }
        Ok(())
    }

    /// Render ASCII art into a file at `path`.
    pub fn write_ascii_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.to_ascii(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

fn glyph_index(px: &[u8], channels: usize) -> usize {
    let idx = if channels == 3 {
        let luma = 0.2126 * (f32::from(px[0]) / 255.0)
            + 0.7152 * (f32::from(px[1]) / 255.0)
            + 0.0722 * (f32::from(px[2]) / 255.0);
        (luma * 10.0).round() as i32 - 1
    } else {
        // Alpha encodes darkness; flip it back onto the ramp.
        let luma = f32::from(px[3]) / 255.0 + 0.193;
        10 - ((luma * 10.0).round() as i32 - 1)
    };
    idx.clamp(0, 9) as usize
}
