//! Binary PPM (P6) export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::color::{blend, Rgb};
use crate::error::{Error, Result};
use crate::pixmap::Pixmap;

impl Pixmap {
    /// Write the pixmap as a binary PPM (P6) stream.
    ///
    /// The header is `P6\n<width> <height>\n<maxval>\n` followed by raw
    /// RGB triples, row-major. 4-channel pixels are alpha-blended against
    /// `bg` since PPM has no alpha plane.
    pub fn to_ppm<W: Write>(&self, out: &mut W, bg: Rgb) -> Result<()> {
        let channels = self.n_channels();
        if channels != 3 && channels != 4 {
            return Err(Error::UnsupportedFormat(format!(
                "PPM export needs 3 or 4 channels, pixmap has {channels}"
            )));
        }

        let maxval = (1u32 << self.bit_depth()) - 1;
        write!(out, "P6\n{} {}\n{}\n", self.width(), self.height(), maxval)?;

        if channels == 3 {
            out.write_all(self.data())?;
        } else {
            let mut row = Vec::with_capacity(self.width() as usize * 3);
            for scanline in self.data().chunks_exact(self.scanline_bytes()) {
                row.clear();
                for px in scanline.chunks_exact(4) {
                    let fg = Rgb::new(px[0], px[1], px[2]);
                    let blended = blend(fg, bg, px[3]);
                    row.extend_from_slice(&[blended.r, blended.g, blended.b]);
                }
                out.write_all(&row)?;
            }
        }
        Ok(())
    }

    /// Write a PPM file at `path`.
    pub fn write_ppm_file(&self, path: impl AsRef<Path>, bg: Rgb) -> Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.to_ppm(&mut out, bg)?;
        out.flush()?;
        Ok(())
    }
}
