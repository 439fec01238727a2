//! The packed-byte raster and its in-place transformations.
//!
//! A [`Pixmap`] owns exactly `height * scanline_bytes` bytes of row-major
//! pixel data. Sampling is stateless; the transforming operations
//! (`scale`, `to_grayscale`, `rotate_*`, ...) replace the pixmap's
//! contents in place. Output sinks (PPM, ASCII art) live in their own
//! modules.

mod ascii;
mod ppm;

pub use ascii::ASCII_GLYPHS;

use log::warn;

use crate::color::{self, ColorType, Rgba};
use crate::decode::Ihdr;
use crate::error::{Error, Result};

/// Maximum supported width or height for pixmap operations.
const MAX_DIMENSION: u32 = 1 << 24;

/// How `scale` interpolates between source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling; works for both shrinking and enlarging.
    #[default]
    Nearest,
    /// Bilinear interpolation.
    Bilinear,
    /// Bicubic interpolation. Accepted but not implemented.
    Bicubic,
}

/// A densely packed row-major raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    color_type: ColorType,
    bit_depth: u8,
    data: Vec<u8>,
}

impl Pixmap {
    /// Create a zeroed 8-bit pixmap.
    pub fn new(width: u32, height: u32, color_type: ColorType) -> Result<Pixmap> {
        Pixmap::from_raw(
            width,
            height,
            color_type,
            vec![0u8; expected_len(width, height, color_type)?],
        )
    }

    /// Wrap an existing 8-bit pixel buffer.
    pub fn from_raw(
        width: u32,
        height: u32,
        color_type: ColorType,
        data: Vec<u8>,
    ) -> Result<Pixmap> {
        let expected = expected_len(width, height, color_type)?;
        if data.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Pixmap {
            width,
            height,
            color_type,
            bit_depth: 8,
            data,
        })
    }

    /// Receive the reconstructed scanline stream from the decoder.
    pub(crate) fn from_decoded(ihdr: &Ihdr, data: Vec<u8>) -> Result<Pixmap> {
        let expected = ihdr.scanline_bytes() * ihdr.height as usize;
        if data.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Pixmap {
            width: ihdr.width,
            height: ihdr.height,
            color_type: ihdr.color_type,
            bit_depth: ihdr.bit_depth,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// Samples per pixel.
    pub fn n_channels(&self) -> usize {
        self.color_type.channels()
    }

    /// The raw pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes per pixel.
    pub fn pixel_bytes(&self) -> usize {
        let bytes_per_sample = if self.bit_depth > 8 { 2 } else { 1 };
        self.n_channels() * bytes_per_sample
    }

    /// Bytes per row.
    pub fn scanline_bytes(&self) -> usize {
        let bits = self.width as usize * self.n_channels() * self.bit_depth as usize;
        bits.div_ceil(8)
    }

    /// Borrow the bytes of the pixel at `(x, y)`. Callers pass in-range
    /// coordinates.
    fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let bpp = self.pixel_bytes();
        let idx = y as usize * self.scanline_bytes() + x as usize * bpp;
        &self.data[idx..idx + bpp]
    }

    fn pixel_to_rgba(&self, px: &[u8]) -> Rgba {
        match self.n_channels() {
            1 => Rgba::new(px[0], px[0], px[0], 255),
            2 => Rgba::new(px[0], px[0], px[0], px[1]),
            3 => Rgba::new(px[0], px[1], px[2], 255),
            _ => Rgba::new(px[0], px[1], px[2], px[3]),
        }
    }

    /// Sample the pixel at integer coordinates, clamping out-of-range
    /// values into the raster (with a warning).
    pub fn sample(&self, x: u32, y: u32) -> Rgba {
        let (mut px, mut py) = (x, y);
        if px >= self.width || py >= self.height {
            warn!(
                "sample ({x}, {y}) outside {}x{} pixmap, clamping",
                self.width, self.height
            );
            px = px.min(self.width - 1);
            py = py.min(self.height - 1);
        }
        self.pixel_to_rgba(self.pixel(px, py))
    }

    /// Sample at normalized coordinates in `[0, 1]`, clamping out-of-range
    /// values first (with a warning).
    ///
    /// The coordinate maps to `round(x * width)` / `round(y * height)`,
    /// clamped onto the raster, so `1.0` addresses the last column/row.
    pub fn sample_normalized(&self, x: f32, y: f32) -> Rgba {
        let (mut nx, mut ny) = (x, y);
        if !(0.0..=1.0).contains(&nx) || !(0.0..=1.0).contains(&ny) || nx.is_nan() || ny.is_nan() {
            warn!("normalized sample ({x}, {y}) outside [0, 1], clamping");
            nx = color::clamp(0.0, 1.0, if nx.is_nan() { 0.0 } else { nx });
            ny = color::clamp(0.0, 1.0, if ny.is_nan() { 0.0 } else { ny });
        }
        let px = ((nx * self.width as f32).round() as u32).min(self.width - 1);
        let py = ((ny * self.height as f32).round() as u32).min(self.height - 1);
        self.pixel_to_rgba(self.pixel(px, py))
    }

    /// Resize in place to `new_width` x `new_height`.
    ///
    /// Width and height are adjusted independently; the same call can
    /// shrink one axis while enlarging the other.
    pub fn scale(&mut self, new_width: u32, new_height: u32, method: ScaleMethod) -> Result<()> {
        if new_width == 0 || new_height == 0 {
            return Err(Error::InvalidDimensions {
                width: new_width,
                height: new_height,
            });
        }
        if new_width > MAX_DIMENSION || new_height > MAX_DIMENSION {
            return Err(Error::ImageTooLarge {
                width: new_width,
                height: new_height,
                max: MAX_DIMENSION,
            });
        }

        let out = match method {
            ScaleMethod::Nearest => self.scale_nearest(new_width, new_height),
            ScaleMethod::Bilinear => self.scale_bilinear(new_width, new_height),
            ScaleMethod::Bicubic => {
                return Err(Error::UnsupportedFormat(
                    "bicubic scaling is not implemented".into(),
                ));
            }
        };

        self.data = out;
        self.width = new_width;
        self.height = new_height;
        Ok(())
    }

    fn scale_nearest(&self, new_width: u32, new_height: u32) -> Vec<u8> {
        let bpp = self.pixel_bytes();
        let mut out = vec![0u8; new_width as usize * new_height as usize * bpp];

        for dst_y in 0..new_height {
            // Nearest-neighbor through the normalized coordinate space:
            // (x / new_width, y / new_height) rounded onto the source.
            let src_y = ((dst_y as f32 / new_height as f32 * self.height as f32).round()
                as u32)
                .min(self.height - 1);
            for dst_x in 0..new_width {
                let src_x = ((dst_x as f32 / new_width as f32 * self.width as f32).round()
                    as u32)
                    .min(self.width - 1);

                let src = (src_y as usize * self.width as usize + src_x as usize) * bpp;
                let dst = (dst_y as usize * new_width as usize + dst_x as usize) * bpp;
                out[dst..dst + bpp].copy_from_slice(&self.data[src..src + bpp]);
            }
        }
        out
    }

    /// Separable bilinear: resample every source row to the target width,
    /// then blend pairs of resampled rows down to the target height. The
    /// per-axis tap tables are computed once instead of per pixel.
    fn scale_bilinear(&self, new_width: u32, new_height: u32) -> Vec<u8> {
        let bpp = self.pixel_bytes();
        let src_h = self.height as usize;
        let (dst_w, dst_h) = (new_width as usize, new_height as usize);

        let cols = axis_taps(self.width as usize, dst_w);
        let rows = axis_taps(src_h, dst_h);

        // Horizontal pass, kept in f32 so the vertical pass rounds once.
        let wide_stride = dst_w * bpp;
        let mut wide = vec![0.0f32; src_h * wide_stride];
        for (row, out_row) in self
            .data
            .chunks_exact(self.scanline_bytes())
            .zip(wide.chunks_exact_mut(wide_stride))
        {
            for (tap, out_px) in cols.iter().zip(out_row.chunks_exact_mut(bpp)) {
                let lo = &row[tap.lo * bpp..tap.lo * bpp + bpp];
                let hi = &row[tap.hi * bpp..tap.hi * bpp + bpp];
                for c in 0..bpp {
                    out_px[c] = color::lerp(f32::from(lo[c]), f32::from(hi[c]), tap.t);
                }
            }
        }

        // Vertical pass.
        let mut out = vec![0u8; dst_h * wide_stride];
        for (tap, dst_row) in rows.iter().zip(out.chunks_exact_mut(wide_stride)) {
            let above = &wide[tap.lo * wide_stride..(tap.lo + 1) * wide_stride];
            let below = &wide[tap.hi * wide_stride..(tap.hi + 1) * wide_stride];
            for (k, dst) in dst_row.iter_mut().enumerate() {
                *dst = color::lerp(above[k], below[k], tap.t)
                    .round()
                    .clamp(0.0, 255.0) as u8;
            }
        }
        out
    }

    /// Convert to the decoder's darkness-in-alpha grayscale form.
    ///
    /// RGB goes to black and the alpha channel receives the inverted luma
    /// (`255 - 0.30r - 0.59g - 0.11b`); 3-channel pixmaps are promoted to
    /// 4 channels first. The ASCII renderer keys off this encoding.
    pub fn to_grayscale(&mut self) -> Result<()> {
        let (w, h) = (self.width as usize, self.height as usize);
        match self.n_channels() {
            3 => {
                let mut out = vec![0u8; w * h * 4];
                for (src, dst) in self.data.chunks_exact(3).zip(out.chunks_exact_mut(4)) {
                    dst[3] = inverted_luma(src[0], src[1], src[2]);
                }
                self.data = out;
                self.color_type = ColorType::Rgba;
            }
            4 => {
                for px in self.data.chunks_exact_mut(4) {
                    px[3] = inverted_luma(px[0], px[1], px[2]);
                    px[0] = 0;
                    px[1] = 0;
                    px[2] = 0;
                }
            }
            n => {
                return Err(Error::UnsupportedFormat(format!(
                    "grayscale conversion needs 3 or 4 channels, pixmap has {n}"
                )));
            }
        }
        Ok(())
    }

    /// Conventional grayscale: set R, G, and B to the BT.601 luma, leaving
    /// alpha untouched.
    pub fn to_luma(&mut self) -> Result<()> {
        let bpp = match self.n_channels() {
            3 => 3,
            4 => 4,
            n => {
                return Err(Error::UnsupportedFormat(format!(
                    "luma conversion needs 3 or 4 channels, pixmap has {n}"
                )));
            }
        };
        for px in self.data.chunks_exact_mut(bpp) {
            let luma = color::luma601(px[0], px[1], px[2]);
            px[0] = luma;
            px[1] = luma;
            px[2] = luma;
        }
        Ok(())
    }

    /// Threshold to pure black and white on BT.601 luma.
    ///
    /// `threshold` is a normalized luma in `[0, 1]`; finite out-of-range
    /// values are clamped with a warning, NaN is rejected. Alpha, when
    /// present, is preserved.
    pub fn to_monochrome(&mut self, threshold: f32) -> Result<()> {
        let bpp = match self.n_channels() {
            3 => 3,
            4 => 4,
            n => {
                return Err(Error::UnsupportedFormat(format!(
                    "monochrome conversion needs 3 or 4 channels, pixmap has {n}"
                )));
            }
        };
        if threshold.is_nan() {
            // There is no meaningful value to clamp NaN to.
            return Err(Error::InvalidArgument(
                "monochrome threshold is NaN".into(),
            ));
        }
        let mut t = threshold;
        if !(0.0..=1.0).contains(&t) {
            warn!("monochrome threshold {threshold} outside [0, 1], clamping");
            t = color::clamp(0.0, 1.0, t);
        }
        let cutoff = (t * 255.0).round() as u8;

        for px in self.data.chunks_exact_mut(bpp) {
            let value = if color::luma601(px[0], px[1], px[2]) >= cutoff {
                255
            } else {
                0
            };
            px[0] = value;
            px[1] = value;
            px[2] = value;
        }
        Ok(())
    }

    /// Rotate 90° clockwise. The raster becomes `height x width`; the
    /// source pixel `(x, y)` lands at `(height - 1 - y, x)`.
    pub fn rotate_cw(&mut self) {
        self.rotate_into(|x, y, w, h| {
            let _ = w;
            (h - 1 - y, x)
        });
    }

    /// Rotate 90° counter-clockwise: `(x, y)` lands at `(y, width - 1 - x)`.
    pub fn rotate_ccw(&mut self) {
        self.rotate_into(|x, y, w, h| {
            let _ = h;
            (y, w - 1 - x)
        });
    }

    /// Apply a quarter-turn permutation. The mapping must be a bijection
    /// from the `w x h` domain onto the `h x w` codomain; both quarter
    /// turns are, so no pixel is dropped or written twice.
    fn rotate_into(&mut self, map: impl Fn(usize, usize, usize, usize) -> (usize, usize)) {
        let bpp = self.pixel_bytes();
        let (w, h) = (self.width as usize, self.height as usize);
        let new_w = h;
        let mut out = vec![0u8; self.data.len()];

        for y in 0..h {
            for x in 0..w {
                let (nx, ny) = map(x, y, w, h);
                debug_assert!(nx < new_w && ny < w);
                let src = (y * w + x) * bpp;
                let dst = (ny * new_w + nx) * bpp;
                out[dst..dst + bpp].copy_from_slice(&self.data[src..src + bpp]);
            }
        }

        self.data = out;
        self.width = h as u32;
        self.height = w as u32;
    }
}

/// One destination coordinate's source neighbors along a single axis.
struct AxisTap {
    lo: usize,
    hi: usize,
    t: f32,
}

/// Map a destination axis onto a source axis, endpoint-aligned: the first
/// and last destination samples land exactly on the first and last source
/// samples, with interior samples spaced evenly between them.
fn axis_taps(src: usize, dst: usize) -> Vec<AxisTap> {
    let step = if dst > 1 {
        (src - 1) as f32 / (dst - 1) as f32
    } else {
        0.0
    };
    (0..dst)
        .map(|i| {
            let pos = i as f32 * step;
            let lo = (pos.floor() as usize).min(src - 1);
            AxisTap {
                lo,
                hi: (lo + 1).min(src - 1),
                t: pos - lo as f32,
            }
        })
        .collect()
}

/// `255 - round(0.30r + 0.59g + 0.11b)`.
fn inverted_luma(r: u8, g: u8, b: u8) -> u8 {
    let luma = 0.30 * f32::from(r) + 0.59 * f32::from(g) + 0.11 * f32::from(b);
    255 - luma.round().min(255.0) as u8
}

fn expected_len(width: u32, height: u32, color_type: ColorType) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::ImageTooLarge {
            width,
            height,
            max: MAX_DIMENSION,
        });
    }
    Ok(width as usize * height as usize * color_type.bytes_per_pixel())
}
