//! IHDR decoding and format validation.

use crate::color::{ColorType, PALETTE_BIT};
use crate::decode::chunk::Chunk;
use crate::decode::reader::ByteReader;
use crate::error::{Error, Result};

/// Maximum accepted width or height, matching the pixmap layer's limit.
pub const MAX_DIMENSION: u32 = 1 << 24;

/// The decoded image header.
///
/// Fields mirror the 13-byte IHDR payload; `color_type` is resolved to a
/// typed value once the wire code has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ihdr {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}

impl Ihdr {
    /// Decode and validate an IHDR chunk.
    ///
    /// Accepts truecolor (wire code 2) and truecolor-with-alpha (6) at bit
    /// depth 8. Every other legal combination is reported as
    /// [`Error::UnsupportedFormat`]; values outside the format's tables are
    /// [`Error::MalformedChunk`].
    pub fn from_chunk(chunk: &Chunk) -> Result<Ihdr> {
        if chunk.length != 13 || chunk.data.len() != 13 {
            return Err(Error::MalformedChunk(format!(
                "IHDR payload must be 13 bytes, got {}",
                chunk.data.len()
            )));
        }

        let mut r = ByteReader::new(&chunk.data);
        let width = r.read_u32_be()?;
        let height = r.read_u32_be()?;
        let bit_depth = r.read_u8()?;
        let color_code = r.read_u8()?;
        let compression_method = r.read_u8()?;
        let filter_method = r.read_u8()?;
        let interlace_method = r.read_u8()?;

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

        if color_code & PALETTE_BIT != 0 {
            return Err(Error::UnsupportedFormat(
                "indexed-color (palette) images are not supported".into(),
            ));
        }
        let color_type = ColorType::from_wire(color_code).ok_or_else(|| {
            Error::MalformedChunk(format!("invalid color type code {color_code}"))
        })?;
        match color_type {
            ColorType::Rgb | ColorType::Rgba => {}
            ColorType::Gray | ColorType::GrayAlpha => {
                return Err(Error::UnsupportedFormat(format!(
                    "greyscale images (color type {color_code}) are not supported"
                )));
            }
        }

        match bit_depth {
            8 => {}
            16 => {
                return Err(Error::UnsupportedFormat(
                    "16-bit channels are not supported".into(),
                ));
            }
            1 | 2 | 4 => {
                // Legal for greyscale only, and greyscale was rejected above.
                return Err(Error::MalformedChunk(format!(
                    "bit depth {bit_depth} is invalid for color type {color_code}"
                )));
            }
            other => {
                return Err(Error::MalformedChunk(format!(
                    "invalid bit depth {other}"
                )));
            }
        }

        if compression_method != 0 {
            return Err(Error::MalformedChunk(format!(
                "unknown compression method {compression_method}"
            )));
        }
        if filter_method != 0 {
            return Err(Error::MalformedChunk(format!(
                "unknown filter method {filter_method}"
            )));
        }
        match interlace_method {
            0 => {}
            1 => {
                return Err(Error::UnsupportedFormat(
                    "Adam7 interlacing is not supported".into(),
                ));
            }
            other => {
                return Err(Error::MalformedChunk(format!(
                    "invalid interlace method {other}"
                )));
            }
        }

        Ok(Ihdr {
            width,
            height,
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace_method,
        })
    }

    /// Samples per pixel.
    pub fn n_channels(&self) -> usize {
        self.color_type.channels()
    }

    /// Bytes in one unfiltered scanline (no filter-type byte).
    pub fn scanline_bytes(&self) -> usize {
        let bits = self.width as usize * self.n_channels() * self.bit_depth as usize;
        bits.div_ceil(8)
    }

    /// Filter distance in bytes: the offset of the corresponding byte in
    /// the pixel to the left.
    pub fn filter_distance(&self) -> usize {
        let bytes_per_sample = if self.bit_depth > 8 { 2 } else { 1 };
        self.n_channels() * bytes_per_sample
    }

    /// Total size of the inflated stream: one filter byte plus one
    /// scanline, per row.
    pub fn inflated_len(&self) -> usize {
        (self.scanline_bytes() + 1) * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ihdr_chunk(payload: [u8; 13]) -> Chunk {
        Chunk {
            length: 13,
            chunk_type: *b"IHDR",
            data: payload.to_vec(),
            crc: 0,
        }
    }

    fn payload(width: u32, height: u32, bit_depth: u8, color: u8) -> [u8; 13] {
        let mut p = [0u8; 13];
        p[0..4].copy_from_slice(&width.to_be_bytes());
        p[4..8].copy_from_slice(&height.to_be_bytes());
        p[8] = bit_depth;
        p[9] = color;
        p
    }

    #[test]
    fn decodes_truecolor_header() {
        let ihdr = Ihdr::from_chunk(&ihdr_chunk(payload(640, 480, 8, 2))).unwrap();
        assert_eq!(ihdr.width, 640);
        assert_eq!(ihdr.height, 480);
        assert_eq!(ihdr.color_type, ColorType::Rgb);
        assert_eq!(ihdr.n_channels(), 3);
        assert_eq!(ihdr.scanline_bytes(), 640 * 3);
        assert_eq!(ihdr.filter_distance(), 3);
        assert_eq!(ihdr.inflated_len(), (640 * 3 + 1) * 480);
    }

    #[test]
    fn decodes_truecolor_alpha_header() {
        let ihdr = Ihdr::from_chunk(&ihdr_chunk(payload(2, 2, 8, 6))).unwrap();
        assert_eq!(ihdr.color_type, ColorType::Rgba);
        assert_eq!(ihdr.n_channels(), 4);
        assert_eq!(ihdr.filter_distance(), 4);
    }

    #[test]
    fn rejects_palette() {
        let err = Ihdr::from_chunk(&ihdr_chunk(payload(1, 1, 8, 3))).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_greyscale_variants() {
        for color in [0u8, 4] {
            let err = Ihdr::from_chunk(&ihdr_chunk(payload(1, 1, 8, color))).unwrap_err();
            assert!(matches!(err, Error::UnsupportedFormat(_)), "color {color}");
        }
    }

    #[test]
    fn rejects_sixteen_bit_depth() {
        let err = Ihdr::from_chunk(&ihdr_chunk(payload(1, 1, 16, 2))).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_invalid_bit_depth() {
        for depth in [0u8, 3, 7, 32] {
            let err = Ihdr::from_chunk(&ihdr_chunk(payload(1, 1, depth, 2))).unwrap_err();
            assert!(matches!(err, Error::MalformedChunk(_)), "depth {depth}");
        }
    }

    #[test]
    fn rejects_interlaced() {
        let mut p = payload(1, 1, 8, 2);
        p[12] = 1;
        let err = Ihdr::from_chunk(&ihdr_chunk(p)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = Ihdr::from_chunk(&ihdr_chunk(payload(0, 7, 8, 2))).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDimensions {
                width: 0,
                height: 7
            }
        ));
    }

    #[test]
    fn rejects_unknown_compression_and_filter_methods() {
        let mut p = payload(1, 1, 8, 2);
        p[10] = 1;
        assert!(matches!(
            Ihdr::from_chunk(&ihdr_chunk(p)).unwrap_err(),
            Error::MalformedChunk(_)
        ));

        let mut p = payload(1, 1, 8, 2);
        p[11] = 1;
        assert!(matches!(
            Ihdr::from_chunk(&ihdr_chunk(p)).unwrap_err(),
            Error::MalformedChunk(_)
        ));
    }

    #[test]
    fn rejects_wrong_payload_length() {
        let chunk = Chunk {
            length: 12,
            chunk_type: *b"IHDR",
            data: vec![0; 12],
            crc: 0,
        };
        assert!(matches!(
            Ihdr::from_chunk(&chunk).unwrap_err(),
            Error::MalformedChunk(_)
        ));
    }
}
