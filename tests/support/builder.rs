//! Hand-rolled PNG byte-stream construction for decoder tests.
//!
//! Building the container by hand keeps full control over chunk layout,
//! filter bytes, and deliberate corruption; well-formed reference images
//! come from the `png` crate instead (see `encode_reference`).

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

pub const MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Frame a chunk. The CRC field is filled with zeros: the decoder under
/// test does not verify CRCs, and the tests rely on that contract.
pub fn chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    out.extend_from_slice(&[0u8; 4]);
    out
}

/// The 13-byte IHDR payload for an 8-bit non-interlaced image.
pub fn ihdr_payload(width: u32, height: u32, color: u8) -> Vec<u8> {
    ihdr_payload_depth(width, height, 8, color)
}

pub fn ihdr_payload_depth(width: u32, height: u32, bit_depth: u8, color: u8) -> Vec<u8> {
    let mut p = Vec::with_capacity(13);
    p.extend_from_slice(&width.to_be_bytes());
    p.extend_from_slice(&height.to_be_bytes());
    p.extend_from_slice(&[bit_depth, color, 0, 0, 0]);
    p
}

/// zlib-compress a filtered scanline stream.
pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

/// Prefix each scanline with its filter-type byte.
pub fn filtered_rows(rows: &[(u8, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (filter, row) in rows {
        out.push(*filter);
        out.extend_from_slice(row);
    }
    out
}

/// A minimal PNG: magic, IHDR, one IDAT holding the deflated stream, IEND.
pub fn png(width: u32, height: u32, color: u8, raw: &[u8]) -> Vec<u8> {
    let mut out = MAGIC.to_vec();
    out.extend(chunk(b"IHDR", &ihdr_payload(width, height, color)));
    out.extend(chunk(b"IDAT", &zlib(raw)));
    out.extend(chunk(b"IEND", &[]));
    out
}

/// Like [`png`] but with the compressed stream split across `parts`
/// consecutive IDAT chunks.
pub fn png_split_idat(width: u32, height: u32, color: u8, raw: &[u8], parts: usize) -> Vec<u8> {
    let compressed = zlib(raw);
    let mut out = MAGIC.to_vec();
    out.extend(chunk(b"IHDR", &ihdr_payload(width, height, color)));

    let part_len = compressed.len().div_ceil(parts);
    for piece in compressed.chunks(part_len.max(1)) {
        out.extend(chunk(b"IDAT", piece));
    }
    out.extend(chunk(b"IEND", &[]));
    out
}

/// Encode a well-formed reference PNG with the `png` crate, exercising a
/// specific filter strategy.
pub fn encode_reference(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: png::ColorType,
    filter: png::FilterType,
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_filter(filter);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
    }
    out
}
