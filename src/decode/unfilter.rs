//! Per-scanline filter reversal.
//!
//! Each inflated row starts with a filter-type byte followed by the
//! filtered scanline. Reconstruction is stateful across rows: the `a`
//! (left) and `c` (upper-left) reference samples must come from already
//! reconstructed data, never from the filtered bytes. Two row buffers make
//! that invariant explicit: `prev` always holds the prior *reconstructed*
//! row, `cur` is built up left to right so in-row references see
//! reconstructed bytes.

use crate::decode::header::Ihdr;
use crate::error::{Error, Result};
use crate::paeth::paeth_predictor;

/// The five per-scanline filter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth,
}

impl FilterType {
    pub fn from_byte(byte: u8) -> Result<FilterType> {
        match byte {
            0 => Ok(FilterType::None),
            1 => Ok(FilterType::Sub),
            2 => Ok(FilterType::Up),
            3 => Ok(FilterType::Average),
            4 => Ok(FilterType::Paeth),
            other => Err(Error::MalformedChunk(format!(
                "invalid scanline filter type {other}"
            ))),
        }
    }
}

/// Reverse the filter transform over the whole inflated stream, returning
/// the densely packed pixel bytes (`scanline_bytes * height`).
pub fn unfilter(ihdr: &Ihdr, inflated: &[u8]) -> Result<Vec<u8>> {
    let stride = ihdr.scanline_bytes();
    let bpp = ihdr.filter_distance();
    let height = ihdr.height as usize;

    let expected = (stride + 1) * height;
    if inflated.len() != expected {
        return Err(Error::InvalidDataLength {
            expected,
            actual: inflated.len(),
        });
    }

    let mut out = Vec::with_capacity(stride * height);
    let mut prev = vec![0u8; stride];
    let mut cur = vec![0u8; stride];

    for row in 0..height {
        let base = row * (stride + 1);
        let filter = FilterType::from_byte(inflated[base])?;
        let filtered = &inflated[base + 1..base + 1 + stride];

        reconstruct_row(filter, filtered, &prev, &mut cur, bpp);

        out.extend_from_slice(&cur);
        std::mem::swap(&mut prev, &mut cur);
    }

    Ok(out)
}

/// Reconstruct one scanline into `cur`.
///
/// `prev` must be the previous reconstructed row (all zeros for row 0).
fn reconstruct_row(filter: FilterType, filtered: &[u8], prev: &[u8], cur: &mut [u8], bpp: usize) {
    match filter {
        FilterType::None => cur.copy_from_slice(filtered),
        FilterType::Sub => {
            for i in 0..filtered.len() {
                let a = if i < bpp { 0 } else { cur[i - bpp] };
                cur[i] = filtered[i].wrapping_add(a);
            }
        }
        FilterType::Up => {
            for i in 0..filtered.len() {
                cur[i] = filtered[i].wrapping_add(prev[i]);
            }
        }
        FilterType::Average => {
            for i in 0..filtered.len() {
                let a = if i < bpp { 0 } else { cur[i - bpp] };
                let b = prev[i];
                let avg = ((u16::from(a) + u16::from(b)) / 2) as u8;
                cur[i] = filtered[i].wrapping_add(avg);
            }
        }
        FilterType::Paeth => {
            for i in 0..filtered.len() {
                let (a, c) = if i < bpp {
                    (0, 0)
                } else {
                    (cur[i - bpp], prev[i - bpp])
                };
                let b = prev[i];
                cur[i] = filtered[i].wrapping_add(paeth_predictor(a, b, c));
            }
        }
    }
}
