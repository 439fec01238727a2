//! Drives the streaming zlib inflator over the assembled IDAT payload.
//!
//! The decompressor itself is external ([`flate2::Decompress`]); this
//! module owns the I/O loop around it: feeding input as it is consumed,
//! advancing the output window, and mapping every fatal stream condition
//! to [`Error::Decompression`]. The inflator is finalized (dropped) on
//! every exit path.

use flate2::{Decompress, FlushDecompress, Status};
use log::warn;

use crate::decode::header::Ihdr;
use crate::error::{Error, Result};

/// Low nibble of the first zlib byte: the deflate method id.
const ZLIB_METHOD_DEFLATE: u8 = 0x08;

/// Inflate the concatenated IDAT payload into the filtered scanline
/// stream.
///
/// The output length is known exactly from the header: one filter-type
/// byte plus `scanline_bytes` per row. Producing more or fewer bytes than
/// that is an error.
pub fn inflate_idat(ihdr: &Ihdr, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() < 2 {
        return Err(Error::Decompression(format!(
            "zlib stream too short: {} bytes",
            payload.len()
        )));
    }
    if payload[0] & 0x0F != ZLIB_METHOD_DEFLATE {
        return Err(Error::Decompression(format!(
            "zlib header does not declare deflate (CMF {:#04x})",
            payload[0]
        )));
    }

    let expected = ihdr.inflated_len();
    let mut out = vec![0u8; expected];
    let mut inflater = Decompress::new(true);

    let mut consumed = 0usize;
    let mut produced = 0usize;
    loop {
        let before_in = inflater.total_in();
        let before_out = inflater.total_out();

        let status = inflater
            .decompress(
                &payload[consumed..],
                &mut out[produced..],
                FlushDecompress::Finish,
            )
            .map_err(|e| Error::Decompression(e.to_string()))?;

        consumed += (inflater.total_in() - before_in) as usize;
        produced += (inflater.total_out() - before_out) as usize;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                if produced == expected {
                    // The stream keeps going past the declared image size.
                    return Err(Error::Decompression(format!(
                        "inflated stream exceeds expected {expected} bytes"
                    )));
                }
                if consumed == payload.len() {
                    return Err(Error::Decompression(
                        "zlib stream ended before the image was complete".into(),
                    ));
                }
                if inflater.total_in() == before_in && inflater.total_out() == before_out {
                    // Input and output both stalled; the stream is stuck.
                    return Err(Error::Decompression(
                        "inflator made no progress on remaining input".into(),
                    ));
                }
            }
        }
    }

    if produced != expected {
        return Err(Error::Decompression(format!(
            "inflated size mismatch: expected {expected} bytes, got {produced}"
        )));
    }
    if consumed < payload.len() {
        warn!(
            "{} trailing bytes after zlib stream in IDAT payload",
            payload.len() - consumed
        );
    }

    Ok(out)
}
