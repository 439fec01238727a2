//! The PNG decode pipeline.
//!
//! A decode is one left-to-right pass over the byte stream:
//!
//! 1. Validate the 8-byte signature.
//! 2. Decode IHDR (which must be the first chunk).
//! 3. Skip ancillary chunks, concatenating the consecutive IDAT run.
//! 4. Inflate the assembled zlib stream.
//! 5. Reverse the per-scanline filters into a [`Pixmap`].
//!
//! Supported input is truecolor (RGB) and truecolor-with-alpha (RGBA) at
//! bit depth 8, non-interlaced. Everything else the format allows is
//! rejected with a specific error; ancillary chunks are skipped without
//! inspection.
//!
//! # Example
//!
//! ```no_run
//! use pngpix::decode::PngFile;
//!
//! # fn main() -> pngpix::Result<()> {
//! let png = PngFile::open("photo.png")?;
//! let pixmap = png.decode()?;
//! println!("{}x{}", pixmap.width(), pixmap.height());
//! # Ok(())
//! # }
//! ```

mod chunk;
mod header;
mod idat;
mod inflate;
mod reader;
mod unfilter;

pub use chunk::{read_chunk, Chunk};
pub use header::Ihdr;
pub use idat::IdatStream;
pub use reader::ByteReader;
pub use unfilter::FilterType;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::pixmap::Pixmap;

/// The 8-byte PNG file signature.
pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// An opened PNG file: the path it came from and a full in-memory copy of
/// its bytes. The buffer is the single source of truth; no file handle is
/// retained after `open` returns.
#[derive(Debug)]
pub struct PngFile {
    path: PathBuf,
    data: Vec<u8>,
}

impl PngFile {
    /// Read `path` into memory and validate the PNG signature.
    pub fn open(path: impl AsRef<Path>) -> Result<PngFile> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        if data.len() < PNG_MAGIC.len() || data[..PNG_MAGIC.len()] != PNG_MAGIC {
            return Err(Error::NotPng);
        }
        debug!("opened {} ({} bytes)", path.display(), data.len());
        Ok(PngFile {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw file bytes, signature included.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Run the decode pipeline over the in-memory bytes.
    pub fn decode(&self) -> Result<Pixmap> {
        decode_png(&self.data)
    }
}

/// Decode an in-memory PNG byte stream into a [`Pixmap`].
pub fn decode_png(data: &[u8]) -> Result<Pixmap> {
    let mut reader = ByteReader::new(data);

    if reader.remaining() < PNG_MAGIC.len() {
        return Err(Error::NotPng);
    }
    if reader.take(PNG_MAGIC.len())? != &PNG_MAGIC[..] {
        return Err(Error::NotPng);
    }

    let first = read_chunk(&mut reader)?;
    if first.chunk_type != chunk::IHDR {
        return Err(Error::MalformedChunk(format!(
            "expected IHDR as first chunk, found {}",
            first.type_name()
        )));
    }
    let ihdr = Ihdr::from_chunk(&first)?;
    debug!(
        "IHDR: {}x{} {:?} depth {}",
        ihdr.width, ihdr.height, ihdr.color_type, ihdr.bit_depth
    );

    let mut idat = IdatStream::new();
    let mut idat_run_over = false;
    loop {
        let chunk = read_chunk(&mut reader)?;
        match chunk.chunk_type {
            chunk::IEND => break,
            chunk::IDAT => {
                if idat_run_over {
                    return Err(Error::MalformedChunk(
                        "IDAT chunks must be consecutive".into(),
                    ));
                }
                idat.append(&chunk);
            }
            chunk::IHDR => {
                return Err(Error::MalformedChunk("duplicate IHDR chunk".into()));
            }
            chunk::PLTE => {
                // Palette data is only meaningful for indexed color, which
                // the header check already ruled out.
                debug!("skipping PLTE chunk ({} bytes)", chunk.length);
                if !idat.is_empty() {
                    idat_run_over = true;
                }
            }
            _ => {
                debug!("skipping {} chunk ({} bytes)", chunk.type_name(), chunk.length);
                if !idat.is_empty() {
                    idat_run_over = true;
                }
            }
        }
    }

    if idat.is_empty() {
        return Err(Error::MalformedChunk("no IDAT chunk before IEND".into()));
    }
    if reader.remaining() > 0 {
        warn!("{} bytes after IEND ignored", reader.remaining());
    }

    let inflated = inflate::inflate_idat(&ihdr, idat.bytes())?;
    let pixels = unfilter::unfilter(&ihdr, &inflated)?;
    Pixmap::from_decoded(&ihdr, pixels)
}
