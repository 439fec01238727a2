//! # pngpix
//!
//! A PNG decoder and pixmap manipulation library.
//!
//! - **Decoding**: chunk stream parsing, IDAT assembly, streaming zlib
//!   inflation, and per-scanline filter reconstruction for truecolor
//!   (RGB/RGBA) 8-bit, non-interlaced PNGs. Ancillary chunks are skipped.
//! - **Pixmap layer**: sampling (indexed and normalized), nearest and
//!   bilinear scaling, grayscale and monochrome conversion, 90° rotation,
//!   binary PPM (P6) export with alpha blending, and ASCII-art rendering.
//! - **CLI**: a thin `pngpix` driver (feature `cli`) mapping command-line
//!   arguments onto open → decode → transform → write.
//!
//! ## Quickstart
//!
//! ```no_run
//! use pngpix::color::Rgb;
//! use pngpix::decode::PngFile;
//!
//! # fn main() -> pngpix::Result<()> {
//! let png = PngFile::open("photo.png")?;
//! let mut pixmap = png.decode()?;
//!
//! pixmap.rotate_cw();
//! pixmap.write_ppm_file("photo.ppm", Rgb::new(255, 255, 255))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Decoding from memory
//!
//! ```no_run
//! use pngpix::decode::decode_png;
//!
//! # fn main() -> pngpix::Result<()> {
//! let bytes = std::fs::read("photo.png")?;
//! let pixmap = decode_png(&bytes)?;
//! println!("{}x{}, {} channels", pixmap.width(), pixmap.height(), pixmap.n_channels());
//! # Ok(())
//! # }
//! ```
//!
//! ## Unsupported input
//!
//! Indexed-color (palette), greyscale, 16-bit, and Adam7-interlaced PNGs
//! are rejected with [`Error::UnsupportedFormat`]; the chunk stream rules
//! (IHDR first, consecutive IDATs, IEND last) are enforced with
//! [`Error::MalformedChunk`].

#![forbid(unsafe_code)]

pub mod color;
pub mod decode;
pub mod error;
pub mod paeth;
pub mod pixmap;

pub use color::{ColorType, Rgb, Rgba};
pub use decode::{decode_png, PngFile};
pub use error::{Error, Result};
pub use pixmap::{Pixmap, ScaleMethod};
