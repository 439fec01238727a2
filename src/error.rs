//! Error types for decoding and pixmap operations.

use std::fmt;
use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while reading, decoding, or transforming an image.
#[derive(Debug)]
pub enum Error {
    /// Underlying file or stream I/O failed.
    Io(io::Error),
    /// The input does not start with the PNG signature.
    NotPng,
    /// The file is a valid PNG but uses a feature this decoder does not
    /// implement (palette, greyscale, 16-bit depth, Adam7 interlacing).
    UnsupportedFormat(String),
    /// The chunk stream violates the container rules (truncation, bad
    /// lengths, missing IHDR/IDAT, non-consecutive IDATs).
    MalformedChunk(String),
    /// The zlib stream inside the IDAT chunks could not be inflated, or
    /// inflated to the wrong size.
    Decompression(String),
    /// A width or height of zero.
    InvalidDimensions { width: u32, height: u32 },
    /// Image dimensions exceed the supported maximum.
    ImageTooLarge { width: u32, height: u32, max: u32 },
    /// A pixel buffer whose length does not match the declared geometry.
    InvalidDataLength { expected: usize, actual: usize },
    /// A parameter that cannot be clamped into a usable range.
    InvalidArgument(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::NotPng => write!(f, "not a PNG file (bad signature)"),
            Error::UnsupportedFormat(msg) => write!(f, "unsupported PNG format: {msg}"),
            Error::MalformedChunk(msg) => write!(f, "malformed chunk stream: {msg}"),
            Error::Decompression(msg) => write!(f, "decompression failed: {msg}"),
            Error::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Error::ImageTooLarge { width, height, max } => {
                write!(f, "image too large: {width}x{height} (max dimension {max})")
            }
            Error::InvalidDataLength { expected, actual } => {
                write!(f, "invalid data length: expected {expected} bytes, got {actual}")
            }
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
