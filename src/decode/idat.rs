//! IDAT payload assembly.
//!
//! A PNG may split its zlib stream across any number of consecutive IDAT
//! chunks at arbitrary byte boundaries; the split carries no meaning. This
//! buffer stitches the payloads back together in file order.

use crate::decode::chunk::Chunk;

/// Concatenated IDAT payload bytes, in file order.
#[derive(Debug, Default)]
pub struct IdatStream {
    data: Vec<u8>,
}

impl IdatStream {
    pub fn new() -> Self {
        IdatStream::default()
    }

    /// Append one IDAT chunk's payload. The chunk keeps ownership of its
    /// bytes; they are copied into the stream.
    pub fn append(&mut self, chunk: &Chunk) {
        self.data.extend_from_slice(&chunk.data);
    }

    /// Total bytes appended so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The assembled zlib stream.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}
