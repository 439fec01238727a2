//! PNG chunk framing: `length | type | data | crc`.

use crate::decode::reader::ByteReader;
use crate::error::{Error, Result};

/// Critical chunk type codes.
pub const IHDR: [u8; 4] = *b"IHDR";
pub const PLTE: [u8; 4] = *b"PLTE";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

/// One framed PNG chunk.
///
/// `chunk_type` is kept as the raw ASCII bytes from the wire. `data` is
/// empty when the declared length is zero. The stored `crc` is carried but
/// not verified; the zlib stream's own checksum guards the image data.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub length: u32,
    pub chunk_type: [u8; 4],
    pub data: Vec<u8>,
    pub crc: u32,
}

impl Chunk {
    /// Render the type code for diagnostics (`IDAT`, `tEXt`, ...).
    pub fn type_name(&self) -> String {
        self.chunk_type
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() {
                    b as char
                } else {
                    '?'
                }
            })
            .collect()
    }

    /// Whether this chunk is ancillary (lowercase first type byte).
    pub fn is_ancillary(&self) -> bool {
        self.chunk_type[0].is_ascii_lowercase()
    }
}

/// Read the next chunk from the stream.
///
/// The caller decides what to do with IEND; it is returned like any other
/// chunk (its data segment is empty on well-formed input).
pub fn read_chunk(reader: &mut ByteReader<'_>) -> Result<Chunk> {
    let length = reader.read_u32_be()?;
    let chunk_type = reader.read_tag()?;

    if length as usize > reader.remaining() {
        return Err(Error::MalformedChunk(format!(
            "chunk {} declares {} data bytes but only {} remain",
            String::from_utf8_lossy(&chunk_type),
            length,
            reader.remaining()
        )));
    }

    let data = reader.take(length as usize)?.to_vec();
    let crc = reader.read_u32_be()?;

    Ok(Chunk {
        length,
        chunk_type,
        data,
        crc,
    })
}
