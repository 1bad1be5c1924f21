//! Segment store: splits a template GIF into the named byte segments the
//! assembler interleaves with collision blocks.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{asset_error, HashquineError};

/// Named, immutable byte segments of a template GIF. Read once at startup;
/// the assembler only ever borrows them.
#[derive(Debug, Clone)]
pub struct GifSegments {
    /// `GIF89a` signature, 6 bytes.
    pub header: Vec<u8>,
    /// Logical screen descriptor, 7 bytes.
    pub logical_descriptor: Vec<u8>,
    /// Global color table, 16 entries of 3 bytes.
    pub color_table: Vec<u8>,
    /// Image descriptor including the 0x2C introducer, 10 bytes.
    pub image_descriptor: Vec<u8>,
    /// LZW minimum code size byte plus the full sub-block chain, terminator
    /// included.
    pub image_data: Vec<u8>,
}

const HEADER_LEN: usize = 6;
const LOGICAL_DESCRIPTOR_LEN: usize = 7;
const COLOR_TABLE_LEN: usize = 16 * 3;
const IMAGE_DESCRIPTOR_LEN: usize = 10;

/// Parse a template GIF into its segments. Reading stops as soon as the image
/// data chain terminates; trailing bytes (trailer, further blocks) are
/// ignored, so no particular total file size is assumed.
pub fn read_gif(path: &Path) -> Result<GifSegments, HashquineError> {
    let file = File::open(path).map_err(|e| asset_error("opening", path, e))?;
    let mut reader = BufReader::new(file);

    let mut read = |count: usize| -> Result<Vec<u8>, HashquineError> {
        let mut buf = vec![0u8; count];
        reader
            .read_exact(&mut buf)
            .map_err(|e| asset_error("reading", path, e))?;
        Ok(buf)
    };

    let header = read(HEADER_LEN)?;
    let logical_descriptor = read(LOGICAL_DESCRIPTOR_LEN)?;
    let color_table = read(COLOR_TABLE_LEN)?;
    let image_descriptor = read(IMAGE_DESCRIPTOR_LEN)?;

    // LZW minimum code size, then length-prefixed sub-blocks until the
    // zero-length terminator.
    let mut image_data = read(1)?;
    loop {
        let len_byte = read(1)?;
        let len = len_byte[0] as usize;
        image_data.extend_from_slice(&len_byte);
        if len == 0 {
            break;
        }
        image_data.extend_from_slice(&read(len)?);
    }

    Ok(GifSegments {
        header,
        logical_descriptor,
        color_table,
        image_descriptor,
        image_data,
    })
}

/// Decode a little-endian u16 at `offset` within a descriptor segment.
pub fn u16_le(bytes: &[u8], offset: usize) -> u16 {
    bytes[offset] as u16 | (bytes[offset + 1] as u16) << 8
}

/// Append a little-endian u16, the byte order GIF descriptors use.
pub fn push_u16_le(out: &mut Vec<u8>, value: u16) {
    out.push((value & 0xff) as u8);
    out.push((value >> 8) as u8);
}
