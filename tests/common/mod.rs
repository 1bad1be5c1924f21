#![allow(dead_code)]

use hashquine::{GifSegments, GlyphSet};

/// LZW minimum code size byte, one data sub-block, terminator.
pub fn sub_chain(min_code: u8, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![min_code, payload.len() as u8];
    data.extend_from_slice(payload);
    data.push(0x00);
    data
}

fn logical_descriptor(width: u16, height: u16) -> Vec<u8> {
    vec![
        (width & 0xff) as u8,
        (width >> 8) as u8,
        (height & 0xff) as u8,
        (height >> 8) as u8,
        0x83, // global color table, 16 entries
        0x00,
        0x00,
    ]
}

fn image_descriptor(left: u16, top: u16, width: u16, height: u16) -> Vec<u8> {
    let mut desc = vec![0x2c];
    for v in [left, top, width, height] {
        desc.push((v & 0xff) as u8);
        desc.push((v >> 8) as u8);
    }
    desc.push(0x00);
    desc
}

/// In-memory segments for a 220x120 background with a 16-color palette.
pub fn background_segments() -> GifSegments {
    GifSegments {
        header: b"GIF89a".to_vec(),
        logical_descriptor: logical_descriptor(220, 120),
        color_table: (0u8..48).collect(),
        image_descriptor: image_descriptor(0, 0, 220, 120),
        image_data: sub_chain(0x04, &[0x10, 0x20, 0x30, 0x40]),
    }
}

/// Serialize segments into a complete GIF file image, trailer included.
pub fn gif_file_bytes(segments: &GifSegments) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&segments.header);
    bytes.extend_from_slice(&segments.logical_descriptor);
    bytes.extend_from_slice(&segments.color_table);
    bytes.extend_from_slice(&segments.image_descriptor);
    bytes.extend_from_slice(&segments.image_data);
    bytes.push(0x3b);
    bytes
}

/// A complete glyph template file with the given pixel payload.
pub fn glyph_file_bytes(width: u16, height: u16, payload: &[u8]) -> Vec<u8> {
    let segments = GifSegments {
        header: b"GIF89a".to_vec(),
        logical_descriptor: logical_descriptor(width, height),
        color_table: (0u8..48).collect(),
        image_descriptor: image_descriptor(0, 0, width, height),
        image_data: sub_chain(0x02, payload),
    };
    gif_file_bytes(&segments)
}

/// Two-symbol toy alphabet with distinct 3x5 glyphs.
pub fn toy_glyphs() -> GlyphSet {
    GlyphSet::new(
        3,
        5,
        vec![
            sub_chain(0x02, &[0xaa, 0xbb, 0xcc]),
            sub_chain(0x02, &[0x11, 0x22, 0x33]),
        ],
    )
}
