//! Quine assembler: builds the output stream by interleaving fixed GIF
//! segments with collision-backed choice slots.
//!
//! Every (digest position, symbol) pair gets one slot. A slot sits inside a
//! running GIF comment extension: the steering byte of the collision block is
//! also a sub-block length byte, so the two alternatives of a pair make the
//! comment chain end either just before the glyph that follows (revealing it)
//! or just after it (hiding it). Padding sized from the steering-byte
//! difference keeps the stream length identical either way, so patching a
//! slot later never moves another byte.

use indicatif::ProgressBar;

use crate::error::HashquineError;
use crate::gif::{push_u16_le, GifSegments};
use crate::glyph::GlyphSet;
use crate::oracle::{CollisionOracle, CollisionPair};
use crate::{COLLISION_LEN, DIGEST_POSITIONS, MD5_BLOCK, STEERING_OFFSET};

const GRAPHIC_CONTROL: [u8; 8] = [0x21, 0xf9, 0x04, 0x04, 0x02, 0x00, 0x00, 0x00];
const COMMENT_INTRODUCER: [u8; 2] = [0x21, 0xfe];
const IMAGE_SEPARATOR: u8 = 0x2c;
const BLOCK_TERMINATOR: u8 = 0x00;
const TRAILER: u8 = 0x3b;

/// Bytes of a collision block remaining after the steering byte. The steering
/// value must cover at least these, so they are subtracted when turning it
/// into a skip length.
const STEERING_BASE: usize = COLLISION_LEN - STEERING_OFFSET - 1;

/// Comment terminator plus the three-byte comment restart that follow a glyph
/// block on the hide path.
const RESYNC_OVERHEAD: usize = 4;

/// The comment restart must carry at least one pad byte. A zero-length
/// restart terminates the comment on the reveal path, and the next slot's
/// alignment length byte would then be read as a top-level block introducer.
const MIN_PAD: usize = 1;

/// Largest glyph block that can sit inside a single collision skip.
const MAX_GLYPH_BLOCK: usize = u8::MAX as usize - STEERING_BASE - RESYNC_OVERHEAD - MIN_PAD;

/// Placement of the digest row in the output image.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Number of digest positions to lay out (32 for MD5).
    pub positions: usize,
    /// Vertical offset of the digest row in pixels.
    pub top: u16,
    /// Horizontal offset of the first digit; each further position advances
    /// by one glyph width.
    pub left: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            positions: DIGEST_POSITIONS,
            top: 102,
            left: 0,
        }
    }
}

/// One patchable byte range: where a collision alternative begins in the
/// stream, and the reveal alternative to splice in if the digest calls for
/// this slot's symbol.
#[derive(Debug, Clone)]
pub struct Slot {
    pub offset: usize,
    pub payload: Vec<u8>,
}

/// Slots keyed by (position, symbol). Both dimensions are small and fixed, so
/// this is a flat two-dimensional array rather than a map.
#[derive(Debug)]
pub struct SlotTable {
    positions: usize,
    symbols: usize,
    slots: Vec<Option<Slot>>,
}

impl SlotTable {
    fn new(positions: usize, symbols: usize) -> Self {
        Self {
            positions,
            symbols,
            slots: (0..positions * symbols).map(|_| None).collect(),
        }
    }

    fn insert(&mut self, position: usize, symbol: usize, slot: Slot) {
        self.slots[position * self.symbols + symbol] = Some(slot);
    }

    pub fn positions(&self) -> usize {
        self.positions
    }

    pub fn symbols(&self) -> usize {
        self.symbols
    }

    pub fn get(&self, position: usize, symbol: usize) -> Option<&Slot> {
        if position >= self.positions || symbol >= self.symbols {
            return None;
        }
        self.slots[position * self.symbols + symbol].as_ref()
    }
}

/// A fully assembled stream plus the slot table the patcher needs.
#[derive(Debug)]
pub struct Assembled {
    pub bytes: Vec<u8>,
    pub slots: SlotTable,
}

/// Skip arithmetic derived from a pair's steering bytes.
struct SlotFit {
    /// Zero bytes between the low alternative's skip end and the glyph.
    skip: usize,
    /// Comment restart length that makes both alternatives consume the same
    /// number of stream bytes.
    pad: usize,
}

/// Check a pair against the layout constraints. Both implied skip lengths
/// must be non-negative and the steering difference must leave room for the
/// glyph block, the comment restart, and at least one pad byte.
fn slot_fit(pair: &CollisionPair, glyph_len: usize) -> Option<SlotFit> {
    let skip_lo = pair.lo[STEERING_OFFSET] as i64 - STEERING_BASE as i64;
    let skip_hi = pair.hi[STEERING_OFFSET] as i64 - STEERING_BASE as i64;
    let pad = skip_hi - skip_lo - glyph_len as i64 - RESYNC_OVERHEAD as i64;
    if skip_lo >= 0 && pad >= MIN_PAD as i64 {
        Some(SlotFit {
            skip: skip_lo as usize,
            pad: pad as usize,
        })
    } else {
        None
    }
}

/// Graphic control extension + image descriptor + pixel data for one symbol
/// at a given screen coordinate.
fn glyph_block(glyphs: &GlyphSet, symbol: usize, left: u16, top: u16) -> Vec<u8> {
    let pixels = glyphs.pixels(symbol);
    let mut block = Vec::with_capacity(GRAPHIC_CONTROL.len() + 10 + pixels.len());
    block.extend_from_slice(&GRAPHIC_CONTROL);
    block.push(IMAGE_SEPARATOR);
    push_u16_le(&mut block, left);
    push_u16_le(&mut block, top);
    push_u16_le(&mut block, glyphs.width());
    push_u16_le(&mut block, glyphs.height());
    block.push(0x00);
    block.extend_from_slice(pixels);
    block
}

/// Pad the stream to the next MD5 compression block boundary. The filler is
/// declared as one comment sub-block whose length also covers the first
/// `STEERING_OFFSET` bytes of the collision that will follow, which makes the
/// collision's steering byte the next sub-block length a parser reads.
fn align_to_md5_block(out: &mut Vec<u8>) {
    let gap = MD5_BLOCK - out.len() % MD5_BLOCK;
    out.push((gap - 1 + STEERING_OFFSET) as u8);
    out.resize(out.len() + gap - 1, 0);
}

/// Build the complete stream with every viewport hidden by default, recording
/// one slot per (position, symbol). Strictly sequential: each collision
/// request depends on every byte appended so far.
pub fn assemble(
    background: &GifSegments,
    glyphs: &GlyphSet,
    layout: &Layout,
    oracle: &mut dyn CollisionOracle,
    progress: &ProgressBar,
) -> Result<Assembled, HashquineError> {
    let total = layout.positions * glyphs.len();
    let mut slots = SlotTable::new(layout.positions, glyphs.len());

    let mut out = Vec::new();
    out.extend_from_slice(&background.header);
    out.extend_from_slice(&background.logical_descriptor);
    out.extend_from_slice(&background.color_table);
    out.extend_from_slice(&GRAPHIC_CONTROL);
    out.extend_from_slice(&background.image_descriptor);
    out.extend_from_slice(&background.image_data);

    // Open the comment chain every slot lives in.
    out.extend_from_slice(&COMMENT_INTRODUCER);

    let mut left = layout.left;
    for position in 0..layout.positions {
        for symbol in 0..glyphs.len() {
            let glyph = glyph_block(glyphs, symbol, left, layout.top);
            if glyph.len() > MAX_GLYPH_BLOCK {
                return Err(HashquineError::Asset(format!(
                    "glyph block is {} bytes, at most {} fit inside a collision skip",
                    glyph.len(),
                    MAX_GLYPH_BLOCK
                )));
            }

            align_to_md5_block(&mut out);
            debug_assert_eq!(out.len() % MD5_BLOCK, 0);

            progress.set_message(format!(
                "generating collision {} of {}",
                position * glyphs.len() + symbol + 1,
                total
            ));
            let (pair, fit) = loop {
                let pair = oracle.collide(&out)?;
                match slot_fit(&pair, glyph.len()) {
                    Some(fit) => break (pair, fit),
                    None => eprintln!(
                        "unsatisfying collision for position {position} symbol {symbol:x}, retrying"
                    ),
                }
            };

            slots.insert(
                position,
                symbol,
                Slot {
                    offset: out.len(),
                    payload: pair.lo,
                },
            );

            // Default choice: the high alternative skips over the glyph.
            out.extend_from_slice(&pair.hi);
            out.resize(out.len() + fit.skip, 0);
            out.push(BLOCK_TERMINATOR);
            out.extend_from_slice(&glyph);
            // Restart the comment; the pad absorbs the steering difference so
            // both alternatives land on the same next byte.
            out.extend_from_slice(&COMMENT_INTRODUCER);
            out.push(fit.pad as u8);
            out.resize(out.len() + fit.pad, 0);

            progress.inc(1);
        }
        left += glyphs.width();
    }

    out.push(BLOCK_TERMINATOR);
    out.push(TRAILER);

    Ok(Assembled { bytes: out, slots })
}
