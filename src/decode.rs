//! Minimal GIF block walker used to check what an emitted stream actually
//! renders. It follows the same sub-block skip rules a real decoder does, so
//! glyphs hidden inside comment extensions stay hidden and only the chosen
//! alternatives surface as images.

use crate::error::HashquineError;
use crate::gif::u16_le;

/// One image a renderer would draw: screen placement plus the raw image data
/// segment (LZW minimum code size and sub-block chain, terminator included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub data: Vec<u8>,
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, count: usize) -> Result<&'a [u8], HashquineError> {
        if self.pos + count > self.data.len() {
            return Err(HashquineError::Asset(format!(
                "stream truncated at byte {}",
                self.data.len()
            )));
        }
        let slice = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, HashquineError> {
        Ok(self.take(1)?[0])
    }

    fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Consume a sub-block chain through its zero-length terminator,
    /// returning the chain bytes terminator included.
    fn sub_blocks(&mut self) -> Result<&'a [u8], HashquineError> {
        let start = self.pos;
        loop {
            let len = self.byte()? as usize;
            if len == 0 {
                return Ok(&self.data[start..self.pos]);
            }
            self.take(len)?;
        }
    }
}

/// Walk a complete GIF stream and list the images it renders, in order.
pub fn rendered_images(stream: &[u8]) -> Result<Vec<RenderedImage>, HashquineError> {
    let mut cursor = Cursor {
        data: stream,
        pos: 0,
    };

    cursor.take(6)?;
    let lcd = cursor.take(7)?;
    if lcd[4] & 0x80 != 0 {
        let entries = 2usize << (lcd[4] & 0x07) as usize;
        cursor.take(entries * 3)?;
    }

    let mut images = Vec::new();
    while !cursor.at_end() {
        match cursor.byte()? {
            0x2c => {
                let desc = cursor.take(9)?;
                let (left, top) = (u16_le(desc, 0), u16_le(desc, 2));
                let (width, height) = (u16_le(desc, 4), u16_le(desc, 6));
                if desc[8] & 0x80 != 0 {
                    let entries = 2usize << (desc[8] & 0x07) as usize;
                    cursor.take(entries * 3)?;
                }
                let start = cursor.pos;
                cursor.byte()?;
                cursor.sub_blocks()?;
                images.push(RenderedImage {
                    left,
                    top,
                    width,
                    height,
                    data: stream[start..cursor.pos].to_vec(),
                });
            }
            0x21 => {
                cursor.byte()?;
                cursor.sub_blocks()?;
            }
            0x3b => break,
            other => {
                return Err(HashquineError::Asset(format!(
                    "unknown block introducer {:#04x} at byte {}",
                    other,
                    cursor.pos - 1
                )));
            }
        }
    }
    Ok(images)
}
