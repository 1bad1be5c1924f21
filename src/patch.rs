//! Digest patcher: computes the real digest of the assembled stream and
//! rewrites each slot to reveal the digit the digest contains there.

use md5::{Digest, Md5};

use crate::assemble::SlotTable;
use crate::error::HashquineError;

/// MD5 of `bytes` as 32 nibble values, most significant nibble of each byte
/// first, matching the order hex digits are printed in.
pub fn digest_nibbles(bytes: &[u8]) -> Vec<u8> {
    Md5::digest(bytes)
        .iter()
        .flat_map(|b| [b >> 4, b & 0x0f])
        .collect()
}

/// Overwrite, for each position, the slot selected by that position's nibble
/// with its reveal payload. Slot ranges are disjoint and both alternatives
/// are equal length, so nothing else in the stream moves.
///
/// A missing slot means the assembler failed to create one of the guaranteed
/// (position, symbol) combinations; that is a bug, surfaced as an invariant
/// violation rather than skipped.
pub fn apply_digest(
    stream: &mut [u8],
    slots: &SlotTable,
    nibbles: &[u8],
) -> Result<(), HashquineError> {
    if nibbles.len() != slots.positions() {
        return Err(HashquineError::Invariant(format!(
            "digest has {} nibbles but the slot table covers {} positions",
            nibbles.len(),
            slots.positions()
        )));
    }
    for (position, &nibble) in nibbles.iter().enumerate() {
        let slot = slots.get(position, nibble as usize).ok_or_else(|| {
            HashquineError::Invariant(format!(
                "no slot for position {} symbol {:x}",
                position, nibble
            ))
        })?;
        stream[slot.offset..slot.offset + slot.payload.len()].copy_from_slice(&slot.payload);
    }
    Ok(())
}

/// Compute the stream's digest, patch every slot accordingly, and return the
/// digest. By the collision contract the patched stream still hashes to the
/// returned value, so running this twice is a no-op.
pub fn patch(stream: &mut [u8], slots: &SlotTable) -> Result<[u8; 16], HashquineError> {
    let digest: [u8; 16] = Md5::digest(&*stream).into();
    let nibbles: Vec<u8> = digest.iter().flat_map(|b| [b >> 4, b & 0x0f]).collect();
    apply_digest(stream, slots, &nibbles)?;
    Ok(digest)
}
