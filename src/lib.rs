//! Core logic for the hashquine generator.
//!
//! A hashquine is a file whose rendered content is its own digest. This crate
//! assembles a GIF containing one toggleable "viewport" per (digest position,
//! hex symbol) pair, backed by same-prefix MD5 collision blocks so that either
//! alternative in a viewport yields the identical file digest. After assembly
//! the real digest is computed once and each viewport is patched in place to
//! reveal the digit the digest actually contains at that position.

pub mod assemble;
pub mod decode;
pub mod error;
pub mod gif;
pub mod glyph;
pub mod oracle;
pub mod patch;

pub use assemble::{assemble, Assembled, Layout, Slot, SlotTable};
pub use error::HashquineError;
pub use gif::{read_gif, GifSegments};
pub use glyph::GlyphSet;
pub use oracle::{CollisionOracle, CollisionPair, FastcollOracle, RandomOracle};
pub use patch::{apply_digest, digest_nibbles, patch};

/// Length in bytes of each collision alternative returned by the oracle.
pub const COLLISION_LEN: usize = 128;
/// Offset of the steering byte, the last byte differing between the two
/// alternatives of a pair. Its value doubles as a sub-block length when the
/// collision is spliced into a GIF comment chain.
pub const STEERING_OFFSET: usize = 123;
/// MD5 compression block size. Collision blocks must start on this boundary.
pub const MD5_BLOCK: usize = 64;
/// Number of hex digits in an MD5 digest, one display position each.
pub const DIGEST_POSITIONS: usize = 32;
/// The fixed hexadecimal alphabet rendered by the quine.
pub const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";
