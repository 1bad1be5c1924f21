mod common;

use indicatif::ProgressBar;

use common::{background_segments, toy_glyphs};
use hashquine::{assemble, CollisionOracle, CollisionPair, HashquineError, Layout};

/// Scripted oracle handing out pre-built pairs in order.
struct QueueOracle {
    pairs: Vec<CollisionPair>,
    calls: usize,
}

impl CollisionOracle for QueueOracle {
    fn collide(&mut self, _prefix: &[u8]) -> Result<CollisionPair, HashquineError> {
        let pair = self.pairs.remove(0);
        self.calls += 1;
        Ok(pair)
    }
}

/// Build a pair with chosen steering bytes; everything else is filler.
fn pair_with_steering(lo: u8, hi: u8) -> CollisionPair {
    let mut a = vec![0x55u8; 128];
    let mut b = vec![0x66u8; 128];
    a[123] = lo;
    b[123] = hi;
    CollisionPair::new(a, b).unwrap()
}

#[test]
fn pair_is_ordered_by_steering_byte() {
    let mut a = vec![0u8; 128];
    let mut b = vec![0u8; 128];
    a[123] = 200;
    b[123] = 10;
    let pair = CollisionPair::new(a, b).unwrap();
    assert_eq!(pair.lo[123], 10);
    assert_eq!(pair.hi[123], 200);
}

#[test]
fn wrong_length_blocks_are_rejected() {
    assert!(matches!(
        CollisionPair::new(vec![0; 127], vec![0; 128]),
        Err(HashquineError::Oracle(_))
    ));
}

#[test]
fn infeasible_pairs_are_discarded_and_rerequested() {
    // Toy glyph block is 8 + 10 + 6 = 24 bytes, so a feasible pair needs
    // lo >= 4 and hi - lo >= 29: a difference of exactly 28 leaves a
    // zero-length comment restart, which kills the reveal path.
    let mut oracle = QueueOracle {
        pairs: vec![
            pair_with_steering(2, 250),  // implied skip negative
            pair_with_steering(10, 30),  // no room for the glyph block
            pair_with_steering(10, 38),  // exact fit, no pad byte left
            pair_with_steering(10, 60),  // feasible
            pair_with_steering(4, 40),   // feasible, second slot
        ],
        calls: 0,
    };

    let layout = Layout {
        positions: 1,
        top: 102,
        left: 0,
    };
    let glyphs = toy_glyphs();
    let assembled = assemble(
        &background_segments(),
        &glyphs,
        &layout,
        &mut oracle,
        &ProgressBar::hidden(),
    )
    .unwrap();

    assert_eq!(oracle.calls, 5, "three bad pairs should cost three retries");
    let slot = assembled.slots.get(0, 0).unwrap();
    assert_eq!(slot.payload[123], 10, "slot keeps the low alternative");
}

#[test]
fn minimal_pad_slot_still_parses_when_revealed() {
    // Smallest accepted steering difference: hi - lo = 29 leaves exactly one
    // pad byte in the comment restart after the glyph.
    let mut oracle = QueueOracle {
        pairs: vec![pair_with_steering(10, 39), pair_with_steering(4, 40)],
        calls: 0,
    };

    let layout = Layout {
        positions: 1,
        top: 102,
        left: 0,
    };
    let glyphs = toy_glyphs();
    let mut assembled = assemble(
        &background_segments(),
        &glyphs,
        &layout,
        &mut oracle,
        &ProgressBar::hidden(),
    )
    .unwrap();

    hashquine::apply_digest(&mut assembled.bytes, &assembled.slots, &[0]).unwrap();
    let images = hashquine::decode::rendered_images(&assembled.bytes).unwrap();
    assert_eq!(images.len(), 2, "background plus the revealed digit");
    assert_eq!(images[1].data, glyphs.pixels(0));
}
