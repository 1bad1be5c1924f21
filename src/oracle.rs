//! Collision oracle: produces pairs of equal-length blocks that drive the MD5
//! internal state to the same value when appended to a given prefix.
//!
//! The production implementation shells out to `fastcoll`
//! (http://www.win.tue.nl/hashclash/). A seeded random implementation exists
//! for dry runs and tests; its pairs are not real collisions, so the final
//! digest will not close, but every layout and patching code path is
//! identical.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tempfile::TempDir;

use crate::error::HashquineError;
use crate::{COLLISION_LEN, STEERING_OFFSET};

/// Two 128-byte blocks yielding the same MD5 state after the prefix they were
/// generated for. Ordered so `lo` carries the smaller steering byte; the
/// assembler patches `lo` in to reveal a glyph and leaves `hi` in place to
/// hide it.
#[derive(Debug, Clone)]
pub struct CollisionPair {
    pub lo: Vec<u8>,
    pub hi: Vec<u8>,
}

impl CollisionPair {
    /// Validate lengths and order the pair by steering byte.
    pub fn new(a: Vec<u8>, b: Vec<u8>) -> Result<Self, HashquineError> {
        if a.len() != COLLISION_LEN || b.len() != COLLISION_LEN {
            return Err(HashquineError::Oracle(format!(
                "collision blocks are {} and {} bytes, expected {}",
                a.len(),
                b.len(),
                COLLISION_LEN
            )));
        }
        if a[STEERING_OFFSET] < b[STEERING_OFFSET] {
            Ok(Self { lo: a, hi: b })
        } else {
            Ok(Self { lo: b, hi: a })
        }
    }
}

/// Narrow interface over the external collision search so the assembler never
/// cares whether pairs come from fastcoll or a test double.
pub trait CollisionOracle {
    /// Produce a pair for this exact prefix. The guarantee only holds for the
    /// byte sequence passed here, so callers must have finalized every
    /// preceding byte first. May block for a long, unbounded time.
    fn collide(&mut self, prefix: &[u8]) -> Result<CollisionPair, HashquineError>;
}

/// Production oracle: one `fastcoll` invocation per request, handing the
/// prefix over through files in a scoped temp directory.
pub struct FastcollOracle {
    command: PathBuf,
    workdir: TempDir,
}

impl FastcollOracle {
    pub fn new(command: PathBuf) -> Result<Self, HashquineError> {
        Ok(Self {
            command,
            workdir: TempDir::new()?,
        })
    }
}

impl CollisionOracle for FastcollOracle {
    fn collide(&mut self, prefix: &[u8]) -> Result<CollisionPair, HashquineError> {
        let prefix_path = self.workdir.path().join("prefix.bin");
        let col1_path = self.workdir.path().join("col1.bin");
        let col2_path = self.workdir.path().join("col2.bin");
        fs::write(&prefix_path, prefix)?;

        let status = Command::new(&self.command)
            .arg("-p")
            .arg(&prefix_path)
            .arg("-o")
            .arg(&col1_path)
            .arg(&col2_path)
            .stdout(Stdio::null())
            .status()
            .map_err(|e| {
                HashquineError::Oracle(format!(
                    "failed to run '{}': {}",
                    self.command.display(),
                    e
                ))
            })?;
        if !status.success() {
            return Err(HashquineError::Oracle(format!(
                "'{}' exited with {}",
                self.command.display(),
                status
            )));
        }

        // fastcoll writes prefix + collision block to each output file.
        let col1 = fs::read(&col1_path)?;
        let col2 = fs::read(&col2_path)?;
        if col1.len() != col2.len() || col1.len() < prefix.len() {
            return Err(HashquineError::Oracle(format!(
                "mismatched collision outputs: {} vs {} bytes",
                col1.len(),
                col2.len()
            )));
        }
        CollisionPair::new(
            col1[prefix.len()..].to_vec(),
            col2[prefix.len()..].to_vec(),
        )
    }
}

/// Non-cryptographic stand-in driven by an explicitly seeded PRNG. Pairs have
/// the right shape for layout arithmetic but are not MD5 collisions.
pub struct RandomOracle {
    rng: StdRng,
}

impl RandomOracle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CollisionOracle for RandomOracle {
    fn collide(&mut self, _prefix: &[u8]) -> Result<CollisionPair, HashquineError> {
        let mut a = vec![0u8; COLLISION_LEN];
        let mut b = vec![0u8; COLLISION_LEN];
        self.rng.fill_bytes(&mut a);
        self.rng.fill_bytes(&mut b);
        CollisionPair::new(a, b)
    }
}
