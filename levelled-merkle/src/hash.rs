//! Digest type and the hash engine used to combine sibling nodes.
//!
//! Hash domain separation for the default engine:
//! - Leaf values:    `blake3(0x00 || value)`
//! - Parent nodes:   `blake3(0x01 || left_hash || right_hash)`

use crate::{Error, Result};

/// Size in bytes of every digest stored in the tree.
pub const HASH_LENGTH: usize = 32;

/// A fixed-size digest.
pub type Digest = [u8; HASH_LENGTH];

/// Domain tag prepended to leaf hash inputs.
const LEAF_TAG: u8 = 0x00;
/// Domain tag prepended to parent hash inputs.
const INTERNAL_TAG: u8 = 0x01;

/// Binary compression function combining two child digests into a parent.
///
/// The same engine must be used for every combine in a tree's lifetime.
pub trait HashEngine {
    /// Hash `left` and `right` (in that order) into their parent digest.
    fn combine(&self, left: &Digest, right: &Digest) -> Result<Digest>;
}

/// Blake3 engine with a domain tag separating parents from leaves.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3Engine;

impl HashEngine for Blake3Engine {
    fn combine(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[INTERNAL_TAG]);
        hasher.update(left);
        hasher.update(right);
        Ok(*hasher.finalize().as_bytes())
    }
}

/// Compute the leaf digest of a raw value: `blake3(0x00 || value)`.
pub fn leaf_hash(value: &[u8]) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[LEAF_TAG]);
    hasher.update(value);
    *hasher.finalize().as_bytes()
}

/// Interpret caller-supplied bytes as a digest.
pub(crate) fn to_digest(bytes: &[u8]) -> Result<Digest> {
    Digest::try_from(bytes).map_err(|_| {
        Error::IllegalParameter(format!(
            "hash must be {} bytes, got {}",
            HASH_LENGTH,
            bytes.len()
        ))
    })
}
