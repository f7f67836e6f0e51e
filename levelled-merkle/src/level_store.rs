//! Storage for the hashes of a single tree level.

use crate::{Digest, Error, Result};

/// An ordered, gap-free sequence of digests making up one tree level.
///
/// Values can only be appended at `len()` or overwritten below it, so a
/// level never has holes.
pub trait LevelStore: Sized {
    /// Create an empty level with room for `capacity_hint` digests.
    ///
    /// Returns [`Error::AllocationError`] if the memory cannot be reserved.
    fn allocate(capacity_hint: usize) -> Result<Self>;

    /// Number of digests stored.
    fn len(&self) -> usize;

    /// Whether the level holds no digests.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The digest at `index`, or [`Error::IndexOutOfRange`] past the end.
    fn get(&self, index: usize) -> Result<Digest>;

    /// Push `value` at index `len()`.
    fn append(&mut self, value: Digest) -> Result<()>;

    /// Overwrite the existing slot at `index`.
    fn update(&mut self, value: Digest, index: usize) -> Result<()>;

    /// Append when `index == len()`, overwrite when `index < len()`.
    fn add_or_update(&mut self, value: Digest, index: usize) -> Result<()> {
        let len = self.len();
        match index.cmp(&len) {
            core::cmp::Ordering::Less => self.update(value, index),
            core::cmp::Ordering::Equal => self.append(value),
            core::cmp::Ordering::Greater => Err(Error::IndexOutOfRange { index, len }),
        }
    }
}

/// In-memory level backed by a `Vec`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VecLevelStore {
    hashes: Vec<Digest>,
}

impl VecLevelStore {
    /// All digests of the level, in index order.
    pub fn as_slice(&self) -> &[Digest] {
        &self.hashes
    }
}

impl LevelStore for VecLevelStore {
    fn allocate(capacity_hint: usize) -> Result<Self> {
        let mut hashes = Vec::new();
        hashes.try_reserve_exact(capacity_hint).map_err(|e| {
            Error::AllocationError(format!(
                "cannot reserve {} level slots: {}",
                capacity_hint, e
            ))
        })?;
        Ok(VecLevelStore { hashes })
    }

    fn len(&self) -> usize {
        self.hashes.len()
    }

    fn get(&self, index: usize) -> Result<Digest> {
        self.hashes
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.hashes.len(),
            })
    }

    fn append(&mut self, value: Digest) -> Result<()> {
        self.hashes
            .try_reserve(1)
            .map_err(|e| Error::AllocationError(format!("cannot grow level: {}", e)))?;
        self.hashes.push(value);
        Ok(())
    }

    fn update(&mut self, value: Digest, index: usize) -> Result<()> {
        let len = self.hashes.len();
        let slot = self
            .hashes
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }
}
