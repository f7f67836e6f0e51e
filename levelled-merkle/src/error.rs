use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from levelled Merkle tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A malformed leaf hash, or an offset past the current leaf count.
    #[error("illegal parameter: {0}")]
    IllegalParameter(String),
    /// A level store could not reserve memory.
    #[error("allocation failed: {0}")]
    AllocationError(String),
    /// A level store was accessed outside of its current size.
    #[error("index {index} out of range for level of size {len}")]
    IndexOutOfRange {
        /// The requested slot.
        index: usize,
        /// Number of slots the level holds.
        len: usize,
    },
    /// The hash engine failed to combine two digests.
    #[error("hash engine error: {0}")]
    HashEngineError(String),
    /// The tree already holds as many leaves as its levels can carry.
    #[error("tree is full (capacity {capacity}, count {count})")]
    CapacityExceeded {
        /// Maximum number of leaves.
        capacity: usize,
        /// Leaves already added.
        count: usize,
    },
    /// The tree configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Any other failure reported by a custom store or engine.
    #[error("unspecified error: {0}")]
    Unspecified(String),
}
