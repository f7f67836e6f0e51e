use crate::{Error, Result};

/// Default number of levels, including the conceptual root slot.
pub const DEFAULT_TREE_LEVELS: u8 = 32;
/// Smallest usable number of levels: leaves plus the root slot.
pub const MIN_TREE_LEVELS: u8 = 2;
/// Largest accepted number of levels.
pub const MAX_TREE_LEVELS: u8 = 48;

/// Construction-time settings of a [`MerkleTree`](crate::MerkleTree).
///
/// Both values are fixed for the lifetime of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeConfig {
    /// Number of levels including the conceptual root slot. The tree holds
    /// at most `2^(tree_levels - 2)` leaves.
    pub tree_levels: u8,
    /// Leaves to reserve room for up front. Level `l` reserves
    /// `reserved_leaves >> l` slots.
    pub reserved_leaves: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            tree_levels: DEFAULT_TREE_LEVELS,
            reserved_leaves: 0,
        }
    }
}

impl TreeConfig {
    /// Config with `tree_levels` levels and no up-front reservation.
    pub fn with_tree_levels(tree_levels: u8) -> Self {
        TreeConfig {
            tree_levels,
            ..Default::default()
        }
    }

    /// Check the level bound and that the reservation fits the capacity.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TREE_LEVELS..=MAX_TREE_LEVELS).contains(&self.tree_levels) {
            return Err(Error::InvalidConfig(format!(
                "tree_levels must be between {} and {}, got {}",
                MIN_TREE_LEVELS, MAX_TREE_LEVELS, self.tree_levels
            )));
        }
        if u32::from(self.tree_levels - MIN_TREE_LEVELS) >= usize::BITS - 1 {
            return Err(Error::InvalidConfig(format!(
                "{} levels overflow the leaf counter on this platform",
                self.tree_levels
            )));
        }
        if self.reserved_leaves > self.leaf_capacity() {
            return Err(Error::InvalidConfig(format!(
                "reserved_leaves {} exceeds capacity {} for {} levels",
                self.reserved_leaves,
                self.leaf_capacity(),
                self.tree_levels
            )));
        }
        Ok(())
    }

    /// Maximum number of leaves. Only meaningful on a validated config.
    pub fn leaf_capacity(&self) -> usize {
        1usize << self.tree_levels.saturating_sub(MIN_TREE_LEVELS)
    }
}
