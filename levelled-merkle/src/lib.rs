//! Append-only binary Merkle tree stored level by level.
//!
//! Each level of the tree is a flat, gap-free sequence of digests; parents
//! and siblings are found by index arithmetic alone. Adding a leaf, updating
//! one, or recomputing the root-ward digest of one touches only the O(depth)
//! nodes on its path, for any leaf count, not just powers of two.
//!
//! # Core types
//!
//! - [`MerkleTree`]: add, update, verify, root.
//! - [`TreeConfig`]: number of levels and up-front reservation.
//! - [`LevelStore`] / [`VecLevelStore`]: storage for one level.
//! - [`HashEngine`] / [`Blake3Engine`]: combines two child digests.
//!
//! Every operation returns a [`CostResult`] reporting how many hashes were
//! computed and how many level slots were read and written.

#![warn(missing_docs)]

mod config;
mod error;
mod hash;
mod level_store;
mod tree;
mod visualize;
mod walk;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_TREE_LEVELS, MAX_TREE_LEVELS, MIN_TREE_LEVELS, TreeConfig};
pub use error::{Error, Result};
pub use hash::{Blake3Engine, Digest, HASH_LENGTH, HashEngine, leaf_hash};
pub use level_store::{LevelStore, VecLevelStore};
pub use levelled_merkle_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use levelled_merkle_visualize::Visualize;
pub use tree::MerkleTree;
pub use walk::find_right_neighbor;
