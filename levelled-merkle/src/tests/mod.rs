mod test_incremental;

use crate::{Blake3Engine, Digest, HashEngine, MerkleTree, TreeConfig, leaf_hash};

/// Leaf digest from an integer (for test convenience).
pub(crate) fn leaf_from_u32(i: u32) -> Digest {
    leaf_hash(&i.to_le_bytes())
}

pub(crate) fn combine(left: &Digest, right: &Digest) -> Digest {
    Blake3Engine.combine(left, right).expect("combine")
}

/// Build a tree from `count` leaves `leaf_from_u32(0..count)`.
pub(crate) fn tree_with_leaves(count: u32, tree_levels: u8) -> (MerkleTree, Vec<Digest>) {
    let mut tree = MerkleTree::new(TreeConfig::with_tree_levels(tree_levels)).expect("new tree");
    let leaves: Vec<Digest> = (0..count).map(leaf_from_u32).collect();
    for leaf in &leaves {
        tree.add(leaf).unwrap().expect("add");
    }
    (tree, leaves)
}

/// Value of the node at `(level, index)` computed from scratch; `None` if
/// its subtree holds no leaf. A node without a right subtree takes the
/// value of its left child.
pub(crate) fn reference_node(leaves: &[Digest], level: u32, index: usize) -> Option<Digest> {
    if index << level >= leaves.len() {
        return None;
    }
    if level == 0 {
        return Some(leaves[index]);
    }
    let left = reference_node(leaves, level - 1, 2 * index)?;
    match reference_node(leaves, level - 1, 2 * index + 1) {
        Some(right) => Some(combine(&left, &right)),
        None => Some(left),
    }
}

pub(crate) fn reference_root(leaves: &[Digest]) -> Option<Digest> {
    let mut depth = 0;
    while (1usize << depth) < leaves.len() {
        depth += 1;
    }
    reference_node(leaves, depth, 0)
}

/// Assert every stored level matches the from-scratch reference: slot
/// `(level, index)` exists iff the right half of its subtree holds a leaf.
pub(crate) fn assert_levels_match_reference(tree: &MerkleTree, leaves: &[Digest]) {
    assert_eq!(tree.level_hashes(0).expect("level 0"), leaves);
    for level in 1..tree.tree_levels() {
        let half = 1usize << (level - 1);
        let expected_len = if leaves.len() > half {
            (leaves.len() - half).div_ceil(1 << level)
        } else {
            0
        };
        let hashes = tree.level_hashes(level).expect("level");
        assert_eq!(hashes.len(), expected_len, "level {} of {}", level, leaves.len());
        for (index, hash) in hashes.iter().enumerate() {
            assert_eq!(
                Some(*hash),
                reference_node(leaves, level as u32, index),
                "slot ({}, {}) of {} leaves",
                level,
                index,
                leaves.len()
            );
        }
    }
}
