//! Upward walks shared by `verify` and `update`.
//!
//! A node at `(level, index)` has children `(level - 1, 2 * index)` and
//! `(level - 1, 2 * index + 1)`; its parent is `(level + 1, index >> 1)`.
//! A parent slot only exists once its right subtree holds a leaf, so a lone
//! rightmost node is carried up unhashed until a sibling arrives.

use levelled_merkle_costs::{CostResult, CostsExt, OperationCost};

use crate::{Digest, Error, HashEngine, LevelStore, Result};

/// Read `levels[level][index]`, counting one level read.
pub(crate) fn read_slot<S: LevelStore>(
    levels: &[S],
    level: usize,
    index: usize,
    cost: &mut OperationCost,
) -> Result<Digest> {
    let store = levels.get(level).ok_or(Error::IndexOutOfRange {
        index: level,
        len: levels.len(),
    })?;
    cost.level_reads += 1;
    store.get(index)
}

/// Combine two digests, counting one hash call.
pub(crate) fn combine<E: HashEngine>(
    engine: &E,
    left: &Digest,
    right: &Digest,
    cost: &mut OperationCost,
) -> Result<Digest> {
    cost.hash_node_calls += 1;
    engine.combine(left, right)
}

/// Find the value standing in for the node at `(level, offset)`.
///
/// If the slot exists it is returned. Otherwise the node's right subtree is
/// empty and its value is that of its left child, so the search continues
/// at `(level - 1, 2 * offset)` down to the leaves. `None` means the whole
/// subtree is empty, which is not an error.
pub fn find_right_neighbor<S: LevelStore>(
    levels: &[S],
    offset: usize,
    level: usize,
) -> CostResult<Option<Digest>, Error> {
    let mut cost = OperationCost::default();
    let mut offset = offset;
    let mut level = Some(level);
    while let Some(l) = level {
        let len = levels.get(l).map_or(0, |store| store.len());
        if offset < len {
            let found = read_slot(levels, l, offset, &mut cost);
            return found.map(Some).wrap_with_cost(cost);
        }
        level = l.checked_sub(1);
        offset = match offset.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(None).wrap_with_cost(cost)
}

/// Whether a level above `level` holds anything, not counting the top
/// (root) slot.
fn has_next_level_except_root<S: LevelStore>(levels: &[S], level: usize) -> bool {
    level + 2 < levels.len() && !levels[level + 1].is_empty()
}

/// What happened to the digest on one climb step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathStep {
    /// The digest was hashed with a sibling; the parent slot exists.
    Combined,
    /// No right sibling exists yet; the digest moved up unchanged and the
    /// parent has no slot of its own.
    PassedThrough,
}

/// Climbs from a leaf toward the root, folding in one sibling per level.
///
/// The cursor only reads the levels, so callers may write the current
/// digest back between steps.
#[derive(Debug, Clone)]
pub(crate) struct PathCursor {
    level: usize,
    index: usize,
    digest: Digest,
}

impl PathCursor {
    pub(crate) fn new(leaf: Digest, offset: usize) -> Self {
        PathCursor {
            level: 0,
            index: offset,
            digest: leaf,
        }
    }

    /// Digest of the node the cursor is on.
    pub(crate) fn digest(&self) -> Digest {
        self.digest
    }

    /// `(level, index)` of the node the cursor is on.
    pub(crate) fn position(&self) -> (usize, usize) {
        (self.level, self.index)
    }

    /// Move one level up. Returns `None` once there is nothing left to climb.
    pub(crate) fn step<S: LevelStore, E: HashEngine>(
        &mut self,
        levels: &[S],
        engine: &E,
        cost: &mut OperationCost,
    ) -> Result<Option<PathStep>> {
        if !has_next_level_except_root(levels, self.level) {
            return Ok(None);
        }
        let step = if self.index & 1 == 0 {
            let right =
                find_right_neighbor(levels, self.index + 1, self.level).unwrap_add_cost(cost)?;
            match right {
                Some(right) => {
                    self.digest = combine(engine, &self.digest, &right, cost)?;
                    PathStep::Combined
                }
                None => PathStep::PassedThrough,
            }
        } else {
            // a right child always has its left sibling
            let left = read_slot(levels, self.level, self.index - 1, cost)?;
            self.digest = combine(engine, &left, &self.digest, cost)?;
            PathStep::Combined
        };
        self.index >>= 1;
        self.level += 1;
        Ok(Some(step))
    }
}

/// Climb from `leaf` at `offset` as far as the tree reaches and return the
/// resulting digest.
pub(crate) fn climb<S: LevelStore, E: HashEngine>(
    levels: &[S],
    engine: &E,
    leaf: Digest,
    offset: usize,
) -> CostResult<Digest, Error> {
    let mut cost = OperationCost::default();
    let mut cursor = PathCursor::new(leaf, offset);
    loop {
        match cursor.step(levels, engine, &mut cost) {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(cursor.digest()).wrap_with_cost(cost),
            Err(e) => return Err(e).wrap_with_cost(cost),
        }
    }
}
