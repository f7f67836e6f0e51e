use levelled_merkle_costs::{
    CostResult, CostsExt, OperationCost, cost_return_on_error_no_add,
};
use log::{debug, trace, warn};

use crate::{
    Blake3Engine, Digest, Error, HashEngine, LevelStore, Result, TreeConfig, VecLevelStore,
    hash::to_digest,
    walk::{PathCursor, PathStep, climb, combine, read_slot},
};

/// An append-only binary Merkle tree stored level by level.
///
/// Level 0 holds the leaves; level `l + 1` holds the parents of level `l`.
/// Nodes are addressed purely by `(level, index)`. A parent slot is only
/// materialized once its right subtree holds a leaf, so a tree of any size
/// stays consistent after each [`add`](Self::add) with O(depth) hashing.
///
/// The top level is reserved for the conceptual root slot and never holds
/// data; the root itself is the sole element of the highest non-empty
/// level. Dropping the tree releases every level together.
#[derive(Debug)]
pub struct MerkleTree<S = VecLevelStore, E = Blake3Engine> {
    config: TreeConfig,
    levels: Vec<S>,
    leaf_count: usize,
    engine: E,
}

impl MerkleTree<VecLevelStore, Blake3Engine> {
    /// Create an empty in-memory tree hashing with Blake3.
    pub fn new(config: TreeConfig) -> Result<Self> {
        Self::with_parts(config, Blake3Engine)
    }
}

impl<E: HashEngine> MerkleTree<VecLevelStore, E> {
    /// Create an empty in-memory tree hashing with `engine`.
    pub fn with_engine(config: TreeConfig, engine: E) -> Result<Self> {
        Self::with_parts(config, engine)
    }
}

impl<S: LevelStore, E: HashEngine> MerkleTree<S, E> {
    /// Create an empty tree over level store `S` hashing with `engine`.
    ///
    /// Fails with [`Error::InvalidConfig`] if `config` does not validate and
    /// with [`Error::AllocationError`] if a level cannot be allocated; levels
    /// allocated before the failure are released.
    pub fn with_parts(config: TreeConfig, engine: E) -> Result<Self> {
        config.validate()?;
        let level_count = usize::from(config.tree_levels);
        let mut levels = Vec::new();
        levels
            .try_reserve_exact(level_count)
            .map_err(|e| Error::AllocationError(format!("cannot reserve levels: {}", e)))?;
        for level in 0..level_count {
            levels.push(S::allocate(config.reserved_leaves >> level)?);
        }
        debug!(
            "created merkle tree with {} levels, capacity {} leaves",
            level_count,
            config.leaf_capacity()
        );
        Ok(MerkleTree {
            config,
            levels,
            leaf_count: 0,
            engine,
        })
    }

    /// The config the tree was created with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The engine combining sibling digests.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of levels, including the root slot.
    pub fn tree_levels(&self) -> usize {
        self.levels.len()
    }

    /// Number of leaves added so far; also the offset of the next leaf.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Whether no leaf has been added yet.
    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    /// Maximum number of leaves the tree can hold.
    pub fn capacity(&self) -> usize {
        self.config.leaf_capacity()
    }

    /// Whether a leaf exists at `offset`.
    pub fn exists(&self, offset: usize) -> bool {
        offset < self.leaf_count
    }

    /// The stored leaf hash at `offset`, or `None` past the end.
    pub fn leaf(&self, offset: usize) -> Result<Option<Digest>> {
        if !self.exists(offset) {
            return Ok(None);
        }
        self.levels[0].get(offset).map(Some)
    }

    /// The level stores, leaves first.
    pub fn levels(&self) -> &[S] {
        &self.levels
    }

    /// Number of hashes stored at `level`, or `None` for a level the tree
    /// does not have.
    pub fn level_len(&self, level: usize) -> Option<usize> {
        self.levels.get(level).map(|store| store.len())
    }

    /// Copy of every hash stored at `level`.
    pub fn level_hashes(&self, level: usize) -> Result<Vec<Digest>> {
        let store = self.levels.get(level).ok_or(Error::IndexOutOfRange {
            index: level,
            len: self.levels.len(),
        })?;
        (0..store.len()).map(|index| store.get(index)).collect()
    }

    /// The root hash: the sole element of the highest non-empty level.
    ///
    /// Returns `None` for an empty tree.
    pub fn root(&self) -> Result<Option<Digest>> {
        self.levels
            .iter()
            .rev()
            .find(|store| !store.is_empty())
            .map(|store| store.get(0))
            .transpose()
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if !self.exists(offset) {
            return Err(Error::IllegalParameter(format!(
                "offset {} out of range for {} leaves",
                offset, self.leaf_count
            )));
        }
        Ok(())
    }

    /// Append a leaf hash and repair every ancestor it affects.
    ///
    /// `leaf` must be exactly [`HASH_LENGTH`](crate::HASH_LENGTH) bytes.
    /// Returns the offset of the new leaf. A full tree fails with
    /// [`Error::CapacityExceeded`] without being modified.
    ///
    /// Writes made before a failing combine are not rolled back.
    pub fn add(&mut self, leaf: &[u8]) -> CostResult<usize, Error> {
        let mut cost = OperationCost::default();
        let leaf = cost_return_on_error_no_add!(&cost, to_digest(leaf));
        if self.leaf_count >= self.capacity() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity(),
                count: self.leaf_count,
            })
            .wrap_with_cost(cost);
        }
        cost_return_on_error_no_add!(&cost, self.levels[0].append(leaf));
        cost.level_writes += 1;
        let offset = self.leaf_count;
        self.leaf_count += 1;
        trace!("added leaf {}", offset);

        if let Err(e) = self.propagate_add(leaf, offset, &mut cost) {
            warn!("propagation of leaf {} stopped midway: {}", offset, e);
            return Err(e).wrap_with_cost(cost);
        }
        Ok(offset).wrap_with_cost(cost)
    }

    // Every odd index on the way up closes a pair whose parent slot is
    // appended or refreshed; an even index is a lone right edge and the
    // digest moves up untouched.
    fn propagate_add(
        &mut self,
        leaf: Digest,
        offset: usize,
        cost: &mut OperationCost,
    ) -> Result<()> {
        let mut digest = leaf;
        let mut q = offset;
        let mut level = 0;
        while q > 0 {
            if q & 1 == 1 {
                let left = read_slot(&self.levels, level, q - 1, cost)?;
                digest = combine(&self.engine, &left, &digest, cost)?;
                let parent = self.level_mut(level + 1)?;
                parent.add_or_update(digest, q >> 1)?;
                cost.level_writes += 1;
            }
            q >>= 1;
            level += 1;
        }
        Ok(())
    }

    /// Recompute the root-ward digest of `leaf` as if it sat at `offset`.
    ///
    /// The result equals [`root`](Self::root) when `leaf` is the hash stored
    /// at `offset`. Nothing is modified. Fails with
    /// [`Error::IllegalParameter`] for a malformed hash or an offset past the
    /// last leaf.
    pub fn verify(&self, leaf: &[u8], offset: usize) -> CostResult<Digest, Error> {
        let cost = OperationCost::default();
        let leaf = cost_return_on_error_no_add!(&cost, to_digest(leaf));
        cost_return_on_error_no_add!(&cost, self.check_offset(offset));
        climb(&self.levels, &self.engine, leaf, offset)
    }

    /// [`verify`](Self::verify) `leaf` at `offset` and compare the result
    /// with a root the caller retained.
    pub fn verify_root(
        &self,
        leaf: &[u8],
        offset: usize,
        expected_root: &Digest,
    ) -> CostResult<bool, Error> {
        self.verify(leaf, offset)
            .map_ok(|digest| &digest == expected_root)
    }

    /// Replace the leaf at `offset` and rewrite every ancestor on its path.
    ///
    /// Uses the same climb as [`verify`](Self::verify). Ancestors that are
    /// only carried up (no right sibling yet) have no slot and are skipped.
    /// Writes made before a failure are not rolled back.
    pub fn update(&mut self, leaf: &[u8], offset: usize) -> CostResult<(), Error> {
        let mut cost = OperationCost::default();
        let leaf = cost_return_on_error_no_add!(&cost, to_digest(leaf));
        cost_return_on_error_no_add!(&cost, self.check_offset(offset));
        cost_return_on_error_no_add!(&cost, self.levels[0].update(leaf, offset));
        cost.level_writes += 1;
        trace!("updated leaf {}", offset);

        if let Err(e) = self.propagate_update(leaf, offset, &mut cost) {
            warn!("propagation of updated leaf {} stopped midway: {}", offset, e);
            return Err(e).wrap_with_cost(cost);
        }
        Ok(()).wrap_with_cost(cost)
    }

    fn propagate_update(
        &mut self,
        leaf: Digest,
        offset: usize,
        cost: &mut OperationCost,
    ) -> Result<()> {
        let mut cursor = PathCursor::new(leaf, offset);
        while let Some(step) = cursor.step(&self.levels, &self.engine, cost)? {
            if step == PathStep::Combined {
                let (level, index) = cursor.position();
                self.level_mut(level)?.update(cursor.digest(), index)?;
                cost.level_writes += 1;
            }
        }
        Ok(())
    }

    fn level_mut(&mut self, level: usize) -> Result<&mut S> {
        let len = self.levels.len();
        self.levels
            .get_mut(level)
            .ok_or(Error::IndexOutOfRange { index: level, len })
    }
}
