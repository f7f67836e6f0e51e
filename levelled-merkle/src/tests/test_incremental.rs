use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::*;

proptest! {
    #[test]
    fn test_verify_matches_root(count in 1u32..300, pick in any::<prop::sample::Index>()) {
        let (tree, leaves) = tree_with_leaves(count, 12);
        let offset = pick.index(leaves.len());
        let root = tree.root().expect("root");
        prop_assert_eq!(root, reference_root(&leaves));
        prop_assert_eq!(tree.verify(&leaves[offset], offset).unwrap().ok(), root);
    }

    #[test]
    fn test_random_updates_match_rebuild(count in 1u32..200, seed in any::<u64>(), updates in 1usize..20) {
        let (mut tree, mut leaves) = tree_with_leaves(count, 12);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..updates {
            let offset = rng.gen_range(0..leaves.len());
            let leaf = leaf_from_u32(rng.gen_range(1_000..u32::MAX));
            tree.update(&leaf, offset).unwrap().expect("update");
            leaves[offset] = leaf;
        }
        prop_assert_eq!(tree.root(), Ok(reference_root(&leaves)));
        assert_levels_match_reference(&tree, &leaves);
    }
}
