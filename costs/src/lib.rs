#![deny(missing_docs)]
//! Cost accounting for levelled Merkle tree operations.
//!
//! Every tree operation reports how many times it hashed a pair of nodes
//! and how many level slots it read and wrote, so callers can compare the
//! incremental work against a full rebuild.

mod context;

use std::ops::{Add, AddAssign};

pub use context::{CostContext, CostResult, CostsExt};

/// Resources touched by a single operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times two child hashes were combined.
    pub hash_node_calls: u32,
    /// How many level slots were read.
    pub level_reads: u32,
    /// How many level slots were appended or overwritten.
    pub level_writes: u32,
}

impl OperationCost {
    /// Cost of `hash_node_calls` combines and nothing else.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// Cost of `level_reads` slot reads and nothing else.
    pub fn with_level_reads(level_reads: u32) -> Self {
        OperationCost {
            level_reads,
            ..Default::default()
        }
    }

    /// Cost of `level_writes` slot writes and nothing else.
    pub fn with_level_writes(level_writes: u32) -> Self {
        OperationCost {
            level_writes,
            ..Default::default()
        }
    }

    /// Whether nothing was spent.
    pub fn is_nothing(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
            level_reads: self.level_reads + rhs.level_reads,
            level_writes: self.level_writes + rhs.level_writes,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_node_calls += rhs.hash_node_calls;
        self.level_reads += rhs.level_reads;
        self.level_writes += rhs.level_writes;
    }
}

/// `?` for `CostResult`: unwraps the value, adds its cost to the accumulator
/// and returns early with the accumulated cost on error.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// `?` for a plain `Result` inside a function returning `CostResult`; only
/// the costs accumulated so far are returned on error.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reads(level_reads: u32) -> OperationCost {
        OperationCost::with_level_reads(level_reads)
    }

    #[test]
    fn test_add_costs() {
        let total = OperationCost::with_hash_node_calls(2) + reads(3) + reads(1);
        assert_eq!(
            total,
            OperationCost {
                hash_node_calls: 2,
                level_reads: 4,
                level_writes: 0,
            }
        );
        assert!(!total.is_nothing());
        assert!(OperationCost::default().is_nothing());
    }

    #[test]
    fn test_map_ok_keeps_cost() {
        let initial: CostResult<usize, ()> = Ok(75).wrap_with_cost(reads(3));
        assert_eq!(initial.map_ok(|x| x + 25), Ok(100).wrap_with_cost(reads(3)));
    }

    #[test]
    fn test_map_ok_err() {
        let initial: CostResult<usize, ()> = Err(()).wrap_with_cost(reads(3));
        assert_eq!(initial.map_ok(|x| x + 25), Err(()).wrap_with_cost(reads(3)));
    }

    #[test]
    fn test_flat_map_ok_sums_costs() {
        let initial: CostResult<usize, ()> = Ok(75).wrap_with_cost(reads(3));
        let mapped = initial.flat_map_ok(|x| Ok(x + 25).wrap_with_cost(reads(7)));
        assert_eq!(mapped, Ok(100).wrap_with_cost(reads(10)));
    }

    #[test]
    fn test_flat_map_ok_skips_on_err() {
        let initial: CostResult<usize, ()> = Err(()).wrap_with_cost(reads(3));
        let mapped = initial.flat_map_ok(|x| Ok(x + 25).wrap_with_cost(reads(7)));
        assert_eq!(mapped, Err(()).wrap_with_cost(reads(3)));
    }

    fn two_steps(fail_second: bool) -> CostResult<u32, &'static str> {
        let mut cost = OperationCost::default();
        let a = cost_return_on_error!(&mut cost, Ok(1).wrap_with_cost(reads(1)));
        let b = cost_return_on_error!(
            &mut cost,
            if fail_second {
                Err("boom").wrap_with_cost(reads(2))
            } else {
                Ok(2).wrap_with_cost(reads(2))
            }
        );
        Ok(a + b).wrap_with_cost(cost)
    }

    #[test]
    fn test_cost_return_on_error_keeps_spent_cost() {
        assert_eq!(two_steps(false), Ok(3).wrap_with_cost(reads(3)));
        assert_eq!(two_steps(true), Err("boom").wrap_with_cost(reads(3)));
    }

    #[test]
    fn test_cost_return_on_error_no_add() {
        fn check(input: Result<u32, ()>) -> CostResult<u32, ()> {
            let cost = reads(5);
            let x = cost_return_on_error_no_add!(&cost, input);
            Ok(x).wrap_with_cost(cost)
        }
        assert_eq!(check(Ok(4)), Ok(4).wrap_with_cost(reads(5)));
        assert_eq!(check(Err(())), Err(()).wrap_with_cost(reads(5)));
    }
}
