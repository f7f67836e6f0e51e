use levelled_merkle_costs::{
    CostContext, CostResult, CostsExt, OperationCost, cost_return_on_error,
};

fn hash_step(fail: bool) -> CostResult<[u8; 2], String> {
    let cost = OperationCost {
        hash_node_calls: 1,
        level_reads: 1,
        level_writes: 0,
    };
    if fail {
        Err("combine failed".to_string()).wrap_with_cost(cost)
    } else {
        Ok([1, 2]).wrap_with_cost(cost)
    }
}

fn climb(levels: usize, fail_at: Option<usize>) -> CostResult<usize, String> {
    let mut cost = OperationCost::default();
    for level in 0..levels {
        cost_return_on_error!(&mut cost, hash_step(Some(level) == fail_at));
        cost += OperationCost::with_level_writes(1);
    }
    Ok(levels).wrap_with_cost(cost)
}

#[test]
fn complete_climb_sums_every_step() {
    let result = climb(3, None);
    assert_eq!(result.value, Ok(3));
    assert_eq!(
        result.cost,
        OperationCost {
            hash_node_calls: 3,
            level_reads: 3,
            level_writes: 3,
        }
    );
}

#[test]
fn failed_climb_reports_cost_spent_so_far() {
    let result = climb(5, Some(2));
    assert_eq!(result.value, Err("combine failed".to_string()));
    assert_eq!(
        result.cost,
        OperationCost {
            hash_node_calls: 3,
            level_reads: 3,
            level_writes: 2,
        }
    );
}

#[test]
fn unwrap_add_cost_accumulates() {
    let mut total = OperationCost::default();
    let first: CostContext<u8> = 4.wrap_with_cost(OperationCost::with_level_reads(2));
    let second: CostContext<u8> = 6.wrap_with_cost(OperationCost::with_hash_node_calls(1));
    let sum = first.unwrap_add_cost(&mut total) + second.unwrap_add_cost(&mut total);
    assert_eq!(sum, 10);
    assert_eq!(
        total,
        OperationCost::with_level_reads(2) + OperationCost::with_hash_node_calls(1)
    );
}

#[test]
fn map_err_and_add_cost() {
    let result: CostResult<u8, u8> = Err(1).wrap_with_cost(OperationCost::with_level_reads(1));
    let mapped = result
        .map_err(|e| format!("error {}", e))
        .add_cost(OperationCost::with_level_writes(1));
    assert_eq!(mapped.value(), &Err("error 1".to_string()));
    assert_eq!(
        mapped.cost(),
        &(OperationCost::with_level_reads(1) + OperationCost::with_level_writes(1))
    );
}
