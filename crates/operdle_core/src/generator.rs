use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;
use strum::EnumCount;

use crate::random::{Seed, pseudo_random_in, pseudo_random_index};
use crate::util::round_to_hundredths;
use crate::{
    Action, MAX_SEARCH_ATTEMPTS, Operation, OperationId, OperationKind, TARGET_LIMIT, UnaryOp,
};

/// Seed offset between consecutive operation slots.
const SLOT_SEED_STRIDE: Seed = 1000;

/// Generates `count` operations from `seed`.
///
/// Slot `i` uses the seed `seed + i * 1000` to pick its kind and the next seed
/// to pick its operand.
pub fn generate_operations(seed: Seed, count: usize) -> Vec<Operation> {
    (0..count)
        .map(|i| {
            let slot_seed = seed + i as Seed * SLOT_SEED_STRIDE;
            let kind_index = pseudo_random_index(slot_seed, OperationKind::COUNT);
            let kind = OperationKind::from_index(kind_index).unwrap_or(OperationKind::Add);
            let operand = kind
                .operand_range()
                .map_or(0, |range| pseudo_random_in(slot_seed + 1, range));
            Operation::generated(kind.with_operand(operand), i)
        })
        .collect()
}

/// Ordering of every operation in a puzzle along with the value it reaches.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Value reached, rounded to 2 decimal places.
    pub target: f64,
    /// Operation IDs in the order they are applied.
    pub order: Vec<OperationId>,
}

/// Searches random orderings of `operations` for one that stays within range.
///
/// An ordering is abandoned as soon as a value exceeds [`TARGET_LIMIT`], is
/// non-finite, or is negative right after a square root. It is accepted if
/// the final value, rounded to 2 decimal places, is strictly between 0 and
/// [`TARGET_LIMIT`]. Returns `None` if none of [`MAX_SEARCH_ATTEMPTS`]
/// orderings are accepted.
pub fn find_solution(
    start: f64,
    operations: &[Operation],
    rng: &mut impl Rng,
) -> Option<Solution> {
    let mut order = operations.iter().collect_vec();
    for attempt in 0..MAX_SEARCH_ATTEMPTS {
        order.shuffle(rng);
        match try_ordering(start, &order) {
            Some(target) => {
                let order = order.iter().map(|op| op.id().clone()).collect_vec();
                log::debug!("accepted ordering {order:?} after {attempt} rejections");
                return Some(Solution { target, order });
            }
            None => log::trace!("rejected ordering on attempt {attempt}"),
        }
    }
    None
}

/// Returns the rounded final value if the ordering is acceptable.
fn try_ordering(start: f64, order: &[&Operation]) -> Option<f64> {
    let mut value = start;
    for op in order {
        value = op.action().apply(value);
        let is_sqrt = matches!(op.action(), Action::Unary { op: UnaryOp::Sqrt });
        if (is_sqrt && value < 0.0) || value > TARGET_LIMIT || !value.is_finite() {
            return None;
        }
    }
    let target = round_to_hundredths(value);
    (target.is_finite() && 0.0 < target && target < TARGET_LIMIT).then_some(target)
}
