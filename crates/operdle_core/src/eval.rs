use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::util::round_to_hundredths;
use crate::{Action, Operation, TOLERANCE};

/// Result of evaluating one candidate ordering.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Evaluation {
    /// Final value, rounded to 2 decimal places.
    pub result: f64,
    /// Whether the candidate is accepted as a solution.
    pub correct: bool,
}

/// Applies `actions` to `start` from left to right and rounds the final value
/// to 2 decimal places.
///
/// If any intermediate value is non-finite, the result is 0.
pub fn calculate_result(start: f64, actions: impl IntoIterator<Item = Action>) -> f64 {
    let mut value = start;
    for action in actions {
        value = action.apply(value);
        if !value.is_finite() {
            return 0.0;
        }
    }
    round_to_hundredths(value)
}

/// Evaluates `candidate` and compares the result against `target`.
///
/// This does not check that `candidate` uses every operation; see
/// [`check_completion()`].
pub fn validate_solution<'a>(
    start: f64,
    target: f64,
    candidate: impl IntoIterator<Item = &'a Operation>,
) -> Evaluation {
    let result = calculate_result(start, candidate.into_iter().map(Operation::action));
    Evaluation {
        result,
        correct: (result - target).abs() < TOLERANCE,
    }
}

/// Returns whether `candidate` uses each operation in `available` exactly
/// once and nothing else.
pub fn is_permutation(candidate: &[&Operation], available: &[Operation]) -> bool {
    if candidate.len() != available.len() {
        return false;
    }
    let used: HashSet<_> = candidate.iter().map(|op| op.id()).collect();
    let expected: HashSet<_> = available.iter().map(|op| op.id()).collect();
    used == expected
}

/// Returns whether `candidate` is a complete and correct solution: it must be
/// a permutation of `available`, and only then is its result compared against
/// `target`.
pub fn check_completion(
    start: f64,
    target: f64,
    candidate: &[&Operation],
    available: &[Operation],
) -> bool {
    is_permutation(candidate, available)
        && validate_solution(start, target, candidate.iter().copied()).correct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinaryOp, UnaryOp};

    fn op(id: &str, s: &str) -> Operation {
        Operation::new(id, s.parse().unwrap())
    }

    #[test]
    fn test_calculate_result_order_matters() {
        let ops = [op("a", "+5"), op("b", "×2"), op("c", "-3")];
        let actions = |order: [usize; 3]| order.map(|i| ops[i].action());
        assert_eq!(27.0, calculate_result(10.0, actions([0, 1, 2])));
        assert_eq!(19.0, calculate_result(10.0, actions([2, 1, 0])));
    }

    #[test]
    fn test_division_rounds_before_next_step() {
        let third = Action::binary(BinaryOp::Divide, 3);
        let triple = Action::binary(BinaryOp::Multiply, 3);
        // 10 / 3 = 3.33, then * 3 = 9.99 (not 10)
        assert_eq!(9.99, calculate_result(10.0, [third, triple]));
        assert_eq!(
            calculate_result(10.0, [third, triple]),
            calculate_result(10.0, [third, triple]),
        );
    }

    #[test]
    fn test_non_finite_forces_zero() {
        let div_zero = Action::binary(BinaryOp::Divide, 0);
        let add = Action::binary(BinaryOp::Add, 7);
        assert_eq!(0.0, calculate_result(4.0, [div_zero, add]));

        let cube = Action::unary(UnaryOp::Cube);
        assert_eq!(0.0, calculate_result(1e200, [cube]));
    }

    #[test]
    fn test_validate_solution_tolerance() {
        let ops = [op("a", "÷3")];
        assert!(validate_solution(10.0, 3.333, &ops).correct);
        assert!(validate_solution(10.0, 3.335, &ops).correct);
        assert!(!validate_solution(10.0, 3.35, &ops).correct);
        assert_eq!(3.33, validate_solution(10.0, 0.0, &ops).result);
    }

    #[test]
    fn test_check_completion_gate() {
        // Every ordering (and several non-orderings) of these yields 10.
        let ops = [op("a", "+0"), op("b", "+0"), op("c", "+3"), op("d", "-3")];
        let [a, b, c, d] = [&ops[0], &ops[1], &ops[2], &ops[3]];
        let foreign = op("z", "+0");

        assert!(check_completion(10.0, 10.0, &[d, c, b, a], &ops));
        assert!(check_completion(10.0, 10.0, &[a, b, c, d], &ops));

        // Omitted
        assert!(validate_solution(10.0, 10.0, [a, c, d]).correct);
        assert!(!check_completion(10.0, 10.0, &[a, c, d], &ops));
        // Duplicated
        assert!(validate_solution(10.0, 10.0, [a, a, c, d]).correct);
        assert!(!check_completion(10.0, 10.0, &[a, a, c, d], &ops));
        // Foreign
        assert!(validate_solution(10.0, 10.0, [a, &foreign, c, d]).correct);
        assert!(!check_completion(10.0, 10.0, &[a, &foreign, c, d], &ops));
        // Extra
        assert!(!check_completion(10.0, 10.0, &[a, b, c, d, &foreign], &ops));
        // Wrong answer
        assert!(!check_completion(10.0, 11.0, &[a, b, c, d], &ops));
    }
}
