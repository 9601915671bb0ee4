use itertools::Itertools;
use rand::Rng;
use serde::Serialize;

use crate::random::{pseudo_random_in, search_rng};
use crate::{
    Action, BinaryOp, DateParseError, Evaluation, MAX_OPERATIONS, MIN_OPERATIONS, Operation,
    OperationId, PuzzleDate, find_solution, generate_operations, is_permutation,
    validate_solution,
};

/// Daily puzzle: apply every operation exactly once, in some order, to turn
/// the starting number into the target number.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// Date of the puzzle.
    pub date: PuzzleDate,
    /// Number to start from, between 1 and 99.
    pub starting_number: u32,
    /// Number to reach, with at most 2 decimal places.
    pub target_number: f64,
    /// Operations in display order, which is not the solution order.
    pub operations: Vec<Operation>,
    /// One valid ordering of every operation ID.
    pub solution: Vec<OperationId>,
}

/// Parses `date` and returns its puzzle.
pub fn puzzle_for_date_str(date: &str) -> Result<Puzzle, DateParseError> {
    Ok(Puzzle::for_date(date.parse()?))
}

impl Puzzle {
    /// Generates the puzzle for `date`.
    ///
    /// This is a pure function of the date.
    pub fn for_date(date: PuzzleDate) -> Self {
        let seed = date.seed();
        let starting_number = pseudo_random_in(seed, 1..=99);
        let operation_count =
            pseudo_random_in(seed + 100, MIN_OPERATIONS as u32..=MAX_OPERATIONS as u32) as usize;
        let operations = generate_operations(seed + 200, operation_count);
        Self::from_operations(date, starting_number, operations, &mut search_rng(date))
    }

    /// Constructs a puzzle from a starting number and a set of operations by
    /// searching for an ordering with `rng`. If no ordering is found, returns
    /// [`Puzzle::fallback()`] instead.
    pub fn from_operations(
        date: PuzzleDate,
        starting_number: u32,
        operations: Vec<Operation>,
        rng: &mut impl Rng,
    ) -> Self {
        match find_solution(f64::from(starting_number), &operations, rng) {
            Some(solution) => Self {
                date,
                starting_number,
                target_number: solution.target,
                operations,
                solution: solution.order,
            },
            None => {
                log::warn!("no solvable ordering found for {date}; using fallback puzzle");
                Self::fallback(date, starting_number)
            }
        }
    }

    /// Returns the fixed puzzle `+5 ×2 -3` for a starting number.
    pub fn fallback(date: PuzzleDate, starting_number: u32) -> Self {
        let operations = vec![
            Operation::new("add-5", Action::binary(BinaryOp::Add, 5)),
            Operation::new("multiply-2", Action::binary(BinaryOp::Multiply, 2)),
            Operation::new("subtract-3", Action::binary(BinaryOp::Subtract, 3)),
        ];
        let solution = operations.iter().map(|op| op.id().clone()).collect();
        Self {
            date,
            starting_number,
            target_number: f64::from((starting_number + 5) * 2 - 3),
            operations,
            solution,
        }
    }

    /// Returns the operation with the given ID.
    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id().as_ref() == id)
    }

    /// Looks up operations by ID, skipping IDs that are not in the puzzle.
    pub fn resolve<'a>(&self, ids: impl IntoIterator<Item = &'a OperationId>) -> Vec<&Operation> {
        ids.into_iter()
            .filter_map(|id| {
                let op = self.operation(id.as_ref());
                if op.is_none() {
                    log::debug!("ignoring unknown operation {id} in puzzle for {}", self.date);
                }
                op
            })
            .collect_vec()
    }

    /// Evaluates a candidate ordering of operation IDs.
    ///
    /// The result is computed from the IDs that belong to the puzzle. The
    /// candidate is correct only if it uses every operation exactly once and
    /// reaches the target.
    pub fn evaluate(&self, candidate: &[OperationId]) -> Evaluation {
        let ops = self.resolve(candidate);
        let start = f64::from(self.starting_number);
        let numeric = validate_solution(start, self.target_number, ops.iter().copied());
        let is_complete = ops.len() == candidate.len() && is_permutation(&ops, &self.operations);
        Evaluation {
            result: numeric.result,
            correct: is_complete && numeric.correct,
        }
    }

    /// Returns whether a candidate ordering is a complete and correct solution.
    pub fn check_completion(&self, candidate: &[OperationId]) -> bool {
        self.evaluate(candidate).correct
    }
}
