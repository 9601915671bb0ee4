//! Daily arithmetic puzzle generator and solution checker.
//!
//! Every calendar date maps to exactly one [`Puzzle`]: a starting number, a
//! target number, and a handful of operations that must all be applied, in
//! some order, to turn the start into the target.
//!
//! # Example
//!
//! ```rust
//! let puzzle = operdle_core::puzzle_for_date_str("2024-06-01").unwrap();
//! let evaluation = puzzle.evaluate(&puzzle.solution);
//! assert!(evaluation.correct);
//! ```

#[macro_use]
extern crate lazy_static;

mod date;
mod eval;
mod generator;
mod hint;
mod operation;
mod puzzle;
pub mod random;
pub mod util;

pub use date::{DateParseError, GAME_START_DATE, PuzzleDate, is_playable};
pub use eval::{Evaluation, calculate_result, check_completion, is_permutation, validate_solution};
pub use generator::{Solution, find_solution, generate_operations};
pub use hint::Hint;
pub use operation::{Action, ActionParseError, BinaryOp, Operation, OperationId, OperationKind, UnaryOp};
pub use puzzle::{Puzzle, puzzle_for_date_str};

/// Version string such as `operdle_core v1.2.3`.
pub const ENGINE_VERSION_STRING: &str =
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

/// Absolute tolerance when comparing a result against the target.
pub const TOLERANCE: f64 = 0.01;

/// Minimum number of operations in a generated puzzle.
pub const MIN_OPERATIONS: usize = 3;
/// Maximum number of operations in a generated puzzle.
pub const MAX_OPERATIONS: usize = 6;

/// Number of random orderings tried before giving up on a generated operation
/// set and using the fallback puzzle.
///
/// **Changing this will change the puzzles for some dates.**
pub const MAX_SEARCH_ATTEMPTS: usize = 100;

/// Exclusive upper bound on the target and on every intermediate value of the
/// canonical solution.
pub const TARGET_LIMIT: f64 = 10_000.0;

#[cfg(test)]
mod tests;
