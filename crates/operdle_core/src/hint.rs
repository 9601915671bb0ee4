use std::fmt;

use serde::Serialize;

use crate::{Operation, OperationId, Puzzle};

/// Hint toward the canonical solution of a puzzle.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "operation", rename_all = "snake_case")]
pub enum Hint {
    /// Nothing has been placed yet; this is the first operation.
    Start(Operation),
    /// The first operation placed is not the canonical one; this is.
    WrongFirst(Operation),
    /// The operation that comes next.
    Next(Operation),
}
impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(op) => write!(f, "Try starting with: {}", op.label()),
            Self::WrongFirst(op) => write!(f, "The first operation should be: {}", op.label()),
            Self::Next(op) => write!(f, "Next operation: {}", op.label()),
        }
    }
}
impl Hint {
    /// Returns the operation that the hint suggests.
    pub fn operation(&self) -> &Operation {
        match self {
            Self::Start(op) | Self::WrongFirst(op) | Self::Next(op) => op,
        }
    }
}

impl Puzzle {
    /// Returns a hint for a partial ordering, or `None` if there is nothing
    /// left to suggest.
    ///
    /// Only the first operation of `submitted` is checked against the
    /// canonical solution.
    pub fn hint(&self, submitted: &[OperationId]) -> Option<Hint> {
        let canonical = |i: usize| self.operation(self.solution.get(i)?.as_ref()).cloned();

        let Some(first) = submitted.first() else {
            return canonical(0).map(Hint::Start);
        };
        if Some(first) != self.solution.first() {
            return canonical(0).map(Hint::WrongFirst);
        }
        canonical(submitted.len()).map(Hint::Next)
    }
}
