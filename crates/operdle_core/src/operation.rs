use std::borrow::Borrow;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::util::round_to_hundredths;

/// Kind of arithmetic operation, regardless of operand.
///
/// The declaration order is used when picking a kind at random.
///
/// **Changing the order will change every puzzle.**
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Display,
    AsRefStr,
    EnumIter,
    EnumCount,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum OperationKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Square,
    Cube,
    Sqrt,
}
impl OperationKind {
    /// Returns the kind at `index` in declaration order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Returns the range of operands generated for this kind, or `None` if it
    /// takes no operand.
    pub fn operand_range(self) -> Option<RangeInclusive<u32>> {
        match self {
            Self::Add | Self::Subtract => Some(1..=20),
            Self::Multiply | Self::Divide => Some(2..=9),
            Self::Square | Self::Cube | Self::Sqrt => None,
        }
    }

    /// Returns an action of this kind. `operand` is ignored for unary kinds.
    pub fn with_operand(self, operand: u32) -> Action {
        match self {
            Self::Add => Action::binary(BinaryOp::Add, operand),
            Self::Subtract => Action::binary(BinaryOp::Subtract, operand),
            Self::Multiply => Action::binary(BinaryOp::Multiply, operand),
            Self::Divide => Action::binary(BinaryOp::Divide, operand),
            Self::Square => Action::unary(UnaryOp::Square),
            Self::Cube => Action::unary(UnaryOp::Cube),
            Self::Sqrt => Action::unary(UnaryOp::Sqrt),
        }
    }
}

/// Operation that takes an operand.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Operation on the current value alone.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum UnaryOp {
    Square,
    Cube,
    /// Square root of the absolute value.
    Sqrt,
}

/// Arithmetic step applied to a running value.
///
/// Only binary operations carry an operand, so an operand on a unary operation
/// is unrepresentable.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "shape", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Action {
    Unary { op: UnaryOp },
    Binary { op: BinaryOp, operand: u32 },
}
impl Action {
    /// Constructs a unary action.
    pub fn unary(op: UnaryOp) -> Self {
        Self::Unary { op }
    }
    /// Constructs a binary action.
    pub fn binary(op: BinaryOp, operand: u32) -> Self {
        Self::Binary { op, operand }
    }

    /// Returns the kind of the action.
    pub fn kind(self) -> OperationKind {
        match self {
            Self::Binary { op, .. } => match op {
                BinaryOp::Add => OperationKind::Add,
                BinaryOp::Subtract => OperationKind::Subtract,
                BinaryOp::Multiply => OperationKind::Multiply,
                BinaryOp::Divide => OperationKind::Divide,
            },
            Self::Unary { op } => match op {
                UnaryOp::Square => OperationKind::Square,
                UnaryOp::Cube => OperationKind::Cube,
                UnaryOp::Sqrt => OperationKind::Sqrt,
            },
        }
    }

    /// Returns the operand, if the action is binary.
    pub fn operand(self) -> Option<u32> {
        match self {
            Self::Binary { operand, .. } => Some(operand),
            Self::Unary { .. } => None,
        }
    }

    /// Applies the action to `value`.
    ///
    /// Division and square root round to 2 decimal places immediately, so the
    /// rounded value is what the next action sees. Square root takes the
    /// absolute value first and never produces NaN. Division by zero produces
    /// a non-finite value.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Binary { op, operand } => {
                let k = f64::from(operand);
                match op {
                    BinaryOp::Add => value + k,
                    BinaryOp::Subtract => value - k,
                    BinaryOp::Multiply => value * k,
                    BinaryOp::Divide => round_to_hundredths(value / k),
                }
            }
            Self::Unary { op } => match op {
                UnaryOp::Square => value * value,
                UnaryOp::Cube => value * value * value,
                UnaryOp::Sqrt => round_to_hundredths(value.abs().sqrt()),
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Binary { op, operand } => {
                let symbol = match op {
                    BinaryOp::Add => '+',
                    BinaryOp::Subtract => '-',
                    BinaryOp::Multiply => '×',
                    BinaryOp::Divide => '÷',
                };
                write!(f, "{symbol}{operand}")
            }
            Self::Unary { op } => f.write_str(match op {
                UnaryOp::Square => "x²",
                UnaryOp::Cube => "x³",
                UnaryOp::Sqrt => "√x",
            }),
        }
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => return Err(ActionParseError::Empty),
            "x²" | "x^2" | "sq" | "square" => return Ok(Self::unary(UnaryOp::Square)),
            "x³" | "x^3" | "cube" => return Ok(Self::unary(UnaryOp::Cube)),
            "√x" | "√" | "sqrt" => return Ok(Self::unary(UnaryOp::Sqrt)),
            _ => (),
        }

        let mut chars = s.chars();
        let op = match chars.next() {
            Some('+') => BinaryOp::Add,
            Some('-' | '−') => BinaryOp::Subtract,
            Some('*' | '×' | 'x') => BinaryOp::Multiply,
            Some('/' | '÷') => BinaryOp::Divide,
            _ => return Err(ActionParseError::UnknownOperator(s.to_owned())),
        };
        let operand = chars
            .as_str()
            .trim()
            .parse()
            .map_err(|_| ActionParseError::BadOperand(s.to_owned()))?;
        Ok(Self::binary(op, operand))
    }
}

/// Error parsing an [`Action`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ActionParseError {
    #[error("empty operation")]
    Empty,
    #[error("unknown operation {0:?}")]
    UnknownOperator(String),
    #[error("bad operand in {0:?}; expected a nonnegative integer")]
    BadOperand(String),
}

/// Identifier of an operation, unique within a puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct OperationId(String);
impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl From<&str> for OperationId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
impl From<String> for OperationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
impl AsRef<str> for OperationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Borrow<str> for OperationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Operation in a puzzle: an [`Action`] with an ID and a display label.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    id: OperationId,
    #[serde(flatten)]
    action: Action,
    label: String,
}
impl Operation {
    /// Constructs an operation with an explicit ID.
    pub fn new(id: impl Into<OperationId>, action: Action) -> Self {
        Self {
            id: id.into(),
            action,
            label: action.to_string(),
        }
    }

    /// Constructs the operation generated for slot `index` of a puzzle.
    ///
    /// The ID contains the index, so it is unique even if two slots have the
    /// same action.
    pub fn generated(action: Action, index: usize) -> Self {
        let kind = action.kind();
        let id = match action.operand() {
            Some(operand) => format!("{kind}-{operand}-{index}"),
            None => format!("{kind}-{index}"),
        };
        Self::new(id, action)
    }

    /// Returns the ID of the operation.
    pub fn id(&self) -> &OperationId {
        &self.id
    }
    /// Returns the arithmetic action.
    pub fn action(&self) -> Action {
        self.action
    }
    /// Returns the display label, such as `+7` or `√x`.
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let labels = [
            (OperationKind::Add, "+7"),
            (OperationKind::Subtract, "-7"),
            (OperationKind::Multiply, "×7"),
            (OperationKind::Divide, "÷7"),
            (OperationKind::Square, "x²"),
            (OperationKind::Cube, "x³"),
            (OperationKind::Sqrt, "√x"),
        ];
        for (kind, expected) in labels {
            assert_eq!(expected, kind.with_operand(7).to_string());
            assert_eq!(Ok(kind.with_operand(7)), expected.parse());
        }
    }

    #[test]
    fn test_operand_only_on_binary_kinds() {
        for kind in OperationKind::iter() {
            let action = kind.with_operand(3);
            assert_eq!(kind, action.kind());
            assert_eq!(kind.operand_range().is_some(), action.operand().is_some());
        }
        assert_eq!(7, OperationKind::COUNT);
        assert_eq!(Some(OperationKind::Sqrt), OperationKind::from_index(6));
        assert_eq!(None, OperationKind::from_index(7));
    }

    #[test]
    fn test_generated_ids() {
        let op = Operation::generated(OperationKind::Multiply.with_operand(3), 1);
        assert_eq!("multiply-3-1", op.id().as_ref());
        assert_eq!("×3", op.label());
        let op = Operation::generated(OperationKind::Sqrt.with_operand(0), 4);
        assert_eq!("sqrt-4", op.id().as_ref());
    }

    #[test]
    fn test_apply() {
        let add = |k| Action::binary(BinaryOp::Add, k);
        assert_eq!(15.0, add(5).apply(10.0));
        assert_eq!(5.0, Action::binary(BinaryOp::Subtract, 5).apply(10.0));
        assert_eq!(30.0, Action::binary(BinaryOp::Multiply, 3).apply(10.0));
        assert_eq!(3.33, Action::binary(BinaryOp::Divide, 3).apply(10.0));
        assert_eq!(100.0, Action::unary(UnaryOp::Square).apply(10.0));
        assert_eq!(-1000.0, Action::unary(UnaryOp::Cube).apply(-10.0));
        assert_eq!(3.0, Action::unary(UnaryOp::Sqrt).apply(-9.0));
        assert_eq!(1.41, Action::unary(UnaryOp::Sqrt).apply(2.0));
        assert!(!Action::binary(BinaryOp::Divide, 0).apply(1.0).is_finite());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Err(ActionParseError::Empty), "  ".parse::<Action>());
        assert!(matches!(
            "%3".parse::<Action>(),
            Err(ActionParseError::UnknownOperator(_)),
        ));
        assert!(matches!(
            "+x".parse::<Action>(),
            Err(ActionParseError::BadOperand(_)),
        ));
        assert_eq!(Ok(Action::binary(BinaryOp::Multiply, 4)), "*4".parse());
        assert_eq!(Ok(Action::binary(BinaryOp::Divide, 2)), "/ 2".parse());
    }
}
