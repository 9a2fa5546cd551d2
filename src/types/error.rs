use thiserror::Error;

use super::operation::OperationKind;
use super::text;

/// A parse tree that matched the grammar but encodes an invalid rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("optional group '{text}' must carry exactly one '^' marker, found {markers}")]
    MalformedOptional { text: String, markers: usize },

    #[error("expected {expected} node, found '{found}'")]
    UnexpectedNode { expected: &'static str, found: String },

    #[error("{operation} takes {expected} operand(s), found {found}")]
    OperandCount {
        operation: OperationKind,
        expected: usize,
        found: usize,
    },
}

/// Failures while addressing a position inside a word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionalError {
    #[error("positions are 1-based; 0 does not address anything")]
    ZeroIndex,

    #[error("position {at} does not exist in a word with {units} addressable units")]
    OutOfRange { at: i32, units: usize },

    #[error("expected '{expected}' at position {at}, found '{found}'")]
    Mismatch {
        expected: String,
        found: String,
        at: i32,
    },
}

impl PositionalError {
    /// Restate an error raised while solving the reversed problem of position `at`.
    pub(crate) fn unmirror(self, at: i32) -> Self {
        match self {
            PositionalError::ZeroIndex => PositionalError::ZeroIndex,
            PositionalError::OutOfRange { units, .. } => PositionalError::OutOfRange { at, units },
            PositionalError::Mismatch {
                expected, found, ..
            } => PositionalError::Mismatch {
                expected: text::reverse(&expected),
                found: text::reverse(&found),
                at,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("no condition applies")]
    NoConditionApplies,

    #[error("invalid condition pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
