use thiserror::Error;

use crate::parse::ParseError;
use crate::types::{ConditionError, GrammarError, PositionalError};

/// Unified error type covering every stage from rule text to transformed word.
///
/// Returned by convenience methods like [`Rule::from_dsl()`](crate::Rule::from_dsl).
#[derive(Debug, Error)]
pub enum MorphoError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Positional(#[from] PositionalError),

    #[error(transparent)]
    Condition(#[from] ConditionError),
}
