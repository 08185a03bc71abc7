//! Error types for parsing and evaluation.

use thiserror::Error;

use crate::ast::Term;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("unexpected ')' at byte {position}")]
    UnexpectedClose { position: usize },

    #[error("'(' at byte {position} is never closed")]
    Unclosed { position: usize },

    #[error("empty compound term at byte {position}")]
    EmptyCompound { position: usize },

    #[error("operator at byte {position} must be a bare token")]
    CompoundOperator { position: usize },

    #[error("unexpected input after term at byte {position}")]
    TrailingInput { position: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The term has no answer under the current world state.
    #[error("null statement: {0}")]
    NullStatement(Term),

    /// A bounded selection cannot be satisfied with the available candidates.
    #[error("ambiguous statement: {0}")]
    AmbigiousStatement(Term),

    #[error("malformed term {term}: {reason}")]
    Malformed { term: Term, reason: &'static str },

    #[error("term nesting exceeds depth limit of {0}")]
    DepthLimitExceeded(usize),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, EvalError>;
