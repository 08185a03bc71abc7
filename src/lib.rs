//! Evaluation of parenthesized logical queries against a knowledge store.
//!
//! A query such as `(intersect (parent tom ?) (likes ? pie))` is parsed into a
//! [`Term`] and reduced innermost-first by an [`Evaluator`] until it is a
//! single ground atom or a `(set ...)` of ground atoms. The store is any
//! implementation of [`World`]; [`MemoryWorld`] is a small in-memory one.

pub mod ast;
pub mod classify;
pub mod config;
pub mod error;
pub mod eval;
pub mod expand;
pub mod lexer;
pub mod negation;
pub mod parser;
pub mod tautology;
pub mod world;

pub use ast::Term;
pub use classify::{shape, Shape};
pub use config::EvalConfig;
pub use error::{EvalError, ParseError, Result};
pub use eval::{evaluate, evaluate_late, evaluate_str, Evaluator};
pub use expand::build_conjunction;
pub use negation::{complement, negate};
pub use parser::{parse, parse_all};
pub use tautology::is_tautology;
pub use world::{MemoryWorld, World};
