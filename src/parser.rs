//! Builds nested terms from bracketed text.
//!
//! Parsing keeps its own stack of open compounds instead of recursing, so
//! deeply nested input cannot exhaust the call stack.

use crate::ast::Term;
use crate::error::ParseError;
use crate::lexer::{Lexer, Spanned, Token};

struct Open {
    position: usize,
    functor: Option<String>,
    args: Vec<Term>,
}

/// Parses exactly one term.
pub fn parse(input: &str) -> Result<Term, ParseError> {
    let mut terms = parse_spanned(input)?.into_iter();

    let (_, term) = terms.next().ok_or(ParseError::Empty)?;

    if let Some((position, _)) = terms.next() {
        return Err(ParseError::TrailingInput { position });
    }

    Ok(term)
}

/// Parses every top-level term in `input`, in order.
pub fn parse_all(input: &str) -> Result<Vec<Term>, ParseError> {
    Ok(parse_spanned(input)?
        .into_iter()
        .map(|(_, term)| term)
        .collect())
}

fn parse_spanned(input: &str) -> Result<Vec<(usize, Term)>, ParseError> {
    let mut stack: Vec<Open> = Vec::new();
    let mut terms = Vec::new();
    let mut start = 0;

    for Spanned { token, position } in Lexer::new(input) {
        if stack.is_empty() {
            start = position;
        }

        match token {
            Token::LParen => {
                if let Some(parent) = stack.last() {
                    if parent.functor.is_none() {
                        return Err(ParseError::CompoundOperator { position });
                    }
                }

                stack.push(Open {
                    position,
                    functor: None,
                    args: Vec::new(),
                });
            }
            Token::Symbol(symbol) => match stack.last_mut() {
                None => terms.push((start, Term::atom(symbol))),
                Some(open) if open.functor.is_none() => open.functor = Some(symbol.to_string()),
                Some(open) => open.args.push(Term::atom(symbol)),
            },
            Token::RParen => {
                let open = stack
                    .pop()
                    .ok_or(ParseError::UnexpectedClose { position })?;
                let functor = open.functor.ok_or(ParseError::EmptyCompound {
                    position: open.position,
                })?;

                let term = Term::Compound {
                    functor,
                    args: open.args,
                };

                match stack.last_mut() {
                    None => terms.push((start, term)),
                    Some(parent) => parent.args.push(term),
                }
            }
        }
    }

    if let Some(open) = stack.first() {
        return Err(ParseError::Unclosed {
            position: open.position,
        });
    }

    Ok(terms)
}
