//! Shape predicates over terms.
//!
//! Shapes are always derived from the term as it currently stands; a term's
//! shape changes as its children are reduced, so nothing here is cached.

use crate::ast::{Term, SET};

pub const IF: &str = "if";
pub const INTERSECT: &str = "intersect";
pub const UNION: &str = "union";
pub const AND: &str = "and";
pub const OR: &str = "or";
pub const ONLY: &str = "only";
pub const ANY: &str = "any";
pub const LATE: &str = "late";
pub const NOT: &str = "not";
pub const COMPLEMENT: char = '!';

/// The syntactic role of a term, listed in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Atom,
    Conditional,
    Query,
    Intersection,
    Union,
    Disjunction,
    Conjunction,
    Limit,
    /// Not a set itself but holds a set-literal somewhere below.
    Expandable,
    Other,
}

pub fn shape(term: &Term) -> Shape {
    if is_atom(term) {
        Shape::Atom
    } else if is_conditional(term) {
        Shape::Conditional
    } else if is_query(term) {
        Shape::Query
    } else if is_intersection(term) {
        Shape::Intersection
    } else if is_union(term) {
        Shape::Union
    } else if is_disjunction(term) {
        Shape::Disjunction
    } else if is_conjunction(term) {
        Shape::Conjunction
    } else if is_limit(term) {
        Shape::Limit
    } else if !is_iterable(term) && contains_iterable(term) {
        Shape::Expandable
    } else {
        Shape::Other
    }
}

fn has_functor(term: &Term, name: &str) -> bool {
    term.functor() == Some(name)
}

pub fn is_atom(term: &Term) -> bool {
    term.is_atom()
}

pub fn is_conditional(term: &Term) -> bool {
    has_functor(term, IF)
}

/// True when a placeholder appears anywhere in the term.
pub fn is_query(term: &Term) -> bool {
    term.subterms().any(Term::is_placeholder)
}

pub fn is_intersection(term: &Term) -> bool {
    has_functor(term, INTERSECT)
}

pub fn is_union(term: &Term) -> bool {
    has_functor(term, UNION)
}

pub fn is_conjunction(term: &Term) -> bool {
    has_functor(term, AND)
}

pub fn is_disjunction(term: &Term) -> bool {
    has_functor(term, OR)
}

pub fn is_iterable(term: &Term) -> bool {
    has_functor(term, SET)
}

pub fn is_limit(term: &Term) -> bool {
    has_functor(term, ONLY) || has_functor(term, ANY)
}

pub fn is_late(term: &Term) -> bool {
    has_functor(term, LATE)
}

pub fn is_negative(term: &Term) -> bool {
    has_functor(term, NOT)
}

pub fn is_complement(term: &Term) -> bool {
    term.functor().is_some_and(|functor| functor.starts_with(COMPLEMENT))
}

/// True when a set-literal occurs anywhere in the term, the term itself included.
pub fn contains_iterable(term: &Term) -> bool {
    term.subterms().any(is_iterable)
}
