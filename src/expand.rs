//! Conjunction expansion.
//!
//! A term whose argument slots hold set-literals stands for every ground term
//! obtained by picking one member per slot. `(p (set a b) (set c d e))`
//! expands to `(and (p a c) (p a d) (p a e) (p b c) (p b d) (p b e))`.

use crate::ast::Term;
use crate::classify::{contains_iterable, is_iterable, AND};

pub fn build_conjunction(term: Term) -> Term {
    if is_iterable(&term) || !contains_iterable(&term) {
        return term;
    }

    let (functor, args) = match term {
        Term::Compound { functor, args } => (functor, args),
        atom => return atom,
    };

    let pieces: Vec<Vec<Term>> = args
        .into_iter()
        .map(build_conjunction)
        .map(Term::into_elements)
        .collect();

    let conjuncts = cartesian_product(&pieces)
        .into_iter()
        .map(|combination| Term::compound(functor.clone(), combination))
        .collect();

    Term::compound(AND, conjuncts)
}

// Leftmost slot varies slowest.
fn cartesian_product(pieces: &[Vec<Term>]) -> Vec<Vec<Term>> {
    pieces.iter().fold(vec![Vec::new()], |combinations, piece| {
        combinations
            .iter()
            .flat_map(|prefix| {
                piece.iter().map(move |item| {
                    let mut next = prefix.clone();
                    next.push(item.clone());
                    next
                })
            })
            .collect()
    })
}
