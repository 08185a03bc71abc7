//! Property-based tests for parsing, set operations and expansion.

use std::collections::BTreeSet;

use lq::{build_conjunction, evaluate, parse, EvalError, MemoryWorld, Term};
use proptest::prelude::*;

const SYMBOLS: &[&str] = &["a", "b", "c", "d", "e", "f"];
const FUNCTORS: &[&str] = &["p", "q", "likes", "set"];

fn arb_symbol() -> impl Strategy<Value = String> {
    prop::sample::select(SYMBOLS).prop_map(str::to_string)
}

fn arb_term(max_depth: u32) -> BoxedStrategy<Term> {
    let leaf = prop_oneof![
        4 => arb_symbol().prop_map(Term::Atom),
        1 => Just(Term::atom("?")),
    ];

    if max_depth == 0 {
        return leaf.boxed();
    }

    prop_oneof![
        3 => leaf,
        2 => (
            prop::sample::select(FUNCTORS),
            prop::collection::vec(arb_term(max_depth - 1), 0..=3),
        )
            .prop_map(|(functor, args)| Term::compound(functor, args)),
    ]
    .boxed()
}

/// Distinct atoms, preserving first-seen order.
fn arb_members(max: usize) -> impl Strategy<Value = Vec<Term>> {
    prop::sample::subsequence(SYMBOLS, 1..=max)
        .prop_map(|names| names.into_iter().map(Term::atom).collect())
}

fn as_set(term: &Term) -> BTreeSet<String> {
    term.elements().iter().map(Term::to_string).collect()
}

proptest! {
    #[test]
    fn prop_parse_serialize_round_trip(term in arb_term(3)) {
        let text = term.to_string();
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(reparsed.to_string(), text);
        prop_assert_eq!(reparsed, term);
    }

    #[test]
    fn prop_whitespace_is_insignificant(term in arb_term(3)) {
        prop_assume!(!term.is_atom());
        let spaced = term.to_string().replace('(', " ( ").replace(')', " )\n");
        prop_assert_eq!(parse(&spaced).unwrap(), term);
    }

    #[test]
    fn prop_atoms_are_fixed_points(name in arb_symbol()) {
        let world = MemoryWorld::new();
        let atom = Term::atom(name);
        prop_assert_eq!(evaluate(&world, &atom).unwrap(), atom);
    }

    #[test]
    fn prop_intersection_commutes(left in arb_members(6), right in arb_members(6)) {
        let world = MemoryWorld::new();
        let forward = evaluate(&world, &Term::compound("intersect", vec![Term::set(left.clone()), Term::set(right.clone())]));
        let backward = evaluate(&world, &Term::compound("intersect", vec![Term::set(right), Term::set(left)]));

        match (forward, backward) {
            (Ok(f), Ok(b)) => prop_assert_eq!(as_set(&f), as_set(&b)),
            (Err(EvalError::NullStatement(_)), Err(EvalError::NullStatement(_))) => {}
            (f, b) => prop_assert!(false, "mismatch: {:?} vs {:?}", f, b),
        }
    }

    #[test]
    fn prop_any_is_deterministic_prefix(members in arb_members(6), count in 1usize..=6) {
        prop_assume!(count <= members.len());
        let world = MemoryWorld::new();
        let query = Term::compound("any", vec![Term::set(members.clone()), Term::atom(count.to_string())]);

        let first = evaluate(&world, &query).unwrap();
        let second = evaluate(&world, &query).unwrap();
        prop_assert_eq!(&first, &second);

        let picked = first.elements().to_vec();
        prop_assert_eq!(picked.len(), count);
        prop_assert_eq!(picked.as_slice(), &members[..count]);
    }

    #[test]
    fn prop_only_requires_exact_count(members in arb_members(6), count in 0usize..=7) {
        let world = MemoryWorld::new();
        let set = Term::set(members.clone());
        let query = Term::compound("only", vec![set.clone(), Term::atom(count.to_string())]);

        match evaluate(&world, &query) {
            Ok(result) => {
                prop_assert_eq!(count, members.len());
                prop_assert_eq!(as_set(&result), as_set(&set));
            }
            Err(EvalError::AmbigiousStatement(_)) => prop_assert_ne!(count, members.len()),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn prop_expansion_is_product_of_set_sizes(left in arb_members(4), right in arb_members(4)) {
        let (k1, k2) = (left.len(), right.len());
        let term = Term::compound("p", vec![Term::set(left), Term::atom("x"), Term::set(right)]);

        let expanded = build_conjunction(term);
        prop_assert_eq!(expanded.functor(), Some("and"));
        prop_assert_eq!(expanded.args().len(), k1 * k2);

        let distinct: BTreeSet<String> = expanded.args().iter().map(Term::to_string).collect();
        prop_assert_eq!(distinct.len(), k1 * k2);
        for conjunct in expanded.args() {
            prop_assert_eq!(conjunct.functor(), Some("p"));
            prop_assert!(conjunct.args().iter().all(Term::is_atom));
        }
    }
}
