use crate::ast::Term;
use crate::classify::{COMPLEMENT, NOT};

/// `(not X)` becomes `X`; anything else is wrapped in `(not ...)`.
pub fn negate(term: Term) -> Term {
    match term {
        Term::Compound { functor, mut args } if functor == NOT && args.len() == 1 => args.remove(0),
        other => Term::compound(NOT, vec![other]),
    }
}

/// Toggles the `!` prefix on a compound's operator: `(p a)` and `(!p a)`
/// complement each other. Atoms have no operator and are negated instead.
pub fn complement(term: Term) -> Term {
    match term {
        Term::Compound { functor, args } => {
            let functor = match functor.strip_prefix(COMPLEMENT) {
                Some(positive) => positive.to_string(),
                None => format!("{}{}", COMPLEMENT, functor),
            };
            Term::Compound { functor, args }
        }
        atom => negate(atom),
    }
}
