//! Structural tautology detection for binary predicates.
//!
//! `(parent (parent ? bob) bob)` restates itself: its first argument asks for
//! whoever stands in `parent` to `bob`, which is exactly the outer claim. The
//! same holds through a declared inverse, e.g. `(parent (child bob ?) bob)`
//! when `child` is the inverse of `parent`. Only the world's inverse table is
//! consulted, never its facts.

use tracing::debug;

use crate::ast::Term;
use crate::world::World;

pub fn is_tautology<W: World + ?Sized>(world: &W, term: &Term) -> bool {
    let Term::Compound { functor, args } = term else {
        return false;
    };
    let [first, second] = args.as_slice() else {
        return false;
    };

    let outer = [first, second];
    let inverse = world.inverse(functor);

    for (idx, arg) in outer.iter().enumerate() {
        let Term::Compound {
            functor: inner,
            args: inner_args,
        } = arg
        else {
            continue;
        };
        let [a, b] = inner_args.as_slice() else {
            continue;
        };

        let inner_pair = [a, b];
        let other = outer[1 - idx];

        // placeholder where this argument sits, the other slot repeated
        if inner == functor
            && inner_pair[idx].is_placeholder()
            && inner_pair[1 - idx] == other
        {
            debug!(term = %term, "self-referential tautology");
            return true;
        }

        // same shape through the inverse, with the slots swapped
        if inverse == Some(inner.as_str())
            && inner_pair[1 - idx].is_placeholder()
            && inner_pair[idx] == other
        {
            debug!(term = %term, inverse = inner.as_str(), "inverse tautology");
            return true;
        }
    }

    false
}
