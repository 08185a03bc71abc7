use hashbrown::HashSet;
use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::ast::Term;
use crate::classify::{self, Shape, ONLY};
use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::expand::build_conjunction;
use crate::world::World;

// Work items for the reduction loop.
enum Frame {
    // reduce this term and push its result on the value stack
    Enter { term: Term, depth: usize },
    // pop `arity` reduced children, rebuild the compound and dispatch on it
    Reduce { functor: String, arity: usize },
}

pub struct Evaluator<'w, W: World + ?Sized> {
    world: &'w W,
    config: EvalConfig,
}

impl<'w, W: World + ?Sized> Evaluator<'w, W> {
    pub fn new(world: &'w W) -> Self {
        Self::with_config(world, EvalConfig::default())
    }

    pub fn with_config(world: &'w W, config: EvalConfig) -> Self {
        Evaluator { world, config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn evaluate_str(&self, text: &str) -> Result<Term> {
        let term = crate::parser::parse(text)?;
        self.evaluate(&term)
    }

    /// Reduces `term` to an atom or a set-literal.
    ///
    /// Children are reduced left to right before their parent is dispatched.
    /// A conditional only ever reduces the branch its condition selects.
    pub fn evaluate(&self, term: &Term) -> Result<Term> {
        let mut frames = vec![Frame::Enter {
            term: term.clone(),
            depth: 0,
        }];
        let mut values: Vec<Term> = Vec::new();

        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Enter { term, depth } => {
                    if depth > self.config.max_depth {
                        return Err(EvalError::DepthLimitExceeded(self.config.max_depth));
                    }

                    trace!(depth, term = %term, "enter");

                    if classify::is_conditional(&term) {
                        match self.select_branch(term)? {
                            Some(branch) => frames.push(Frame::Enter {
                                term: branch,
                                depth: depth + 1,
                            }),
                            None => values.push(Term::empty()),
                        }
                        continue;
                    }

                    match term {
                        Term::Atom(_) => values.push(term),
                        Term::Compound { functor, args } => {
                            frames.push(Frame::Reduce {
                                functor,
                                arity: args.len(),
                            });

                            // post order so push in reverse
                            for arg in args.into_iter().rev() {
                                frames.push(Frame::Enter {
                                    term: arg,
                                    depth: depth + 1,
                                });
                            }
                        }
                    }
                }
                Frame::Reduce { functor, arity } => {
                    let args = values.split_off(values.len() - arity);
                    let reduced = self.dispatch(Term::Compound { functor, args })?;
                    values.push(reduced);
                }
            }
        }

        Ok(values.pop().unwrap_or_else(Term::empty))
    }

    /// Evaluates the branch of `(if COND THEN [ELSE])` selected by the
    /// world. Non-conditional terms are returned as they are.
    pub fn evaluate_condition(&self, term: &Term) -> Result<Term> {
        if !classify::is_conditional(term) {
            return Ok(term.clone());
        }

        match self.select_branch(term.clone())? {
            Some(branch) => self.evaluate(&branch),
            None => Ok(Term::empty()),
        }
    }

    fn select_branch(&self, conditional: Term) -> Result<Option<Term>> {
        if conditional.args().len() < 2 {
            return Err(EvalError::Malformed {
                term: conditional,
                reason: "conditional needs a condition and a branch",
            });
        }

        let mut args = conditional.into_args().into_iter();
        let (condition, then) = match (args.next(), args.next()) {
            (Some(condition), Some(then)) => (condition, then),
            _ => return Ok(None),
        };
        let otherwise = args.next();

        let satisfied = self.world.is_satisfied(&condition);
        debug!(condition = %condition, satisfied, "conditional");

        Ok(if satisfied { Some(then) } else { otherwise })
    }

    // the children of `term` are already reduced
    fn dispatch(&self, term: Term) -> Result<Term> {
        let shape = classify::shape(&term);
        if shape != Shape::Other {
            debug!(?shape, term = %term, "reducing");
        }

        match shape {
            Shape::Query => self.evaluate_query(term),
            Shape::Intersection => evaluate_intersection(term),
            Shape::Union | Shape::Conjunction => evaluate_union(term),
            Shape::Disjunction => evaluate_disjunction(term),
            Shape::Limit => evaluate_limit(term),
            Shape::Expandable => Ok(build_conjunction(term)),
            Shape::Atom | Shape::Conditional | Shape::Other => Ok(term),
        }
    }

    fn evaluate_query(&self, query: Term) -> Result<Term> {
        if !classify::is_query(&query) {
            return Ok(query);
        }

        if let Term::Compound { functor, args } = &query {
            if let [left, right] = args.as_slice() {
                if left.is_set() || right.is_set() {
                    let mut results = IndexSet::new();

                    for x in left.elements() {
                        for y in right.elements() {
                            let single =
                                Term::compound(functor.clone(), vec![x.clone(), y.clone()]);
                            results.extend(self.evaluate_query(single)?.into_elements());
                        }
                    }

                    if results.is_empty() {
                        debug!(query = %query, "no combination to ask");
                        return Err(EvalError::NullStatement(query));
                    }

                    return Ok(Term::collapse(results));
                }
            }
        }

        debug!(query = %query, "asking world");
        let answers: IndexSet<Term> = self
            .world
            .ask(&query)
            .into_iter()
            .flat_map(Term::into_elements)
            .collect();

        if answers.is_empty() {
            debug!(query = %query, "no answer");
            return Err(EvalError::NullStatement(query));
        }

        Ok(Term::collapse(answers))
    }
}

pub fn evaluate<W: World + ?Sized>(world: &W, term: &Term) -> Result<Term> {
    Evaluator::new(world).evaluate(term)
}

pub fn evaluate_str<W: World + ?Sized>(world: &W, text: &str) -> Result<Term> {
    Evaluator::new(world).evaluate_str(text)
}

/// Unwraps `(late T)` to `T` without reducing it.
pub fn evaluate_late(term: &Term) -> Term {
    match term.args() {
        [inner, ..] if classify::is_late(term) => inner.clone(),
        _ => term.clone(),
    }
}

fn evaluate_intersection(term: Term) -> Result<Term> {
    let common = intersect_elements(term.args());

    if common.is_empty() {
        debug!(term = %term, "empty intersection");
        return Err(EvalError::NullStatement(term));
    }

    Ok(Term::collapse(common))
}

// Members of the first operand present in every other operand, in first-operand order.
fn intersect_elements(operands: &[Term]) -> IndexSet<Term> {
    let Some((first, rest)) = operands.split_first() else {
        return IndexSet::new();
    };

    let rest: Vec<HashSet<&Term>> = rest
        .iter()
        .map(|operand| operand.elements().iter().collect())
        .collect();

    first
        .elements()
        .iter()
        .filter(|member| rest.iter().all(|other| other.contains(member)))
        .cloned()
        .collect()
}

// `union` and `and` both collect every member of every operand.
fn evaluate_union(term: Term) -> Result<Term> {
    let members: IndexSet<Term> = term
        .args()
        .iter()
        .flat_map(Term::elements)
        .cloned()
        .collect();

    if members.is_empty() {
        return Err(EvalError::NullStatement(term));
    }

    Ok(Term::collapse(members))
}

// Always the first alternative.
fn evaluate_disjunction(term: Term) -> Result<Term> {
    if term.args().is_empty() {
        return Err(EvalError::NullStatement(term));
    }

    Ok(term.into_args().swap_remove(0))
}

// `(only T N)` demands exactly N candidates in T, `(any T N)` takes the
// first N of at least N.
fn evaluate_limit(term: Term) -> Result<Term> {
    if term.args().len() != 2 {
        return Err(EvalError::Malformed {
            term,
            reason: "bounded selection takes a term and a count",
        });
    }

    let count = term.args()[1]
        .as_atom()
        .and_then(|count| count.parse::<usize>().ok());
    let Some(count) = count else {
        return Err(EvalError::Malformed {
            term,
            reason: "selection count must be a non-negative integer",
        });
    };

    let available = term.args()[0].elements().len();
    let exact = term.functor() == Some(ONLY);

    if (exact && available != count) || available < count {
        debug!(term = %term, available, count, "selection cardinality mismatch");
        return Err(EvalError::AmbigiousStatement(term));
    }

    let candidates = term.into_args().swap_remove(0);

    if exact {
        return Ok(candidates);
    }

    let mut picked: Vec<Term> = candidates.into_elements();
    picked.truncate(count);

    if picked.len() == 1 {
        return Ok(picked.swap_remove(0));
    }

    Ok(Term::set(picked))
}
