//! The knowledge store seen by the evaluator, plus a small in-memory store.

use hashbrown::{HashMap, HashSet};
use tracing::trace;

use crate::ast::Term;
use crate::classify::{AND, NOT, OR};
use crate::error::{EvalError, Result};

/// What the evaluator needs from a knowledge store.
pub trait World {
    /// Resolves a query term into candidate ground atoms. An empty answer
    /// means the query has no solution.
    fn ask(&self, query: &Term) -> Vec<Term>;

    fn is_satisfied(&self, term: &Term) -> bool;

    /// The declared inverse of a binary predicate, if any.
    fn inverse(&self, predicate: &str) -> Option<&str>;
}

impl<W: World + ?Sized> World for &W {
    fn ask(&self, query: &Term) -> Vec<Term> {
        (**self).ask(query)
    }

    fn is_satisfied(&self, term: &Term) -> bool {
        (**self).is_satisfied(term)
    }

    fn inverse(&self, predicate: &str) -> Option<&str> {
        (**self).inverse(predicate)
    }
}

/// Ground facts indexed by predicate.
///
/// `ask` matches a pattern position by position, treating placeholders as
/// wildcards, and answers with the value found at the first placeholder of
/// each matching fact. A pattern without placeholders answers `true` when it
/// matches a fact.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorld {
    facts: HashMap<String, Vec<Vec<String>>>,
    inverses: HashMap<String, String>,
}

impl MemoryWorld {
    pub const TRUE: &'static str = "true";
    pub const FALSE: &'static str = "false";

    pub fn new() -> Self {
        MemoryWorld {
            facts: HashMap::new(),
            inverses: HashMap::new(),
        }
    }

    /// Records a ground fact such as `(parent tom bob)`. Returns false when
    /// the fact was already known.
    pub fn tell(&mut self, fact: &Term) -> Result<bool> {
        let Term::Compound { functor, args } = fact else {
            return Err(EvalError::Malformed {
                term: fact.clone(),
                reason: "facts must be compound terms",
            });
        };

        let row = args
            .iter()
            .map(|arg| match arg {
                Term::Atom(name) if !arg.is_placeholder() => Some(name.clone()),
                _ => None,
            })
            .collect::<Option<Vec<String>>>()
            .ok_or_else(|| EvalError::Malformed {
                term: fact.clone(),
                reason: "facts must have ground atom arguments",
            })?;

        let rows = self.facts.entry(functor.clone()).or_default();
        if rows.contains(&row) {
            return Ok(false);
        }

        trace!(fact = %fact, "fact recorded");
        rows.push(row);
        Ok(true)
    }

    /// Parses and records every fact in `text`.
    pub fn tell_all(&mut self, text: &str) -> Result<usize> {
        let mut added = 0;
        for fact in crate::parser::parse_all(text)? {
            if self.tell(&fact)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Declares `inverse` as the inverse relation of `predicate`, in both directions.
    pub fn declare_inverse(&mut self, predicate: &str, inverse: &str) {
        self.inverses.insert(predicate.to_string(), inverse.to_string());
        self.inverses.insert(inverse.to_string(), predicate.to_string());
    }

    pub fn len(&self) -> usize {
        self.facts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matching<'a>(&'a self, pattern: &'a Term) -> impl Iterator<Item = &'a [String]> + 'a {
        let (functor, args) = match pattern {
            Term::Compound { functor, args } => (functor.as_str(), args.as_slice()),
            Term::Atom(_) => ("", &[][..]),
        };

        self.facts
            .get(functor)
            .into_iter()
            .flatten()
            .filter(move |row| {
                row.len() == args.len()
                    && row.iter().zip(args).all(|(value, arg)| {
                        arg.is_placeholder() || arg.as_atom() == Some(value.as_str())
                    })
            })
            .map(Vec::as_slice)
    }
}

impl World for MemoryWorld {
    fn ask(&self, query: &Term) -> Vec<Term> {
        let slot = query.args().iter().position(Term::is_placeholder);

        let mut seen = HashSet::new();
        let mut answers = Vec::new();

        for row in self.matching(query) {
            let answer = match slot {
                Some(idx) => row[idx].as_str(),
                None => Self::TRUE,
            };
            if seen.insert(answer) {
                answers.push(Term::atom(answer));
            }
        }

        answers
    }

    fn is_satisfied(&self, term: &Term) -> bool {
        match term {
            Term::Atom(name) => !name.is_empty() && name != Self::FALSE,
            Term::Compound { functor, args } if functor == NOT && args.len() == 1 => {
                !self.is_satisfied(&args[0])
            }
            Term::Compound { functor, args } if functor == AND => {
                args.iter().all(|arg| self.is_satisfied(arg))
            }
            Term::Compound { functor, args } if functor == OR => {
                args.iter().any(|arg| self.is_satisfied(arg))
            }
            Term::Compound { .. } => self.matching(term).next().is_some(),
        }
    }

    fn inverse(&self, predicate: &str) -> Option<&str> {
        self.inverses.get(predicate).map(String::as_str)
    }
}
