use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;

use crate::error::ParseError;

pub const SET: &str = "set";
pub const PLACEHOLDER: char = '?';

// A term is either a bare token or an operator applied to child terms.
// `(p a (q b))` is Compound { functor: "p", args: [a, (q b)] }.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Atom(String),
    Compound { functor: String, args: Vec<Term> },
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    /// The empty atom, produced by a conditional with no taken branch.
    pub fn empty() -> Self {
        Term::Atom(String::new())
    }

    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound {
            functor: functor.into(),
            args,
        }
    }

    pub fn set<I: IntoIterator<Item = Term>>(members: I) -> Self {
        Term::compound(SET, members.into_iter().collect())
    }

    /// Turns a deduplicated result into a term: a single member stands for
    /// itself, anything else becomes a set-literal in insertion order.
    pub fn collapse(mut members: IndexSet<Term>) -> Self {
        if members.len() == 1 {
            if let Some(member) = members.pop() {
                return member;
            }
        }

        Term::set(members)
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Term::Atom(_))
    }

    pub fn is_empty_atom(&self) -> bool {
        matches!(self, Term::Atom(name) if name.is_empty())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Term::Atom(name) if name.starts_with(PLACEHOLDER))
    }

    pub fn functor(&self) -> Option<&str> {
        match self {
            Term::Atom(_) => None,
            Term::Compound { functor, .. } => Some(functor),
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Term::Atom(_) => &[],
            Term::Compound { args, .. } => args,
        }
    }

    pub fn into_args(self) -> Vec<Term> {
        match self {
            Term::Atom(_) => Vec::new(),
            Term::Compound { args, .. } => args,
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            Term::Compound { .. } => None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.functor() == Some(SET)
    }

    /// Members contributed to a set operation: a set-literal's children,
    /// otherwise the term itself.
    pub fn elements(&self) -> &[Term] {
        match self {
            Term::Compound { functor, args } if functor == SET => args,
            _ => std::slice::from_ref(self),
        }
    }

    pub fn into_elements(self) -> Vec<Term> {
        match self {
            Term::Compound { functor, args } if functor == SET => args,
            other => vec![other],
        }
    }

    /// Pre-order walk over this term and every nested subterm.
    pub fn subterms(&self) -> Subterms<'_> {
        Subterms { stack: vec![self] }
    }
}

pub struct Subterms<'a> {
    stack: Vec<&'a Term>,
}

impl<'a> Iterator for Subterms<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<Self::Item> {
        let term = self.stack.pop()?;
        // reversed so children come out left to right
        self.stack.extend(term.args().iter().rev());
        Some(term)
    }
}

// The empty atom has no text, so it is left out of argument lists rather
// than written as a stray separator: `(p <empty>)` prints as `(p)`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => f.write_str(name),
            Term::Compound { functor, args } => {
                write!(f, "({}", functor)?;
                for arg in args.iter().filter(|arg| !arg.is_empty_atom()) {
                    write!(f, " {}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for Term {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Term::atom(name)
    }
}
