//! Term types of the pattern DSL.
//!
//! A rule context is written as a sequence of terms. Each term kind lowers to
//! a pattern fragment through [`crate::Compiler`]; the closed enum here gives
//! the compiler an exhaustive match over every kind the DSL can express.

use crate::clause::PatternValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cardinality interval over matched node count.
///
/// `upper: None` denotes an unbounded interval (the `-1` of the authoring
/// syntax).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Minimum number of nodes the span must cover.
    pub lower: usize,
    /// Maximum number of nodes, or `None` for unbounded.
    pub upper: Option<usize>,
}

impl Interval {
    /// A bounded interval `[lower, upper]`.
    pub fn bounded(lower: usize, upper: usize) -> Self {
        Interval {
            lower,
            upper: Some(upper),
        }
    }

    /// An unbounded interval `[lower, ∞)`.
    pub fn at_least(lower: usize) -> Self {
        Interval { lower, upper: None }
    }

    /// The `[1, 1]` interval of a single sentence position.
    pub fn one() -> Self {
        Interval::bounded(1, 1)
    }

    /// True when the interval admits at least one width.
    pub fn is_valid(&self) -> bool {
        match self.upper {
            Some(upper) => self.lower <= upper,
            None => true,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "[{}, {}]", self.lower, upper),
            None => write!(f, "[{}, ∞)", self.lower),
        }
    }
}

/// One term of a rule context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// A literal surface word, matched verbatim.
    Word(String),
    /// A word matched through its canonical form. This is the DSL default
    /// for a bare word.
    Lemma(String),
    /// A space-separated run of literal words, matched in order.
    Phrase(String),
    /// A named concept; the matched span must be one of its members.
    Concept(String),
    /// A choice set; the matched span must be a member of one alternative.
    Choices(Vec<Term>),
    /// Whole-utterance absence: none of the listed terms may occur anywhere
    /// in the sentence.
    Negation(Vec<Term>),
    /// A span of unspecified words within a cardinality interval.
    Wildcard(Interval),
    /// Binds the grounding of the wrapped term to a named rule variable.
    Variable {
        /// The author-chosen variable name.
        name: String,
        /// The wrapped term whose grounding is recorded.
        term: Box<Term>,
    },
    /// Application of an externally defined named predicate.
    Context {
        /// The external predicate name.
        name: String,
        /// Positional arguments.
        args: Vec<PatternValue>,
    },
}

impl Term {
    /// A literal word term.
    pub fn word(word: impl Into<String>) -> Self {
        Term::Word(word.into())
    }

    /// A canonical-form word term.
    pub fn lemma(word: impl Into<String>) -> Self {
        Term::Lemma(word.into())
    }

    /// A phrase term.
    pub fn phrase(text: impl Into<String>) -> Self {
        Term::Phrase(text.into())
    }

    /// A concept term.
    pub fn concept(name: impl Into<String>) -> Self {
        Term::Concept(name.into())
    }

    /// A choice-set term.
    pub fn choices(terms: impl IntoIterator<Item = Term>) -> Self {
        Term::Choices(terms.into_iter().collect())
    }

    /// A negation term.
    pub fn negation(terms: impl IntoIterator<Item = Term>) -> Self {
        Term::Negation(terms.into_iter().collect())
    }

    /// A wildcard spanning between `lower` and `upper` words.
    pub fn wildcard(lower: usize, upper: usize) -> Self {
        Term::Wildcard(Interval::bounded(lower, upper))
    }

    /// A wildcard spanning any number of words, including none.
    pub fn any_words() -> Self {
        Term::Wildcard(Interval::at_least(0))
    }

    /// A variable term binding the grounding of `term` to `name`.
    pub fn variable(name: impl Into<String>, term: Term) -> Self {
        Term::Variable {
            name: name.into(),
            term: Box::new(term),
        }
    }

    /// A context-function term applying the external predicate `name`.
    pub fn context(name: impl Into<String>, args: Vec<PatternValue>) -> Self {
        Term::Context {
            name: name.into(),
            args,
        }
    }

    /// Short name of the term kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Term::Word(_) => "word",
            Term::Lemma(_) => "lemma",
            Term::Phrase(_) => "phrase",
            Term::Concept(_) => "concept",
            Term::Choices(_) => "choices",
            Term::Negation(_) => "negation",
            Term::Wildcard(_) => "wildcard",
            Term::Variable { .. } => "variable",
            Term::Context { .. } => "context",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Word(word) => write!(f, "{word}"),
            Term::Lemma(word) => write!(f, "'{word}"),
            Term::Phrase(text) => write!(f, "\"{text}\""),
            Term::Concept(name) => write!(f, "~{name}"),
            Term::Choices(terms) => {
                write!(f, "[")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{term}")?;
                }
                write!(f, "]")
            }
            Term::Negation(terms) => {
                write!(f, "![")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{term}")?;
                }
                write!(f, "]")
            }
            Term::Wildcard(interval) => write!(f, "*{interval}"),
            Term::Variable { name, term } => write!(f, "${name}={term}"),
            Term::Context { name, args } => write!(f, "^{name}/{}", args.len()),
        }
    }
}
