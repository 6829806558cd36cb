//! Pattern fragments.
//!
//! Every term compiles to a [`Fragment`]: the variables it declares, the
//! clauses that must hold for those variables to count as grounded, and two
//! ordered projections referencing the matched surface words and their
//! canonical forms. Fragments concatenate pointwise, which is how phrases and
//! whole rule contexts are assembled.

use crate::clause::Clause;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::term::Interval;

/// Identifier of a pattern variable declared by a fragment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariableId(String);

impl VariableId {
    /// Create a variable identifier.
    pub fn new(name: impl Into<String>) -> Self {
        VariableId(name.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<&str> for VariableId {
    fn from(name: &str) -> Self {
        VariableId::new(name)
    }
}

/// Node type a declared variable may be grounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    /// A word occurrence at a sentence position.
    WordInstance,
    /// A word node, the canonical-form side of an instance.
    WordNode,
    /// A glob spanning a contiguous run of words.
    Glob,
}

/// Declaration of one pattern variable: identifier, admissible node types,
/// cardinality interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// The declared variable.
    pub variable: VariableId,
    /// Node types the variable may ground to.
    pub types: Vec<NodeType>,
    /// How many sentence positions the variable may span.
    pub interval: Interval,
}

impl Declaration {
    /// Declare a single-position variable of one node type.
    pub fn node(variable: VariableId, node_type: NodeType) -> Self {
        Declaration {
            variable,
            types: vec![node_type],
            interval: Interval::one(),
        }
    }

    /// Declare a glob spanning the given interval.
    pub fn glob(variable: VariableId, interval: Interval) -> Self {
        Declaration {
            variable,
            types: vec![NodeType::Glob],
            interval,
        }
    }
}

/// A reference inside a grounding projection: either a declared variable
/// (grounded at match time) or a word fixed at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GroundingRef {
    /// Reference to a declared variable.
    Var(VariableId),
    /// A word known at compile time.
    Word(String),
}

impl fmt::Display for GroundingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroundingRef::Var(variable) => write!(f, "{variable}"),
            GroundingRef::Word(word) => write!(f, "{word}"),
        }
    }
}

/// The compiled output of one term.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fragment {
    /// Variables introduced by this term.
    pub declarations: Vec<Declaration>,
    /// Constraints that must hold for the declared variables to count as
    /// grounded.
    pub clauses: Vec<Clause>,
    /// Ordered references to the matched surface words.
    pub word_refs: Vec<GroundingRef>,
    /// Ordered references to the canonical forms, same length as
    /// `word_refs`.
    pub lemma_refs: Vec<GroundingRef>,
}

impl Fragment {
    /// A fragment with no declarations, clauses or groundings.
    pub fn empty() -> Self {
        Fragment::default()
    }

    /// Number of grounding slots this fragment contributes.
    pub fn slot_count(&self) -> usize {
        self.word_refs.len()
    }

    /// The word/lemma projections must stay the same length.
    pub fn is_balanced(&self) -> bool {
        self.word_refs.len() == self.lemma_refs.len()
    }

    /// Pointwise concatenation, preserving order of all four components.
    pub fn concat(mut self, other: Fragment) -> Fragment {
        self.declarations.extend(other.declarations);
        self.clauses.extend(other.clauses);
        self.word_refs.extend(other.word_refs);
        self.lemma_refs.extend(other.lemma_refs);
        self
    }

    /// Concatenate a sequence of fragments in order.
    pub fn combine(fragments: impl IntoIterator<Item = Fragment>) -> Fragment {
        fragments
            .into_iter()
            .fold(Fragment::empty(), Fragment::concat)
    }
}
