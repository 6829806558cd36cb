//! Parley pattern engine
//!
//! The rule-authoring compiler for the Parley dialogue engine: declarative
//! dialogue-pattern terms (words, lemmas, phrases, concepts, choice sets,
//! negations, wildcards, bound variables, named functions) are compiled into
//! structured pattern fragments that an external hypergraph matcher can
//! ground against an incoming utterance.
//!
//! Alongside the pure compiler this crate carries the runtime half of the
//! contract: the membership and negation predicates the matcher invokes while
//! trying grounding candidates, the session stores that record groundings and
//! user variables, and the action selector/executor that turns a fully
//! grounded rule into a "say" effect.
//!
//! Graph search, unification and chaining stay in the external engine; the
//! lemmatizer and concept book stay behind the [`parley_lexicon::Lexicon`]
//! trait.

#![warn(missing_docs)]

/// Action content trees, selection and execution.
pub mod action;
/// Clause types: structural links, pure predicates, effectful predicates.
pub mod clause;
/// Term compiler lowering each term kind to a pattern fragment.
pub mod compile;
/// Concept closure resolution and the concept/choice membership predicates.
pub mod concept;
/// Error types for the pattern engine.
pub mod error;
/// Pattern fragments: declarations, clauses and grounding projections.
pub mod fragment;
/// Whole-utterance negation predicate.
pub mod negation;
/// Rule assembly and named-rule registration.
pub mod rulebase;
/// Session state: grounding recorder, user variables, dialogue anchor.
pub mod session;
/// Term types of the pattern DSL.
pub mod term;
/// Grounding values: text, lists and the empty sentinel.
pub mod value;

pub use action::{Action, ActionContent, Responder};
pub use clause::{Application, Clause, PatternValue};
pub use compile::Compiler;
pub use concept::{flatten_terms, is_choice_member, is_concept_member};
pub use error::{CompileError, PatternResult};
pub use fragment::{Declaration, Fragment, GroundingRef, NodeType, VariableId};
pub use negation::negation_holds;
pub use rulebase::{Goal, Rule, RuleBase};
pub use session::{AnchorState, Session};
pub use term::{Interval, Term};
pub use value::Value;
