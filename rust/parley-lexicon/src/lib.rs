//! Lexical and concept adapter for the Parley rule compiler.
//!
//! The rule compiler never talks to a lemmatizer or a concept store directly;
//! it consumes them through the [`Lexicon`] trait defined here. A concept is a
//! named set of [`Member`] forms (words, lemmas, phrases, nested concepts)
//! that is written once at authoring time and read many times while patterns
//! are matched.
//!
//! [`MemoryLexicon`] is the in-memory reference implementation used by hosts
//! that load rule files into a single process, and by the test suites.

#![warn(missing_docs)]

/// Concept definitions and member forms.
pub mod concept;
/// The adapter trait and the in-memory implementation.
pub mod lexicon;

pub use concept::{Concept, Member};
pub use lexicon::{Lexicon, MemoryLexicon};

/// Sentinel prefix marking a concept member as a nested concept reference.
pub const CONCEPT_SENTINEL: char = '~';
