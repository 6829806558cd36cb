//! Error types for the pattern engine.
//!
//! Only authoring-time misuse surfaces as an error; every runtime callable is
//! total and reports misses through sentinels or `false`.

use crate::term::Interval;
use thiserror::Error;

/// Errors raised while compiling a term into a pattern fragment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A phrase term contained no words.
    #[error("Phrase term is empty")]
    EmptyPhrase,

    /// A choice set contained no alternatives.
    #[error("Choice set is empty")]
    EmptyChoices,

    /// A negation listed no terms to exclude.
    #[error("Negation term lists nothing to exclude")]
    EmptyNegation,

    /// A wildcard interval admits no width.
    #[error("Wildcard interval {interval} admits no width")]
    BadInterval {
        /// The offending interval.
        interval: Interval,
    },

    /// A term kind that cannot appear inside a choice or negation list.
    #[error("Term of kind \"{kind}\" cannot appear in a {list} list")]
    UnsupportedMember {
        /// Kind name of the offending term.
        kind: &'static str,
        /// The list kind it was written in, `"choice"` or `"negation"`.
        list: &'static str,
    },
}

/// Result type for compilation.
pub type PatternResult<T> = Result<T, CompileError>;
