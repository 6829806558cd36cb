//! Clause types.
//!
//! A fragment's clauses are either structural links the hypergraph matcher
//! resolves on its own, or applications of runtime callables this crate
//! provides. Applications come in two flavors kept apart by the type system:
//! [`Clause::Predicate`] is a pure boolean check, while [`Clause::Effect`]
//! runs a side effect and is then treated as satisfied. The distinction
//! documents which clauses may mutate session state.

use crate::fragment::VariableId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Callback name under which the concept membership predicate is registered
/// with the matching engine.
pub const CONCEPT_MEMBER: &str = "parley:concept-member";
/// Callback name of the choice-set membership predicate.
pub const CHOICE_MEMBER: &str = "parley:choice-member";
/// Callback name of the whole-utterance negation predicate.
pub const ABSENT: &str = "parley:absent";
/// Callback name of the grounding-recorder effect.
pub const RECORD_GROUNDING: &str = "parley:record-grounding";

/// An argument value inside an application clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternValue {
    /// Reference to a declared pattern variable.
    Var(VariableId),
    /// A literal piece of text.
    Text(String),
    /// An ordered sequence of values.
    List(Vec<PatternValue>),
}

impl PatternValue {
    /// Variable reference.
    pub fn var(id: impl Into<VariableId>) -> Self {
        PatternValue::Var(id.into())
    }

    /// Literal text.
    pub fn text(text: impl Into<String>) -> Self {
        PatternValue::Text(text.into())
    }
}

impl From<VariableId> for PatternValue {
    fn from(id: VariableId) -> Self {
        PatternValue::Var(id)
    }
}

impl fmt::Display for PatternValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternValue::Var(id) => write!(f, "{id}"),
            PatternValue::Text(text) => write!(f, "{text}"),
            PatternValue::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Application of an externally registered predicate or schema by name.
///
/// The argument shape is uniform across context functions, runtime callbacks
/// and action schemas: exactly one argument is passed bare, two or more are
/// wrapped in an ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Name the callee is registered under.
    pub name: String,
    /// The (possibly wrapped) argument.
    pub argument: PatternValue,
}

impl Application {
    /// Apply `name` to positional arguments, wrapping per the one-bare rule.
    pub fn apply(name: impl Into<String>, mut args: Vec<PatternValue>) -> Self {
        let argument = match args.len() {
            1 => args.swap_remove(0),
            _ => PatternValue::List(args),
        };
        Application {
            name: name.into(),
            argument,
        }
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.argument)
    }
}

/// One match clause of a fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    /// The word instance occupies a position in the current sentence.
    InSentence {
        /// The word-instance variable.
        instance: VariableId,
    },
    /// The word instance carries this literal surface word.
    HasWord {
        /// The word-instance variable.
        instance: VariableId,
        /// The required surface word.
        word: String,
    },
    /// The word instance links to its canonical-form variable.
    HasLemma {
        /// The word-instance variable.
        instance: VariableId,
        /// The canonical-form variable.
        lemma: VariableId,
    },
    /// The canonical-form variable is fixed to a constant.
    LemmaIs {
        /// The canonical-form variable.
        lemma: VariableId,
        /// The required canonical form.
        value: String,
    },
    /// A pure boolean callback; cannot mutate session state.
    Predicate(Application),
    /// A side-effecting callback; runs its effect, then counts as satisfied.
    Effect(Application),
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::InSentence { instance } => write!(f, "{instance} ∈ sentence"),
            Clause::HasWord { instance, word } => write!(f, "{instance} ≡ {word}"),
            Clause::HasLemma { instance, lemma } => write!(f, "{instance} ⇒ {lemma}"),
            Clause::LemmaIs { lemma, value } => write!(f, "{lemma} = {value}"),
            Clause::Predicate(application) => write!(f, "? {application}"),
            Clause::Effect(application) => write!(f, "! {application}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_argument_is_passed_bare() {
        let application = Application::apply("f", vec![PatternValue::text("x")]);
        assert_eq!(application.argument, PatternValue::Text("x".to_string()));
    }

    #[test]
    fn multiple_arguments_are_wrapped_in_order() {
        let application = Application::apply(
            "f",
            vec![PatternValue::text("x"), PatternValue::var("g-0")],
        );
        assert_eq!(
            application.argument,
            PatternValue::List(vec![
                PatternValue::Text("x".to_string()),
                PatternValue::Var(VariableId::new("g-0")),
            ])
        );
    }

    #[test]
    fn zero_arguments_wrap_to_empty_sequence() {
        let application = Application::apply("f", vec![]);
        assert_eq!(application.argument, PatternValue::List(vec![]));
    }

    #[test]
    fn clause_display() {
        let clause = Clause::Predicate(Application::apply(
            CONCEPT_MEMBER,
            vec![PatternValue::text("pet"), PatternValue::var("g-0")],
        ));
        assert_eq!(clause.to_string(), "? parley:concept-member (pet $g-0)");
    }
}
