//! Concept definitions and member forms.

use crate::CONCEPT_SENTINEL;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One member form of a concept.
///
/// Members come in four shapes, matching what the pattern DSL can express:
/// a literal word (matched verbatim), a lemma (matched against the canonical
/// form of the candidate), a phrase (an ordered run of words), or a reference
/// to another concept whose members are included transitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Member {
    /// A literal surface word, matched exactly.
    Word(String),
    /// A canonical form, matched against the lemmatized candidate.
    Lemma(String),
    /// An ordered run of words, matched as a whole.
    Phrase(Vec<String>),
    /// A nested concept reference, resolved transitively.
    Concept(String),
}

impl Member {
    /// Parse a raw member string as written in a concept definition.
    ///
    /// A leading `~` denotes a nested concept reference. A string containing
    /// more than one whitespace-separated token denotes a phrase. Anything
    /// else is a literal word.
    pub fn parse(raw: &str) -> Member {
        let raw = raw.trim();
        if let Some(name) = raw.strip_prefix(CONCEPT_SENTINEL) {
            return Member::Concept(name.to_string());
        }
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() > 1 {
            Member::Phrase(tokens.iter().map(|t| t.to_string()).collect())
        } else {
            Member::Word(raw.to_string())
        }
    }

    /// Number of sentence positions this member occupies when matched.
    /// Nested concepts report 0 here; their width comes from resolution.
    pub fn width(&self) -> usize {
        match self {
            Member::Word(_) | Member::Lemma(_) => 1,
            Member::Phrase(words) => words.len(),
            Member::Concept(_) => 0,
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Word(word) => write!(f, "{word}"),
            Member::Lemma(lemma) => write!(f, "'{lemma}"),
            Member::Phrase(words) => write!(f, "\"{}\"", words.join(" ")),
            Member::Concept(name) => write!(f, "{CONCEPT_SENTINEL}{name}"),
        }
    }
}

/// A named concept: a membership list written once and read during matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    name: String,
    members: Vec<Member>,
}

impl Concept {
    /// Define a concept from raw member strings, applying [`Member::parse`]
    /// to each.
    pub fn define(name: impl Into<String>, members: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Concept {
            name: name.into(),
            members: members.into_iter().map(|m| Member::parse(m.as_ref())).collect(),
        }
    }

    /// Define a concept from already-structured members.
    pub fn from_members(name: impl Into<String>, members: Vec<Member>) -> Self {
        Concept {
            name: name.into(),
            members,
        }
    }

    /// The concept name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct members, in definition order. Nested concepts are not expanded.
    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {{ ", CONCEPT_SENTINEL, self.name)?;
        for member in &self.members {
            write!(f, "{member} ")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_token_is_word() {
        assert_eq!(Member::parse("cat"), Member::Word("cat".to_string()));
    }

    #[test]
    fn parse_multi_token_is_phrase() {
        assert_eq!(
            Member::parse("big  cat"),
            Member::Phrase(vec!["big".to_string(), "cat".to_string()])
        );
    }

    #[test]
    fn parse_sentinel_is_nested_concept() {
        assert_eq!(Member::parse("~pet"), Member::Concept("pet".to_string()));
    }

    #[test]
    fn member_widths() {
        assert_eq!(Member::parse("cat").width(), 1);
        assert_eq!(Member::parse("big cat").width(), 2);
        assert_eq!(Member::Lemma("run".to_string()).width(), 1);
    }

    #[test]
    fn define_parses_raw_members() {
        let concept = Concept::define("pet", ["cat", "dog", "guinea pig", "~bird"]);
        assert_eq!(concept.name(), "pet");
        assert_eq!(concept.members().len(), 4);
        assert_eq!(concept.members()[2].width(), 2);
        assert_eq!(concept.members()[3], Member::Concept("bird".to_string()));
    }

    #[test]
    fn member_serde_round_trip() {
        let member = Member::parse("guinea pig");
        let json = serde_json::to_string(&member).unwrap();
        assert_eq!(serde_json::from_str::<Member>(&json).unwrap(), member);
    }
}
