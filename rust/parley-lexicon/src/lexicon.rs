//! The adapter trait consumed by the rule compiler, plus the in-memory
//! implementation used by single-process hosts and the test suites.

use crate::concept::{Concept, Member};
use std::collections::{BTreeMap, BTreeSet};

/// The lexical/concept adapter.
///
/// Everything here is a read: the compiler and the runtime predicates consume
/// this trait, they never write through it. Unknown words lemmatize to
/// themselves and unknown concepts resolve to an empty member list, keeping
/// every operation total.
pub trait Lexicon {
    /// Canonical (dictionary) form of a word.
    fn lemma_of(&self, word: &str) -> String;

    /// True when a word is already in canonical form.
    ///
    /// Host-facing: rule-file loaders use this to decide whether an authored
    /// word needs a lemma entry. The compiler and the runtime predicates go
    /// through [`Lexicon::lemma_of`] directly, which must agree with this
    /// check (a canonical word lemmatizes to itself).
    fn is_canonical(&self, word: &str) -> bool {
        self.lemma_of(word) == word
    }

    /// Direct members of a named concept, in definition order. Nested
    /// concept references are not expanded here.
    fn members_of(&self, concept: &str) -> Vec<Member>;

    /// Upper bound on the number of sentence positions a single member of
    /// the concept can occupy, over the transitive member closure.
    fn cardinality(&self, concept: &str) -> usize {
        let mut seen = BTreeSet::new();
        self.closure_width(concept, &mut seen).max(1)
    }

    /// Recursive width calculation behind [`Lexicon::cardinality`].
    /// `seen` guards against concept cycles.
    fn closure_width(&self, concept: &str, seen: &mut BTreeSet<String>) -> usize {
        if !seen.insert(concept.to_string()) {
            return 0;
        }
        self.members_of(concept)
            .iter()
            .map(|member| match member {
                Member::Concept(nested) => self.closure_width(nested, seen),
                other => other.width(),
            })
            .max()
            .unwrap_or(0)
    }
}

/// In-memory lexicon: explicit lemma overrides with a case-folding fallback,
/// plus a concept book keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryLexicon {
    lemmas: BTreeMap<String, String>,
    concepts: BTreeMap<String, Concept>,
}

impl MemoryLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface-form to canonical-form mapping.
    pub fn add_lemma(&mut self, word: impl Into<String>, lemma: impl Into<String>) -> &mut Self {
        self.lemmas.insert(word.into(), lemma.into());
        self
    }

    /// Define (or redefine) a concept.
    pub fn define_concept(&mut self, concept: Concept) -> &mut Self {
        self.concepts.insert(concept.name().to_string(), concept);
        self
    }

    /// Look up a concept definition by name.
    pub fn concept(&self, name: &str) -> Option<&Concept> {
        self.concepts.get(name)
    }
}

impl Lexicon for MemoryLexicon {
    fn lemma_of(&self, word: &str) -> String {
        if let Some(lemma) = self.lemmas.get(word) {
            return lemma.clone();
        }
        let folded = word.to_lowercase();
        match self.lemmas.get(&folded) {
            Some(lemma) => lemma.clone(),
            None => folded,
        }
    }

    fn members_of(&self, concept: &str) -> Vec<Member> {
        self.concepts
            .get(concept)
            .map(|c| c.members().to_vec())
            .unwrap_or_default()
    }
}

impl Lexicon for &dyn Lexicon {
    fn lemma_of(&self, word: &str) -> String {
        (**self).lemma_of(word)
    }

    fn is_canonical(&self, word: &str) -> bool {
        (**self).is_canonical(word)
    }

    fn members_of(&self, concept: &str) -> Vec<Member> {
        (**self).members_of(concept)
    }

    fn cardinality(&self, concept: &str) -> usize {
        (**self).cardinality(concept)
    }
}
