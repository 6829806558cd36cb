//! The whole-utterance negation predicate.
//!
//! Negation deliberately ignores which tokens the other clauses of a rule
//! consumed: a negated term anywhere in the sentence blocks the rule. The
//! check runs against the raw utterance read from the dialogue anchor and
//! against its canonical-form rendering, once per rule evaluation.

use crate::concept::resolve_members;
use crate::session::Session;
use crate::term::Term;
use parley_lexicon::{Lexicon, Member};
use tracing::trace;

/// True when none of `terms` occurs, verbatim or in canonical form, anywhere
/// in the current utterance. Vacuously true when no utterance is anchored.
pub fn negation_holds(lexicon: &impl Lexicon, session: &Session, terms: &[Term]) -> bool {
    let Some(utterance) = session.utterance() else {
        return true;
    };
    let raw = utterance.to_lowercase();
    let canonical = canonical_rendering(lexicon, utterance);

    for term in terms {
        for needle in needles(lexicon, term) {
            let needle = needle.to_lowercase();
            if raw.contains(&needle) || canonical.contains(&needle) {
                trace!(%term, needle = %needle, "negated term present in utterance");
                return false;
            }
        }
    }
    true
}

/// The utterance with every token replaced by its canonical form.
fn canonical_rendering(lexicon: &impl Lexicon, utterance: &str) -> String {
    utterance
        .split_whitespace()
        .map(|token| lexicon.lemma_of(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text forms a negated term can appear as: the term itself plus its
/// canonical rendering; concepts contribute every member of their closure.
fn needles(lexicon: &impl Lexicon, term: &Term) -> Vec<String> {
    match term {
        Term::Word(word) | Term::Lemma(word) => {
            vec![word.clone(), lexicon.lemma_of(word)]
        }
        Term::Phrase(text) => {
            let surface = text.split_whitespace().collect::<Vec<_>>().join(" ");
            let canonical = canonical_rendering(lexicon, text);
            vec![surface, canonical]
        }
        Term::Concept(name) => resolve_members(lexicon, name)
            .into_iter()
            .flat_map(|member| member_needles(lexicon, &member))
            .collect(),
        Term::Choices(nested) => nested
            .iter()
            .flat_map(|term| needles(lexicon, term))
            .collect(),
        // Spans, variables and functions carry no text to exclude.
        _ => Vec::new(),
    }
}

fn member_needles(lexicon: &impl Lexicon, member: &Member) -> Vec<String> {
    match member {
        Member::Word(word) | Member::Lemma(word) => {
            vec![word.clone(), lexicon.lemma_of(word)]
        }
        Member::Phrase(words) => {
            let surface = words.join(" ");
            let canonical = canonical_rendering(lexicon, &surface);
            vec![surface, canonical]
        }
        Member::Concept(_) => Vec::new(),
    }
}
