//! Concept closure resolution and the membership predicates.
//!
//! The matcher calls [`is_concept_member`] and [`is_choice_member`] while it
//! tries grounding candidates for concept and choice globs. Both are
//! read-only against the lexicon and crisp: the entire candidate sequence
//! either is one of the recognized member forms or it is not, there is no
//! partial credit.

use crate::term::Term;
use parley_lexicon::{Lexicon, Member};
use std::collections::BTreeSet;
use tracing::trace;

/// Transitive member closure of a concept: nested concept references are
/// expanded, cycles are tolerated, order of first encounter is kept.
pub fn resolve_members(lexicon: &impl Lexicon, concept: &str) -> Vec<Member> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    collect(lexicon, concept, &mut seen, &mut out);
    out
}

fn collect(
    lexicon: &impl Lexicon,
    concept: &str,
    seen: &mut BTreeSet<String>,
    out: &mut Vec<Member>,
) {
    if !seen.insert(concept.to_string()) {
        return;
    }
    for member in lexicon.members_of(concept) {
        match member {
            Member::Concept(nested) => collect(lexicon, &nested, seen, out),
            other => out.push(other),
        }
    }
}

/// Does the whole candidate sequence belong to the named concept?
pub fn is_concept_member(lexicon: &impl Lexicon, concept: &str, candidate: &[String]) -> bool {
    let members = resolve_members(lexicon, concept);
    let hit = sequence_in(lexicon, &members, candidate);
    trace!(concept, ?candidate, hit, "concept membership check");
    hit
}

/// Does the whole candidate sequence match one alternative of a choice set?
///
/// Concepts in the list contribute their resolved members, every other term
/// contributes itself, then the same membership test applies.
pub fn is_choice_member(lexicon: &impl Lexicon, terms: &[Term], candidate: &[String]) -> bool {
    let members = flatten_terms(lexicon, terms);
    let hit = sequence_in(lexicon, &members, candidate);
    trace!(?candidate, hit, "choice membership check");
    hit
}

/// Flatten a choice term list into member forms: concepts resolve to their
/// transitive members, words, lemmas and phrases stand for themselves.
/// Nested choice sets flatten recursively; other term kinds contribute
/// nothing.
pub fn flatten_terms(lexicon: &impl Lexicon, terms: &[Term]) -> Vec<Member> {
    let mut out = Vec::new();
    for term in terms {
        match term {
            Term::Word(word) => out.push(Member::Word(word.clone())),
            Term::Lemma(word) => out.push(Member::Lemma(lexicon.lemma_of(word))),
            Term::Phrase(text) => out.push(Member::Phrase(
                text.split_whitespace().map(str::to_string).collect(),
            )),
            Term::Concept(name) => out.extend(resolve_members(lexicon, name)),
            Term::Choices(nested) => out.extend(flatten_terms(lexicon, nested)),
            _ => {}
        }
    }
    out
}

fn sequence_in(lexicon: &impl Lexicon, members: &[Member], candidate: &[String]) -> bool {
    if candidate.is_empty() {
        return false;
    }
    members
        .iter()
        .any(|member| member_matches(lexicon, member, candidate))
}

/// One member form against the whole candidate sequence.
fn member_matches(lexicon: &impl Lexicon, member: &Member, candidate: &[String]) -> bool {
    match member {
        Member::Word(word) => {
            candidate.len() == 1 && token_matches(lexicon, word, &candidate[0])
        }
        Member::Lemma(lemma) => {
            candidate.len() == 1 && lexicon.lemma_of(&candidate[0]) == *lemma
        }
        Member::Phrase(words) => {
            candidate.len() == words.len()
                && words
                    .iter()
                    .zip(candidate)
                    .all(|(word, token)| token_matches(lexicon, word, token))
        }
        // Nested concepts are expanded before matching.
        Member::Concept(_) => false,
    }
}

fn token_matches(lexicon: &impl Lexicon, word: &str, token: &str) -> bool {
    word == token || lexicon.lemma_of(token) == lexicon.lemma_of(word)
}
