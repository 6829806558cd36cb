//! Session state.
//!
//! One [`Session`] holds everything a dialogue session mutates at match and
//! action time: the grounding recorder (two parallel stores, surface words
//! and canonical forms), the user-variable store, the dialogue anchor, and
//! the random source used for action selection. The engine passes the session
//! by reference into every runtime callable; hosts that run several sessions
//! concurrently instantiate one `Session` each, there is no built-in
//! synchronization.

use crate::fragment::VariableId;
use crate::value::Value;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use tracing::trace;

/// The dialogue anchor: the one externally owned slot this crate reads and
/// writes. Holds the utterance under evaluation, or the default marker once
/// an action has run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnchorState {
    /// No utterance pending; the state every action execution resets to.
    #[default]
    Default,
    /// The raw utterance currently being evaluated.
    Utterance(String),
}

/// Session-scoped mutable state for one dialogue session.
#[derive(Debug)]
pub struct Session {
    words: HashMap<VariableId, Value>,
    lemmas: HashMap<VariableId, Value>,
    user: HashMap<String, Value>,
    anchor: AnchorState,
    pub(crate) rng: StdRng,
}

impl Session {
    /// Create a session with a platform-seeded random source.
    pub fn new() -> Self {
        Session {
            words: HashMap::new(),
            lemmas: HashMap::new(),
            user: HashMap::new(),
            anchor: AnchorState::Default,
            rng: StdRng::from_entropy(),
        }
    }

    /// Record the values bound to a rule variable during a tentative match.
    ///
    /// Unconditional upsert into both stores; always reports success so the
    /// matcher can treat the recording clause as satisfied. Writes are not
    /// rolled back when the matcher backtracks: a later evaluation reusing
    /// the same identifier silently overwrites, an abandoned attempt leaves
    /// its writes behind.
    pub fn record_grounding(
        &mut self,
        word_var: VariableId,
        word_value: Value,
        lemma_var: VariableId,
        lemma_value: Value,
    ) -> bool {
        trace!(%word_var, %lemma_var, "recording grounding");
        self.words.insert(word_var, word_value);
        self.lemmas.insert(lemma_var, lemma_value);
        true
    }

    /// The surface words recorded for a variable, or the empty sentinel.
    pub fn word_grounding(&self, variable: &VariableId) -> Value {
        self.words.get(variable).cloned().unwrap_or_else(Value::empty)
    }

    /// The canonical forms recorded for a variable, or the empty sentinel.
    pub fn lemma_grounding(&self, variable: &VariableId) -> Value {
        self.lemmas
            .get(variable)
            .cloned()
            .unwrap_or_else(Value::empty)
    }

    /// Set a rule-authored named value. Unconditional upsert, always
    /// succeeds. Survives across rule evaluations for the session lifetime.
    pub fn set_user_variable(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        trace!(name = %name, "setting user variable");
        self.user.insert(name, value);
    }

    /// Read a user variable, or the empty sentinel when unset.
    pub fn user_variable(&self, name: &str) -> Value {
        self.user.get(name).cloned().unwrap_or_else(Value::empty)
    }

    /// True when the user variable has been set.
    pub fn user_variable_exists(&self, name: &str) -> bool {
        self.user.contains_key(name)
    }

    /// True when the user variable is set and renders equal to `value`.
    /// False when unset.
    pub fn user_variable_equals(&self, name: &str, value: &Value) -> bool {
        match self.user.get(name) {
            Some(stored) => stored.render() == value.render(),
            None => false,
        }
    }

    /// Hand the session the utterance to evaluate.
    pub fn set_utterance(&mut self, text: impl Into<String>) {
        self.anchor = AnchorState::Utterance(text.into());
    }

    /// The raw utterance under evaluation, if any.
    pub fn utterance(&self) -> Option<&str> {
        match &self.anchor {
            AnchorState::Utterance(text) => Some(text),
            AnchorState::Default => None,
        }
    }

    /// Current anchor state.
    pub fn anchor(&self) -> &AnchorState {
        &self.anchor
    }

    /// Reset the anchor to the default marker. Every action execution calls
    /// this, whether or not any text was produced.
    pub fn reset_anchor(&mut self) {
        self.anchor = AnchorState::Default;
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounding_round_trip() {
        let mut session = Session::new();
        let word_var = VariableId::new("obj");
        let lemma_var = VariableId::new("obj:lemma");

        assert!(session.word_grounding(&word_var).is_empty());
        assert!(session.lemma_grounding(&lemma_var).is_empty());

        let ok = session.record_grounding(
            word_var.clone(),
            Value::text("cats"),
            lemma_var.clone(),
            Value::text("cat"),
        );
        assert!(ok);
        assert_eq!(session.word_grounding(&word_var), Value::text("cats"));
        assert_eq!(session.lemma_grounding(&lemma_var), Value::text("cat"));
    }

    #[test]
    fn grounding_overwrites_silently() {
        let mut session = Session::new();
        let var = VariableId::new("obj");
        session.record_grounding(
            var.clone(),
            Value::text("cat"),
            VariableId::new("obj:lemma"),
            Value::text("cat"),
        );
        session.record_grounding(
            var.clone(),
            Value::text("dog"),
            VariableId::new("obj:lemma"),
            Value::text("dog"),
        );
        assert_eq!(session.word_grounding(&var), Value::text("dog"));
    }

    #[test]
    fn user_variable_round_trip() {
        let mut session = Session::new();
        assert!(!session.user_variable_exists("mood"));
        assert!(session.user_variable("mood").is_empty());
        assert!(!session.user_variable_equals("mood", &Value::text("happy")));

        session.set_user_variable("mood", Value::text("happy"));
        assert!(session.user_variable_exists("mood"));
        assert_eq!(session.user_variable("mood"), Value::text("happy"));
        assert!(session.user_variable_equals("mood", &Value::text("happy")));
        assert!(!session.user_variable_equals("mood", &Value::text("sad")));
    }

    #[test]
    fn anchor_read_write() {
        let mut session = Session::new();
        assert_eq!(session.anchor(), &AnchorState::Default);
        assert!(session.utterance().is_none());

        session.set_utterance("i like cats");
        assert_eq!(session.utterance(), Some("i like cats"));

        session.reset_anchor();
        assert_eq!(session.anchor(), &AnchorState::Default);
    }
}
