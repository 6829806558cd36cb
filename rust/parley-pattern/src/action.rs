//! Action selection and execution.
//!
//! Once the matcher has fully grounded a rule, the engine hands its action
//! set to this module: one alternative is picked uniformly at random, its
//! textual content is collected depth first and spoken through the host's
//! [`Responder`], and the dialogue anchor is reset to the default marker
//! whether or not any text was produced.

use crate::clause::{Application, PatternValue};
use crate::session::Session;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Content of a textual action: a tree of text leaves and ordered groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionContent {
    /// A word-level piece of text.
    Text(String),
    /// An ordered grouping of nested content.
    Group(Vec<ActionContent>),
}

impl ActionContent {
    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        ActionContent::Text(text.into())
    }

    /// An ordered group.
    pub fn group(items: impl IntoIterator<Item = ActionContent>) -> Self {
        ActionContent::Group(items.into_iter().collect())
    }

    fn collect_text(&self, out: &mut Vec<String>) {
        match self {
            ActionContent::Text(text) => out.push(text.clone()),
            ActionContent::Group(items) => {
                for item in items {
                    item.collect_text(out);
                }
            }
        }
    }
}

/// One action alternative of a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Speak the collected text of the content tree.
    Say(Vec<ActionContent>),
    /// Apply an externally defined named schema.
    Schema {
        /// The external schema name.
        name: String,
        /// Positional arguments, wrapped per the one-bare rule on use.
        args: Vec<PatternValue>,
    },
}

impl Action {
    /// A textual action.
    pub fn say(content: impl IntoIterator<Item = ActionContent>) -> Self {
        Action::Say(content.into_iter().collect())
    }

    /// An external-schema action.
    pub fn schema(name: impl Into<String>, args: Vec<PatternValue>) -> Self {
        Action::Schema {
            name: name.into(),
            args,
        }
    }

    /// The application handed to the engine for a schema action. Textual
    /// actions are executed locally and return `None`.
    pub fn application(&self) -> Option<Application> {
        match self {
            Action::Say(_) => None,
            Action::Schema { name, args } => Some(Application::apply(name.clone(), args.clone())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Say(content) => {
                let mut words = Vec::new();
                for item in content {
                    item.collect_text(&mut words);
                }
                write!(f, "say \"{}\"", words.join(" "))
            }
            Action::Schema { name, args } => write!(f, "^{name}/{}", args.len()),
        }
    }
}

/// The external "say" effect sink provided by the session host.
pub trait Responder {
    /// Emit one utterance toward the user. The payload is opaque text.
    fn say(&mut self, text: &str);
}

/// Collecting responder used by tests and batch hosts.
impl Responder for Vec<String> {
    fn say(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

impl Session {
    /// Pick one action uniformly at random. No weighting, no exclusion of
    /// previously chosen alternatives; a single-element set always yields
    /// its element.
    pub fn select_action<'a>(&mut self, actions: &'a [Action]) -> Option<&'a Action> {
        match actions.len() {
            0 => None,
            1 => Some(&actions[0]),
            n => Some(&actions[self.rng.gen_range(0..n)]),
        }
    }

    /// Execute textual content: walk the trees depth first collecting every
    /// text leaf, join with single spaces, and speak the result when
    /// non-empty. The dialogue anchor is reset to the default marker
    /// unconditionally, even when nothing was said.
    pub fn execute(&mut self, content: &[ActionContent], responder: &mut dyn Responder) {
        let mut words = Vec::new();
        for item in content {
            item.collect_text(&mut words);
        }
        let text = words.join(" ");
        let text = text.trim();
        if !text.is_empty() {
            debug!(text = %text, "emitting say effect");
            responder.say(text);
        }
        self.reset_anchor();
    }

    /// Run one selected action: textual actions execute locally, schema
    /// actions come back as an application for the engine to invoke. The
    /// anchor resets on both paths.
    pub fn perform(
        &mut self,
        action: &Action,
        responder: &mut dyn Responder,
    ) -> Option<Application> {
        match action {
            Action::Say(content) => {
                self.execute(content, responder);
                None
            }
            Action::Schema { .. } => {
                self.reset_anchor();
                action.application()
            }
        }
    }
}
