//! Grounding values.
//!
//! Everything the runtime stores or hands back is a [`Value`]: a piece of
//! text or an ordered list of values. The empty list doubles as the sentinel
//! returned by every unset read, so runtime accessors never need to fail.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A representable text-or-structure grounding value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A single piece of text, usually one word.
    Text(String),
    /// An ordered list of values.
    List(Vec<Value>),
}

impl Value {
    /// The empty-list sentinel returned for unset groundings and variables.
    pub fn empty() -> Self {
        Value::List(Vec::new())
    }

    /// True for the empty-list sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::List(items) if items.is_empty())
    }

    /// A text value.
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    /// A list of text values, one per whitespace-separated token.
    pub fn words(text: &str) -> Self {
        Value::List(text.split_whitespace().map(Value::text).collect())
    }

    /// Join every text leaf, depth first, with single spaces.
    pub fn render(&self) -> String {
        let mut words = Vec::new();
        self.collect_text(&mut words);
        words.join(" ")
    }

    fn collect_text(&self, out: &mut Vec<String>) {
        match self {
            Value::Text(text) => out.push(text.clone()),
            Value::List(items) => {
                for item in items {
                    item.collect_text(out);
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
