//! JSON round trips for the authored and compiled data model.

use anyhow::Result;
use parley_lexicon::{Concept, MemoryLexicon};
use parley_pattern::{Action, ActionContent, Rule, RuleBase, Term, Value};
use pretty_assertions::assert_eq;

fn lexicon() -> MemoryLexicon {
    let mut lexicon = MemoryLexicon::new();
    lexicon.define_concept(Concept::define("pet", ["cat", "dog", "guinea pig"]));
    lexicon
}

#[test]
fn term_round_trip() -> Result<()> {
    let term = Term::choices([
        Term::word("hello"),
        Term::phrase("good morning"),
        Term::concept("greeting"),
    ]);
    let json = serde_json::to_string(&term)?;
    let back: Term = serde_json::from_str(&json)?;
    assert_eq!(back, term);
    Ok(())
}

#[test]
fn value_serializes_as_plain_json() -> Result<()> {
    assert_eq!(serde_json::to_string(&Value::text("cat"))?, r#""cat""#);
    assert_eq!(
        serde_json::to_string(&Value::words("guinea pig"))?,
        r#"["guinea","pig"]"#
    );
    assert_eq!(serde_json::to_string(&Value::empty())?, "[]");
    Ok(())
}

#[test]
fn compiled_rule_round_trip() -> Result<()> {
    let lexicon = lexicon();
    let rule = Rule::compile(
        &lexicon,
        "greet",
        &[
            Term::lemma("hello"),
            Term::variable("obj", Term::concept("pet")),
        ],
        vec![Action::say([ActionContent::text("hi there")])],
    )?
    .with_goal("chat", 0.9);

    let json = serde_json::to_string(&rule)?;
    let back: Rule = serde_json::from_str(&json)?;
    assert_eq!(back, rule);
    Ok(())
}

#[test]
fn rulebase_round_trip() -> Result<()> {
    let lexicon = lexicon();
    let mut base = RuleBase::new();
    base.register(Rule::compile(
        &lexicon,
        "greet",
        &[Term::word("hi")],
        vec![Action::say([ActionContent::text("hello")])],
    )?);
    base.set_parameter("complexity-penalty", 0.1);

    let json = serde_json::to_string(&base)?;
    let back: RuleBase = serde_json::from_str(&json)?;
    assert_eq!(back.len(), 1);
    assert_eq!(back.parameter("complexity-penalty"), Some(0.1));
    assert_eq!(back.rule("greet"), base.rule("greet"));
    Ok(())
}
