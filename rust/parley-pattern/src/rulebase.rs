//! Rule assembly and registration.
//!
//! A rule is a compiled context (one fragment per authored term), a set of
//! action alternatives, and an optional goal. The [`RuleBase`] merely
//! registers named rules and numeric engine parameters; chaining strategy
//! and inference belong to the external rule engine.

use crate::action::Action;
use crate::compile::Compiler;
use crate::error::PatternResult;
use crate::fragment::Fragment;
use crate::term::Term;
use parley_lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A named goal with its numeric weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal name.
    pub name: String,
    /// Weight registered with the engine.
    pub weight: f64,
}

/// One authored rule, compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule name, unique within a rule base.
    pub name: String,
    /// One compiled fragment per context term, in authoring order.
    pub context: Vec<Fragment>,
    /// Action alternatives selected among once the context is satisfied.
    pub actions: Vec<Action>,
    /// Optional goal this rule serves.
    pub goal: Option<Goal>,
}

impl Rule {
    /// Compile a rule's context terms with a single compiler instance, so
    /// generated variables are unique across the whole rule.
    pub fn compile(
        lexicon: &impl Lexicon,
        name: impl Into<String>,
        terms: &[Term],
        actions: Vec<Action>,
    ) -> PatternResult<Rule> {
        let name = name.into();
        debug!(rule = %name, terms = terms.len(), "compiling rule");
        let mut compiler = Compiler::new(lexicon);
        let context = terms
            .iter()
            .map(|term| compiler.compile(term))
            .collect::<PatternResult<Vec<_>>>()?;
        Ok(Rule {
            name,
            context,
            actions,
            goal: None,
        })
    }

    /// Attach a goal.
    pub fn with_goal(mut self, name: impl Into<String>, weight: f64) -> Self {
        self.goal = Some(Goal {
            name: name.into(),
            weight,
        });
        self
    }

    /// The whole context as one concatenated fragment, the shape handed to
    /// the matching engine.
    pub fn pattern(&self) -> Fragment {
        Fragment::combine(self.context.iter().cloned())
    }
}

/// Registry of named rules and numeric engine parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleBase {
    rules: BTreeMap<String, Rule>,
    parameters: BTreeMap<String, f64>,
}

impl RuleBase {
    /// An empty rule base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule under its name. Re-registering a name replaces the
    /// earlier rule.
    pub fn register(&mut self, rule: Rule) -> &mut Self {
        self.rules.insert(rule.name.clone(), rule);
        self
    }

    /// Register a numeric engine parameter.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }

    /// Registered rules in name order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionContent;
    use parley_lexicon::{Concept, MemoryLexicon};

    fn lexicon() -> MemoryLexicon {
        let mut lexicon = MemoryLexicon::new();
        lexicon.define_concept(Concept::define("pet", ["cat", "dog"]));
        lexicon
    }

    #[test]
    fn rule_compiles_each_context_term() {
        let lexicon = lexicon();
        let rule = Rule::compile(
            &lexicon,
            "likes-pets",
            &[
                Term::lemma("i"),
                Term::lemma("like"),
                Term::variable("obj", Term::concept("pet")),
            ],
            vec![Action::say([ActionContent::text("me too")])],
        )
        .unwrap();

        assert_eq!(rule.context.len(), 3);
        let pattern = rule.pattern();
        assert!(pattern.is_balanced());
        // Two lemma slots plus the concept glob slot.
        assert_eq!(pattern.slot_count(), 3);
    }

    #[test]
    fn variables_are_unique_across_a_rule() {
        let lexicon = lexicon();
        let rule = Rule::compile(
            &lexicon,
            "two-concepts",
            &[Term::concept("pet"), Term::concept("pet")],
            vec![],
        )
        .unwrap();
        let first = &rule.context[0].declarations[0].variable;
        let second = &rule.context[1].declarations[0].variable;
        assert_ne!(first, second);
    }

    #[test]
    fn rulebase_registers_rules_and_parameters() {
        let lexicon = lexicon();
        let mut base = RuleBase::new();
        let rule = Rule::compile(&lexicon, "r1", &[Term::word("hi")], vec![])
            .unwrap()
            .with_goal("chat", 0.9);
        base.register(rule);
        base.set_parameter("complexity-penalty", 0.1);

        assert_eq!(base.len(), 1);
        assert_eq!(base.rule("r1").unwrap().goal.as_ref().unwrap().weight, 0.9);
        assert_eq!(base.parameter("complexity-penalty"), Some(0.1));
        assert_eq!(base.parameter("missing"), None);
    }

    #[test]
    fn reregistering_replaces() {
        let lexicon = lexicon();
        let mut base = RuleBase::new();
        base.register(Rule::compile(&lexicon, "r", &[Term::word("a")], vec![]).unwrap());
        base.register(Rule::compile(&lexicon, "r", &[Term::word("b")], vec![]).unwrap());
        assert_eq!(base.len(), 1);
        match &base.rule("r").unwrap().context[0].clauses[1] {
            crate::clause::Clause::HasWord { word, .. } => assert_eq!(word, "b"),
            other => panic!("unexpected clause {other}"),
        }
    }
}
