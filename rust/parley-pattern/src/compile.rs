//! The term compiler.
//!
//! One lowering rule per term kind, each producing a [`Fragment`]. The
//! compiler is pure apart from generated identifiers, which come from a
//! monotonic counter so every variable declared within one compilation run is
//! unique. Lemmas of literal words are resolved once here, at compile time,
//! never re-derived while matching.

use crate::clause::{
    ABSENT, Application, CHOICE_MEMBER, CONCEPT_MEMBER, Clause, PatternValue, RECORD_GROUNDING,
};
use crate::error::{CompileError, PatternResult};
use crate::fragment::{Declaration, Fragment, GroundingRef, NodeType, VariableId};
use crate::term::{Interval, Term};
use parley_lexicon::Lexicon;
use tracing::debug;

/// Compiles terms into pattern fragments against a lexicon.
pub struct Compiler<'a, L: Lexicon> {
    lexicon: &'a L,
    counter: usize,
}

impl<'a, L: Lexicon> Compiler<'a, L> {
    /// Create a compiler over the given lexicon. Identifier generation starts
    /// fresh, so fragments from different compilers may reuse names; within
    /// one compiler every generated identifier is unique.
    pub fn new(lexicon: &'a L) -> Self {
        Compiler {
            lexicon,
            counter: 0,
        }
    }

    /// Compile one term into its pattern fragment.
    pub fn compile(&mut self, term: &Term) -> PatternResult<Fragment> {
        debug!(term = %term, "compiling term");
        match term {
            Term::Word(word) => Ok(self.word(word)),
            Term::Lemma(word) => Ok(self.lemma(word)),
            Term::Phrase(text) => self.phrase(text),
            Term::Concept(name) => Ok(self.concept(name)),
            Term::Choices(terms) => self.choices(terms),
            Term::Negation(terms) => self.negation(terms),
            Term::Wildcard(interval) => self.wildcard(*interval),
            Term::Variable { name, term } => self.variable(name, term),
            Term::Context { name, args } => Ok(self.context(name, args)),
        }
    }

    fn fresh(&mut self, prefix: &str) -> VariableId {
        let id = VariableId::new(format!("{prefix}-{}", self.counter));
        self.counter += 1;
        id
    }

    /// Literal word: one word-instance variable linked to its sentence
    /// position and its surface form. The lemma projection is fixed here.
    fn word(&mut self, word: &str) -> Fragment {
        let instance = self.fresh("w");
        Fragment {
            declarations: vec![Declaration::node(instance.clone(), NodeType::WordInstance)],
            clauses: vec![
                Clause::InSentence {
                    instance: instance.clone(),
                },
                Clause::HasWord {
                    instance,
                    word: word.to_string(),
                },
            ],
            word_refs: vec![GroundingRef::Word(word.to_string())],
            lemma_refs: vec![GroundingRef::Word(self.lexicon.lemma_of(word))],
        }
    }

    /// Canonical-form word: the instance variable links to a canonical-form
    /// variable fixed to the lemma. The word projection is the canonical-form
    /// variable itself, grounded at match time to whichever surface word
    /// reduces to that lemma.
    fn lemma(&mut self, word: &str) -> Fragment {
        let lemma = self.fresh("l");
        let instance = self.fresh("w");
        let canonical = self.lexicon.lemma_of(word);
        Fragment {
            declarations: vec![
                Declaration::node(lemma.clone(), NodeType::WordNode),
                Declaration::node(instance.clone(), NodeType::WordInstance),
            ],
            clauses: vec![
                Clause::InSentence {
                    instance: instance.clone(),
                },
                Clause::HasLemma {
                    instance,
                    lemma: lemma.clone(),
                },
                Clause::LemmaIs {
                    lemma: lemma.clone(),
                    value: canonical.clone(),
                },
            ],
            word_refs: vec![GroundingRef::Var(lemma)],
            lemma_refs: vec![GroundingRef::Word(canonical)],
        }
    }

    /// Phrase: the pointwise, in-order concatenation of its words compiled
    /// as literal words.
    fn phrase(&mut self, text: &str) -> PatternResult<Fragment> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(CompileError::EmptyPhrase);
        }
        Ok(Fragment::combine(
            tokens.into_iter().map(|token| self.word(token)),
        ))
    }

    /// Concept: a glob pair bounded by the concept's cardinality, approved
    /// at match time by the concept membership predicate.
    fn concept(&mut self, name: &str) -> Fragment {
        let upper = self.lexicon.cardinality(name);
        let (word_glob, fragment) = self.glob_pair(Interval::bounded(1, upper));
        let clause = Clause::Predicate(Application::apply(
            CONCEPT_MEMBER,
            vec![PatternValue::text(name), PatternValue::Var(word_glob)],
        ));
        Fragment {
            clauses: vec![clause],
            ..fragment
        }
    }

    /// Choice set: a glob pair bounded by the total cardinality of all
    /// alternatives, approved by the choice membership predicate over the
    /// flattened term list.
    fn choices(&mut self, terms: &[Term]) -> PatternResult<Fragment> {
        if terms.is_empty() {
            return Err(CompileError::EmptyChoices);
        }
        let mut total = 0;
        for term in terms {
            total += self.alternative_width(term)?;
        }
        let alternatives = list_value(terms, "choice")?;
        let (word_glob, fragment) = self.glob_pair(Interval::bounded(1, total));
        let clause = Clause::Predicate(Application::apply(
            CHOICE_MEMBER,
            vec![alternatives, PatternValue::Var(word_glob)],
        ));
        Ok(Fragment {
            clauses: vec![clause],
            ..fragment
        })
    }

    /// Negation: no declarations and no groundings, just one whole-utterance
    /// clause handing the term list to the negation predicate.
    fn negation(&mut self, terms: &[Term]) -> PatternResult<Fragment> {
        if terms.is_empty() {
            return Err(CompileError::EmptyNegation);
        }
        let values = terms
            .iter()
            .map(|term| member_value(term, "negation"))
            .collect::<PatternResult<Vec<_>>>()?;
        Ok(Fragment {
            clauses: vec![Clause::Predicate(Application::apply(ABSENT, values))],
            ..Fragment::empty()
        })
    }

    /// Wildcard: a glob pair with the authored interval and no clauses; the
    /// matcher enforces cardinality on its own.
    fn wildcard(&mut self, interval: Interval) -> PatternResult<Fragment> {
        if !interval.is_valid() {
            return Err(CompileError::BadInterval { interval });
        }
        let (_, fragment) = self.glob_pair(interval);
        Ok(fragment)
    }

    /// Variable: compile the wrapped term, then append one effect clause
    /// applying the grounding recorder to the wrapped term's projections.
    /// Declares nothing of its own and passes the projections through.
    fn variable(&mut self, name: &str, term: &Term) -> PatternResult<Fragment> {
        let mut fragment = self.compile(term)?;
        let word_var = VariableId::new(name);
        let lemma_var = VariableId::new(format!("{name}:lemma"));
        fragment.clauses.push(Clause::Effect(Application::apply(
            RECORD_GROUNDING,
            vec![
                PatternValue::Var(word_var),
                refs_value(&fragment.word_refs),
                PatternValue::Var(lemma_var),
                refs_value(&fragment.lemma_refs),
            ],
        )));
        Ok(fragment)
    }

    /// Context function: one application clause for the externally defined
    /// predicate. Single argument bare, multiple wrapped, uniform with
    /// action schemas.
    fn context(&mut self, name: &str, args: &[PatternValue]) -> Fragment {
        Fragment {
            clauses: vec![Clause::Predicate(Application::apply(name, args.to_vec()))],
            ..Fragment::empty()
        }
    }

    /// Declare the word/lemma glob pair every span-shaped term uses. Both
    /// globs share the interval; the globs are the grounding projections.
    fn glob_pair(&mut self, interval: Interval) -> (VariableId, Fragment) {
        let word_glob = self.fresh("g");
        let lemma_glob = VariableId::new(format!("{}:lemma", word_glob.as_str()));
        let fragment = Fragment {
            declarations: vec![
                Declaration::glob(word_glob.clone(), interval),
                Declaration::glob(lemma_glob.clone(), interval),
            ],
            clauses: vec![],
            word_refs: vec![GroundingRef::Var(word_glob.clone())],
            lemma_refs: vec![GroundingRef::Var(lemma_glob)],
        };
        (word_glob, fragment)
    }

    /// Widest span one alternative of a choice set can cover.
    fn alternative_width(&self, term: &Term) -> PatternResult<usize> {
        match term {
            Term::Word(_) | Term::Lemma(_) => Ok(1),
            Term::Phrase(text) => {
                let width = text.split_whitespace().count();
                if width == 0 {
                    Err(CompileError::EmptyPhrase)
                } else {
                    Ok(width)
                }
            }
            Term::Concept(name) => Ok(self.lexicon.cardinality(name)),
            other => Err(CompileError::UnsupportedMember {
                kind: other.kind(),
                list: "choice",
            }),
        }
    }
}

/// Render a term list as one application argument.
fn list_value(terms: &[Term], list: &'static str) -> PatternResult<PatternValue> {
    Ok(PatternValue::List(
        terms
            .iter()
            .map(|term| member_value(term, list))
            .collect::<PatternResult<Vec<_>>>()?,
    ))
}

/// Render one choice/negation list member as an application argument.
fn member_value(term: &Term, list: &'static str) -> PatternResult<PatternValue> {
    match term {
        Term::Word(word) | Term::Lemma(word) => Ok(PatternValue::text(word)),
        Term::Phrase(text) => Ok(PatternValue::List(
            text.split_whitespace().map(PatternValue::text).collect(),
        )),
        Term::Concept(name) => Ok(PatternValue::text(format!("~{name}"))),
        other => Err(CompileError::UnsupportedMember {
            kind: other.kind(),
            list,
        }),
    }
}

/// A grounding projection as an application argument: one reference passes
/// bare, several wrap into an ordered sequence.
fn refs_value(refs: &[GroundingRef]) -> PatternValue {
    let mut values: Vec<PatternValue> = refs
        .iter()
        .map(|r| match r {
            GroundingRef::Var(id) => PatternValue::Var(id.clone()),
            GroundingRef::Word(word) => PatternValue::text(word),
        })
        .collect();
    match values.len() {
        1 => values.swap_remove(0),
        _ => PatternValue::List(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_lexicon::{Concept, MemoryLexicon};
    use pretty_assertions::assert_eq;

    fn lexicon() -> MemoryLexicon {
        let mut lexicon = MemoryLexicon::new();
        lexicon
            .add_lemma("cats", "cat")
            .add_lemma("ran", "run")
            .define_concept(Concept::define("pet", ["cat", "dog", "guinea pig"]));
        lexicon
    }

    #[test]
    fn word_fixes_both_projections_at_compile_time() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        let fragment = compiler.compile(&Term::word("cats")).unwrap();

        assert_eq!(fragment.word_refs, vec![GroundingRef::Word("cats".into())]);
        assert_eq!(fragment.lemma_refs, vec![GroundingRef::Word("cat".into())]);
        assert_eq!(fragment.declarations.len(), 1);
        assert_eq!(fragment.declarations[0].types, vec![NodeType::WordInstance]);
        assert!(fragment.is_balanced());
    }

    #[test]
    fn lemma_grounds_word_projection_through_canonical_variable() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        let fragment = compiler.compile(&Term::lemma("ran")).unwrap();

        // Word projection is the canonical-form variable; lemma projection
        // is fixed to the canonical form resolved at compile time.
        assert_eq!(
            fragment.word_refs,
            vec![GroundingRef::Var(VariableId::new("l-0"))]
        );
        assert_eq!(fragment.lemma_refs, vec![GroundingRef::Word("run".into())]);
        assert!(fragment.clauses.contains(&Clause::LemmaIs {
            lemma: VariableId::new("l-0"),
            value: "run".to_string(),
        }));
    }

    #[test]
    fn phrase_concatenates_word_fragments_pointwise() {
        let lexicon = lexicon();

        let mut phrase_compiler = Compiler::new(&lexicon);
        let phrase = phrase_compiler.compile(&Term::phrase("nice cats")).unwrap();

        let mut word_compiler = Compiler::new(&lexicon);
        let expected = Fragment::combine([
            word_compiler.compile(&Term::word("nice")).unwrap(),
            word_compiler.compile(&Term::word("cats")).unwrap(),
        ]);

        assert_eq!(phrase, expected);
        assert_eq!(phrase.slot_count(), 2);
    }

    #[test]
    fn concept_declares_glob_pair_with_cardinality_bound() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        let fragment = compiler.compile(&Term::concept("pet")).unwrap();

        assert_eq!(fragment.declarations.len(), 2);
        for declaration in &fragment.declarations {
            assert_eq!(declaration.types, vec![NodeType::Glob]);
            // "guinea pig" is the widest member.
            assert_eq!(declaration.interval, Interval::bounded(1, 2));
        }
        assert_eq!(
            fragment.clauses,
            vec![Clause::Predicate(Application::apply(
                CONCEPT_MEMBER,
                vec![PatternValue::text("pet"), PatternValue::var("g-0")],
            ))]
        );
        assert_eq!(
            fragment.word_refs,
            vec![GroundingRef::Var(VariableId::new("g-0"))]
        );
        assert_eq!(
            fragment.lemma_refs,
            vec![GroundingRef::Var(VariableId::new("g-0:lemma"))]
        );
    }

    #[test]
    fn choices_sum_alternative_cardinalities() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        let fragment = compiler
            .compile(&Term::choices([
                Term::word("fish"),
                Term::phrase("guinea pig"),
                Term::concept("pet"),
            ]))
            .unwrap();

        // 1 (word) + 2 (phrase) + 2 (concept) = 5
        assert_eq!(
            fragment.declarations[0].interval,
            Interval::bounded(1, 5)
        );
        match &fragment.clauses[0] {
            Clause::Predicate(application) => assert_eq!(application.name, CHOICE_MEMBER),
            other => panic!("expected predicate clause, got {other}"),
        }
    }

    #[test]
    fn negation_has_no_declarations_or_groundings() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        let fragment = compiler
            .compile(&Term::negation([Term::word("politics"), Term::concept("pet")]))
            .unwrap();

        assert!(fragment.declarations.is_empty());
        assert!(fragment.word_refs.is_empty());
        assert!(fragment.lemma_refs.is_empty());
        assert_eq!(
            fragment.clauses,
            vec![Clause::Predicate(Application::apply(
                ABSENT,
                vec![PatternValue::text("politics"), PatternValue::text("~pet")],
            ))]
        );
    }

    #[test]
    fn wildcard_is_constraint_only() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        let fragment = compiler.compile(&Term::any_words()).unwrap();

        assert!(fragment.clauses.is_empty());
        assert_eq!(fragment.declarations.len(), 2);
        assert_eq!(fragment.declarations[0].interval, Interval::at_least(0));
        assert_eq!(fragment.slot_count(), 1);
    }

    #[test]
    fn invalid_wildcard_interval_is_rejected() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        let result = compiler.compile(&Term::wildcard(3, 1));
        assert_eq!(
            result,
            Err(CompileError::BadInterval {
                interval: Interval::bounded(3, 1)
            })
        );
    }

    #[test]
    fn variable_appends_recorder_effect_and_passes_projections_through() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        let fragment = compiler
            .compile(&Term::variable("obj", Term::concept("pet")))
            .unwrap();

        // Projections come from the wrapped concept, untouched.
        assert_eq!(
            fragment.word_refs,
            vec![GroundingRef::Var(VariableId::new("g-0"))]
        );
        let last = fragment.clauses.last().unwrap();
        assert_eq!(
            last,
            &Clause::Effect(Application::apply(
                RECORD_GROUNDING,
                vec![
                    PatternValue::var("obj"),
                    PatternValue::var("g-0"),
                    PatternValue::var("obj:lemma"),
                    PatternValue::var("g-0:lemma"),
                ],
            ))
        );
    }

    #[test]
    fn context_function_wraps_multiple_arguments() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);

        let single = compiler
            .compile(&Term::context("is-greeting", vec![PatternValue::text("hi")]))
            .unwrap();
        match &single.clauses[0] {
            Clause::Predicate(application) => {
                assert_eq!(application.argument, PatternValue::Text("hi".into()))
            }
            other => panic!("expected predicate clause, got {other}"),
        }

        let double = compiler
            .compile(&Term::context(
                "mentions",
                vec![PatternValue::text("a"), PatternValue::text("b")],
            ))
            .unwrap();
        match &double.clauses[0] {
            Clause::Predicate(application) => assert_eq!(
                application.argument,
                PatternValue::List(vec![PatternValue::text("a"), PatternValue::text("b")])
            ),
            other => panic!("expected predicate clause, got {other}"),
        }
    }

    #[test]
    fn generated_identifiers_are_unique_within_a_compiler() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        let first = compiler.compile(&Term::concept("pet")).unwrap();
        let second = compiler.compile(&Term::concept("pet")).unwrap();
        assert_ne!(first.declarations[0].variable, second.declarations[0].variable);
    }

    #[test]
    fn empty_lists_are_rejected() {
        let lexicon = lexicon();
        let mut compiler = Compiler::new(&lexicon);
        assert_eq!(
            compiler.compile(&Term::phrase("   ")),
            Err(CompileError::EmptyPhrase)
        );
        assert_eq!(
            compiler.compile(&Term::choices([])),
            Err(CompileError::EmptyChoices)
        );
        assert_eq!(
            compiler.compile(&Term::negation([])),
            Err(CompileError::EmptyNegation)
        );
    }
}
