use std::fmt;
use std::ops::Not;

use super::affix::Polarity;
use super::derivation::Derivation;
use super::error::{GrammarError, PositionalError};
use super::form_potential::FormPotential;
use super::morpheme::Morpheme;
use super::operation::{
    Branch, ComplexCondition, Operation, OperationKind, RuleStructure, SameOrderGroup,
};

/// Builder for a [`Rule`] without going through the text syntax.
///
/// Each stage is defined via a closure; stages run in the order they are added.
///
/// # Example
///
/// ```
/// use morpho::{Polarity, RuleBuilder};
///
/// let rule = RuleBuilder::new()
///     .stage(|s| s.prefix("ge", Polarity::Insert))
///     .stage(|s| s.postfix("t", Polarity::Insert))
///     .build()
///     .unwrap();
/// assert_eq!(rule.apply("mach").unwrap(), "gemacht");
/// ```
#[derive(Debug, Default)]
pub struct RuleBuilder {
    groups: Vec<SameOrderGroup>,
}

/// Intermediate builder passed to the stage definition closure.
#[derive(Debug, Default)]
pub struct StageBuilder {
    operations: Vec<Operation>,
}

impl RuleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stage. Operations added in the closure share one same-order group.
    #[must_use]
    pub fn stage(mut self, f: impl FnOnce(StageBuilder) -> StageBuilder) -> Self {
        let stage = f(StageBuilder::default());
        self.groups.push(SameOrderGroup {
            operations: stage.operations,
        });
        self
    }

    /// Compile the stages into a [`Rule`].
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] if an operation is malformed.
    pub fn build(self) -> Result<Rule, GrammarError> {
        Rule::from_structure(RuleStructure {
            context: None,
            ordered_expressions: self.groups,
        })
    }
}

impl StageBuilder {
    #[must_use]
    pub fn prefix(self, form: impl Into<FormPotential>, polarity: Polarity) -> Self {
        self.operation(Operation::affix(OperationKind::Prefix, polarity, vec![form.into()]))
    }

    #[must_use]
    pub fn postfix(self, form: impl Into<FormPotential>, polarity: Polarity) -> Self {
        self.operation(Operation::affix(OperationKind::Postfix, polarity, vec![form.into()]))
    }

    #[must_use]
    pub fn circumfix(
        self,
        prefix: impl Into<FormPotential>,
        postfix: impl Into<FormPotential>,
        polarity: Polarity,
    ) -> Self {
        self.operation(Operation::affix(
            OperationKind::Circumfix,
            polarity,
            vec![prefix.into(), postfix.into()],
        ))
    }

    #[must_use]
    pub fn interfix(self, form: impl Into<FormPotential>, polarity: Polarity) -> Self {
        self.operation(Operation::affix(OperationKind::Interfix, polarity, vec![form.into()]))
    }

    /// Add `then` or `otherwise` depending on `condition`.
    #[must_use]
    pub fn conditional(self, condition: ComplexCondition, then: Branch, otherwise: Branch) -> Self {
        self.operation(Operation::Conditional {
            condition,
            then,
            otherwise,
        })
    }

    #[must_use]
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }
}

/// A compiled, immutable rule. Thread-safe and designed to live behind `Arc`.
#[derive(Debug, Clone)]
pub struct Rule {
    structure: RuleStructure,
    stages: Vec<Vec<Morpheme>>,
}

impl Rule {
    /// Parse, interpret and compile rule text.
    ///
    /// This is a convenience method combining [`parse`](crate::parse::parse),
    /// [`interpret`](crate::interpret()) and [`Rule::from_structure()`].
    ///
    /// # Errors
    ///
    /// Returns [`MorphoError`](crate::MorphoError) on parse or interpretation failure.
    pub fn from_dsl(input: &str) -> Result<Self, crate::MorphoError> {
        let tree = crate::parse::parse(input)?;
        let structure = crate::interpret::interpret(&tree)?;
        Ok(Self::from_structure(structure)?)
    }

    /// Compile an already normalized structure.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::OperandCount`] for a descriptor with the wrong
    /// number of operands.
    pub fn from_structure(structure: RuleStructure) -> Result<Self, GrammarError> {
        let stages = crate::compile::compile(&structure)?;
        Ok(Self { structure, stages })
    }

    #[must_use]
    pub fn structure(&self) -> &RuleStructure {
        &self.structure
    }

    /// The compiled morphemes, one list per stage.
    #[must_use]
    pub fn stages(&self) -> &[Vec<Morpheme>] {
        &self.stages
    }

    /// # Errors
    ///
    /// Returns [`PositionalError`] if an edit addresses a position the word
    /// does not have.
    pub fn apply(&self, word: &str) -> Result<String, PositionalError> {
        Ok(crate::apply::apply(&self.stages, vec![word.to_owned()])?.concat())
    }

    /// Apply to a compound word given as its stems. Interfixes act on the
    /// boundaries between stems.
    ///
    /// # Errors
    ///
    /// Returns [`PositionalError`] if an edit addresses a position the word
    /// does not have.
    pub fn apply_compound<S: AsRef<str>>(&self, stems: &[S]) -> Result<Vec<String>, PositionalError> {
        crate::apply::apply(&self.stages, owned_stems(stems))
    }

    /// Apply with a record of the word after every stage.
    ///
    /// # Errors
    ///
    /// Same as [`Rule::apply()`].
    pub fn apply_detailed(&self, word: &str) -> Result<Derivation, PositionalError> {
        crate::apply::apply_detailed(&self.stages, vec![word.to_owned()])
    }

    /// Stages in reverse order, every morpheme replaced by its antonym.
    ///
    /// Insertions become removals and the other way round. Conditions are
    /// kept as they are and only their branches are inverted, so the result
    /// undoes a rule without conditionals but not, in general, one with them.
    /// The returned rule keeps the structure it was compiled from.
    #[must_use]
    pub fn antonym(&self) -> Self {
        let stages = self
            .stages
            .iter()
            .rev()
            .map(|stage| stage.iter().rev().map(|m| !m.clone()).collect())
            .collect();
        Self {
            structure: self.structure.clone(),
            stages,
        }
    }
}

fn owned_stems<S: AsRef<str>>(stems: &[S]) -> Vec<String> {
    if stems.is_empty() {
        return vec![String::new()];
    }
    stems.iter().map(|stem| stem.as_ref().to_owned()).collect()
}

impl Not for &Rule {
    type Output = Rule;

    fn not(self) -> Rule {
        self.antonym()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule({} stages, {} operations)",
            self.stages.len(),
            self.stages.iter().map(Vec::len).sum::<usize>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Anchor, BasicCondition};

    #[test]
    fn builder_stages_run_in_order() {
        let rule = RuleBuilder::new()
            .stage(|s| s.prefix("ge", Polarity::Remove))
            .stage(|s| s.postfix("t", Polarity::Remove))
            .build()
            .unwrap();
        assert_eq!(rule.apply("getest").unwrap(), "tes");
        assert_eq!(rule.to_string(), "Rule(2 stages, 2 operations)");
    }

    #[test]
    fn builder_conditional() {
        let rule = RuleBuilder::new()
            .stage(|s| {
                s.conditional(
                    ComplexCondition::new(vec![BasicCondition::new(Anchor::End, "u")]),
                    Branch::Short(Polarity::Remove),
                    Branch::Short(Polarity::Insert),
                )
            })
            .build()
            .unwrap();
        assert_eq!(rule.apply("lupu").unwrap(), "lup");
        assert_eq!(rule.apply("kot").unwrap(), "kotu");
    }

    #[test]
    fn builder_rejects_malformed_operation() {
        let err = RuleBuilder::new()
            .stage(|s| {
                s.operation(Operation::affix(
                    OperationKind::Circumfix,
                    Polarity::Insert,
                    vec!["ge".into()],
                ))
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::OperandCount { .. }));
    }

    #[test]
    fn compound_keeps_stems() {
        let rule = RuleBuilder::new()
            .stage(|s| s.interfix("o", Polarity::Insert))
            .build()
            .unwrap();
        assert_eq!(rule.apply_compound(&["kot", "pies"]).unwrap(), vec!["koto", "pies"]);
        let empty: [&str; 0] = [];
        assert_eq!(rule.apply_compound(&empty).unwrap(), vec![""]);
    }

    #[test]
    fn antonym_undoes_plain_affixes() {
        let rule = RuleBuilder::new()
            .stage(|s| s.circumfix("ge", "t", Polarity::Insert))
            .stage(|s| s.postfix("e", Polarity::Insert))
            .build()
            .unwrap();
        let made = rule.apply("mach").unwrap();
        assert_eq!(made, "gemachte");
        assert_eq!((!&rule).apply(&made).unwrap(), "mach");
    }

    #[test]
    fn antonym_keeps_conditions() {
        let rule = Rule::from_dsl("-u?-u:+u").unwrap();
        assert_eq!(rule.apply("lupu").unwrap(), "lup");

        let antonym = rule.antonym();
        assert_eq!(antonym.apply("lup").unwrap(), "lup");
        assert_eq!(antonym.apply("lupu").unwrap(), "lupuu");
    }

    #[test]
    fn detailed_matches_apply() {
        let rule = RuleBuilder::new()
            .stage(|s| s.prefix("ge", Polarity::Insert))
            .stage(|s| s.postfix("t", Polarity::Insert))
            .build()
            .unwrap();
        let derivation = rule.apply_detailed("mach").unwrap();
        assert_eq!(derivation.output(), rule.apply("mach").unwrap());
        assert_eq!(derivation.steps().len(), 2);
    }
}
