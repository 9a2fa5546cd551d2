//! The normalized structure a rule is interpreted into, before compilation.

use std::fmt;

use super::affix::Polarity;
use super::form_potential::FormPotential;

/// A whole rule: an optional context and the `;`-separated groups applied in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleStructure {
    /// Reserved for dialect or variant switching. Always `None` for now.
    pub context: Option<String>,
    pub ordered_expressions: Vec<SameOrderGroup>,
}

/// `,`-separated operations that all observe the word as it was when the group started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SameOrderGroup {
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OperationKind {
    Prefix,
    Postfix,
    Circumfix,
    Interfix,
}

impl OperationKind {
    /// How many operands a descriptor of this kind carries.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            OperationKind::Circumfix => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Prefix => write!(f, "prefix"),
            OperationKind::Postfix => write!(f, "postfix"),
            OperationKind::Circumfix => write!(f, "circumfix"),
            OperationKind::Interfix => write!(f, "interfix"),
        }
    }
}

/// One operation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Operation {
    Affix {
        operation: OperationKind,
        /// `None` marks an interfix whose two markers disagree.
        operation_type: Option<Polarity>,
        operands: Vec<FormPotential>,
    },
    Conditional {
        condition: ComplexCondition,
        then: Branch,
        otherwise: Branch,
    },
}

impl Operation {
    #[must_use]
    pub fn affix(operation: OperationKind, polarity: Polarity, operands: Vec<FormPotential>) -> Self {
        Operation::Affix {
            operation,
            operation_type: Some(polarity),
            operands,
        }
    }
}

/// One side of a conditional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Branch {
    /// No branch was written: the word is left alone.
    #[default]
    Identity,
    Operations(Vec<Operation>),
    /// A bare polarity, applied to the letters of the deciding condition.
    Short(Polarity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Anchor {
    Start,
    End,
}

impl Anchor {
    /// The edge position this anchor addresses.
    #[must_use]
    pub fn at(self) -> i32 {
        match self {
            Anchor::Start => 1,
            Anchor::End => -1,
        }
    }
}

/// `X-` (the word starts with `X`) or `-X` (it ends with `X`), optionally negated with `~`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicCondition {
    pub negated: bool,
    pub anchor: Anchor,
    pub form: FormPotential,
}

impl BasicCondition {
    #[must_use]
    pub fn new(anchor: Anchor, form: impl Into<FormPotential>) -> Self {
        Self {
            negated: false,
            anchor,
            form: form.into(),
        }
    }

    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    #[must_use]
    pub fn holds(&self, word: &str) -> bool {
        let found = matches!(self.form.is_at(word, self.anchor.at()), Ok(true));
        found != self.negated
    }
}

/// Basic conditions joined by `|`: true when any of them holds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ComplexCondition {
    pub alternatives: Vec<BasicCondition>,
}

impl ComplexCondition {
    #[must_use]
    pub fn new(alternatives: Vec<BasicCondition>) -> Self {
        Self { alternatives }
    }

    #[must_use]
    pub fn holds(&self, word: &str) -> bool {
        self.first_match(word).is_some()
    }

    /// The first alternative that holds for `word`.
    #[must_use]
    pub fn first_match(&self, word: &str) -> Option<&BasicCondition> {
        self.alternatives.iter().find(|condition| condition.holds(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_conditions() {
        let starts = BasicCondition::new(Anchor::Start, "ge");
        let ends = BasicCondition::new(Anchor::End, "u");
        assert!(starts.holds("gemacht"));
        assert!(!starts.holds("macht"));
        assert!(ends.holds("lupu"));
        assert!(!ends.holds("kot"));
    }

    #[test]
    fn negated_condition() {
        let condition = BasicCondition::new(Anchor::Start, "e").negate();
        assert!(condition.holds("test"));
        assert!(!condition.holds("est"));
    }

    #[test]
    fn empty_word_never_matches() {
        assert!(!BasicCondition::new(Anchor::End, "a").holds(""));
        assert!(BasicCondition::new(Anchor::End, "a").negate().holds(""));
    }

    #[test]
    fn complex_condition_first_match() {
        let condition = ComplexCondition::new(vec![
            BasicCondition::new(Anchor::End, "a"),
            BasicCondition::new(Anchor::End, "o"),
        ]);
        assert!(condition.holds("kino"));
        assert_eq!(condition.first_match("kino").map(|c| c.form.to_string()), Some("o".into()));
        assert!(condition.first_match("kit").is_none());
    }

    #[test]
    fn arity_by_kind() {
        assert_eq!(OperationKind::Circumfix.arity(), 2);
        assert_eq!(OperationKind::Interfix.arity(), 1);
        assert_eq!(OperationKind::Postfix.to_string(), "postfix");
    }
}
