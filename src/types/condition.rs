use regex::Regex;

use super::error::ConditionError;
use super::store::Candidate;

/// The guard of a [`Cond`].
#[derive(Debug, Clone, Default)]
pub enum When {
    /// Matches everything; the catch-all of a [`MultiCond`].
    #[default]
    Always,
    /// Searched anywhere in the candidate's form.
    Pattern(Regex),
    Feature(String),
    /// Every guard must match.
    All(Vec<When>),
}

impl When {
    /// # Errors
    ///
    /// [`ConditionError::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn pattern(pattern: &str) -> Result<Self, ConditionError> {
        Ok(When::Pattern(Regex::new(pattern)?))
    }

    #[must_use]
    pub fn feature(name: impl Into<String>) -> Self {
        When::Feature(name.into())
    }

    pub fn matches<C: Candidate + ?Sized>(&self, candidate: &C) -> bool {
        match self {
            When::Always => true,
            When::Pattern(regex) => regex.is_match(&candidate.form()),
            When::Feature(name) => candidate.has_feature(name),
            When::All(guards) => guards.iter().all(|guard| guard.matches(candidate)),
        }
    }
}

/// What a matching [`Cond`] yields.
#[derive(Debug, Clone)]
pub enum Then {
    Literal(String),
    Nested(Box<Condition>),
}

impl Then {
    fn evaluate<C: Candidate + ?Sized>(&self, candidate: &C) -> Result<String, ConditionError> {
        match self {
            Then::Literal(value) => Ok(value.clone()),
            Then::Nested(condition) => condition.evaluate(candidate),
        }
    }
}

impl From<&str> for Then {
    fn from(value: &str) -> Self {
        Then::Literal(value.to_owned())
    }
}

impl From<String> for Then {
    fn from(value: String) -> Self {
        Then::Literal(value)
    }
}

impl From<Condition> for Then {
    fn from(condition: Condition) -> Self {
        Then::Nested(Box::new(condition))
    }
}

/// `when => then`.
#[derive(Debug, Clone)]
pub struct Cond {
    pub when: When,
    pub then: Then,
}

impl Cond {
    #[must_use]
    pub fn new(when: When, then: impl Into<Then>) -> Self {
        Self {
            when,
            then: then.into(),
        }
    }

    /// A branch that always applies.
    #[must_use]
    pub fn otherwise(then: impl Into<Then>) -> Self {
        Self::new(When::Always, then)
    }

    /// # Errors
    ///
    /// [`ConditionError::NoConditionApplies`] if the guard does not match, or
    /// whatever a nested condition reports.
    pub fn evaluate<C: Candidate + ?Sized>(&self, candidate: &C) -> Result<String, ConditionError> {
        if self.when.matches(candidate) {
            self.then.evaluate(candidate)
        } else {
            Err(ConditionError::NoConditionApplies)
        }
    }
}

/// Alternatives tried in order; the first one that applies wins.
#[derive(Debug, Clone, Default)]
pub struct MultiCond {
    pub conds: Vec<Cond>,
}

impl MultiCond {
    #[must_use]
    pub fn new(conds: Vec<Cond>) -> Self {
        Self { conds }
    }

    /// # Errors
    ///
    /// [`ConditionError::NoConditionApplies`] when no alternative applies.
    /// Other errors stop the search and are returned as is.
    pub fn evaluate<C: Candidate + ?Sized>(&self, candidate: &C) -> Result<String, ConditionError> {
        for cond in &self.conds {
            match cond.evaluate(candidate) {
                Err(ConditionError::NoConditionApplies) => continue,
                result => return result,
            }
        }
        Err(ConditionError::NoConditionApplies)
    }
}

#[derive(Debug, Clone)]
pub enum Condition {
    Single(Cond),
    Multi(MultiCond),
}

impl Condition {
    /// # Errors
    ///
    /// [`ConditionError::NoConditionApplies`] when nothing matches `candidate`.
    pub fn evaluate<C: Candidate + ?Sized>(&self, candidate: &C) -> Result<String, ConditionError> {
        match self {
            Condition::Single(cond) => cond.evaluate(candidate),
            Condition::Multi(multi) => multi.evaluate(candidate),
        }
    }
}

impl From<Cond> for Condition {
    fn from(cond: Cond) -> Self {
        Condition::Single(cond)
    }
}

impl From<MultiCond> for Condition {
    fn from(multi: MultiCond) -> Self {
        Condition::Multi(multi)
    }
}

// -- Declarative form -------------------------------------------------------

/// A condition as written in a configuration document: one `{when, then}`
/// entry or a list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum ConditionSpec {
    Single(CondSpec),
    Multi(Vec<CondSpec>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CondSpec {
    /// A regular expression searched in the candidate's form.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub when: Option<String>,
    /// A feature the candidate must carry.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub feature: Option<String>,
    pub then: ThenSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum ThenSpec {
    Literal(String),
    Nested(Box<ConditionSpec>),
}

impl TryFrom<ConditionSpec> for Condition {
    type Error = ConditionError;

    fn try_from(spec: ConditionSpec) -> Result<Self, ConditionError> {
        match spec {
            ConditionSpec::Single(cond) => Ok(Condition::Single(cond.try_into()?)),
            ConditionSpec::Multi(conds) => {
                let conds = conds
                    .into_iter()
                    .map(Cond::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Condition::Multi(MultiCond::new(conds)))
            }
        }
    }
}

impl TryFrom<CondSpec> for Cond {
    type Error = ConditionError;

    fn try_from(spec: CondSpec) -> Result<Self, ConditionError> {
        let mut guards = Vec::new();
        if let Some(pattern) = spec.when {
            guards.push(When::pattern(&pattern)?);
        }
        if let Some(feature) = spec.feature {
            guards.push(When::Feature(feature));
        }
        let when = match guards.len() {
            0 => When::Always,
            1 => guards.remove(0),
            _ => When::All(guards),
        };
        let then = match spec.then {
            ThenSpec::Literal(value) => Then::Literal(value),
            ThenSpec::Nested(nested) => Then::Nested(Box::new(Condition::try_from(*nested)?)),
        };
        Ok(Cond { when, then })
    }
}
