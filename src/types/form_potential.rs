use std::fmt;
use std::ops::{Add, BitOr, Mul, Not};

use super::error::PositionalError;
use super::text;

/// A set of alternative literal realizations of one morphological unit.
///
/// Ambiguity is never collapsed by the value itself: every operator returns a
/// new potential and the alternatives are only narrowed when a positional
/// operation ([`insert_at`](Self::insert_at), [`remove_at`](Self::remove_at))
/// has to pick the realization that fits the word best.
///
/// Positions are 1-based and signed: positive values count characters from the
/// start of the word, negative values from the end. `0` is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct FormPotential {
    basic_forms: Vec<BasicForm>,
}

/// One entry of a [`FormPotential`]: a literal or a nested potential.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum BasicForm {
    Literal(String),
    Nested(FormPotential),
}

/// Depth-first iterator over the literal alternatives of a [`FormPotential`].
#[derive(Debug, Clone)]
pub struct Forms<'a> {
    stack: Vec<std::slice::Iter<'a, BasicForm>>,
}

impl<'a> Iterator for Forms<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(top) = self.stack.last_mut() {
            let next = top.next();
            match next {
                Some(BasicForm::Literal(form)) => return Some(form),
                Some(BasicForm::Nested(inner)) => self.stack.push(inner.basic_forms.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

impl FormPotential {
    /// An empty potential with no alternatives at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn literal(form: impl Into<String>) -> Self {
        Self {
            basic_forms: vec![BasicForm::Literal(form.into())],
        }
    }

    /// Build a potential from literals and/or nested potentials, keeping their order.
    pub fn alternatives<I, T>(forms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<BasicForm>,
    {
        forms.into_iter().collect()
    }

    #[must_use]
    pub fn basic_forms(&self) -> &[BasicForm] {
        &self.basic_forms
    }

    /// All literal alternatives, nested potentials flattened depth-first.
    #[must_use]
    pub fn forms(&self) -> Forms<'_> {
        Forms {
            stack: vec![self.basic_forms.iter()],
        }
    }

    /// The longest alternative; the first one wins among equally long forms.
    #[must_use]
    pub fn max_form(&self) -> Option<&str> {
        self.forms().fold(None, |best, form| match best {
            Some(b) if text::char_len(b) >= text::char_len(form) => Some(b),
            _ => Some(form),
        })
    }

    /// Every alternative with its characters reversed.
    #[must_use]
    pub fn reversed(&self) -> FormPotential {
        self.forms().map(text::reverse).collect()
    }

    /// Splice the best-fitting alternative into `word` before the `at`-th character.
    ///
    /// Each alternative is tried; the candidate word is scored by how much the
    /// form actually detected at `at` grows beyond the inserted alternative, then
    /// by the alternative's own length. The highest score wins, the first
    /// alternative on ties. With `i(ch)^` this inserts `i` in front of `chen` but
    /// `ich` in front of `ten`.
    ///
    /// # Errors
    ///
    /// [`PositionalError::ZeroIndex`] for `at == 0`, [`PositionalError::OutOfRange`]
    /// when the gap does not exist in `word`.
    pub fn insert_at(&self, word: &str, at: i32) -> Result<String, PositionalError> {
        if at < 0 {
            return self.inverse_problem(word, at, FormPotential::insert_at);
        }
        let offset = Self::gap_offset(word, at)?;

        let mut best: Option<((isize, usize), String)> = None;
        for form in self.forms() {
            let candidate = text::splice(word, offset, form);
            let true_form = self.get_form_at(&candidate, at)?;
            let form_len = text::char_len(form);
            let gained = text::char_len(&true_form) as isize - form_len as isize;
            let score = (gained, form_len);
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, candidate));
            }
        }
        Ok(best.map_or_else(|| word.to_owned(), |(_, candidate)| candidate))
    }

    /// Remove the alternative found at `at`, if any. An absent form leaves the word as is.
    ///
    /// # Errors
    ///
    /// [`PositionalError::ZeroIndex`] for `at == 0`.
    pub fn remove_at(&self, word: &str, at: i32) -> Result<String, PositionalError> {
        if at < 0 {
            return self.inverse_problem(word, at, FormPotential::remove_at);
        }
        let found = self.get_form_at(word, at)?;
        let offset = text::byte_offset(word, (at - 1) as usize);
        match offset {
            Some(offset) if !found.is_empty() => {
                let mut out = String::with_capacity(word.len() - found.len());
                out.push_str(&word[..offset]);
                out.push_str(&word[offset + found.len()..]);
                Ok(out)
            }
            _ => Ok(word.to_owned()),
        }
    }

    /// Whether a non-empty alternative occupies the position `at`.
    ///
    /// # Errors
    ///
    /// [`PositionalError::ZeroIndex`] for `at == 0`.
    pub fn is_at(&self, word: &str, at: i32) -> Result<bool, PositionalError> {
        Ok(!self.get_form_at(word, at)?.is_empty())
    }

    /// The longest alternative that starts exactly at `at`, or `""` if none does.
    ///
    /// # Errors
    ///
    /// [`PositionalError::ZeroIndex`] for `at == 0`.
    pub fn get_form_at(&self, word: &str, at: i32) -> Result<String, PositionalError> {
        if at == 0 {
            return Err(PositionalError::ZeroIndex);
        }
        if at < 0 {
            return self.inverse_problem(word, at, FormPotential::get_form_at);
        }
        let Some(offset) = text::byte_offset(word, (at - 1) as usize) else {
            return Ok(String::new());
        };
        let tail = &word[offset..];
        let found = self
            .forms()
            .filter(|form| tail.starts_with(form))
            .fold(None, |best: Option<&str>, form| match best {
                Some(b) if text::char_len(b) >= text::char_len(form) => Some(b),
                _ => Some(form),
            });
        Ok(found.unwrap_or_default().to_owned())
    }

    fn gap_offset(word: &str, at: i32) -> Result<usize, PositionalError> {
        if at == 0 {
            return Err(PositionalError::ZeroIndex);
        }
        text::byte_offset(word, (at - 1) as usize).ok_or(PositionalError::OutOfRange {
            at,
            units: text::char_len(word),
        })
    }

    /// Solve a right-to-left problem as a left-to-right one on reversed input.
    fn inverse_problem<F>(&self, word: &str, at: i32, problem: F) -> Result<String, PositionalError>
    where
        F: Fn(&FormPotential, &str, i32) -> Result<String, PositionalError>,
    {
        let result = problem(&self.reversed(), &text::reverse(word), at.saturating_neg())
            .map_err(|err| err.unmirror(at))?;
        Ok(text::reverse(&result))
    }
}

impl From<&str> for BasicForm {
    fn from(form: &str) -> Self {
        BasicForm::Literal(form.to_owned())
    }
}

impl From<String> for BasicForm {
    fn from(form: String) -> Self {
        BasicForm::Literal(form)
    }
}

impl From<FormPotential> for BasicForm {
    fn from(potential: FormPotential) -> Self {
        BasicForm::Nested(potential)
    }
}

impl From<&str> for FormPotential {
    fn from(form: &str) -> Self {
        FormPotential::literal(form)
    }
}

impl From<String> for FormPotential {
    fn from(form: String) -> Self {
        FormPotential::literal(form)
    }
}

impl<T: Into<BasicForm>> FromIterator<T> for FormPotential {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            basic_forms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Not for FormPotential {
    type Output = FormPotential;

    fn not(self) -> FormPotential {
        self.reversed()
    }
}

impl Not for &FormPotential {
    type Output = FormPotential;

    fn not(self) -> FormPotential {
        self.reversed()
    }
}

/// Union: both sets of alternatives are kept side by side.
impl<T: Into<BasicForm>> BitOr<T> for FormPotential {
    type Output = FormPotential;

    fn bitor(self, other: T) -> FormPotential {
        FormPotential {
            basic_forms: vec![BasicForm::Nested(self), other.into()],
        }
    }
}

/// Pairwise concatenation: alternatives are zipped index by index, the shorter side truncates.
impl<T: Into<FormPotential>> Add<T> for FormPotential {
    type Output = FormPotential;

    fn add(self, other: T) -> FormPotential {
        let other = other.into();
        self.forms()
            .zip(other.forms())
            .map(|(a, b)| format!("{a}{b}"))
            .collect()
    }
}

/// Cross-product concatenation: every alternative of `self` followed by every alternative of `other`.
impl<T: Into<FormPotential>> Mul<T> for FormPotential {
    type Output = FormPotential;

    fn mul(self, other: T) -> FormPotential {
        let other = other.into();
        self.forms()
            .flat_map(|a| other.forms().map(move |b| format!("{a}{b}")))
            .collect()
    }
}

impl fmt::Display for FormPotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, form) in self.forms().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{form}")?;
        }
        Ok(())
    }
}
