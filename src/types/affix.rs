use std::fmt;
use std::ops::Not;

use super::error::PositionalError;
use super::form_potential::FormPotential;

/// What a segment does with its letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    #[cfg_attr(feature = "serde", serde(rename = "+"))]
    Insert,
    #[cfg_attr(feature = "serde", serde(rename = "-"))]
    Remove,
    /// Insert if absent, remove if present.
    #[cfg_attr(feature = "serde", serde(rename = "."))]
    Toggle,
}

impl Polarity {
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Polarity> {
        match symbol {
            '+' => Some(Polarity::Insert),
            '-' => Some(Polarity::Remove),
            '.' => Some(Polarity::Toggle),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Polarity::Insert => '+',
            Polarity::Remove => '-',
            Polarity::Toggle => '.',
        }
    }
}

impl Not for Polarity {
    type Output = Polarity;

    fn not(self) -> Polarity {
        match self {
            Polarity::Insert => Polarity::Remove,
            Polarity::Remove => Polarity::Insert,
            Polarity::Toggle => Polarity::Toggle,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A form inserted into or removed from one edge of a word.
///
/// `at = 1` is the start of the word (a prefix), `at = -1` the end (a postfix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affix {
    form: FormPotential,
    polarity: Polarity,
    at: i32,
}

impl Affix {
    #[must_use]
    pub fn new(form: impl Into<FormPotential>, polarity: Polarity, at: i32) -> Self {
        Self {
            form: form.into(),
            polarity,
            at,
        }
    }

    #[must_use]
    pub fn prefix(form: impl Into<FormPotential>, polarity: Polarity) -> Self {
        Self::new(form, polarity, 1)
    }

    #[must_use]
    pub fn postfix(form: impl Into<FormPotential>, polarity: Polarity) -> Self {
        Self::new(form, polarity, -1)
    }

    #[must_use]
    pub fn form(&self) -> &FormPotential {
        &self.form
    }

    #[must_use]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    #[must_use]
    pub fn at(&self) -> i32 {
        self.at
    }

    /// Whether one of the alternatives already sits at the affix position.
    ///
    /// # Errors
    ///
    /// [`PositionalError::ZeroIndex`] for an affix built with `at == 0`.
    pub fn is_present(&self, word: &str) -> Result<bool, PositionalError> {
        self.form.is_at(word, self.at)
    }

    /// # Errors
    ///
    /// Propagates the [`PositionalError`] of the underlying insertion or removal.
    pub fn apply(&self, word: &str) -> Result<String, PositionalError> {
        self.apply_observing(word, word)
    }

    /// Edit `word`, removing or toggling only if the affix is present in
    /// `observed`.
    ///
    /// # Errors
    ///
    /// Propagates the [`PositionalError`] of the underlying insertion or removal.
    pub fn apply_observing(&self, word: &str, observed: &str) -> Result<String, PositionalError> {
        match self.polarity {
            Polarity::Insert => self.form.insert_at(word, self.at),
            Polarity::Remove if self.is_present(observed)? => self.form.remove_at(word, self.at),
            Polarity::Remove => Ok(word.to_owned()),
            Polarity::Toggle if self.is_present(observed)? => self.form.remove_at(word, self.at),
            Polarity::Toggle => self.form.insert_at(word, self.at),
        }
    }
}

impl Not for Affix {
    type Output = Affix;

    fn not(self) -> Affix {
        Affix {
            polarity: !self.polarity,
            ..self
        }
    }
}

/// A linking element between the stems of a compound.
///
/// The interfix sits at the end of every stem but the last, so a word made of
/// a single stem is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interfix {
    form: FormPotential,
    polarity: Polarity,
}

impl Interfix {
    #[must_use]
    pub fn new(form: impl Into<FormPotential>, polarity: Polarity) -> Self {
        Self {
            form: form.into(),
            polarity,
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormPotential {
        &self.form
    }

    #[must_use]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// # Errors
    ///
    /// Propagates the [`PositionalError`] raised at any boundary.
    pub fn apply(&self, stems: &[String]) -> Result<Vec<String>, PositionalError> {
        self.apply_observing(stems, stems)
    }

    /// Like [`Interfix::apply`], judging each boundary on the matching stem
    /// of `observed`.
    ///
    /// # Errors
    ///
    /// Propagates the [`PositionalError`] raised at any boundary.
    pub fn apply_observing(
        &self,
        stems: &[String],
        observed: &[String],
    ) -> Result<Vec<String>, PositionalError> {
        let edge = Affix::new(self.form.clone(), self.polarity, -1);
        let last = stems.len().saturating_sub(1);
        stems
            .iter()
            .enumerate()
            .map(|(i, stem)| {
                if i < last {
                    edge.apply_observing(stem, observed.get(i).unwrap_or(stem))
                } else {
                    Ok(stem.clone())
                }
            })
            .collect()
    }
}

impl Not for Interfix {
    type Output = Interfix;

    fn not(self) -> Interfix {
        Interfix {
            polarity: !self.polarity,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stems(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    #[test]
    fn polarity_symbols() {
        for polarity in [Polarity::Insert, Polarity::Remove, Polarity::Toggle] {
            assert_eq!(Polarity::from_symbol(polarity.symbol()), Some(polarity));
        }
        assert_eq!(Polarity::from_symbol('^'), None);
        assert_eq!(Polarity::Toggle.to_string(), ".");
    }

    #[test]
    fn prefix_insert_and_remove() {
        assert_eq!(Affix::prefix("ge", Polarity::Insert).apply("macht").unwrap(), "gemacht");
        assert_eq!(Affix::prefix("ge", Polarity::Remove).apply("gemacht").unwrap(), "macht");
    }

    #[test]
    fn remove_absent_affix_is_identity() {
        assert_eq!(Affix::postfix("en", Polarity::Remove).apply("kot").unwrap(), "kot");
    }

    #[test]
    fn toggle_inserts_or_removes() {
        let toggle = Affix::postfix("a", Polarity::Toggle);
        assert_eq!(toggle.apply("kot").unwrap(), "kota");
        assert_eq!(toggle.apply("kota").unwrap(), "kot");
    }

    #[test]
    fn presence_is_judged_on_the_observed_word() {
        let remove = Affix::postfix("t", Polarity::Remove);
        assert_eq!(remove.apply_observing("kot", "kots").unwrap(), "kot");
        assert_eq!(remove.apply_observing("kot", "kot").unwrap(), "ko");

        let toggle = Affix::postfix("a", Polarity::Toggle);
        assert_eq!(toggle.apply_observing("kot", "kot").unwrap(), "kota");
        assert_eq!(toggle.apply_observing("kota", "kota").unwrap(), "kot");
        assert_eq!(toggle.apply_observing("kota", "lat").unwrap(), "kotaa");
    }

    #[test]
    fn antonym_flips_polarity() {
        let affix = !Affix::prefix("un", Polarity::Insert);
        assert_eq!(affix.polarity(), Polarity::Remove);
        assert_eq!(affix.apply("undo").unwrap(), "do");
        assert_eq!((!Affix::prefix("un", Polarity::Toggle)).polarity(), Polarity::Toggle);
    }

    #[test]
    fn interfix_links_every_boundary() {
        let interfix = Interfix::new("o", Polarity::Insert);
        assert_eq!(
            interfix.apply(&stems(&["kot", "pies"])).unwrap(),
            stems(&["koto", "pies"])
        );
        assert_eq!(
            interfix.apply(&stems(&["a", "b", "c"])).unwrap(),
            stems(&["ao", "bo", "c"])
        );
    }

    #[test]
    fn interfix_leaves_single_stem() {
        let interfix = Interfix::new("o", Polarity::Insert);
        assert_eq!(interfix.apply(&stems(&["kot"])).unwrap(), stems(&["kot"]));
        assert!(interfix.apply(&[]).unwrap().is_empty());
    }

    #[test]
    fn interfix_removal() {
        let interfix = !Interfix::new("o", Polarity::Insert);
        assert_eq!(
            interfix.apply(&stems(&["koto", "pies"])).unwrap(),
            stems(&["kot", "pies"])
        );
    }
}
