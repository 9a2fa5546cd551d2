use std::fmt;
use std::ops::Neg;

/// The unit a position is counted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum By {
    #[default]
    Letters,
    Consonants,
    Vowels,
    Semivowels,
}

/// Where an operation lands relative to the addressed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Side {
    Before,
    At,
    After,
}

impl Side {
    /// The side implied by the sign of a position: `Before` counting from the
    /// start, `After` counting from the end. A prefix is therefore `at = 1` and
    /// a postfix `at = -1` without naming a side.
    #[must_use]
    pub fn implied_by(at: i32) -> Side {
        if at > 0 {
            Side::Before
        } else {
            Side::After
        }
    }
}

impl Neg for Side {
    type Output = Side;

    fn neg(self) -> Side {
        match self {
            Side::Before => Side::After,
            Side::At => Side::At,
            Side::After => Side::Before,
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            By::Letters => write!(f, "letters"),
            By::Consonants => write!(f, "consonants"),
            By::Vowels => write!(f, "vowels"),
            By::Semivowels => write!(f, "semivowels"),
        }
    }
}

/// A language's partition of its letters into countable classes.
///
/// Classes may overlap (`j` is both a consonant and a semivowel in the default
/// alphabet). Counting [`By::Letters`] always addresses every character of the
/// word, whatever its script; only rule text is limited to `a`-`z`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alphabet {
    consonants: String,
    vowels: String,
    semivowels: String,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new("bcdfghjklmnpqrstvwxz", "aeioy", "wj")
    }
}

impl Alphabet {
    #[must_use]
    pub fn new(
        consonants: impl Into<String>,
        vowels: impl Into<String>,
        semivowels: impl Into<String>,
    ) -> Self {
        Self {
            consonants: consonants.into(),
            vowels: vowels.into(),
            semivowels: semivowels.into(),
        }
    }

    /// Replace the members of one class. Letters cannot be restricted, so
    /// `By::Letters` leaves the alphabet unchanged.
    #[must_use]
    pub fn with_class(mut self, by: By, members: &str) -> Self {
        match by {
            By::Letters => {}
            By::Consonants => self.consonants = members.to_owned(),
            By::Vowels => self.vowels = members.to_owned(),
            By::Semivowels => self.semivowels = members.to_owned(),
        }
        self
    }

    /// Members of a class, `None` for letters.
    #[must_use]
    pub fn members(&self, by: By) -> Option<&str> {
        match by {
            By::Letters => None,
            By::Consonants => Some(&self.consonants),
            By::Vowels => Some(&self.vowels),
            By::Semivowels => Some(&self.semivowels),
        }
    }

    #[must_use]
    pub fn is_unit(&self, by: By, c: char) -> bool {
        self.members(by).map_or(true, |members| members.contains(c))
    }

    /// Character indices of the units of `word` counted by `by`.
    #[must_use]
    pub fn unit_positions(&self, word: &[char], by: By) -> Vec<usize> {
        word.iter()
            .enumerate()
            .filter(|(_, c)| self.is_unit(by, **c))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn side_implied_by_sign() {
        assert_eq!(Side::implied_by(1), Side::Before);
        assert_eq!(Side::implied_by(-1), Side::After);
    }

    #[test]
    fn side_negation() {
        assert_eq!(-Side::Before, Side::After);
        assert_eq!(-Side::After, Side::Before);
        assert_eq!(-Side::At, Side::At);
    }

    #[test]
    fn default_alphabet_classes() {
        let alphabet = Alphabet::default();
        assert!(alphabet.is_unit(By::Vowels, 'y'));
        assert!(alphabet.is_unit(By::Consonants, 'j'));
        assert!(alphabet.is_unit(By::Semivowels, 'j'));
        assert!(!alphabet.is_unit(By::Vowels, 'u'));
        assert!(alphabet.is_unit(By::Letters, '匠'));
    }

    #[test]
    fn unit_positions_by_class() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.unit_positions(&chars("trocki"), By::Consonants), vec![0, 1, 3, 4]);
        assert_eq!(alphabet.unit_positions(&chars("mama"), By::Vowels), vec![1, 3]);
        assert_eq!(alphabet.unit_positions(&chars("ab"), By::Letters), vec![0, 1]);
    }

    #[test]
    fn with_class_replaces_members() {
        let alphabet = Alphabet::default().with_class(By::Vowels, "aeiou");
        assert!(alphabet.is_unit(By::Vowels, 'u'));
        assert!(!alphabet.is_unit(By::Vowels, 'y'));
        assert_eq!(alphabet.members(By::Letters), None);
    }

    #[test]
    fn by_display() {
        assert_eq!(By::Semivowels.to_string(), "semivowels");
    }
}
