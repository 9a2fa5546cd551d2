use std::ops::{Not, Range};

use super::alphabet::{Alphabet, By, Side};
use super::error::PositionalError;
use super::text;

/// An atomic, positionally addressed edit of a word.
///
/// The edit removes `to_remove` and/or inserts `to_insert` next to the
/// `at`-th unit of the word, where units are counted `by` letters or by one
/// of the alphabet's character classes. A negative `at` counts from the end
/// and is solved on the mirrored word (see [`mirrored`](Self::mirrored)).
///
/// # Example
///
/// ```
/// use morpho::{By, Side, SingleMorpheme};
///
/// let umlaut = SingleMorpheme::replacement("o", "ue", -2).by(By::Vowels).side(Side::At);
/// assert_eq!(umlaut.apply("soler").unwrap(), "sueler");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleMorpheme {
    to_remove: String,
    to_insert: String,
    at: i32,
    by: By,
    side: Option<Side>,
    raises: bool,
    alphabet: Alphabet,
}

impl SingleMorpheme {
    #[must_use]
    pub fn insertion(to_insert: impl Into<String>, at: i32) -> Self {
        Self::replacement(String::new(), to_insert, at)
    }

    #[must_use]
    pub fn removal(to_remove: impl Into<String>, at: i32) -> Self {
        Self::replacement(to_remove, String::new(), at)
    }

    #[must_use]
    pub fn replacement(to_remove: impl Into<String>, to_insert: impl Into<String>, at: i32) -> Self {
        Self {
            to_remove: to_remove.into(),
            to_insert: to_insert.into(),
            at,
            by: By::Letters,
            side: None,
            raises: true,
            alphabet: Alphabet::default(),
        }
    }

    #[must_use]
    pub fn by(mut self, by: By) -> Self {
        self.by = by;
        self
    }

    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// With `raises(false)`, positions that do not exist and removals that do
    /// not match leave the word unchanged instead of failing.
    #[must_use]
    pub fn raises(mut self, raises: bool) -> Self {
        self.raises = raises;
        self
    }

    #[must_use]
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    #[must_use]
    pub fn to_remove(&self) -> &str {
        &self.to_remove
    }

    #[must_use]
    pub fn to_insert(&self) -> &str {
        &self.to_insert
    }

    #[must_use]
    pub fn at(&self) -> i32 {
        self.at
    }

    #[must_use]
    pub fn counted_by(&self) -> By {
        self.by
    }

    /// The explicit side, or the one implied by the sign of `at`.
    #[must_use]
    pub fn effective_side(&self) -> Side {
        self.side.unwrap_or_else(|| Side::implied_by(self.at))
    }

    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The same edit stated for the reversed word: strings reversed, `at`
    /// negated and the side flipped.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            to_remove: text::reverse(&self.to_remove),
            to_insert: text::reverse(&self.to_insert),
            at: self.at.saturating_neg(),
            by: self.by,
            side: Some(-self.effective_side()),
            raises: self.raises,
            alphabet: self.alphabet.clone(),
        }
    }

    // -- Predicates ----------------------------------------------------------

    /// Whether the edit can be carried out: the position exists and, when
    /// something is removed, that text occupies the addressed window.
    #[must_use]
    pub fn is_applicable(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        self.solve(&chars, |m, chars| m.check(chars, &m.to_remove).map(|_| Vec::new()))
            .is_ok()
    }

    /// Whether the text this edit deals with already occupies the addressed
    /// window: `to_remove` when set, otherwise `to_insert`.
    #[must_use]
    pub fn is_present(&self, word: &str) -> bool {
        if self.to_remove.is_empty() && self.to_insert.is_empty() {
            return false;
        }
        let chars: Vec<char> = word.chars().collect();
        self.solve(&chars, |m, chars| {
            let expected = if m.to_remove.is_empty() {
                &m.to_insert
            } else {
                &m.to_remove
            };
            m.check(chars, expected).map(|_| Vec::new())
        })
        .is_ok()
    }

    // -- Edits ---------------------------------------------------------------

    /// Insert `to_insert` at the addressed position.
    ///
    /// # Errors
    ///
    /// [`PositionalError`] when the position does not exist and `raises` is set.
    pub fn insert(&self, word: &str) -> Result<String, PositionalError> {
        self.edit(word, |m, chars| {
            let start = m.window(chars, "")?.start;
            Ok(spliced(chars, start..start, &m.to_insert))
        })
    }

    /// Remove `to_remove` from the addressed window.
    ///
    /// # Errors
    ///
    /// [`PositionalError`] when the position does not exist or the window holds
    /// something else, and `raises` is set.
    pub fn remove(&self, word: &str) -> Result<String, PositionalError> {
        self.edit(word, |m, chars| {
            let window = m.check(chars, &m.to_remove)?;
            Ok(spliced(chars, window, ""))
        })
    }

    /// Swap `to_remove` for `to_insert` inside the addressed window.
    ///
    /// # Errors
    ///
    /// Same as [`remove`](Self::remove).
    pub fn replace(&self, word: &str) -> Result<String, PositionalError> {
        self.edit(word, |m, chars| {
            let window = m.check(chars, &m.to_remove)?;
            Ok(spliced(chars, window, &m.to_insert))
        })
    }

    /// Replace when both strings are set, otherwise insert or remove whichever
    /// is set; an empty morpheme is the identity.
    ///
    /// # Errors
    ///
    /// See [`replace`](Self::replace).
    pub fn apply(&self, word: &str) -> Result<String, PositionalError> {
        match (self.to_remove.is_empty(), self.to_insert.is_empty()) {
            (false, false) => self.replace(word),
            (true, false) => self.insert(word),
            (false, true) => self.remove(word),
            (true, true) => Ok(word.to_owned()),
        }
    }

    // -- Positional machinery ------------------------------------------------

    fn edit<F>(&self, word: &str, op: F) -> Result<String, PositionalError>
    where
        F: Fn(&SingleMorpheme, &[char]) -> Result<Vec<char>, PositionalError>,
    {
        let chars: Vec<char> = word.chars().collect();
        match self.solve(&chars, op) {
            Ok(result) => Ok(result.into_iter().collect()),
            Err(PositionalError::ZeroIndex) => Err(PositionalError::ZeroIndex),
            Err(_) if !self.raises => Ok(word.to_owned()),
            Err(err) => Err(err),
        }
    }

    /// Run `op` directly for positive positions, or on the mirrored problem
    /// for negative ones.
    fn solve<F>(&self, chars: &[char], op: F) -> Result<Vec<char>, PositionalError>
    where
        F: Fn(&SingleMorpheme, &[char]) -> Result<Vec<char>, PositionalError>,
    {
        if self.at >= 0 {
            return op(self, chars);
        }
        let reversed: Vec<char> = chars.iter().rev().copied().collect();
        let mut result = op(&self.mirrored(), &reversed).map_err(|err| err.unmirror(self.at))?;
        result.reverse();
        Ok(result)
    }

    /// The window of `expected`, provided it holds exactly that text.
    fn check(&self, chars: &[char], expected: &str) -> Result<Range<usize>, PositionalError> {
        let window = self.window(chars, expected)?;
        let found: String = chars[window.start.min(chars.len())..window.end.min(chars.len())]
            .iter()
            .collect();
        if found != expected {
            return Err(self.mismatch(expected, found));
        }
        Ok(window)
    }

    /// Character range as long as `expected`, addressed by a non-negative `at`.
    fn window(&self, chars: &[char], expected: &str) -> Result<Range<usize>, PositionalError> {
        if self.at == 0 {
            return Err(PositionalError::ZeroIndex);
        }
        let len = text::char_len(expected);
        let units = self.alphabet.unit_positions(chars, self.by);
        let side = self.effective_side();
        let ordinal = self.at as usize;

        let place = match units.get(ordinal - 1) {
            Some(&place) => place,
            None if ordinal == units.len() + 1 && side == Side::Before => chars.len(),
            None => {
                return Err(PositionalError::OutOfRange {
                    at: self.at,
                    units: units.len(),
                })
            }
        };

        let start = match side {
            Side::At => place,
            Side::After => place + 1,
            Side::Before if self.by == By::Letters => place,
            Side::Before => match place.checked_sub(len) {
                Some(start) => start,
                None => return Err(self.mismatch(expected, chars[..place].iter().collect())),
            },
        };
        Ok(start..start + len)
    }

    fn mismatch(&self, expected: &str, found: String) -> PositionalError {
        PositionalError::Mismatch {
            expected: expected.to_owned(),
            found,
            at: self.at,
        }
    }
}

fn spliced(chars: &[char], window: Range<usize>, form: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + form.len());
    out.extend_from_slice(&chars[..window.start]);
    out.extend(form.chars());
    out.extend_from_slice(&chars[window.end..]);
    out
}

/// The antonym: what this morpheme inserts, the antonym removes and vice versa.
impl Not for SingleMorpheme {
    type Output = SingleMorpheme;

    fn not(mut self) -> SingleMorpheme {
        std::mem::swap(&mut self.to_remove, &mut self.to_insert);
        self
    }
}

impl Not for &SingleMorpheme {
    type Output = SingleMorpheme;

    fn not(self) -> SingleMorpheme {
        !self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_at_start_and_end() {
        let prefix = SingleMorpheme::insertion("ver", 1);
        assert_eq!(prefix.apply("sprechen").unwrap(), "versprechen");
        assert_eq!(prefix.apply("").unwrap(), "ver");

        let postfix = SingleMorpheme::insertion("匠", -1);
        assert_eq!(postfix.apply("修锁").unwrap(), "修锁匠");
        assert_eq!(postfix.apply("").unwrap(), "匠");
    }

    #[test]
    fn insert_past_end_fails_unless_permissive() {
        let morpheme = SingleMorpheme::insertion("r", 2);
        assert_eq!(
            morpheme.apply(""),
            Err(PositionalError::OutOfRange { at: 2, units: 0 })
        );
        assert_eq!(morpheme.clone().raises(false).apply("").unwrap(), "");
    }

    #[test]
    fn zero_position_always_fails() {
        let morpheme = SingleMorpheme::insertion("r", 0).raises(false);
        assert_eq!(morpheme.apply("abc"), Err(PositionalError::ZeroIndex));
    }

    #[test]
    fn removal_mismatch_reports_found_text() {
        let morpheme = SingleMorpheme::removal("e", 1);
        assert_eq!(
            morpheme.apply("ava"),
            Err(PositionalError::Mismatch {
                expected: "e".into(),
                found: "a".into(),
                at: 1,
            })
        );
    }

    #[test]
    fn mismatch_from_end_is_stated_unreversed() {
        let morpheme = SingleMorpheme::removal("ar", -1);
        assert_eq!(
            morpheme.apply("ama"),
            Err(PositionalError::Mismatch {
                expected: "ar".into(),
                found: "ma".into(),
                at: -1,
            })
        );
    }

    #[test]
    fn remove_from_end() {
        let morpheme = SingleMorpheme::removal("en", -1);
        assert_eq!(morpheme.apply("machen").unwrap(), "mach");
    }

    #[test]
    fn replace_by_vowel() {
        let morpheme = SingleMorpheme::replacement("a", "e", 2)
            .by(By::Vowels)
            .side(Side::At);
        assert_eq!(morpheme.apply("dada").unwrap(), "dade");
        assert!(morpheme.apply("koko").is_err());
    }

    #[test]
    fn identity_when_empty() {
        let morpheme = SingleMorpheme::insertion("", 3);
        assert_eq!(morpheme.apply("ab").unwrap(), "ab");
    }

    #[test]
    fn applicability() {
        let removal = SingleMorpheme::removal("ge", 1);
        assert!(removal.is_applicable("gemacht"));
        assert!(!removal.is_applicable("macht"));

        let insertion = SingleMorpheme::insertion("r", 2);
        assert!(insertion.is_applicable("a"));
        assert!(!insertion.is_applicable(""));
    }

    #[test]
    fn presence_after_insert() {
        let morpheme = SingleMorpheme::insertion("y", 2).by(By::Consonants);
        let inserted = morpheme.apply("trocki").unwrap();
        assert_eq!(inserted, "tyrocki");
        assert!(morpheme.is_present(&inserted));
        assert!(!morpheme.is_present("trocki"));
    }

    #[test]
    fn presence_from_end() {
        let morpheme = SingleMorpheme::insertion("t", -1);
        assert!(morpheme.is_present("macht"));
        assert!(!morpheme.is_present("mache"));
    }

    #[test]
    fn antonym_swaps_insert_and_remove() {
        let morpheme = SingleMorpheme::insertion("ge", 1);
        let antonym = !&morpheme;
        assert_eq!(antonym.to_remove(), "ge");
        assert_eq!(antonym.to_insert(), "");
        let word = morpheme.apply("macht").unwrap();
        assert_eq!(antonym.apply(&word).unwrap(), "macht");
    }

    #[test]
    fn mirrored_flips_position_and_side() {
        let morpheme = SingleMorpheme::replacement("ab", "cd", -2).by(By::Vowels);
        let mirrored = morpheme.mirrored();
        assert_eq!(mirrored.at(), 2);
        assert_eq!(mirrored.effective_side(), Side::Before);
        assert_eq!(mirrored.to_remove(), "ba");
        assert_eq!(mirrored.to_insert(), "dc");
        assert_eq!(mirrored.mirrored().effective_side(), Side::After);
    }

    #[test]
    fn custom_alphabet() {
        let alphabet = Alphabet::default().with_class(By::Vowels, "aeiou");
        let morpheme = SingleMorpheme::insertion("h", 1)
            .by(By::Vowels)
            .side(Side::After)
            .with_alphabet(alphabet);
        assert_eq!(morpheme.apply("mun").unwrap(), "muhn");
    }
}
