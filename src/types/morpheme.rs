use std::ops::Not;

use super::affix::{Affix, Interfix};
use super::error::PositionalError;
use super::operation::ComplexCondition;
use super::single::SingleMorpheme;

/// Any compiled morphological operation.
///
/// Words are handled as a list of stems so that interfixes have boundaries to
/// act on. Edits counted from the start touch the first stem, edits counted
/// from the end touch the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Morpheme {
    Identity,
    Single(SingleMorpheme),
    Affix(Affix),
    Interfix(Interfix),
    /// Children applied in order, each editing the output of the previous one.
    /// Presence is still judged on the word the composite was given.
    Composite(Vec<Morpheme>),
    /// Exactly one branch runs, chosen by the condition.
    Conditional {
        condition: ComplexCondition,
        positive: Box<Morpheme>,
        negative: Box<Morpheme>,
    },
    /// The first arm whose condition holds runs; if none does, nothing happens.
    Choice(Vec<(ComplexCondition, Morpheme)>),
}

impl Morpheme {
    #[must_use]
    pub fn conditional(condition: ComplexCondition, positive: Morpheme, negative: Morpheme) -> Self {
        Morpheme::Conditional {
            condition,
            positive: Box::new(positive),
            negative: Box::new(negative),
        }
    }

    /// A composite, collapsing the trivial cases.
    #[must_use]
    pub fn sequence(mut morphemes: Vec<Morpheme>) -> Self {
        match morphemes.len() {
            0 => Morpheme::Identity,
            1 => morphemes.remove(0),
            _ => Morpheme::Composite(morphemes),
        }
    }

    /// # Errors
    ///
    /// [`PositionalError`] from any edit that cannot be carried out.
    pub fn apply(&self, word: &str) -> Result<String, PositionalError> {
        Ok(self.apply_stems(&[word.to_owned()])?.concat())
    }

    /// Apply to a compound given as stems. Conditions look at the joined word.
    ///
    /// # Errors
    ///
    /// [`PositionalError`] from any edit that cannot be carried out.
    pub fn apply_stems(&self, stems: &[String]) -> Result<Vec<String>, PositionalError> {
        self.apply_observing(stems, stems)
    }

    /// Apply to `stems`, deciding conditions and whether an affix is present
    /// on `observed`, a snapshot with the same stem boundaries. The edits
    /// themselves are made on the current stems.
    pub(crate) fn apply_observing(
        &self,
        stems: &[String],
        observed: &[String],
    ) -> Result<Vec<String>, PositionalError> {
        match self {
            Morpheme::Identity => Ok(stems.to_vec()),
            Morpheme::Single(single) => {
                on_edge_stem(stems, observed, single.at(), |word, _| single.apply(word))
            }
            Morpheme::Affix(affix) => on_edge_stem(stems, observed, affix.at(), |word, seen| {
                affix.apply_observing(word, seen)
            }),
            Morpheme::Interfix(interfix) => interfix.apply_observing(stems, observed),
            Morpheme::Composite(children) => children
                .iter()
                .try_fold(stems.to_vec(), |current, child| {
                    child.apply_observing(&current, observed)
                }),
            Morpheme::Conditional {
                condition,
                positive,
                negative,
            } => {
                if condition.holds(&observed.concat()) {
                    positive.apply_observing(stems, observed)
                } else {
                    negative.apply_observing(stems, observed)
                }
            }
            Morpheme::Choice(arms) => {
                let word = observed.concat();
                match arms.iter().find(|(condition, _)| condition.holds(&word)) {
                    Some((_, morpheme)) => morpheme.apply_observing(stems, observed),
                    None => Ok(stems.to_vec()),
                }
            }
        }
    }
}

/// Run `edit` on the first stem for positive positions and the last one otherwise.
/// `edit` also gets the matching stem of the snapshot.
fn on_edge_stem<F>(
    stems: &[String],
    observed: &[String],
    at: i32,
    edit: F,
) -> Result<Vec<String>, PositionalError>
where
    F: Fn(&str, &str) -> Result<String, PositionalError>,
{
    let mut stems = if stems.is_empty() {
        vec![String::new()]
    } else {
        stems.to_vec()
    };
    let index = if at > 0 { 0 } else { stems.len() - 1 };
    let seen = observed.get(index).unwrap_or(&stems[index]);
    let edited = edit(&stems[index], seen)?;
    stems[index] = edited;
    Ok(stems)
}

/// The antonym. Composites are undone in reverse order; conditions stay as
/// they are and only the branches flip.
impl Not for Morpheme {
    type Output = Morpheme;

    fn not(self) -> Morpheme {
        match self {
            Morpheme::Identity => Morpheme::Identity,
            Morpheme::Single(single) => Morpheme::Single(!single),
            Morpheme::Affix(affix) => Morpheme::Affix(!affix),
            Morpheme::Interfix(interfix) => Morpheme::Interfix(!interfix),
            Morpheme::Composite(children) => {
                Morpheme::Composite(children.into_iter().rev().map(|child| !child).collect())
            }
            Morpheme::Conditional {
                condition,
                positive,
                negative,
            } => Morpheme::conditional(condition, !*positive, !*negative),
            Morpheme::Choice(arms) => Morpheme::Choice(
                arms.into_iter()
                    .map(|(condition, morpheme)| (condition, !morpheme))
                    .collect(),
            ),
        }
    }
}

impl From<SingleMorpheme> for Morpheme {
    fn from(single: SingleMorpheme) -> Self {
        Morpheme::Single(single)
    }
}

impl From<Affix> for Morpheme {
    fn from(affix: Affix) -> Self {
        Morpheme::Affix(affix)
    }
}

impl From<Interfix> for Morpheme {
    fn from(interfix: Interfix) -> Self {
        Morpheme::Interfix(interfix)
    }
}
