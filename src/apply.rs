use std::time::Instant;

use tracing::trace;

use crate::types::{Derivation, Morpheme, PositionalError};

/// Run every stage on `stems`. Each stage sees the output of the previous one;
/// the morphemes inside a stage decide their conditions, and whether their
/// affix is present, on the word as it was when the stage started.
pub(crate) fn apply(
    stages: &[Vec<Morpheme>],
    stems: Vec<String>,
) -> Result<Vec<String>, PositionalError> {
    run(stages, stems, |_, _| {})
}

/// Like [`apply`], keeping the joined word after every stage.
pub(crate) fn apply_detailed(
    stages: &[Vec<Morpheme>],
    stems: Vec<String>,
) -> Result<Derivation, PositionalError> {
    let start = Instant::now();
    let input = stems.concat();
    let mut steps = Vec::with_capacity(stages.len());
    let stems = run(stages, stems, |_, stems| steps.push(stems.concat()))?;
    Ok(Derivation::new(input, steps, stems, start.elapsed()))
}

fn run(
    stages: &[Vec<Morpheme>],
    stems: Vec<String>,
    mut on_stage: impl FnMut(usize, &[String]),
) -> Result<Vec<String>, PositionalError> {
    stages
        .iter()
        .enumerate()
        .try_fold(stems, |stems, (stage, morphemes)| {
            let observed = stems.clone();
            let stems = morphemes
                .iter()
                .try_fold(stems, |current, morpheme| {
                    morpheme.apply_observing(&current, &observed)
                })?;
            trace!(stage, from = %observed.concat(), to = %stems.concat(), "applied stage");
            on_stage(stage, &stems);
            Ok(stems)
        })
}
