use tracing::debug;

use crate::types::{
    Affix, Branch, ComplexCondition, FormPotential, GrammarError, Interfix, Morpheme, Operation,
    OperationKind, Polarity, RuleStructure,
};

/// Turn every descriptor of `structure` into a live [`Morpheme`], one stage per
/// same-order group.
pub(crate) fn compile(structure: &RuleStructure) -> Result<Vec<Vec<Morpheme>>, GrammarError> {
    let stages = structure
        .ordered_expressions
        .iter()
        .map(|group| {
            group
                .operations
                .iter()
                .map(operation)
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        stages = stages.len(),
        morphemes = stages.iter().map(Vec::len).sum::<usize>(),
        "compiled rule"
    );
    Ok(stages)
}

fn operation(operation: &Operation) -> Result<Morpheme, GrammarError> {
    match operation {
        Operation::Affix {
            operation,
            operation_type,
            operands,
        } => affix(*operation, *operation_type, operands),
        Operation::Conditional {
            condition,
            then,
            otherwise,
        } => {
            let positive = branch(then, |polarity| deciding_affix(condition, polarity))?;
            let negative = branch(otherwise, |polarity| first_affix(condition, polarity))?;
            Ok(Morpheme::conditional(condition.clone(), positive, negative))
        }
    }
}

fn affix(
    kind: OperationKind,
    polarity: Option<Polarity>,
    operands: &[FormPotential],
) -> Result<Morpheme, GrammarError> {
    if operands.len() != kind.arity() {
        return Err(GrammarError::OperandCount {
            operation: kind,
            expected: kind.arity(),
            found: operands.len(),
        });
    }
    // an interfix with disagreeing markers
    let Some(polarity) = polarity else {
        return Ok(Morpheme::Identity);
    };

    let morpheme = match kind {
        OperationKind::Prefix => Affix::prefix(operands[0].clone(), polarity).into(),
        OperationKind::Postfix => Affix::postfix(operands[0].clone(), polarity).into(),
        OperationKind::Circumfix => Morpheme::Composite(vec![
            Affix::prefix(operands[0].clone(), polarity).into(),
            Affix::postfix(operands[1].clone(), polarity).into(),
        ]),
        OperationKind::Interfix => Interfix::new(operands[0].clone(), polarity).into(),
    };
    Ok(morpheme)
}

fn branch(
    branch: &Branch,
    short: impl FnOnce(Polarity) -> Morpheme,
) -> Result<Morpheme, GrammarError> {
    match branch {
        Branch::Identity => Ok(Morpheme::Identity),
        Branch::Short(polarity) => Ok(short(*polarity)),
        Branch::Operations(operations) => Ok(Morpheme::sequence(
            operations
                .iter()
                .map(operation)
                .collect::<Result<Vec<_>, _>>()?,
        )),
    }
}

// -- Short actions ----------------------------------------------------------

/// Apply `polarity` to the letters of whichever alternative holds first.
fn deciding_affix(condition: &ComplexCondition, polarity: Polarity) -> Morpheme {
    Morpheme::Choice(
        condition
            .alternatives
            .iter()
            .map(|basic| {
                let affix = Affix::new(basic.form.clone(), polarity, basic.anchor.at());
                (ComplexCondition::new(vec![basic.clone()]), affix.into())
            })
            .collect(),
    )
}

/// None of the alternatives held, so the first one stands for the condition.
fn first_affix(condition: &ComplexCondition, polarity: Polarity) -> Morpheme {
    condition
        .alternatives
        .first()
        .map_or(Morpheme::Identity, |basic| {
            Affix::new(basic.form.clone(), polarity, basic.anchor.at()).into()
        })
}
