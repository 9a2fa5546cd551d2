use crate::parse::{Node, ParseTree, Tag};
use crate::types::{
    Anchor, BasicCondition, Branch, ComplexCondition, FormPotential, GrammarError, Operation,
    OperationKind, Polarity, RuleStructure, SameOrderGroup,
};

/// Normalize a parse tree into a [`RuleStructure`].
///
/// # Errors
///
/// Returns [`GrammarError`] if the tree encodes an invalid rule, such as an
/// optional group with more than one `^` marker, or if it does not have the
/// shape the grammar produces.
pub fn interpret(tree: &ParseTree) -> Result<RuleStructure, GrammarError> {
    let main = expect(tree, Tag::Main)?;
    let body = main
        .children()
        .last()
        .ok_or_else(|| unexpected("rule body", main))?;
    let ordered_expressions = ordered_expressions(body)?;

    tracing::debug!(
        groups = ordered_expressions.len(),
        operations = ordered_expressions
            .iter()
            .map(|group| group.operations.len())
            .sum::<usize>(),
        "interpreted rule"
    );

    Ok(RuleStructure {
        context: None,
        ordered_expressions,
    })
}

// -- Groups -----------------------------------------------------------------

fn ordered_expressions(node: &Node) -> Result<Vec<SameOrderGroup>, GrammarError> {
    let node = expect(node, Tag::OrderedExpressions)?;
    let mut groups = Vec::new();
    for group in items(node) {
        groups.push(SameOrderGroup {
            operations: same_order_group(deparenthesize(group))?,
        });
    }
    Ok(groups)
}

fn same_order_group(node: &Node) -> Result<Vec<Operation>, GrammarError> {
    let node = expect(node, Tag::SameOrderGroup)?;
    let mut operations = Vec::new();
    for item in items(node) {
        operations.extend(single(deparenthesize(item))?);
    }
    Ok(operations)
}

/// The items of a separated list; separators sit at the odd positions.
fn items(node: &Node) -> impl Iterator<Item = &Node> {
    node.children().iter().step_by(2)
}

fn single(node: &Node) -> Result<Vec<Operation>, GrammarError> {
    let inner = pass_through(node);
    match inner.tag() {
        Some(Tag::Conditional) => Ok(vec![conditional(inner)?]),
        _ => segment(inner),
    }
}

/// If the first child is an opening parenthesis, the content is the second child.
fn deparenthesize(node: &Node) -> &Node {
    match node.children() {
        [open, inner, ..] if open.is_literal("(") => inner,
        _ => node,
    }
}

/// Skip wrapper nodes that hold exactly one rule node.
fn pass_through(node: &Node) -> &Node {
    match node.children() {
        [only @ Node::Rule { .. }]
            if matches!(node.tag(), Some(Tag::Single | Tag::Segment | Tag::QuasiExpr)) =>
        {
            pass_through(only)
        }
        _ => node,
    }
}

// -- Segments ---------------------------------------------------------------

fn segment(node: &Node) -> Result<Vec<Operation>, GrammarError> {
    let node = pass_through(node);
    match node.tag() {
        Some(Tag::Prefix) => prefix(node),
        Some(Tag::Postfix) => postfix(node),
        Some(Tag::Circumfix) => circumfix(node).map(|op| vec![op]),
        Some(Tag::Interfix) => interfix(node).map(|op| vec![op]),
        _ => Err(unexpected("segment", node)),
    }
}

/// `X+` links followed by an optional postfix chain, flattened in reading order.
fn prefix(node: &Node) -> Result<Vec<Operation>, GrammarError> {
    let mut operations = Vec::new();
    for link in node.children().chunks(2) {
        match link {
            [form, marker] => operations.push(Operation::affix(
                OperationKind::Prefix,
                polarity(marker)?,
                vec![alpha_expr(form)?],
            )),
            [tail] => operations.extend(postfix(expect(tail, Tag::Postfix)?)?),
            _ => return Err(unexpected("prefix link", node)),
        }
    }
    Ok(operations)
}

fn postfix(node: &Node) -> Result<Vec<Operation>, GrammarError> {
    let mut operations = Vec::new();
    for link in node.children().chunks(2) {
        let [marker, form] = link else {
            return Err(unexpected("postfix link", node));
        };
        operations.push(Operation::affix(
            OperationKind::Postfix,
            polarity(marker)?,
            vec![alpha_expr(form)?],
        ));
    }
    Ok(operations)
}

fn circumfix(node: &Node) -> Result<Operation, GrammarError> {
    let left = alpha_expr(child(node, 0)?)?;
    let polarity = polarity(child(node, 1)?)?;
    let right = alpha_expr(child(node, 2)?)?;
    Ok(Operation::affix(
        OperationKind::Circumfix,
        polarity,
        vec![left, right],
    ))
}

/// Both markers must agree; otherwise the interfix is kept untyped.
fn interfix(node: &Node) -> Result<Operation, GrammarError> {
    let open = polarity(child(node, 0)?)?;
    let form = alpha_expr(child(node, 1)?)?;
    let close = polarity(child(node, 2)?)?;
    let operation_type = if open == close {
        Some(open)
    } else {
        tracing::warn!(
            interfix = %node.text(),
            "interfix markers disagree, leaving it untyped"
        );
        None
    };
    Ok(Operation::Affix {
        operation: OperationKind::Interfix,
        operation_type,
        operands: vec![form],
    })
}

fn polarity(node: &Node) -> Result<Polarity, GrammarError> {
    let text = match node {
        Node::Literal(text) => text.as_str(),
        Node::Rule { .. } => return Err(unexpected("polarity", node)),
    };
    let mut chars = text.chars();
    match (chars.next().and_then(Polarity::from_symbol), chars.next()) {
        (Some(polarity), None) => Ok(polarity),
        _ => Err(unexpected("polarity", node)),
    }
}

// -- Conditionals -----------------------------------------------------------

fn conditional(node: &Node) -> Result<Operation, GrammarError> {
    let condition = complex_condition(child(node, 0)?)?;
    let (then, otherwise) = match node.children() {
        [_, _, colon, otherwise] if colon.is_literal(":") => (Branch::Identity, branch(otherwise)?),
        [_, _, then] => (branch(then)?, Branch::Identity),
        [_, _, then, _, otherwise] => (branch(then)?, branch(otherwise)?),
        _ => return Err(unexpected("conditional", node)),
    };
    Ok(Operation::Conditional {
        condition,
        then,
        otherwise,
    })
}

fn branch(node: &Node) -> Result<Branch, GrammarError> {
    let node = expect(node, Tag::QuasiExpr)?;
    match child(node, 0)? {
        short @ Node::Literal(_) => Ok(Branch::Short(polarity(short)?)),
        segment_node => Ok(Branch::Operations(segment(segment_node)?)),
    }
}

fn complex_condition(node: &Node) -> Result<ComplexCondition, GrammarError> {
    let node = expect(node, Tag::ComplexCondition)?;
    let alternatives = items(node)
        .map(basic_condition)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ComplexCondition::new(alternatives))
}

/// `X-` anchors at the start of the word, `-X` at the end.
fn basic_condition(node: &Node) -> Result<BasicCondition, GrammarError> {
    let node = expect(node, Tag::BasicCondition)?;
    let (negated, rest) = match node.children() {
        [tilde, rest @ ..] if tilde.is_literal("~") => (true, rest),
        rest => (false, rest),
    };
    let condition = match rest {
        [dash, form] if dash.is_literal("-") => BasicCondition::new(Anchor::End, alpha_expr(form)?),
        [form, dash] if dash.is_literal("-") => BasicCondition::new(Anchor::Start, alpha_expr(form)?),
        _ => return Err(unexpected("basic condition", node)),
    };
    Ok(if negated { condition.negate() } else { condition })
}

// -- Alphabetic expressions -------------------------------------------------

/// Concatenate the parts of an alphabetic expression into one potential.
fn alpha_expr(node: &Node) -> Result<FormPotential, GrammarError> {
    let node = expect(node, Tag::AlphaExpr)?;
    node.children()
        .iter()
        .try_fold(FormPotential::literal(""), |acc, part| {
            alpha_part(part).map(|potential| acc * potential)
        })
}

fn alpha_part(node: &Node) -> Result<FormPotential, GrammarError> {
    match node {
        Node::Literal(letters) => Ok(FormPotential::literal(letters.as_str())),
        Node::Rule {
            tag: Tag::OptExpr, ..
        } => opt_expr(node),
        Node::Rule { tag: Tag::Group, .. } => alpha_expr(deparenthesize(node)),
        Node::Rule {
            tag: Tag::AlphaExpr,
            ..
        } => alpha_expr(node),
        Node::Rule { .. } => Err(unexpected("alphabetic expression", node)),
    }
}

/// `X^` is `X` or nothing.
fn opt_expr(node: &Node) -> Result<FormPotential, GrammarError> {
    let text = node.text();
    let markers = text.matches('^').count();
    if markers != 1 {
        return Err(GrammarError::MalformedOptional { text, markers });
    }
    let present = alpha_part(child(node, 0)?)?;
    Ok(present | "")
}

// -- Helpers ----------------------------------------------------------------

fn expect(node: &Node, tag: Tag) -> Result<&Node, GrammarError> {
    if node.tag() == Some(tag) {
        Ok(node)
    } else {
        Err(unexpected(tag.name(), node))
    }
}

fn child(node: &Node, index: usize) -> Result<&Node, GrammarError> {
    node.children()
        .get(index)
        .ok_or_else(|| unexpected("child", node))
}

fn unexpected(expected: &'static str, found: &Node) -> GrammarError {
    GrammarError::UnexpectedNode {
        expected,
        found: found.text(),
    }
}
