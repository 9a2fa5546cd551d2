use winnow::ascii::multispace0;
use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use super::tree::{Node, Tag};

// -- Separators -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

/// A one-character separator with optional whitespace around it.
fn sep<'i>(symbol: char) -> impl Parser<&'i str, Node, ErrMode<ContextError>> {
    delimited(ws, symbol, ws).map(|c: char| Node::literal(c))
}

/// `+`, `-` or `.`
fn pmd(input: &mut &str) -> ModalResult<Node> {
    one_of(['+', '-', '.'])
        .map(|c: char| Node::literal(c))
        .context(StrContext::Expected(StrContextValue::Description(
            "'+', '-' or '.'",
        )))
        .parse_next(input)
}

/// `+` or `-`
fn pm(input: &mut &str) -> ModalResult<Node> {
    one_of(['+', '-'])
        .map(|c: char| Node::literal(c))
        .parse_next(input)
}

/// `item (symbol item)*`, kept flat with the separators between the items.
fn separated_by(
    symbol: char,
    item: fn(&mut &str) -> ModalResult<Node>,
    input: &mut &str,
) -> ModalResult<Vec<Node>> {
    let head = item(input)?;
    let tail: Vec<(Node, Node)> = repeat(0.., (sep(symbol), item)).parse_next(input)?;
    let mut children = Vec::with_capacity(1 + 2 * tail.len());
    children.push(head);
    children.extend(flatten(tail));
    Ok(children)
}

fn flatten(pairs: Vec<(Node, Node)>) -> Vec<Node> {
    pairs.into_iter().flat_map(|(a, b)| [a, b]).collect()
}

// -- Alphabetic expressions -------------------------------------------------

/// A run of `a`-`z` letters. A trailing `^` makes only the last letter optional.
fn letter_run(input: &mut &str) -> ModalResult<Vec<Node>> {
    let run = take_while(1.., 'a'..='z').parse_next(input)?;
    if opt('^').parse_next(input)?.is_none() {
        return Ok(vec![Node::literal(run)]);
    }
    let last = run.char_indices().last().map_or(0, |(i, _)| i);
    let (head, optional) = run.split_at(last);
    let mut nodes = Vec::with_capacity(2);
    if !head.is_empty() {
        nodes.push(Node::literal(head));
    }
    nodes.push(Node::rule(
        Tag::OptExpr,
        vec![Node::literal(optional), Node::literal("^")],
    ));
    Ok(nodes)
}

/// `( alpha_expr )`, optionally marked optional with `^`.
fn letter_group(input: &mut &str) -> ModalResult<Vec<Node>> {
    let inner = delimited('(', alpha_expr, ')').parse_next(input)?;
    let group = Node::group(inner);
    if opt('^').parse_next(input)?.is_some() {
        return Ok(vec![Node::rule(
            Tag::OptExpr,
            vec![group, Node::literal("^")],
        )]);
    }
    Ok(vec![group])
}

fn alpha_expr(input: &mut &str) -> ModalResult<Node> {
    let items: Vec<Vec<Node>> = repeat(1.., alt((letter_run, letter_group)))
        .context(StrContext::Expected(StrContextValue::Description(
            "letters",
        )))
        .parse_next(input)?;
    Ok(Node::rule(
        Tag::AlphaExpr,
        items.into_iter().flatten().collect(),
    ))
}

// -- Segments ---------------------------------------------------------------

/// One or more `X+` links, optionally followed by a postfix chain.
fn prefix(input: &mut &str) -> ModalResult<Node> {
    let links: Vec<(Node, Node)> = repeat(1.., (alpha_expr, pmd)).parse_next(input)?;
    let mut children = flatten(links);
    if let Some(tail) = opt(postfix).parse_next(input)? {
        children.push(tail);
    }
    Ok(Node::rule(Tag::Prefix, children))
}

/// One or more `+X` links.
fn postfix(input: &mut &str) -> ModalResult<Node> {
    let links: Vec<(Node, Node)> = repeat(1.., (pmd, alpha_expr)).parse_next(input)?;
    Ok(Node::rule(Tag::Postfix, flatten(links)))
}

fn circumfix(input: &mut &str) -> ModalResult<Node> {
    let (left, polarity, right) = (alpha_expr, pmd, alpha_expr).parse_next(input)?;
    Ok(Node::rule(Tag::Circumfix, vec![left, polarity, right]))
}

/// `-X-`, `+X+` or `.X.`: both markers must be the same.
fn interfix(input: &mut &str) -> ModalResult<Node> {
    let open: char = one_of(['+', '-', '.']).parse_next(input)?;
    let form = alpha_expr(input)?;
    let close: char = one_of(open).parse_next(input)?;
    Ok(Node::rule(
        Tag::Interfix,
        vec![Node::literal(open), form, Node::literal(close)],
    ))
}

fn segment_single(input: &mut &str) -> ModalResult<Node> {
    alt((circumfix, prefix, postfix)).parse_next(input)
}

fn segment(input: &mut &str) -> ModalResult<Node> {
    let inner = alt((interfix, segment_single))
        .context(StrContext::Expected(StrContextValue::Description(
            "prefix, postfix, circumfix or interfix",
        )))
        .parse_next(input)?;
    Ok(Node::rule(Tag::Segment, vec![inner]))
}

// -- Conditions -------------------------------------------------------------

/// `X-` (starts with), `-X` (ends with), either negated with `~`.
fn basic_condition(input: &mut &str) -> ModalResult<Node> {
    let negation = opt('~').parse_next(input)?;
    let body = alt((
        (alpha_expr, '-').map(|(form, _)| vec![form, Node::literal("-")]),
        ('-', alpha_expr).map(|(_, form)| vec![Node::literal("-"), form]),
    ))
    .parse_next(input)?;
    let mut children = Vec::with_capacity(3);
    if negation.is_some() {
        children.push(Node::literal("~"));
    }
    children.extend(body);
    Ok(Node::rule(Tag::BasicCondition, children))
}

fn complex_condition(input: &mut &str) -> ModalResult<Node> {
    let children = separated_by('|', basic_condition, input)?;
    Ok(Node::rule(Tag::ComplexCondition, children))
}

/// A branch of a conditional: a segment, or a bare polarity.
fn quasi_expr(input: &mut &str) -> ModalResult<Node> {
    let inner = alt((segment_single, pm)).parse_next(input)?;
    Ok(Node::rule(Tag::QuasiExpr, vec![inner]))
}

fn conditional_full(input: &mut &str) -> ModalResult<Node> {
    let condition = complex_condition(input)?;
    let question = sep('?').parse_next(input)?;
    let then = quasi_expr(input)?;
    let mut children = vec![condition, question, then];
    if let Some(otherwise) = opt(preceded(sep(':'), quasi_expr)).parse_next(input)? {
        children.push(Node::literal(":"));
        children.push(otherwise);
    }
    Ok(Node::rule(Tag::Conditional, children))
}

/// `cond ? : else`
fn conditional_else_only(input: &mut &str) -> ModalResult<Node> {
    let condition = complex_condition(input)?;
    let question = sep('?').parse_next(input)?;
    let colon = sep(':').parse_next(input)?;
    let otherwise = quasi_expr(input)?;
    Ok(Node::rule(
        Tag::Conditional,
        vec![condition, question, colon, otherwise],
    ))
}

fn conditional(input: &mut &str) -> ModalResult<Node> {
    alt((conditional_full, conditional_else_only)).parse_next(input)
}

// -- Groups -----------------------------------------------------------------

fn single(input: &mut &str) -> ModalResult<Node> {
    let inner = alt((conditional, segment)).parse_next(input)?;
    Ok(Node::rule(Tag::Single, vec![inner]))
}

fn single_in_parens(input: &mut &str) -> ModalResult<Node> {
    delimited('(', single, ')').map(Node::group).parse_next(input)
}

fn same_order_item(input: &mut &str) -> ModalResult<Node> {
    alt((single, single_in_parens)).parse_next(input)
}

fn same_order_group(input: &mut &str) -> ModalResult<Node> {
    let children = separated_by(',', same_order_item, input)?;
    Ok(Node::rule(Tag::SameOrderGroup, children))
}

fn same_order_group_in_parens(input: &mut &str) -> ModalResult<Node> {
    delimited('(', same_order_group, ')')
        .map(Node::group)
        .parse_next(input)
}

fn ordered_item(input: &mut &str) -> ModalResult<Node> {
    alt((same_order_group, same_order_group_in_parens)).parse_next(input)
}

fn ordered_expressions(input: &mut &str) -> ModalResult<Node> {
    let children = separated_by(';', ordered_item, input)?;
    Ok(Node::rule(Tag::OrderedExpressions, children))
}

// -- Top-level parser -------------------------------------------------------

/// The context is currently always empty: only its `@` terminator is written.
fn context(input: &mut &str) -> ModalResult<Node> {
    sep('@').parse_next(input)?;
    Ok(Node::rule(Tag::Context, vec![Node::literal("")]))
}

pub fn parse_main(input: &mut &str) -> ModalResult<Node> {
    ws.parse_next(input)?;
    let context = opt(context).parse_next(input)?;
    let body = ordered_expressions
        .context(StrContext::Label("rule"))
        .parse_next(input)?;
    ws.parse_next(input)?;

    let children = match context {
        Some(context) => vec![context, Node::literal("@"), body],
        None => vec![body],
    };
    Ok(Node::rule(Tag::Main, children))
}
