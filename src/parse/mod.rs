mod error;
mod grammar;
mod tree;

pub use error::ParseError;
pub use tree::{Node, Tag};

/// The generic tree the grammar produces; its root is tagged [`Tag::Main`].
pub type ParseTree = Node;

/// Deepest parenthesis nesting the grammar accepts.
pub const MAX_NESTING: usize = 32;

/// Parse rule text into a [`ParseTree`].
///
/// Sequences of groups, alternatives and affix links can be arbitrarily
/// long; parentheses nest at most [`MAX_NESTING`] levels deep.
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not valid rule syntax.
pub fn parse(input: &str) -> Result<ParseTree, ParseError> {
    use winnow::Parser;
    check_nesting(input)?;
    grammar::parse_main
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string(), e.offset()))
}

fn check_nesting(input: &str) -> Result<(), ParseError> {
    let mut depth = 0_usize;
    for (offset, c) in input.char_indices() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(ParseError::new(
                        format!("parentheses nested deeper than {MAX_NESTING} levels"),
                        offset,
                    ));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}
