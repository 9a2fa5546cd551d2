use std::fmt;

/// The grammar rule a [`Node`] was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Main,
    Context,
    OrderedExpressions,
    SameOrderGroup,
    /// `( ... )` around a group, a single expression or letters.
    Group,
    Single,
    Segment,
    Conditional,
    QuasiExpr,
    ComplexCondition,
    BasicCondition,
    Prefix,
    Postfix,
    Circumfix,
    Interfix,
    AlphaExpr,
    OptExpr,
}

impl Tag {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Tag::Main => "main",
            Tag::Context => "context",
            Tag::OrderedExpressions => "ordered_expressions",
            Tag::SameOrderGroup => "same_order_group",
            Tag::Group => "group",
            Tag::Single => "single",
            Tag::Segment => "segment",
            Tag::Conditional => "conditional",
            Tag::QuasiExpr => "quasi_expr",
            Tag::ComplexCondition => "complex_condition",
            Tag::BasicCondition => "basic_condition",
            Tag::Prefix => "prefix",
            Tag::Postfix => "postfix",
            Tag::Circumfix => "circumfix",
            Tag::Interfix => "interfix",
            Tag::AlphaExpr => "alpha_expr",
            Tag::OptExpr => "opt_expr",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the generic parse tree: a literal token or a tagged rule match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(String),
    Rule { tag: Tag, children: Vec<Node> },
}

impl Node {
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal(text.into())
    }

    #[must_use]
    pub fn rule(tag: Tag, children: Vec<Node>) -> Self {
        Node::Rule { tag, children }
    }

    /// `inner` wrapped in parentheses.
    #[must_use]
    pub fn group(inner: Node) -> Self {
        Node::rule(Tag::Group, vec![Node::literal("("), inner, Node::literal(")")])
    }

    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Node::Literal(_) => None,
            Node::Rule { tag, .. } => Some(*tag),
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Literal(_) => &[],
            Node::Rule { children, .. } => children,
        }
    }

    #[must_use]
    pub fn is_literal(&self, text: &str) -> bool {
        matches!(self, Node::Literal(literal) if literal == text)
    }

    /// The source text this node covers.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Literal(literal) => out.push_str(literal),
            Node::Rule { children, .. } => {
                for child in children {
                    child.write_text(out);
                }
            }
        }
    }
}
