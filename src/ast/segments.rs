use std::fmt;

use crate::ast::Selector;
use crate::ast::expressions::is_plain_identifier;
use crate::ast::selectors::write_dot_selector;

/// One path step.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Bracketed child segment, never empty
    ///
    /// # Examples
    /// ```text
    /// $['a', 'b']
    /// $[0:2, ?(@.x)]
    /// ```
    Child(Vec<Selector>),

    /// Dot child segment: a name or `*`
    ///
    /// # Examples
    /// ```text
    /// $.store
    /// $.*
    /// ```
    DotChild(Selector),

    /// Recursive descent
    ///
    /// # Examples
    /// ```text
    /// $..author
    /// $..*
    /// $..[0, 1]
    /// ```
    Descendant(Vec<Selector>),
}

impl Segment {
    pub fn selectors(&self) -> &[Selector] {
        match self {
            Segment::Child(selectors) | Segment::Descendant(selectors) => selectors,
            Segment::DotChild(selector) => std::slice::from_ref(selector),
        }
    }

    pub fn node_name(&self) -> &'static str {
        match self {
            Segment::Child(_) => "ChildSegment",
            Segment::DotChild(_) => "DotChildSegment",
            Segment::Descendant(_) => "DescendantSegment",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Child(selectors) => write_bracketed(f, selectors),
            Segment::DotChild(selector) => write_dot_selector(f, selector),
            Segment::Descendant(selectors) => {
                f.write_str("..")?;
                match selectors.as_slice() {
                    [Selector::Wildcard] => f.write_str("*"),
                    [Selector::Name(name)] if is_plain_identifier(name) => f.write_str(name),
                    _ => write_bracketed(f, selectors),
                }
            }
        }
    }
}

fn write_bracketed(f: &mut fmt::Formatter<'_>, selectors: &[Selector]) -> fmt::Result {
    f.write_str("[")?;
    for (i, selector) in selectors.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", selector)?;
    }
    f.write_str("]")
}
