use std::fmt;

use crate::ast::Segment;

/// Root of a compiled query.
///
/// Also appears nested inside expressions, e.g. as the operand of a
/// comparison inside a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Rooted at the document (`$`)
    Absolute(Vec<Segment>),
    /// Rooted at the current element (`@`)
    Relative(Vec<Segment>),
}

impl Query {
    pub fn segments(&self) -> &[Segment] {
        match self {
            Query::Absolute(segments) | Query::Relative(segments) => segments,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, Query::Absolute(_))
    }

    pub fn node_name(&self) -> &'static str {
        match self {
            Query::Absolute(_) => "AbsQuery",
            Query::Relative(_) => "RelQuery",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_absolute() { "$" } else { "@" })?;
        for segment in self.segments() {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
