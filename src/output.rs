//! JSON rendering of compiled queries.
//!
//! Every node becomes an object tagged with its node name in `"type"`, with
//! its children nested in place. The rendering carries enough information to
//! rebuild the tree, but its exact shape is not a stable format.
//!
//! # Examples
//!
//! ```
//! use jimongo::{compile, to_json};
//!
//! let query = compile("$.name").unwrap();
//! assert_eq!(
//!     to_json(&query),
//!     r#"{"segments":[{"selector":{"name":"name","type":"NameSelector"},"type":"DotChildSegment"}],"type":"AbsQuery"}"#
//! );
//! ```

use serde_json::{Value, json};

use crate::ast::{Expr, Query, Segment, Selector, Visitor};

/// Renders AST nodes as `serde_json::Value`s.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl JsonRenderer {
    fn optional(&mut self, expr: Option<&Expr>) -> Value {
        expr.map_or(Value::Null, |e| e.accept(self))
    }

    fn all<'a>(&mut self, selectors: impl IntoIterator<Item = &'a Selector>) -> Value {
        Value::Array(selectors.into_iter().map(|s| s.accept(self)).collect())
    }
}

impl Visitor for JsonRenderer {
    type Output = Value;

    fn visit_query(&mut self, query: &Query) -> Value {
        let segments: Vec<Value> = query.segments().iter().map(|s| s.accept(self)).collect();
        json!({ "type": query.node_name(), "segments": segments })
    }

    fn visit_segment(&mut self, segment: &Segment) -> Value {
        match segment {
            Segment::DotChild(selector) => json!({
                "type": segment.node_name(),
                "selector": selector.accept(self),
            }),
            Segment::Child(selectors) | Segment::Descendant(selectors) => json!({
                "type": segment.node_name(),
                "selectors": self.all(selectors),
            }),
        }
    }

    fn visit_selector(&mut self, selector: &Selector) -> Value {
        match selector {
            Selector::Name(name) => json!({ "type": selector.node_name(), "name": name }),
            Selector::Wildcard => json!({ "type": selector.node_name() }),
            Selector::Slice(slice) => json!({
                "type": selector.node_name(),
                "start": self.optional(slice.start.as_ref()),
                "stop": self.optional(slice.stop.as_ref()),
                "step": self.optional(slice.step.as_ref()),
            }),
            Selector::Filter(cond) => json!({
                "type": selector.node_name(),
                "cond": cond.accept(self),
            }),
            Selector::Expr(expr) => expr.accept(self),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> Value {
        let ty = expr.node_name();
        match expr {
            Expr::String(s) => json!({ "type": ty, "value": s }),
            Expr::Integer(n) => json!({ "type": ty, "value": n }),
            Expr::True => json!({ "type": ty, "value": true }),
            Expr::False => json!({ "type": ty, "value": false }),
            Expr::Null => json!({ "type": ty, "value": null }),
            Expr::Typed { expr: inner, .. } | Expr::Paren(inner) => {
                json!({ "type": ty, "value": inner.accept(self) })
            }
            Expr::Unary { expr: inner, .. } => json!({ "type": ty, "expr": inner.accept(self) }),
            Expr::Call { name, args } => {
                let params: Vec<Value> = args.iter().map(|a| a.accept(self)).collect();
                json!({ "type": ty, "name": name, "params": params })
            }
            Expr::Binary { lhs, rhs, .. } => json!({
                "type": ty,
                "lhs": lhs.accept(self),
                "rhs": rhs.accept(self),
            }),
            Expr::Name(name) => json!({ "type": ty, "name": name }),
            Expr::Wildcard => json!({ "type": ty }),
            Expr::Query(query) => query.accept(self),
        }
    }
}

/// Renders a query as a JSON value.
pub fn to_value(query: &Query) -> Value {
    query.accept(&mut JsonRenderer)
}

/// Renders a query as compact JSON text.
pub fn to_json(query: &Query) -> String {
    to_value(query).to_string()
}

/// Renders a query as JSON text with 2-space indentation.
pub fn to_json_pretty(query: &Query) -> String {
    // Serializing a `Value` to a string cannot fail
    serde_json::to_string_pretty(&to_value(query)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    #[test]
    fn test_render_slice_with_missing_parts() {
        let query = compile("$[::-1]").unwrap();
        assert_eq!(
            to_value(&query),
            json!({
                "type": "AbsQuery",
                "segments": [{
                    "type": "ChildSegment",
                    "selectors": [{
                        "type": "SliceSelector",
                        "start": null,
                        "stop": null,
                        "step": { "type": "MinusExpr", "expr": { "type": "IntExpr", "value": 1 } },
                    }],
                }],
            })
        );
    }

    #[test]
    fn test_render_typed_cast() {
        let query = compile("$[?@int(@.n) >= 2]").unwrap();
        let cond = &to_value(&query)["segments"][0]["selectors"][0]["cond"];
        assert_eq!(cond["type"], "GteExpr");
        assert_eq!(cond["lhs"]["type"], "TypedIntExpr");
        assert_eq!(cond["lhs"]["value"]["type"], "RelQuery");
        assert_eq!(cond["rhs"], json!({ "type": "IntExpr", "value": 2 }));
    }
}
