//! Traversal protocol for the AST.
//!
//! A consumer implements [`Visitor`] with one operation per node family and
//! matches exhaustively over that family's variants inside it. Nodes dispatch
//! to the right operation through `accept`. Adding a variant is a compile
//! error in every consumer until it is handled.
//!
//! The `walk_*` helpers visit the children of a node left to right, in the
//! order they are stored, for visitors that only care about a few variants.

use crate::ast::{Expr, Query, Segment, Selector};

pub trait Visitor {
    type Output;

    fn visit_query(&mut self, query: &Query) -> Self::Output;
    fn visit_segment(&mut self, segment: &Segment) -> Self::Output;
    fn visit_selector(&mut self, selector: &Selector) -> Self::Output;
    fn visit_expr(&mut self, expr: &Expr) -> Self::Output;
}

impl Query {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_query(self)
    }
}

impl Segment {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_segment(self)
    }
}

impl Selector {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_selector(self)
    }
}

impl Expr {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_expr(self)
    }
}

pub fn walk_query<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, query: &Query) {
    for segment in query.segments() {
        segment.accept(visitor);
    }
}

pub fn walk_segment<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, segment: &Segment) {
    for selector in segment.selectors() {
        selector.accept(visitor);
    }
}

pub fn walk_selector<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, selector: &Selector) {
    match selector {
        Selector::Name(_) | Selector::Wildcard => {}
        Selector::Slice(slice) => {
            for part in [&slice.start, &slice.stop, &slice.step].into_iter().flatten() {
                part.accept(visitor);
            }
        }
        Selector::Filter(expr) | Selector::Expr(expr) => expr.accept(visitor),
    }
}

pub fn walk_expr<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::String(_)
        | Expr::Integer(_)
        | Expr::True
        | Expr::False
        | Expr::Null
        | Expr::Name(_)
        | Expr::Wildcard => {}
        Expr::Typed { expr, .. } | Expr::Paren(expr) | Expr::Unary { expr, .. } => {
            expr.accept(visitor)
        }
        Expr::Call { args, .. } => {
            for arg in args {
                arg.accept(visitor);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            lhs.accept(visitor);
            rhs.accept(visitor);
        }
        Expr::Query(query) => query.accept(visitor),
    }
}
