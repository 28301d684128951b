//! Expression tree walking utilities.
//!
//! Provides shared traversal logic to avoid duplicating recursive descent
//! across the scanner, the detector and the semantic index.
//!
//! # Design
//!
//! - **Minimal API** - `children` plus a pre-order `walk_expr`, not a trait hierarchy
//! - **Visitor pattern** - Caller provides `FnMut(&Expr)` for node inspection
//! - **No context threading** - passes that need ancestors recurse over
//!   `children` themselves
//!
//! # Examples
//!
//! ```
//! use awexpect_migrate_ast::walk::walk_expr;
//! use awexpect_migrate_ast::{Expr, ExprKind, Span};
//!
//! let expr = Expr::new(ExprKind::This, Span::new(0, 4));
//! let mut count = 0;
//! walk_expr(&expr, &mut |_| count += 1);
//! assert_eq!(count, 1);
//! ```

use crate::expr::{Expr, ExprKind, LambdaBody};
use crate::span::Span;

/// Direct children of an expression in source order.
///
/// Argument values are children; argument names and modifiers are not.
/// Opaque regions (statement blocks, initializers) have no children.
pub fn children(expr: &Expr) -> Vec<&Expr> {
    match &expr.kind {
        ExprKind::MemberAccess { target, .. } => vec![target.as_ref()],

        ExprKind::Invocation { callee, args } => std::iter::once(callee.as_ref())
            .chain(args.iter().map(|arg| &arg.expr))
            .collect(),

        ExprKind::ElementAccess { target, args } => std::iter::once(target.as_ref())
            .chain(args.iter().map(|arg| &arg.expr))
            .collect(),

        ExprKind::Paren(inner)
        | ExprKind::Await(inner)
        | ExprKind::Throw(inner)
        | ExprKind::Unary { operand: inner, .. }
        | ExprKind::Postfix { operand: inner, .. }
        | ExprKind::Cast { operand: inner, .. }
        | ExprKind::TypeTest { operand: inner, .. } => vec![inner.as_ref()],

        ExprKind::Lambda { body, .. } => match body {
            LambdaBody::Expr(body) => vec![body.as_ref()],
            LambdaBody::Block(_) => Vec::new(),
        },

        ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],

        ExprKind::Conditional {
            condition,
            then_branch,
            else_branch,
        } => vec![condition.as_ref(), then_branch.as_ref(), else_branch.as_ref()],

        ExprKind::New { args, .. } => args
            .iter()
            .flatten()
            .map(|arg| &arg.expr)
            .collect(),

        ExprKind::Collection(elements) | ExprKind::Tuple(elements) => elements.iter().collect(),

        ExprKind::Range { start, end } => start
            .iter()
            .chain(end.iter())
            .map(|bound| bound.as_ref())
            .collect(),

        // === Leaf nodes (no children to traverse) ===
        ExprKind::Name(_)
        | ExprKind::Literal(_)
        | ExprKind::This
        | ExprKind::Base
        | ExprKind::TypeOf(_)
        | ExprKind::Default(_)
        | ExprKind::Declaration { .. } => Vec::new(),
    }
}

/// Recursively walk an expression tree in pre-order, calling visitor for each node.
pub fn walk_expr<V>(expr: &Expr, visitor: &mut V)
where
    V: FnMut(&Expr),
{
    visitor(expr);
    for child in children(expr) {
        walk_expr(child, visitor);
    }
}

/// Spans of unparsed regions nested anywhere in the expression.
///
/// Lambda statement bodies and object initializers are kept as raw spans by
/// the parser; callers that need to see inside them scan these regions as
/// separate inputs.
pub fn opaque_regions(expr: &Expr) -> Vec<Span> {
    let mut regions = Vec::new();
    walk_expr(expr, &mut |node| match &node.kind {
        ExprKind::Lambda {
            body: LambdaBody::Block(span),
            ..
        } => regions.push(*span),
        ExprKind::New {
            initializer: Some(span),
            ..
        } => regions.push(*span),
        _ => {}
    });
    regions
}
