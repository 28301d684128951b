// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Expression tree for C# assertion call sites.
//!
//! The tree is deliberately shallow: it models the expression grammar the
//! migrator has to see through (member access, invocation, lambdas, literals,
//! operators) and keeps everything else as opaque source spans. Every node
//! carries the byte span it was parsed from, so the exact original text of
//! any node is `&source[span]`.

pub mod expr;
pub mod span;
pub mod walk;

pub use expr::{
    ArgModifier, Argument, BinaryOp, Expr, ExprKind, LambdaBody, Literal, LiteralKind,
    SimpleName, TypeSyntax, TypeTestOp, UnaryOp,
};
pub use span::Span;
