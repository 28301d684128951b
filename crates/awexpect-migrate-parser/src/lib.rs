// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Hand-written recursive descent parser for C# expressions.
//!
//! The migrator needs three things from the host language: the expression
//! trees around assertion call sites, a way to check that rewritten text is
//! still a valid expression, and enough declarations to answer simple type
//! questions. This crate provides all three on top of the lexer.

pub mod parser;

pub use parser::{
    local_declarations, scan_expressions, using_directives, LocalDeclaration, ParseError,
    ParseErrorKind, UsingDirective,
};

// Re-export lexer
pub use awexpect_migrate_lexer::{tokenize, Lexed, Token};

use awexpect_migrate_ast::{Expr, Span};
use std::ops::Range;

/// Parse a sequence of tokens with byte spans into a single expression.
///
/// Every token must belong to the expression; trailing input is an error.
///
/// # Returns
/// - `Ok(Expr)` if parsing succeeds
/// - `Err(ParseError)` if parsing fails
pub fn parse_expr_with_spans(tokens: &[(Token, Range<usize>)]) -> Result<Expr, ParseError> {
    parser::parse_complete_expr(tokens)
}

/// Tokenize and parse source text that must be exactly one expression.
///
/// Used to validate synthesized replacement text before it is spliced.
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    let lexed = tokenize(source);
    if let Some(range) = lexed.errors.first() {
        return Err(ParseError::lex(Span::from_range(range)));
    }
    parse_expr_with_spans(&lexed.tokens)
}
