//! Hand-written recursive descent parser for C# expressions.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead and backtracking
//! - `error`: ParseError
//! - `expr`: Expression parser using Pratt parsing
//! - `types`: Type syntax and generic-argument disambiguation
//! - `decl`: Declaration and `using` directive scanning
//! - `scan`: Expression-region scanner over whole files

mod decl;
mod error;
mod expr;
mod scan;
mod stream;
mod types;

pub use decl::{local_declarations, using_directives, LocalDeclaration, UsingDirective};
pub use error::{ParseError, ParseErrorKind};
pub use scan::scan_expressions;
use stream::TokenStream;

use awexpect_migrate_ast::Expr;
use awexpect_migrate_lexer::Token;
use std::ops::Range;

/// Parse a token slice that must contain exactly one expression.
pub(crate) fn parse_complete_expr(tokens: &[(Token, Range<usize>)]) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::unexpected_token(
            None,
            "in expression",
            awexpect_migrate_ast::Span::new(0, 0),
        ));
    }
    let mut stream = TokenStream::new(tokens);
    let expr = expr::parse_expr(&mut stream)?;
    if !stream.at_end() {
        return Err(ParseError::invalid_syntax(
            format!(
                "unexpected `{}` after expression",
                stream.peek().map(ToString::to_string).unwrap_or_default()
            ),
            stream.current_span(),
        ));
    }
    Ok(expr)
}
