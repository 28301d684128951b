//! Expression parser.
//!
//! Pratt parsing for operators, recursive descent for everything else.
//!
//! ## Precedence (low to high)
//!
//! 1. assignment (`=`, `+=`, `??=`, ...) - right
//! 2. conditional `?:` - right
//! 3. `??` - right
//! 4. `||`, 5. `&&`, 6. `|`, 7. `^`, 8. `&`
//! 9. `==` `!=`
//! 10. `<` `>` `<=` `>=` `is` `as`
//! 11. `..`
//! 12. `+` `-`, 13. `*` `/` `%`
//! - prefix: `-` `+` `!` `~` `^` `++` `--` `await` `throw`, casts, lambdas
//! - postfix: `.` `?.` `()` `[]` `++` `--` `!`

mod atoms;
mod lambda;
mod pratt;

use super::{ParseError, TokenStream};
use awexpect_migrate_ast::{ArgModifier, Argument, Expr, ExprKind};
use awexpect_migrate_lexer::Token;

/// Parse a complete expression, assignments included.
pub(crate) fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    pratt::parse_pratt(stream, 0)
}

/// Whether a token can begin an expression.
pub(crate) fn starts_expression(token: Option<&Token>) -> bool {
    pratt::starts_operand(token) || matches!(token, Some(Token::DotDot))
}

/// Parse one invocation argument: `[name:] [ref|out|in] expr`.
fn parse_argument(stream: &mut TokenStream) -> Result<Argument, ParseError> {
    let start = stream.current_pos();

    let name = match (stream.peek(), stream.peek_nth(1)) {
        (Some(Token::Ident(name)), Some(Token::Colon)) => {
            let name = name.to_string();
            stream.advance();
            stream.advance();
            Some(name)
        }
        _ => None,
    };

    let modifier = match stream.peek() {
        Some(Token::Ref) => Some(ArgModifier::Ref),
        Some(Token::Out) => Some(ArgModifier::Out),
        Some(Token::In) => Some(ArgModifier::In),
        _ => None,
    };
    if modifier.is_some() {
        stream.advance();
    }

    let expr = if modifier == Some(ArgModifier::Out) {
        parse_out_target(stream)?
    } else {
        parse_expr(stream)?
    };

    Ok(Argument {
        name,
        modifier,
        expr,
        span: stream.span_from(start),
    })
}

/// `out var x`, `out int x`, or a plain assignable expression.
fn parse_out_target(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    if let Ok(ty) = super::types::parse_type(stream) {
        if let Some(Token::Ident(name)) = stream.peek() {
            let name = name.to_string();
            stream.advance();
            return Ok(Expr::new(
                ExprKind::Declaration { ty, name },
                stream.span_from(start),
            ));
        }
    }
    stream.restore(start);
    parse_expr(stream)
}
