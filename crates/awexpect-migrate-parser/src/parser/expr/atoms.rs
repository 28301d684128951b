//! Atomic expressions - literals, names, parenthesized forms, casts, `new`.

use super::super::{types, ParseError, TokenStream};
use super::pratt;
use awexpect_migrate_ast::{Expr, ExprKind, Literal, LiteralKind, SimpleName, TypeSyntax};
use awexpect_migrate_lexer::Token;

/// Parse atomic expressions (literals, identifiers, special keywords).
pub(super) fn parse_atom(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();

    match stream.peek() {
        Some(token) if token.is_literal() => parse_literal(stream),
        Some(Token::This) => {
            stream.advance();
            Ok(Expr::new(ExprKind::This, stream.span_from(start)))
        }
        Some(Token::Base) => {
            stream.advance();
            Ok(Expr::new(ExprKind::Base, stream.span_from(start)))
        }
        Some(Token::Ident(_)) => {
            let name = parse_simple_name(stream, "in expression")?;
            Ok(Expr::new(ExprKind::Name(name), stream.span_from(start)))
        }
        Some(Token::LParen) => parse_parenthesized(stream),
        Some(Token::LBracket) => parse_collection(stream),
        Some(Token::New) => parse_new(stream),
        Some(Token::Typeof) => {
            stream.advance();
            stream.expect(Token::LParen)?;
            let ty = types::parse_type(stream)?;
            stream.expect(Token::RParen)?;
            Ok(Expr::new(ExprKind::TypeOf(ty), stream.span_from(start)))
        }
        Some(Token::Default) => {
            stream.advance();
            let ty = if stream.eat(&Token::LParen) {
                let ty = types::parse_type(stream)?;
                stream.expect(Token::RParen)?;
                Some(ty)
            } else {
                None
            };
            Ok(Expr::new(ExprKind::Default(ty), stream.span_from(start)))
        }
        other => Err(ParseError::unexpected_token(
            other,
            "in expression",
            stream.current_span(),
        )),
    }
}

/// Parse a literal token.
fn parse_literal(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let span = stream.current_span();
    let (kind, text) = match stream.advance() {
        Some(Token::Number(text)) => (number_kind(text), text.to_string()),
        Some(Token::Str(text)) => (LiteralKind::String, text.to_string()),
        Some(Token::InterpolatedStr(text)) => (LiteralKind::InterpolatedString, text.to_string()),
        Some(Token::Char(text)) => (LiteralKind::Char, text.to_string()),
        Some(Token::True) => (LiteralKind::Bool, "true".to_string()),
        Some(Token::False) => (LiteralKind::Bool, "false".to_string()),
        Some(Token::Null) => (LiteralKind::Null, "null".to_string()),
        other => return Err(ParseError::unexpected_token(other, "literal", span)),
    };
    Ok(Expr::new(
        ExprKind::Literal(Literal { kind, text }),
        stream.span_from(start),
    ))
}

/// Integral unless the text has a fraction, exponent or real-type suffix.
fn number_kind(text: &str) -> LiteralKind {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("0x") || lower.starts_with("0b") {
        return LiteralKind::Integer;
    }
    if lower.contains('.') || lower.contains('e') || lower.ends_with(['f', 'd', 'm']) {
        LiteralKind::Real
    } else {
        LiteralKind::Integer
    }
}

/// Parse an identifier with optional type arguments: `Should`, `Throw<T>`.
///
/// `global::Name` is folded into one identifier.
pub(super) fn parse_simple_name(
    stream: &mut TokenStream,
    context: &str,
) -> Result<SimpleName, ParseError> {
    let start = stream.current_pos();
    let span = stream.current_span();
    let mut ident = match stream.advance() {
        Some(Token::Ident(name)) => name.to_string(),
        other => return Err(ParseError::unexpected_token(other, context, span)),
    };
    if matches!(stream.peek(), Some(Token::ColonColon)) {
        stream.advance();
        let span = stream.current_span();
        match stream.advance() {
            Some(Token::Ident(name)) => {
                ident.push_str("::");
                ident.push_str(name);
            }
            other => return Err(ParseError::unexpected_token(other, "after '::'", span)),
        }
    }
    let type_args = types::try_type_arguments(stream).unwrap_or_default();
    Ok(SimpleName {
        ident,
        type_args,
        span: stream.span_from(start),
    })
}

/// Parenthesized expression, tuple literal, or cast.
fn parse_parenthesized(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();

    if let Some(cast) = try_cast(stream)? {
        return Ok(cast);
    }

    stream.expect(Token::LParen)?;
    let first = super::parse_expr(stream)?;
    if stream.check(&Token::Comma) {
        let mut elements = vec![first];
        while stream.eat(&Token::Comma) {
            // named tuple elements: `(a: 1, b: 2)`
            if matches!(stream.peek(), Some(Token::Ident(_))) && matches!(stream.peek_nth(1), Some(Token::Colon)) {
                stream.advance();
                stream.advance();
            }
            elements.push(super::parse_expr(stream)?);
        }
        stream.expect(Token::RParen)?;
        return Ok(Expr::new(ExprKind::Tuple(elements), stream.span_from(start)));
    }
    stream.expect(Token::RParen)?;
    Ok(Expr::new(
        ExprKind::Paren(Box::new(first)),
        stream.span_from(start),
    ))
}

/// `(Type)operand` is a cast when the parenthesized tokens form a type and
/// the next token can only start an operand.
fn try_cast(stream: &mut TokenStream) -> Result<Option<Expr>, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::LParen)?;
    let ty = match types::parse_type(stream) {
        Ok(ty) if stream.check(&Token::RParen) => ty,
        _ => {
            stream.restore(start);
            return Ok(None);
        }
    };
    stream.advance();

    let operand_follows = matches!(
        stream.peek(),
        Some(
            Token::Ident(_)
                | Token::Number(_)
                | Token::Str(_)
                | Token::InterpolatedStr(_)
                | Token::Char(_)
                | Token::True
                | Token::False
                | Token::Null
                | Token::This
                | Token::Base
                | Token::New
                | Token::Typeof
                | Token::Default
                | Token::Await
                | Token::LParen
                | Token::Bang
                | Token::Tilde
        )
    );
    if !operand_follows {
        stream.restore(start);
        return Ok(None);
    }

    let operand = pratt::parse_prefix(stream)?;
    Ok(Some(Expr::new(
        ExprKind::Cast {
            ty,
            operand: Box::new(operand),
        },
        stream.span_from(start),
    )))
}

/// Collection expression: `[1, 2, ..rest]`.
fn parse_collection(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::LBracket)?;

    let mut elements = Vec::new();
    while !stream.check(&Token::RBracket) {
        elements.push(super::parse_expr(stream)?);

        if !stream.check(&Token::RBracket) {
            stream.expect(Token::Comma)?;
        }
    }
    stream.expect(Token::RBracket)?;

    Ok(Expr::new(ExprKind::Collection(elements), stream.span_from(start)))
}

/// Object and array creation.
///
/// - `new T(args) { init }` / `new T { init }`
/// - `new(args)` target-typed
/// - `new[] { ... }` / `new T[n]` / `new T[] { ... }`
/// - `new { A = 1 }` anonymous
fn parse_new(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::New)?;

    let mut ty = match stream.peek() {
        Some(Token::LParen | Token::LBrace) => None,
        Some(Token::LBracket) => {
            let bracket = stream.current_pos();
            stream.advance();
            while stream.eat(&Token::Comma) {}
            stream.expect(Token::RBracket)?;
            Some(TypeSyntax {
                name: "[]".to_string(),
                span: stream.span_from(bracket),
            })
        }
        _ => Some(types::parse_type(stream)?),
    };

    // sized array creation: `new int[3]`
    if let Some(element) = ty.as_mut() {
        if stream.check(&Token::LBracket) {
            pratt::parse_call_args(stream, Token::LBracket, Token::RBracket)?;
            element.name.push_str("[]");
            element.span = stream.span_from(start + 1);
        }
    }

    let args = if stream.check(&Token::LParen) {
        Some(pratt::parse_call_args(stream, Token::LParen, Token::RParen)?)
    } else {
        None
    };

    let initializer = if stream.check(&Token::LBrace) {
        Some(stream.skip_balanced(&Token::LBrace, &Token::RBrace)?)
    } else {
        None
    };

    if args.is_none() && initializer.is_none() && !ty.as_ref().is_some_and(|t| t.name.ends_with(']')) {
        return Err(ParseError::invalid_syntax(
            "object creation needs arguments or an initializer",
            stream.span_from(start),
        ));
    }

    Ok(Expr::new(
        ExprKind::New {
            ty,
            args,
            initializer,
        },
        stream.span_from(start),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_kind() {
        assert_eq!(number_kind("42"), LiteralKind::Integer);
        assert_eq!(number_kind("42L"), LiteralKind::Integer);
        assert_eq!(number_kind("0.5"), LiteralKind::Real);
        assert_eq!(number_kind("1e3"), LiteralKind::Real);
        assert_eq!(number_kind("2m"), LiteralKind::Real);
        assert_eq!(number_kind("0xFD"), LiteralKind::Integer);
    }
}
