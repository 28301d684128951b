//! Type syntax parser.
//!
//! Parses the type forms that appear in expressions: generic arguments,
//! casts, `typeof`, `new`, `is`/`as` and local declarations. The result is a
//! [`TypeSyntax`] with a normalized spelling, never a resolved type.

use super::{ParseError, TokenStream};
use awexpect_migrate_ast::TypeSyntax;
use awexpect_migrate_lexer::Token;

/// Parse a type: `int`, `List<string>`, `global::System.Exception`,
/// `int?`, `string[]`, `(int, string)`.
pub(crate) fn parse_type(stream: &mut TokenStream) -> Result<TypeSyntax, ParseError> {
    let start = stream.current_pos();
    let mut name = match stream.peek() {
        Some(Token::LParen) => parse_tuple_type(stream)?,
        Some(Token::Ident(_)) => parse_qualified_name(stream)?,
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "in type",
                stream.current_span(),
            ))
        }
    };

    loop {
        match stream.peek() {
            Some(Token::Question) if nullable_marker_follows(stream) => {
                stream.advance();
                name.push('?');
            }
            Some(Token::LBracket) if matches!(stream.peek_nth(1), Some(Token::RBracket | Token::Comma)) => {
                stream.advance();
                name.push('[');
                while stream.eat(&Token::Comma) {
                    name.push(',');
                }
                stream.expect(Token::RBracket)?;
                name.push(']');
            }
            _ => break,
        }
    }

    Ok(TypeSyntax {
        name,
        span: stream.span_from(start),
    })
}

/// `?` after a type is a nullable marker only when no expression can follow it.
fn nullable_marker_follows(stream: &TokenStream) -> bool {
    matches!(
        stream.peek_nth(1),
        None | Some(
            Token::Gt
                | Token::Comma
                | Token::RParen
                | Token::RBracket
                | Token::LBracket
                | Token::Semi
                | Token::Eq
                | Token::Ident(_)
        )
    )
}

/// `Name<Args>.Name<Args>...`, with an optional `alias::` prefix.
fn parse_qualified_name(stream: &mut TokenStream) -> Result<String, ParseError> {
    let mut name = expect_ident(stream)?;
    if stream.eat(&Token::ColonColon) {
        name.push_str("::");
        name.push_str(&expect_ident(stream)?);
    }
    append_type_args(stream, &mut name)?;

    while matches!(stream.peek(), Some(Token::Dot)) && matches!(stream.peek_nth(1), Some(Token::Ident(_))) {
        stream.advance();
        name.push('.');
        name.push_str(&expect_ident(stream)?);
        append_type_args(stream, &mut name)?;
    }
    Ok(name)
}

fn append_type_args(stream: &mut TokenStream, name: &mut String) -> Result<(), ParseError> {
    if !stream.check(&Token::Lt) {
        return Ok(());
    }
    stream.advance();
    name.push('<');
    let mut first = true;
    while !stream.check(&Token::Gt) {
        if !first {
            stream.expect(Token::Comma)?;
            name.push_str(", ");
        }
        first = false;
        // Unbound generic forms (`List<>`, `Dictionary<,>`) leave slots empty
        if stream.check(&Token::Comma) || stream.check(&Token::Gt) {
            continue;
        }
        name.push_str(&parse_type(stream)?.name);
    }
    stream.expect(Token::Gt)?;
    name.push('>');
    Ok(())
}

/// `(int, string name)` tuple type.
fn parse_tuple_type(stream: &mut TokenStream) -> Result<String, ParseError> {
    stream.expect(Token::LParen)?;
    let mut elements = Vec::new();
    loop {
        elements.push(parse_type(stream)?.name);
        // element names are dropped
        if matches!(stream.peek(), Some(Token::Ident(_))) {
            stream.advance();
        }
        if !stream.eat(&Token::Comma) {
            break;
        }
    }
    stream.expect(Token::RParen)?;
    if elements.len() < 2 {
        return Err(ParseError::invalid_syntax(
            "tuple type needs at least two elements",
            stream.current_span(),
        ));
    }
    Ok(format!("({})", elements.join(", ")))
}

fn expect_ident(stream: &mut TokenStream) -> Result<String, ParseError> {
    let span = stream.current_span();
    match stream.advance() {
        Some(Token::Ident(name)) => Ok(name.to_string()),
        other => Err(ParseError::unexpected_token(other, "in type name", span)),
    }
}

/// Try to parse a generic argument list after a name in expression context.
///
/// `a < b` and `Foo<Bar>(x)` share a prefix; the list is accepted only when
/// it closes and the next token is one that cannot continue a comparison.
/// On rejection the stream is left untouched.
pub(crate) fn try_type_arguments(stream: &mut TokenStream) -> Option<Vec<TypeSyntax>> {
    if !stream.check(&Token::Lt) {
        return None;
    }
    let mark = stream.current_pos();
    stream.advance();

    let mut args = Vec::new();
    loop {
        match parse_type(stream) {
            Ok(ty) => args.push(ty),
            Err(_) => {
                stream.restore(mark);
                return None;
            }
        }
        if !stream.eat(&Token::Comma) {
            break;
        }
    }

    if !stream.eat(&Token::Gt) || !disambiguates_generic(stream.peek()) {
        stream.restore(mark);
        return None;
    }
    Some(args)
}

fn disambiguates_generic(next: Option<&Token>) -> bool {
    matches!(
        next,
        None | Some(
            Token::LParen
                | Token::RParen
                | Token::RBracket
                | Token::RBrace
                | Token::Colon
                | Token::Semi
                | Token::Comma
                | Token::Dot
                | Token::QuestionDot
                | Token::Question
                | Token::EqEq
                | Token::BangEq
                | Token::Pipe
                | Token::Caret
                | Token::AndAnd
                | Token::OrOr
                | Token::Amp
                | Token::LBracket
                | Token::FatArrow
        )
    )
}
