//! Lambda expressions and anonymous methods.
//!
//! Statement bodies are not parsed: the braces are matched and the body is
//! kept as an opaque span for the scanner to revisit.

use super::super::{ParseError, TokenStream};
use awexpect_migrate_ast::{Expr, ExprKind, LambdaBody};
use awexpect_migrate_lexer::Token;

fn is_async(token: Option<&Token>) -> bool {
    matches!(token, Some(Token::Ident(name)) if &**name == "async")
}

fn is_static(token: Option<&Token>) -> bool {
    matches!(token, Some(Token::Ident(name)) if &**name == "static")
}

/// Whether the stream is positioned at the start of a lambda.
pub(super) fn at_lambda(stream: &TokenStream) -> bool {
    let mut offset = 0;
    while is_async(stream.peek_nth(offset)) || is_static(stream.peek_nth(offset)) {
        offset += 1;
    }
    match stream.peek_nth(offset) {
        Some(Token::Delegate) => true,
        Some(Token::Ident(_)) => matches!(stream.peek_nth(offset + 1), Some(Token::FatArrow)),
        Some(Token::LParen) => {
            let open = stream.current_pos() + offset;
            stream
                .matching_close(open)
                .is_some_and(|close| matches!(stream.peek_nth(close - stream.current_pos() + 1), Some(Token::FatArrow)))
        }
        _ => false,
    }
}

/// Parse `x => body`, `(a, b) => body`, `async () => body`, `delegate { ... }`.
pub(super) fn parse_lambda(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let mut asynchronous = false;
    while is_async(stream.peek()) || is_static(stream.peek()) {
        asynchronous |= is_async(stream.peek());
        stream.advance();
    }

    if stream.eat(&Token::Delegate) {
        let params = if stream.check(&Token::LParen) {
            parse_parameter_list(stream)?
        } else {
            Vec::new()
        };
        let body = stream.skip_balanced(&Token::LBrace, &Token::RBrace)?;
        return Ok(Expr::new(
            ExprKind::Lambda {
                params,
                body: LambdaBody::Block(body),
                is_async: asynchronous,
            },
            stream.span_from(start),
        ));
    }

    let params = match stream.peek() {
        Some(Token::Ident(name)) => {
            let name = name.to_string();
            stream.advance();
            vec![name]
        }
        _ => parse_parameter_list(stream)?,
    };
    stream.expect(Token::FatArrow)?;

    let body = if stream.check(&Token::LBrace) {
        LambdaBody::Block(stream.skip_balanced(&Token::LBrace, &Token::RBrace)?)
    } else {
        LambdaBody::Expr(Box::new(super::parse_expr(stream)?))
    };

    Ok(Expr::new(
        ExprKind::Lambda {
            params,
            body,
            is_async: asynchronous,
        },
        stream.span_from(start),
    ))
}

/// `(int a, ref string b, c)` - keeps the last identifier of each parameter.
fn parse_parameter_list(stream: &mut TokenStream) -> Result<Vec<String>, ParseError> {
    stream.expect(Token::LParen)?;
    let mut params = Vec::new();
    let mut current: Option<String> = None;
    let mut depth = 0usize;
    loop {
        let span = stream.current_span();
        match stream.advance() {
            Some(Token::RParen) if depth == 0 => break,
            Some(Token::Comma) if depth == 0 => params.extend(current.take()),
            Some(Token::Lt | Token::LParen | Token::LBracket) => depth += 1,
            Some(Token::Gt | Token::RParen | Token::RBracket) => depth = depth.saturating_sub(1),
            Some(Token::Ident(name)) if depth == 0 => current = Some(name.to_string()),
            Some(_) => {}
            None => return Err(ParseError::unexpected_token(None, "in lambda parameters", span)),
        }
    }
    params.extend(current);
    Ok(params)
}
