//! Declaration scanning.
//!
//! The migrator never parses statements, but the semantic index needs to
//! know what local variables, parameters, fields and properties are called
//! and which types they were declared with. This module finds
//! `Type name [= initializer]` shapes in a token stream, plus `using`
//! directives for the detector.

use super::{expr, types, TokenStream};
use awexpect_migrate_ast::{Expr, Span, TypeSyntax};
use awexpect_migrate_lexer::Token;
use std::ops::Range;

/// A variable, parameter, field or property declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDeclaration {
    /// Declared name
    pub name: String,
    /// Declared type; `None` for `var`
    pub ty: Option<TypeSyntax>,
    /// Initializer expression when one was written and parsed
    pub initializer: Option<Expr>,
    /// Location of the declared name
    pub name_span: Span,
}

/// A `using` directive at namespace level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingDirective {
    /// Imported namespace or type: `FluentAssertions`, `System.Linq`
    pub target: String,
    /// Alias for `using Alias = Target;`
    pub alias: Option<String>,
    /// True for `using static Target;`
    pub is_static: bool,
}

/// Whether the token before `pos` allows a declaration to start at `pos`.
fn declaration_may_start(tokens: &[(Token, Range<usize>)], pos: usize) -> bool {
    match pos.checked_sub(1).map(|prev| &tokens[prev].0) {
        None => true,
        Some(prev) => matches!(
            prev,
            Token::LBrace
                | Token::RBrace
                | Token::Semi
                | Token::LParen
                | Token::Comma
                | Token::RBracket
                | Token::Out
                | Token::Is
                | Token::Ident(_)
        ),
    }
}

fn declarator_ends(token: Option<&Token>) -> bool {
    matches!(
        token,
        Some(
            Token::Eq
                | Token::Semi
                | Token::Comma
                | Token::RParen
                | Token::In
                | Token::LBrace
                | Token::FatArrow
        )
    )
}

/// Find declarations anywhere in the token stream.
pub fn local_declarations(tokens: &[(Token, Range<usize>)]) -> Vec<LocalDeclaration> {
    let mut declarations = Vec::new();
    let mut stream = TokenStream::new(tokens);

    for pos in 0..tokens.len() {
        if !matches!(tokens[pos].0, Token::Ident(_) | Token::LParen) || !declaration_may_start(tokens, pos) {
            continue;
        }
        stream.restore(pos);
        let Ok(ty) = types::parse_type(&mut stream) else {
            continue;
        };
        let Some(Token::Ident(name)) = stream.peek() else {
            continue;
        };
        let name_span = stream.current_span();
        stream.advance();

        let after_is = pos > 0 && matches!(tokens[pos - 1].0, Token::Is);
        if !after_is && !declarator_ends(stream.peek()) {
            continue;
        }

        let initializer = if stream.eat(&Token::Eq) {
            expr::parse_expr(&mut stream).ok()
        } else {
            None
        };

        declarations.push(LocalDeclaration {
            name: name.to_string(),
            ty: (ty.name != "var").then_some(ty),
            initializer,
            name_span,
        });
    }

    declarations
}

/// Find `using` directives (not `using` statements or declarations).
pub fn using_directives(tokens: &[(Token, Range<usize>)]) -> Vec<UsingDirective> {
    let mut directives = Vec::new();

    for (pos, (token, _)) in tokens.iter().enumerate() {
        if !matches!(token, Token::Using) {
            continue;
        }
        let mut cursor = pos + 1;
        let is_static = matches!(tokens.get(cursor), Some((Token::Ident(name), _)) if &**name == "static");
        if is_static {
            cursor += 1;
        }

        let alias = match (tokens.get(cursor), tokens.get(cursor + 1)) {
            (Some((Token::Ident(alias), _)), Some((Token::Eq, _))) => {
                cursor += 2;
                Some(alias.to_string())
            }
            _ => None,
        };

        let mut target = String::new();
        loop {
            match tokens.get(cursor) {
                Some((Token::Ident(segment), _)) => target.push_str(segment),
                _ => break,
            }
            cursor += 1;
            match tokens.get(cursor) {
                Some((Token::Dot, _)) => target.push('.'),
                Some((Token::ColonColon, _)) => target.push_str("::"),
                _ => break,
            }
            cursor += 1;
        }

        if !target.is_empty() && matches!(tokens.get(cursor), Some((Token::Semi, _))) {
            directives.push(UsingDirective {
                target: target.trim_start_matches("global::").to_string(),
                alias,
                is_static,
            });
        }
    }

    directives
}
