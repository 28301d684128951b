//! Pratt parser core - precedence climbing for binary and unary operators.

use super::super::{types, ParseError, TokenStream};
use super::{atoms, lambda};
use awexpect_migrate_ast::{Argument, BinaryOp, Expr, ExprKind, TypeSyntax, TypeTestOp, UnaryOp};
use awexpect_migrate_lexer::Token;

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

const ASSIGN_PREC: u8 = 1;
const CONDITIONAL_PREC: u8 = 2;
const RELATIONAL_PREC: u8 = 10;

/// Get binary operator metadata (precedence, associativity, and operator enum).
///
/// Returns (precedence, associativity, op) where higher precedence = tighter binding.
fn binary_op_info(token: &Token) -> Option<(u8, Assoc, BinaryOp)> {
    match token {
        Token::Eq
        | Token::PlusEq
        | Token::MinusEq
        | Token::StarEq
        | Token::SlashEq
        | Token::PercentEq
        | Token::AmpEq
        | Token::PipeEq
        | Token::CaretEq
        | Token::QuestionQuestionEq => Some((ASSIGN_PREC, Assoc::Right, BinaryOp::Assign)),
        Token::QuestionQuestion => Some((3, Assoc::Right, BinaryOp::Coalesce)),
        Token::OrOr => Some((4, Assoc::Left, BinaryOp::Or)),
        Token::AndAnd => Some((5, Assoc::Left, BinaryOp::And)),
        Token::Pipe => Some((6, Assoc::Left, BinaryOp::BitOr)),
        Token::Caret => Some((7, Assoc::Left, BinaryOp::BitXor)),
        Token::Amp => Some((8, Assoc::Left, BinaryOp::BitAnd)),
        Token::EqEq => Some((9, Assoc::Left, BinaryOp::Eq)),
        Token::BangEq => Some((9, Assoc::Left, BinaryOp::Ne)),
        Token::Lt => Some((RELATIONAL_PREC, Assoc::Left, BinaryOp::Lt)),
        Token::LtEq => Some((RELATIONAL_PREC, Assoc::Left, BinaryOp::Le)),
        Token::Gt => Some((RELATIONAL_PREC, Assoc::Left, BinaryOp::Gt)),
        Token::GtEq => Some((RELATIONAL_PREC, Assoc::Left, BinaryOp::Ge)),
        Token::Plus => Some((12, Assoc::Left, BinaryOp::Add)),
        Token::Minus => Some((12, Assoc::Left, BinaryOp::Sub)),
        Token::Star => Some((13, Assoc::Left, BinaryOp::Mul)),
        Token::Slash => Some((13, Assoc::Left, BinaryOp::Div)),
        Token::Percent => Some((13, Assoc::Left, BinaryOp::Mod)),
        _ => None,
    }
}

/// Pratt parser - handles binary operators with precedence climbing.
pub(super) fn parse_pratt(stream: &mut TokenStream, min_prec: u8) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let mut left = parse_prefix(stream)?;

    while let Some(token) = stream.peek() {
        match token {
            Token::Question if min_prec <= CONDITIONAL_PREC => {
                stream.advance();
                let then_branch = super::parse_expr(stream)?;
                stream.expect(Token::Colon)?;
                let else_branch = parse_pratt(stream, CONDITIONAL_PREC)?;
                left = Expr::new(
                    ExprKind::Conditional {
                        condition: Box::new(left),
                        then_branch: Box::new(then_branch),
                        else_branch: Box::new(else_branch),
                    },
                    stream.span_from(start),
                );
            }
            Token::Is | Token::As if min_prec <= RELATIONAL_PREC => {
                left = parse_type_test(stream, left, start)?;
            }
            Token::DotDot if min_prec <= RELATIONAL_PREC + 1 => {
                stream.advance();
                let end = if starts_operand(stream.peek()) {
                    Some(Box::new(parse_pratt(stream, RELATIONAL_PREC + 2)?))
                } else {
                    None
                };
                left = Expr::new(
                    ExprKind::Range {
                        start: Some(Box::new(left)),
                        end,
                    },
                    stream.span_from(start),
                );
            }
            _ => {
                let Some((prec, assoc, op)) = binary_op_info(token) else {
                    break;
                };
                if prec < min_prec {
                    break;
                }
                stream.advance();

                let next_prec = if assoc == Assoc::Left { prec + 1 } else { prec };
                let right = parse_pratt(stream, next_prec)?;

                left = Expr::new(
                    ExprKind::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    stream.span_from(start),
                );
            }
        }
    }

    Ok(left)
}

/// Whether a token can begin an operand.
pub(super) fn starts_operand(token: Option<&Token>) -> bool {
    matches!(
        token,
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
                | Token::Throw
                | Token::Delegate
                | Token::LParen
                | Token::LBracket
                | Token::Minus
                | Token::Plus
                | Token::Bang
                | Token::Tilde
                | Token::Caret
                | Token::PlusPlus
                | Token::MinusMinus
        )
    )
}

/// `operand is pattern` / `operand as Type`.
fn parse_type_test(stream: &mut TokenStream, operand: Expr, start: usize) -> Result<Expr, ParseError> {
    let op = match stream.advance() {
        Some(Token::As) => TypeTestOp::As,
        _ => TypeTestOp::Is,
    };
    let pattern_start = stream.current_pos();

    let ty = if op == TypeTestOp::As {
        Some(types::parse_type(stream)?)
    } else {
        parse_pattern(stream)?
    };

    Ok(Expr::new(
        ExprKind::TypeTest {
            op,
            operand: Box::new(operand),
            pattern: stream.span_from(pattern_start),
            ty,
        },
        stream.span_from(start),
    ))
}

/// Parse a pattern loosely; returns the tested type for plain type patterns.
fn parse_pattern(stream: &mut TokenStream) -> Result<Option<TypeSyntax>, ParseError> {
    let mut ty = None;
    loop {
        if matches!(stream.peek(), Some(Token::Ident(name)) if &**name == "not") {
            stream.advance();
        }
        match stream.peek() {
            Some(Token::LBrace) => {
                stream.skip_balanced(&Token::LBrace, &Token::RBrace)?;
            }
            Some(Token::Lt | Token::LtEq | Token::Gt | Token::GtEq) => {
                stream.advance();
                parse_prefix(stream)?;
            }
            Some(token) if token.is_literal() || matches!(token, Token::Minus) => {
                parse_prefix(stream)?;
            }
            Some(Token::Ident(_) | Token::LParen) => {
                let parsed = types::parse_type(stream)?;
                if matches!(stream.peek(), Some(Token::LBrace)) {
                    stream.skip_balanced(&Token::LBrace, &Token::RBrace)?;
                }
                // designation: `is Exception ex`
                if matches!(stream.peek(), Some(Token::Ident(name)) if !matches!(&**name, "and" | "or")) {
                    stream.advance();
                }
                ty = Some(parsed);
            }
            other => {
                return Err(ParseError::unexpected_token(
                    other,
                    "in pattern",
                    stream.current_span(),
                ))
            }
        }
        match stream.peek() {
            Some(Token::Ident(name)) if matches!(&**name, "and" | "or") => {
                stream.advance();
                ty = None;
            }
            _ => break,
        }
    }
    Ok(ty)
}

/// Parse prefix expressions (unary operators, lambdas, special forms, atoms).
pub(super) fn parse_prefix(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    if lambda::at_lambda(stream) {
        return lambda::parse_lambda(stream);
    }

    let start = stream.current_pos();
    match stream.peek() {
        Some(Token::Await) => {
            stream.advance();
            let operand = parse_prefix(stream)?;
            Ok(Expr::new(
                ExprKind::Await(Box::new(operand)),
                stream.span_from(start),
            ))
        }
        Some(Token::Throw) => {
            stream.advance();
            let operand = super::parse_expr(stream)?;
            Ok(Expr::new(
                ExprKind::Throw(Box::new(operand)),
                stream.span_from(start),
            ))
        }
        Some(Token::DotDot) => {
            stream.advance();
            let end = if starts_operand(stream.peek()) {
                Some(Box::new(parse_pratt(stream, RELATIONAL_PREC + 2)?))
            } else {
                None
            };
            Ok(Expr::new(
                ExprKind::Range { start: None, end },
                stream.span_from(start),
            ))
        }
        Some(
            Token::Minus
            | Token::Plus
            | Token::Bang
            | Token::Tilde
            | Token::Caret
            | Token::PlusPlus
            | Token::MinusMinus,
        ) => parse_unary(stream),
        _ => parse_postfix(stream),
    }
}

/// Parse unary operators.
fn parse_unary(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let span = stream.current_span();
    let op = match stream.advance() {
        Some(Token::Minus) => UnaryOp::Neg,
        Some(Token::Plus) => UnaryOp::Plus,
        Some(Token::Bang) => UnaryOp::Not,
        Some(Token::Tilde) => UnaryOp::BitNot,
        Some(Token::Caret) => UnaryOp::Hat,
        Some(Token::PlusPlus) => UnaryOp::Increment,
        Some(Token::MinusMinus) => UnaryOp::Decrement,
        other => {
            return Err(ParseError::unexpected_token(other, "unary operator", span));
        }
    };

    let operand = parse_prefix(stream)?;
    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        stream.span_from(start),
    ))
}

/// Parse postfix expressions (member access, invocation, element access,
/// increments and the null-forgiving operator).
fn parse_postfix(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let mut expr = atoms::parse_atom(stream)?;

    loop {
        match stream.peek() {
            Some(Token::Dot | Token::QuestionDot) => {
                let conditional = matches!(stream.advance(), Some(Token::QuestionDot));
                let name = atoms::parse_simple_name(stream, "after '.'")?;
                expr = Expr::new(
                    ExprKind::MemberAccess {
                        target: Box::new(expr),
                        name,
                        conditional,
                    },
                    stream.span_from(start),
                );
            }
            Some(Token::LParen) => {
                let args = parse_call_args(stream, Token::LParen, Token::RParen)?;
                expr = Expr::new(
                    ExprKind::Invocation {
                        callee: Box::new(expr),
                        args,
                    },
                    stream.span_from(start),
                );
            }
            Some(Token::LBracket) => {
                let args = parse_call_args(stream, Token::LBracket, Token::RBracket)?;
                expr = Expr::new(
                    ExprKind::ElementAccess {
                        target: Box::new(expr),
                        args,
                    },
                    stream.span_from(start),
                );
            }
            Some(Token::PlusPlus | Token::MinusMinus) => {
                let op = match stream.advance() {
                    Some(Token::PlusPlus) => UnaryOp::Increment,
                    _ => UnaryOp::Decrement,
                };
                expr = Expr::new(
                    ExprKind::Postfix {
                        op,
                        operand: Box::new(expr),
                    },
                    stream.span_from(start),
                );
            }
            Some(Token::Bang) if null_forgiving_follows(stream) => {
                stream.advance();
                expr = Expr::new(
                    ExprKind::Postfix {
                        op: UnaryOp::Not,
                        operand: Box::new(expr),
                    },
                    stream.span_from(start),
                );
            }
            _ => break,
        }
    }

    Ok(expr)
}

/// A postfix `!` is the null-forgiving operator only when nothing can follow
/// it as an operand.
fn null_forgiving_follows(stream: &TokenStream) -> bool {
    matches!(
        stream.peek_nth(1),
        None | Some(
            Token::Dot
                | Token::QuestionDot
                | Token::RParen
                | Token::RBracket
                | Token::RBrace
                | Token::LBracket
                | Token::Comma
                | Token::Semi
                | Token::Colon
        )
    )
}

/// Parse a delimited argument list: `(a, name: b, out var c)`.
pub(super) fn parse_call_args(
    stream: &mut TokenStream,
    open: Token,
    close: Token,
) -> Result<Vec<Argument>, ParseError> {
    stream.expect(open)?;

    let mut args = Vec::new();
    while !stream.check(&close) {
        args.push(super::parse_argument(stream)?);

        if !stream.check(&close) {
            stream.expect(Token::Comma)?;
        }
    }

    stream.expect(close)?;
    Ok(args)
}
