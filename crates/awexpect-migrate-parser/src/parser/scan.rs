//! Expression-region scanner.
//!
//! Finds every maximal parseable expression in a whole source file without
//! parsing statements or declarations. Starting from each token that could
//! begin an expression, the expression parser is tried; on success the scan
//! resumes after the expression, on failure it moves one token forward.
//! Lambda statement bodies and object initializers inside a found
//! expression are scanned recursively.

use super::{expr, TokenStream};
use awexpect_migrate_ast::{walk, Expr, Span};
use awexpect_migrate_lexer::Token;
use std::ops::Range;
use tracing::trace;

/// Scan a token stream for expressions.
///
/// Results from nested statement blocks come before the expression that
/// contains them; results never overlap.
pub fn scan_expressions(tokens: &[(Token, Range<usize>)]) -> Vec<Expr> {
    let mut found = Vec::new();
    scan_range(tokens, &mut found);
    found
}

fn scan_range(tokens: &[(Token, Range<usize>)], found: &mut Vec<Expr>) {
    let mut stream = TokenStream::new(tokens);
    let mut pos = 0;

    while pos < tokens.len() {
        if !may_start_at(tokens, pos) {
            pos += 1;
            continue;
        }

        stream.restore(pos);
        match expr::parse_expr(&mut stream) {
            Ok(parsed) => {
                for region in walk::opaque_regions(&parsed) {
                    if let Some(inner) = region_tokens(tokens, region) {
                        scan_range(&tokens[inner], found);
                    }
                }
                pos = stream.current_pos().max(pos + 1);
                found.push(parsed);
            }
            Err(err) => {
                trace!("no expression at token {}: {}", pos, err);
                pos += 1;
            }
        }
    }
}

/// Member names after `.`, `?.` or `::` continue an expression, never start one.
fn may_start_at(tokens: &[(Token, Range<usize>)], pos: usize) -> bool {
    let continues = pos > 0
        && matches!(
            tokens[pos - 1].0,
            Token::Dot | Token::QuestionDot | Token::ColonColon
        );
    !continues && expr::starts_expression(Some(&tokens[pos].0))
}

/// Token range strictly inside a brace-delimited region.
fn region_tokens(tokens: &[(Token, Range<usize>)], region: Span) -> Option<Range<usize>> {
    let open = tokens
        .iter()
        .position(|(_, range)| range.start >= region.start as usize)?;
    let close = tokens
        .iter()
        .rposition(|(_, range)| range.end <= region.end as usize)?;
    (open < close).then_some(open + 1..close)
}
