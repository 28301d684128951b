//! Text splicing.
//!
//! Replacements are checked by re-parsing them as an expression, then
//! applied back to front so earlier spans stay valid. Surrounding
//! whitespace and comments lie outside every span and are kept as written.

use awexpect_migrate_ast::Span;
use awexpect_migrate_parser::parse_expression;
use tracing::debug;

use crate::report::SkipReason;

/// Replace the text of `span` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: Span,
    pub replacement: String,
}

/// Accept `replacement` only if it parses as exactly one expression.
pub fn validate(replacement: &str) -> Result<(), SkipReason> {
    parse_expression(replacement).map(|_| ()).map_err(|err| {
        debug!("rewritten text does not parse: {err}");
        SkipReason::Reparse
    })
}

/// Split `items` into those whose spans can be replaced together and those
/// that overlap an earlier one.
pub fn select<T>(items: Vec<T>, span_of: impl Fn(&T) -> Span) -> (Vec<T>, Vec<T>) {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();
    for item in items {
        let span = span_of(&item);
        if kept.iter().any(|other| span_of(other).overlaps(&span)) {
            rejected.push(item);
        } else {
            kept.push(item);
        }
    }
    (kept, rejected)
}

/// Apply non-overlapping `edits` to `source`.
pub fn apply(source: &str, edits: &[Edit]) -> String {
    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|edit| std::cmp::Reverse(edit.span.start));

    let mut output = source.to_string();
    for edit in ordered {
        output.replace_range(edit.span.range(), &edit.replacement);
    }
    output
}
