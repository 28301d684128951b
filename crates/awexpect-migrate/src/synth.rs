//! Expression synthesizer.
//!
//! Output grammar:
//!
//! ```text
//! Expect.That(subject).Verb(args)[.Modifier(args)]*[.Because(reason)][.And.Verb(args)...]
//! ```
//!
//! optionally wrapped in the synchronous adapter when the site is the body
//! of an expression lambda. Each `.And` segment carries its own reason.

use awexpect_migrate_ast::{Argument, Expr, ExprKind, LiteralKind, SimpleName};
use awexpect_migrate_semantic::SemanticModel;
use tracing::trace;

use crate::catalog::{self, Library, SubjectArg};
use crate::config::MigrationConfig;
use crate::detect::Site;
use crate::report::SkipReason;
use crate::resolver::{self, positional, Shape};
use crate::walker::{self, CallNode};

/// Rewritten text for `site`, or why it cannot be rewritten.
pub fn synthesize(
    site: &Site<'_>,
    source: &str,
    model: &dyn SemanticModel,
    config: &MigrationConfig,
) -> Result<String, SkipReason> {
    let (text, has_subject) = match site.library {
        Library::FluentAssertions => (fluent(site.expr, source, model)?, true),
        Library::Xunit => xunit(site.expr, source, model)?,
    };
    if site.wrap && has_subject {
        Ok(format!("{}({text})", config.sync_adapter))
    } else {
        Ok(text)
    }
}

fn fluent(expr: &Expr, source: &str, model: &dyn SemanticModel) -> Result<String, SkipReason> {
    let chain = walker::walk_fluent(expr)?;
    if let Some(connector) = chain.nodes.iter().find(|node| {
        matches!(node, CallNode::Connector { name } if name.ident != "And")
    }) {
        trace!("unsupported connector .{}", connector.name());
        return Err(SkipReason::UnsupportedChain);
    }

    let mut out = format!("Expect.That({})", chain.subject.text(source));
    for (index, segment) in chain
        .nodes
        .split(|node| matches!(node, CallNode::Connector { .. }))
        .enumerate()
    {
        if index > 0 {
            out.push_str(".And");
        }
        out.push_str(&segment_text(segment, chain.subject, source, model)?);
    }
    Ok(out)
}

/// One assertion with its modifiers and reason.
fn segment_text(
    segment: &[CallNode<'_>],
    subject: &Expr,
    source: &str,
    model: &dyn SemanticModel,
) -> Result<String, SkipReason> {
    let Some((CallNode::Call { name, args, .. }, modifiers)) = segment.split_first() else {
        return Err(SkipReason::UnsupportedChain);
    };
    let rule = catalog::lookup(Library::FluentAssertions, &name.ident).ok_or_else(|| {
        trace!("no rule for {}", name.ident);
        SkipReason::NoCatalogEntry
    })?;
    let shape = resolver::resolve(rule, Library::FluentAssertions, name, args, Some(subject), source, model)?;
    let Piece { mut text, mut reason } = render(&shape, name, args, source, None)?;

    for modifier in modifiers {
        let CallNode::Call { name, args, .. } = modifier else {
            return Err(SkipReason::UnsupportedChain);
        };
        let rule = catalog::modifier(&name.ident).ok_or_else(|| {
            trace!("unsupported modifier {}", name.ident);
            SkipReason::UnsupportedChain
        })?;
        let shape = resolver::resolve(rule, Library::FluentAssertions, name, args, None, source, model)?;
        let piece = render(&shape, name, args, source, None)?;
        text.push_str(&piece.text);
        if piece.reason.is_some() {
            if reason.is_some() {
                return Err(SkipReason::UnsupportedChain);
            }
            reason = piece.reason;
        }
    }

    if let Some(reason) = reason {
        text.push_str(&format!(".Because({reason})"));
    }
    Ok(text)
}

/// Rewritten xunit call, and whether it asserts about a subject.
fn xunit(expr: &Expr, source: &str, model: &dyn SemanticModel) -> Result<(String, bool), SkipReason> {
    let call = walker::walk_xunit(expr)?;
    if call.args.iter().any(|arg| arg.name.is_some()) {
        return Err(SkipReason::UnsupportedChain);
    }
    let rule = catalog::lookup(Library::Xunit, &call.method.ident).ok_or(SkipReason::NoCatalogEntry)?;
    let shape = resolver::resolve(rule, Library::Xunit, call.method, call.args, None, source, model)?;

    let values = positional(call.args);
    let subject = match shape.subject {
        SubjectArg::Actual => Some(walker::actual_index(values.len()).ok_or(SkipReason::MissingSubject)?),
        SubjectArg::First if values.is_empty() => return Err(SkipReason::MissingSubject),
        SubjectArg::First => Some(0),
        SubjectArg::None => None,
    };

    let Piece { text, reason } = render(&shape, call.method, call.args, source, subject)?;
    let mut out = match subject {
        Some(index) => format!("Expect.That({}){text}", values[index].text(source)),
        None => text,
    };
    if let Some(reason) = reason {
        out.push_str(&format!(".Because({reason})"));
    }
    Ok((out, subject.is_some()))
}

/// Rendered template text and formatted reason.
struct Piece {
    text: String,
    reason: Option<String>,
}

/// Arguments that format a reason.
enum ReasonArgs<'a> {
    Listed(Vec<&'a Expr>),
    /// `becauseArgs: someArray`
    Array(&'a Expr),
}

/// Fill `shape` with the arguments of one call.
///
/// Every positional argument must be used by the template, the subject,
/// the resolver, or the reason; otherwise the call has a shape the rule does
/// not describe.
fn render(
    shape: &Shape,
    method: &SimpleName,
    args: &[Argument],
    source: &str,
    subject: Option<usize>,
) -> Result<Piece, SkipReason> {
    let values = positional(args);

    let mut named_reason = None;
    let mut named_args = None;
    for arg in args {
        match arg.name.as_deref() {
            None => {}
            Some("because") => named_reason = Some(&arg.expr),
            Some("becauseArgs") => named_args = Some(&arg.expr),
            Some(other) => {
                trace!("unsupported named argument {other}");
                return Err(SkipReason::UnsupportedChain);
            }
        }
    }

    let value_count = shape.because.map_or(values.len(), |index| index.min(values.len()));
    let positional_reason = shape
        .because
        .filter(|index| *index < values.len())
        .map(|index| (values[index], values[index + 1..].to_vec()));

    let reason = match (positional_reason, named_reason) {
        (Some(_), Some(_)) => return Err(SkipReason::UnsupportedChain),
        (Some((reason, extras)), None) => {
            if named_args.is_some() {
                return Err(SkipReason::UnsupportedChain);
            }
            Some(format_reason(reason, ReasonArgs::Listed(extras), source))
        }
        (None, Some(reason)) if shape.because.is_some() => {
            let extras = match named_args.map(Expr::strip_parens) {
                None => ReasonArgs::Listed(Vec::new()),
                Some(Expr {
                    kind: ExprKind::Collection(elements),
                    ..
                }) => ReasonArgs::Listed(elements.iter().collect()),
                Some(array) => ReasonArgs::Array(array),
            };
            Some(format_reason(reason, extras, source))
        }
        (None, Some(_)) => return Err(SkipReason::UnsupportedChain),
        (None, None) if named_args.is_some() => return Err(SkipReason::UnsupportedChain),
        (None, None) => None,
    };

    let mut used = vec![false; value_count];
    for index in shape.absorbed.iter().copied().chain(subject) {
        if let Some(slot) = used.get_mut(index) {
            *slot = true;
        }
    }

    let text = expand(&shape.text, &values[..value_count], &mut used, method, source)?;
    if used.iter().any(|used| !used) {
        trace!("{} has arguments the rule does not use", method.ident);
        return Err(SkipReason::UnsupportedChain);
    }
    Ok(Piece { text, reason })
}

/// Expand `{n}`, `{*}` and `{T}` placeholders.
fn expand(
    template: &str,
    values: &[&Expr],
    used: &mut [bool],
    method: &SimpleName,
    source: &str,
) -> Result<String, SkipReason> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let close = tail.find('}').ok_or(SkipReason::UnsupportedChain)?;
        match &tail[1..close] {
            "*" => {
                let all: Vec<&str> = values.iter().map(|expr| expr.text(source)).collect();
                out.push_str(&all.join(", "));
                used.iter_mut().for_each(|slot| *slot = true);
            }
            "T" => {
                let type_args: Vec<&str> = method.type_args.iter().map(|ty| ty.span.text(source)).collect();
                if type_args.is_empty() {
                    return Err(SkipReason::UnsupportedChain);
                }
                out.push_str(&type_args.join(", "));
            }
            index => {
                let index: usize = index.parse().map_err(|_| SkipReason::UnsupportedChain)?;
                let value = values.get(index).ok_or(SkipReason::UnsupportedChain)?;
                out.push_str(value.text(source));
                used[index] = true;
            }
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Reason text with its format arguments applied.
///
/// A plain string literal becomes an interpolated string with each format
/// item replaced by its argument; anything else goes through
/// `string.Format`.
fn format_reason(reason: &Expr, args: ReasonArgs<'_>, source: &str) -> String {
    let text = reason.text(source);
    match args {
        ReasonArgs::Listed(extras) if extras.is_empty() => text.to_string(),
        ReasonArgs::Listed(extras) => {
            let holes: Vec<String> = extras.iter().map(|expr| hole_text(expr, source)).collect();
            let plain_literal = reason.literal_kind() == Some(LiteralKind::String) && !text.starts_with("\"\"\"");
            plain_literal
                .then(|| interpolate(text, &holes))
                .flatten()
                .unwrap_or_else(|| {
                    let extras: Vec<&str> = extras.iter().map(|expr| expr.text(source)).collect();
                    format!("string.Format({text}, {})", extras.join(", "))
                })
        }
        ReasonArgs::Array(array) => format!("string.Format({text}, {})", array.text(source)),
    }
}

/// Argument text usable inside an interpolation hole.
fn hole_text(expr: &Expr, source: &str) -> String {
    let text = expr.text(source);
    if text.contains(':') || matches!(expr.kind, ExprKind::Conditional { .. } | ExprKind::Lambda { .. }) {
        format!("({text})")
    } else {
        text.to_string()
    }
}

/// `"a {0} {1:F2}"` with holes `[x, y]` → `$"a {x} {y:F2}"`.
///
/// Returns `None` for malformed format strings and out-of-range indices.
fn interpolate(literal: &str, holes: &[String]) -> Option<String> {
    let mut out = String::with_capacity(literal.len() + 8);
    out.push('$');
    let mut rest = literal;
    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..2]);
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            return None;
        }
        let close = tail.find('}')?;
        let item = &tail[1..close];
        let digits = item.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(item.len());
        let index: usize = item[..digits].parse().ok()?;
        let suffix = &item[digits..];
        if !(suffix.is_empty() || suffix.starts_with(',') || suffix.starts_with(':')) {
            return None;
        }
        out.push('{');
        out.push_str(holes.get(index)?);
        out.push_str(suffix);
        out.push('}');
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    Some(out)
}
