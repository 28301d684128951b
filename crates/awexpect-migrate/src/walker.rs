//! Call-chain walker.
//!
//! A fluent site such as `subject.Should().Contain(1).And.Contain(2)` is a
//! spine of invocations and member accesses. [`walk_fluent`] folds that
//! spine into the receiver of `.Should()` plus the calls above it,
//! innermost first. Arguments are never entered, so an assertion inside a
//! lambda argument stays part of the argument text.

use awexpect_migrate_ast::{Argument, Expr, ExprKind, SimpleName, Span};
use tracing::trace;

use crate::report::SkipReason;

/// One step of a fluent chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallNode<'a> {
    /// `.Name<T>(args)`
    Call {
        name: &'a SimpleName,
        args: &'a [Argument],
        span: Span,
    },
    /// Non-invoked member such as `.And`.
    Connector { name: &'a SimpleName },
}

impl<'a> CallNode<'a> {
    /// Member name of this step.
    pub fn name(&self) -> &'a str {
        match self {
            CallNode::Call { name, .. } | CallNode::Connector { name } => &name.ident,
        }
    }
}

/// The receiver of `.Should()` and the calls chained after it.
#[derive(Debug, Clone, PartialEq)]
pub struct CallChain<'a> {
    /// Expression under test, outer parentheses removed.
    pub subject: &'a Expr,
    /// Innermost first: `nodes[0]` is the entry assertion.
    pub nodes: Vec<CallNode<'a>>,
}

/// Whether `expr` is the zero-argument `.Should()` entry call.
fn should_receiver(expr: &Expr) -> Option<&Expr> {
    let ExprKind::Invocation { callee, args } = &expr.kind else {
        return None;
    };
    let ExprKind::MemberAccess { target, name, .. } = &callee.kind else {
        return None;
    };
    (name.ident == "Should" && !name.is_generic() && args.is_empty()).then_some(target.as_ref())
}

/// Whether the receiver spine of `expr` contains a `.Should()` call.
pub fn has_fluent_entry(expr: &Expr) -> bool {
    if should_receiver(expr).is_some() {
        return true;
    }
    match &expr.kind {
        ExprKind::Invocation { callee, .. } => match &callee.kind {
            ExprKind::MemberAccess { target, .. } => has_fluent_entry(target),
            _ => false,
        },
        ExprKind::MemberAccess { target, .. } => has_fluent_entry(target),
        _ => false,
    }
}

/// Fold a fluent site into its subject and call chain.
pub fn walk_fluent(site: &Expr) -> Result<CallChain<'_>, SkipReason> {
    let chain = fold(site)?;
    if chain.nodes.is_empty() {
        trace!("bare .Should() without an assertion");
        return Err(SkipReason::UnsupportedChain);
    }
    Ok(chain)
}

fn fold(expr: &Expr) -> Result<CallChain<'_>, SkipReason> {
    if let Some(receiver) = should_receiver(expr) {
        return Ok(CallChain {
            subject: receiver.strip_parens(),
            nodes: Vec::new(),
        });
    }
    match &expr.kind {
        ExprKind::Paren(inner) => fold(inner),
        ExprKind::Invocation { callee, args } => {
            let ExprKind::MemberAccess { target, name, .. } = &callee.kind else {
                return Err(SkipReason::MissingSubject);
            };
            let mut chain = fold(target)?;
            chain.nodes.push(CallNode::Call {
                name,
                args,
                span: expr.span,
            });
            Ok(chain)
        }
        ExprKind::MemberAccess { target, name, .. } => {
            let mut chain = fold(target)?;
            chain.nodes.push(CallNode::Connector { name });
            Ok(chain)
        }
        _ => Err(SkipReason::MissingSubject),
    }
}

/// An `Assert.Verb(args)` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XunitCall<'a> {
    pub method: &'a SimpleName,
    pub args: &'a [Argument],
}

/// Split an xunit site into its method and arguments.
pub fn walk_xunit(site: &Expr) -> Result<XunitCall<'_>, SkipReason> {
    let ExprKind::Invocation { callee, args } = &site.strip_parens().kind else {
        return Err(SkipReason::UnsupportedChain);
    };
    match &callee.kind {
        ExprKind::MemberAccess { name, .. } => Ok(XunitCall { method: name, args }),
        _ => Err(SkipReason::UnsupportedChain),
    }
}

/// Index of the "actual" argument: the second, or the only one.
pub fn actual_index(positional: usize) -> Option<usize> {
    match positional {
        0 => None,
        1 => Some(0),
        _ => Some(1),
    }
}
