//! Candidate site detector.
//!
//! Flags the outermost fluent chain rooted at `.Should()` and every
//! `Assert.Verb(...)` call. A candidate nested in the arguments of another
//! candidate is left for a later pass.

use awexpect_migrate_ast::walk::children;
use awexpect_migrate_ast::{Expr, ExprKind, LambdaBody, Span};
use awexpect_migrate_parser::UsingDirective;
use serde::Serialize;

use crate::catalog::Library;
use crate::config::MigrationConfig;
use crate::walker::has_fluent_entry;

/// One flagged call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site<'a> {
    pub library: Library,
    /// Node to replace.
    pub expr: &'a Expr,
    /// Reported span: the enclosing lambda for wrapped sites.
    pub span: Span,
    /// Whether the rewrite is wrapped in the synchronous adapter.
    pub wrap: bool,
}

/// A flagged site as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub id: &'static str,
    pub library: Library,
    pub span: Span,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(site: &Site<'_>, source: &str) -> Self {
        let (line, column) = site.span.line_col(source);
        let message = match site.library {
            Library::FluentAssertions => "FluentAssertions assertion can be migrated to aweXpect",
            Library::Xunit => "xunit assertion can be migrated to aweXpect",
        };
        Self {
            id: site.library.diagnostic_id(),
            library: site.library,
            span: site.span,
            line,
            column,
            message: message.to_string(),
        }
    }
}

/// Which entry points count in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detector {
    fluent: bool,
    xunit: bool,
    /// Bare `Assert.` is accepted; `Xunit.Assert.` always is.
    bare_assert: bool,
}

impl Detector {
    pub fn new(config: &MigrationConfig, usings: &[UsingDirective]) -> Self {
        let imports = |namespace: &str| {
            !config.require_usings
                || usings
                    .iter()
                    .any(|using| !using.is_static && using.alias.is_none() && using.target == namespace)
        };
        Self {
            fluent: config.sources.fluent_assertions && imports("FluentAssertions"),
            xunit: config.sources.xunit,
            bare_assert: imports("Xunit"),
        }
    }

    /// Sites in `exprs`, in source order.
    pub fn find_sites<'a>(&self, exprs: &'a [Expr]) -> Vec<Site<'a>> {
        let mut sites = Vec::new();
        for expr in exprs {
            self.visit(expr, &mut sites);
        }
        sites.sort_by_key(|site| site.span);
        sites
    }

    fn visit<'a>(&self, expr: &'a Expr, sites: &mut Vec<Site<'a>>) {
        if let ExprKind::Lambda {
            params,
            body: LambdaBody::Expr(body),
            is_async: false,
        } = &expr.kind
        {
            // only `() => assertion` is wrapped; with parameters the body is
            // migrated in place
            if params.is_empty() {
                if let Some(library) = self.classify(body) {
                    sites.push(Site {
                        library,
                        expr: body,
                        span: expr.span,
                        wrap: true,
                    });
                    return;
                }
            }
        }
        if let Some(library) = self.classify(expr) {
            sites.push(Site {
                library,
                expr,
                span: expr.span,
                wrap: false,
            });
            return;
        }
        for child in children(expr) {
            self.visit(child, sites);
        }
    }

    fn classify(&self, expr: &Expr) -> Option<Library> {
        if self.fluent && has_fluent_entry(expr) {
            return Some(Library::FluentAssertions);
        }
        (self.xunit && self.is_assert_call(expr)).then_some(Library::Xunit)
    }

    fn is_assert_call(&self, expr: &Expr) -> bool {
        let ExprKind::Invocation { callee, .. } = &expr.kind else {
            return false;
        };
        let Some(path) = callee.dotted_path() else {
            return false;
        };
        match path.rsplit_once('.').map(|(container, _)| container) {
            Some("Assert") => self.bare_assert,
            Some("Xunit.Assert" | "global::Xunit.Assert") => true,
            _ => false,
        }
    }
}
