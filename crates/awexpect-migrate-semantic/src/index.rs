//! Declaration index: a [`SemanticModel`] built from one source file.
//!
//! Types come from, in order: configured type hints, literal and creation
//! syntax, declarations in the same file (the nearest declaration before the
//! use wins, `var` follows its initializer), and the well-known member
//! tables. Anything else is unknown.

use crate::members::{member_type, method_result_type};
use crate::overloads;
use crate::types::TypeRef;
use crate::{CallSite, SemanticModel};
use awexpect_migrate_ast::{BinaryOp, Expr, ExprKind, LambdaBody, LiteralKind, TypeTestOp};
use awexpect_migrate_parser::{local_declarations, LocalDeclaration, Token};
use indexmap::IndexMap;
use std::ops::Range;
use tracing::trace;

/// Limit for following `var` initializers through other `var`s.
const MAX_INFERENCE_DEPTH: usize = 8;

/// Declarations and type hints for one source file.
#[derive(Debug)]
pub struct DeclarationIndex<'a> {
    source: &'a str,
    hints: &'a IndexMap<String, String>,
    /// Sorted by declaration position.
    declarations: Vec<LocalDeclaration>,
}

impl<'a> DeclarationIndex<'a> {
    /// Index the declarations in `tokens`, which must be the tokens of `source`.
    pub fn build(
        source: &'a str,
        tokens: &[(Token, Range<usize>)],
        hints: &'a IndexMap<String, String>,
    ) -> Self {
        let mut declarations = local_declarations(tokens);
        declarations.sort_by_key(|decl| decl.name_span.start);
        trace!("indexed {} declarations", declarations.len());
        Self {
            source,
            hints,
            declarations,
        }
    }

    /// All indexed declarations in source order.
    pub fn declarations(&self) -> &[LocalDeclaration] {
        &self.declarations
    }

    /// The declaration `name` refers to at byte offset `at`.
    ///
    /// The nearest declaration before `at` wins; a name used before any
    /// declaration (a field declared further down) falls back to the first.
    pub fn lookup(&self, name: &str, at: u32) -> Option<&LocalDeclaration> {
        let matching = self.declarations.iter().filter(|decl| decl.name == name);
        let first = matching.clone().next();
        matching
            .filter(|decl| decl.name_span.start < at)
            .last()
            .or(first)
    }

    fn hint(&self, key: &str) -> Option<TypeRef> {
        self.hints.get(key).map(TypeRef::new)
    }

    fn declared_type(&self, name: &str, at: u32, depth: usize) -> Option<TypeRef> {
        let decl = self.lookup(name, at)?;
        match (&decl.ty, &decl.initializer) {
            (Some(ty), _) => Some(TypeRef::new(&ty.name)),
            (None, Some(init)) => self.infer(init, depth + 1),
            (None, None) => None,
        }
    }

    fn infer(&self, expr: &Expr, depth: usize) -> Option<TypeRef> {
        if depth > MAX_INFERENCE_DEPTH {
            return None;
        }

        match &expr.kind {
            ExprKind::Literal(lit) => literal_type(lit.kind),
            ExprKind::Name(name) => self
                .hint(&name.ident)
                .or_else(|| self.declared_type(&name.ident, expr.span.start, depth)),
            ExprKind::Paren(inner) => self.infer(inner, depth),
            ExprKind::MemberAccess { target, name, .. } => {
                if let Some(ty) = self.hint(expr.text(self.source)).or_else(|| self.hint(&name.ident)) {
                    return Some(ty);
                }
                let target_path = target.dotted_path().map(|_| target.text(self.source));
                if let Some(ty) = member_type(target_path, &name.ident) {
                    return Some(ty);
                }
                if matches!(target.kind, ExprKind::This | ExprKind::Base) {
                    return self.declared_type(&name.ident, expr.span.start, depth);
                }
                None
            }
            ExprKind::Invocation { callee, .. } => match &callee.kind {
                ExprKind::MemberAccess { target, name, .. } => {
                    let target_path = target.dotted_path().map(|_| target.text(self.source));
                    let receiver = self.infer(target, depth + 1);
                    method_result_type(target_path, &name.ident, receiver.as_ref())
                }
                _ => None,
            },
            ExprKind::ElementAccess { target, .. } => {
                let container = self.infer(target, depth + 1)?;
                if container.is_string() {
                    return Some(TypeRef::new("char"));
                }
                match container.base_name() {
                    "Dictionary" | "IDictionary" | "IReadOnlyDictionary" | "SortedDictionary" => {
                        container.type_args().into_iter().nth(1)
                    }
                    _ => container.element_type(),
                }
            }
            ExprKind::Lambda { body, .. } => Some(TypeRef::new(match body {
                LambdaBody::Expr(_) => "Func<object>",
                LambdaBody::Block(_) => "Action",
            })),
            ExprKind::Cast { ty, .. } => Some(TypeRef::new(&ty.name)),
            ExprKind::TypeTest { op, ty, .. } => match op {
                TypeTestOp::Is => Some(TypeRef::new("bool")),
                TypeTestOp::As => ty.as_ref().map(|ty| TypeRef::new(&ty.name)),
            },
            ExprKind::New { ty, .. } => ty.as_ref().map(|ty| TypeRef::new(&ty.name)),
            ExprKind::Collection(_) => Some(TypeRef::new("[]")),
            ExprKind::TypeOf(_) => Some(TypeRef::new("Type")),
            ExprKind::Default(ty) => ty.as_ref().map(|ty| TypeRef::new(&ty.name)),
            ExprKind::Unary { operand, .. } | ExprKind::Postfix { operand, .. } => {
                self.infer(operand, depth)
            }
            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::And
                | BinaryOp::Or => Some(TypeRef::new("bool")),
                BinaryOp::Coalesce | BinaryOp::Assign => self.infer(left, depth),
                BinaryOp::Add => {
                    let lhs = self.infer(left, depth);
                    let rhs = self.infer(right, depth);
                    if lhs.as_ref().is_some_and(TypeRef::is_string)
                        || rhs.as_ref().is_some_and(TypeRef::is_string)
                    {
                        Some(TypeRef::new("string"))
                    } else {
                        lhs.or(rhs)
                    }
                }
                _ => self.infer(left, depth).or_else(|| self.infer(right, depth)),
            },
            ExprKind::Conditional {
                then_branch,
                else_branch,
                ..
            } => self
                .infer(then_branch, depth)
                .or_else(|| self.infer(else_branch, depth)),
            ExprKind::Declaration { ty, .. } if ty.name != "var" => Some(TypeRef::new(&ty.name)),
            ExprKind::Declaration { .. }
            | ExprKind::This
            | ExprKind::Base
            | ExprKind::Await(_)
            | ExprKind::Throw(_)
            | ExprKind::Tuple(_)
            | ExprKind::Range { .. } => None,
        }
    }
}

fn literal_type(kind: LiteralKind) -> Option<TypeRef> {
    let name = match kind {
        LiteralKind::Integer => "int",
        LiteralKind::Real => "double",
        LiteralKind::String | LiteralKind::InterpolatedString => "string",
        LiteralKind::Char => "char",
        LiteralKind::Bool => "bool",
        LiteralKind::Null => return None,
    };
    Some(TypeRef::new(name))
}

impl SemanticModel for DeclarationIndex<'_> {
    fn type_of(&self, expr: &Expr) -> Option<TypeRef> {
        self.infer(expr, 0)
    }

    fn parameter_types(&self, call: &CallSite<'_>) -> Option<Vec<TypeRef>> {
        let positional: Vec<&Expr> = call
            .args
            .iter()
            .filter(|arg| arg.name.is_none())
            .map(|arg| &arg.expr)
            .collect();
        overloads::resolve(call.container, call.method, &positional, |expr| {
            self.type_of(expr)
        })
    }
}
