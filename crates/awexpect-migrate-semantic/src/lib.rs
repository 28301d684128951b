// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Semantic model for the assertion migrator.
//!
//! The migrator asks a handful of type questions: is the subject a string or
//! a collection, is an argument a comparer or a tolerance, which overload of
//! an assertion method does a call bind to. [`SemanticModel`] is the seam for
//! those questions; [`DeclarationIndex`] answers them from the declarations
//! of a single file plus configured hints.
//!
//! Unknown is a normal answer. Callers fall back to the default rewrite when
//! a query returns `None`.

mod index;
mod members;
mod overloads;
mod types;

pub use index::DeclarationIndex;
pub use overloads::is_occurrence_constraint;
pub use types::TypeRef;

use awexpect_migrate_ast::{Argument, Expr};

/// An assertion call whose overload matters.
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'a> {
    /// `Should` for fluent assertion methods, `Assert` for xunit
    pub container: &'a str,
    /// Method name without type arguments
    pub method: &'a str,
    /// Arguments as written
    pub args: &'a [Argument],
}

/// Type queries over expressions of one source file.
pub trait SemanticModel {
    /// Static type of `expr`, or `None` when it cannot be determined.
    fn type_of(&self, expr: &Expr) -> Option<TypeRef>;

    /// Declared parameter types of the overload `call` binds to, one per
    /// positional argument. Named arguments are not included.
    fn parameter_types(&self, call: &CallSite<'_>) -> Option<Vec<TypeRef>>;

    /// Whether `expr` is known to be a collection.
    fn is_enumerable(&self, expr: &Expr) -> bool {
        self.type_of(expr).is_some_and(|ty| ty.is_enumerable())
    }

    /// Whether `expr` is known to be a string.
    fn is_string(&self, expr: &Expr) -> bool {
        self.type_of(expr).is_some_and(|ty| ty.is_string())
    }
}
