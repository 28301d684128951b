//! Overload table for the assertion methods whose argument meaning depends
//! on the overload the compiler would pick.
//!
//! Each candidate signature is scored against the positional arguments of a
//! call: a known mismatch rejects the signature, a known match scores a
//! point, an unknown argument type is neutral. The highest score wins and
//! ties go to the earlier signature, so each list is ordered with the
//! overload to assume for untyped arguments first.

use crate::types::TypeRef;
use awexpect_migrate_ast::{Expr, ExprKind};
use std::collections::HashMap;
use std::sync::LazyLock;

/// What an argument must look like to bind to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamKind {
    /// Binds anything
    Any,
    /// Lambda or delegate-typed value
    Delegate,
    /// String-typed value
    Text,
    /// Collection-typed value
    Enumerable,
    /// `IComparer` / `IEqualityComparer`
    Comparer,
    /// `AtLeast.Once()` and friends
    Occurrence,
    /// Numeric or `TimeSpan` precision
    Tolerance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Required,
    Optional,
    Rest,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Param {
    kind: ParamKind,
    ty: &'static str,
    arity: Arity,
}

const fn req(kind: ParamKind, ty: &'static str) -> Param {
    Param {
        kind,
        ty,
        arity: Arity::Required,
    }
}

const fn opt(kind: ParamKind, ty: &'static str) -> Param {
    Param {
        kind,
        ty,
        arity: Arity::Optional,
    }
}

const fn rest(kind: ParamKind, ty: &'static str) -> Param {
    Param {
        kind,
        ty,
        arity: Arity::Rest,
    }
}

use ParamKind::*;

const BECAUSE: Param = opt(Text, "string");
const BECAUSE_ARGS: Param = rest(Any, "object[]");

// An untyped single argument is more likely a predicate than a reason.
const CONTAIN_SINGLE: &[&[Param]] = &[
    &[req(Delegate, "Expression<Func<T, bool>>"), BECAUSE, BECAUSE_ARGS],
    &[BECAUSE, BECAUSE_ARGS],
];

const ONE_OF: &[&[Param]] = &[
    &[req(Enumerable, "IEnumerable<T>"), BECAUSE, BECAUSE_ARGS],
    &[rest(Any, "T[]")],
];

const ORDERING: &[&[Param]] = &[
    &[req(Comparer, "IComparer<T>"), BECAUSE, BECAUSE_ARGS],
    &[
        req(Delegate, "Expression<Func<T, TSelector>>"),
        req(Comparer, "IComparer<TSelector>"),
        BECAUSE,
        BECAUSE_ARGS,
    ],
    &[req(Delegate, "Expression<Func<T, TSelector>>"), BECAUSE, BECAUSE_ARGS],
    &[BECAUSE, BECAUSE_ARGS],
];

const CONTAIN: &[&[Param]] = &[
    &[
        req(Any, "string"),
        req(Occurrence, "OccurrenceConstraint"),
        BECAUSE,
        BECAUSE_ARGS,
    ],
    &[req(Enumerable, "IEnumerable<T>"), BECAUSE, BECAUSE_ARGS],
    &[req(Delegate, "Expression<Func<T, bool>>"), BECAUSE, BECAUSE_ARGS],
    &[req(Any, "T"), BECAUSE, BECAUSE_ARGS],
];

const HAVE_VALUE: &[&[Param]] = &[
    &[req(Any, "TValue"), BECAUSE, BECAUSE_ARGS],
    &[BECAUSE, BECAUSE_ARGS],
];

const EQUIVALENT: &[&[Param]] = &[
    &[
        req(Any, "TExpectation"),
        req(Delegate, "Func<EquivalencyOptions<TExpectation>, EquivalencyOptions<TExpectation>>"),
        BECAUSE,
        BECAUSE_ARGS,
    ],
    &[req(Any, "TExpectation"), BECAUSE, BECAUSE_ARGS],
];

const ASSERT_CONTAINS: &[&[Param]] = &[
    &[req(Any, "T"), req(Enumerable, "IEnumerable<T>")],
    &[req(Text, "string"), req(Text, "string")],
    &[req(Enumerable, "IEnumerable<T>"), req(Delegate, "Predicate<T>")],
    &[req(Any, "TKey"), req(Any, "IDictionary<TKey, TValue>")],
];

const ASSERT_EQUAL: &[&[Param]] = &[
    &[req(Any, "T"), req(Any, "T")],
    &[req(Any, "double"), req(Any, "double"), req(Tolerance, "double")],
    &[req(Any, "T"), req(Any, "T"), req(Comparer, "IEqualityComparer<T>")],
];

const ASSERT_SINGLE: &[&[Param]] = &[
    &[req(Enumerable, "IEnumerable<T>")],
    &[req(Enumerable, "IEnumerable<T>"), req(Any, "object")],
    &[req(Enumerable, "IEnumerable<T>"), req(Delegate, "Predicate<T>")],
];

/// Candidate signatures keyed by `(container, method)`. Fluent assertion
/// methods live under `Should`, xunit methods under `Assert`.
static OVERLOADS: LazyLock<HashMap<(&'static str, &'static str), &'static [&'static [Param]]>> =
    LazyLock::new(|| {
        let mut m: HashMap<(&'static str, &'static str), &'static [&'static [Param]]> = HashMap::new();

        m.insert(("Should", "ContainSingle"), CONTAIN_SINGLE);
        m.insert(("Should", "BeOneOf"), ONE_OF);
        m.insert(("Should", "ContainInOrder"), ONE_OF);
        m.insert(("Should", "ContainInConsecutiveOrder"), ONE_OF);
        for method in [
            "BeInAscendingOrder",
            "NotBeInAscendingOrder",
            "BeInDescendingOrder",
            "NotBeInDescendingOrder",
        ] {
            m.insert(("Should", method), ORDERING);
        }
        m.insert(("Should", "Contain"), CONTAIN);
        m.insert(("Should", "HaveValue"), HAVE_VALUE);
        m.insert(("Should", "NotHaveValue"), HAVE_VALUE);
        for method in ["BeEquivalentTo", "NotBeEquivalentTo", "AllBeEquivalentTo"] {
            m.insert(("Should", method), EQUIVALENT);
        }

        m.insert(("Assert", "Contains"), ASSERT_CONTAINS);
        m.insert(("Assert", "DoesNotContain"), ASSERT_CONTAINS);
        m.insert(("Assert", "Equal"), ASSERT_EQUAL);
        m.insert(("Assert", "NotEqual"), ASSERT_EQUAL);
        m.insert(("Assert", "Single"), ASSERT_SINGLE);

        m
    });

/// How one argument relates to one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fit {
    Yes,
    No,
    Unknown,
}

/// Syntactic occurrence constraint: `AtLeast.Once()`, `Exactly.Times(3)`.
pub fn is_occurrence_constraint(expr: &Expr) -> bool {
    let ExprKind::Invocation { callee, .. } = &expr.kind else {
        return false;
    };
    let ExprKind::MemberAccess { target, name, .. } = &callee.kind else {
        return false;
    };
    let quantifier = target.dotted_path();
    let quantifier = quantifier.as_deref().map(|path| path.rsplit('.').next().unwrap_or(path));
    matches!(
        quantifier,
        Some("AtLeast" | "AtMost" | "Exactly" | "LessThan" | "MoreThan")
    ) && matches!(name.ident.as_str(), "Once" | "Twice" | "Thrice" | "Times")
}

fn fit(kind: ParamKind, expr: &Expr, ty: Option<&TypeRef>) -> Fit {
    let expr = expr.strip_parens();
    let known = |check: fn(&TypeRef) -> bool| match ty {
        Some(ty) if check(ty) => Fit::Yes,
        Some(_) => Fit::No,
        None => Fit::Unknown,
    };

    match kind {
        Any => Fit::Unknown,
        Occurrence => {
            if is_occurrence_constraint(expr) {
                Fit::Yes
            } else {
                Fit::No
            }
        }
        _ if expr.is_lambda() => {
            if kind == Delegate {
                Fit::Yes
            } else {
                Fit::No
            }
        }
        Delegate => known(TypeRef::is_delegate),
        Text => known(TypeRef::is_string),
        Enumerable => known(TypeRef::is_enumerable),
        Comparer => known(TypeRef::is_comparer),
        Tolerance => {
            if expr.is_numeric_literal() {
                Fit::Yes
            } else {
                known(|ty| {
                    ty.is_floating()
                        || ty.is_time_span()
                        || matches!(ty.base_name(), "int" | "long" | "Int32" | "Int64")
                })
            }
        }
    }
}

/// Pick the parameter types bound to each positional argument.
///
/// `type_of` supplies argument types; `None` means unknown, never "no type".
/// Returns `None` when the method has no overload entry or no signature
/// accepts the argument count and shapes.
pub(crate) fn resolve<F>(container: &str, method: &str, args: &[&Expr], type_of: F) -> Option<Vec<TypeRef>>
where
    F: Fn(&Expr) -> Option<TypeRef>,
{
    let signatures = OVERLOADS.get(&(container, method))?;
    let types: Vec<Option<TypeRef>> = args.iter().map(|arg| type_of(arg)).collect();

    let mut best: Option<(usize, Vec<TypeRef>)> = None;
    for signature in signatures.iter() {
        let Some((score, bound)) = bind(signature, args, &types) else {
            continue;
        };
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, bound));
        }
    }
    best.map(|(_, bound)| bound)
}

fn bind(signature: &[Param], args: &[&Expr], types: &[Option<TypeRef>]) -> Option<(usize, Vec<TypeRef>)> {
    let required = signature
        .iter()
        .filter(|param| param.arity == Arity::Required)
        .count();
    let has_rest = signature.iter().any(|param| param.arity == Arity::Rest);
    let fixed = signature
        .iter()
        .filter(|param| param.arity != Arity::Rest)
        .count();
    if args.len() < required || (!has_rest && args.len() > fixed) {
        return None;
    }

    let mut score = 0;
    let mut bound = Vec::with_capacity(args.len());
    let mut params = signature.iter();
    let mut current = params.next();
    for (arg, ty) in args.iter().zip(types) {
        let param = current?;
        match fit(param.kind, arg, ty.as_ref()) {
            Fit::No => return None,
            Fit::Yes => score += 1,
            Fit::Unknown => {}
        }
        bound.push(TypeRef::new(param.ty));
        if param.arity != Arity::Rest {
            current = params.next();
        }
    }
    Some((score, bound))
}
