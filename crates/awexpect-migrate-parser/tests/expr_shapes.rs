//! Expression shape tests.
//!
//! These tests verify the parser builds the tree shapes the migrator walks:
//! member-access/invocation chains, generic names, lambdas, casts and the
//! null-conditional operator.

use awexpect_migrate_ast::{BinaryOp, Expr, ExprKind, LambdaBody, LiteralKind, UnaryOp};
use awexpect_migrate_parser::parse_expression;

/// Helper to parse an expression from source.
fn parse(source: &str) -> Expr {
    parse_expression(source).expect("Parse failed")
}

/// Helper to unwrap an invocation into (callee, argument texts).
fn invocation<'a>(expr: &'a Expr, source: &'a str) -> (&'a Expr, Vec<&'a str>) {
    match &expr.kind {
        ExprKind::Invocation { callee, args } => (
            callee.as_ref(),
            args.iter().map(|a| a.expr.text(source)).collect(),
        ),
        other => panic!("expected invocation, got {:?}", other),
    }
}

fn member<'a>(expr: &'a Expr) -> (&'a Expr, &'a str, bool) {
    match &expr.kind {
        ExprKind::MemberAccess {
            target,
            name,
            conditional,
        } => (target.as_ref(), name.ident.as_str(), *conditional),
        other => panic!("expected member access, got {:?}", other),
    }
}

// =============================================================================
// Call chains
// =============================================================================

#[test]
fn test_fluent_chain_nests_outward() {
    let source = "subject.Should().Be(expected, \"because\")";
    let expr = parse(source);

    let (callee, args) = invocation(&expr, source);
    assert_eq!(args, vec!["expected", "\"because\""]);
    let (should_call, verb, _) = member(callee);
    assert_eq!(verb, "Be");

    let (should_callee, should_args) = invocation(should_call, source);
    assert!(should_args.is_empty());
    let (subject, marker, _) = member(should_callee);
    assert_eq!(marker, "Should");
    assert_eq!(subject.text(source), "subject");
}

#[test]
fn test_generic_method_call() {
    let source = "callback.Should().Throw<ArgumentException>()";
    let expr = parse(source);
    let (callee, _) = invocation(&expr, source);
    match &callee.kind {
        ExprKind::MemberAccess { name, .. } => {
            assert_eq!(name.ident, "Throw");
            assert_eq!(name.type_args.len(), 1);
            assert_eq!(name.type_args[0].name, "ArgumentException");
        }
        other => panic!("expected member access, got {:?}", other),
    }
}

#[test]
fn test_less_than_is_not_generic() {
    let expr = parse("a < b && c > d");
    match &expr.kind {
        ExprKind::Binary { op, left, right } => {
            assert_eq!(*op, BinaryOp::And);
            assert!(matches!(left.kind, ExprKind::Binary { op: BinaryOp::Lt, .. }));
            assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Gt, .. }));
        }
        other => panic!("expected binary, got {:?}", other),
    }
}

#[test]
fn test_null_conditional_subject() {
    let source = "subject?.Message.Should()";
    let expr = parse(source);
    let (callee, _) = invocation(&expr, source);
    let (receiver, name, conditional) = member(callee);
    assert_eq!(name, "Should");
    assert!(!conditional);
    assert_eq!(receiver.text(source), "subject?.Message");
    let (_, message, conditional) = member(receiver);
    assert_eq!(message, "Message");
    assert!(conditional);
}

#[test]
fn test_null_forgiving_operator() {
    let source = "value!.Should()";
    let expr = parse(source);
    let (callee, _) = invocation(&expr, source);
    let (receiver, _, _) = member(callee);
    assert!(matches!(
        receiver.kind,
        ExprKind::Postfix {
            op: UnaryOp::Not,
            ..
        }
    ));
}

#[test]
fn test_qualified_static_call() {
    let source = "Xunit.Assert.Equal(1, 2)";
    let expr = parse(source);
    let (callee, args) = invocation(&expr, source);
    assert_eq!(callee.dotted_path().as_deref(), Some("Xunit.Assert.Equal"));
    assert_eq!(args, vec!["1", "2"]);
}

// =============================================================================
// Lambdas, casts, await
// =============================================================================

#[test]
fn test_lambda_forms() {
    let expr = parse("x => x > 1");
    assert!(matches!(expr.kind, ExprKind::Lambda { ref params, .. } if params == &["x"]));

    let expr = parse("(int a, string b) => a");
    assert!(matches!(expr.kind, ExprKind::Lambda { ref params, .. } if params == &["a", "b"]));

    let source = "async () => { await Task.Delay(1); }";
    let expr = parse(source);
    match &expr.kind {
        ExprKind::Lambda {
            body: LambdaBody::Block(span),
            is_async,
            ..
        } => {
            assert!(*is_async);
            assert_eq!(span.text(source), "{ await Task.Delay(1); }");
        }
        other => panic!("expected block lambda, got {:?}", other),
    }
}

#[test]
fn test_cast_of_lambda() {
    let source = "((Action)(() => { })).Should()";
    let expr = parse(source);
    let (callee, _) = invocation(&expr, source);
    let (receiver, _, _) = member(callee);
    let inner = receiver.strip_parens();
    assert!(matches!(inner.kind, ExprKind::Cast { ref ty, .. } if ty.name == "Action"));
}

#[test]
fn test_parenthesized_member_is_not_cast() {
    let source = "(subject).Should()";
    let expr = parse(source);
    let (callee, _) = invocation(&expr, source);
    let (receiver, _, _) = member(callee);
    assert!(matches!(receiver.kind, ExprKind::Paren(_)));
}

#[test]
fn test_await_binds_whole_chain() {
    let source = "await act.Should().ThrowAsync<Exception>()";
    let expr = parse(source);
    match &expr.kind {
        ExprKind::Await(inner) => assert!(matches!(inner.kind, ExprKind::Invocation { .. })),
        other => panic!("expected await, got {:?}", other),
    }
}

// =============================================================================
// Literals and creation
// =============================================================================

#[test]
fn test_literal_kinds() {
    assert_eq!(parse("42").literal_kind(), Some(LiteralKind::Integer));
    assert_eq!(parse("4.2").literal_kind(), Some(LiteralKind::Real));
    assert_eq!(parse("\"x\"").literal_kind(), Some(LiteralKind::String));
    assert_eq!(parse("$\"{x}\"").literal_kind(), Some(LiteralKind::InterpolatedString));
    assert_eq!(parse("null").literal_kind(), Some(LiteralKind::Null));
}

#[test]
fn test_object_creation_forms() {
    let expr = parse("new List<int> { 1, 2 }");
    match &expr.kind {
        ExprKind::New {
            ty: Some(ty),
            args: None,
            initializer: Some(_),
        } => assert_eq!(ty.name, "List<int>"),
        other => panic!("expected new, got {:?}", other),
    }

    let expr = parse("new[] { 1, 2 }");
    assert!(matches!(expr.kind, ExprKind::New { ty: Some(ref ty), .. } if ty.name == "[]"));

    let expr = parse("new int[3]");
    assert!(matches!(expr.kind, ExprKind::New { ty: Some(ref ty), .. } if ty.name == "int[]"));

    assert!(matches!(parse("new()").kind, ExprKind::New { ty: None, .. }));
}

#[test]
fn test_collection_and_tuple() {
    assert!(matches!(parse("[1, 2, ..rest]").kind, ExprKind::Collection(ref items) if items.len() == 3));
    assert!(matches!(parse("(1, \"a\")").kind, ExprKind::Tuple(ref items) if items.len() == 2));
}

#[test]
fn test_named_and_out_arguments() {
    let source = "Call(because: \"x\", out var result)";
    let expr = parse(source);
    match &expr.kind {
        ExprKind::Invocation { args, .. } => {
            assert_eq!(args[0].name.as_deref(), Some("because"));
            assert!(matches!(args[1].expr.kind, ExprKind::Declaration { ref name, .. } if name == "result"));
        }
        other => panic!("expected invocation, got {:?}", other),
    }
}

#[test]
fn test_conditional_and_coalesce() {
    let expr = parse("a ?? b ? c : d");
    match &expr.kind {
        ExprKind::Conditional { condition, .. } => {
            assert!(matches!(condition.kind, ExprKind::Binary { op: BinaryOp::Coalesce, .. }));
        }
        other => panic!("expected conditional, got {:?}", other),
    }
}

#[test]
fn test_is_pattern() {
    let expr = parse("x is not null && y is Exception ex");
    assert!(matches!(expr.kind, ExprKind::Binary { op: BinaryOp::And, .. }));
}
