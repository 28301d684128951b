//! Literal input/output pairs for every catalog entry.
//!
//! Each fluent case is checked twice: once as written and once with a
//! trailing reason argument, which must come out as `.Because(...)`.

use awexpect_migrate::{migrate_source, MigrationConfig};

/// A test class with `arrange` and `statement` in its body.
fn class_with(arrange: &str, statement: &str) -> String {
    format!(
        "using System;
using System.Collections.Generic;
using System.Linq;
using System.Threading.Tasks;
using aweXpect;
using FluentAssertions;
using Xunit;

public class MyClass
{{
    [Fact]
    public async Task MyTest()
    {{
        {arrange}

        {statement};
    }}
}}
"
    )
}

fn check(arrange: &str, actual: &str, expected: &str) {
    let outcome = migrate_source(&class_with(arrange, actual), &MigrationConfig::default());
    assert_eq!(outcome.output, class_with(arrange, expected), "migrating `{actual}`");
}

/// `{0}` in `actual` marks where a reason argument may go.
fn check_with_because(arrange: &str, actual: &str, expected: &str) {
    let with_reason = actual.replace("{0}", "\"because foo\"");
    if actual.contains("({0})") {
        check(arrange, &actual.replace("{0}", ""), expected);
    } else if actual.contains(", {0})") {
        check(arrange, &actual.replace(", {0})", ")"), expected);
    } else {
        check(arrange, actual, expected);
        return;
    }
    check(arrange, &with_reason, &format!("{expected}.Because(\"because foo\")"));
}

fn run(cases: &[(&str, &str, &str)]) {
    for (arrange, actual, expected) in cases {
        check_with_because(arrange, actual, expected);
    }
}

// =============================================================================
// FluentAssertions
// =============================================================================

#[test]
fn test_basic() {
    run(&[
        (
            "object subject = new object();",
            "subject.Should().BeNull({0})",
            "Expect.That(subject).IsNull()",
        ),
        (
            "object subject = new object();",
            "subject.Should().NotBeNull({0})",
            "Expect.That(subject).IsNotNull()",
        ),
        (
            "object subject = new object();object expected = new object();",
            "subject.Should().BeSameAs(expected, {0})",
            "Expect.That(subject).IsSameAs(expected)",
        ),
        (
            "object subject = new object();object unexpected = new object();",
            "subject.Should().NotBeSameAs(unexpected, {0})",
            "Expect.That(subject).IsNotSameAs(unexpected)",
        ),
        (
            "object subject = new Exception();",
            "subject.Should().BeAssignableTo<ArgumentException>({0})",
            "Expect.That(subject).Is<ArgumentException>()",
        ),
        (
            "object subject = new Exception();",
            "subject.Should().BeAssignableTo(typeof(ArgumentException), {0})",
            "Expect.That(subject).Is(typeof(ArgumentException))",
        ),
        (
            "object subject = new Exception();",
            "subject.Should().NotBeAssignableTo<ArgumentException>({0})",
            "Expect.That(subject).IsNot<ArgumentException>()",
        ),
        (
            "object subject = new Exception();",
            "subject.Should().NotBeAssignableTo(typeof(ArgumentException), {0})",
            "Expect.That(subject).IsNot(typeof(ArgumentException))",
        ),
        (
            "object subject = new Exception();",
            "subject.Should().BeOfType<ArgumentException>({0})",
            "Expect.That(subject).IsExactly<ArgumentException>()",
        ),
        (
            "object subject = new Exception();",
            "subject.Should().NotBeOfType(typeof(ArgumentException), {0})",
            "Expect.That(subject).IsNotExactly(typeof(ArgumentException))",
        ),
    ]);
}

#[test]
fn test_booleans() {
    run(&[
        ("bool subject = false;", "subject.Should().BeTrue({0})", "Expect.That(subject).IsTrue()"),
        ("bool subject = false;", "subject.Should().BeFalse({0})", "Expect.That(subject).IsFalse()"),
        (
            "bool subject = false;bool expected = false;",
            "subject.Should().Imply(expected, {0})",
            "Expect.That(subject).Implies(expected)",
        ),
        ("bool? subject = false;", "subject.Should().NotBeTrue({0})", "Expect.That(subject).IsNotTrue()"),
        ("bool? subject = null;", "subject.Should().NotBeFalse({0})", "Expect.That(subject).IsNotFalse()"),
    ]);
}

#[test]
fn test_collections() {
    run(&[
        ("int[] subject = [1, 2,];", "subject.Should().HaveCount(1, {0})", "Expect.That(subject).HasCount(1)"),
        (
            "int[] subject = [1, 2,]; int[] expected = [2, 1,];",
            "subject.Should().BeEquivalentTo(expected, {0})",
            "Expect.That(subject).IsEqualTo(expected).InAnyOrder()",
        ),
        (
            "int[] subject = [1, 2,];",
            "subject.Should().OnlyContain(x => x > 0, {0})",
            "Expect.That(subject).All().Satisfy(x => x > 0)",
        ),
        (
            "int[] subject = [1, 2,];",
            "subject.Should().ContainSingle(x => x > 0, {0})",
            "Expect.That(subject).HasSingle().Matching(x => x > 0)",
        ),
        ("int[] subject = [1, 2,];", "subject.Should().ContainSingle({0})", "Expect.That(subject).HasSingle()"),
        (
            "int[] subject = [1, 2,];",
            "subject.Should().Contain(1).And.Contain(2, {0})",
            "Expect.That(subject).Contains(1).And.Contains(2)",
        ),
        (
            "IEnumerable<int> subject = Enumerable.Range(1, 3);",
            "subject.Should().AllBeEquivalentTo(1, {0})",
            "Expect.That(subject).All().AreEquivalentTo(1)",
        ),
        (
            "string[] subject = [\"1\", \"2\",];",
            "subject.Should().AllBeEquivalentTo(\"2\", {0})",
            "Expect.That(subject).All().AreEqualTo(\"2\")",
        ),
        (
            "string[] subject = [\"1\", \"2\",];",
            "subject.Should().AllBeEquivalentTo(\"2\", o => o.IgnoringCase(), {0})",
            "Expect.That(subject).All().AreEqualTo(\"2\").IgnoringCase()",
        ),
        (
            "IEnumerable<string> subject = [\"1\", \"2\",];",
            "subject.Should().AllBeEquivalentTo(\"2\", o => o.IgnoringTrailingWhitespace(), {0})",
            "Expect.That(subject).All().AreEqualTo(\"2\").IgnoringTrailingWhiteSpace()",
        ),
        (
            "object[] subject = [];",
            "subject.Should().AllBeAssignableTo<ArgumentException>({0})",
            "Expect.That(subject).All().Are<ArgumentException>()",
        ),
        (
            "object[] subject = [];",
            "subject.Should().AllBeOfType(typeof(ArgumentException), {0})",
            "Expect.That(subject).All().AreExactly(typeof(ArgumentException))",
        ),
        (
            "int[] subject = [1, 2,];int[] expected = [1, 2,];",
            "subject.Should().BeSubsetOf(expected, {0})",
            "Expect.That(subject).IsContainedIn(expected).InAnyOrder()",
        ),
        (
            "int[] subject = [1, 2,];int[] expected = [1, 2,];",
            "subject.Should().NotBeSubsetOf(expected, {0})",
            "Expect.That(subject).IsNotContainedIn(expected).InAnyOrder()",
        ),
        (
            "int[] subject = [1, 2,];int[] expected = [1, 2,];",
            "subject.Should().ContainInOrder(expected, {0})",
            "Expect.That(subject).Contains(expected).IgnoringInterspersedItems()",
        ),
        (
            "int[] subject = [1, 2,];",
            "subject.Should().ContainInOrder(1, 2, 3)",
            "Expect.That(subject).Contains([1, 2, 3]).IgnoringInterspersedItems()",
        ),
        (
            "int[] subject = [1, 2,];int[] expected = [1, 2,];",
            "subject.Should().ContainInConsecutiveOrder(expected, {0})",
            "Expect.That(subject).Contains(expected)",
        ),
        (
            "int[] subject = [1, 2,];",
            "subject.Should().ContainInConsecutiveOrder(1, 2, 3)",
            "Expect.That(subject).Contains([1, 2, 3])",
        ),
        (
            "int[] subject = [1, 2,];int[] expected = [1, 2,];",
            "subject.Should().Contain(expected, {0})",
            "Expect.That(subject).Contains(expected).InAnyOrder().IgnoringInterspersedItems()",
        ),
        (
            "object[] subject = [1, 2,];object expected = new();",
            "subject.Should().ContainEquivalentOf(expected, {0})",
            "Expect.That(subject).Contains(expected).Equivalent()",
        ),
        (
            "object[] subject = [1, 2,];object expected = new();",
            "subject.Should().NotContainEquivalentOf(expected, {0})",
            "Expect.That(subject).DoesNotContain(expected).Equivalent()",
        ),
        (
            "int[] subject = [1, 2,];int[] expected = [1, 2,];",
            "subject.Should().StartWith(expected, {0})",
            "Expect.That(subject).StartsWith(expected)",
        ),
        (
            "int[] subject = [1, 2,];int[] expected = [1, 2,];",
            "subject.Should().EndWith(expected, {0})",
            "Expect.That(subject).EndsWith(expected)",
        ),
    ]);
}

#[test]
fn test_ordering() {
    run(&[
        (
            "int[] subject = [1, 2,];",
            "subject.Should().BeInAscendingOrder({0})",
            "Expect.That(subject).IsInAscendingOrder()",
        ),
        (
            "string[] subject = [\"a\",\"b\"];",
            "subject.Should().BeInAscendingOrder(StringComparer.Ordinal, {0})",
            "Expect.That(subject).IsInAscendingOrder().Using(StringComparer.Ordinal)",
        ),
        (
            "object[] subject = [];",
            "subject.Should().BeInAscendingOrder(x => x.GetHashCode(), {0})",
            "Expect.That(subject).IsInAscendingOrder(x => x.GetHashCode())",
        ),
        (
            "object[] subject = [];",
            "subject.Should().BeInAscendingOrder(x => x.ToString(), StringComparer.Ordinal, {0})",
            "Expect.That(subject).IsInAscendingOrder(x => x.ToString()).Using(StringComparer.Ordinal)",
        ),
        (
            "int[] subject = [1, 2,];",
            "subject.Should().NotBeInAscendingOrder({0})",
            "Expect.That(subject).IsNotInAscendingOrder()",
        ),
        (
            "string[] subject = [\"a\",\"b\"];",
            "subject.Should().BeInDescendingOrder(StringComparer.Ordinal, {0})",
            "Expect.That(subject).IsInDescendingOrder().Using(StringComparer.Ordinal)",
        ),
        (
            "object[] subject = [];",
            "subject.Should().NotBeInDescendingOrder(x => x.ToString(), StringComparer.Ordinal, {0})",
            "Expect.That(subject).IsNotInDescendingOrder(x => x.ToString()).Using(StringComparer.Ordinal)",
        ),
        (
            "object[] subject = [];",
            "subject.Should().NotBeInDescendingOrder(x => x.GetHashCode(), {0})",
            "Expect.That(subject).IsNotInDescendingOrder(x => x.GetHashCode())",
        ),
    ]);
}

#[test]
fn test_enums_and_nullable_values() {
    run(&[
        ("DayOfWeek subject = DayOfWeek.Monday;", "subject.Should().BeDefined({0})", "Expect.That(subject).IsDefined()"),
        (
            "DayOfWeek subject = DayOfWeek.Monday;",
            "subject.Should().NotBeDefined({0})",
            "Expect.That(subject).IsNotDefined()",
        ),
        (
            "DayOfWeek? subject = DayOfWeek.Monday;",
            "subject.Should().HaveValue({0})",
            "Expect.That(subject).IsNotNull()",
        ),
        (
            "DayOfWeek? subject = DayOfWeek.Monday;",
            "subject.Should().HaveValue(1, {0})",
            "Expect.That(subject).HasValue(1)",
        ),
        (
            "DayOfWeek? subject = DayOfWeek.Monday;",
            "subject.Should().NotHaveValue({0})",
            "Expect.That(subject).IsNull()",
        ),
        (
            "DayOfWeek? subject = DayOfWeek.Monday;",
            "subject.Should().NotHaveValue(2, {0})",
            "Expect.That(subject).DoesNotHaveValue(2)",
        ),
        (
            "DayOfWeek subject = DayOfWeek.Monday;",
            "subject.Should().HaveFlag(DayOfWeek.Tuesday, {0})",
            "Expect.That(subject).HasFlag(DayOfWeek.Tuesday)",
        ),
        (
            "DayOfWeek subject = DayOfWeek.Monday;",
            "subject.Should().NotHaveFlag(DayOfWeek.Tuesday, {0})",
            "Expect.That(subject).DoesNotHaveFlag(DayOfWeek.Tuesday)",
        ),
    ]);
}

#[test]
fn test_equivalency() {
    run(&[
        (
            "object subject = new object();object expected = new object();",
            "subject.Should().BeEquivalentTo(expected, {0})",
            "Expect.That(subject).IsEquivalentTo(expected)",
        ),
        (
            "byte[] subject = [];byte[] expected = [];",
            "subject.Should().BeEquivalentTo(expected, {0})",
            "Expect.That(subject).IsEqualTo(expected).InAnyOrder()",
        ),
        (
            "string subject = \"foo\";string expected = \"foo\";",
            "subject.Should().BeEquivalentTo(expected, {0})",
            "Expect.That(subject).IsEqualTo(expected).IgnoringCase()",
        ),
        (
            "IEnumerable<string> subject = [];string[] expected = [];",
            "subject.Should().BeEquivalentTo(expected, o => o.WithStrictOrdering(), {0})",
            "Expect.That(subject).IsEqualTo(expected)",
        ),
        (
            "AggregateException subject = new(); Exception[] expected = [];",
            "subject.InnerExceptions.Should().BeEquivalentTo(expected, o => o.WithStrictOrdering(), {0})",
            "Expect.That(subject.InnerExceptions).IsEqualTo(expected)",
        ),
        (
            "int[] subject = [];int[] expected = [];",
            "subject.Should().BeEquivalentTo(expected, o => o.WithoutStrictOrdering(), {0})",
            "Expect.That(subject).IsEqualTo(expected).InAnyOrder()",
        ),
        (
            "object subject = new object();object unexpected = new object();",
            "subject.Should().NotBeEquivalentTo(unexpected, {0})",
            "Expect.That(subject).IsNotEquivalentTo(unexpected)",
        ),
        (
            "int[] subject = [];int[] unexpected = [];",
            "subject.Should().NotBeEquivalentTo(unexpected, {0})",
            "Expect.That(subject).IsNotEqualTo(unexpected).InAnyOrder()",
        ),
        (
            "string subject = \"foo\";string expected = \"bar\";",
            "subject.Should().BeEquivalentTo(expected, o => o.IgnoringLeadingWhitespace(), {0})",
            "Expect.That(subject).IsEqualTo(expected).IgnoringCase().IgnoringLeadingWhiteSpace()",
        ),
        (
            "string subject = \"foo\";string expected = \"bar\";",
            "subject.Should().BeEquivalentTo(expected, o => o.IgnoringNewlineStyle(), {0})",
            "Expect.That(subject).IsEqualTo(expected).IgnoringCase().IgnoringNewlineStyle()",
        ),
    ]);
}

#[test]
fn test_exceptions() {
    run(&[
        ("Action callback = () => {};", "callback.Should().NotThrow({0})", "Expect.That(callback).DoesNotThrow()"),
        (
            "Func<Task> callback = () => Task.CompletedTask;",
            "await callback.Should().NotThrowAsync({0})",
            "await Expect.That(callback).DoesNotThrow()",
        ),
        (
            "Action callback = () => {};",
            "callback.Should().Throw<ArgumentException>({0})",
            "Expect.That(callback).Throws<ArgumentException>()",
        ),
        (
            "Action callback = () => {};",
            "callback.Should().ThrowExactly<ArgumentException>({0})",
            "Expect.That(callback).ThrowsExactly<ArgumentException>()",
        ),
        (
            "Func<Task> callback = () => Task.CompletedTask;",
            "await callback.Should().ThrowAsync<ArgumentException>({0})",
            "await Expect.That(callback).Throws<ArgumentException>()",
        ),
        (
            "Func<Task> callback = () => Task.CompletedTask;",
            "await callback.Should().ThrowExactlyAsync<ArgumentException>({0})",
            "await Expect.That(callback).ThrowsExactly<ArgumentException>()",
        ),
    ]);
}

#[test]
fn test_numbers_and_dates() {
    run(&[
        ("int subject = 1;", "subject.Should().BePositive({0})", "Expect.That(subject).IsPositive()"),
        ("int subject = 1;", "subject.Should().BeNegative({0})", "Expect.That(subject).IsNegative()"),
        (
            "int subject = 1;int expected = 2;",
            "subject.Should().BeGreaterThan(expected, {0})",
            "Expect.That(subject).IsGreaterThan(expected)",
        ),
        (
            "int subject = 1;int expected = 2;",
            "subject.Should().BeLessThanOrEqualTo(expected, {0})",
            "Expect.That(subject).IsLessThanOrEqualTo(expected)",
        ),
        (
            "int subject = 1;int expected = 2;",
            "subject.Should().BeLessOrEqualTo(expected, {0})",
            "Expect.That(subject).IsLessThanOrEqualTo(expected)",
        ),
        (
            "int subject = 1;int expected = 2;",
            "subject.Should().BeGreaterOrEqualTo(expected, {0})",
            "Expect.That(subject).IsGreaterThanOrEqualTo(expected)",
        ),
        (
            "double subject = 1.1;double expected = 1.0;double tolerance = 0.05;",
            "subject.Should().BeApproximately(expected, tolerance, {0})",
            "Expect.That(subject).IsEqualTo(expected).Within(tolerance)",
        ),
        (
            "int subject = 1;int[] expected = [2, 3,];",
            "subject.Should().BeOneOf(expected, {0})",
            "Expect.That(subject).IsOneOf(expected)",
        ),
        ("int subject = 1;", "subject.Should().BeOneOf(2, 3, 4)", "Expect.That(subject).IsOneOf(2, 3, 4)"),
        ("int subject = 1;", "subject.Should().BeInRange(0, 2, {0})", "Expect.That(subject).IsBetween(0).And(2)"),
        (
            "int subject = 1;",
            "subject.Should().NotBeInRange(2, 3, {0})",
            "Expect.That(subject).IsNotBetween(2).And(3)",
        ),
        (
            "DateTime subject = DateTime.Now;DateTime expected = DateTime.Now;",
            "subject.Should().BeOnOrAfter(expected, {0})",
            "Expect.That(subject).IsOnOrAfter(expected)",
        ),
        (
            "DateTime subject = DateTime.Now;DateTime unexpected = DateTime.Now;",
            "subject.Should().NotBeBefore(unexpected, {0})",
            "Expect.That(subject).IsNotBefore(unexpected)",
        ),
        (
            "DateTime subject = DateTime.Now;DateTime[] expected = [DateTime.Now,];",
            "subject.Should().BeOneOf(expected, {0})",
            "Expect.That(subject).IsOneOf(expected)",
        ),
    ]);
}

#[test]
fn test_strings() {
    run(&[
        ("string subject = \"foo\";", "subject.Should().BeEmpty({0})", "Expect.That(subject).IsEmpty()"),
        (
            "string subject = \"foo\";",
            "subject.Should().NotBeNullOrWhiteSpace({0})",
            "Expect.That(subject).IsNotNullOrWhiteSpace()",
        ),
        (
            "string subject = \"foo\";string expected = \"bar\";",
            "subject.Should().Be(expected, {0})",
            "Expect.That(subject).IsEqualTo(expected)",
        ),
        (
            "string subject = \"foo\";string unexpected = \"bar\";",
            "subject.Should().NotBe(unexpected, {0})",
            "Expect.That(subject).IsNotEqualTo(unexpected)",
        ),
        (
            "string subject = \"foo\";string expected = \"bar\";",
            "subject.Should().Contain(expected, {0})",
            "Expect.That(subject).Contains(expected)",
        ),
        (
            "string subject = \"foo\";string unexpected = \"bar\";",
            "subject.Should().NotContain(unexpected, {0})",
            "Expect.That(subject).DoesNotContain(unexpected)",
        ),
        (
            "string subject = \"foo\";string unexpected = \"bar\";",
            "subject.Should().NotEndWith(unexpected, {0})",
            "Expect.That(subject).DoesNotEndWith(unexpected)",
        ),
        (
            "string subject = \"foo\";",
            "subject.Should().Match(\"f*\", {0})",
            "Expect.That(subject).IsEqualTo(\"f*\").AsWildcard()",
        ),
        (
            "string subject = \"foo\";",
            "subject.Should().NotMatchRegex(\"^b\", {0})",
            "Expect.That(subject).IsNotEqualTo(\"^b\").AsRegex()",
        ),
    ]);
}

#[test]
fn test_occurrence_constraints() {
    let arrange = "string subject = \"foo\";string expected = \"bar\";int expectedCount=5;";
    let cases = [
        ("AtLeast.Once()", ".AtLeast().Once()"),
        ("AtLeast.Twice()", ".AtLeast().Twice()"),
        ("AtLeast.Thrice()", ".AtLeast(3.Times())"),
        ("AtLeast.Times(4)", ".AtLeast(4)"),
        ("AtMost.Once()", ".AtMost().Once()"),
        ("AtMost.Thrice()", ".AtMost(3.Times())"),
        ("AtMost.Times(expectedCount)", ".AtMost(expectedCount)"),
        ("Exactly.Once()", ".Once()"),
        ("Exactly.Twice()", ".Twice()"),
        ("Exactly.Thrice()", ".Exactly(3.Times())"),
        ("Exactly.Times(4)", ".Exactly(4)"),
        ("LessThan.Twice()", ".LessThan().Twice()"),
        ("LessThan.Times(4)", ".LessThan(4)"),
        ("MoreThan.Once()", ".MoreThan().Once()"),
        ("MoreThan.Thrice()", ".MoreThan(3.Times())"),
    ];
    for (constraint, suffix) in cases {
        check_with_because(
            arrange,
            &format!("subject.Should().Contain(expected, {constraint}, {{0}})"),
            &format!("Expect.That(subject).Contains(expected){suffix}"),
        );
    }
}

#[test]
fn test_chained_modifiers() {
    run(&[
        (
            "Action callback = () => {};",
            "callback.Should().Throw<ArgumentException>().WithMessage(\"*foo*\", {0})",
            "Expect.That(callback).Throws<ArgumentException>().WithMessage(\"*foo*\").AsWildcard()",
        ),
        (
            "Action callback = () => {};",
            "callback.Should().Throw<ArgumentException>().WithParameterName(\"value\", {0})",
            "Expect.That(callback).Throws<ArgumentException>().WithParamName(\"value\")",
        ),
        (
            "Action callback = () => {};",
            "callback.Should().Throw<AggregateException>().WithInnerException<ArgumentException>({0})",
            "Expect.That(callback).Throws<AggregateException>().WithInner<ArgumentException>()",
        ),
    ]);
}

// =============================================================================
// xunit
// =============================================================================

#[test]
fn test_xunit_basic_and_booleans() {
    for (arrange, actual, expected) in [
        ("", "Assert.Fail(\"foo\")", "Fail.Test(\"foo\")"),
        ("", "Assert.Skip(\"foo\")", "Skip.Test(\"foo\")"),
        ("", "Assert.Null(new object())", "Expect.That(new object()).IsNull()"),
        ("", "Assert.NotNull(new object())", "Expect.That(new object()).IsNotNull()"),
        (
            "",
            "Assert.Same(new ArgumentException(), new NullReferenceException())",
            "Expect.That(new NullReferenceException()).IsSameAs(new ArgumentException())",
        ),
        (
            "",
            "Assert.NotSame(new ArgumentException(), new NullReferenceException())",
            "Expect.That(new NullReferenceException()).IsNotSameAs(new ArgumentException())",
        ),
        ("bool subject = false;", "Assert.True(subject)", "Expect.That(subject).IsTrue()"),
        ("bool subject = false;", "Assert.False(subject)", "Expect.That(subject).IsFalse()"),
        (
            "bool subject = false;",
            "Assert.True(subject, \"foo\")",
            "Expect.That(subject).IsTrue().Because(\"foo\")",
        ),
        (
            "bool subject = false;",
            "Assert.False(subject, \"foo\")",
            "Expect.That(subject).IsFalse().Because(\"foo\")",
        ),
    ] {
        check(arrange, actual, expected);
    }
}

#[test]
fn test_xunit_collections_and_equality() {
    for (arrange, actual, expected) in [
        ("int[] subject = [1, 2,];", "Assert.Distinct(subject)", "Expect.That(subject).AreAllUnique()"),
        ("int[] subject = [1, 2,];", "Assert.Contains(1, subject)", "Expect.That(subject).Contains(1)"),
        (
            "int[] subject = [1, 2,];",
            "Assert.Contains(subject, x => x == 1)",
            "Expect.That(subject).Contains(x => x == 1)",
        ),
        ("int[] subject = [1, 2,];", "Assert.Single(subject)", "Expect.That(subject).HasSingle()"),
        (
            "int[] subject = [1, 2,];",
            "Assert.All(subject, x => Assert.True(x > 0))",
            "Expect.That(subject).All().Satisfy(x => Assert.True(x > 0))",
        ),
        ("", "Assert.Equal(1, 2)", "Expect.That(2).IsEqualTo(1)"),
        ("", "Assert.Equal(1.0, 1.1, 0.1)", "Expect.That(1.1).IsEqualTo(1.0).Within(0.1)"),
        (
            "TimeSpan tolerance = TimeSpan.FromSeconds(1);",
            "Assert.Equal(DateTime.Now, DateTime.Today, tolerance)",
            "Expect.That(DateTime.Today).IsEqualTo(DateTime.Now).Within(tolerance)",
        ),
        ("", "Assert.NotEqual(1, 2)", "Expect.That(2).IsNotEqualTo(1)"),
        ("", "Assert.NotEqual(1.0, 1.1, 0.1)", "Expect.That(1.1).IsNotEqualTo(1.0).Within(0.1)"),
        ("", "Assert.InRange(5, 1, 10)", "Expect.That(5).IsBetween(1).And(10)"),
    ] {
        let config = MigrationConfig {
            max_passes: 1,
            ..MigrationConfig::default()
        };
        let outcome = migrate_source(&class_with(arrange, actual), &config);
        assert_eq!(outcome.output, class_with(arrange, expected), "migrating `{actual}`");
    }
}

#[test]
fn test_xunit_exceptions_strings_and_types() {
    for (arrange, actual, expected) in [
        (
            "Action callback = () => {};",
            "Assert.ThrowsAny<ArgumentException>(callback)",
            "Expect.That(callback).Throws<ArgumentException>()",
        ),
        (
            "Func<Task> callback = () => Task.CompletedTask;",
            "await Assert.ThrowsAsync<ArgumentException>(callback)",
            "await Expect.That(callback).ThrowsExactly<ArgumentException>()",
        ),
        (
            "Action callback = () => {};",
            "Assert.Throws(typeof(ArgumentException), callback)",
            "Expect.That(callback).ThrowsExactly(typeof(ArgumentException))",
        ),
        ("", "Assert.Contains(\"oo\", \"foo\")", "Expect.That(\"foo\").Contains(\"oo\")"),
        ("", "Assert.DoesNotContain(\"oo\", \"foo\")", "Expect.That(\"foo\").DoesNotContain(\"oo\")"),
        ("", "Assert.StartsWith(\"fo\", \"foo\")", "Expect.That(\"foo\").StartsWith(\"fo\")"),
        ("", "Assert.EndsWith(\"oo\", \"foo\")", "Expect.That(\"foo\").EndsWith(\"oo\")"),
        ("", "Assert.Empty(\"foo\")", "Expect.That(\"foo\").IsEmpty()"),
        ("", "Assert.NotEmpty(\"foo\")", "Expect.That(\"foo\").IsNotEmpty()"),
        (
            "",
            "Assert.IsAssignableFrom<ArgumentException>(new Exception())",
            "Expect.That(new Exception()).Is<ArgumentException>()",
        ),
        (
            "",
            "Assert.IsNotAssignableFrom(typeof(ArgumentException), new Exception())",
            "Expect.That(new Exception()).IsNot(typeof(ArgumentException))",
        ),
        (
            "",
            "Assert.IsType<ArgumentException>(new Exception())",
            "Expect.That(new Exception()).IsExactly<ArgumentException>()",
        ),
        (
            "",
            "Assert.IsNotType(typeof(ArgumentException), new Exception())",
            "Expect.That(new Exception()).IsNotExactly(typeof(ArgumentException))",
        ),
    ] {
        check(arrange, actual, expected);
    }
}

#[test]
fn test_unbindable_third_argument_is_left_alone() {
    for statement in [
        "Assert.Equal(1, 2, \"three\")",
        "Assert.NotEqual(1.0, 1.1, true)",
    ] {
        check("", statement, statement);
    }
}

#[test]
fn test_contain_single_argument_type_decides_the_form() {
    // an argument of unknown type is taken as the predicate
    check(
        "int[] subject = [1, 2,];",
        "subject.Should().ContainSingle(x)",
        "Expect.That(subject).HasSingle().Matching(x)",
    );
    check(
        "int[] subject = [1, 2,];\n        Func<int, bool> x = i => i > 0;",
        "subject.Should().ContainSingle(x)",
        "Expect.That(subject).HasSingle().Matching(x)",
    );
    check(
        "int[] subject = [1, 2,];\n        string x = \"one item\";",
        "subject.Should().ContainSingle(x)",
        "Expect.That(subject).HasSingle().Because(x)",
    );
}
