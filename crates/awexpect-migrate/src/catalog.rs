//! Pattern catalog: assertion method name to rewrite rule.
//!
//! Rules are data. A [`Template`] is output text with placeholders that the
//! synthesizer fills in:
//!
//! - `{0}`, `{1}`, ... - positional argument text
//! - `{*}` - all positional arguments joined with `, `
//! - `{T}` - the method's type arguments joined with `, `
//!
//! Fluent templates start with `.` and are appended to `Expect.That(subject)`.
//! Negated methods are separate entries with their own output verb.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

/// Assertion library a call site comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Library {
    /// `subject.Should().Verb(...)`
    FluentAssertions,
    /// `Assert.Verb(...)`
    Xunit,
}

impl Library {
    /// Diagnostic id reported for sites of this library.
    pub fn diagnostic_id(self) -> &'static str {
        match self {
            Library::FluentAssertions => "aweXpectM002",
            Library::Xunit => "aweXpectM003",
        }
    }

    /// Overload table container for the semantic model.
    pub fn container(self) -> &'static str {
        match self {
            Library::FluentAssertions => "Should",
            Library::Xunit => "Assert",
        }
    }
}

/// Which argument becomes `Expect.That(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectArg {
    /// The fluent receiver, or for xunit the second argument (the first when
    /// there is only one).
    Actual,
    /// The first argument.
    First,
    /// No subject: the template is a complete expression.
    None,
}

/// Output text plus argument metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub text: &'static str,
    pub subject: SubjectArg,
    /// Positional index of the optional reason argument; the arguments after
    /// it format the reason.
    pub because: Option<usize>,
}

impl Template {
    /// Fluent template with a reason at `because`.
    pub const fn fluent(text: &'static str, because: usize) -> Self {
        Self {
            text,
            subject: SubjectArg::Actual,
            because: Some(because),
        }
    }

    /// Template without a reason argument.
    pub const fn plain(text: &'static str) -> Self {
        Self {
            text,
            subject: SubjectArg::Actual,
            because: None,
        }
    }

    /// Template whose subject is the first argument.
    pub const fn on_first(text: &'static str, because: Option<usize>) -> Self {
        Self {
            text,
            subject: SubjectArg::First,
            because,
        }
    }

    /// Complete expression that asserts about no subject.
    pub const fn standalone(text: &'static str) -> Self {
        Self {
            text,
            subject: SubjectArg::None,
            because: None,
        }
    }
}

/// Cases whose output depends on types or argument shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// `HaveValue(x)` checks a value; `HaveValue()` and `HaveValue("reason")`
    /// only check for null.
    ValueOrNull {
        with_value: Template,
        without_value: Template,
    },
    /// `BeEquivalentTo` / `NotBeEquivalentTo`
    Equivalent { negated: bool },
    /// `AllBeEquivalentTo`
    AllEquivalent,
    /// `Contain`, with occurrence constraints and collection arguments
    Contain,
    /// `ContainSingle`
    ContainSingle,
    /// A collection argument or a `params` list.
    Params {
        collection: Template,
        params: Template,
    },
    /// `Be[Not]In{Ascending,Descending}Order`
    Ordering { verb: &'static str },
    /// xunit `Equal` / `NotEqual`
    XunitEqual { negated: bool },
    /// xunit `Contains` / `DoesNotContain`
    XunitContains { verb: &'static str },
    /// xunit `Single`
    XunitSingle,
}

/// Rewrite rule for one source method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Template(Template),
    /// `Verb<T>()` and `Verb(typeof(T))` forms.
    Typed {
        generic: Template,
        by_argument: Template,
    },
    Resolved(Resolution),
}

fn add(m: &mut HashMap<&'static str, Rule>, names: &[&'static str], rule: Rule) {
    for name in names {
        m.insert(name, rule);
    }
}

fn template(text: &'static str, because: usize) -> Rule {
    Rule::Template(Template::fluent(text, because))
}

fn typed(generic: &'static str, by_argument: &'static str) -> Rule {
    Rule::Typed {
        generic: Template::fluent(generic, 0),
        by_argument: Template::fluent(by_argument, 1),
    }
}

static FLUENT: LazyLock<HashMap<&'static str, Rule>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Equality and comparison
    add(&mut m, &["Be"], template(".IsEqualTo({0})", 1));
    add(&mut m, &["NotBe"], template(".IsNotEqualTo({0})", 1));
    add(&mut m, &["BeGreaterThan"], template(".IsGreaterThan({0})", 1));
    add(
        &mut m,
        &["BeGreaterThanOrEqualTo", "BeGreaterOrEqualTo"],
        template(".IsGreaterThanOrEqualTo({0})", 1),
    );
    add(&mut m, &["BeLessThan"], template(".IsLessThan({0})", 1));
    add(
        &mut m,
        &["BeLessThanOrEqualTo", "BeLessOrEqualTo"],
        template(".IsLessThanOrEqualTo({0})", 1),
    );
    add(&mut m, &["BePositive"], template(".IsPositive()", 0));
    add(&mut m, &["BeNegative"], template(".IsNegative()", 0));
    add(
        &mut m,
        &["BeApproximately", "BeCloseTo"],
        template(".IsEqualTo({0}).Within({1})", 2),
    );
    add(
        &mut m,
        &["NotBeApproximately", "NotBeCloseTo"],
        template(".IsNotEqualTo({0}).Within({1})", 2),
    );
    add(&mut m, &["BeInRange"], template(".IsBetween({0}).And({1})", 2));
    add(&mut m, &["NotBeInRange"], template(".IsNotBetween({0}).And({1})", 2));
    add(
        &mut m,
        &["BeOneOf"],
        Rule::Resolved(Resolution::Params {
            collection: Template::fluent(".IsOneOf({0})", 1),
            params: Template::plain(".IsOneOf({*})"),
        }),
    );

    // Dates
    add(&mut m, &["BeAfter"], template(".IsAfter({0})", 1));
    add(&mut m, &["BeOnOrAfter"], template(".IsOnOrAfter({0})", 1));
    add(&mut m, &["BeBefore"], template(".IsBefore({0})", 1));
    add(&mut m, &["BeOnOrBefore"], template(".IsOnOrBefore({0})", 1));
    add(&mut m, &["NotBeAfter"], template(".IsNotAfter({0})", 1));
    add(&mut m, &["NotBeOnOrAfter"], template(".IsNotOnOrAfter({0})", 1));
    add(&mut m, &["NotBeBefore"], template(".IsNotBefore({0})", 1));
    add(&mut m, &["NotBeOnOrBefore"], template(".IsNotOnOrBefore({0})", 1));

    // Null and booleans
    add(&mut m, &["BeNull"], template(".IsNull()", 0));
    add(&mut m, &["NotBeNull"], template(".IsNotNull()", 0));
    add(&mut m, &["BeTrue"], template(".IsTrue()", 0));
    add(&mut m, &["BeFalse"], template(".IsFalse()", 0));
    add(&mut m, &["NotBeTrue"], template(".IsNotTrue()", 0));
    add(&mut m, &["NotBeFalse"], template(".IsNotFalse()", 0));
    add(&mut m, &["Imply"], template(".Implies({0})", 1));

    // Nullable values
    add(
        &mut m,
        &["HaveValue"],
        Rule::Resolved(Resolution::ValueOrNull {
            with_value: Template::fluent(".HasValue({0})", 1),
            without_value: Template::fluent(".IsNotNull()", 0),
        }),
    );
    add(
        &mut m,
        &["NotHaveValue"],
        Rule::Resolved(Resolution::ValueOrNull {
            with_value: Template::fluent(".DoesNotHaveValue({0})", 1),
            without_value: Template::fluent(".IsNull()", 0),
        }),
    );

    // Enums
    add(&mut m, &["BeDefined"], template(".IsDefined()", 0));
    add(&mut m, &["NotBeDefined"], template(".IsNotDefined()", 0));
    add(&mut m, &["HaveFlag"], template(".HasFlag({0})", 1));
    add(&mut m, &["NotHaveFlag"], template(".DoesNotHaveFlag({0})", 1));

    // Identity and types
    add(&mut m, &["BeSameAs"], template(".IsSameAs({0})", 1));
    add(&mut m, &["NotBeSameAs"], template(".IsNotSameAs({0})", 1));
    add(&mut m, &["BeAssignableTo"], typed(".Is<{T}>()", ".Is({0})"));
    add(&mut m, &["NotBeAssignableTo"], typed(".IsNot<{T}>()", ".IsNot({0})"));
    add(&mut m, &["BeOfType"], typed(".IsExactly<{T}>()", ".IsExactly({0})"));
    add(&mut m, &["NotBeOfType"], typed(".IsNotExactly<{T}>()", ".IsNotExactly({0})"));

    // Strings
    add(&mut m, &["StartWith"], template(".StartsWith({0})", 1));
    add(&mut m, &["NotStartWith"], template(".DoesNotStartWith({0})", 1));
    add(&mut m, &["EndWith"], template(".EndsWith({0})", 1));
    add(&mut m, &["NotEndWith"], template(".DoesNotEndWith({0})", 1));
    add(&mut m, &["BeNullOrEmpty"], template(".IsNullOrEmpty()", 0));
    add(&mut m, &["NotBeNullOrEmpty"], template(".IsNotNullOrEmpty()", 0));
    add(&mut m, &["BeNullOrWhiteSpace"], template(".IsNullOrWhiteSpace()", 0));
    add(&mut m, &["NotBeNullOrWhiteSpace"], template(".IsNotNullOrWhiteSpace()", 0));
    add(&mut m, &["Match"], template(".IsEqualTo({0}).AsWildcard()", 1));
    add(&mut m, &["NotMatch"], template(".IsNotEqualTo({0}).AsWildcard()", 1));
    add(&mut m, &["MatchRegex"], template(".IsEqualTo({0}).AsRegex()", 1));
    add(&mut m, &["NotMatchRegex"], template(".IsNotEqualTo({0}).AsRegex()", 1));

    // Collections
    add(&mut m, &["BeEmpty"], template(".IsEmpty()", 0));
    add(&mut m, &["NotBeEmpty"], template(".IsNotEmpty()", 0));
    add(&mut m, &["HaveCount"], template(".HasCount({0})", 1));
    add(&mut m, &["OnlyContain"], template(".All().Satisfy({0})", 1));
    add(&mut m, &["OnlyHaveUniqueItems"], template(".AreAllUnique()", 0));
    add(&mut m, &["ContainSingle"], Rule::Resolved(Resolution::ContainSingle));
    add(&mut m, &["AllBeEquivalentTo"], Rule::Resolved(Resolution::AllEquivalent));
    add(&mut m, &["AllBeAssignableTo"], typed(".All().Are<{T}>()", ".All().Are({0})"));
    add(
        &mut m,
        &["AllBeOfType"],
        typed(".All().AreExactly<{T}>()", ".All().AreExactly({0})"),
    );
    add(&mut m, &["BeSubsetOf"], template(".IsContainedIn({0}).InAnyOrder()", 1));
    add(&mut m, &["NotBeSubsetOf"], template(".IsNotContainedIn({0}).InAnyOrder()", 1));
    add(
        &mut m,
        &["ContainInOrder"],
        Rule::Resolved(Resolution::Params {
            collection: Template::fluent(".Contains({0}).IgnoringInterspersedItems()", 1),
            params: Template::plain(".Contains([{*}]).IgnoringInterspersedItems()"),
        }),
    );
    add(
        &mut m,
        &["ContainInConsecutiveOrder"],
        Rule::Resolved(Resolution::Params {
            collection: Template::fluent(".Contains({0})", 1),
            params: Template::plain(".Contains([{*}])"),
        }),
    );
    add(&mut m, &["ContainEquivalentOf"], template(".Contains({0}).Equivalent()", 1));
    add(
        &mut m,
        &["NotContainEquivalentOf"],
        template(".DoesNotContain({0}).Equivalent()", 1),
    );
    for (name, verb) in [
        ("BeInAscendingOrder", "IsInAscendingOrder"),
        ("NotBeInAscendingOrder", "IsNotInAscendingOrder"),
        ("BeInDescendingOrder", "IsInDescendingOrder"),
        ("NotBeInDescendingOrder", "IsNotInDescendingOrder"),
    ] {
        m.insert(name, Rule::Resolved(Resolution::Ordering { verb }));
    }
    add(&mut m, &["Contain"], Rule::Resolved(Resolution::Contain));
    add(&mut m, &["NotContain"], template(".DoesNotContain({0})", 1));

    // Equivalence
    add(
        &mut m,
        &["BeEquivalentTo"],
        Rule::Resolved(Resolution::Equivalent { negated: false }),
    );
    add(
        &mut m,
        &["NotBeEquivalentTo"],
        Rule::Resolved(Resolution::Equivalent { negated: true }),
    );

    // Exceptions
    add(&mut m, &["Throw", "ThrowAsync"], typed(".Throws<{T}>()", ".Throws({0})"));
    add(
        &mut m,
        &["ThrowExactly", "ThrowExactlyAsync"],
        typed(".ThrowsExactly<{T}>()", ".ThrowsExactly({0})"),
    );
    add(&mut m, &["NotThrow", "NotThrowAsync"], template(".DoesNotThrow()", 0));

    m
});

static XUNIT: LazyLock<HashMap<&'static str, Rule>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    let plain = |text| Rule::Template(Template::plain(text));
    let on_first = |text| Rule::Template(Template::on_first(text, None));
    let typed = |generic, by_argument| Rule::Typed {
        generic: Template::plain(generic),
        by_argument: Template::plain(by_argument),
    };

    // Equality
    add(&mut m, &["Equal"], Rule::Resolved(Resolution::XunitEqual { negated: false }));
    add(&mut m, &["NotEqual"], Rule::Resolved(Resolution::XunitEqual { negated: true }));
    add(&mut m, &["StrictEqual"], plain(".IsEqualTo({0})"));
    add(&mut m, &["NotStrictEqual"], plain(".IsNotEqualTo({0})"));
    add(&mut m, &["Same"], plain(".IsSameAs({0})"));
    add(&mut m, &["NotSame"], plain(".IsNotSameAs({0})"));
    add(&mut m, &["InRange"], on_first(".IsBetween({1}).And({2})"));
    add(&mut m, &["NotInRange"], on_first(".IsNotBetween({1}).And({2})"));

    // Null and booleans
    add(&mut m, &["Null"], plain(".IsNull()"));
    add(&mut m, &["NotNull"], plain(".IsNotNull()"));
    add(
        &mut m,
        &["True"],
        Rule::Template(Template::on_first(".IsTrue()", Some(1))),
    );
    add(
        &mut m,
        &["False"],
        Rule::Template(Template::on_first(".IsFalse()", Some(1))),
    );

    // Strings
    add(&mut m, &["StartsWith"], plain(".StartsWith({0})"));
    add(&mut m, &["EndsWith"], plain(".EndsWith({0})"));
    add(&mut m, &["Matches"], plain(".IsEqualTo({0}).AsRegex()"));
    add(&mut m, &["DoesNotMatch"], plain(".IsNotEqualTo({0}).AsRegex()"));

    // Collections
    add(
        &mut m,
        &["Contains"],
        Rule::Resolved(Resolution::XunitContains { verb: "Contains" }),
    );
    add(
        &mut m,
        &["DoesNotContain"],
        Rule::Resolved(Resolution::XunitContains {
            verb: "DoesNotContain",
        }),
    );
    add(&mut m, &["Empty"], plain(".IsEmpty()"));
    add(&mut m, &["NotEmpty"], plain(".IsNotEmpty()"));
    add(&mut m, &["Distinct"], plain(".AreAllUnique()"));
    add(&mut m, &["All"], on_first(".All().Satisfy({1})"));
    add(&mut m, &["Single"], Rule::Resolved(Resolution::XunitSingle));

    // Types
    add(&mut m, &["IsAssignableFrom"], typed(".Is<{T}>()", ".Is({0})"));
    add(&mut m, &["IsNotAssignableFrom"], typed(".IsNot<{T}>()", ".IsNot({0})"));
    add(&mut m, &["IsType"], typed(".IsExactly<{T}>()", ".IsExactly({0})"));
    add(&mut m, &["IsNotType"], typed(".IsNotExactly<{T}>()", ".IsNotExactly({0})"));

    // Exceptions
    add(
        &mut m,
        &["Throws", "ThrowsAsync"],
        typed(".ThrowsExactly<{T}>()", ".ThrowsExactly({0})"),
    );
    add(
        &mut m,
        &["ThrowsAny", "ThrowsAnyAsync"],
        typed(".Throws<{T}>()", ".Throws({0})"),
    );

    // Test outcome
    add(&mut m, &["Fail"], Rule::Template(Template::standalone("Fail.Test({*})")));
    add(&mut m, &["Skip"], Rule::Template(Template::standalone("Skip.Test({*})")));

    m
});

/// Calls chained after a fluent assertion: `.Throw<T>().WithMessage("*")`.
static MODIFIERS: LazyLock<HashMap<&'static str, Rule>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    add(&mut m, &["WithMessage"], template(".WithMessage({0}).AsWildcard()", 1));
    add(&mut m, &["WithInnerException"], typed(".WithInner<{T}>()", ".WithInner({0})"));
    add(&mut m, &["WithParameterName"], template(".WithParamName({0})", 1));
    m
});

const QUANTIFIERS: &[&str] = &["AtLeast", "AtMost", "LessThan", "MoreThan"];

/// Occurrence constraint `Quantifier.Count(...)` to suffix; `{0}` is the
/// argument of `Times(n)`.
static OCCURRENCES: LazyLock<HashMap<(&'static str, &'static str), String>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    for quantifier in QUANTIFIERS {
        m.insert((*quantifier, "Once"), format!(".{quantifier}().Once()"));
        m.insert((*quantifier, "Twice"), format!(".{quantifier}().Twice()"));
        m.insert((*quantifier, "Thrice"), format!(".{quantifier}(3.Times())"));
        m.insert((*quantifier, "Times"), format!(".{quantifier}({{0}})"));
    }
    m.insert(("Exactly", "Once"), ".Once()".to_string());
    m.insert(("Exactly", "Twice"), ".Twice()".to_string());
    m.insert(("Exactly", "Thrice"), ".Exactly(3.Times())".to_string());
    m.insert(("Exactly", "Times"), ".Exactly({0})".to_string());
    m
});

/// Rule for the entry method of a call site.
pub fn lookup(library: Library, method: &str) -> Option<&'static Rule> {
    match library {
        Library::FluentAssertions => FLUENT.get(method),
        Library::Xunit => XUNIT.get(method),
    }
}

/// Rule for a call chained after a fluent assertion.
pub fn modifier(method: &str) -> Option<&'static Rule> {
    MODIFIERS.get(method)
}

/// Suffix template for an occurrence constraint such as `AtLeast.Twice()`.
pub fn occurrence(quantifier: &str, count: &str) -> Option<&'static str> {
    OCCURRENCES
        .iter()
        .find(|((q, c), _)| *q == quantifier && *c == count)
        .map(|(_, suffix)| suffix.as_str())
}

/// Number of entry methods known for `library`.
pub fn len(library: Library) -> usize {
    match library {
        Library::FluentAssertions => FLUENT.len(),
        Library::Xunit => XUNIT.len(),
    }
}
