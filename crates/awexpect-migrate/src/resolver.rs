//! Ambiguity resolver.
//!
//! Turns a catalog [`Rule`] into a concrete [`Shape`] for one call. Most
//! rules are fixed; the [`Resolution`] cases ask the semantic model about
//! the subject, the arguments, or the overload a call binds to. An unknown
//! answer always selects the default branch.

use awexpect_migrate_ast::{Argument, Expr, ExprKind, SimpleName};
use awexpect_migrate_semantic::{is_occurrence_constraint, CallSite, SemanticModel, TypeRef};
use tracing::debug;

use crate::catalog::{self, Library, Resolution, Rule, SubjectArg, Template};
use crate::report::SkipReason;

/// Option toggles recognized inside an equivalency options lambda, matched
/// as substrings of its source text.
const TEXT_OPTIONS: &[(&str, &str)] = &[
    ("IgnoringCase()", ".IgnoringCase()"),
    ("IgnoringLeadingWhitespace()", ".IgnoringLeadingWhiteSpace()"),
    ("IgnoringTrailingWhitespace()", ".IgnoringTrailingWhiteSpace()"),
    ("IgnoringNewlineStyle()", ".IgnoringNewlineStyle()"),
];

const STRICT_ORDERING: &str = "WithStrictOrdering()";

/// A rule applied to one call: output template plus argument roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub text: String,
    pub subject: SubjectArg,
    pub because: Option<usize>,
    /// Positional arguments consumed by the resolver itself, such as an
    /// options lambda or an occurrence constraint.
    pub absorbed: Vec<usize>,
}

impl Shape {
    fn fluent(text: impl Into<String>, because: usize) -> Self {
        Self {
            text: text.into(),
            subject: SubjectArg::Actual,
            because: Some(because),
            absorbed: Vec::new(),
        }
    }

    fn plain(text: impl Into<String>, subject: SubjectArg) -> Self {
        Self {
            text: text.into(),
            subject,
            because: None,
            absorbed: Vec::new(),
        }
    }

    fn absorbing(mut self, index: usize) -> Self {
        self.absorbed.push(index);
        self
    }
}

impl From<Template> for Shape {
    fn from(template: Template) -> Self {
        Self {
            text: template.text.to_string(),
            subject: template.subject,
            because: template.because,
            absorbed: Vec::new(),
        }
    }
}

/// Positional (unnamed) arguments in source order.
pub fn positional(args: &[Argument]) -> Vec<&Expr> {
    args.iter()
        .filter(|arg| arg.name.is_none())
        .map(|arg| &arg.expr)
        .collect()
}

/// Index of the reason parameter in a bound signature: a `string` followed
/// only by the `object[]` reason arguments.
pub fn reason_position(types: &[TypeRef]) -> Option<usize> {
    types.iter().enumerate().position(|(index, ty)| {
        ty.name() == "string" && types[index + 1..].iter().all(|rest| rest.name() == "object[]")
    })
}

/// One call whose rule is being resolved.
struct Call<'a> {
    library: Library,
    method: &'a str,
    args: &'a [Argument],
    positional: Vec<&'a Expr>,
    subject: Option<&'a Expr>,
    source: &'a str,
    model: &'a dyn SemanticModel,
}

impl Call<'_> {
    fn bound(&self) -> Option<Vec<TypeRef>> {
        self.model.parameter_types(&CallSite {
            container: self.library.container(),
            method: self.method,
            args: self.args,
        })
    }

    fn subject_type(&self) -> Option<TypeRef> {
        self.subject.and_then(|subject| self.model.type_of(subject))
    }

    fn arg_text(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(|expr| expr.text(self.source))
    }

    /// Because index from the bound overload, else `fallback`.
    fn because(&self, bound: Option<&[TypeRef]>, fallback: usize) -> usize {
        bound.and_then(reason_position).unwrap_or(fallback)
    }

    /// Text of an options lambda bound at `index`, if one was passed.
    fn options(&self, bound: Option<&[TypeRef]>, index: usize) -> Option<&str> {
        let bound_delegate = bound.and_then(|types| types.get(index)).is_some_and(TypeRef::is_delegate);
        if bound_delegate {
            self.arg_text(index)
        } else {
            None
        }
    }
}

/// Resolve `rule` for a call to `method` with `args`.
///
/// `subject` is the fluent receiver; xunit calls pass `None` and name their
/// subject through [`Shape::subject`].
pub fn resolve(
    rule: &Rule,
    library: Library,
    method: &SimpleName,
    args: &[Argument],
    subject: Option<&Expr>,
    source: &str,
    model: &dyn SemanticModel,
) -> Result<Shape, SkipReason> {
    match rule {
        // type arguments would be dropped
        Rule::Template(template) if method.is_generic() && !template.text.contains("{T}") => {
            Err(SkipReason::UnsupportedChain)
        }
        Rule::Template(template) => Ok((*template).into()),
        Rule::Typed {
            generic,
            by_argument,
        } => Ok(if method.is_generic() { *generic } else { *by_argument }.into()),
        Rule::Resolved(resolution) => {
            let call = Call {
                library,
                method: &method.ident,
                args,
                positional: positional(args),
                subject,
                source,
                model,
            };
            let shape = resolve_case(*resolution, &call)?;
            debug!("{} resolved to {}", method.ident, shape.text);
            Ok(shape)
        }
    }
}

fn resolve_case(resolution: Resolution, call: &Call<'_>) -> Result<Shape, SkipReason> {
    match resolution {
        Resolution::ValueOrNull {
            with_value,
            without_value,
        } => {
            let bound = call.bound();
            let reason_only = bound.as_deref().and_then(reason_position) == Some(0);
            Ok(if call.positional.is_empty() || reason_only {
                without_value.into()
            } else {
                with_value.into()
            })
        }
        Resolution::Equivalent { negated } => Ok(equivalent(call, negated)),
        Resolution::AllEquivalent => Ok(all_equivalent(call)),
        Resolution::Contain => contain(call),
        Resolution::ContainSingle => {
            let bound = call.bound();
            let reason_first = bound.as_deref().and_then(reason_position) == Some(0);
            Ok(if call.positional.is_empty() || reason_first {
                Shape::fluent(".HasSingle()", 0)
            } else {
                Shape::fluent(".HasSingle().Matching({0})", 1)
            })
        }
        Resolution::Params { collection, params } => {
            let collection_form = match call.bound() {
                Some(types) => types.first().is_some_and(|ty| !ty.is_array() && ty.is_enumerable()),
                None => call.positional.len() <= 1,
            };
            Ok(if collection_form { collection } else { params }.into())
        }
        Resolution::Ordering { verb } => Ok(ordering(call, verb)),
        Resolution::XunitEqual { negated } => xunit_equal(call, negated),
        Resolution::XunitContains { verb } => {
            let swapped = call
                .bound()
                .and_then(|types| types.get(1).map(TypeRef::is_delegate))
                .unwrap_or(false);
            Ok(if swapped {
                Shape::plain(format!(".{verb}({{1}})"), SubjectArg::First)
            } else {
                Shape::plain(format!(".{verb}({{0}})"), SubjectArg::Actual)
            })
        }
        Resolution::XunitSingle => match call.positional.len() {
            1 => Ok(Shape::plain(".HasSingle()", SubjectArg::First)),
            2 => {
                let predicate = call.positional[1].strip_parens().is_lambda()
                    || call
                        .bound()
                        .and_then(|types| types.get(1).map(TypeRef::is_delegate))
                        .unwrap_or(false);
                Ok(if predicate {
                    Shape::plain(".HasSingle().Matching({1})", SubjectArg::First)
                } else {
                    Shape::plain(".Contains({1}).Once()", SubjectArg::First)
                })
            }
            _ => Err(SkipReason::UnsupportedChain),
        },
    }
}

/// Suffixes for the text options mentioned in `options`.
fn text_option_suffix(options: Option<&str>, case_implied: bool) -> String {
    let Some(options) = options else {
        return String::new();
    };
    TEXT_OPTIONS
        .iter()
        .filter(|(toggle, _)| options.contains(toggle))
        .filter(|(toggle, _)| !(case_implied && *toggle == "IgnoringCase()"))
        .map(|(_, suffix)| *suffix)
        .collect()
}

fn equivalent(call: &Call<'_>, negated: bool) -> Shape {
    let bound = call.bound();
    let options = call.options(bound.as_deref(), 1);
    let because = if options.is_some() { 2 } else { 1 };
    let (equal, equivalent) = if negated {
        ("IsNotEqualTo", "IsNotEquivalentTo")
    } else {
        ("IsEqualTo", "IsEquivalentTo")
    };

    let subject = call.subject_type();
    let expected = call.positional.first().and_then(|expr| call.model.type_of(expr));
    let shape = if subject.as_ref().is_some_and(TypeRef::is_string) {
        let mut text = format!(".{equal}({{0}}).IgnoringCase()");
        text.push_str(&text_option_suffix(options, true));
        Shape::fluent(text, because)
    } else if subject.as_ref().is_some_and(TypeRef::is_enumerable)
        && expected.as_ref().map_or(true, TypeRef::is_enumerable)
    {
        let mut text = format!(".{equal}({{0}})");
        if !options.is_some_and(|options| options.contains(STRICT_ORDERING)) {
            text.push_str(".InAnyOrder()");
        }
        Shape::fluent(text, because)
    } else {
        Shape::fluent(format!(".{equivalent}({{0}})"), because)
    };

    if options.is_some() {
        shape.absorbing(1)
    } else {
        shape
    }
}

fn all_equivalent(call: &Call<'_>) -> Shape {
    let bound = call.bound();
    let options = call.options(bound.as_deref(), 1);
    let because = if options.is_some() { 2 } else { 1 };
    let element = call.subject_type().and_then(|ty| ty.element_type());

    let shape = if element.as_ref().is_some_and(TypeRef::is_string) {
        let mut text = ".All().AreEqualTo({0})".to_string();
        text.push_str(&text_option_suffix(options, false));
        Shape::fluent(text, because)
    } else {
        Shape::fluent(".All().AreEquivalentTo({0})", because)
    };

    if options.is_some() {
        shape.absorbing(1)
    } else {
        shape
    }
}

/// `Quantifier.Count(n)` split into its parts.
fn occurrence_parts<'e>(expr: &'e Expr, source: &'e str) -> Option<(String, &'e str, Option<&'e str>)> {
    let ExprKind::Invocation { callee, args } = &expr.kind else {
        return None;
    };
    let ExprKind::MemberAccess { target, name, .. } = &callee.kind else {
        return None;
    };
    let path = target.dotted_path()?;
    let quantifier = path.rsplit('.').next().unwrap_or(&path).to_string();
    let count = args.first().map(|arg| arg.expr.text(source));
    Some((quantifier, &name.ident, count))
}

fn contain(call: &Call<'_>) -> Result<Shape, SkipReason> {
    if let Some(constraint) = call
        .positional
        .get(1)
        .filter(|expr| is_occurrence_constraint(expr))
    {
        let (quantifier, count, times) =
            occurrence_parts(constraint, call.source).ok_or(SkipReason::UnsupportedChain)?;
        let suffix = catalog::occurrence(&quantifier, count).ok_or(SkipReason::UnsupportedChain)?;
        let suffix = if suffix.contains("{0}") {
            let times = times
                .filter(|times| !times.contains('{'))
                .ok_or(SkipReason::UnsupportedChain)?;
            suffix.replace("{0}", times)
        } else {
            suffix.to_string()
        };
        return Ok(Shape::fluent(format!(".Contains({{0}}){suffix}"), 2).absorbing(1));
    }

    let subject = call.subject_type();
    let expected = call.positional.first().and_then(|expr| call.model.type_of(expr));
    let both_collections = subject.as_ref().is_some_and(TypeRef::is_enumerable)
        && expected.as_ref().is_some_and(TypeRef::is_enumerable);
    Ok(if both_collections {
        Shape::fluent(".Contains({0}).InAnyOrder().IgnoringInterspersedItems()", 1)
    } else {
        Shape::fluent(".Contains({0})", 1)
    })
}

fn ordering(call: &Call<'_>, verb: &str) -> Shape {
    let bound = call.bound();
    let first = bound.as_ref().and_then(|types| types.first());
    let second = bound.as_ref().and_then(|types| types.get(1));
    let shape = match (first, second) {
        (Some(first), _) if first.is_comparer() => Shape::fluent(format!(".{verb}().Using({{0}})"), 1),
        (Some(first), Some(second)) if first.is_delegate() && second.is_comparer() => {
            Shape::fluent(format!(".{verb}({{0}}).Using({{1}})"), 2)
        }
        (Some(first), _) if first.is_delegate() => Shape::fluent(format!(".{verb}({{0}})"), 1),
        _ => Shape::fluent(format!(".{verb}()"), 0),
    };
    let because = call.because(bound.as_deref(), shape.because.unwrap_or(0));
    Shape {
        because: Some(because),
        ..shape
    }
}

fn xunit_equal(call: &Call<'_>, negated: bool) -> Result<Shape, SkipReason> {
    let verb = if negated { "IsNotEqualTo" } else { "IsEqualTo" };
    match call.positional.len() {
        2 => {
            let enumerable = |expr: &Expr| call.model.is_enumerable(expr);
            let sequences = enumerable(call.positional[0]) && enumerable(call.positional[1]);
            Ok(if sequences {
                let verb = if negated { "IsNotEquivalentTo" } else { "IsEquivalentTo" };
                Shape::plain(format!(".{verb}({{0}})"), SubjectArg::Actual)
            } else {
                Shape::plain(format!(".{verb}({{0}})"), SubjectArg::Actual)
            })
        }
        3 => {
            let bound = call.bound().ok_or(SkipReason::UnsupportedChain)?;
            let comparer = bound.get(2).is_some_and(TypeRef::is_comparer);
            Ok(if comparer {
                Shape::plain(format!(".{verb}({{0}}).Using({{2}})"), SubjectArg::Actual)
            } else {
                Shape::plain(format!(".{verb}({{0}}).Within({{2}})"), SubjectArg::Actual)
            })
        }
        _ => Err(SkipReason::UnsupportedChain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awexpect_migrate_parser::{scan_expressions, tokenize};
    use awexpect_migrate_semantic::DeclarationIndex;
    use indexmap::IndexMap;

    /// Resolve the entry call of `statement` with the declarations in `arrange`.
    fn shape(library: Library, arrange: &str, statement: &str) -> Result<Shape, SkipReason> {
        let source = format!("{arrange}\n{statement};");
        let lexed = tokenize(&source);
        let hints = IndexMap::new();
        let index = DeclarationIndex::build(&source, &lexed.tokens, &hints);

        let offset = arrange.len() as u32 + 1;
        let expr = scan_expressions(&lexed.tokens)
            .into_iter()
            .find(|found| found.span.start == offset)
            .unwrap();
        let ExprKind::Invocation { callee, args } = &expr.kind else {
            panic!("not a call: {statement}");
        };
        let ExprKind::MemberAccess { name, .. } = &callee.kind else {
            panic!("not a member call: {statement}");
        };
        let subject = match library {
            Library::FluentAssertions => crate::walker::walk_fluent(&expr).ok().map(|chain| chain.subject),
            Library::Xunit => None,
        };
        let rule = catalog::lookup(library, &name.ident).unwrap();
        resolve(rule, library, name, args, subject, &source, &index)
    }

    fn fluent(arrange: &str, statement: &str) -> Shape {
        shape(Library::FluentAssertions, arrange, statement).unwrap()
    }

    #[test]
    fn test_reason_position() {
        let types: Vec<TypeRef> = ["T", "string", "object[]", "object[]"].iter().map(TypeRef::new).collect();
        assert_eq!(reason_position(&types), Some(1));
        let types: Vec<TypeRef> = ["string", "OccurrenceConstraint"].iter().map(TypeRef::new).collect();
        assert_eq!(reason_position(&types), None);
    }

    #[test]
    fn test_equivalent_branches() {
        let object = fluent("object subject = new object();", "subject.Should().BeEquivalentTo(expected)");
        assert_eq!(object.text, ".IsEquivalentTo({0})");

        let array = fluent("int[] subject = [];int[] expected = [];", "subject.Should().BeEquivalentTo(expected)");
        assert_eq!(array.text, ".IsEqualTo({0}).InAnyOrder()");

        let strict = fluent(
            "int[] subject = [];int[] expected = [];",
            "subject.Should().BeEquivalentTo(expected, o => o.WithStrictOrdering(), \"reason\")",
        );
        assert_eq!(strict.text, ".IsEqualTo({0})");
        assert_eq!(strict.because, Some(2));
        assert_eq!(strict.absorbed, vec![1]);

        let text = fluent(
            "string subject = \"foo\";",
            "subject.Should().NotBeEquivalentTo(expected, o => o.IgnoringNewlineStyle())",
        );
        assert_eq!(text.text, ".IsNotEqualTo({0}).IgnoringCase().IgnoringNewlineStyle()");
    }

    #[test]
    fn test_all_equivalent_uses_element_type() {
        let strings = fluent(
            "string[] subject = [];",
            "subject.Should().AllBeEquivalentTo(\"2\", o => o.IgnoringCase())",
        );
        assert_eq!(strings.text, ".All().AreEqualTo({0}).IgnoringCase()");
        let numbers = fluent("IEnumerable<int> subject = [];", "subject.Should().AllBeEquivalentTo(1)");
        assert_eq!(numbers.text, ".All().AreEquivalentTo({0})");
    }

    #[test]
    fn test_contain_with_occurrence() {
        let shape = fluent("string subject = \"\";", "subject.Should().Contain(\"a\", AtMost.Times(count))");
        assert_eq!(shape.text, ".Contains({0}).AtMost(count)");
        assert_eq!(shape.because, Some(2));
        assert_eq!(shape.absorbed, vec![1]);
    }

    #[test]
    fn test_contain_collection_in_collection() {
        let shape = fluent("int[] subject = [];int[] expected = [];", "subject.Should().Contain(expected)");
        assert_eq!(shape.text, ".Contains({0}).InAnyOrder().IgnoringInterspersedItems()");
        let string = fluent("string subject = \"foo\";", "subject.Should().Contain(\"oo\")");
        assert_eq!(string.text, ".Contains({0})");
    }

    #[test]
    fn test_value_or_null() {
        assert_eq!(fluent("int? subject = 1;", "subject.Should().HaveValue()").text, ".IsNotNull()");
        assert_eq!(
            fluent("int? subject = 1;", "subject.Should().HaveValue(\"because\")").because,
            Some(0)
        );
        assert_eq!(fluent("int? subject = 1;", "subject.Should().NotHaveValue(2)").text, ".DoesNotHaveValue({0})");
    }

    #[test]
    fn test_ordering_shapes() {
        let arrange = "string[] subject = [];";
        assert_eq!(
            fluent(arrange, "subject.Should().BeInAscendingOrder(StringComparer.Ordinal)").text,
            ".IsInAscendingOrder().Using({0})"
        );
        let selector = fluent(arrange, "subject.Should().BeInDescendingOrder(x => x.Length, StringComparer.Ordinal)");
        assert_eq!(selector.text, ".IsInDescendingOrder({0}).Using({1})");
        assert_eq!(selector.because, Some(2));
        let reason = fluent(arrange, "subject.Should().NotBeInAscendingOrder(\"because\")");
        assert_eq!(reason.text, ".IsNotInAscendingOrder()");
        assert_eq!(reason.because, Some(0));
    }

    #[test]
    fn test_params_or_collection() {
        let arrange = "int subject = 1;int[] expected = [2, 3];";
        assert_eq!(fluent(arrange, "subject.Should().BeOneOf(expected)").text, ".IsOneOf({0})");
        assert_eq!(fluent(arrange, "subject.Should().BeOneOf(2, 3, 4)").text, ".IsOneOf({*})");
    }

    #[test]
    fn test_xunit_branches() {
        let xunit = |arrange, statement| shape(Library::Xunit, arrange, statement).unwrap();
        let swapped = xunit("int[] subject = [];", "Assert.Contains(subject, x => x == 1)");
        assert_eq!(swapped.text, ".Contains({1})");
        assert_eq!(swapped.subject, SubjectArg::First);

        let tolerance = xunit("", "Assert.Equal(1.0, 1.1, 0.1)");
        assert_eq!(tolerance.text, ".IsEqualTo({0}).Within({2})");
        let sequences = xunit("int[] a = [];int[] b = [];", "Assert.NotEqual(a, b)");
        assert_eq!(sequences.text, ".IsNotEquivalentTo({0})");
        let single = xunit("int[] subject = [];", "Assert.Single(subject, x => x > 1)");
        assert_eq!(single.text, ".HasSingle().Matching({1})");

        assert_eq!(
            shape(Library::Xunit, "", "Assert.Equal(a, b, true, true)"),
            Err(SkipReason::UnsupportedChain)
        );
    }
}
