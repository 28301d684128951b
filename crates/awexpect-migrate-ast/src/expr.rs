//! Expression nodes.
//!
//! # Design
//!
//! - **Spans, not strings** - nodes keep their source span; text is recovered
//!   by slicing the source, so rewrites copy original spelling verbatim
//! - **Opaque regions** - statement blocks in lambda bodies and object
//!   initializers are not parsed, only delimited (see [`LambdaBody::Block`])
//! - **Types as syntax** - [`TypeSyntax`] keeps a normalized spelling for
//!   semantic lookups, never a resolved type

use crate::span::Span;

/// Parsed expression with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Kind of expression
    pub kind: ExprKind,
    /// Source location
    pub span: Span,
}

/// Expression kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Identifier, optionally with type arguments: `subject`, `Foo<int>`
    Name(SimpleName),

    /// Literal value
    Literal(Literal),

    /// `this`
    This,

    /// `base`
    Base,

    /// Member access `target.name`, or `target?.name` when `conditional`
    MemberAccess {
        /// Receiver expression
        target: Box<Expr>,
        /// Accessed member
        name: SimpleName,
        /// True for the null-conditional form `?.`
        conditional: bool,
    },

    /// Invocation `callee(args)`
    Invocation {
        /// Invoked expression (usually a name or member access)
        callee: Box<Expr>,
        /// Argument list in source order
        args: Vec<Argument>,
    },

    /// Element access `target[args]`
    ElementAccess {
        /// Indexed expression
        target: Box<Expr>,
        /// Index arguments
        args: Vec<Argument>,
    },

    /// Parenthesized expression
    Paren(Box<Expr>),

    /// Lambda expression `(a, b) => body`
    Lambda {
        /// Parameter names (types dropped)
        params: Vec<String>,
        /// Expression or statement body
        body: LambdaBody,
        /// True for `async` lambdas
        is_async: bool,
    },

    /// Prefix operator
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },

    /// Postfix `++`, `--` or null-forgiving `!`
    Postfix {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },

    /// Binary operator, assignments included
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },

    /// Conditional `condition ? then : else`
    Conditional {
        /// Condition
        condition: Box<Expr>,
        /// Value when true
        then_branch: Box<Expr>,
        /// Value when false
        else_branch: Box<Expr>,
    },

    /// Cast `(T)operand`
    Cast {
        /// Target type
        ty: TypeSyntax,
        /// Cast operand
        operand: Box<Expr>,
    },

    /// `operand is pattern` or `operand as T`
    TypeTest {
        /// Which operator
        op: TypeTestOp,
        /// Tested operand
        operand: Box<Expr>,
        /// Pattern text span (type, constant or `not null`)
        pattern: Span,
        /// Tested type when the pattern is a plain type
        ty: Option<TypeSyntax>,
    },

    /// Object creation `new T(args) { init }`, `new()`, `new[] { ... }`, `new { ... }`
    New {
        /// Created type, `None` for target-typed and anonymous forms
        ty: Option<TypeSyntax>,
        /// Constructor arguments, `None` when no parentheses were written
        args: Option<Vec<Argument>>,
        /// Initializer block span, braces included
        initializer: Option<Span>,
    },

    /// `typeof(T)`
    TypeOf(TypeSyntax),

    /// `default` or `default(T)`
    Default(Option<TypeSyntax>),

    /// `await operand`
    Await(Box<Expr>),

    /// Throw expression `throw operand`
    Throw(Box<Expr>),

    /// Collection expression `[a, b, ..rest]`
    Collection(Vec<Expr>),

    /// Tuple literal `(a, b)`
    Tuple(Vec<Expr>),

    /// Range `start..end`, or spread `..items` inside a collection expression
    Range {
        /// Lower bound
        start: Option<Box<Expr>>,
        /// Upper bound
        end: Option<Box<Expr>>,
    },

    /// Declaration expression `var x` (as in `out var x`)
    Declaration {
        /// Declared type (`var` included)
        ty: TypeSyntax,
        /// Declared name
        name: String,
    },
}

/// Identifier with optional generic arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleName {
    /// Identifier text, `global::` alias included when written
    pub ident: String,
    /// Type arguments (`<T, U>`)
    pub type_args: Vec<TypeSyntax>,
    /// Source location of the identifier and its type arguments
    pub span: Span,
}

impl SimpleName {
    /// Whether type arguments were written.
    pub fn is_generic(&self) -> bool {
        !self.type_args.is_empty()
    }
}

/// Type as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSyntax {
    /// Normalized spelling: `List<int>`, `string[]`, `int?`, `(int, string)`
    pub name: String,
    /// Source location
    pub span: Span,
}

/// Invocation argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Name for named arguments (`because: "..."`)
    pub name: Option<String>,
    /// `ref`, `out` or `in`
    pub modifier: Option<ArgModifier>,
    /// Argument value
    pub expr: Expr,
    /// Source location of the whole argument, name and modifier included
    pub span: Span,
}

/// Argument passing modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgModifier {
    /// `ref`
    Ref,
    /// `out`
    Out,
    /// `in`
    In,
}

/// Lambda body.
#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    /// Expression body
    Expr(Box<Expr>),
    /// Statement block, braces included; its contents are not parsed
    Block(Span),
}

/// Literal with its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Kind of literal
    pub kind: LiteralKind,
    /// Source text, quotes and suffix included
    pub text: String,
}

/// Literal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// Integral number
    Integer,
    /// Number with a fraction, exponent or real suffix
    Real,
    /// Regular, verbatim or raw string
    String,
    /// Interpolated string
    InterpolatedString,
    /// Character
    Char,
    /// `true` or `false`
    Bool,
    /// `null`
    Null,
}

/// Prefix and postfix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `+`
    Plus,
    /// `!` (prefix), null-forgiving `!` (postfix)
    Not,
    /// `~`
    BitNot,
    /// `^` index-from-end
    Hat,
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `=` and compound assignments
    Assign,
    /// `??`
    Coalesce,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
}

/// Type-testing operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTestOp {
    /// `is`
    Is,
    /// `as`
    As,
}

impl Expr {
    /// Create a new expression.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Source text of this expression.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Innermost expression inside any number of parentheses.
    pub fn strip_parens(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Paren(inner) = &expr.kind {
            expr = inner;
        }
        expr
    }

    /// Literal kind, if this is a literal.
    pub fn literal_kind(&self) -> Option<LiteralKind> {
        match &self.kind {
            ExprKind::Literal(lit) => Some(lit.kind),
            _ => None,
        }
    }

    /// Whether this is a string literal (interpolated strings included).
    pub fn is_string_literal(&self) -> bool {
        matches!(
            self.literal_kind(),
            Some(LiteralKind::String | LiteralKind::InterpolatedString)
        )
    }

    /// Whether this is a numeric literal, optionally negated.
    pub fn is_numeric_literal(&self) -> bool {
        match &self.kind {
            ExprKind::Literal(lit) => matches!(lit.kind, LiteralKind::Integer | LiteralKind::Real),
            ExprKind::Unary {
                op: UnaryOp::Neg | UnaryOp::Plus,
                operand,
            } => operand.is_numeric_literal(),
            _ => false,
        }
    }

    /// Whether this is a lambda expression.
    pub fn is_lambda(&self) -> bool {
        matches!(self.kind, ExprKind::Lambda { .. })
    }

    /// Simple identifier text, if this is a plain name.
    pub fn as_name(&self) -> Option<&SimpleName> {
        match &self.kind {
            ExprKind::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Dotted path of a name or member-access chain: `Xunit.Assert.Equal`.
    ///
    /// Returns `None` when any link is something other than a name, so
    /// `Get().Value` has no path.
    pub fn dotted_path(&self) -> Option<String> {
        match &self.kind {
            ExprKind::Name(name) => Some(name.ident.clone()),
            ExprKind::MemberAccess {
                target,
                name,
                conditional: false,
            } => {
                let mut path = target.dotted_path()?;
                path.push('.');
                path.push_str(&name.ident);
                Some(path)
            }
            _ => None,
        }
    }
}
