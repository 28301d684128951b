// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for C# test sources.
//!
//! This crate tokenizes the subset of C# the assertion migrator needs to
//! understand expressions: identifiers, keywords that start or end
//! statements, operators, and every literal form the language has.
//!
//! # Design
//!
//! - `Token`: all token types (keywords, operators, literals, identifiers)
//! - Whitespace, comments and preprocessor lines are stripped during lexing
//! - Literal tokens keep their exact source text so rewrites can copy them
//! - Token strings defined once in `TOKEN_STRINGS` table (single source of truth for Display)
//!
//! # Examples
//!
//! ```
//! # use awexpect_migrate_lexer::*;
//! let lexed = tokenize("subject.Should().Be(42);");
//! assert!(lexed.errors.is_empty());
//! assert_eq!(lexed.tokens.len(), 11);
//! ```

use logos::{FilterResult, Logos};
use std::ops::Range;
use std::rc::Rc;

/// C# token.
///
/// Token strings for keywords, operators, and delimiters are defined once
/// in the `TOKEN_STRINGS` table and indexed by discriminant for Display.
/// Data-carrying variants are declared last so the table stays dense.
///
/// # Layout
///
/// Uses `#[repr(u16)]` to guarantee discriminant values are stable and
/// can be safely used to index into `TOKEN_STRINGS`.
#[derive(Logos, Debug, Clone, PartialEq)]
#[repr(u16)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip line and doc comments
#[logos(skip r"#[^\n]*")] // Skip preprocessor directives
pub enum Token {
    // === Keywords ===

    // Expression keywords
    /// Keyword `new`
    #[token("new")]
    New,
    /// Keyword `typeof`
    #[token("typeof")]
    Typeof,
    /// Keyword `default`
    #[token("default")]
    Default,
    /// Keyword `await`
    #[token("await")]
    Await,
    /// Keyword `null`
    #[token("null")]
    Null,
    /// Keyword `true`
    #[token("true")]
    True,
    /// Keyword `false`
    #[token("false")]
    False,
    /// Keyword `this`
    #[token("this")]
    This,
    /// Keyword `base`
    #[token("base")]
    Base,
    /// Keyword `is`
    #[token("is")]
    Is,
    /// Keyword `as`
    #[token("as")]
    As,
    /// Keyword `throw`
    #[token("throw")]
    Throw,

    // Argument modifiers
    /// Keyword `ref`
    #[token("ref")]
    Ref,
    /// Keyword `out`
    #[token("out")]
    Out,
    /// Keyword `in`
    #[token("in")]
    In,

    // Statement keywords
    /// Keyword `return`
    #[token("return")]
    Return,
    /// Keyword `if`
    #[token("if")]
    If,
    /// Keyword `else`
    #[token("else")]
    Else,
    /// Keyword `while`
    #[token("while")]
    While,
    /// Keyword `for`
    #[token("for")]
    For,
    /// Keyword `foreach`
    #[token("foreach")]
    Foreach,
    /// Keyword `do`
    #[token("do")]
    Do,
    /// Keyword `switch`
    #[token("switch")]
    Switch,
    /// Keyword `case`
    #[token("case")]
    Case,
    /// Keyword `using`
    #[token("using")]
    Using,
    /// Keyword `lock`
    #[token("lock")]
    Lock,
    /// Keyword `try`
    #[token("try")]
    Try,
    /// Keyword `catch`
    #[token("catch")]
    Catch,
    /// Keyword `finally`
    #[token("finally")]
    Finally,
    /// Keyword `yield`
    #[token("yield")]
    Yield,
    /// Keyword `delegate`
    #[token("delegate")]
    Delegate,

    // === Operators ===

    // Member access
    /// `.`
    #[token(".")]
    Dot,
    /// `?.`
    #[token("?.")]
    QuestionDot,
    /// `::`
    #[token("::")]
    ColonColon,
    /// `..`
    #[token("..")]
    DotDot,

    // Conditional
    /// `?`
    #[token("?")]
    Question,
    /// `??`
    #[token("??")]
    QuestionQuestion,
    /// `:`
    #[token(":")]
    Colon,

    // Arithmetic
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    /// `/`; also skips `/* */` comments (see [`lex_slash`])
    #[token("/", lex_slash)]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,

    // Comparison
    /// `==`
    #[token("==")]
    EqEq,
    /// `!=`
    #[token("!=")]
    BangEq,
    /// `<`
    #[token("<")]
    Lt,
    /// `<=`
    #[token("<=")]
    LtEq,
    /// `>` (never fused into `>>`, generic argument lists rely on it)
    #[token(">")]
    Gt,
    /// `>=`
    #[token(">=")]
    GtEq,

    // Logic and bitwise
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `!`
    #[token("!")]
    Bang,
    /// `&`
    #[token("&")]
    Amp,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,

    // Assignment
    /// `=`
    #[token("=")]
    Eq,
    /// `=>`
    #[token("=>")]
    FatArrow,
    /// `+=`
    #[token("+=")]
    PlusEq,
    /// `-=`
    #[token("-=")]
    MinusEq,
    /// `*=`
    #[token("*=")]
    StarEq,
    /// `/=`
    #[token("/=")]
    SlashEq,
    /// `%=`
    #[token("%=")]
    PercentEq,
    /// `&=`
    #[token("&=")]
    AmpEq,
    /// `|=`
    #[token("|=")]
    PipeEq,
    /// `^=`
    #[token("^=")]
    CaretEq,
    /// `??=`
    #[token("??=")]
    QuestionQuestionEq,

    // === Delimiters ===
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semi,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,

    // === Literals and identifiers (carry source text) ===
    /// Numeric literal, suffix included (`42`, `0.5m`, `0x1F`, `1_000L`)
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?[fFdDmMuUlL]*", source_text)]
    #[regex(r"0[xX][0-9a-fA-F_]+[uUlL]*", source_text)]
    #[regex(r"0[bB][01_]+[uUlL]*", source_text)]
    Number(Rc<str>),

    /// Regular, verbatim or raw string literal, quotes included
    #[regex(r#""([^"\\\n]|\\.)*""#, source_text)]
    #[regex(r#"@"([^"]|"")*""#, source_text)]
    #[token("\"\"\"", lex_raw_string)]
    Str(Rc<str>),

    /// Interpolated string literal (`$"..."`, `$@"..."`, `@$"..."`, `$"""..."""`)
    #[regex(r#"\$+@?""#, lex_interpolated_string)]
    #[regex(r#"@\$+""#, lex_interpolated_string)]
    InterpolatedStr(Rc<str>),

    /// Character literal, quotes included
    #[regex(r"'(\\.[^'\n]*|[^'\\\n])'", source_text)]
    Char(Rc<str>),

    /// Identifier; contextual keywords (`var`, `async`, `not`, `nameof`) and
    /// predefined type names (`int`, `string`) are identifiers too
    #[regex(r"@?[A-Za-z_][A-Za-z0-9_]*", source_text)]
    Ident(Rc<str>),
}

/// Emit `/`, or skip a whole `/* ... */` comment starting at it.
///
/// An unterminated comment is an error covering the rest of the input.
fn lex_slash(lex: &mut logos::Lexer<Token>) -> FilterResult<(), ()> {
    let rest = lex.remainder();
    let Some(body) = rest.strip_prefix('*') else {
        return FilterResult::Emit(());
    };
    match body.find("*/") {
        Some(end) => {
            lex.bump(1 + end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(rest.len());
            FilterResult::Error(())
        }
    }
}

fn source_text(lex: &mut logos::Lexer<Token>) -> Rc<str> {
    Rc::from(lex.slice())
}

/// Consume a raw string literal after its opening `"""`.
///
/// The opening run may be longer than three quotes; the literal closes at
/// the first run of the same length.
fn lex_raw_string(lex: &mut logos::Lexer<Token>) -> Option<Rc<str>> {
    let rest = lex.remainder();
    let extra = rest.bytes().take_while(|b| *b == b'"').count();
    let consumed = scan_raw_body(&rest[extra..], 3 + extra)?;
    lex.bump(extra + consumed);
    Some(Rc::from(lex.slice()))
}

/// Length of a raw string body up to and including its closing quote run.
fn scan_raw_body(body: &str, quotes: usize) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            let run = bytes[i..].iter().take_while(|b| **b == b'"').count();
            if run >= quotes {
                return Some(i + run);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}

fn lex_interpolated_string(lex: &mut logos::Lexer<Token>) -> Option<Rc<str>> {
    let verbatim = lex.slice().contains('@');
    let rest = lex.remainder();
    let consumed = if rest.starts_with("\"\"") {
        // `$"""` opens a raw interpolated literal
        let extra = rest.bytes().take_while(|b| *b == b'"').count();
        extra + scan_raw_body(&rest[extra..], 1 + extra)?
    } else {
        scan_interpolated_body(rest, verbatim)?
    };
    lex.bump(consumed);
    Some(Rc::from(lex.slice()))
}

/// Length of an interpolated string body up to and including the closing quote.
///
/// Interpolation holes may nest braces and contain string or character
/// literals of their own, including further interpolated strings.
fn scan_interpolated_body(body: &str, verbatim: bool) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 0;
    let mut depth = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        if depth == 0 {
            match b {
                b'\\' if !verbatim => i += 2,
                b'\n' if !verbatim => return None,
                b'"' if verbatim && bytes.get(i + 1) == Some(&b'"') => i += 2,
                b'"' => return Some(i + 1),
                b'{' if bytes.get(i + 1) == Some(&b'{') => i += 2,
                b'{' => {
                    depth = 1;
                    i += 1;
                }
                _ => i += 1,
            }
            continue;
        }
        match b {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                i += 1;
            }
            b'$' | b'@' => {
                let prefix = bytes[i..]
                    .iter()
                    .take_while(|c| **c == b'$' || **c == b'@')
                    .count();
                if bytes.get(i + prefix) == Some(&b'"') {
                    let nested_verbatim = bytes[i..i + prefix].contains(&b'@');
                    let start = i + prefix + 1;
                    i = start
                        + if bytes[i..i + prefix].contains(&b'$') {
                            scan_interpolated_body(&body[start..], nested_verbatim)?
                        } else {
                            scan_plain_string(&body[start..], nested_verbatim)?
                        };
                } else {
                    i += prefix;
                }
            }
            b'"' => i += 1 + scan_plain_string(&body[i + 1..], false)?,
            b'\'' => {
                let close = bytes[i + 1..]
                    .iter()
                    .enumerate()
                    .skip(1)
                    .find(|(_, c)| **c == b'\'')
                    .map(|(k, _)| k)?;
                i += close + 2;
            }
            _ => i += 1,
        }
    }
    None
}

/// Length of a non-interpolated string body up to and including its closing quote.
fn scan_plain_string(body: &str, verbatim: bool) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if !verbatim => i += 2,
            b'"' if verbatim && bytes.get(i + 1) == Some(&b'"') => i += 2,
            b'"' => return Some(i + 1),
            b'\n' if !verbatim => return None,
            _ => i += 1,
        }
    }
    None
}

/// Token string lookup table.
///
/// Maps discriminant indices to their string representation, indexed by the
/// enum discriminant order.
///
/// NOTE: The `#[token("...")]` attributes above must match these strings.
const TOKEN_STRINGS: &[&str] = &[
    "new", "typeof", "default", "await", "null", "true", "false", "this", "base", "is", "as",
    "throw", // expression keywords
    "ref", "out", "in", // argument modifiers
    "return", "if", "else", "while", "for", "foreach", "do", "switch", "case", "using", "lock",
    "try", "catch", "finally", "yield", "delegate", // statement keywords
    ".", "?.", "::", "..", // member access
    "?", "??", ":", // conditional
    "+", "-", "*", "/", "%", "++", "--", // arithmetic
    "==", "!=", "<", "<=", ">", ">=", // comparison
    "&&", "||", "!", "&", "|", "^", "~", // logic
    "=", "=>", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "??=", // assignment
    ",", ";", "(", ")", "{", "}", "[", "]", // delimiters
];

impl Token {
    /// Get the index into TOKEN_STRINGS for simple tokens.
    ///
    /// # Safety
    ///
    /// Safe due to `#[repr(u16)]` on Token enum ensuring stable discriminants.
    fn token_string_index(&self) -> usize {
        // Safe: Token has #[repr(u16)] so discriminant values are stable
        let discriminant = unsafe { *(self as *const Token as *const u16) };
        discriminant as usize
    }

    /// Source text of an identifier token.
    pub fn ident(&self) -> Option<&str> {
        match self {
            Token::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Whether this token is any kind of string literal.
    pub fn is_string_literal(&self) -> bool {
        matches!(self, Token::Str(_) | Token::InterpolatedStr(_))
    }

    /// Whether this token is a literal of any kind.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::Number(_)
                | Token::Str(_)
                | Token::InterpolatedStr(_)
                | Token::Char(_)
                | Token::True
                | Token::False
                | Token::Null
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Literals keep their source text
            Token::Number(text)
            | Token::Str(text)
            | Token::InterpolatedStr(text)
            | Token::Char(text)
            | Token::Ident(text) => write!(f, "{}", text),

            // Simple tokens (keywords, operators, delimiters)
            _ => {
                let s = TOKEN_STRINGS
                    .get(self.token_string_index())
                    .copied()
                    .unwrap_or("<?>");
                write!(f, "{}", s)
            }
        }
    }
}

/// Result of tokenizing a source file.
#[derive(Debug, Clone, Default)]
pub struct Lexed {
    /// Tokens paired with their byte ranges in the source
    pub tokens: Vec<(Token, Range<usize>)>,
    /// Byte ranges that did not form a token (stray characters, unterminated literals)
    pub errors: Vec<Range<usize>>,
}

/// Tokenize a whole source file.
///
/// Lexing never stops at an error: unrecognised bytes are recorded in
/// [`Lexed::errors`] and the lexer resumes after them, so one odd character
/// cannot hide the rest of a file from the migrator.
pub fn tokenize(source: &str) -> Lexed {
    let mut lexed = Lexed::default();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => lexed.tokens.push((token, lexer.span())),
            Err(()) => lexed.errors.push(lexer.span()),
        }
    }
    lexed
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test helper: lex source and filter out errors.
    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(|r| r.ok()).collect()
    }

    fn ident(s: &str) -> Token {
        Token::Ident(Rc::from(s))
    }

    fn string(s: &str) -> Token {
        Token::Str(Rc::from(s))
    }

    #[test]
    fn test_fluent_chain() {
        let tokens = lex("subject.Should().Be(expected);");
        assert_eq!(
            tokens,
            vec![
                ident("subject"),
                Token::Dot,
                ident("Should"),
                Token::LParen,
                Token::RParen,
                Token::Dot,
                ident("Be"),
                Token::LParen,
                ident("expected"),
                Token::RParen,
                Token::Semi,
            ]
        );
    }

    #[test]
    fn test_null_conditional_and_coalesce() {
        let tokens = lex("a?.b ?? c");
        assert_eq!(
            tokens,
            vec![
                ident("a"),
                Token::QuestionDot,
                ident("b"),
                Token::QuestionQuestion,
                ident("c"),
            ]
        );
    }

    #[test]
    fn test_nested_generic_closers_stay_separate() {
        let tokens = lex("List<List<int>>");
        assert_eq!(tokens[4], Token::Ident(Rc::from("int")));
        assert_eq!(tokens[5], Token::Gt);
        assert_eq!(tokens[6], Token::Gt);
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("42 0.5m 1e10 0x1F 3.Times()");
        assert_eq!(tokens[0], Token::Number(Rc::from("42")));
        assert_eq!(tokens[1], Token::Number(Rc::from("0.5m")));
        assert_eq!(tokens[2], Token::Number(Rc::from("1e10")));
        assert_eq!(tokens[3], Token::Number(Rc::from("0x1F")));
        // member access on an integer literal is not a float
        assert_eq!(tokens[4], Token::Number(Rc::from("3")));
        assert_eq!(tokens[5], Token::Dot);
    }

    #[test]
    fn test_string_forms() {
        let tokens = lex(r#""a\"b" @"c""d" 'x' '\''"#);
        assert_eq!(
            tokens,
            vec![
                string(r#""a\"b""#),
                string(r#"@"c""d""#),
                Token::Char(Rc::from("'x'")),
                Token::Char(Rc::from(r"'\''")),
            ]
        );
    }

    #[test]
    fn test_interpolated_string_with_nested_literals() {
        let source = r#"$"because {2} {"parameters"} {x.ToString("N")}" + 1"#;
        let tokens = lex(source);
        assert_eq!(
            tokens[0],
            Token::InterpolatedStr(Rc::from(
                r#"$"because {2} {"parameters"} {x.ToString("N")}""#
            ))
        );
        assert_eq!(tokens[1], Token::Plus);
    }

    #[test]
    fn test_interpolated_escaped_braces() {
        let tokens = lex(r#"$"{{literal}} {value}""#);
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_string_literal());
    }

    #[test]
    fn test_verbatim_interpolated() {
        let tokens = lex(r#"$@"C:\{dir}" @$"x""y""#);
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[0], Token::InterpolatedStr(_)));
        assert!(matches!(tokens[1], Token::InterpolatedStr(_)));
    }

    #[test]
    fn test_raw_string() {
        let tokens = lex("\"\"\"a \"quoted\" b\"\"\" ;");
        assert_eq!(tokens, vec![string("\"\"\"a \"quoted\" b\"\"\""), Token::Semi]);
    }

    #[test]
    fn test_comments_and_preprocessor_skipped() {
        let source = "#nullable enable\n// comment\n/// <summary>doc</summary>\n/* block */ x";
        assert_eq!(lex(source), vec![ident("x")]);
    }

    #[test]
    fn test_block_comments_between_tokens() {
        assert_eq!(lex("/* a */ b /* c */ d"), vec![ident("b"), ident("d")]);
        assert_eq!(lex("f(/* x **/ 1)"), vec![ident("f"), Token::LParen, Token::Number(Rc::from("1")), Token::RParen]);
        assert_eq!(lex("/**/a/ b"), vec![ident("a"), Token::Slash, ident("b")]);
        assert_eq!(lex("a /= /* multi\n line */ b"), vec![ident("a"), Token::SlashEq, ident("b")]);
    }

    #[test]
    fn test_unterminated_block_comment_is_error() {
        let lexed = tokenize("x /* never closed");
        assert_eq!(lexed.tokens.len(), 1);
        assert_eq!(lexed.errors, vec![2..17]);
    }

    #[test]
    fn test_keywords_vs_identifiers() {
        let tokens = lex("await new var async Is");
        assert_eq!(
            tokens,
            vec![Token::Await, Token::New, ident("var"), ident("async"), ident("Is")]
        );
    }

    #[test]
    fn test_verbatim_identifier() {
        assert_eq!(lex("@class"), vec![ident("@class")]);
    }

    #[test]
    fn test_display_round_trips_simple_tokens() {
        assert_eq!(Token::FatArrow.to_string(), "=>");
        assert_eq!(Token::QuestionDot.to_string(), "?.");
        assert_eq!(Token::RBracket.to_string(), "]");
        assert_eq!(Token::Delegate.to_string(), "delegate");
        assert_eq!(ident("Should").to_string(), "Should");
    }

    #[test]
    fn test_tokenize_spans_and_errors() {
        let lexed = tokenize("a ` b");
        assert_eq!(lexed.tokens.len(), 2);
        assert_eq!(lexed.tokens[1].1, 4..5);
        assert_eq!(lexed.errors, vec![2..3]);
    }
}
