//! Token stream wrapper for hand-written parser.

use awexpect_migrate_ast::Span;
use awexpect_migrate_lexer::Token;
use std::ops::Range;

/// Token stream with lookahead, position tracking and backtracking.
///
/// Each token is paired with its byte span from the source, so every node
/// the parser builds can point back at its exact source text.
pub struct TokenStream<'src> {
    tokens: &'src [(Token, Range<usize>)],
    pos: usize,
}

impl<'src> TokenStream<'src> {
    /// Create a new token stream from tokens with their byte spans.
    pub fn new(tokens: &'src [(Token, Range<usize>)]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&'src Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    /// Peek at the nth token ahead without consuming.
    pub fn peek_nth(&self, n: usize) -> Option<&'src Token> {
        self.tokens.get(self.pos + n).map(|(tok, _)| tok)
    }

    /// Advance to the next token and return the current one.
    pub fn advance(&mut self) -> Option<&'src Token> {
        let token = self.tokens.get(self.pos).map(|(tok, _)| tok);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token matches the expected token.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Expect a specific token and advance if it matches.
    ///
    /// Returns an error if the token doesn't match.
    pub fn expect(&mut self, expected: Token) -> Result<Span, super::ParseError> {
        if self.check(&expected) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(super::ParseError::expected_token(
                expected,
                self.peek().cloned(),
                self.current_span(),
            ))
        }
    }

    /// Check if we've reached the end of the token stream.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Get the current position in the token stream.
    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Rewind (or fast-forward) to a position obtained from `current_pos`.
    pub fn restore(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len());
    }

    /// Create a span from a starting position to the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        let start_byte = self
            .tokens
            .get(start)
            .map(|(_, span)| span.start)
            .unwrap_or_else(|| self.end_byte());
        let end_byte = if self.pos > start {
            self.tokens
                .get(self.pos - 1)
                .map(|(_, span)| span.end)
                .unwrap_or(start_byte)
        } else {
            start_byte
        };
        Span::new(start_byte as u32, end_byte as u32)
    }

    /// Get a span for the current token, or an empty span at end of input.
    pub fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some((_, span)) => Span::from_range(span),
            None => {
                let end = self.end_byte() as u32;
                Span::new(end, end)
            }
        }
    }

    fn end_byte(&self) -> usize {
        self.tokens.last().map_or(0, |(_, span)| span.end)
    }

    /// Skip a balanced `open ... close` group starting at the current token.
    ///
    /// Returns the span of the whole group, delimiters included.
    pub fn skip_balanced(&mut self, open: &Token, close: &Token) -> Result<Span, super::ParseError> {
        let start = self.pos;
        self.expect(open.clone())?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                Some(t) if std::mem::discriminant(t) == std::mem::discriminant(open) => depth += 1,
                Some(t) if std::mem::discriminant(t) == std::mem::discriminant(close) => depth -= 1,
                Some(_) => {}
                None => {
                    return Err(super::ParseError::unexpected_token(
                        None,
                        "inside unclosed group",
                        self.span_from(start),
                    ));
                }
            }
        }
        Ok(self.span_from(start))
    }

    /// Position of the token that closes the group opened at `pos`, if any.
    pub fn matching_close(&self, pos: usize) -> Option<usize> {
        let open = &self.tokens.get(pos)?.0;
        let close = match open {
            Token::LParen => Token::RParen,
            Token::LBracket => Token::RBracket,
            Token::LBrace => Token::RBrace,
            _ => return None,
        };
        let mut depth = 0usize;
        for (offset, (token, _)) in self.tokens[pos..].iter().enumerate() {
            if std::mem::discriminant(token) == std::mem::discriminant(open) {
                depth += 1;
            } else if std::mem::discriminant(token) == std::mem::discriminant(&close) {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + offset);
                }
            }
        }
        None
    }
}
