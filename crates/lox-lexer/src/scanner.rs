use lox_common::{DiagnosticBag, Position};

use crate::cursor::Cursor;
use crate::error::LexErrorKind;
use crate::token::{Literal, Token, TokenKind};

/// Hand-written lexer for the Lox language.
///
/// Covers the full lexical grammar: single-character tokens, the four
/// `=`-combinable operators, `//` line comments, string literals with
/// `\"` escapes, number literals, identifiers and the 16 reserved words.
///
/// Lexical errors never stop the scan. They are reported into the
/// diagnostic bag and the offending input is skipped, so the token
/// stream is always complete for the valid remainder of the source.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    diagnostics: DiagnosticBag,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file: impl Into<String>) -> Self {
        Self {
            cursor: Cursor::new(source, file),
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Tokenize the entire source, returning all tokens and diagnostics.
    ///
    /// The returned sequence is never empty and always ends with a single
    /// `Eof` token carrying the line scanning finished on.
    pub fn tokenize(mut self) -> (Vec<Token>, DiagnosticBag) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    /// Scan the next token.
    ///
    /// Loops past whitespace, comments and malformed input, so a token is
    /// always produced (`Eof` once the source is exhausted).
    fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();

            if self.cursor.is_eof() {
                let pos = self.cursor.position();
                return Token::eof(self.cursor.span_from(pos));
            }

            let start = self.cursor.position();
            let ch = self.cursor.advance().unwrap();

            return match ch {
                // === Single-character tokens ===
                '(' => self.make_token(TokenKind::LeftParen, start),
                ')' => self.make_token(TokenKind::RightParen, start),
                '{' => self.make_token(TokenKind::LeftBrace, start),
                '}' => self.make_token(TokenKind::RightBrace, start),
                ',' => self.make_token(TokenKind::Comma, start),
                '.' => self.make_token(TokenKind::Dot, start),
                '-' => self.make_token(TokenKind::Minus, start),
                '+' => self.make_token(TokenKind::Plus, start),
                ';' => self.make_token(TokenKind::Semicolon, start),
                '*' => self.make_token(TokenKind::Star, start),

                // `//` comments are consumed before dispatch, so a `/`
                // reaching this point is always division.
                '/' => self.make_token(TokenKind::Slash, start),

                // === Operators with a two-character variant ===
                // The combined form wins whenever the `=` is present.
                '!' => {
                    if self.cursor.eat('=') {
                        self.make_token(TokenKind::BangEqual, start)
                    } else {
                        self.make_token(TokenKind::Bang, start)
                    }
                }
                '=' => {
                    if self.cursor.eat('=') {
                        self.make_token(TokenKind::EqualEqual, start)
                    } else {
                        self.make_token(TokenKind::Equal, start)
                    }
                }
                '<' => {
                    if self.cursor.eat('=') {
                        self.make_token(TokenKind::LessEqual, start)
                    } else {
                        self.make_token(TokenKind::Less, start)
                    }
                }
                '>' => {
                    if self.cursor.eat('=') {
                        self.make_token(TokenKind::GreaterEqual, start)
                    } else {
                        self.make_token(TokenKind::Greater, start)
                    }
                }

                // === String literals ===
                '"' => match self.scan_string(start) {
                    Some(token) => token,
                    None => continue,
                },

                // === Number literals ===
                c if c.is_ascii_digit() => self.scan_number(start),

                // === Identifiers and keywords ===
                c if is_ident_start(c) => self.scan_identifier(start),

                _ => {
                    let span = self.cursor.span_from(start);
                    self.diagnostics
                        .error(LexErrorKind::UnexpectedCharacter(ch).to_string(), span);
                    continue;
                }
            };
        }
    }

    // ---------------------------------------------------------------
    // Whitespace & comments
    // ---------------------------------------------------------------

    /// Skip whitespace and `//` line comments.
    ///
    /// Newlines advance the cursor's line counter; the newline ending a
    /// comment is left for the next whitespace pass.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor
                .eat_while(|c| matches!(c, ' ' | '\r' | '\t' | '\n'));

            if self.cursor.peek() == Some('/') && self.cursor.peek_second() == Some('/') {
                self.cursor.eat_while(|c| c != '\n');
                continue;
            }

            break;
        }
    }

    // ---------------------------------------------------------------
    // String scanning
    // ---------------------------------------------------------------

    /// Scan a string literal after the opening `"` has been consumed.
    ///
    /// Newlines inside the literal are legal (multi-line strings).
    /// The only escape is `\"`, decoded to an embedded quote; every
    /// other character, a lone `\` included, is taken verbatim.
    /// Returns `None` after reporting when the closing quote is missing,
    /// emitting no token for the malformed literal.
    fn scan_string(&mut self, start: Position) -> Option<Token> {
        let mut value = String::new();

        loop {
            match self.cursor.advance() {
                Some('\\') if self.cursor.peek() == Some('"') => {
                    self.cursor.advance();
                    value.push('"');
                }
                Some('"') => {
                    let lexeme = self.cursor.slice_from(start.offset);
                    let span = self.cursor.span_from(start);
                    return Some(Token::with_literal(
                        TokenKind::String,
                        lexeme,
                        Literal::Str(value),
                        span,
                    ));
                }
                Some(c) => value.push(c),
                None => {
                    let span = self.cursor.span_from(start);
                    self.diagnostics
                        .error(LexErrorKind::UnterminatedString.to_string(), span);
                    return None;
                }
            }
        }
    }

    // ---------------------------------------------------------------
    // Number scanning
    // ---------------------------------------------------------------

    /// Scan a number literal; the first digit was consumed by the
    /// dispatcher.
    ///
    /// A fractional part is only consumed when a digit actually follows
    /// the `.`, so a trailing dot is left for the next dispatch cycle.
    /// There is no integer/float distinction: every number decodes to f64.
    fn scan_number(&mut self, start: Position) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self
                .cursor
                .peek_second()
                .is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance(); // consume '.'
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        let lexeme = self.cursor.slice_from(start.offset);
        let span = self.cursor.span_from(start);
        // Digits with an optional fraction always parse.
        let value: f64 = lexeme.parse().unwrap();
        Token::with_literal(TokenKind::Number, lexeme, Literal::Number(value), span)
    }

    // ---------------------------------------------------------------
    // Identifier / keyword scanning
    // ---------------------------------------------------------------

    /// Scan an identifier or keyword (maximal munch, then exact lookup).
    fn scan_identifier(&mut self, start: Position) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let lexeme = self.cursor.slice_from(start.offset);
        let span = self.cursor.span_from(start);

        let kind = TokenKind::keyword_from_str(lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, span)
    }

    // ---------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------

    /// Create a token using the slice from `start` to the current position.
    fn make_token(&self, kind: TokenKind, start: Position) -> Token {
        let lexeme = self.cursor.slice_from(start.offset);
        let span = self.cursor.span_from(start);
        Token::new(kind, lexeme, span)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
