/**
 * Host expression scanner
 *
 * Tokenizes fragments of host-language source, such as the text of a template
 * attribute, into tokens whose offsets point into the enclosing document.
 */

use crate::span::Span;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Keyword {
    In,
    New,
    Const,
    Null,
    True,
    False,
    This,
    Var,
    Final,
}

impl Keyword {
    fn from_lexeme(lexeme: &str) -> Option<Keyword> {
        Some(match lexeme {
            "in" => Keyword::In,
            "new" => Keyword::New,
            "const" => Keyword::Const,
            "null" => Keyword::Null,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "this" => Keyword::This,
            "var" => Keyword::Var,
            "final" => Keyword::Final,
            _ => return None,
        })
    }
}

/// Token types in host expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Character,
    Identifier,
    Keyword(Keyword),
    String,
    Integer,
    Operator,
    Error,
    Eof,
}

/// Token representation. `lexeme` holds the unquoted value for strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize, end: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            span: Span::new(offset, end),
        }
    }

    pub fn offset(&self) -> usize {
        self.span.offset
    }

    pub fn is_character(&self, code: char) -> bool {
        self.kind == TokenKind::Character && self.lexeme.starts_with(code)
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.kind == TokenKind::Operator && self.lexeme == operator
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Scanned tokens with a cursor. The stream always ends with an `Eof` token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>, end_offset: usize) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            tokens.push(Token::new(TokenKind::Eof, "", end_offset, end_offset));
        }
        TokenStream { tokens, index: 0 }
    }

    pub fn current(&self) -> &Token {
        // The trailing Eof token is never consumed.
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    pub fn peek(&self, offset: usize) -> &Token {
        &self.tokens[(self.index + offset).min(self.tokens.len() - 1)]
    }

    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.index += 1;
        }
        token
    }

    pub fn consume_optional_character(&mut self, code: char) -> bool {
        if self.current().is_character(code) {
            self.advance();
            return true;
        }
        false
    }

    pub fn consume_optional_operator(&mut self, operator: &str) -> bool {
        if self.current().is_operator(operator) {
            self.advance();
            return true;
        }
        false
    }

    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    /// Tokens not yet consumed, excluding `Eof`.
    pub fn remaining(&self) -> &[Token] {
        let end = self.tokens.len() - 1;
        &self.tokens[self.index.min(end)..end]
    }
}

/// Scans `text[start..end]`; `base_offset` is the document offset of `text[start]`.
pub fn scan(text: &str, start: usize, end: usize, base_offset: usize) -> TokenStream {
    let end = end.min(text.len());
    let start = start.min(end);
    let source = text.get(start..end).unwrap_or("");
    let tokens = Scanner::new(source, base_offset).scan();
    TokenStream::new(tokens, base_offset + source.len())
}

const TWO_CHAR_OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "&&", "||", "..", "??", "=>"];

struct Scanner<'s> {
    input: &'s str,
    base_offset: usize,
    index: usize,
    tokens: Vec<Token>,
}

impl<'s> Scanner<'s> {
    fn new(input: &'s str, base_offset: usize) -> Self {
        Scanner {
            input,
            base_offset,
            index: 0,
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<Token> {
        while let Some(token) = self.scan_token() {
            self.tokens.push(token);
        }
        self.tokens
    }

    fn peek(&self) -> Option<char> {
        self.input[self.index..].chars().next()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.input[self.index..].chars().nth(ahead)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.index += ch.len_utf8();
        }
    }

    fn token(&self, kind: TokenKind, lexeme: impl Into<String>, start: usize) -> Token {
        Token::new(
            kind,
            lexeme,
            self.base_offset + start,
            self.base_offset + self.index,
        )
    }

    fn scan_token(&mut self) -> Option<Token> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
        let start = self.index;
        let ch = self.peek()?;

        if is_identifier_start(ch) {
            return Some(self.scan_identifier(start));
        }
        if ch.is_ascii_digit() {
            return Some(self.scan_number(start));
        }
        match ch {
            '(' | ')' | '[' | ']' | '{' | '}' | ',' | ':' | ';' => {
                self.advance();
                Some(self.token(TokenKind::Character, ch.to_string(), start))
            }
            '.' if self.peek_at(1) != Some('.') => {
                self.advance();
                Some(self.token(TokenKind::Character, ".", start))
            }
            '\'' | '"' => Some(self.scan_string(start, ch)),
            _ => Some(self.scan_operator(start, ch)),
        }
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(is_identifier_part) {
            self.advance();
        }
        let lexeme = &self.input[start..self.index];
        match Keyword::from_lexeme(lexeme) {
            Some(keyword) => self.token(TokenKind::Keyword(keyword), lexeme, start),
            None => self.token(TokenKind::Identifier, lexeme, start),
        }
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        let lexeme = self.input[start..self.index].to_string();
        self.token(TokenKind::Integer, lexeme, start)
    }

    fn scan_string(&mut self, start: usize, quote: char) -> Token {
        self.advance();
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    return self.token(TokenKind::Error, "Unterminated string", start);
                }
                Some(ch) if ch == quote => {
                    self.advance();
                    return self.token(TokenKind::String, value, start);
                }
                Some('\\') => {
                    self.advance();
                    if let Some(escaped) = self.peek() {
                        value.push(unescape(escaped));
                        self.advance();
                    }
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn scan_operator(&mut self, start: usize, ch: char) -> Token {
        if let Some(next) = self.peek_at(1) {
            let pair: String = [ch, next].iter().collect();
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                self.advance();
                self.advance();
                return self.token(TokenKind::Operator, pair, start);
            }
        }
        self.advance();
        if "+-*/%<>=!?&|~".contains(ch) {
            self.token(TokenKind::Operator, ch.to_string(), start)
        } else {
            self.token(
                TokenKind::Error,
                format!("Unexpected character [{}]", ch),
                start,
            )
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}
