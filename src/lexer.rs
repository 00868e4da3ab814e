//! Line lexer: words, numbers and punctuators with absolute byte offsets.
//!
//! Offsets are 16 bits wide. That is a hard capacity limit of the token format:
//! a token whose offset does not fit is reported as [`Error::OffsetOverflow`]
//! instead of being truncated.

use std::fmt;

use crate::error::{Error, Result};

/// Byte offset into the source buffer.
pub type Offset = u16;

/// Largest byte offset a token can carry.
pub const MAX_OFFSET: usize = Offset::MAX as usize;

/// Tokens of one source line, in offset order.
pub type Line = Vec<Token>;

/// Character classes of the first-character dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Punctuator,
    Word,
    Number,
}

/// Class of a token, decided by its first source byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Number,
    Punctuator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Word => "word",
            TokenKind::Number => "number",
            TokenKind::Punctuator => "punctuator",
        })
    }
}

/// Classify a byte as the start of something. `None` means the byte cannot appear
/// outside a token and cannot start one.
#[must_use]
pub fn classify(byte: u8) -> Option<CharClass> {
    match byte {
        b' ' | b'\n' | b'\r' => Some(CharClass::Whitespace),
        b':' | b'=' | b'(' | b')' | b'+' | b'-' | b'/' | b'*' => Some(CharClass::Punctuator),
        b'_' | b'a'..=b'z' | b'A'..=b'Z' => Some(CharClass::Word),
        b'0'..=b'9' => Some(CharClass::Number),
        _ => None,
    }
}

fn is_word_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// The character starting at byte `index`, for error messages.
pub(crate) fn char_at(text: &str, index: usize) -> char {
    text.get(index..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Checked conversion of an absolute byte offset into the token offset width.
pub fn to_offset(offset: usize) -> Result<Offset> {
    Offset::try_from(offset).map_err(|_| Error::OffsetOverflow { offset })
}

/// One lexical unit. `start` and `end` are inclusive offsets into the whole source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub start: Offset,
    pub end: Offset,
    pub value: Option<f64>,
}

impl Token {
    /// Build a token from absolute offsets, failing if either does not fit.
    pub fn new(start: usize, end: usize, value: Option<f64>) -> Result<Self> {
        debug_assert!(start <= end);
        Ok(Token { start: to_offset(start)?, end: to_offset(end)?, value })
    }

    #[must_use]
    pub fn start(&self) -> usize {
        usize::from(self.start)
    }

    #[must_use]
    pub fn end(&self) -> usize {
        usize::from(self.end)
    }

    /// The token's bytes in the buffer it was scanned from.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start()..=self.end()]
    }

    /// Re-classify the token from its first source byte.
    pub fn kind(&self, source: &str) -> Result<TokenKind> {
        kind_at(source, self.start(), 0)
    }
}

/// Kind of a token whose first byte is `text[index]`. `base` is the absolute
/// offset of `text`, used for the error offset.
pub fn kind_at(text: &str, index: usize, base: usize) -> Result<TokenKind> {
    match text.as_bytes().get(index).copied().and_then(classify) {
        Some(CharClass::Word) => Ok(TokenKind::Word),
        Some(CharClass::Number) => Ok(TokenKind::Number),
        Some(CharClass::Punctuator) => Ok(TokenKind::Punctuator),
        Some(CharClass::Whitespace) | None => Err(Error::UnexpectedCharacter {
            ch: char_at(text, index),
            offset: base + index,
        }),
    }
}

/// Single-pass scanner over one line.
pub struct Lexer<'s> {
    text: &'s str,
    base: usize,
    pos: usize,
}

impl<'s> Lexer<'s> {
    /// `base` is the absolute offset of `text`'s first byte in the source buffer.
    pub fn new(text: &'s str, base: usize) -> Self {
        Lexer { text, base, pos: 0 }
    }

    pub fn tokenize(&mut self) -> Result<Line> {
        let mut tokens = Vec::new();

        while let Some(&byte) = self.text.as_bytes().get(self.pos) {
            let token = match classify(byte) {
                Some(CharClass::Whitespace) => {
                    self.pos += 1;
                    continue;
                }
                Some(CharClass::Punctuator) => {
                    let at = self.base + self.pos;
                    self.pos += 1;
                    Token::new(at, at, None)?
                }
                Some(CharClass::Word) => self.read_word()?,
                Some(CharClass::Number) => self.read_number()?,
                None => {
                    return Err(Error::UnexpectedCharacter {
                        ch: char_at(self.text, self.pos),
                        offset: self.base + self.pos,
                    });
                }
            };
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn read_word(&mut self) -> Result<Token> {
        let start = self.pos;
        self.pos += 1;
        while self.peek().is_some_and(is_word_continue) {
            self.pos += 1;
        }
        Token::new(self.base + start, self.base + self.pos - 1, None)
    }

    fn read_number(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut has_dot = false;
        let mut has_exp = false;
        while let Some(byte) = self.peek() {
            match byte {
                b'0'..=b'9' => {}
                b'.' if !has_dot => has_dot = true,
                b'e' | b'E' if !has_exp => has_exp = true,
                _ => break,
            }
            self.pos += 1;
        }
        let literal = &self.text[start..self.pos];
        let value: f64 = literal.parse().map_err(|source| Error::NumericParseFailure {
            literal: literal.to_string(),
            offset: self.base + start,
            source,
        })?;
        Token::new(self.base + start, self.base + self.pos - 1, Some(value))
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }
}

/// Scan one line whose first byte sits at `line_start` in the source buffer.
pub fn scan_line(text: &str, line_start: usize) -> Result<Line> {
    Lexer::new(text, line_start).tokenize()
}
