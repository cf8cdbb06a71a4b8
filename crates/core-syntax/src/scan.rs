//! Single-pass character scanner shared by the lexers.
//!
//! Positions are 0-based internally; emitted tokens are converted to the
//! 1-based inclusive convention of [`Token`].

use crate::token::{Token, TokenKind, TokenList};

/// Numeric literal suffixes a language accepts.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NumberStyle {
    /// `123n`
    pub bigint: bool,
    /// `3j`
    pub imaginary: bool,
}

pub(crate) struct Scanner<'a> {
    src: &'a [char],
    pos: usize,
    tokens: TokenList,
    word: String,
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a [char]) -> Self {
        Self {
            src,
            pos: 0,
            tokens: TokenList::new(),
            word: String::new(),
        }
    }

    pub fn finish(self) -> TokenList {
        self.tokens
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.src.get(self.pos + n).copied()
    }

    pub fn peek_is(&self, n: usize, pred: impl Fn(char) -> bool) -> bool {
        self.peek_at(n).is_some_and(pred)
    }

    /// Character just before the scan position.
    pub fn prev(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.src.get(i).copied())
    }

    /// True when only whitespace precedes the scan position.
    pub fn only_blanks_before(&self) -> bool {
        self.src[..self.pos].iter().all(|c| c.is_whitespace())
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.src.len());
    }

    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    pub fn starts_with(&self, pat: &str) -> bool {
        let mut i = self.pos;
        for p in pat.chars() {
            if self.src.get(i) != Some(&p) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Record `[start, pos)` as a token. Empty ranges are dropped.
    pub fn emit(&mut self, start: usize, kind: TokenKind) {
        if self.pos > start {
            self.tokens.push(Token::new(start + 1, self.pos, kind));
        }
    }

    /// Text of `[start, pos)`, borrowed from a reused buffer.
    pub fn text(&mut self, start: usize) -> &str {
        self.word.clear();
        self.word.extend(&self.src[start..self.pos]);
        &self.word
    }

    /// Consume to end of line as a comment.
    pub fn comment_to_end(&mut self, start: usize) {
        self.pos = self.src.len();
        self.emit(start, TokenKind::Comment);
    }

    /// Consume a quoted body after its opening delimiter has been eaten. Stops
    /// after the closing quote or at end of line when unterminated.
    pub fn quoted(&mut self, quote: char, escapes: bool) {
        while let Some(c) = self.bump() {
            if escapes && c == '\\' {
                self.bump();
            } else if c == quote {
                return;
            }
        }
    }

    /// Consume until `close` (inclusive) or end of line.
    pub fn until(&mut self, close: &str, escapes: bool) {
        while !self.at_end() {
            if self.starts_with(close) {
                self.bump_n(close.chars().count());
                return;
            }
            let c = self.bump();
            if escapes && c == Some('\\') {
                self.bump();
            }
        }
    }

    /// Try each operator in order, consuming the first that matches.
    pub fn operator(&mut self, table: &[&str]) -> bool {
        for op in table {
            if self.starts_with(op) {
                self.bump_n(op.chars().count());
                return true;
            }
        }
        false
    }

    /// True if the scanner sits on the start of a numeric literal (digit, or a
    /// dot followed by a digit).
    pub fn at_number(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_is(1, |c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Scan a numeric literal: radix prefixes, `_` separators, a fractional
    /// part, an exponent and the language's suffixes.
    pub fn number(&mut self, style: NumberStyle) {
        let radix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };
        if let Some(radix) = radix
            && self.peek_is(2, |c| c.is_digit(radix))
        {
            self.bump_n(2);
            self.eat_while(|c| c.is_digit(radix) || c == '_');
        } else {
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
            if self.peek() == Some('.') && self.peek_is(1, |c| c.is_ascii_digit()) {
                self.bump();
                self.eat_while(|c| c.is_ascii_digit() || c == '_');
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                let signed = matches!(self.peek_at(1), Some('+' | '-'));
                let digit_at = if signed { 2 } else { 1 };
                if self.peek_is(digit_at, |c| c.is_ascii_digit()) {
                    self.bump_n(digit_at);
                    self.eat_while(|c| c.is_ascii_digit() || c == '_');
                }
            }
            if style.imaginary && matches!(self.peek(), Some('j' | 'J')) {
                self.bump();
            }
        }
        if style.bigint && self.peek() == Some('n') {
            self.bump();
        }
    }

    /// Fallback for anything the grammar does not recognize: a single-character
    /// identifier token.
    pub fn unknown(&mut self) {
        let start = self.pos;
        self.bump();
        self.emit(start, TokenKind::Identifier);
    }
}
