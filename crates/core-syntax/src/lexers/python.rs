//! Python lexer.
//!
//! Triple-quoted strings are scanned within the line only: an unterminated
//! `"""` runs to end of line and the next line starts fresh.

use std::sync::LazyLock;

use ahash::AHashSet;

use super::{Lexer, is_capitalized, word_set};
use crate::registry::Language;
use crate::scan::{NumberStyle, Scanner, is_ident_continue, is_ident_start};
use crate::token::{TokenKind, TokenList};

static KEYWORDS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield", "match", "case", "None",
    ])
});

static BOOLEANS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| word_set(&["True", "False"]));

static BUILTINS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "print", "len", "range", "int", "str", "float", "bool", "list", "dict", "set", "tuple",
        "bytes", "open", "isinstance", "issubclass", "super", "enumerate", "zip", "map", "filter",
        "sorted", "reversed", "min", "max", "sum", "abs", "any", "all", "type", "object", "repr",
        "input", "iter", "next", "getattr", "setattr", "hasattr", "callable", "id", "hash",
        "format", "round", "self", "cls",
    ])
});

const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "**", "//", "==", "!=", "<=", ">=", "->", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=", "@=", "<<", ">>", ":=", "+", "-", "*", "/", "%", "=", "<", ">",
    "&", "|", "^", "~", "@",
];

const PUNCTUATION: &[char] = &['(', ')', '[', ']', '{', '}', ',', ':', ';', '.'];

const NUMBERS: NumberStyle = NumberStyle {
    bigint: false,
    imaginary: true,
};

/// Python lexer.
pub struct PythonLexer;

impl Lexer for PythonLexer {
    fn language(&self) -> Language {
        Language::Python
    }

    fn lex(&self, line: &[char]) -> TokenList {
        let mut s = Scanner::new(line);
        loop {
            s.skip_whitespace();
            let start = s.pos();
            let Some(c) = s.peek() else { break };
            match c {
                '#' => s.comment_to_end(start),
                '"' | '\'' => string_body(&mut s, start, false),
                '@' if s.only_blanks_before() && s.peek_is(1, is_ident_start) => {
                    s.bump();
                    s.eat_while(|c| is_ident_continue(c) || c == '.');
                    s.emit(start, TokenKind::Macro);
                }
                _ if s.at_number() => {
                    s.number(NUMBERS);
                    s.emit(start, TokenKind::Number);
                }
                _ if is_ident_start(c) => {
                    if let Some(prefix) = string_prefix(&s) {
                        let raw = line[start..start + prefix]
                            .iter()
                            .any(|c| matches!(c, 'r' | 'R'));
                        s.bump_n(prefix);
                        string_body(&mut s, start, raw);
                    } else {
                        s.eat_while(is_ident_continue);
                        let kind = classify(s.text(start));
                        s.emit(start, kind);
                    }
                }
                _ if s.operator(OPERATORS) => s.emit(start, TokenKind::Operator),
                _ if PUNCTUATION.contains(&c) => {
                    s.bump();
                    s.emit(start, TokenKind::Punctuation);
                }
                _ => s.unknown(),
            }
        }
        s.finish()
    }
}

/// Length of a string prefix (`r`, `b`, `f`, `u`, `rb`, `br`, `fr`, `rf`) when
/// it is immediately followed by a quote.
fn string_prefix(s: &Scanner<'_>) -> Option<usize> {
    let is_prefix = |c: char| matches!(c.to_ascii_lowercase(), 'r' | 'b' | 'f' | 'u');
    let first = s.peek().filter(|c| is_prefix(*c))?;
    match s.peek_at(1) {
        Some('"' | '\'') => Some(1),
        Some(second) if is_prefix(second) && matches!(s.peek_at(2), Some('"' | '\'')) => {
            let pair = [first.to_ascii_lowercase(), second.to_ascii_lowercase()];
            matches!(pair, ['r', 'b'] | ['b', 'r'] | ['r', 'f'] | ['f', 'r']).then_some(2)
        }
        _ => None,
    }
}

/// Scan a string starting at the opening quote under the scan position.
fn string_body(s: &mut Scanner<'_>, start: usize, raw: bool) {
    let Some(quote) = s.bump() else { return };
    if s.peek() == Some(quote) && s.peek_at(1) == Some(quote) {
        s.bump_n(2);
        let close: String = [quote; 3].iter().collect();
        s.until(&close, !raw);
    } else {
        s.quoted(quote, !raw);
    }
    s.emit(start, TokenKind::String);
}

fn classify(word: &str) -> TokenKind {
    if KEYWORDS.contains(word) {
        TokenKind::Keyword
    } else if BOOLEANS.contains(word) {
        TokenKind::Boolean
    } else if BUILTINS.contains(word) {
        TokenKind::Builtin
    } else if is_capitalized(word) {
        TokenKind::Type
    } else {
        TokenKind::Identifier
    }
}
