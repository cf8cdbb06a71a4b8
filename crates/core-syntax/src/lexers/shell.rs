//! POSIX-style shell lexer (sh, bash, zsh).
//!
//! Words are runs of path-friendly characters. `#` starts a comment only at a
//! word boundary, so `a#b` and `${#x}` stay intact. Variable expansions are
//! reported as [`TokenKind::Macro`] and leading-dash flags as
//! [`TokenKind::Symbol`].

use std::sync::LazyLock;

use ahash::AHashSet;

use super::{Lexer, word_set};
use crate::registry::Language;
use crate::scan::{Scanner, is_ident_continue, is_ident_start};
use crate::token::{TokenKind, TokenList};

static KEYWORDS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "if", "then", "else", "elif", "fi", "case", "esac", "for", "while", "until", "do", "done",
        "in", "function", "select", "time", "coproc",
    ])
});

static BOOLEANS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| word_set(&["true", "false"]));

static BUILTINS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "echo", "cd", "pwd", "export", "local", "return", "exit", "source", "read", "printf",
        "test", "set", "unset", "shift", "eval", "exec", "alias", "unalias", "declare",
        "readonly", "trap", "wait", "kill", "let", "type", "command", "builtin", "getopts",
        "pushd", "popd", "jobs", "bg", "fg", "umask", "ulimit", "break", "continue",
    ])
});

const OPERATORS: &[&str] = &[
    "||", "&&", ">>", "<<", ";;", "|&", "&>", ">&", "<&", "==", "!=", "=~", "|", "&", ">", "<",
    ";", "=", "!",
];

const PUNCTUATION: &[char] = &['(', ')', '[', ']', '{', '}'];

const SPECIAL_PARAMS: &[char] = &['?', '#', '@', '*', '$', '!', '-'];

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '/' | '.' | '~')
}

fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '~' | ':' | '+' | '%' | ',' | '@' | '#')
}

fn is_flag_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '=' | '.')
}

/// Shell lexer.
pub struct ShellLexer;

impl Lexer for ShellLexer {
    fn language(&self) -> Language {
        Language::Shell
    }

    fn lex(&self, line: &[char]) -> TokenList {
        let mut s = Scanner::new(line);
        loop {
            s.skip_whitespace();
            let start = s.pos();
            let Some(c) = s.peek() else { break };
            let boundary = s
                .prev()
                .is_none_or(|p| p.is_whitespace() || matches!(p, ';' | '|' | '&' | '(' | ')'));
            match c {
                '#' if boundary => s.comment_to_end(start),
                '\'' => {
                    s.bump();
                    s.quoted('\'', false);
                    s.emit(start, TokenKind::String);
                }
                '"' | '`' => {
                    s.bump();
                    s.quoted(c, true);
                    s.emit(start, TokenKind::String);
                }
                '$' => variable(&mut s, start),
                '-' if boundary && flag_follows(&s) => {
                    s.eat_while(|c| c == '-');
                    s.eat_while(is_flag_continue);
                    s.emit(start, TokenKind::Symbol);
                }
                _ if c.is_ascii_digit() => {
                    s.eat_while(|c| c.is_ascii_digit());
                    s.emit(start, TokenKind::Number);
                }
                _ if is_word_start(c) => {
                    s.eat_while(is_word_continue);
                    let kind = classify(s.text(start));
                    s.emit(start, kind);
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

/// `-x` or `--long` with an alphanumeric after the dashes.
fn flag_follows(s: &Scanner<'_>) -> bool {
    match s.peek_at(1) {
        Some('-') => s.peek_is(2, char::is_alphanumeric),
        Some(c) => c.is_alphanumeric(),
        None => false,
    }
}

/// `$NAME`, `${...}`, `$?`-style specials and `$(` substitutions.
fn variable(s: &mut Scanner<'_>, start: usize) {
    match s.peek_at(1) {
        Some('{') => {
            s.bump_n(2);
            s.until("}", false);
            s.emit(start, TokenKind::Macro);
        }
        Some('(') => {
            s.bump_n(2);
            s.emit(start, TokenKind::Operator);
        }
        Some(c) if is_ident_start(c) => {
            s.bump();
            s.eat_while(is_ident_continue);
            s.emit(start, TokenKind::Macro);
        }
        Some(c) if c.is_ascii_digit() || SPECIAL_PARAMS.contains(&c) => {
            s.bump_n(2);
            s.emit(start, TokenKind::Macro);
        }
        _ => s.unknown(),
    }
}

fn classify(word: &str) -> TokenKind {
    if KEYWORDS.contains(word) {
        TokenKind::Keyword
    } else if BOOLEANS.contains(word) {
        TokenKind::Boolean
    } else if BUILTINS.contains(word) {
        TokenKind::Builtin
    } else {
        TokenKind::Identifier
    }
}
