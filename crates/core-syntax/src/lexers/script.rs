//! Lexer for the editor's native scripting dialect.
//!
//! `#` line comments, `"..."` strings and `'c'` character literals with
//! backslash escapes, `@name` annotations, `:name` atoms, radix-prefixed and
//! fractional/exponent numbers, and a two-character operator table.

use std::sync::LazyLock;

use ahash::AHashSet;

use super::{Lexer, is_capitalized, word_set};
use crate::registry::Language;
use crate::scan::{NumberStyle, Scanner, is_ident_continue, is_ident_start};
use crate::token::{TokenKind, TokenList};

static KEYWORDS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "fn", "let", "var", "const", "if", "else", "elif", "while", "for", "in", "do", "end",
        "return", "break", "continue", "match", "case", "when", "import", "export", "from", "as",
        "struct", "enum", "type", "module", "and", "or", "not", "nil", "self", "yield", "defer",
        "try", "catch", "throw",
    ])
});

static BOOLEANS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| word_set(&["true", "false"]));

static BUILTINS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "print", "println", "len", "typeof", "assert", "range", "map", "filter", "reduce", "keys",
        "values", "push", "pop", "insert", "remove", "str", "int", "float", "bool", "list",
        "dict", "error", "require", "format",
    ])
});

const OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "->", "=>", "::", "..", "+=", "-=", "*=", "/=", "%=",
    "<<", ">>", "|>", "**", "+", "-", "*", "/", "%", "=", "<", ">", "!", "&", "|", "^", "~", "?",
    ".",
];

const PUNCTUATION: &[char] = &['(', ')', '[', ']', '{', '}', ',', ';', ':'];

/// Native script dialect lexer.
pub struct ScriptLexer;

impl Lexer for ScriptLexer {
    fn language(&self) -> Language {
        Language::Script
    }

    fn lex(&self, line: &[char]) -> TokenList {
        let mut s = Scanner::new(line);
        loop {
            s.skip_whitespace();
            let start = s.pos();
            let Some(c) = s.peek() else { break };
            match c {
                '#' => s.comment_to_end(start),
                '"' | '\'' => {
                    s.bump();
                    s.quoted(c, true);
                    s.emit(start, TokenKind::String);
                }
                '@' if s.peek_is(1, is_ident_start) => {
                    s.bump();
                    s.eat_while(is_ident_continue);
                    s.emit(start, TokenKind::Macro);
                }
                ':' if s.peek_is(1, is_ident_start) => {
                    s.bump();
                    s.eat_while(is_ident_continue);
                    s.emit(start, TokenKind::Symbol);
                }
                _ if s.at_number() => {
                    s.number(NumberStyle::default());
                    s.emit(start, TokenKind::Number);
                }
                _ if is_ident_start(c) => {
                    s.eat_while(is_ident_continue);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use pretty_assertions::assert_eq;

    fn lex(src: &str) -> Vec<(String, TokenKind)> {
        let line: Vec<char> = src.chars().collect();
        ScriptLexer
            .lex(&line)
            .iter()
            .map(|t: &Token| (t.slice(&line).iter().collect(), t.kind))
            .collect()
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).into_iter().map(|(_, k)| k).collect()
    }

    #[test]
    fn declaration_with_comment() {
        use TokenKind::*;
        assert_eq!(
            lex("let x = 0x1F # note"),
            vec![
                ("let".into(), Keyword),
                ("x".into(), Identifier),
                ("=".into(), Operator),
                ("0x1F".into(), Number),
                ("# note".into(), Comment),
            ]
        );
    }

    #[test]
    fn annotations_atoms_and_types() {
        use TokenKind::*;
        assert_eq!(
            lex("@inline fn go(:fast, Point)"),
            vec![
                ("@inline".into(), Macro),
                ("fn".into(), Keyword),
                ("go".into(), Identifier),
                ("(".into(), Punctuation),
                (":fast".into(), Symbol),
                (",".into(), Punctuation),
                ("Point".into(), Type),
                (")".into(), Punctuation),
            ]
        );
    }

    #[test]
    fn two_character_operators_combine() {
        use TokenKind::*;
        assert_eq!(
            lex("a::b |> c != d"),
            vec![
                ("a".into(), Identifier),
                ("::".into(), Operator),
                ("b".into(), Identifier),
                ("|>".into(), Operator),
                ("c".into(), Identifier),
                ("!=".into(), Operator),
                ("d".into(), Identifier),
            ]
        );
    }

    #[test]
    fn strings_and_char_literals_with_escapes() {
        assert_eq!(
            lex(r#"print("a \"q\"", '\n')"#)
                .into_iter()
                .filter(|(_, k)| *k == TokenKind::String)
                .map(|(t, _)| t)
                .collect::<Vec<_>>(),
            vec![r#""a \"q\"""#.to_string(), r"'\n'".to_string()]
        );
    }

    #[test]
    fn booleans_builtins_and_numbers() {
        use TokenKind::*;
        assert_eq!(
            kinds("true len 1.5e3 1..9"),
            vec![Boolean, Builtin, Number, Number, Operator, Number]
        );
    }

    #[test]
    fn unknown_characters_become_identifiers() {
        assert_eq!(
            lex("$ `"),
            vec![
                ("$".into(), TokenKind::Identifier),
                ("`".into(), TokenKind::Identifier)
            ]
        );
    }
}
