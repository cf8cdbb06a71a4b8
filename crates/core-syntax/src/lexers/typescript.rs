//! TypeScript / JavaScript lexer.
//!
//! Block comments are line-local: a `/*` without its `*/` on the same line is
//! a comment to end of line, and the following line is lexed from scratch.

use std::sync::LazyLock;

use ahash::AHashSet;

use super::{Lexer, is_capitalized, word_set};
use crate::registry::Language;
use crate::scan::{NumberStyle, Scanner};
use crate::token::{TokenKind, TokenList};

static KEYWORDS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "finally", "for", "function", "if", "import",
        "in", "instanceof", "let", "new", "return", "super", "switch", "this", "throw", "try",
        "typeof", "var", "void", "while", "with", "yield", "async", "await", "of", "as",
        "implements", "interface", "package", "private", "protected", "public", "static", "type",
        "declare", "namespace", "abstract", "readonly", "keyof", "infer", "is", "satisfies",
        "from", "get", "set",
    ])
});

static BOOLEANS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| word_set(&["true", "false"]));

static BUILTINS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "null", "undefined", "NaN", "Infinity", "console", "Math", "JSON", "Object", "Array",
        "String", "Number", "Boolean", "Promise", "Map", "Set", "Symbol", "Error", "Date",
        "RegExp", "window", "document", "globalThis", "require", "module", "exports", "process",
        "parseInt", "parseFloat", "setTimeout", "clearTimeout",
    ])
});

static PRIMITIVE_TYPES: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    word_set(&[
        "string", "number", "boolean", "any", "unknown", "never", "object", "bigint", "symbol",
    ])
});

const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "...", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "==", "!=",
    "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
    "^=", "**", "<<", ">>", "+", "-", "*", "/", "%", "=", "<", ">", "!", "&", "|", "^", "~", "?",
];

const PUNCTUATION: &[char] = &['(', ')', '[', ']', '{', '}', ',', ';', ':', '.'];

const NUMBERS: NumberStyle = NumberStyle {
    bigint: true,
    imaginary: false,
};

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

/// TypeScript and JavaScript lexer.
pub struct TypeScriptLexer;

impl Lexer for TypeScriptLexer {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn lex(&self, line: &[char]) -> TokenList {
        let mut s = Scanner::new(line);
        loop {
            s.skip_whitespace();
            let start = s.pos();
            let Some(c) = s.peek() else { break };
            match c {
                '/' if s.peek_at(1) == Some('/') => s.comment_to_end(start),
                '/' if s.peek_at(1) == Some('*') => {
                    s.bump_n(2);
                    s.until("*/", false);
                    s.emit(start, TokenKind::Comment);
                }
                '"' | '\'' | '`' => {
                    s.bump();
                    s.quoted(c, true);
                    s.emit(start, TokenKind::String);
                }
                '@' if s.peek_is(1, is_ident_start) => {
                    s.bump();
                    s.eat_while(is_ident_continue);
                    s.emit(start, TokenKind::Macro);
                }
                '=' if s.peek_at(1) == Some('>') => {
                    s.bump_n(2);
                    s.emit(start, TokenKind::Operator);
                }
                _ if s.at_number() => {
                    s.number(NUMBERS);
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
    } else if PRIMITIVE_TYPES.contains(word) || is_capitalized(word) {
        TokenKind::Type
    } else {
        TokenKind::Identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(src: &str) -> Vec<(String, TokenKind)> {
        let line: Vec<char> = src.chars().collect();
        TypeScriptLexer
            .lex(&line)
            .iter()
            .map(|t| (t.slice(&line).iter().collect(), t.kind))
            .collect()
    }

    #[test]
    fn arrow_function_with_types() {
        use TokenKind::*;
        assert_eq!(
            lex("const f = (x: number): Point => x;"),
            vec![
                ("const".into(), Keyword),
                ("f".into(), Identifier),
                ("=".into(), Operator),
                ("(".into(), Punctuation),
                ("x".into(), Identifier),
                (":".into(), Punctuation),
                ("number".into(), Type),
                (")".into(), Punctuation),
                (":".into(), Punctuation),
                ("Point".into(), Type),
                ("=>".into(), Operator),
                ("x".into(), Identifier),
                (";".into(), Punctuation),
            ]
        );
    }

    #[test]
    fn comments_are_line_local() {
        use TokenKind::*;
        assert_eq!(
            lex("a /* b */ c // d"),
            vec![
                ("a".into(), Identifier),
                ("/* b */".into(), Comment),
                ("c".into(), Identifier),
                ("// d".into(), Comment),
            ]
        );
        assert_eq!(
            lex("x /* open"),
            vec![("x".into(), Identifier), ("/* open".into(), Comment)]
        );
    }

    #[test]
    fn strings_templates_and_decorators() {
        use TokenKind::*;
        assert_eq!(
            lex(r#"@Component log(`a ${b}`, 'c\'d')"#),
            vec![
                ("@Component".into(), Macro),
                ("log".into(), Identifier),
                ("(".into(), Punctuation),
                ("`a ${b}`".into(), String),
                (",".into(), Punctuation),
                (r"'c\'d'".into(), String),
                (")".into(), Punctuation),
            ]
        );
    }

    #[test]
    fn numbers_with_bigint_and_radix() {
        use TokenKind::*;
        assert_eq!(
            lex("10n 0xFFn .5 1e10 0b11"),
            vec![
                ("10n".into(), Number),
                ("0xFFn".into(), Number),
                (".5".into(), Number),
                ("1e10".into(), Number),
                ("0b11".into(), Number),
            ]
        );
    }

    #[test]
    fn longest_operator_wins() {
        use TokenKind::*;
        assert_eq!(
            lex("a === b ?? c?.d"),
            vec![
                ("a".into(), Identifier),
                ("===".into(), Operator),
                ("b".into(), Identifier),
                ("??".into(), Operator),
                ("c".into(), Identifier),
                ("?.".into(), Operator),
                ("d".into(), Identifier),
            ]
        );
    }

    #[test]
    fn literals_and_builtins() {
        use TokenKind::*;
        assert_eq!(
            lex("false null console").into_iter().map(|(_, k)| k).collect::<Vec<_>>(),
            vec![Boolean, Builtin, Builtin]
        );
    }
}
