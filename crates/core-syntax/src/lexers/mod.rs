//! Hand-written single-pass lexers, one per supported language.
//!
//! Every lexer is stateless and total: any input line produces a token list,
//! and characters no rule recognizes become single-character identifier
//! tokens. Keyword and builtin tables are built once per process.

use ahash::AHashSet;

use crate::registry::Language;
use crate::token::TokenList;

mod python;
mod script;
mod shell;
mod typescript;

pub use python::PythonLexer;
pub use script::ScriptLexer;
pub use shell::ShellLexer;
pub use typescript::TypeScriptLexer;

/// Line tokenizer capability.
pub trait Lexer: Send + Sync {
    fn language(&self) -> Language;
    fn lex(&self, line: &[char]) -> TokenList;
}

pub(crate) fn word_set(words: &[&'static str]) -> AHashSet<&'static str> {
    words.iter().copied().collect()
}

pub(crate) fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
