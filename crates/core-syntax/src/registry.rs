//! Language identifier resolution and the `tokenize` entry point.
//!
//! Identifiers are case-insensitive; surrounding whitespace and a leading dot
//! (file extension style) are ignored. Unknown identifiers resolve to `None`
//! so callers fall back to unstyled text.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use ahash::AHashMap;
use thiserror::Error;
use tracing::trace;

use crate::lexers::{Lexer, PythonLexer, ScriptLexer, ShellLexer, TypeScriptLexer};
use crate::token::TokenList;

/// The supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// The editor's native scripting dialect.
    Script,
    Python,
    Shell,
    TypeScript,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language id `{0}`")]
pub struct UnknownLanguage(pub String);

static ALIASES: LazyLock<AHashMap<&'static str, Language>> = LazyLock::new(|| {
    Language::ALL
        .iter()
        .flat_map(|lang| lang.aliases().iter().map(move |alias| (*alias, *lang)))
        .collect()
});

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Script,
        Language::Python,
        Language::Shell,
        Language::TypeScript,
    ];

    /// Canonical identifier.
    pub fn name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted spellings, canonical name first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Language::Script => &["script", "tscript", "tes", "native"],
            Language::Python => &["python", "py", "python3", "py3", "pyw", "pyi"],
            Language::Shell => &["shell", "sh", "bash", "zsh", "ksh", "shellscript"],
            Language::TypeScript => &[
                "typescript",
                "ts",
                "tsx",
                "mts",
                "cts",
                "javascript",
                "js",
                "jsx",
                "mjs",
                "cjs",
                "node",
            ],
        }
    }

    pub fn lexer(self) -> &'static dyn Lexer {
        match self {
            Language::Script => &ScriptLexer,
            Language::Python => &PythonLexer,
            Language::Shell => &ShellLexer,
            Language::TypeScript => &TypeScriptLexer,
        }
    }

    /// Resolve an identifier; unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Language> {
        let key = normalize_id(id);
        let lang = ALIASES.get(key.as_str()).copied();
        trace!(target: "syntax.registry", id, normalized = key.as_str(), resolved = ?lang, "resolve_language");
        lang
    }

    /// Guess from a file extension.
    pub fn from_path(path: &Path) -> Option<Language> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Language::from_id)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_id(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Lower-case, trim, and drop a leading `.`.
pub fn normalize_id(id: &str) -> String {
    let trimmed = id.trim();
    trimmed
        .strip_prefix('.')
        .unwrap_or(trimmed)
        .to_lowercase()
}

/// Lexer for a language id, or `None` when the id is unknown.
pub fn lexer_for(id: &str) -> Option<&'static dyn Lexer> {
    Language::from_id(id).map(Language::lexer)
}

/// Tokenize one line with the lexer named by `language_id`.
pub fn tokenize(language_id: &str, line: &str) -> Option<TokenList> {
    let lexer = lexer_for(language_id)?;
    let chars: Vec<char> = line.chars().collect();
    Some(lexer.lex(&chars))
}
