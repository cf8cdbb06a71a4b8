//! Theme lookup for token kinds.
//!
//! Lexers only produce [`TokenKind`]s. A [`Theme`] owned by the host turns the
//! kind's dotted scope into a concrete style. Lookup falls back through the
//! scope's dotted prefixes (`constant.numeric` then `constant`) and finally to
//! the theme's default style.

use ahash::AHashMap;

use crate::token::TokenKind;

pub trait Theme {
    type Style;

    /// Style registered for an exact scope name.
    fn resolve(&self, scope: &str) -> Option<Self::Style>;

    fn default_style(&self) -> Self::Style;
}

/// Resolve the style for a token kind.
pub fn style_for<T: Theme + ?Sized>(theme: &T, kind: TokenKind) -> T::Style {
    let mut scope = kind.scope();
    loop {
        if let Some(style) = theme.resolve(scope) {
            return style;
        }
        match scope.rfind('.') {
            Some(dot) => scope = &scope[..dot],
            None => return theme.default_style(),
        }
    }
}

/// Maps scopes to terminal palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTheme {
    entries: AHashMap<String, u16>,
    default: u16,
}

impl Default for PaletteTheme {
    /// ANSI-16 colors for the top-level scopes; everything else uses index 7.
    fn default() -> Self {
        Self::empty(7)
            .with("keyword", 5)
            .with("type", 3)
            .with("constant", 1)
            .with("string", 2)
            .with("comment", 8)
            .with("operator", 6)
            .with("punctuation", 7)
            .with("function", 4)
            .with("variable", 7)
    }
}

impl PaletteTheme {
    pub fn empty(default: u16) -> Self {
        Self {
            entries: AHashMap::new(),
            default,
        }
    }

    pub fn with(mut self, scope: &str, index: u16) -> Self {
        self.insert(scope, index);
        self
    }

    pub fn insert(&mut self, scope: &str, index: u16) {
        self.entries.insert(scope.trim().to_string(), index);
    }

    /// Overlay entries (e.g. from configuration) on top of this theme.
    pub fn extend<'a>(&mut self, entries: impl IntoIterator<Item = (&'a String, &'a u16)>) {
        for (scope, index) in entries {
            self.insert(scope, *index);
        }
    }
}

impl Theme for PaletteTheme {
    type Style = u16;

    fn resolve(&self, scope: &str) -> Option<u16> {
        self.entries.get(scope).copied()
    }

    fn default_style(&self) -> u16 {
        self.default
    }
}
