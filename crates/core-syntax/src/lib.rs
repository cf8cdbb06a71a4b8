//! Syntax layer: the token taxonomy, the four line lexers, language
//! resolution, the per-line token cache and theme lookup.

pub mod cache;
pub mod lexers;
pub mod registry;
mod scan;
pub mod style;
pub mod token;

pub use cache::TokenCache;
pub use lexers::Lexer;
pub use registry::{Language, UnknownLanguage, lexer_for, tokenize};
pub use style::{PaletteTheme, Theme, style_for};
pub use token::{Token, TokenKind, TokenList};
