use smallvec::SmallVec;

/// Closed token taxonomy shared by every lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Type,
    Number,
    String,
    Comment,
    Operator,
    Punctuation,
    /// Decorators, annotations and shell variable expansions.
    Macro,
    Symbol,
    Boolean,
    Builtin,
    Identifier,
}

impl TokenKind {
    pub const ALL: [TokenKind; 12] = [
        TokenKind::Keyword,
        TokenKind::Type,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Comment,
        TokenKind::Operator,
        TokenKind::Punctuation,
        TokenKind::Macro,
        TokenKind::Symbol,
        TokenKind::Boolean,
        TokenKind::Builtin,
        TokenKind::Identifier,
    ];

    /// Dotted highlight scope; themes may style any dotted prefix.
    pub fn scope(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Type => "type",
            TokenKind::Number => "constant.numeric",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Macro => "function.macro",
            TokenKind::Symbol => "constant.symbol",
            TokenKind::Boolean => "constant.boolean",
            TokenKind::Builtin => "function.builtin",
            TokenKind::Identifier => "variable",
        }
    }
}

/// A classified span of one line. `start` and `stop` are 1-based inclusive
/// character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub start: usize,
    pub stop: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(start: usize, stop: usize, kind: TokenKind) -> Self {
        Self { start, stop, kind }
    }

    pub fn len(&self) -> usize {
        self.stop + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.stop < self.start
    }

    /// The covered characters of `line`.
    pub fn slice<'a>(&self, line: &'a [char]) -> &'a [char] {
        let end = self.stop.min(line.len());
        let start = (self.start - 1).min(end);
        &line[start..end]
    }
}

/// Token list for one line. Most lines hold a handful of tokens.
pub type TokenList = SmallVec<[Token; 8]>;
