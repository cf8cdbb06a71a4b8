//! Per-line token cache with dirty-line tracking.
//!
//! The cache mirrors the document line for line. Edits mark rows dirty and
//! structural edits (line inserts and removals) splice the cache so untouched
//! rows keep their tokens. `ensure_fresh` re-lexes only the dirty rows.
//!
//! Invariants after `ensure_fresh`:
//! * `len()` equals the document line count.
//! * The dirty set is empty and every row holds `lex(line)` for the active
//!   language (or an empty list when no language is set).

use std::collections::BTreeSet;

use core_text::LineDelta;
use tracing::trace;

use crate::registry::Language;
use crate::token::TokenList;

#[derive(Debug, Default, Clone)]
pub struct TokenCache {
    lines: Vec<TokenList>,
    dirty: BTreeSet<usize>,
    language: Option<Language>,
}

impl TokenCache {
    pub fn new(language: Option<Language>) -> Self {
        Self {
            lines: Vec::new(),
            dirty: BTreeSet::new(),
            language,
        }
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Switch languages; every cached row becomes stale.
    pub fn set_language(&mut self, language: Option<Language>) {
        if self.language == language {
            return;
        }
        self.language = language;
        self.dirty.extend(0..self.lines.len());
        trace!(target: "syntax.cache", language = ?language, rows = self.lines.len(), "set_language");
    }

    /// Mark a 0-based line index as needing re-lexing.
    pub fn mark_dirty(&mut self, idx: usize) {
        self.dirty.insert(idx);
    }

    /// Fold one document change into the cache layout.
    pub fn apply(&mut self, delta: &LineDelta) {
        match *delta {
            LineDelta::Edited(idx) => self.mark_dirty(idx),
            LineDelta::Inserted { at, count } => {
                if at <= self.lines.len() {
                    self.lines
                        .splice(at..at, std::iter::repeat_n(TokenList::new(), count));
                }
                let shifted: Vec<usize> = self.dirty.split_off(&at).into_iter().collect();
                self.dirty.extend(shifted.into_iter().map(|i| i + count));
                self.dirty.extend(at..at + count);
            }
            LineDelta::Removed { at, count } => {
                let end = (at + count).min(self.lines.len());
                if at < end {
                    self.lines.drain(at..end);
                }
                let tail = self.dirty.split_off(&at);
                self.dirty
                    .extend(tail.into_iter().filter(|i| *i >= at + count).map(|i| i - count));
            }
            LineDelta::Reset => {
                self.lines.clear();
                self.dirty.clear();
            }
        }
    }

    /// Resize to the document, re-lex dirty rows and clear the dirty set.
    /// Returns the number of rows lexed.
    pub fn ensure_fresh(&mut self, lines: &[Vec<char>]) -> usize {
        let len = lines.len();
        if self.lines.len() < len {
            self.dirty.extend(self.lines.len()..len);
            self.lines.resize(len, TokenList::new());
        } else {
            self.lines.truncate(len);
        }
        let dirty = std::mem::take(&mut self.dirty);
        let lexer = self.language.map(Language::lexer);
        let mut lexed = 0;
        for idx in dirty.into_iter().filter(|i| *i < len) {
            self.lines[idx] = match lexer {
                Some(lexer) => lexer.lex(&lines[idx]),
                None => TokenList::new(),
            };
            lexed += 1;
        }
        if lexed > 0 {
            trace!(target: "syntax.cache", lexed, rows = len, "ensure_fresh");
        }
        lexed
    }

    /// Re-lex every line from scratch.
    pub fn rebuild(&mut self, lines: &[Vec<char>]) {
        self.lines.clear();
        self.dirty.clear();
        let lexed = self.ensure_fresh(lines);
        trace!(target: "syntax.cache", lexed, "rebuild");
    }

    /// Cached tokens for a 0-based line index.
    pub fn tokens(&self, idx: usize) -> Option<&TokenList> {
        self.lines.get(idx)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    pub fn is_dirty(&self, idx: usize) -> bool {
        self.dirty.contains(&idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;

    fn lines(src: &[&str]) -> Vec<Vec<char>> {
        src.iter().map(|l| l.chars().collect()).collect()
    }

    fn fresh(src: &[&str]) -> TokenCache {
        let mut cache = TokenCache::new(Some(Language::Python));
        cache.ensure_fresh(&lines(src));
        cache
    }

    #[test]
    fn first_refresh_lexes_every_line() {
        let mut cache = TokenCache::new(Some(Language::Python));
        assert_eq!(cache.ensure_fresh(&lines(&["x = 1", "# c"])), 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.dirty_count(), 0);
        assert_eq!(cache.tokens(1).map(|t| t[0].kind), Some(TokenKind::Comment));
    }

    #[test]
    fn refresh_is_idempotent() {
        let doc = lines(&["def f():", "    return 1"]);
        let mut cache = TokenCache::new(Some(Language::Python));
        cache.ensure_fresh(&doc);
        let first: Vec<TokenList> = (0..cache.len()).filter_map(|i| cache.tokens(i).cloned()).collect();
        assert_eq!(cache.ensure_fresh(&doc), 0);
        let second: Vec<TokenList> = (0..cache.len()).filter_map(|i| cache.tokens(i).cloned()).collect();
        assert_eq!(first, second);
        assert_eq!(cache.dirty_count(), 0);
    }

    #[test]
    fn only_dirty_lines_are_relexed() {
        let mut cache = fresh(&["a", "b", "c"]);
        cache.mark_dirty(1);
        assert_eq!(cache.ensure_fresh(&lines(&["a", "# b", "c"])), 1);
        assert_eq!(cache.tokens(1).map(|t| t[0].kind), Some(TokenKind::Comment));
    }

    #[test]
    fn inserted_rows_splice_and_shift_dirty_marks() {
        let mut cache = fresh(&["a", "b", "c"]);
        cache.mark_dirty(2);
        cache.apply(&LineDelta::Inserted { at: 1, count: 2 });
        assert_eq!(cache.len(), 5);
        assert!(cache.is_dirty(1) && cache.is_dirty(2) && cache.is_dirty(4));
        assert!(!cache.is_dirty(0) && !cache.is_dirty(3));
        assert_eq!(cache.ensure_fresh(&lines(&["a", "x", "y", "b", "c"])), 3);
    }

    #[test]
    fn removed_rows_drop_their_marks() {
        let mut cache = fresh(&["a", "b", "c", "d"]);
        cache.mark_dirty(1);
        cache.mark_dirty(3);
        cache.apply(&LineDelta::Removed { at: 1, count: 1 });
        assert_eq!(cache.len(), 3);
        assert!(cache.is_dirty(2));
        assert!(!cache.is_dirty(1));
        assert_eq!(cache.ensure_fresh(&lines(&["a", "c", "d"])), 1);
    }

    #[test]
    fn reset_and_growth_mark_new_slots_dirty() {
        let mut cache = fresh(&["a"]);
        cache.apply(&LineDelta::Reset);
        assert!(cache.is_empty());
        assert_eq!(cache.ensure_fresh(&lines(&["1", "2", "3"])), 3);
        assert_eq!(cache.ensure_fresh(&lines(&["1"])), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn no_language_yields_empty_token_lists() {
        let mut cache = TokenCache::new(None);
        cache.ensure_fresh(&lines(&["let x = 1"]));
        assert_eq!(cache.tokens(0).map(|t| t.len()), Some(0));
        cache.set_language(Some(Language::Script));
        assert_eq!(cache.dirty_count(), 1);
        cache.ensure_fresh(&lines(&["let x = 1"]));
        assert_eq!(cache.tokens(0).map(|t| t.len()), Some(4));
    }
}
