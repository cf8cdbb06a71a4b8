//! Literal, case-sensitive search over the document.
//!
//! Matches are listed in document order and include overlapping occurrences.
//! The selected match is tracked as a 1-based index where 0 means none.

use core_text::{Cursor, Document};
use tracing::{debug, trace};

/// Start of one occurrence: 1-based row, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchMatch {
    pub row: usize,
    pub col: usize,
}

impl SearchMatch {
    /// 1-based display column.
    pub fn column(&self) -> usize {
        self.col + 1
    }

    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.row, self.col)
    }
}

#[derive(Debug, Default, Clone)]
pub struct SearchState {
    query: Vec<char>,
    matches: Vec<SearchMatch>,
    current: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> String {
        self.query.iter().collect()
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// 1-based selected index, 0 when nothing is selected.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<SearchMatch> {
        self.current
            .checked_sub(1)
            .and_then(|i| self.matches.get(i))
            .copied()
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    pub fn pop_char(&mut self) -> bool {
        self.query.pop().is_some()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.chars().collect();
    }

    /// Drop matches and selection, keeping the query text.
    pub fn clear_matches(&mut self) {
        self.matches.clear();
        self.current = 0;
    }

    /// Forget everything including the query.
    pub fn reset(&mut self) {
        self.query.clear();
        self.clear_matches();
    }

    /// Rescan the document and select the first match at or after `from`,
    /// wrapping to the first match.
    pub fn recompute(&mut self, doc: &Document, from: Cursor) {
        self.matches.clear();
        if !self.query.is_empty() {
            for (idx, line) in doc.lines().iter().enumerate() {
                if line.len() < self.query.len() {
                    continue;
                }
                for (col, window) in line.windows(self.query.len()).enumerate() {
                    if window == self.query.as_slice() {
                        self.matches.push(SearchMatch { row: idx + 1, col });
                    }
                }
            }
        }
        self.current = if self.matches.is_empty() {
            0
        } else {
            self.matches
                .iter()
                .position(|m| m.row > from.row || (m.row == from.row && m.col >= from.col))
                .map_or(1, |i| i + 1)
        };
        trace!(target: "state.search", query_len = self.query.len(), matches = self.matches.len(), current = self.current, "recompute");
    }

    /// Select the next match, wrapping to the first.
    pub fn next(&mut self) -> Option<SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = self.current % self.matches.len() + 1;
        debug!(target: "state.search", current = self.current, total = self.matches.len(), "next_match");
        self.current()
    }

    /// Select the previous match, wrapping to the last.
    pub fn prev(&mut self) -> Option<SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = if self.current <= 1 {
            self.matches.len()
        } else {
            self.current - 1
        };
        debug!(target: "state.search", current = self.current, total = self.matches.len(), "prev_match");
        self.current()
    }
}
