//! Line-oriented document model with a single cursor.
//!
//! Lines are stored as `Vec<char>` so every column is a code point index. The
//! document is never empty: clearing it leaves exactly one empty line.
//!
//! Rows are 1-based (`1..=line_count`), columns are 0-based gap positions. How
//! far right a column may go depends on the caller's [`ColumnRule`]:
//! * `Gap` allows `0..=len` (Insert/Search semantics, cursor may sit after the
//!   last character).
//! * `OnChar` allows `0..=max(len-1, 0)` (Normal semantics, the cursor rests on
//!   a character).
//!
//! Every mutation appends a [`LineDelta`] to an internal change log. Consumers
//! that cache per-line data (the token cache) drain it with
//! [`Document::drain_changes`] to stay aligned without rescanning the document.

use std::borrow::Cow;
use tracing::trace;

pub mod motion;

/// Cursor position. `row` is 1-based, `col` is a 0-based code point index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    pub fn origin() -> Self {
        Self { row: 1, col: 0 }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::origin()
    }
}

/// Column clamping discipline applied after a cursor move or edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// Column may equal the line length (after the last character).
    Gap,
    /// Column rests on a character; empty lines keep column 0.
    OnChar,
}

impl ColumnRule {
    /// Largest legal column for a line of `len` characters.
    pub fn max_col(self, len: usize) -> usize {
        match self {
            ColumnRule::Gap => len,
            ColumnRule::OnChar => len.saturating_sub(1),
        }
    }
}

/// A structural or textual change to the line collection. Indices are 0-based
/// line indices (row - 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDelta {
    Edited(usize),
    Inserted { at: usize, count: usize },
    Removed { at: usize, count: usize },
    /// Whole document replaced (set_text, clear, undo/redo restore).
    Reset,
}

/// Convert `\r\n` and lone `\r` line endings to `\n`. LF-only input is
/// returned borrowed.
pub fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
}

/// True for the blank characters that make up indentation.
pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Ordered, non-empty collection of lines plus the cursor.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Vec<char>>,
    cursor: Cursor,
    changes: Vec<LineDelta>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document holding one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            cursor: Cursor::origin(),
            changes: Vec::new(),
        }
    }

    /// Construct a document from a text blob split on line breaks.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.set_text(text);
        doc.changes.clear();
        doc
    }

    /// Replace the whole content; the cursor returns to the origin.
    pub fn set_text(&mut self, text: &str) {
        self.lines = normalize_line_endings(text)
            .split('\n')
            .map(|l| l.chars().collect())
            .collect();
        if self.lines.is_empty() {
            self.lines.push(Vec::new());
        }
        self.cursor = Cursor::origin();
        self.changes.push(LineDelta::Reset);
        trace!(target: "text.edit", lines = self.lines.len(), "set_text");
    }

    /// Reset to a single empty line.
    pub fn clear(&mut self) {
        self.lines = vec![Vec::new()];
        self.cursor = Cursor::origin();
        self.changes.push(LineDelta::Reset);
    }

    /// Whole text with lines joined by `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter());
        }
        out
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// True when the document is a single empty line.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Characters of a 1-based row.
    pub fn line(&self, row: usize) -> Option<&[char]> {
        row.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(Vec::as_slice)
    }

    /// Length of a 1-based row in characters (0 when out of range).
    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).map_or(0, <[char]>::len)
    }

    /// All lines, 0-based.
    pub fn lines(&self) -> &[Vec<char>] {
        &self.lines
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the cursor, clamping row to the document and col to `rule`.
    pub fn set_cursor(&mut self, cursor: Cursor, rule: ColumnRule) {
        self.cursor = cursor;
        self.clamp_cursor(rule);
    }

    pub fn clamp_cursor(&mut self, rule: ColumnRule) {
        let count = self.lines.len();
        self.cursor.row = self.cursor.row.clamp(1, count);
        let max = rule.max_col(self.line_len(self.cursor.row));
        if self.cursor.col > max {
            self.cursor.col = max;
        }
    }

    /// Column of the first non-blank character, or the line length for blank lines.
    pub fn first_non_blank(&self, row: usize) -> usize {
        let line = self.line(row).unwrap_or(&[]);
        line.iter().position(|c| !is_blank(*c)).unwrap_or(line.len())
    }

    /// Leading blank characters of a row.
    pub fn indentation(&self, row: usize) -> Vec<char> {
        self.line(row)
            .map(|l| l.iter().copied().take_while(|c| is_blank(*c)).collect())
            .unwrap_or_default()
    }

    /// Take the accumulated change log.
    pub fn drain_changes(&mut self) -> Vec<LineDelta> {
        std::mem::take(&mut self.changes)
    }

    /// Replace all lines and the cursor (undo/redo restore).
    pub fn restore(&mut self, lines: Vec<Vec<char>>, cursor: Cursor) {
        self.lines = if lines.is_empty() {
            vec![Vec::new()]
        } else {
            lines
        };
        self.cursor = cursor;
        self.clamp_cursor(ColumnRule::Gap);
        self.changes.push(LineDelta::Reset);
    }

    fn idx(&self) -> usize {
        self.cursor.row - 1
    }

    /// Insert a character at the cursor and advance past it.
    pub fn insert_char(&mut self, ch: char) {
        let idx = self.idx();
        let col = self.cursor.col.min(self.lines[idx].len());
        self.lines[idx].insert(col, ch);
        self.cursor.col = col + 1;
        self.changes.push(LineDelta::Edited(idx));
    }

    /// Insert a run of characters at an arbitrary position (cursor untouched).
    pub fn insert_chars_at(&mut self, row: usize, col: usize, chars: &[char]) {
        let Some(idx) = row.checked_sub(1).filter(|i| *i < self.lines.len()) else {
            return;
        };
        let col = col.min(self.lines[idx].len());
        self.lines[idx].splice(col..col, chars.iter().copied());
        self.changes.push(LineDelta::Edited(idx));
    }

    /// Backspace. At column 0 the current line merges onto the previous one.
    /// Returns false for the no-op at the very start of the document.
    pub fn backspace(&mut self) -> bool {
        let idx = self.idx();
        if self.cursor.col > 0 {
            let col = self.cursor.col.min(self.lines[idx].len());
            if col == 0 {
                self.cursor.col = 0;
                return false;
            }
            self.lines[idx].remove(col - 1);
            self.cursor.col = col - 1;
            self.changes.push(LineDelta::Edited(idx));
            return true;
        }
        if idx == 0 {
            return false;
        }
        let current = self.lines.remove(idx);
        let prev = &mut self.lines[idx - 1];
        let join_col = prev.len();
        prev.extend(current);
        self.cursor = Cursor::new(idx, join_col);
        self.changes.push(LineDelta::Edited(idx - 1));
        self.changes.push(LineDelta::Removed { at: idx, count: 1 });
        trace!(target: "text.edit", row = idx, join_col, "backspace_merge");
        true
    }

    /// Delete the character at the cursor. At end of line the next line is
    /// pulled up; at end of the last line this is a no-op.
    pub fn delete_forward(&mut self) -> bool {
        let idx = self.idx();
        let len = self.lines[idx].len();
        if self.cursor.col < len {
            self.lines[idx].remove(self.cursor.col);
            self.changes.push(LineDelta::Edited(idx));
            return true;
        }
        if idx + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(idx + 1);
        self.lines[idx].extend(next);
        self.cursor.col = len;
        self.changes.push(LineDelta::Edited(idx));
        self.changes.push(LineDelta::Removed {
            at: idx + 1,
            count: 1,
        });
        true
    }

    /// Split the current line at the cursor; the cursor moves to the start of
    /// the new line (after any carried indentation).
    pub fn split_line(&mut self, carry_indent: bool) {
        let idx = self.idx();
        let col = self.cursor.col.min(self.lines[idx].len());
        let indent = if carry_indent {
            self.indentation(self.cursor.row)
        } else {
            Vec::new()
        };
        let tail = self.lines[idx].split_off(col);
        let mut new_line = indent.clone();
        new_line.extend(tail);
        self.lines.insert(idx + 1, new_line);
        self.cursor = Cursor::new(idx + 2, indent.len());
        self.changes.push(LineDelta::Edited(idx));
        self.changes.push(LineDelta::Inserted {
            at: idx + 1,
            count: 1,
        });
    }

    /// Join the current line with the next: the next line's leading blanks are
    /// dropped and a single space separates the two unless the current line is
    /// empty. The cursor lands on the join point. No-op on the last line.
    pub fn join_with_next(&mut self) -> bool {
        let idx = self.idx();
        if idx + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(idx + 1);
        let stripped = next.iter().copied().skip_while(|c| is_blank(*c));
        let line = &mut self.lines[idx];
        let join_col = line.len();
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(stripped);
        self.cursor.col = join_col;
        self.changes.push(LineDelta::Edited(idx));
        self.changes.push(LineDelta::Removed {
            at: idx + 1,
            count: 1,
        });
        true
    }

    /// Insert whole lines before 1-based `row` (`row == line_count + 1` appends).
    pub fn insert_lines(&mut self, row: usize, new_lines: Vec<Vec<char>>) {
        if new_lines.is_empty() {
            return;
        }
        let at = row.saturating_sub(1).min(self.lines.len());
        let count = new_lines.len();
        self.lines.splice(at..at, new_lines);
        self.changes.push(LineDelta::Inserted { at, count });
    }

    /// Remove a whole line, returning its content. The only remaining line is
    /// cleared in place instead of removed.
    pub fn remove_line(&mut self, row: usize) -> Option<Vec<char>> {
        let idx = row.checked_sub(1).filter(|i| *i < self.lines.len())?;
        if self.lines.len() == 1 {
            let taken = std::mem::take(&mut self.lines[0]);
            self.changes.push(LineDelta::Edited(0));
            return Some(taken);
        }
        let taken = self.lines.remove(idx);
        self.changes.push(LineDelta::Removed { at: idx, count: 1 });
        Some(taken)
    }

    /// Replace a line's content.
    pub fn replace_line(&mut self, row: usize, content: Vec<char>) {
        if let Some(idx) = row.checked_sub(1).filter(|i| *i < self.lines.len()) {
            self.lines[idx] = content;
            self.changes.push(LineDelta::Edited(idx));
        }
    }

    /// Remove the characters `[start, end)` of a row, returning them.
    pub fn delete_in_line(&mut self, row: usize, start: usize, end: usize) -> Vec<char> {
        let Some(idx) = row.checked_sub(1).filter(|i| *i < self.lines.len()) else {
            return Vec::new();
        };
        let len = self.lines[idx].len();
        let (start, end) = (start.min(len), end.min(len));
        if start >= end {
            return Vec::new();
        }
        let removed: Vec<char> = self.lines[idx].drain(start..end).collect();
        self.changes.push(LineDelta::Edited(idx));
        removed
    }

    /// Overwrite a single character; returns the previous one.
    pub fn replace_char(&mut self, row: usize, col: usize, ch: char) -> Option<char> {
        let idx = row.checked_sub(1)?;
        let slot = self.lines.get_mut(idx)?.get_mut(col)?;
        let old = std::mem::replace(slot, ch);
        self.changes.push(LineDelta::Edited(idx));
        Some(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc_at(text: &str, row: usize, col: usize) -> Document {
        let mut d = Document::from_text(text);
        d.set_cursor(Cursor::new(row, col), ColumnRule::Gap);
        d
    }

    #[test]
    fn set_and_get_text_round_trip() {
        for text in ["", "a", "a\nb", "foo\n\nbar", "trailing\n", "\n\n"] {
            let d = Document::from_text(text);
            assert_eq!(d.text(), text);
        }
    }

    #[test]
    fn crlf_is_normalized() {
        let d = Document::from_text("a\r\nb\rc");
        assert_eq!(d.line_count(), 3);
        assert_eq!(d.text(), "a\nb\nc");
    }

    #[test]
    fn clear_leaves_one_empty_line() {
        let mut d = Document::from_text("x\ny");
        d.clear();
        assert_eq!(d.line_count(), 1);
        assert!(d.is_empty());
        assert_eq!(d.cursor(), Cursor::origin());
    }

    #[test]
    fn insert_char_advances_cursor() {
        let mut d = Document::new();
        for c in "abc".chars() {
            d.insert_char(c);
        }
        assert_eq!(d.text(), "abc");
        assert_eq!(d.cursor().col, 3);
    }

    #[test]
    fn backspace_at_document_start_is_noop() {
        let mut d = doc_at("abc", 1, 0);
        assert!(!d.backspace());
        assert_eq!(d.text(), "abc");
    }

    #[test]
    fn backspace_at_col_zero_merges_lines() {
        let mut d = doc_at("ab\ncd", 2, 0);
        assert!(d.backspace());
        assert_eq!(d.text(), "abcd");
        assert_eq!(d.cursor(), Cursor::new(1, 2));
        assert_eq!(
            d.drain_changes(),
            vec![LineDelta::Edited(0), LineDelta::Removed { at: 1, count: 1 }]
        );
    }

    #[test]
    fn delete_forward_joins_except_on_last_line() {
        let mut d = doc_at("ab\ncd", 1, 2);
        assert!(d.delete_forward());
        assert_eq!(d.text(), "abcd");
        let mut d = doc_at("ab\ncd", 2, 2);
        assert!(!d.delete_forward());
        assert_eq!(d.text(), "ab\ncd");
    }

    #[test]
    fn split_line_moves_tail_down() {
        let mut d = doc_at("abcd", 1, 2);
        d.split_line(false);
        assert_eq!(d.text(), "ab\ncd");
        assert_eq!(d.cursor(), Cursor::new(2, 0));
    }

    #[test]
    fn split_line_can_carry_indentation() {
        let mut d = doc_at("    let x", 1, 9);
        d.split_line(true);
        assert_eq!(d.text(), "    let x\n    ");
        assert_eq!(d.cursor(), Cursor::new(2, 4));
    }

    #[test]
    fn join_strips_leading_blanks_and_adds_space() {
        let mut d = doc_at("foo\n   bar", 1, 0);
        assert!(d.join_with_next());
        assert_eq!(d.text(), "foo bar");
        assert_eq!(d.cursor().col, 3);
        let mut d = doc_at("\n  bar", 1, 0);
        assert!(d.join_with_next());
        assert_eq!(d.text(), "bar");
        let mut d = doc_at("only", 1, 0);
        assert!(!d.join_with_next());
    }

    #[test]
    fn remove_only_line_clears_in_place() {
        let mut d = Document::from_text("solo");
        assert_eq!(d.remove_line(1), Some("solo".chars().collect()));
        assert_eq!(d.line_count(), 1);
        assert!(d.is_empty());
    }

    #[test]
    fn on_char_rule_clamps_to_last_character() {
        let mut d = doc_at("abc", 1, 3);
        d.clamp_cursor(ColumnRule::OnChar);
        assert_eq!(d.cursor().col, 2);
        let mut d = doc_at("", 1, 0);
        d.clamp_cursor(ColumnRule::OnChar);
        assert_eq!(d.cursor().col, 0);
    }

    #[test]
    fn first_non_blank_and_indentation() {
        let d = Document::from_text("  \tx y\n   ");
        assert_eq!(d.first_non_blank(1), 3);
        assert_eq!(d.indentation(1), vec![' ', ' ', '\t']);
        assert_eq!(d.first_non_blank(2), 3);
    }

    #[test]
    fn normalization_only_allocates_for_carriage_returns() {
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed("a\nb")));
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }
}
