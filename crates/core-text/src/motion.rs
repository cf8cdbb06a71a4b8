//! Cursor motion helpers.
//!
//! These operate purely on a `Document` + `Cursor` pair and are free of editor
//! mode state; the caller passes the [`ColumnRule`] that applies and writes the
//! result back with `Document::set_cursor`.

use crate::{ColumnRule, Cursor, Document};

/// Character class used by word motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    Space,
    Word,
    Punct,
}

/// Classify a character: alphanumeric or underscore, other non-space, or space.
pub fn word_class(c: char) -> WordClass {
    if c.is_whitespace() {
        WordClass::Space
    } else if c == '_' || c.is_alphanumeric() {
        WordClass::Word
    } else {
        WordClass::Punct
    }
}

fn clamp_col(doc: &Document, pos: &mut Cursor, rule: ColumnRule) {
    let max = rule.max_col(doc.line_len(pos.row));
    if pos.col > max {
        pos.col = max;
    }
}

/// Move left one character (no line wrap).
pub fn left(_doc: &Document, pos: &mut Cursor) {
    pos.col = pos.col.saturating_sub(1);
}

/// Move right one character (no line wrap).
pub fn right(doc: &Document, pos: &mut Cursor, rule: ColumnRule) {
    let max = rule.max_col(doc.line_len(pos.row));
    if pos.col < max {
        pos.col += 1;
    }
}

pub fn up(doc: &Document, pos: &mut Cursor, rule: ColumnRule) {
    if pos.row > 1 {
        pos.row -= 1;
        clamp_col(doc, pos, rule);
    }
}

pub fn down(doc: &Document, pos: &mut Cursor, rule: ColumnRule) {
    if pos.row < doc.line_count() {
        pos.row += 1;
        clamp_col(doc, pos, rule);
    }
}

pub fn page_up(doc: &Document, pos: &mut Cursor, page: usize, rule: ColumnRule) {
    pos.row = pos.row.saturating_sub(page.max(1)).max(1);
    clamp_col(doc, pos, rule);
}

pub fn page_down(doc: &Document, pos: &mut Cursor, page: usize, rule: ColumnRule) {
    pos.row = (pos.row + page.max(1)).min(doc.line_count());
    clamp_col(doc, pos, rule);
}

pub fn line_start(_doc: &Document, pos: &mut Cursor) {
    pos.col = 0;
}

/// Move to end of line; `Gap` lands after the last character, `OnChar` on it.
pub fn line_end(doc: &Document, pos: &mut Cursor, rule: ColumnRule) {
    pos.col = rule.max_col(doc.line_len(pos.row));
}

pub fn first_non_blank(doc: &Document, pos: &mut Cursor, rule: ColumnRule) {
    pos.col = doc.first_non_blank(pos.row);
    clamp_col(doc, pos, rule);
}

/// Jump to a row, landing on its first non-blank character.
pub fn goto_row(doc: &Document, pos: &mut Cursor, row: usize, rule: ColumnRule) {
    pos.row = row.clamp(1, doc.line_count());
    first_non_blank(doc, pos, rule);
}

// Position walking for word motions. Column == line length is the virtual line
// break, which classifies as space.

fn class_at(doc: &Document, pos: Cursor) -> WordClass {
    doc.line(pos.row)
        .and_then(|l| l.get(pos.col))
        .map_or(WordClass::Space, |c| word_class(*c))
}

fn advance(doc: &Document, pos: &mut Cursor) -> bool {
    if pos.col < doc.line_len(pos.row) {
        pos.col += 1;
        true
    } else if pos.row < doc.line_count() {
        pos.row += 1;
        pos.col = 0;
        true
    } else {
        false
    }
}

fn retreat(doc: &Document, pos: &mut Cursor) -> bool {
    if pos.col > 0 {
        pos.col -= 1;
        true
    } else if pos.row > 1 {
        pos.row -= 1;
        pos.col = doc.line_len(pos.row);
        true
    } else {
        false
    }
}

fn document_end(doc: &Document) -> Cursor {
    let row = doc.line_count();
    Cursor::new(row, doc.line_len(row).saturating_sub(1))
}

/// Move to the start of the next word. Skips the rest of the current word
/// class run, then any whitespace (line breaks included).
pub fn word_forward(doc: &Document, pos: &mut Cursor) {
    let mut p = *pos;
    p.col = p.col.min(doc.line_len(p.row));
    let start = class_at(doc, p);
    if start != WordClass::Space {
        while class_at(doc, p) == start {
            if !advance(doc, &mut p) {
                *pos = document_end(doc);
                return;
            }
        }
    }
    while class_at(doc, p) == WordClass::Space {
        if !advance(doc, &mut p) {
            *pos = document_end(doc);
            return;
        }
    }
    *pos = p;
}

/// Move to the start of the previous word (or the current one when inside it).
pub fn word_backward(doc: &Document, pos: &mut Cursor) {
    let mut p = *pos;
    p.col = p.col.min(doc.line_len(p.row));
    if !retreat(doc, &mut p) {
        pos.col = 0;
        return;
    }
    while class_at(doc, p) == WordClass::Space {
        if !retreat(doc, &mut p) {
            *pos = Cursor::new(1, 0);
            return;
        }
    }
    let class = class_at(doc, p);
    while p.col > 0 && class_at(doc, Cursor::new(p.row, p.col - 1)) == class {
        p.col -= 1;
    }
    *pos = p;
}

/// Move to the last character of the current or next word.
pub fn word_end(doc: &Document, pos: &mut Cursor) {
    let mut p = *pos;
    p.col = p.col.min(doc.line_len(p.row));
    if !advance(doc, &mut p) {
        return;
    }
    while class_at(doc, p) == WordClass::Space {
        if !advance(doc, &mut p) {
            *pos = document_end(doc);
            return;
        }
    }
    let class = class_at(doc, p);
    let len = doc.line_len(p.row);
    while p.col + 1 < len && class_at(doc, Cursor::new(p.row, p.col + 1)) == class {
        p.col += 1;
    }
    *pos = p;
}
