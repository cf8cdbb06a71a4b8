//! Editor state: document, mode, pending key, undo engine, yank buffer,
//! search state and the token cache.
//!
//! Snapshot policy:
//! - A run of plain character inserts in Insert mode is captured by one
//!   snapshot taken before the first insert of the run.
//! - Every other edit force-pushes a snapshot and ends the run. Entering
//!   Insert via `a`, `A`, `I`, `o`, `O` or `cc` counts as an edit; bare `i`
//!   does not.
//! - Entering or leaving Insert mode also ends the run so separate insert
//!   sessions undo separately.
//! - Undo and redo restore lines and cursor but never the mode; the restored
//!   cursor is re-clamped to the current mode's column rule.
//!
//! Syntax cache:
//! - Document edits are recorded in its change log. `sync_syntax` folds the
//!   log into the token cache (marking rows dirty, splicing on line inserts
//!   and removals). `refresh_tokens` then re-lexes only dirty rows.
//! - Undo and redo re-lex the whole document.

use core_syntax::{Language, TokenCache, TokenList};
use core_text::{ColumnRule, Cursor, Document};
use tracing::debug;

pub mod search;
pub mod undo;
pub mod yank;

pub use search::{SearchMatch, SearchState};
pub use undo::{EditSnapshot, UNDO_HISTORY_MAX, UndoEngine};
pub use yank::YankBuffer;

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Text entry; the cursor may sit after the last character.
    #[default]
    Insert,
    /// Command and navigation mode; the cursor rests on a character.
    Normal,
    /// Incremental search query entry.
    Search,
}

impl Mode {
    pub fn column_rule(self) -> ColumnRule {
        match self {
            Mode::Normal => ColumnRule::OnChar,
            Mode::Insert | Mode::Search => ColumnRule::Gap,
        }
    }
}

/// First key of a two-key Normal-mode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingKey {
    #[default]
    None,
    D,
    Y,
    C,
    R,
    G,
}

impl PendingKey {
    /// The pending state a Normal-mode key opens, if any.
    pub fn from_char(ch: char) -> Option<PendingKey> {
        match ch {
            'd' => Some(PendingKey::D),
            'y' => Some(PendingKey::Y),
            'c' => Some(PendingKey::C),
            'r' => Some(PendingKey::R),
            'g' => Some(PendingKey::G),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == PendingKey::None
    }
}

pub struct EditorState {
    doc: Document,
    mode: Mode,
    pub pending: PendingKey,
    undo: UndoEngine,
    pub yank: YankBuffer,
    pub search: SearchState,
    cache: TokenCache,
}

impl EditorState {
    pub fn new(
        doc: Document,
        mode: Mode,
        language: Option<Language>,
        history_limit: usize,
    ) -> Self {
        let mut state = Self {
            doc,
            mode,
            pending: PendingKey::None,
            undo: UndoEngine::new(history_limit),
            yank: YankBuffer::new(),
            search: SearchState::new(),
            cache: TokenCache::new(language),
        };
        state.doc.clamp_cursor(mode.column_rule());
        state.sync_syntax();
        state
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// Mutable document access for edit primitives. Call `sync_syntax`
    /// afterwards so the token cache sees the changes.
    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn cursor(&self) -> Cursor {
        self.doc.cursor()
    }

    /// Move the cursor, clamped to the current mode.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        let rule = self.mode.column_rule();
        self.doc.set_cursor(cursor, rule);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes, ending any insert run on Insert boundaries and
    /// re-clamping the cursor.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        if mode == Mode::Insert || self.mode == Mode::Insert {
            self.undo.end_insert_coalescing();
        }
        debug!(target: "state.mode", from = ?self.mode, to = ?mode, "mode_change");
        self.mode = mode;
        self.doc.clamp_cursor(mode.column_rule());
    }

    /// Replace the whole text. Cursor, history, search and pending state reset.
    pub fn set_text(&mut self, text: &str) {
        self.doc.set_text(text);
        self.reset_after_load();
    }

    /// Reset to one empty line.
    pub fn clear(&mut self) {
        self.doc.clear();
        self.reset_after_load();
    }

    fn reset_after_load(&mut self) {
        self.undo.clear();
        self.search.reset();
        self.pending = PendingKey::None;
        self.doc.clamp_cursor(self.mode.column_rule());
        self.sync_syntax();
        debug!(target: "state.undo", lines = self.doc.line_count(), "history_reset");
    }

    // --- undo ---

    pub fn push_snapshot(&mut self) {
        self.undo.push_snapshot(&self.doc);
    }

    pub fn begin_insert_coalescing(&mut self) {
        self.undo.begin_insert_coalescing(&self.doc);
    }

    pub fn end_insert_coalescing(&mut self) {
        self.undo.end_insert_coalescing();
    }

    pub fn insert_run_active(&self) -> bool {
        self.undo.insert_run_active()
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.undo.undo(&mut self.doc);
        if undone {
            self.after_restore();
            debug!(target: "state.undo", undo_depth = self.undo.undo_depth(), redo_depth = self.undo.redo_depth(), "undo");
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.undo.redo(&mut self.doc);
        if redone {
            self.after_restore();
            debug!(target: "state.undo", undo_depth = self.undo.undo_depth(), redo_depth = self.undo.redo_depth(), "redo");
        }
        redone
    }

    fn after_restore(&mut self) {
        self.doc.clamp_cursor(self.mode.column_rule());
        let _ = self.doc.drain_changes();
        self.cache.rebuild(self.doc.lines());
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }

    // --- search ---

    /// Re-run the current query, selecting the first match at or after the cursor.
    pub fn recompute_search(&mut self) {
        let from = self.doc.cursor();
        self.search.recompute(&self.doc, from);
    }

    // --- syntax ---

    pub fn language(&self) -> Option<Language> {
        self.cache.language()
    }

    pub fn set_language(&mut self, language: Option<Language>) {
        self.cache.set_language(language);
    }

    /// Fold pending document changes into the token cache.
    pub fn sync_syntax(&mut self) {
        for delta in self.doc.drain_changes() {
            self.cache.apply(&delta);
        }
    }

    /// Bring the token cache up to date; returns the number of rows lexed.
    pub fn refresh_tokens(&mut self) -> usize {
        self.sync_syntax();
        self.cache.ensure_fresh(self.doc.lines())
    }

    /// Cached tokens of a 1-based row. Call `refresh_tokens` first.
    pub fn tokens(&self, row: usize) -> Option<&TokenList> {
        row.checked_sub(1).and_then(|idx| self.cache.tokens(idx))
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.cache
    }
}
