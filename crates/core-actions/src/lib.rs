//! Modal editor: key translation and action dispatch.
//!
//! A key event flows through two stages:
//! * [`translate`] maps `(mode, pending key, key event)` to an [`Action`],
//!   or `None` when the key means nothing in the current state.
//! * [`dispatch`] applies the action to [`EditorState`].
//!
//! [`Editor`] wraps both stages behind `handle_key` and exposes the read-only
//! surface a renderer needs.

use core_config::{EditorOptions, InitialMode};
use core_events::KeyEvent;
use core_state::{EditorState, Mode, PendingKey, SearchMatch, YankBuffer};
use core_syntax::{Language, TokenList};
use core_text::{Cursor, Document};
use tracing::trace;

pub mod dispatcher;
pub mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::translate;

/// Cursor motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    FirstNonBlank,
    PageUp,
    PageDown,
    WordForward,
    WordBackward,
    WordEnd,
    /// `gg`: first line, first non-blank column.
    FileStart,
    /// `G`: last line, first non-blank column.
    FileEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// `i`
    InsertHere,
    /// `a`
    Append,
    /// `A`
    AppendEnd,
    /// `I`
    InsertFirstNonBlank,
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
    /// Escape from Insert.
    LeaveInsert,
    /// `/` or Ctrl-F.
    EnterSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    Newline,
    Backspace,
    Delete,
    Indent,
    Dedent,
    DeleteUnder,
    DeleteToEnd,
    ChangeToEnd,
    JoinLines,
    ToggleCase,
    DeleteLine,
    ChangeLine,
    ReplaceChar(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    Char(char),
    Backspace,
    Confirm,
    Cancel,
    Next,
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    ModeChange(ModeChange),
    Edit(EditKind),
    YankLine,
    Paste { before: bool },
    Undo,
    Redo,
    Search(SearchAction),
    /// First key of a two-key command.
    SetPending(PendingKey),
    /// Escape in Normal mode, or an unrecognized second key.
    CancelPending,
}

pub fn initial_mode(mode: InitialMode) -> Mode {
    match mode {
        InitialMode::Insert => Mode::Insert,
        InitialMode::Normal => Mode::Normal,
    }
}

/// The editing engine a host drives one key at a time.
pub struct Editor {
    state: EditorState,
    options: EditorOptions,
}

impl Editor {
    pub fn new(text: &str, language: Option<Language>, options: EditorOptions) -> Self {
        let state = EditorState::new(
            Document::from_text(text),
            initial_mode(options.initial_mode),
            language,
            options.history_limit,
        );
        Self { state, options }
    }

    /// Feed one key event; returns whether the editor consumed it.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let Some(action) = translate(self.state.mode(), self.state.pending, key) else {
            trace!(target: "actions.translate", key = %key, mode = ?self.state.mode(), "unhandled_key");
            return false;
        };
        let result = dispatch(action, &mut self.state, &self.options);
        self.state.sync_syntax();
        result.handled
    }

    pub fn text(&self) -> String {
        self.state.doc().text()
    }

    pub fn lines(&self) -> &[Vec<char>] {
        self.state.doc().lines()
    }

    pub fn line_count(&self) -> usize {
        self.state.doc().line_count()
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn pending(&self) -> PendingKey {
        self.state.pending
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Replace the whole text; history, search and pending state reset.
    pub fn set_text(&mut self, text: &str) {
        self.state.set_text(text);
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn language(&self) -> Option<Language> {
        self.state.language()
    }

    pub fn set_language(&mut self, language: Option<Language>) {
        self.state.set_language(language);
    }

    /// Rows moved by page-up/page-down; hosts update it when the viewport resizes.
    pub fn set_page_size(&mut self, rows: usize) {
        self.options.page_size = rows.max(1);
    }

    /// Re-lex dirty rows; call before reading tokens. Returns rows lexed.
    pub fn refresh_tokens(&mut self) -> usize {
        self.state.refresh_tokens()
    }

    /// Tokens of a 1-based row as of the last `refresh_tokens`.
    pub fn tokens(&self, row: usize) -> Option<&TokenList> {
        self.state.tokens(row)
    }

    pub fn search_query(&self) -> String {
        self.state.search.query()
    }

    pub fn search_matches(&self) -> &[SearchMatch] {
        self.state.search.matches()
    }

    /// 1-based index of the selected match, 0 when none.
    pub fn search_index(&self) -> usize {
        self.state.search.current_index()
    }

    pub fn yank(&self) -> &YankBuffer {
        &self.state.yank
    }

    pub fn undo_depth(&self) -> usize {
        self.state.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.state.redo_depth()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
}
