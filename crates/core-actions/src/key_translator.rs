//! Key -> Action translation.
//!
//! Translation is a pure function of `(mode, pending key, key event)`; the
//! pending key itself lives in `EditorState` and is updated by the dispatcher.
//!
//! Order of precedence:
//! * Global chords (Ctrl-Z undo, Ctrl-R redo, Ctrl-F search) in every mode.
//!   They also cancel a pending key.
//! * In Normal mode with a pending key, the two-key table in [`complete_pending`].
//! * The per-mode single-key maps.

use crate::{Action, EditKind, ModeChange, MotionKind, SearchAction};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::{Mode, PendingKey};
use tracing::trace;

pub fn translate(mode: Mode, pending: PendingKey, key: &KeyEvent) -> Option<Action> {
    let action = global(mode, key).or_else(|| match mode {
        Mode::Insert => insert(key),
        Mode::Normal if !pending.is_none() => Some(complete_pending(pending, key)),
        Mode::Normal => normal(key),
        Mode::Search => search(key),
    });
    trace!(target: "actions.translate", ?mode, ?pending, key = %key, ?action, "translate");
    action
}

fn global(mode: Mode, key: &KeyEvent) -> Option<Action> {
    if key.is_ctrl('z') {
        Some(Action::Undo)
    } else if key.is_ctrl('r') {
        Some(Action::Redo)
    } else if key.is_ctrl('f') && mode != Mode::Search {
        Some(Action::ModeChange(ModeChange::EnterSearch))
    } else {
        None
    }
}

/// Second key of a two-key command. Anything outside the table cancels.
pub fn complete_pending(pending: PendingKey, key: &KeyEvent) -> Action {
    let Some(ch) = key.text_char() else {
        return Action::CancelPending;
    };
    match (pending, ch) {
        (PendingKey::D, 'd') => Action::Edit(EditKind::DeleteLine),
        (PendingKey::Y, 'y') => Action::YankLine,
        (PendingKey::C, 'c') => Action::Edit(EditKind::ChangeLine),
        (PendingKey::R, c) => Action::Edit(EditKind::ReplaceChar(c)),
        (PendingKey::G, 'g') => Action::Motion(MotionKind::FileStart),
        _ => Action::CancelPending,
    }
}

/// Keys that move the cursor the same way in Insert and Normal mode.
fn navigation(code: KeyCode) -> Option<MotionKind> {
    Some(match code {
        KeyCode::Left => MotionKind::Left,
        KeyCode::Right => MotionKind::Right,
        KeyCode::Up => MotionKind::Up,
        KeyCode::Down => MotionKind::Down,
        KeyCode::Home => MotionKind::LineStart,
        KeyCode::End => MotionKind::LineEnd,
        KeyCode::PageUp => MotionKind::PageUp,
        KeyCode::PageDown => MotionKind::PageDown,
        _ => return None,
    })
}

fn insert(key: &KeyEvent) -> Option<Action> {
    if let Some(ch) = key.text_char() {
        return Some(Action::Edit(EditKind::InsertChar(ch)));
    }
    if !(key.mods - KeyModifiers::SHIFT).is_empty() {
        return None;
    }
    if let Some(motion) = navigation(key.code) {
        return Some(Action::Motion(motion));
    }
    Some(match key.code {
        KeyCode::Enter => Action::Edit(EditKind::Newline),
        KeyCode::Backspace => Action::Edit(EditKind::Backspace),
        KeyCode::Delete => Action::Edit(EditKind::Delete),
        KeyCode::Tab => Action::Edit(EditKind::Indent),
        KeyCode::BackTab => Action::Edit(EditKind::Dedent),
        KeyCode::Esc => Action::ModeChange(ModeChange::LeaveInsert),
        _ => return None,
    })
}

fn normal(key: &KeyEvent) -> Option<Action> {
    let Some(ch) = key.text_char() else {
        if !(key.mods - KeyModifiers::SHIFT).is_empty() {
            return None;
        }
        return match key.code {
            KeyCode::Esc => Some(Action::CancelPending),
            KeyCode::Delete => Some(Action::Edit(EditKind::DeleteUnder)),
            code => navigation(code).map(Action::Motion),
        };
    };
    if let Some(pending) = PendingKey::from_char(ch) {
        return Some(Action::SetPending(pending));
    }
    Some(match ch {
        'h' => Action::Motion(MotionKind::Left),
        'l' => Action::Motion(MotionKind::Right),
        'j' => Action::Motion(MotionKind::Down),
        'k' => Action::Motion(MotionKind::Up),
        'w' => Action::Motion(MotionKind::WordForward),
        'b' => Action::Motion(MotionKind::WordBackward),
        'e' => Action::Motion(MotionKind::WordEnd),
        '0' => Action::Motion(MotionKind::LineStart),
        '^' => Action::Motion(MotionKind::FirstNonBlank),
        '$' => Action::Motion(MotionKind::LineEnd),
        'G' => Action::Motion(MotionKind::FileEnd),
        'i' => Action::ModeChange(ModeChange::InsertHere),
        'a' => Action::ModeChange(ModeChange::Append),
        'A' => Action::ModeChange(ModeChange::AppendEnd),
        'I' => Action::ModeChange(ModeChange::InsertFirstNonBlank),
        'o' => Action::ModeChange(ModeChange::OpenBelow),
        'O' => Action::ModeChange(ModeChange::OpenAbove),
        '/' => Action::ModeChange(ModeChange::EnterSearch),
        'x' => Action::Edit(EditKind::DeleteUnder),
        'D' => Action::Edit(EditKind::DeleteToEnd),
        'C' => Action::Edit(EditKind::ChangeToEnd),
        'J' => Action::Edit(EditKind::JoinLines),
        '~' => Action::Edit(EditKind::ToggleCase),
        'p' => Action::Paste { before: false },
        'P' => Action::Paste { before: true },
        'u' => Action::Undo,
        'n' => Action::Search(SearchAction::Next),
        'N' => Action::Search(SearchAction::Prev),
        _ => return None,
    })
}

fn search(key: &KeyEvent) -> Option<Action> {
    if let Some(ch) = key.text_char() {
        return Some(Action::Search(SearchAction::Char(ch)));
    }
    if !key.mods.is_empty() {
        return None;
    }
    Some(Action::Search(match key.code {
        KeyCode::Backspace => SearchAction::Backspace,
        KeyCode::Enter => SearchAction::Confirm,
        KeyCode::Esc => SearchAction::Cancel,
        _ => return None,
    }))
}
