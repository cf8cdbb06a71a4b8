//! Dispatcher applying an [`Action`] to [`EditorState`].
//!
//! Sub-modules by concern:
//! * `motion` - cursor movement
//! * `mode`   - Insert/Normal/Search transitions
//! * `edit`   - text mutation
//! * `paste`  - yank and paste
//! * `search` - query entry and match navigation
//! * `undo`   - undo / redo
//!
//! Every action except `SetPending` clears the pending key before it runs, so
//! a completed, cancelled or pre-empted two-key command never lingers.

use crate::Action;
use core_config::EditorOptions;
use core_state::{EditorState, PendingKey};

mod edit;
mod mode;
mod motion;
mod paste;
mod search;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The key was consumed.
    pub handled: bool,
    /// Document, cursor, mode or search state changed.
    pub dirty: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            handled: true,
            dirty: true,
        }
    }

    /// Consumed without visible effect (boundary no-ops, cancelled commands).
    pub fn clean() -> Self {
        Self {
            handled: true,
            dirty: false,
        }
    }

    pub fn unhandled() -> Self {
        Self {
            handled: false,
            dirty: false,
        }
    }

    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed { Self::dirty() } else { Self::clean() }
    }
}

pub fn dispatch(action: Action, state: &mut EditorState, options: &EditorOptions) -> DispatchResult {
    state.pending = match action {
        Action::SetPending(pending) => pending,
        _ => PendingKey::None,
    };
    let result = match action {
        Action::Motion(kind) => motion::handle_motion(kind, state, options),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, state),
        Action::Edit(kind) => edit::handle_edit(kind, state, options),
        Action::YankLine => paste::handle_yank_line(state),
        Action::Paste { before } => paste::handle_paste(before, state),
        Action::Undo => undo::handle_undo(state),
        Action::Redo => undo::handle_redo(state),
        Action::Search(sa) => search::handle_search(sa, state),
        Action::SetPending(_) | Action::CancelPending => DispatchResult::clean(),
    };
    tracing::trace!(target: "actions.dispatch", ?action, handled = result.handled, dirty = result.dirty, "dispatch");
    result
}
