//! Undo / redo dispatch. Both are consumed even when their stack is empty.

use super::DispatchResult;
use core_state::EditorState;

pub(crate) fn handle_undo(state: &mut EditorState) -> DispatchResult {
    let before = state.doc().line_count();
    let changed = state.undo();
    tracing::trace!(target: "actions.dispatch", op = "undo", changed, lines_before = before, lines_after = state.doc().line_count(), "undo");
    DispatchResult::from_changed(changed)
}

pub(crate) fn handle_redo(state: &mut EditorState) -> DispatchResult {
    let before = state.doc().line_count();
    let changed = state.redo();
    tracing::trace!(target: "actions.dispatch", op = "redo", changed, lines_before = before, lines_after = state.doc().line_count(), "redo");
    DispatchResult::from_changed(changed)
}
