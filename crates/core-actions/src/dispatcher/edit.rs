//! Text edit handling.
//!
//! Snapshot policy lives here: a plain character insert joins the current
//! insert run, everything else force-pushes a snapshot before mutating.
//! Boundary cases (start/end of document, empty line, last line) return
//! `clean` without touching history.

use super::DispatchResult;
use crate::EditKind;
use core_config::EditorOptions;
use core_state::{EditorState, Mode};
use core_text::Cursor;
use tracing::trace;

pub(crate) fn handle_edit(
    kind: EditKind,
    state: &mut EditorState,
    options: &EditorOptions,
) -> DispatchResult {
    match kind {
        EditKind::InsertChar(ch) => insert_char(ch, state),
        EditKind::Newline => newline(state, options),
        EditKind::Backspace => backspace(state),
        EditKind::Delete => delete_forward(state),
        EditKind::Indent => indent(state, options),
        EditKind::Dedent => dedent(state, options),
        EditKind::DeleteUnder => delete_under(state),
        EditKind::DeleteToEnd => delete_to_end(state, false),
        EditKind::ChangeToEnd => delete_to_end(state, true),
        EditKind::JoinLines => join_lines(state),
        EditKind::ToggleCase => toggle_case(state),
        EditKind::DeleteLine => delete_line(state),
        EditKind::ChangeLine => change_line(state),
        EditKind::ReplaceChar(ch) => replace_char(ch, state),
    }
}

fn insert_char(ch: char, state: &mut EditorState) -> DispatchResult {
    if state.mode() != Mode::Insert {
        return DispatchResult::unhandled();
    }
    let before = state.cursor();
    state.begin_insert_coalescing();
    state.doc_mut().insert_char(ch);
    trace!(target: "actions.dispatch", op = "insert_char", %ch, row = before.row, col = before.col, "edit");
    DispatchResult::dirty()
}

fn newline(state: &mut EditorState, options: &EditorOptions) -> DispatchResult {
    state.push_snapshot();
    state.doc_mut().split_line(options.auto_indent);
    let after = state.cursor();
    trace!(target: "actions.dispatch", op = "newline", row = after.row, col = after.col, "edit");
    DispatchResult::dirty()
}

fn backspace(state: &mut EditorState) -> DispatchResult {
    if state.cursor() == Cursor::origin() {
        return DispatchResult::clean();
    }
    state.push_snapshot();
    let changed = state.doc_mut().backspace();
    trace!(target: "actions.dispatch", op = "backspace", changed, "edit");
    DispatchResult::from_changed(changed)
}

fn delete_forward(state: &mut EditorState) -> DispatchResult {
    let cur = state.cursor();
    let doc = state.doc();
    if cur.row == doc.line_count() && cur.col >= doc.line_len(cur.row) {
        return DispatchResult::clean();
    }
    state.push_snapshot();
    let changed = state.doc_mut().delete_forward();
    trace!(target: "actions.dispatch", op = "delete", changed, "edit");
    DispatchResult::from_changed(changed)
}

fn indent(state: &mut EditorState, options: &EditorOptions) -> DispatchResult {
    let cur = state.cursor();
    let width = options.tab_width.max(1);
    let count = width - cur.col % width;
    state.push_snapshot();
    let spaces = vec![' '; count];
    state.doc_mut().insert_chars_at(cur.row, cur.col, &spaces);
    state.set_cursor(Cursor::new(cur.row, cur.col + count));
    trace!(target: "actions.dispatch", op = "indent", count, "edit");
    DispatchResult::dirty()
}

fn dedent(state: &mut EditorState, options: &EditorOptions) -> DispatchResult {
    let cur = state.cursor();
    let leading = state
        .doc()
        .line(cur.row)
        .map_or(0, |l| l.iter().take(options.tab_width).take_while(|c| **c == ' ').count());
    if leading == 0 {
        return DispatchResult::clean();
    }
    state.push_snapshot();
    state.doc_mut().delete_in_line(cur.row, 0, leading);
    state.set_cursor(Cursor::new(cur.row, cur.col.saturating_sub(leading)));
    trace!(target: "actions.dispatch", op = "dedent", removed = leading, "edit");
    DispatchResult::dirty()
}

fn current_line_empty(state: &EditorState) -> bool {
    state.doc().line_len(state.cursor().row) == 0
}

fn delete_under(state: &mut EditorState) -> DispatchResult {
    if current_line_empty(state) {
        return DispatchResult::clean();
    }
    let cur = state.cursor();
    state.push_snapshot();
    let removed = state.doc_mut().delete_in_line(cur.row, cur.col, cur.col + 1);
    state.yank.record_chars(removed);
    state.set_cursor(cur);
    trace!(target: "actions.dispatch", op = "delete_under", row = cur.row, col = cur.col, "edit");
    DispatchResult::dirty()
}

/// `D`, or `C` when `change` is set.
fn delete_to_end(state: &mut EditorState, change: bool) -> DispatchResult {
    let cur = state.cursor();
    let len = state.doc().line_len(cur.row);
    if cur.col < len {
        state.push_snapshot();
        let removed = state.doc_mut().delete_in_line(cur.row, cur.col, len);
        state.yank.record_chars(removed);
    } else if !change {
        return DispatchResult::clean();
    }
    if change {
        state.set_mode(Mode::Insert);
    }
    state.set_cursor(cur);
    trace!(target: "actions.dispatch", op = "delete_to_end", change, row = cur.row, col = cur.col, "edit");
    DispatchResult::dirty()
}

fn join_lines(state: &mut EditorState) -> DispatchResult {
    if state.cursor().row >= state.doc().line_count() {
        return DispatchResult::clean();
    }
    state.push_snapshot();
    state.doc_mut().join_with_next();
    let cur = state.cursor();
    state.set_cursor(cur);
    trace!(target: "actions.dispatch", op = "join", row = cur.row, col = cur.col, "edit");
    DispatchResult::dirty()
}

fn toggled(ch: char) -> char {
    let mapped: Vec<char> = if ch.is_uppercase() {
        ch.to_lowercase().collect()
    } else {
        ch.to_uppercase().collect()
    };
    match mapped.as_slice() {
        [single] => *single,
        _ => ch,
    }
}

fn toggle_case(state: &mut EditorState) -> DispatchResult {
    if current_line_empty(state) {
        return DispatchResult::clean();
    }
    let cur = state.cursor();
    let Some(ch) = state.doc().line(cur.row).and_then(|l| l.get(cur.col).copied()) else {
        return DispatchResult::clean();
    };
    state.push_snapshot();
    state.doc_mut().replace_char(cur.row, cur.col, toggled(ch));
    state.set_cursor(Cursor::new(cur.row, cur.col + 1));
    DispatchResult::dirty()
}

fn replace_char(ch: char, state: &mut EditorState) -> DispatchResult {
    if current_line_empty(state) {
        return DispatchResult::clean();
    }
    let cur = state.cursor();
    state.push_snapshot();
    let old = state.doc_mut().replace_char(cur.row, cur.col, ch);
    trace!(target: "actions.dispatch", op = "replace_char", %ch, ?old, "edit");
    DispatchResult::dirty()
}

fn delete_line(state: &mut EditorState) -> DispatchResult {
    let row = state.cursor().row;
    state.push_snapshot();
    let Some(removed) = state.doc_mut().remove_line(row) else {
        return DispatchResult::clean();
    };
    state.yank.record_lines(vec![removed]);
    let row = row.min(state.doc().line_count());
    let col = state.doc().first_non_blank(row);
    state.set_cursor(Cursor::new(row, col));
    trace!(target: "actions.dispatch", op = "delete_line", row, "edit");
    DispatchResult::dirty()
}

fn change_line(state: &mut EditorState) -> DispatchResult {
    let row = state.cursor().row;
    state.push_snapshot();
    let indent = state.doc().indentation(row);
    let col = indent.len();
    state.doc_mut().replace_line(row, indent);
    state.set_mode(Mode::Insert);
    state.set_cursor(Cursor::new(row, col));
    trace!(target: "actions.dispatch", op = "change_line", row, indent = col, "edit");
    DispatchResult::dirty()
}
