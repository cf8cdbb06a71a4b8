//! Cursor motion handling.
//!
//! Motions compute on a copy of the cursor with the current mode's column
//! rule and write it back through `EditorState::set_cursor`, which clamps
//! again. Vertical moves keep no sticky column.

use super::DispatchResult;
use crate::MotionKind;
use core_config::EditorOptions;
use core_state::EditorState;
use core_text::motion;

pub(crate) fn handle_motion(
    kind: MotionKind,
    state: &mut EditorState,
    options: &EditorOptions,
) -> DispatchResult {
    let rule = state.mode().column_rule();
    let before = state.cursor();
    let mut pos = before;
    let doc = state.doc();
    match kind {
        MotionKind::Left => motion::left(doc, &mut pos),
        MotionKind::Right => motion::right(doc, &mut pos, rule),
        MotionKind::Up => motion::up(doc, &mut pos, rule),
        MotionKind::Down => motion::down(doc, &mut pos, rule),
        MotionKind::LineStart => motion::line_start(doc, &mut pos),
        MotionKind::LineEnd => motion::line_end(doc, &mut pos, rule),
        MotionKind::FirstNonBlank => motion::first_non_blank(doc, &mut pos, rule),
        MotionKind::PageUp => motion::page_up(doc, &mut pos, options.page_size, rule),
        MotionKind::PageDown => motion::page_down(doc, &mut pos, options.page_size, rule),
        MotionKind::WordForward => motion::word_forward(doc, &mut pos),
        MotionKind::WordBackward => motion::word_backward(doc, &mut pos),
        MotionKind::WordEnd => motion::word_end(doc, &mut pos),
        MotionKind::FileStart => motion::goto_row(doc, &mut pos, 1, rule),
        MotionKind::FileEnd => motion::goto_row(doc, &mut pos, doc.line_count(), rule),
    }
    state.set_cursor(pos);
    let after = state.cursor();
    tracing::trace!(target: "actions.dispatch", ?kind, from_row = before.row, from_col = before.col, to_row = after.row, to_col = after.col, "motion");
    DispatchResult::from_changed(after != before)
}
