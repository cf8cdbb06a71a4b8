//! Mode transitions.
//!
//! `a`, `A`, `I`, `o` and `O` force a snapshot; bare `i` only switches mode.
//! Entering or leaving Insert ends any insert run (handled inside
//! `EditorState::set_mode`).

use super::DispatchResult;
use crate::ModeChange;
use core_state::{EditorState, Mode};
use core_text::Cursor;

pub(crate) fn handle_mode_change(mc: ModeChange, state: &mut EditorState) -> DispatchResult {
    let row = state.cursor().row;
    match mc {
        ModeChange::InsertHere => state.set_mode(Mode::Insert),
        ModeChange::Append => {
            let cur = state.cursor();
            let col = if state.doc().line_len(row) == 0 { 0 } else { cur.col + 1 };
            state.push_snapshot();
            state.set_mode(Mode::Insert);
            state.set_cursor(Cursor::new(row, col));
        }
        ModeChange::AppendEnd => {
            state.push_snapshot();
            state.set_mode(Mode::Insert);
            let len = state.doc().line_len(row);
            state.set_cursor(Cursor::new(row, len));
        }
        ModeChange::InsertFirstNonBlank => {
            state.push_snapshot();
            state.set_mode(Mode::Insert);
            let col = state.doc().first_non_blank(row);
            state.set_cursor(Cursor::new(row, col));
        }
        ModeChange::OpenBelow | ModeChange::OpenAbove => {
            state.push_snapshot();
            let indent = state.doc().indentation(row);
            let col = indent.len();
            let target = if mc == ModeChange::OpenBelow { row + 1 } else { row };
            state.doc_mut().insert_lines(target, vec![indent]);
            state.set_mode(Mode::Insert);
            state.set_cursor(Cursor::new(target, col));
            tracing::trace!(target: "actions.dispatch", op = "open_line", row = target, indent = col, "edit");
        }
        ModeChange::LeaveInsert => state.set_mode(Mode::Normal),
        ModeChange::EnterSearch => {
            state.search.reset();
            state.set_mode(Mode::Search);
        }
    }
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::UNDO_HISTORY_MAX;
    use core_text::Document;
    use pretty_assertions::assert_eq;

    fn normal_at(text: &str, cursor: Cursor) -> EditorState {
        let mut st = EditorState::new(Document::from_text(text), Mode::Normal, None, UNDO_HISTORY_MAX);
        st.set_cursor(cursor);
        st
    }

    #[test]
    fn append_variants() {
        let mut st = normal_at("abc", Cursor::new(1, 1));
        handle_mode_change(ModeChange::Append, &mut st);
        assert_eq!((st.mode(), st.cursor()), (Mode::Insert, Cursor::new(1, 2)));

        let mut st = normal_at("abc", Cursor::new(1, 2));
        handle_mode_change(ModeChange::Append, &mut st);
        assert_eq!(st.cursor(), Cursor::new(1, 3));

        let mut st = normal_at("", Cursor::origin());
        handle_mode_change(ModeChange::Append, &mut st);
        assert_eq!(st.cursor(), Cursor::origin());

        let mut st = normal_at("abc", Cursor::origin());
        handle_mode_change(ModeChange::AppendEnd, &mut st);
        assert_eq!(st.cursor(), Cursor::new(1, 3));
    }

    #[test]
    fn insert_at_first_non_blank() {
        let mut st = normal_at("    x = 1", Cursor::new(1, 7));
        handle_mode_change(ModeChange::InsertFirstNonBlank, &mut st);
        assert_eq!(st.cursor(), Cursor::new(1, 4));
        assert_eq!(st.undo_depth(), 1);
    }

    #[test]
    fn bare_insert_takes_no_snapshot() {
        let mut st = normal_at("abc", Cursor::new(1, 1));
        handle_mode_change(ModeChange::InsertHere, &mut st);
        assert_eq!((st.mode(), st.undo_depth()), (Mode::Insert, 0));

        for mc in [ModeChange::Append, ModeChange::AppendEnd, ModeChange::InsertFirstNonBlank] {
            let mut st = normal_at("abc", Cursor::new(1, 1));
            handle_mode_change(mc, &mut st);
            assert_eq!(st.undo_depth(), 1, "{mc:?}");
        }
    }

    #[test]
    fn open_lines_keep_indentation() {
        let mut st = normal_at("  foo\nbar", Cursor::origin());
        handle_mode_change(ModeChange::OpenBelow, &mut st);
        assert_eq!(st.doc().text(), "  foo\n  \nbar");
        assert_eq!(st.cursor(), Cursor::new(2, 2));
        assert_eq!(st.undo_depth(), 1);

        let mut st = normal_at("foo\n\tbar", Cursor::new(2, 1));
        handle_mode_change(ModeChange::OpenAbove, &mut st);
        assert_eq!(st.doc().text(), "foo\n\t\n\tbar");
        assert_eq!(st.cursor(), Cursor::new(2, 1));
        assert_eq!(st.mode(), Mode::Insert);
    }

    #[test]
    fn enter_search_clears_previous_query() {
        let mut st = normal_at("abc", Cursor::origin());
        st.search.set_query("b");
        handle_mode_change(ModeChange::EnterSearch, &mut st);
        assert_eq!(st.mode(), Mode::Search);
        assert_eq!(st.search.query(), "");
    }
}
