//! Yank (`yy`) and paste (`p`/`P`).

use super::DispatchResult;
use core_state::EditorState;
use core_text::Cursor;
use tracing::trace;

pub(crate) fn handle_yank_line(state: &mut EditorState) -> DispatchResult {
    let row = state.cursor().row;
    let line = state.doc().line(row).map(<[char]>::to_vec).unwrap_or_default();
    state.yank.record_lines(vec![line]);
    DispatchResult::clean()
}

pub(crate) fn handle_paste(before: bool, state: &mut EditorState) -> DispatchResult {
    if state.yank.is_empty() {
        return DispatchResult::clean();
    }
    let cur = state.cursor();
    let lines = state.yank.lines().to_vec();
    state.push_snapshot();
    if state.yank.is_linewise() {
        let target = if before { cur.row } else { cur.row + 1 };
        let count = lines.len();
        state.doc_mut().insert_lines(target, lines);
        let col = state.doc().first_non_blank(target);
        state.set_cursor(Cursor::new(target, col));
        trace!(target: "actions.dispatch", op = "paste_lines", before, row = target, count, "paste");
    } else {
        let run = lines.into_iter().next().unwrap_or_default();
        let at = if before || state.doc().line_len(cur.row) == 0 {
            cur.col
        } else {
            cur.col + 1
        };
        state.doc_mut().insert_chars_at(cur.row, at, &run);
        state.set_cursor(Cursor::new(cur.row, at + run.len().saturating_sub(1)));
        trace!(target: "actions.dispatch", op = "paste_chars", before, row = cur.row, col = at, len = run.len(), "paste");
    }
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::{Mode, UNDO_HISTORY_MAX};
    use core_text::Document;
    use pretty_assertions::assert_eq;

    fn normal_at(text: &str, cursor: Cursor) -> EditorState {
        let mut st = EditorState::new(Document::from_text(text), Mode::Normal, None, UNDO_HISTORY_MAX);
        st.set_cursor(cursor);
        st
    }

    #[test]
    fn empty_buffer_paste_is_noop() {
        let mut st = normal_at("abc", Cursor::origin());
        assert_eq!(handle_paste(false, &mut st), DispatchResult::clean());
        assert_eq!(st.undo_depth(), 0);
    }

    #[test]
    fn linewise_after_and_before() {
        let mut st = normal_at("one\ntwo", Cursor::origin());
        st.yank.record_lines(vec!["  new".chars().collect()]);
        handle_paste(false, &mut st);
        assert_eq!(st.doc().text(), "one\n  new\ntwo");
        assert_eq!(st.cursor(), Cursor::new(2, 2));

        st.set_cursor(Cursor::new(3, 1));
        handle_paste(true, &mut st);
        assert_eq!(st.doc().text(), "one\n  new\n  new\ntwo");
        assert_eq!(st.cursor(), Cursor::new(3, 2));
    }

    #[test]
    fn linewise_after_last_line_appends() {
        let mut st = normal_at("a\nb", Cursor::new(2, 0));
        handle_yank_line(&mut st);
        handle_paste(false, &mut st);
        assert_eq!(st.doc().text(), "a\nb\nb");
        assert_eq!(st.cursor(), Cursor::new(3, 0));
    }

    #[test]
    fn charwise_cursor_on_last_pasted_char() {
        let mut st = normal_at("ad", Cursor::origin());
        st.yank.record_chars(vec!['b', 'c']);
        handle_paste(false, &mut st);
        assert_eq!(st.doc().text(), "abcd");
        assert_eq!(st.cursor(), Cursor::new(1, 2));

        st.set_cursor(Cursor::origin());
        handle_paste(true, &mut st);
        assert_eq!(st.doc().text(), "bcabcd");
        assert_eq!(st.cursor(), Cursor::new(1, 1));
    }

    #[test]
    fn charwise_into_empty_line() {
        let mut st = normal_at("", Cursor::origin());
        st.yank.record_chars(vec!['x']);
        handle_paste(false, &mut st);
        assert_eq!(st.doc().text(), "x");
        assert_eq!(st.cursor(), Cursor::origin());
    }
}
