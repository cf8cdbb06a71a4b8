//! Search query entry (Search mode) and `n`/`N` navigation (Normal mode).
//!
//! Matches are recomputed after every query keystroke, anchored at the
//! cursor position held when the query changed.

use super::DispatchResult;
use crate::SearchAction;
use core_state::{EditorState, Mode};
use tracing::debug;

pub(crate) fn handle_search(action: SearchAction, state: &mut EditorState) -> DispatchResult {
    match action {
        SearchAction::Char(ch) => {
            state.search.push_char(ch);
            state.recompute_search();
            DispatchResult::dirty()
        }
        SearchAction::Backspace => {
            let changed = state.search.pop_char();
            state.recompute_search();
            DispatchResult::from_changed(changed)
        }
        SearchAction::Cancel => {
            state.search.clear_matches();
            state.set_mode(Mode::Normal);
            debug!(target: "state.search", query = %state.search.query(), "search_cancel");
            DispatchResult::dirty()
        }
        SearchAction::Confirm => {
            let selected = state.search.current();
            state.set_mode(Mode::Normal);
            if let Some(m) = selected {
                state.set_cursor(m.cursor());
            }
            debug!(target: "state.search", query = %state.search.query(), matches = state.search.matches().len(), index = state.search.current_index(), "search_confirm");
            DispatchResult::dirty()
        }
        SearchAction::Next | SearchAction::Prev => {
            let selected = if action == SearchAction::Next {
                state.search.next()
            } else {
                state.search.prev()
            };
            match selected {
                Some(m) => {
                    state.set_cursor(m.cursor());
                    DispatchResult::dirty()
                }
                None => DispatchResult::clean(),
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use core_state::UNDO_HISTORY_MAX;
    use core_text::{Cursor, Document};
    use pretty_assertions::assert_eq;

    fn searching(text: &str, cursor: Cursor) -> EditorState {
        let mut st = EditorState::new(Document::from_text(text), Mode::Normal, None, UNDO_HISTORY_MAX);
        st.set_cursor(cursor);
        st.set_mode(Mode::Search);
        st
    }

    fn type_query(st: &mut EditorState, query: &str) {
        for ch in query.chars() {
            handle_search(SearchAction::Char(ch), st);
        }
    }

    #[test]
    fn backspace_on_empty_query_is_clean() {
        let mut st = searching("abc", Cursor::origin());
        let r = handle_search(SearchAction::Backspace, &mut st);
        assert_eq!(r, DispatchResult::clean());
        assert_eq!(st.mode(), Mode::Search);
    }

    #[test]
    fn query_keystrokes_recompute_matches() {
        let mut st = searching("ab ab\nab", Cursor::new(1, 1));
        type_query(&mut st, "ab");
        assert_eq!(st.search.matches().len(), 3);
        assert_eq!(st.search.current_index(), 2);
        handle_search(SearchAction::Backspace, &mut st);
        assert_eq!(st.search.query(), "a");
        assert_eq!(st.search.matches().len(), 3);
    }

    #[test]
    fn confirm_without_matches_keeps_cursor() {
        let mut st = searching("abc\ndef", Cursor::new(2, 1));
        type_query(&mut st, "zz");
        let r = handle_search(SearchAction::Confirm, &mut st);
        assert!(r.handled);
        assert_eq!(st.mode(), Mode::Normal);
        assert_eq!(st.cursor(), Cursor::new(2, 1));
    }

    #[test]
    fn confirm_jumps_to_selected_match() {
        let mut st = searching("abc\ndef", Cursor::origin());
        type_query(&mut st, "ef");
        handle_search(SearchAction::Confirm, &mut st);
        assert_eq!(st.cursor(), Cursor::new(2, 1));
    }

    #[test]
    fn cancel_drops_matches_but_keeps_query() {
        let mut st = searching("abc", Cursor::origin());
        type_query(&mut st, "b");
        handle_search(SearchAction::Cancel, &mut st);
        assert_eq!(st.mode(), Mode::Normal);
        assert!(st.search.matches().is_empty());
        assert_eq!(st.search.query(), "b");
    }

    #[test]
    fn next_without_matches_is_clean() {
        let mut st = searching("abc", Cursor::new(1, 2));
        handle_search(SearchAction::Cancel, &mut st);
        for action in [SearchAction::Next, SearchAction::Prev] {
            let r = handle_search(action, &mut st);
            assert_eq!(r, DispatchResult::clean());
            assert_eq!(st.cursor(), Cursor::new(1, 2));
        }
    }
}
