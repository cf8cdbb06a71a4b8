mod common;

use common::{editor_with, feed_all, insert_editor, normal_editor};
use core_config::EditorOptions;
use core_state::Mode;
use core_text::Cursor;
use pretty_assertions::assert_eq;

#[test]
fn character_runs_undo_as_one_step() {
    let mut ed = insert_editor("");
    feed_all(&mut ed, "abc<CR>de");
    assert_eq!(ed.undo_depth(), 3);
    feed_all(&mut ed, "<C-z>");
    assert_eq!(ed.text(), "abc\n");
    feed_all(&mut ed, "<C-z>");
    assert_eq!(ed.text(), "abc");
    feed_all(&mut ed, "<C-z>");
    assert_eq!(ed.text(), "");
    assert_eq!(ed.mode(), Mode::Insert);
}

#[test]
fn separate_insert_sessions_undo_separately() {
    let mut ed = insert_editor("");
    feed_all(&mut ed, "ab<Esc>acd<Esc>");
    assert_eq!(ed.text(), "abcd");
    feed_all(&mut ed, "u");
    assert_eq!(ed.text(), "ab");
    assert_eq!(ed.mode(), Mode::Normal);
    // the `a` itself is a step of its own
    feed_all(&mut ed, "u");
    assert_eq!(ed.text(), "ab");
    feed_all(&mut ed, "u");
    assert_eq!(ed.text(), "");
}

#[test]
fn append_commands_are_undo_steps() {
    for cmd in ["a", "A", "I"] {
        let mut ed = normal_editor("abc");
        feed_all(&mut ed, cmd);
        assert_eq!(ed.undo_depth(), 1, "{cmd}");
        feed_all(&mut ed, "xy<Esc>");
        assert_eq!(ed.undo_depth(), 2, "{cmd}");
        feed_all(&mut ed, "uu");
        assert_eq!(ed.text(), "abc");
        assert_eq!(ed.undo_depth(), 0);
        assert_eq!(ed.redo_depth(), 2);
    }

    let mut ed = normal_editor("abc");
    feed_all(&mut ed, "ixy<Esc>");
    assert_eq!(ed.undo_depth(), 1);
}

#[test]
fn redo_replays_and_new_edit_clears_redo() {
    let mut ed = normal_editor("one\ntwo\nthree");
    feed_all(&mut ed, "ddx");
    assert_eq!(ed.text(), "wo\nthree");
    feed_all(&mut ed, "uu");
    assert_eq!(ed.text(), "one\ntwo\nthree");
    assert_eq!(ed.redo_depth(), 2);
    feed_all(&mut ed, "<C-r>");
    assert_eq!(ed.text(), "two\nthree");
    feed_all(&mut ed, "J");
    assert_eq!(ed.text(), "two three");
    assert_eq!(ed.redo_depth(), 0);
    feed_all(&mut ed, "<C-r>");
    assert_eq!(ed.text(), "two three");
}

#[test]
fn undo_on_empty_history_is_consumed() {
    let mut ed = normal_editor("abc");
    feed_all(&mut ed, "u<C-r>");
    assert_eq!(ed.text(), "abc");
    assert_eq!(ed.cursor(), Cursor::origin());
}

#[test]
fn undo_restores_cursor_clamped_to_current_mode() {
    let mut ed = insert_editor("");
    feed_all(&mut ed, "hello<Esc>");
    feed_all(&mut ed, "ccbye<Esc>uu");
    assert_eq!(ed.text(), "hello");
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(ed.cursor(), Cursor::new(1, 4));
}

#[test]
fn history_limit_drops_oldest() {
    let options = EditorOptions {
        initial_mode: core_config::InitialMode::Normal,
        history_limit: 2,
        ..EditorOptions::default()
    };
    let mut ed = editor_with("abcd", None, options);
    feed_all(&mut ed, "xxx");
    assert_eq!(ed.text(), "d");
    assert_eq!(ed.undo_depth(), 2);
    feed_all(&mut ed, "uuu");
    assert_eq!(ed.text(), "bcd");
}
