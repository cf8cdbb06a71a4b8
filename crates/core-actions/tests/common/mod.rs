#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::Editor;
use core_config::{EditorOptions, InitialMode};
use core_events::parse_key_script;
use core_syntax::Language;

pub fn insert_editor(text: &str) -> Editor {
    Editor::new(text, None, EditorOptions::default())
}

pub fn normal_editor(text: &str) -> Editor {
    let options = EditorOptions {
        initial_mode: InitialMode::Normal,
        ..EditorOptions::default()
    };
    Editor::new(text, None, options)
}

pub fn editor_with(text: &str, language: Option<Language>, options: EditorOptions) -> Editor {
    Editor::new(text, language, options)
}

/// Replay a key script; returns how many keys were handled.
pub fn feed(ed: &mut Editor, script: &str) -> usize {
    let keys = parse_key_script(script).unwrap();
    keys.iter().filter(|k| ed.handle_key(k)).count()
}

/// Replay a key script and assert every key was consumed.
pub fn feed_all(ed: &mut Editor, script: &str) {
    let keys = parse_key_script(script).unwrap();
    for key in &keys {
        assert!(ed.handle_key(key), "key {key} not handled");
    }
}
