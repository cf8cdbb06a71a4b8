mod common;

use common::{editor_with, feed_all};
use core_config::{EditorOptions, InitialMode};
use core_syntax::{Language, TokenKind};
use pretty_assertions::assert_eq;

fn kinds(ed: &core_actions::Editor, row: usize) -> Vec<TokenKind> {
    ed.tokens(row)
        .map(|toks| toks.iter().map(|t| t.kind).collect())
        .unwrap_or_default()
}

#[test]
fn only_edited_lines_are_relexed() {
    let text = "x = 1\ny = 2\nz = 3";
    let mut ed = editor_with(text, Some(Language::Python), EditorOptions::default());
    assert_eq!(ed.refresh_tokens(), 3);
    assert_eq!(ed.refresh_tokens(), 0);
    feed_all(&mut ed, "<Down>#");
    assert_eq!(ed.refresh_tokens(), 1);
    assert_eq!(kinds(&ed, 2), vec![TokenKind::Comment]);
    assert_eq!(kinds(&ed, 3), vec![TokenKind::Identifier, TokenKind::Operator, TokenKind::Number]);
}

#[test]
fn structural_edits_keep_cache_aligned() {
    let options = EditorOptions {
        initial_mode: InitialMode::Normal,
        ..EditorOptions::default()
    };
    let mut ed = editor_with("# a\nlet b\n'c'", Some(Language::Script), options);
    ed.refresh_tokens();
    feed_all(&mut ed, "jdd");
    assert_eq!(ed.refresh_tokens(), 0);
    assert_eq!(kinds(&ed, 1), vec![TokenKind::Comment]);
    assert_eq!(kinds(&ed, 2), vec![TokenKind::String]);
    feed_all(&mut ed, "P");
    assert_eq!(ed.refresh_tokens(), 1);
    assert_eq!(kinds(&ed, 2), vec![TokenKind::Keyword, TokenKind::Identifier]);
    assert_eq!(kinds(&ed, 3), vec![TokenKind::String]);
    feed_all(&mut ed, "u");
    assert_eq!(ed.refresh_tokens(), 0);
    assert_eq!(kinds(&ed, 2), vec![TokenKind::String]);
    assert_eq!(ed.tokens(3), None);
}

#[test]
fn unknown_language_yields_empty_token_lists() {
    let mut ed = editor_with("anything", None, EditorOptions::default());
    ed.refresh_tokens();
    assert_eq!(kinds(&ed, 1), Vec::<TokenKind>::new());
    ed.set_language(Some(Language::Shell));
    assert_eq!(ed.refresh_tokens(), 1);
    assert_eq!(kinds(&ed, 1), vec![TokenKind::Identifier]);
}
