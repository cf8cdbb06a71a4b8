//! Vim-style key script notation.
//!
//! Literal characters stand for themselves. Named keys are written in angle
//! brackets, case-insensitively: `<Esc>`, `<CR>`/`<Enter>`, `<BS>`, `<Del>`,
//! `<Tab>`, `<S-Tab>`, arrows, `<Home>`, `<End>`, `<PageUp>`, `<PageDown>`,
//! `<Space>`, control chords `<C-x>`, alt chords `<A-x>` and `<lt>` for a
//! literal `<`.

use thiserror::Error;

use crate::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyScriptError {
    #[error("unterminated key name starting at offset {offset}")]
    Unterminated { offset: usize },
    #[error("unknown key name `<{name}>` at offset {offset}")]
    UnknownName { name: String, offset: usize },
}

/// Parse a key script into key events.
pub fn parse_key_script(script: &str) -> Result<Vec<KeyEvent>, KeyScriptError> {
    let chars: Vec<char> = script.chars().collect();
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '<' {
            out.push(KeyEvent::char(c));
            i += 1;
            continue;
        }
        let close = chars[i + 1..]
            .iter()
            .position(|c| *c == '>')
            .ok_or(KeyScriptError::Unterminated { offset: i })?;
        let name: String = chars[i + 1..i + 1 + close].iter().collect();
        let key = named_key(&name).ok_or_else(|| KeyScriptError::UnknownName {
            name: name.clone(),
            offset: i,
        })?;
        out.push(key);
        i += close + 2;
    }
    Ok(out)
}

fn named_key(name: &str) -> Option<KeyEvent> {
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "cr" | "enter" | "return" => KeyCode::Enter,
        "bs" | "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "s-tab" => KeyCode::BackTab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        "lt" => KeyCode::Char('<'),
        _ => return chord(&lower),
    };
    Some(KeyEvent::plain(code))
}

/// `c-x` / `a-x` with a single character or `space` after the dash.
fn chord(lower: &str) -> Option<KeyEvent> {
    let (mods, rest) = if let Some(rest) = lower.strip_prefix("c-") {
        (KeyModifiers::CTRL, rest)
    } else if let Some(rest) = lower.strip_prefix("a-") {
        (KeyModifiers::ALT, rest)
    } else {
        return None;
    };
    let ch = match rest {
        "space" => ' ',
        "lt" => '<',
        _ => {
            let mut it = rest.chars();
            let ch = it.next()?;
            if it.next().is_some() {
                return None;
            }
            ch
        }
    };
    Some(KeyEvent::new(KeyCode::Char(ch), mods))
}
