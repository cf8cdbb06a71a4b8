use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

use crate::{KeyCode, KeyEvent, KeyModifiers};

impl KeyEvent {
    /// Translate a crossterm key event. Releases and keys the editor has no
    /// binding for yield `None`.
    pub fn from_crossterm(event: &CKeyEvent) -> Option<KeyEvent> {
        if event.kind == CKeyEventKind::Release {
            return None;
        }
        let code = match event.code {
            CKeyCode::Char(c) => KeyCode::Char(c),
            CKeyCode::Enter => KeyCode::Enter,
            CKeyCode::Esc => KeyCode::Esc,
            CKeyCode::Backspace => KeyCode::Backspace,
            CKeyCode::Delete => KeyCode::Delete,
            CKeyCode::Tab => KeyCode::Tab,
            CKeyCode::BackTab => KeyCode::BackTab,
            CKeyCode::Up => KeyCode::Up,
            CKeyCode::Down => KeyCode::Down,
            CKeyCode::Left => KeyCode::Left,
            CKeyCode::Right => KeyCode::Right,
            CKeyCode::Home => KeyCode::Home,
            CKeyCode::End => KeyCode::End,
            CKeyCode::PageUp => KeyCode::PageUp,
            CKeyCode::PageDown => KeyCode::PageDown,
            _ => return None,
        };
        let mut mods = map_modifiers(event.modifiers);
        if code == KeyCode::BackTab {
            mods.remove(KeyModifiers::SHIFT);
        }
        Some(KeyEvent::new(code, mods))
    }
}

fn map_modifiers(mods: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if mods.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if mods.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}
