//! Key event model consumed by the modal editor.
//!
//! Hosts translate their native input into [`KeyEvent`]s (see the optional
//! `crossterm` feature) or build them from a key script with
//! [`parse_key_script`].

use std::fmt;

mod script;
#[cfg(feature = "crossterm")]
mod term;

pub use script::{KeyScriptError, parse_key_script};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    /// Shift-Tab.
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Printable character without modifiers.
    pub fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    /// Control chord such as Ctrl-Z.
    pub fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch.to_ascii_lowercase()), KeyModifiers::CTRL)
    }

    /// The character of an unmodified (or shift-only) character key.
    pub fn text_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if (self.mods - KeyModifiers::SHIFT).is_empty() => Some(c),
            _ => None,
        }
    }

    /// True for `Ctrl-<ch>` (other modifiers ignored).
    pub fn is_ctrl(&self, ch: char) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
            && matches!(self.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&ch))
    }
}

impl KeyCode {
    /// Key-script name of a named key.
    fn name(self) -> Option<&'static str> {
        Some(match self {
            KeyCode::Char(_) => return None,
            KeyCode::Enter => "CR",
            KeyCode::Esc => "Esc",
            KeyCode::Backspace => "BS",
            KeyCode::Delete => "Del",
            KeyCode::Tab => "Tab",
            KeyCode::BackTab => "S-Tab",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
        })
    }
}

/// Renders in key-script notation (`a`, `<Esc>`, `<C-z>`, `<lt>`).
impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefix = String::new();
        if self.mods.contains(KeyModifiers::CTRL) {
            prefix.push_str("C-");
        }
        if self.mods.contains(KeyModifiers::ALT) {
            prefix.push_str("A-");
        }
        match (self.code, self.code.name()) {
            (_, Some(name)) => write!(f, "<{prefix}{name}>"),
            (KeyCode::Char('<'), None) if prefix.is_empty() => f.write_str("<lt>"),
            (KeyCode::Char(' '), None) if !prefix.is_empty() => write!(f, "<{prefix}Space>"),
            (KeyCode::Char(c), None) if prefix.is_empty() => write!(f, "{c}"),
            (KeyCode::Char(c), None) => write!(f, "<{prefix}{c}>"),
            (_, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_script_notation() {
        assert_eq!(KeyEvent::char('x').to_string(), "x");
        assert_eq!(KeyEvent::char('<').to_string(), "<lt>");
        assert_eq!(KeyEvent::ctrl('Z').to_string(), "<C-z>");
        assert_eq!(KeyEvent::plain(KeyCode::BackTab).to_string(), "<S-Tab>");
        assert_eq!(KeyEvent::plain(KeyCode::Enter).to_string(), "<CR>");
    }

    #[test]
    fn text_char_ignores_shift_only() {
        assert_eq!(KeyEvent::char('a').text_char(), Some('a'));
        assert_eq!(
            KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT).text_char(),
            Some('A')
        );
        assert_eq!(KeyEvent::ctrl('a').text_char(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Tab).text_char(), None);
    }

    #[test]
    fn ctrl_matching_is_case_insensitive() {
        let ev = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::CTRL | KeyModifiers::SHIFT);
        assert!(ev.is_ctrl('r'));
        assert!(!KeyEvent::char('r').is_ctrl('r'));
    }
}
