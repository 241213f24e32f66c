use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Printable character carried by `key`, ignoring control/alt chords.
pub(crate) fn printable(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(ch)
        }
        _ => None,
    }
}

/// Apply a line-editing key to `value`, returning the edited text when the
/// key changed it.
pub(crate) fn edit_text(value: &str, key: &KeyEvent) -> Option<String> {
    if let Some(ch) = printable(key) {
        let mut next = value.to_string();
        next.push(ch);
        return Some(next);
    }
    match key.code {
        KeyCode::Backspace if !value.is_empty() => {
            let mut next = value.to_string();
            next.pop();
            Some(next)
        }
        KeyCode::Delete if !value.is_empty() => Some(String::new()),
        _ => None,
    }
}

/// Keys that open a closed popup.
pub(crate) fn opens_popup(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Down | KeyCode::Char(' '))
        && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Keys that close an open popup without committing.
pub(crate) fn dismisses_popup(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab)
}

/// Optional decorations around a single-line control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decorations {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn edits_append_and_remove() {
        assert_eq!(edit_text("ab", &key(KeyCode::Char('c'))).as_deref(), Some("abc"));
        assert_eq!(edit_text("ab", &key(KeyCode::Backspace)).as_deref(), Some("a"));
        assert_eq!(edit_text("ab", &key(KeyCode::Delete)).as_deref(), Some(""));
        assert_eq!(edit_text("", &key(KeyCode::Backspace)), None);
        assert_eq!(edit_text("ab", &key(KeyCode::Left)), None);
    }

    #[test]
    fn control_chords_are_not_text() {
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(edit_text("", &ctrl_a), None);
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(edit_text("", &shifted).as_deref(), Some("A"));
    }
}
