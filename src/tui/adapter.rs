//! Terminal host adapter.
//!
//! Turns crossterm key events into the keydown/keypress pairs a browser
//! would fire for the same keystroke, and pastes into composition commits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use keyemit_core::{CompositionEvent, HostEvent, KeyTables, RawKeyEvent};

/// Physical code identifier for an unshifted US-layout character
fn physical_code(base: char) -> String {
    match base {
        'a'..='z' => format!("Key{}", base.to_ascii_uppercase()),
        '0'..='9' => format!("Digit{}", base),
        ' ' => "Space".to_string(),
        ';' => "Semicolon".to_string(),
        '=' => "Equal".to_string(),
        ',' => "Comma".to_string(),
        '-' => "Minus".to_string(),
        '.' => "Period".to_string(),
        '/' => "Slash".to_string(),
        '`' => "Backquote".to_string(),
        '[' => "BracketLeft".to_string(),
        '\\' => "Backslash".to_string(),
        ']' => "BracketRight".to_string(),
        '\'' => "Quote".to_string(),
        _ => String::new(),
    }
}

/// Legacy code, physical code, key string for a named key
fn named_key(code: KeyCode) -> Option<(u16, &'static str, String)> {
    let named = match code {
        KeyCode::Backspace => (8, "Backspace", "Backspace"),
        KeyCode::Tab | KeyCode::BackTab => (9, "Tab", "Tab"),
        KeyCode::Enter => (13, "Enter", "Enter"),
        KeyCode::CapsLock => (20, "CapsLock", "CapsLock"),
        KeyCode::Esc => (27, "Escape", "Escape"),
        KeyCode::PageUp => (33, "PageUp", "PageUp"),
        KeyCode::PageDown => (34, "PageDown", "PageDown"),
        KeyCode::End => (35, "End", "End"),
        KeyCode::Home => (36, "Home", "Home"),
        KeyCode::Left => (37, "ArrowLeft", "ArrowLeft"),
        KeyCode::Up => (38, "ArrowUp", "ArrowUp"),
        KeyCode::Right => (39, "ArrowRight", "ArrowRight"),
        KeyCode::Down => (40, "ArrowDown", "ArrowDown"),
        KeyCode::Insert => (45, "Insert", "Insert"),
        KeyCode::Delete => (46, "Delete", "Delete"),
        KeyCode::F(n @ 1..=24) => {
            let name = format!("F{}", n);
            return Some((111 + u16::from(n), "", name));
        }
        _ => return None,
    };
    Some((named.0, named.1, named.2.to_string()))
}

/// Browser-style events for one terminal key press
pub fn key_events(key: &KeyEvent, tables: &KeyTables) -> Vec<HostEvent> {
    let mut raw = match key.code {
        KeyCode::Char(c) => char_event(c, tables),
        other => match named_key(other) {
            Some((code, physical, name)) => RawKeyEvent::new(code, physical, &name),
            None => return Vec::new(),
        },
    };

    raw.shift |= key.modifiers.contains(KeyModifiers::SHIFT) || key.code == KeyCode::BackTab;
    raw.ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    raw.alt = key.modifiers.contains(KeyModifiers::ALT);
    raw.meta = key
        .modifiers
        .intersects(KeyModifiers::SUPER | KeyModifiers::META);

    // Browsers fire keypress only for keys that insert something
    let fires_keypress = !raw.modifiers().is_special()
        && (matches!(key.code, KeyCode::Char(_) | KeyCode::Enter));

    let mut events = vec![HostEvent::KeyDown(raw.clone())];
    if fires_keypress {
        events.push(HostEvent::KeyPress(raw));
    }
    events
}

fn char_event(c: char, tables: &KeyTables) -> RawKeyEvent {
    let typed = c.to_string();
    let (base, shifted) = match tables.shift_map().unshift(&typed) {
        Some(base) => (base.to_string(), true),
        None => (typed.clone(), false),
    };

    let code = match base.as_str() {
        " " => 32,
        other => tables
            .special_codes()
            .code_for(other)
            .map(|code| code.code())
            .unwrap_or(0),
    };
    let physical = base.chars().next().map(physical_code).unwrap_or_default();

    let mut raw = RawKeyEvent::new(code, &physical, &typed);
    raw.shift = shifted;
    raw
}

/// Bracketed paste arrives as one committed string
pub fn paste_event(text: &str) -> HostEvent {
    HostEvent::CompositionEnd(CompositionEvent::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(code: KeyCode, modifiers: KeyModifiers) -> Vec<HostEvent> {
        key_events(&KeyEvent::new(code, modifiers), &KeyTables::default())
    }

    #[test]
    fn test_letter_fires_keydown_and_keypress() {
        let out = events(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(out.len(), 2);
        let expected = RawKeyEvent::new(65u16, "KeyA", "a");
        assert_eq!(out[0], HostEvent::KeyDown(expected.clone()));
        assert_eq!(out[1], HostEvent::KeyPress(expected));
    }

    #[test]
    fn test_shifted_symbol_maps_to_digit_key() {
        let out = events(KeyCode::Char('!'), KeyModifiers::SHIFT);
        let HostEvent::KeyDown(raw) = &out[0] else {
            panic!("expected keydown");
        };
        assert_eq!(raw.key_code.code(), 49);
        assert_eq!(raw.code, "Digit1");
        assert_eq!(raw.key, "!");
        assert!(raw.shift);
    }

    #[test]
    fn test_ctrl_letter_has_no_keypress() {
        let out = events(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(out.len(), 1);
        let HostEvent::KeyDown(raw) = &out[0] else {
            panic!("expected keydown");
        };
        assert_eq!(raw.key_code.code(), 75);
        assert!(raw.ctrl);
    }

    #[test]
    fn test_backtab_is_shift_tab() {
        let out = events(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(out.len(), 1);
        let HostEvent::KeyDown(raw) = &out[0] else {
            panic!("expected keydown");
        };
        assert_eq!(raw.key_code.code(), 9);
        assert!(raw.shift);
    }

    #[test]
    fn test_unmapped_keys_produce_nothing() {
        assert!(events(KeyCode::Null, KeyModifiers::NONE).is_empty());
    }
}
