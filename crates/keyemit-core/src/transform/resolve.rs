// Keyemit Key Resolution
// Pure decision procedures for each input phase
//
// Nothing here emits or touches handlers: each function maps one host
// event to what the emitter should do with it.

use crate::combo::compose;
use crate::input::{is_bare_modifier, is_ime_keydown, is_native_input, RawKeyEvent};
use crate::key::CanonicalKey;
use crate::mapping::KeyTables;

/// What the keydown phase decided for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDownResolution {
    /// IME composition in progress; the commit arrives separately
    ImeInProgress,
    /// A modifier key pressed on its own
    BareModifier,
    /// Plain text input, already handled by the keypress phase
    NativeInput,
    /// A fully composed key to emit
    Key(CanonicalKey),
}

/// Resolve a keydown event.
///
/// Order matters: IME sentinel, bare modifiers, the native-input fast path,
/// then base key lookup and modifier composition.
pub fn resolve_keydown(tables: &KeyTables, event: &RawKeyEvent) -> KeyDownResolution {
    if is_ime_keydown(tables, event) {
        return KeyDownResolution::ImeInProgress;
    }
    if is_bare_modifier(tables, event) {
        return KeyDownResolution::BareModifier;
    }
    if is_native_input(tables, event) {
        return KeyDownResolution::NativeInput;
    }

    let base = tables.base_key(event.key_code);
    let combo = compose(&base, event.modifiers(), tables.shift_map());
    KeyDownResolution::Key(combo.to_canonical())
}

/// Resolve a keypress event.
///
/// Shifted symbols on known physical keys take the host's layout-resolved
/// key string as is, since legacy codes cannot tell layouts apart. Any
/// other modified keypress is left to keydown. Unmodified keypresses emit
/// their key string directly. Returns `None` when deferred.
pub fn resolve_keypress(tables: &KeyTables, event: &RawKeyEvent) -> Option<CanonicalKey> {
    let modifiers = event.modifiers();
    if modifiers.shift && tables.is_shifted_physical(&event.code) {
        return Some(CanonicalKey::new(event.key.as_str()));
    }
    if modifiers.any() {
        return None;
    }
    Some(CanonicalKey::new(event.key.as_str()))
}

/// Split committed IME text into one unmodified key per character.
pub fn split_commit(text: &str) -> impl Iterator<Item = CanonicalKey> + '_ {
    text.chars().map(CanonicalKey::from_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::codes;
    use crate::modifier::{Modifier, ModifierState};

    fn keydown(code: u16, mods: &[Modifier]) -> KeyDownResolution {
        let tables = KeyTables::default();
        let event = RawKeyEvent::from_code(code)
            .with_modifiers(ModifierState::from_modifiers(mods.iter().copied()));
        resolve_keydown(&tables, &event)
    }

    fn key(name: &str) -> KeyDownResolution {
        KeyDownResolution::Key(CanonicalKey::from(name))
    }

    #[test]
    fn test_guards() {
        assert_eq!(keydown(229, &[]), KeyDownResolution::ImeInProgress);
        assert_eq!(keydown(229, &[Modifier::Ctrl]), KeyDownResolution::ImeInProgress);
        assert_eq!(keydown(16, &[Modifier::Shift]), KeyDownResolution::BareModifier);
        assert_eq!(keydown(91, &[Modifier::Meta]), KeyDownResolution::BareModifier);
        assert_eq!(keydown(65, &[]), KeyDownResolution::NativeInput);
        assert_eq!(keydown(49, &[Modifier::Shift]), KeyDownResolution::NativeInput);
    }

    #[test]
    fn test_non_character_keys() {
        assert_eq!(keydown(9, &[]), key("tab"));
        assert_eq!(keydown(9, &[Modifier::Shift]), key("shift+tab"));
        assert_eq!(keydown(8, &[Modifier::Shift]), key("shift+backspace"));
        assert_eq!(keydown(13, &[]), key("enter"));
        assert_eq!(keydown(27, &[]), key("esc"));
        assert_eq!(keydown(37, &[Modifier::Ctrl]), key("ctrl+left"));
        assert_eq!(keydown(46, &[]), key("delete"));
    }

    #[test]
    fn test_non_character_without_table_entry_uses_char_fallback() {
        // Insert and caps lock are resolved at keydown but have no name
        assert_eq!(keydown(45, &[]), key("-"));
        assert_eq!(keydown(20, &[]), key("\u{14}"));
    }

    #[test]
    fn test_special_modifiers_on_characters() {
        assert_eq!(keydown(75, &[Modifier::Ctrl, Modifier::Meta]), key("ctrl+meta+k"));
        assert_eq!(keydown(49, &[Modifier::Ctrl, Modifier::Shift]), key("ctrl+!"));
        assert_eq!(keydown(65, &[Modifier::Alt, Modifier::Shift]), key("alt+A"));
        assert_eq!(
            keydown(75, &[Modifier::Meta, Modifier::Alt, Modifier::Ctrl]),
            key("alt+ctrl+meta+k")
        );
        assert_eq!(keydown(189, &[Modifier::Ctrl]), key("ctrl+-"));
        assert_eq!(keydown(32, &[Modifier::Ctrl]), key("ctrl+space"));
    }

    #[test]
    fn test_alternate_hyphen_requires_quirk() {
        let mut event = RawKeyEvent::from_code(codes::ALTERNATE_HYPHEN);
        event.ctrl = true;

        let plain = KeyTables::default();
        assert_eq!(
            resolve_keydown(&plain, &event),
            KeyDownResolution::Key(CanonicalKey::from("ctrl+\u{ad}"))
        );

        let quirky = KeyTables::with_quirks(crate::mapping::HostQuirks {
            alternate_hyphen_code: true,
        });
        assert_eq!(
            resolve_keydown(&quirky, &event),
            KeyDownResolution::Key(CanonicalKey::from("ctrl+-"))
        );
    }

    #[test]
    fn test_keypress_unmodified_emits_key() {
        let tables = KeyTables::default();
        let event = RawKeyEvent::new(97u16, "KeyA", "a");
        assert_eq!(resolve_keypress(&tables, &event), Some(CanonicalKey::from("a")));
    }

    #[test]
    fn test_keypress_shifted_symbol_uses_layout_key() {
        let tables = KeyTables::default();
        // On a French layout, shift+Digit1 produces '1'
        let event = RawKeyEvent::new(49u16, "Digit1", "1").shifted();
        assert_eq!(resolve_keypress(&tables, &event), Some(CanonicalKey::from("1")));
        let event = RawKeyEvent::new(63u16, "Slash", "?").shifted();
        assert_eq!(resolve_keypress(&tables, &event), Some(CanonicalKey::from("?")));
    }

    #[test]
    fn test_keypress_modified_is_deferred() {
        let tables = KeyTables::default();
        let shifted_enter = RawKeyEvent::new(13u16, "Enter", "Enter").shifted();
        assert_eq!(resolve_keypress(&tables, &shifted_enter), None);

        let mut ctrl_a = RawKeyEvent::new(97u16, "KeyA", "a");
        ctrl_a.ctrl = true;
        assert_eq!(resolve_keypress(&tables, &ctrl_a), None);

        let mut ctrl_shift_a = RawKeyEvent::new(65u16, "KeyA", "A").shifted();
        ctrl_shift_a.ctrl = true;
        assert_eq!(
            resolve_keypress(&tables, &ctrl_shift_a),
            Some(CanonicalKey::from("A"))
        );
    }

    #[test]
    fn test_split_commit() {
        let keys: Vec<CanonicalKey> = split_commit("日本").collect();
        assert_eq!(keys, vec![CanonicalKey::from("日"), CanonicalKey::from("本")]);
        assert_eq!(split_commit("").count(), 0);
    }
}
