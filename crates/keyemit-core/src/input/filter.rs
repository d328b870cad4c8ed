// Keyemit Input Layer - Keydown Guards
// Early filters applied before a keydown reaches key resolution

use crate::input::RawKeyEvent;
use crate::mapping::KeyTables;

/// Check if a keydown belongs to an IME composition in progress.
///
/// The committed text arrives later as a composition-end event, so these
/// keydowns carry no usable key.
pub fn is_ime_keydown(tables: &KeyTables, event: &RawKeyEvent) -> bool {
    event.key_code == tables.ime_sentinel()
}

/// Check if a keydown is a modifier key pressed on its own.
pub fn is_bare_modifier(tables: &KeyTables, event: &RawKeyEvent) -> bool {
    tables.is_ignored(event.key_code)
}

/// Check if a keydown is ordinary text input that the host should insert.
///
/// The keypress phase emits such keys, so keydown must neither emit nor
/// block them. Anything with ctrl, meta or alt held, and any key that never
/// produces a keypress, is resolved at keydown instead.
pub fn is_native_input(tables: &KeyTables, event: &RawKeyEvent) -> bool {
    !event.modifiers().is_special() && !tables.is_non_character(event.key_code)
}
