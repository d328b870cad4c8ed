// Keyemit Combo Type
// A base key with an ordered set of modifier prefixes

use std::fmt;

use smallvec::SmallVec;

use crate::key::CanonicalKey;
use crate::mapping::ShiftMap;
use crate::modifier::{Modifier, ModifierState};

/// A canonical key split into its modifier prefixes and base key.
///
/// Modifiers are always kept sorted in canonical order and deduplicated,
/// so `Display` produces the canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combo {
    modifiers: SmallVec<[Modifier; 4]>,
    base: String,
}

impl Combo {
    /// Create a Combo from modifiers (any order) and a base key
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, base: impl Into<String>) -> Self {
        let mut modifiers: SmallVec<[Modifier; 4]> = modifiers.into_iter().collect();
        modifiers.sort();
        modifiers.dedup();
        Self {
            modifiers,
            base: base.into(),
        }
    }

    /// A bare base key
    pub fn plain(base: impl Into<String>) -> Self {
        Self::new([], base)
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn with_modifier(&self, modifier: Modifier) -> Self {
        Self::new(
            self.modifiers.iter().copied().chain(std::iter::once(modifier)),
            self.base.clone(),
        )
    }

    pub fn to_canonical(&self) -> CanonicalKey {
        CanonicalKey::new(self.to_string())
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            f.write_str(modifier.prefix())?;
        }
        f.write_str(&self.base)
    }
}

/// Layer modifier prefixes onto a base key.
///
/// Shift is absorbed into the key when the shift map has a variant for it
/// (`1` becomes `!`); otherwise it stays as a literal `shift+` prefix.
/// Alt, ctrl and meta are always literal prefixes. Prefix order is fixed
/// and independent of the order the modifiers were pressed.
pub fn compose(base: &str, modifiers: ModifierState, shift_map: &ShiftMap) -> Combo {
    let mut held: SmallVec<[Modifier; 4]> = SmallVec::new();
    let mut key = base;

    if modifiers.shift {
        match shift_map.get(base) {
            Some(shifted) => key = shifted,
            None => held.push(Modifier::Shift),
        }
    }
    held.extend(
        [Modifier::Alt, Modifier::Ctrl, Modifier::Meta]
            .into_iter()
            .filter(|m| modifiers.is_held(*m)),
    );

    Combo {
        modifiers: held,
        base: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(mods: &[Modifier]) -> ModifierState {
        ModifierState::from_modifiers(mods.iter().copied())
    }

    #[test]
    fn test_shift_absorbed_into_glyph() {
        let map = ShiftMap::standard();
        assert_eq!(compose("1", state(&[Modifier::Shift]), &map).to_string(), "!");
        assert_eq!(compose("a", state(&[Modifier::Shift]), &map).to_string(), "A");
        assert_eq!(compose("'", state(&[Modifier::Shift]), &map).to_string(), "\"");
    }

    #[test]
    fn test_shift_prefix_without_glyph() {
        let map = ShiftMap::standard();
        assert_eq!(
            compose("tab", state(&[Modifier::Shift]), &map).to_string(),
            "shift+tab"
        );
        assert_eq!(
            compose("backspace", state(&[Modifier::Shift]), &map).to_string(),
            "shift+backspace"
        );
    }

    #[test]
    fn test_shifted_digit_without_entry_falls_back_to_prefix() {
        let map = ShiftMap::new();
        assert_eq!(
            compose("1", state(&[Modifier::Shift]), &map).to_string(),
            "shift+1"
        );
    }

    #[test]
    fn test_fixed_prefix_order() {
        let map = ShiftMap::standard();
        let all = state(&[Modifier::Meta, Modifier::Ctrl, Modifier::Alt]);
        assert_eq!(compose("k", all, &map).to_string(), "alt+ctrl+meta+k");
        let with_shift = state(&[Modifier::Meta, Modifier::Shift, Modifier::Alt]);
        assert_eq!(
            compose("tab", with_shift, &map).to_string(),
            "shift+alt+meta+tab"
        );
        assert_eq!(
            compose("2", with_shift, &map).to_string(),
            "alt+meta+@"
        );
    }

    #[test]
    fn test_every_flag_combination_composes() {
        let map = ShiftMap::standard();
        for bits in 0u8..16 {
            let mods = ModifierState {
                shift: bits & 1 != 0,
                alt: bits & 2 != 0,
                ctrl: bits & 4 != 0,
                meta: bits & 8 != 0,
            };
            let combo = compose("left", mods, &map);
            assert_eq!(combo.base(), "left");
            let held: Vec<Modifier> = mods.held().collect();
            assert_eq!(combo.modifiers(), held.as_slice());
        }
    }

    #[test]
    fn test_combo_new_sorts_and_dedups() {
        let combo = Combo::new([Modifier::Meta, Modifier::Ctrl, Modifier::Meta], "k");
        assert_eq!(combo.to_string(), "ctrl+meta+k");
        assert!(combo.has(Modifier::Ctrl));
        assert_eq!(combo.with_modifier(Modifier::Alt).to_string(), "alt+ctrl+meta+k");
    }
}
