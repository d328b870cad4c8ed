// Keyemit Normalization Tables
// Code -> key, shift variants, ignored codes and keydown-resolved codes
//
// All tables are built once by `KeyTables` and never mutated afterwards.
// A single `KeyTables` value is shared (usually behind an `Arc`) by every
// emitter that needs it.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::key::{codes, KeyCode};

/// Unshifted -> shifted punctuation on a US layout
const SHIFTED_PUNCTUATION: &[(&str, &str)] = &[
    ("`", "~"),
    ("1", "!"),
    ("2", "@"),
    ("3", "#"),
    ("4", "$"),
    ("5", "%"),
    ("6", "^"),
    ("7", "&"),
    ("8", "*"),
    ("9", "("),
    ("0", ")"),
    ("-", "_"),
    ("=", "+"),
    ("[", "{"),
    ("]", "}"),
    (";", ":"),
    ("'", "\""),
    ("\\", "|"),
    (".", ">"),
    (",", "<"),
    ("/", "?"),
];

/// Codes whose base key is not derivable from ASCII arithmetic
const SPECIAL_CODES: &[(KeyCode, &str)] = &[
    (codes::BACKSPACE, "backspace"),
    (codes::TAB, "tab"),
    (codes::ENTER, "enter"),
    (codes::ESCAPE, "esc"),
    (codes::SPACE, "space"),
    (codes::PAGE_UP, "page up"),
    (codes::PAGE_DOWN, "page down"),
    (codes::END, "end"),
    (codes::HOME, "home"),
    (codes::LEFT, "left"),
    (codes::UP, "up"),
    (codes::RIGHT, "right"),
    (codes::DOWN, "down"),
    (codes::DELETE, "delete"),
    (KeyCode(48), "0"),
    (KeyCode(49), "1"),
    (KeyCode(50), "2"),
    (KeyCode(51), "3"),
    (KeyCode(52), "4"),
    (KeyCode(53), "5"),
    (KeyCode(54), "6"),
    (KeyCode(55), "7"),
    (KeyCode(56), "8"),
    (KeyCode(57), "9"),
    (codes::SEMICOLON, ";"),
    (codes::EQUAL, "="),
    (codes::COMMA, ","),
    (codes::MINUS, "-"),
    (codes::PERIOD, "."),
    (codes::SLASH, "/"),
    (codes::BACKQUOTE, "`"),
    (codes::BRACKET_LEFT, "["),
    (codes::BACKSLASH, "\\"),
    (codes::BRACKET_RIGHT, "]"),
    (codes::QUOTE, "'"),
];

/// Modifier keys pressed on their own
const BARE_MODIFIER_CODES: &[KeyCode] = &[
    codes::SHIFT,
    codes::CTRL,
    codes::ALT,
    codes::LEFT_META,
    codes::RIGHT_META,
];

/// Keys that never produce a keypress and must be finalized at keydown
const NON_CHARACTER_CODES: &[KeyCode] = &[
    codes::ESCAPE,
    codes::LEFT,
    codes::UP,
    codes::RIGHT,
    codes::DOWN,
    codes::HOME,
    codes::END,
    codes::INSERT,
    codes::DELETE,
    codes::CAPS_LOCK,
    codes::TAB,
    codes::BACKSPACE,
    codes::ENTER,
];

/// Physical codes whose shifted keypress carries a trustworthy layout key
const SHIFTED_PHYSICAL_CODES: &[&str] = &[
    "KeyA", "KeyB", "KeyC", "KeyD", "KeyE", "KeyF", "KeyG", "KeyH", "KeyI", "KeyJ", "KeyK",
    "KeyL", "KeyM", "KeyN", "KeyO", "KeyP", "KeyQ", "KeyR", "KeyS", "KeyT", "KeyU", "KeyV",
    "KeyW", "KeyX", "KeyY", "KeyZ", "Digit1", "Digit2", "Digit3", "Digit4", "Digit5", "Digit6",
    "Digit7", "Digit8", "Digit9", "Digit0", "Minus", "Equal", "BracketLeft", "BracketRight",
    "Backslash", "BackSlash", "Semicolon", "Quote", "Comma", "Period", "Slash", "Backquote",
];

/// Errors raised when building tables from custom options
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("IME sentinel code {0} collides with a table entry")]
    SentinelCollision(KeyCode),
}

/// Host-specific deviations enabled at table construction time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostQuirks {
    /// Host reports the hyphen key as code 173 instead of 189
    #[serde(default)]
    pub alternate_hyphen_code: bool,
}

/// Options used to build a `KeyTables`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub quirks: HostQuirks,
    pub ime_sentinel: KeyCode,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            quirks: HostQuirks::default(),
            ime_sentinel: codes::IME_PROCESS,
        }
    }
}

/// Maps an unshifted base key to its shifted glyph.
#[derive(Debug, Clone, Default)]
pub struct ShiftMap {
    entries: IndexMap<String, String>,
}

impl ShiftMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// US punctuation followed by the 26 letters
    pub fn standard() -> Self {
        let mut map = Self::new();
        for (base, shifted) in SHIFTED_PUNCTUATION {
            map.insert(base, shifted);
        }
        map.populate_letters();
        map
    }

    /// Add lowercase -> uppercase for every ASCII letter.
    ///
    /// Existing entries are kept, so running this again is a no-op.
    pub fn populate_letters(&mut self) {
        for letter in 'a'..='z' {
            self.entries
                .entry(letter.to_string())
                .or_insert_with(|| letter.to_ascii_uppercase().to_string());
        }
    }

    /// Insert an entry unless the base key is already mapped.
    ///
    /// Returns false when an entry was already present.
    pub fn insert(&mut self, base: &str, shifted: &str) -> bool {
        if self.entries.contains_key(base) {
            return false;
        }
        self.entries.insert(base.to_string(), shifted.to_string());
        true
    }

    pub fn get(&self, base: &str) -> Option<&str> {
        self.entries.get(base).map(String::as_str)
    }

    /// Reverse lookup: the base key that shifts to `shifted`
    pub fn unshift(&self, shifted: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| v.as_str() == shifted)
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Maps a legacy code to a base key name.
#[derive(Debug, Clone, Default)]
pub struct SpecialCodeMap {
    entries: IndexMap<KeyCode, String>,
}

impl SpecialCodeMap {
    pub fn standard(quirks: HostQuirks) -> Self {
        let mut entries: IndexMap<KeyCode, String> = SPECIAL_CODES
            .iter()
            .map(|(code, name)| (*code, name.to_string()))
            .collect();

        for code in codes::KEY_A.0..=codes::KEY_Z.0 {
            let letter = char::from(code as u8).to_ascii_lowercase();
            entries.entry(KeyCode(code)).or_insert_with(|| letter.to_string());
        }

        if quirks.alternate_hyphen_code {
            entries.insert(codes::ALTERNATE_HYPHEN, "-".to_string());
        }

        Self { entries }
    }

    pub fn get(&self, code: KeyCode) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    pub fn contains(&self, code: KeyCode) -> bool {
        self.entries.contains_key(&code)
    }

    /// Reverse lookup: the first code mapped to `name`
    pub fn code_for(&self, name: &str) -> Option<KeyCode> {
        self.entries
            .iter()
            .find(|(_, v)| v.as_str() == name)
            .map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// An immutable set of legacy codes
#[derive(Debug, Clone, Default)]
pub struct CodeSet {
    codes: IndexSet<KeyCode>,
}

impl CodeSet {
    pub fn from_codes(codes: &[KeyCode]) -> Self {
        Self {
            codes: codes.iter().copied().collect(),
        }
    }

    pub fn contains(&self, code: KeyCode) -> bool {
        self.codes.contains(&code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.codes.iter().copied()
    }
}

/// Every lookup table the resolution procedure consults.
#[derive(Debug, Clone)]
pub struct KeyTables {
    shift: ShiftMap,
    special: SpecialCodeMap,
    ignore: CodeSet,
    non_character: CodeSet,
    shifted_physical: IndexSet<&'static str>,
    ime_sentinel: KeyCode,
}

impl Default for KeyTables {
    fn default() -> Self {
        Self::build(TableOptions::default())
    }
}

impl KeyTables {
    /// Build tables for the given options, checking cross-table invariants.
    pub fn with_options(options: TableOptions) -> Result<Self, TableError> {
        let tables = Self::build(options);
        tables.validate()?;
        Ok(tables)
    }

    /// Tables for a host with the given quirks and the default sentinel
    pub fn with_quirks(quirks: HostQuirks) -> Self {
        Self::build(TableOptions {
            quirks,
            ..TableOptions::default()
        })
    }

    fn build(options: TableOptions) -> Self {
        let tables = Self {
            shift: ShiftMap::standard(),
            special: SpecialCodeMap::standard(options.quirks),
            ignore: CodeSet::from_codes(BARE_MODIFIER_CODES),
            non_character: CodeSet::from_codes(NON_CHARACTER_CODES),
            shifted_physical: SHIFTED_PHYSICAL_CODES.iter().copied().collect(),
            ime_sentinel: options.ime_sentinel,
        };
        debug_assert!(
            tables.ignore.iter().all(|code| !tables.special.contains(code)),
            "bare modifier codes must not be mapped"
        );
        log::debug!(
            "built key tables: {} shift entries, {} special codes, sentinel {}",
            tables.shift.len(),
            tables.special.len(),
            tables.ime_sentinel.code()
        );
        tables
    }

    /// Check that the IME sentinel is not claimed by another resolution stage.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.ignore.contains(self.ime_sentinel) || self.special.contains(self.ime_sentinel) {
            return Err(TableError::SentinelCollision(self.ime_sentinel));
        }
        Ok(())
    }

    pub fn shift_map(&self) -> &ShiftMap {
        &self.shift
    }

    pub fn special_codes(&self) -> &SpecialCodeMap {
        &self.special
    }

    pub fn ignored_codes(&self) -> &CodeSet {
        &self.ignore
    }

    pub fn non_character_codes(&self) -> &CodeSet {
        &self.non_character
    }

    pub fn ime_sentinel(&self) -> KeyCode {
        self.ime_sentinel
    }

    pub fn is_ignored(&self, code: KeyCode) -> bool {
        self.ignore.contains(code)
    }

    pub fn is_non_character(&self, code: KeyCode) -> bool {
        self.non_character.contains(code)
    }

    /// True if a shifted keypress on this physical key is resolved directly.
    pub fn is_shifted_physical(&self, physical: &str) -> bool {
        self.shifted_physical.contains(physical)
    }

    pub fn shifted_physical_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.shifted_physical.iter().copied()
    }

    /// Base key for a code: the special table first, then the code read as
    /// a character. Unmapped codes still yield a (possibly odd) character.
    pub fn base_key(&self, code: KeyCode) -> String {
        if let Some(name) = self.special.get(code) {
            return name.to_string();
        }
        char::from_u32(u32::from(code.code()))
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string()
    }

    pub fn shifted(&self, base: &str) -> Option<&str> {
        self.shift.get(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_map_letters_and_punctuation() {
        let map = ShiftMap::standard();
        assert_eq!(map.get("1"), Some("!"));
        assert_eq!(map.get("/"), Some("?"));
        assert_eq!(map.get("q"), Some("Q"));
        assert_eq!(map.get("tab"), None);
        assert_eq!(map.len(), SHIFTED_PUNCTUATION.len() + 26);
    }

    #[test]
    fn test_populate_letters_keeps_existing_entries() {
        let mut map = ShiftMap::new();
        map.insert("a", "@");
        map.populate_letters();
        map.populate_letters();
        assert_eq!(map.get("a"), Some("@"));
        assert_eq!(map.get("b"), Some("B"));
        assert_eq!(map.len(), 26);
    }

    #[test]
    fn test_shift_map_insert_does_not_overwrite() {
        let mut map = ShiftMap::standard();
        assert!(!map.insert("1", "?"));
        assert_eq!(map.get("1"), Some("!"));
    }

    #[test]
    fn test_unshift() {
        let map = ShiftMap::standard();
        assert_eq!(map.unshift("!"), Some("1"));
        assert_eq!(map.unshift("Z"), Some("z"));
        assert_eq!(map.unshift("z"), None);
    }

    #[test]
    fn test_special_codes() {
        let map = SpecialCodeMap::standard(HostQuirks::default());
        assert_eq!(map.get(codes::PAGE_UP), Some("page up"));
        assert_eq!(map.get(KeyCode(65)), Some("a"));
        assert_eq!(map.get(KeyCode(90)), Some("z"));
        assert_eq!(map.get(codes::ALTERNATE_HYPHEN), None);
        assert_eq!(map.code_for("enter"), Some(codes::ENTER));
    }

    #[test]
    fn test_alternate_hyphen_quirk() {
        let quirks = HostQuirks {
            alternate_hyphen_code: true,
        };
        let map = SpecialCodeMap::standard(quirks);
        assert_eq!(map.get(codes::ALTERNATE_HYPHEN), Some("-"));
        assert_eq!(map.get(codes::MINUS), Some("-"));
    }

    #[test]
    fn test_default_tables_are_valid() {
        assert_eq!(KeyTables::default().validate(), Ok(()));
        let quirky = KeyTables::with_quirks(HostQuirks {
            alternate_hyphen_code: true,
        });
        assert_eq!(quirky.validate(), Ok(()));
    }

    #[test]
    fn test_sentinel_collision_rejected() {
        let options = TableOptions {
            ime_sentinel: codes::SHIFT,
            ..TableOptions::default()
        };
        assert_eq!(
            KeyTables::with_options(options).err(),
            Some(TableError::SentinelCollision(codes::SHIFT))
        );
    }

    #[test]
    fn test_base_key_fallback() {
        let tables = KeyTables::default();
        assert_eq!(tables.base_key(codes::TAB), "tab");
        // F1 (112) has no table entry and reads as 'p'
        assert_eq!(tables.base_key(KeyCode(112)), "p");
        assert_eq!(tables.base_key(KeyCode(0xD800)), "\u{FFFD}");
    }

    #[test]
    fn test_ignored_and_special_are_disjoint() {
        let quirky = KeyTables::with_quirks(HostQuirks {
            alternate_hyphen_code: true,
        });
        for tables in [KeyTables::default(), quirky] {
            for code in tables.ignored_codes().iter() {
                assert!(!tables.special_codes().contains(code));
            }
        }
    }

    #[test]
    fn test_shifted_physical_codes() {
        let tables = KeyTables::default();
        assert!(tables.is_shifted_physical("KeyA"));
        assert!(tables.is_shifted_physical("Digit0"));
        assert!(tables.is_shifted_physical("Backslash"));
        assert!(!tables.is_shifted_physical("Tab"));
        assert!(!tables.is_shifted_physical("Numpad1"));
    }
}
