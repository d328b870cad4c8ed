// Keyemit Key Types
// Legacy numeric key codes and the canonical key vocabulary

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

// KeyCode, the `codes` constants and both name lookups are generated from
// one table in build.rs
include!(concat!(env!("OUT_DIR"), "/key_codes.rs"));

/// The normalized name of one logical keystroke, e.g. `a`, `shift+tab`
/// or `alt+ctrl+meta+k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Canonical key for a single committed character
    pub fn from_char(c: char) -> Self {
        Self(c.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for single-character keys, which are insertable as text.
    pub fn is_printable(&self) -> bool {
        let mut chars = self.0.chars();
        chars.next().is_some() && chars.next().is_none()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for CanonicalKey {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CanonicalKey {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for CanonicalKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for CanonicalKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_from_name() {
        assert_eq!(code_from_name("tab"), Some(codes::TAB));
        assert_eq!(code_from_name("Esc"), Some(codes::ESCAPE));
        assert_eq!(code_from_name("a"), Some(KeyCode::from(65)));
        assert_eq!(code_from_name("7"), Some(KeyCode::from(55)));
        assert_eq!(code_from_name("F13"), None);
    }

    #[test]
    fn test_named_codes_round_trip() {
        for code in [
            codes::BACKSPACE,
            codes::CAPS_LOCK,
            codes::DIGIT_0,
            codes::DIGIT_9,
            codes::KEY_A,
            codes::KEY_Z,
            codes::ALTERNATE_HYPHEN,
            codes::BRACKET_RIGHT,
            codes::IME_PROCESS,
        ] {
            assert_eq!(code_from_name(code.name()), Some(code), "{}", code.code());
        }
        assert_eq!(codes::KEY_Q, KeyCode(81));
        assert_eq!(codes::DIGIT_5.name(), "5");
    }

    #[test]
    fn test_code_display() {
        assert_eq!(KeyCode::from(65).to_string(), "A");
        assert_eq!(codes::PAGE_DOWN.to_string(), "PAGE_DOWN");
        assert_eq!(KeyCode::from(1000).to_string(), "UNKNOWN");
    }

    #[test]
    fn test_code_from_str_accepts_numbers_and_names() {
        assert_eq!("229".parse::<KeyCode>(), Ok(codes::IME_PROCESS));
        assert_eq!("left".parse::<KeyCode>(), Ok(codes::LEFT));
        assert!("nope".parse::<KeyCode>().is_err());
    }

    #[test]
    fn test_canonical_key_printable() {
        assert!(CanonicalKey::from("a").is_printable());
        assert!(CanonicalKey::from_char('é').is_printable());
        assert!(!CanonicalKey::from("tab").is_printable());
        assert!(!CanonicalKey::from("ctrl+a").is_printable());
        assert!(!CanonicalKey::from("").is_printable());
    }

    #[test]
    fn test_canonical_key_compares_with_str() {
        let key = CanonicalKey::from("shift+tab");
        assert_eq!(key, "shift+tab");
        assert_eq!(key.to_string(), "shift+tab");
    }
}
