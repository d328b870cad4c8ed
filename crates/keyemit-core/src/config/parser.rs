// Keyemit Replay Scripts - TOML with Serde
// A recorded sequence of host events plus the keys a handler should claim

#[cfg(feature = "settings-file")]
use std::fs;
#[cfg(feature = "settings-file")]
use std::path::Path;

use serde::Deserialize;

use crate::config::combo_parser::parse_canonical_key;
use crate::input::HostEvent;
use crate::key::CanonicalKey;

/// Replay script errors
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid claim '{key}': {reason}")]
    InvalidClaim { key: String, reason: String },
}

/// Root TOML table of a replay script
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ScriptToml {
    /// Canonical keys the replay claims
    #[serde(default)]
    pub claim: Vec<String>,

    /// Host events in the order they were observed
    #[serde(default, rename = "event")]
    pub events: Vec<HostEvent>,
}

/// A validated replay script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub claims: Vec<CanonicalKey>,
    pub events: Vec<HostEvent>,
}

impl Script {
    /// Load a script from a TOML file
    #[cfg(feature = "settings-file")]
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a script from a TOML string
    #[cfg(feature = "settings-file")]
    pub fn from_toml_str(content: &str) -> Result<Self, ScriptError> {
        let raw: ScriptToml =
            toml::from_str(content).map_err(|e| ScriptError::TomlParse(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Validate a deserialized script.
    ///
    /// Claims are normalized to canonical form; a claim whose prefixes are
    /// repeated or out of order is rejected.
    pub fn from_raw(raw: ScriptToml) -> Result<Self, ScriptError> {
        let claims = raw
            .claim
            .iter()
            .map(|key| {
                parse_canonical_key(key)
                    .map(|combo| combo.to_canonical())
                    .map_err(|e| ScriptError::InvalidClaim {
                        key: key.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "loaded script with {} claim(s) and {} event(s)",
            claims.len(),
            raw.events.len()
        );

        Ok(Self {
            claims,
            events: raw.events,
        })
    }
}

#[cfg(all(test, feature = "settings-file"))]
mod tests {
    use super::*;
    use crate::input::{CompositionEvent, RawKeyEvent};
    use crate::key::KeyCode;

    #[test]
    fn test_parse_script() {
        let script = Script::from_toml_str(
            r#"
claim = ["shift+tab"]

[[event]]
phase = "keydown"
key_code = 9
code = "Tab"
key = "Tab"
shift = true

[[event]]
phase = "keypress"
key_code = 97
code = "KeyA"
key = "a"

[[event]]
phase = "composition_end"
data = "ab"
"#,
        )
        .unwrap();

        assert_eq!(script.claims, vec![CanonicalKey::from("shift+tab")]);
        assert_eq!(script.events.len(), 3);

        let expected_down = RawKeyEvent::new(KeyCode(9), "Tab", "Tab").shifted();
        assert_eq!(script.events[0], HostEvent::KeyDown(expected_down));
        assert_eq!(
            script.events[1],
            HostEvent::KeyPress(RawKeyEvent::new(KeyCode(97), "KeyA", "a"))
        );
        assert_eq!(
            script.events[2],
            HostEvent::CompositionEnd(CompositionEvent::new("ab"))
        );
    }

    #[test]
    fn test_invalid_claim_rejected() {
        let err = Script::from_toml_str("claim = [\"ctrl+alt+k\"]\n").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidClaim { .. }));
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let err = Script::from_toml_str("[[event]]\nphase = \"keyup\"\nkey_code = 9\n").unwrap_err();
        assert!(matches!(err, ScriptError::TomlParse(_)));
    }

    #[test]
    fn test_misspelled_modifier_rejected() {
        let err = Script::from_toml_str(
            "[[event]]\nphase = \"keydown\"\nkey_code = 75\nctlr = true\n",
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::TomlParse(ref msg) if msg.contains("ctlr")));
    }

    #[test]
    fn test_unknown_composition_field_rejected() {
        let err = Script::from_toml_str("[[event]]\nphase = \"composition_end\"\ntext = \"ab\"\n")
            .unwrap_err();
        assert!(matches!(err, ScriptError::TomlParse(_)));
    }

    #[test]
    fn test_empty_script() {
        let script = Script::from_toml_str("").unwrap();
        assert!(script.claims.is_empty());
        assert!(script.events.is_empty());
    }
}
