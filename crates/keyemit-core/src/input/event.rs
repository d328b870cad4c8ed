// Keyemit Input Layer - Host Event Values
// Narrow value types built by host adapters

use serde::{Deserialize, Serialize};

use crate::key::KeyCode;
use crate::modifier::ModifierState;

/// One keyboard transition as reported by the host.
///
/// Adapters copy exactly these fields out of the host's native event; the
/// engine never sees the native object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawKeyEvent {
    /// Legacy numeric key code
    pub key_code: KeyCode,
    /// Physical key identity independent of layout, e.g. `KeyA`
    #[serde(default)]
    pub code: String,
    /// Layout-aware key string, e.g. `A` or `!`
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl RawKeyEvent {
    /// An event carrying only a legacy code
    pub fn from_code(key_code: impl Into<KeyCode>) -> Self {
        Self {
            key_code: key_code.into(),
            code: String::new(),
            key: String::new(),
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    pub fn new(key_code: impl Into<KeyCode>, code: &str, key: &str) -> Self {
        Self {
            code: code.to_string(),
            key: key.to_string(),
            ..Self::from_code(key_code)
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierState) -> Self {
        self.shift = modifiers.shift;
        self.ctrl = modifiers.ctrl;
        self.alt = modifiers.alt;
        self.meta = modifiers.meta;
        self
    }

    pub fn shifted(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn modifiers(&self) -> ModifierState {
        ModifierState {
            shift: self.shift,
            ctrl: self.ctrl,
            alt: self.alt,
            meta: self.meta,
        }
    }
}

/// End of an IME composition carrying the committed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositionEvent {
    #[serde(default)]
    pub data: String,
}

impl CompositionEvent {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// The phase a host event was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    CompositionEnd,
    KeyPress,
    KeyDown,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::CompositionEnd => "composition_end",
            Phase::KeyPress => "keypress",
            Phase::KeyDown => "keydown",
        }
    }
}

/// Any of the three input signals the emitter listens to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum HostEvent {
    CompositionEnd(CompositionEvent),
    #[serde(rename = "keypress")]
    KeyPress(RawKeyEvent),
    #[serde(rename = "keydown")]
    KeyDown(RawKeyEvent),
}

impl HostEvent {
    pub fn phase(&self) -> Phase {
        match self {
            HostEvent::CompositionEnd(_) => Phase::CompositionEnd,
            HostEvent::KeyPress(_) => Phase::KeyPress,
            HostEvent::KeyDown(_) => Phase::KeyDown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::Modifier;

    #[test]
    fn test_modifiers_round_trip_through_flags() {
        let state = ModifierState::NONE.with(Modifier::Ctrl).with(Modifier::Meta);
        let event = RawKeyEvent::new(75u16, "KeyK", "k").with_modifiers(state);
        assert!(event.ctrl && event.meta);
        assert!(!event.shift && !event.alt);
        assert_eq!(event.modifiers(), state);
    }

    #[test]
    fn test_host_event_phase() {
        let down = HostEvent::KeyDown(RawKeyEvent::from_code(9u16));
        assert_eq!(down.phase(), Phase::KeyDown);
        assert_eq!(down.phase().as_str(), "keydown");
        let commit = HostEvent::CompositionEnd(CompositionEvent::new("ab"));
        assert_eq!(commit.phase(), Phase::CompositionEnd);
    }
}
