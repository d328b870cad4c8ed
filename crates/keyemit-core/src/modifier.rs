// Keyemit Modifier System
// Represents keyboard modifiers (Shift, Alt, Ctrl, Meta) and their flags

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// A keyboard modifier.
///
/// Declaration order is the canonical prefix order: a composite key always
/// reads `shift+alt+ctrl+meta+<base>` with absent modifiers left out.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
    Shift,
    Alt,
    Ctrl,
    Meta,
}

impl Modifier {
    /// Lowercase name as used in canonical keys
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Literal prefix layered onto a base key
    pub fn prefix(self) -> &'static str {
        match self {
            Modifier::Shift => "shift+",
            Modifier::Alt => "alt+",
            Modifier::Ctrl => "ctrl+",
            Modifier::Meta => "meta+",
        }
    }

    /// Position in the canonical prefix order
    pub fn rank(self) -> usize {
        self as usize
    }

    /// All modifiers in canonical order
    pub fn all() -> impl Iterator<Item = Modifier> {
        Modifier::iter()
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four independent modifier flags carried by a raw key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierState {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl ModifierState {
    pub const NONE: ModifierState = ModifierState {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Build a state from a list of held modifiers
    pub fn from_modifiers(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        let mut state = Self::NONE;
        for modifier in modifiers {
            state.set(modifier, true);
        }
        state
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.set(modifier, true);
        self
    }

    pub fn set(&mut self, modifier: Modifier, held: bool) {
        match modifier {
            Modifier::Shift => self.shift = held,
            Modifier::Alt => self.alt = held,
            Modifier::Ctrl => self.ctrl = held,
            Modifier::Meta => self.meta = held,
        }
    }

    pub fn is_held(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Alt => self.alt,
            Modifier::Ctrl => self.ctrl,
            Modifier::Meta => self.meta,
        }
    }

    /// True if any of the four flags is set
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    /// True if ctrl, meta or alt is set.
    ///
    /// Such keystrokes are never plain text input, so the keydown phase
    /// must resolve them even for character keys.
    pub fn is_special(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }

    /// Held modifiers in canonical order
    pub fn held(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::all().filter(move |m| self.is_held(*m))
    }
}
