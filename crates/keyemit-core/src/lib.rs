// Keyemit Core Library
// Normalizes host keyboard events into canonical key names

pub mod combo;
pub mod config;
pub mod input;
pub mod key;
pub mod mapping;
pub mod modifier;
pub mod output;
pub mod transform;

#[cfg(feature = "settings-file")]
pub mod settings;

pub use combo::{compose, Combo};
pub use config::{parse_canonical_key, KeyParseError, Script, ScriptError};
pub use input::{CompositionEvent, HostEvent, Phase, RawKeyEvent};
pub use key::{codes, CanonicalKey, KeyCode};
pub use mapping::{HostQuirks, KeyTables, ShiftMap, SpecialCodeMap, TableError, TableOptions};
pub use modifier::{Modifier, ModifierState};
pub use output::{
    Claim, ClaimSet, FailurePolicy, HandlerError, KeyHandler, KeyRecorder, Sink, Verdict,
};
pub use transform::{
    resolve_keydown, resolve_keypress, DefaultAction, Disposition, Emission, KeyDownResolution,
    KeyEmitter, Outcome,
};

#[cfg(feature = "settings-file")]
pub use settings::{Settings, SettingsError};
