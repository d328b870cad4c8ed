// Keyemit Transform Module
// Raw host events -> canonical keys

pub mod engine;
pub mod resolve;

pub use engine::{DefaultAction, Disposition, Emission, KeyEmitter, Outcome};
pub use resolve::{resolve_keydown, resolve_keypress, split_commit, KeyDownResolution};
