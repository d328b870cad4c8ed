// Keyemit Config API
// Canonical key parsing and replay scripts

pub mod combo_parser;
pub mod parser;

pub use combo_parser::{parse_canonical_key, KeyParseError};
pub use parser::{Script, ScriptError, ScriptToml};
