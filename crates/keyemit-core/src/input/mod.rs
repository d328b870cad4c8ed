// Keyemit Input Layer
// Host event values and keydown guards

mod event;
mod filter;

pub use event::{CompositionEvent, HostEvent, Phase, RawKeyEvent};
pub use filter::{is_bare_modifier, is_ime_keydown, is_native_input};
