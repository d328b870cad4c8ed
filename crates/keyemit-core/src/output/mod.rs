// Keyemit Output Layer
// Emission of canonical keys to handlers and the suppress decision

mod handler;
mod recorder;
mod sink;

pub use handler::{Claim, HandlerError, KeyHandler};
pub use recorder::{ClaimSet, KeyRecorder};
pub use sink::{FailurePolicy, Sink, Verdict};
