// Keyemit Output - Key Handlers
// Downstream consumers that are offered each canonical key

use std::fmt;

use crate::key::CanonicalKey;

/// A handler's answer to an offered key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Claim {
    /// The handler acted on the key; the host default should be suppressed
    Claimed,
    Unclaimed,
}

impl Claim {
    pub fn is_claimed(self) -> bool {
        matches!(self, Claim::Claimed)
    }
}

impl From<bool> for Claim {
    fn from(claimed: bool) -> Self {
        if claimed {
            Claim::Claimed
        } else {
            Claim::Unclaimed
        }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Claim::Claimed => write!(f, "claimed"),
            Claim::Unclaimed => write!(f, "unclaimed"),
        }
    }
}

/// Error returned by a handler that failed while processing a key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("handler '{handler}' failed on '{key}': {reason}")]
pub struct HandlerError {
    pub handler: String,
    pub key: CanonicalKey,
    pub reason: String,
}

impl HandlerError {
    pub fn new(handler: impl Into<String>, key: &CanonicalKey, reason: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            key: key.clone(),
            reason: reason.into(),
        }
    }
}

/// Something that wants to see every canonical key.
///
/// Handlers are offered keys synchronously, in registration order.
pub trait KeyHandler {
    fn offer(&mut self, key: &CanonicalKey) -> Result<Claim, HandlerError>;

    /// Name used in logs and errors
    fn name(&self) -> &str {
        "anonymous"
    }
}

impl<F> KeyHandler for F
where
    F: FnMut(&CanonicalKey) -> Claim,
{
    fn offer(&mut self, key: &CanonicalKey) -> Result<Claim, HandlerError> {
        Ok(self(key))
    }
}
