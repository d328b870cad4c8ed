// Keyemit Output - Stock Handlers
// A recording handler and a fixed claim set

use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::Mutex;

use crate::key::CanonicalKey;
use crate::output::handler::{Claim, HandlerError, KeyHandler};

/// Records every offered key; never claims.
///
/// Clones share the same log, so a host can keep one clone and hand the
/// other to the emitter.
#[derive(Debug, Clone, Default)]
pub struct KeyRecorder {
    keys: Arc<Mutex<Vec<CanonicalKey>>>,
}

impl KeyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn keys(&self) -> Vec<CanonicalKey> {
        self.keys.lock().clone()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<CanonicalKey> {
        std::mem::take(&mut *self.keys.lock())
    }

    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}

impl KeyHandler for KeyRecorder {
    fn offer(&mut self, key: &CanonicalKey) -> Result<Claim, HandlerError> {
        self.keys.lock().push(key.clone());
        Ok(Claim::Unclaimed)
    }

    fn name(&self) -> &str {
        "recorder"
    }
}

/// Claims a fixed set of canonical keys
#[derive(Debug, Clone, Default)]
pub struct ClaimSet {
    keys: IndexSet<CanonicalKey>,
}

impl ClaimSet {
    pub fn new(keys: impl IntoIterator<Item = CanonicalKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn insert(&mut self, key: CanonicalKey) -> bool {
        self.keys.insert(key)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalKey> {
        self.keys.iter()
    }
}

impl KeyHandler for ClaimSet {
    fn offer(&mut self, key: &CanonicalKey) -> Result<Claim, HandlerError> {
        Ok(Claim::from(self.keys.contains(key.as_str())))
    }

    fn name(&self) -> &str {
        "claims"
    }
}
