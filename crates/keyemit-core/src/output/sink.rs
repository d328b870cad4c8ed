// Keyemit Output - Emission Sink
// Fans a canonical key out to every handler and aggregates their claims

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::key::CanonicalKey;
use crate::output::handler::{Claim, KeyHandler};

/// How a failing handler counts towards the suppress decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// A failed handler counts as unclaimed
    #[default]
    Allow,
    /// A failed handler counts as a claim
    Suppress,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allow" => Ok(FailurePolicy::Allow),
            "suppress" => Ok(FailurePolicy::Suppress),
            other => Err(format!("unknown failure policy: '{}'", other)),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Allow => write!(f, "allow"),
            FailurePolicy::Suppress => write!(f, "suppress"),
        }
    }
}

/// Aggregate answer of all handlers for one emission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verdict {
    /// Logical OR of every handler's claim
    pub claimed: bool,
    /// Number of handlers that were offered the key
    pub offered: usize,
    /// Number of handlers that returned an error
    pub failures: usize,
}

/// Ordered list of handlers
#[derive(Default)]
pub struct Sink {
    handlers: Vec<Box<dyn KeyHandler>>,
    policy: FailurePolicy,
}

impl Sink {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            handlers: Vec::new(),
            policy,
        }
    }

    /// Register a handler after all existing ones
    pub fn subscribe(&mut self, handler: impl KeyHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn subscribe_boxed(&mut self, handler: Box<dyn KeyHandler>) {
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
    }

    /// Offer a key to every handler in registration order.
    ///
    /// Every handler runs even after one has claimed the key.
    pub fn emit(&mut self, key: &CanonicalKey) -> Verdict {
        let mut verdict = Verdict::default();
        for handler in self.handlers.iter_mut() {
            verdict.offered += 1;
            match handler.offer(key) {
                Ok(claim) => verdict.claimed |= claim.is_claimed(),
                Err(err) => {
                    log::warn!("{} (policy: {})", err, self.policy);
                    verdict.failures += 1;
                    if self.policy == FailurePolicy::Suppress {
                        verdict.claimed = true;
                    }
                }
            }
        }
        log::trace!(
            "emitted '{}' to {} handler(s), claimed={}",
            key,
            verdict.offered,
            verdict.claimed
        );
        verdict
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.handlers.iter().map(|h| h.name()).collect();
        f.debug_struct("Sink")
            .field("handlers", &names)
            .field("policy", &self.policy)
            .finish()
    }
}
