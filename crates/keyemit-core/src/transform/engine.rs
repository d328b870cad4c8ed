// Keyemit Emitter Engine
// Front-end for the three input phases: resolves, emits and decides
// whether the host should run its default action.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::input::{CompositionEvent, HostEvent, Phase, RawKeyEvent};
use crate::key::CanonicalKey;
use crate::mapping::KeyTables;
use crate::output::{FailurePolicy, KeyHandler, Sink};
use crate::transform::resolve::{resolve_keydown, resolve_keypress, split_commit, KeyDownResolution};

/// Why an event did or did not produce keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Keydown during IME composition
    ImeInProgress,
    /// Keydown of a lone modifier key
    BareModifier,
    /// Keydown of plain text input, left to the host and the keypress phase
    NativeInput,
    /// Modified keypress, left to the keydown phase
    Deferred,
    /// Composition ended without committing any text
    EmptyCommit,
    /// One or more keys were emitted
    Emitted,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::ImeInProgress => write!(f, "ime"),
            Disposition::BareModifier => write!(f, "bare-modifier"),
            Disposition::NativeInput => write!(f, "native"),
            Disposition::Deferred => write!(f, "deferred"),
            Disposition::EmptyCommit => write!(f, "empty-commit"),
            Disposition::Emitted => write!(f, "emitted"),
        }
    }
}

/// What the host should do with the original event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DefaultAction {
    /// Let the host process the keystroke normally
    #[default]
    Allow,
    /// Cancel the default action and stop propagation
    Suppress,
}

impl fmt::Display for DefaultAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultAction::Allow => write!(f, "allow"),
            DefaultAction::Suppress => write!(f, "suppress"),
        }
    }
}

/// One canonical key handed to the handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub key: CanonicalKey,
    pub claimed: bool,
}

/// Result of feeding one host event to the emitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub phase: Phase,
    pub disposition: Disposition,
    pub emissions: SmallVec<[Emission; 1]>,
    pub default_action: DefaultAction,
    /// Handler errors across all emissions of this event
    pub failures: usize,
}

impl Outcome {
    fn silent(phase: Phase, disposition: Disposition) -> Self {
        Self {
            phase,
            disposition,
            emissions: SmallVec::new(),
            default_action: DefaultAction::Allow,
            failures: 0,
        }
    }

    /// True if the host must cancel its default handling
    pub fn should_suppress(&self) -> bool {
        self.default_action == DefaultAction::Suppress
    }

    /// The emitted keys, in emission order
    pub fn keys(&self) -> impl Iterator<Item = &CanonicalKey> {
        self.emissions.iter().map(|e| &e.key)
    }
}

/// Turns host keyboard events into canonical keys for a list of handlers.
#[derive(Debug)]
pub struct KeyEmitter {
    tables: Arc<KeyTables>,
    sink: Sink,
}

impl Default for KeyEmitter {
    fn default() -> Self {
        Self::new(Arc::new(KeyTables::default()))
    }
}

impl KeyEmitter {
    pub fn new(tables: Arc<KeyTables>) -> Self {
        Self::with_policy(tables, FailurePolicy::default())
    }

    pub fn with_policy(tables: Arc<KeyTables>, policy: FailurePolicy) -> Self {
        Self {
            tables,
            sink: Sink::new(policy),
        }
    }

    pub fn tables(&self) -> &KeyTables {
        &self.tables
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Register a handler; handlers are offered keys in registration order.
    pub fn subscribe(&mut self, handler: impl KeyHandler + 'static) {
        self.sink.subscribe(handler);
    }

    pub fn subscribe_boxed(&mut self, handler: Box<dyn KeyHandler>) {
        self.sink.subscribe_boxed(handler);
    }

    /// Route any host event to its phase handler
    pub fn dispatch(&mut self, event: &HostEvent) -> Outcome {
        match event {
            HostEvent::CompositionEnd(commit) => self.composition_end(commit),
            HostEvent::KeyPress(raw) => self.keypress(raw),
            HostEvent::KeyDown(raw) => self.keydown(raw),
        }
    }

    /// IME commit: one unmodified key per committed character.
    ///
    /// Claims never cancel anything here, the composition is already over.
    pub fn composition_end(&mut self, event: &CompositionEvent) -> Outcome {
        if event.data.is_empty() {
            return Outcome::silent(Phase::CompositionEnd, Disposition::EmptyCommit);
        }

        let mut outcome = Outcome::silent(Phase::CompositionEnd, Disposition::Emitted);
        for key in split_commit(&event.data) {
            let verdict = self.sink.emit(&key);
            outcome.failures += verdict.failures;
            outcome.emissions.push(Emission {
                key,
                claimed: verdict.claimed,
            });
        }
        log::trace!(
            "composition '{}' -> {} key(s)",
            event.data,
            outcome.emissions.len()
        );
        outcome
    }

    /// Keypress: unmodified keys and shifted symbols.
    ///
    /// The host default always runs; only keydown can suppress.
    pub fn keypress(&mut self, event: &RawKeyEvent) -> Outcome {
        let Some(key) = resolve_keypress(&self.tables, event) else {
            log::trace!("keypress {} deferred to keydown", event.key_code.code());
            return Outcome::silent(Phase::KeyPress, Disposition::Deferred);
        };
        let verdict = self.sink.emit(&key);
        let mut outcome = Outcome::silent(Phase::KeyPress, Disposition::Emitted);
        outcome.failures = verdict.failures;
        outcome.emissions.push(Emission {
            key,
            claimed: verdict.claimed,
        });
        outcome
    }

    /// Keydown: the canonical path for control keys and modified keys.
    pub fn keydown(&mut self, event: &RawKeyEvent) -> Outcome {
        let key = match resolve_keydown(&self.tables, event) {
            KeyDownResolution::ImeInProgress => {
                return Outcome::silent(Phase::KeyDown, Disposition::ImeInProgress)
            }
            KeyDownResolution::BareModifier => {
                return Outcome::silent(Phase::KeyDown, Disposition::BareModifier)
            }
            KeyDownResolution::NativeInput => {
                log::trace!("keydown {} left to native input", event.key_code.code());
                return Outcome::silent(Phase::KeyDown, Disposition::NativeInput);
            }
            KeyDownResolution::Key(key) => key,
        };

        let verdict = self.sink.emit(&key);
        log::debug!(
            "keydown {} -> '{}' (claimed={})",
            event.key_code.code(),
            key,
            verdict.claimed
        );

        let mut outcome = Outcome::silent(Phase::KeyDown, Disposition::Emitted);
        outcome.failures = verdict.failures;
        if verdict.claimed {
            outcome.default_action = DefaultAction::Suppress;
        }
        outcome.emissions.push(Emission {
            key,
            claimed: verdict.claimed,
        });
        outcome
    }
}
