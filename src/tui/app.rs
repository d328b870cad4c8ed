use std::sync::Arc;

use anyhow::Context;
use keyemit_core::{
    CanonicalKey, ClaimSet, DefaultAction, Disposition, Emission, KeyEmitter, KeyRecorder,
    KeyTables, Outcome, Phase, Settings,
};

const MAX_OUTPUT_LINES: usize = 800;

pub const QUIT_KEY: &str = "ctrl+c";
pub const CLEAR_KEY: &str = "ctrl+l";
pub const QUIRK_KEY: &str = "ctrl+t";

/// Keys the explorer itself claims, on top of the configured claims
pub const CONTROL_KEYS: [&str; 3] = [QUIT_KEY, CLEAR_KEY, QUIRK_KEY];

/// One dispatched host event as shown in the log
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub phase: Phase,
    pub disposition: Disposition,
    pub default_action: DefaultAction,
    pub emissions: Vec<Emission>,
    pub failures: usize,
}

impl LogEntry {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        Self {
            phase: outcome.phase,
            disposition: outcome.disposition,
            default_action: outcome.default_action,
            emissions: outcome.emissions.to_vec(),
            failures: outcome.failures,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.emissions.is_empty()
    }

    /// Keys as displayed; claimed keys carry a trailing `*`
    pub fn keys_text(&self) -> String {
        let keys: Vec<String> = self
            .emissions
            .iter()
            .map(|e| {
                // Quote whitespace keys so they stay visible
                let name = if e.key.trim().is_empty() {
                    format!("{:?}", e.key.as_str())
                } else {
                    e.key.to_string()
                };
                if e.claimed {
                    format!("{}*", name)
                } else {
                    name
                }
            })
            .collect();
        keys.join(" ")
    }

    pub fn line(&self) -> String {
        let mut line = format!(
            "{:<15} {:<14} {:<8} {}",
            self.phase.as_str(),
            self.disposition.to_string(),
            self.default_action.to_string(),
            self.keys_text()
        );
        if self.failures > 0 {
            line.push_str(&format!("  ({} handler failure(s))", self.failures));
        }
        line
    }
}

pub struct App {
    pub emitter: KeyEmitter,
    pub recorder: KeyRecorder,
    pub settings: Settings,
    pub status: String,
    pub output: Vec<LogEntry>,
    pub failures: usize,
    pub emitted: usize,
    pub suppressed: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let (emitter, recorder) = build_emitter(&settings)?;

        Ok(Self {
            emitter,
            recorder,
            settings,
            status: "Ready".to_string(),
            output: vec![],
            emitted: 0,
            suppressed: 0,
            failures: 0,
            should_quit: false,
        })
    }

    pub fn tables(&self) -> &KeyTables {
        self.emitter.tables()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn push_output(&mut self, entry: LogEntry) {
        self.output.push(entry);
        if self.output.len() > MAX_OUTPUT_LINES {
            let excess = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(0..excess);
        }
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
        self.emitted = 0;
        self.suppressed = 0;
        self.failures = 0;
        self.set_status("Log cleared");
    }

    /// Log one dispatch result
    pub fn record(&mut self, outcome: &Outcome) {
        self.emitted += outcome.emissions.len();
        self.failures += outcome.failures;
        if outcome.should_suppress() {
            self.suppressed += 1;
        }
        if outcome.failures > 0 {
            self.set_status(format!("{} handler failure(s)", outcome.failures));
        }
        self.push_output(LogEntry::from_outcome(outcome));
    }

    pub fn hyphen_quirk(&self) -> bool {
        self.settings.quirks().alternate_hyphen_code
    }

    /// Flip the alternate hyphen code and rebuild the emitter around it
    pub fn toggle_hyphen_quirk(&mut self) {
        let enabled = !self.hyphen_quirk();
        self.settings.set_alternate_hyphen_code(enabled);
        match build_emitter(&self.settings) {
            Ok((emitter, recorder)) => {
                self.emitter = emitter;
                self.recorder = recorder;
                self.set_status(format!(
                    "Alternate hyphen code {}",
                    if enabled { "on" } else { "off" }
                ));
            }
            Err(e) => {
                self.settings.set_alternate_hyphen_code(!enabled);
                self.set_status(format!("Error: {:#}", e));
            }
        }
    }

    pub fn claims(&self) -> &[CanonicalKey] {
        self.settings.claims()
    }
}

fn build_emitter(settings: &Settings) -> anyhow::Result<(KeyEmitter, KeyRecorder)> {
    let tables = KeyTables::with_options(settings.table_options())
        .context("settings produce inconsistent key tables")?;
    let mut emitter = KeyEmitter::with_policy(Arc::new(tables), settings.failure_policy());

    let recorder = KeyRecorder::new();
    emitter.subscribe(recorder.clone());

    let mut claims = ClaimSet::new(settings.claims().iter().cloned());
    for key in CONTROL_KEYS {
        claims.insert(CanonicalKey::from(key));
    }
    emitter.subscribe(claims);

    Ok((emitter, recorder))
}
