// Keyemit CLI
// Replays recorded host events through the emitter and inspects the tables

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use keyemit_core::{
    resolve_keydown, resolve_keypress, ClaimSet, FailurePolicy, KeyDownResolution, KeyEmitter,
    KeyTables, ModifierState, Outcome, RawKeyEvent, Script, Settings,
};

/// Keyboard event normalizer
#[derive(Parser, Debug)]
#[command(name = "keyemit")]
#[command(version)]
#[command(about = "Normalize host keyboard events into canonical key names", long_about = None)]
struct Args {
    /// Settings file (defaults to ~/.config/keyemit/settings.toml)
    #[arg(short, long, value_name = "SETTINGS", global = true)]
    settings: Option<PathBuf>,

    /// Treat keyCode 173 as the hyphen key
    #[arg(long, global = true)]
    alternate_hyphen: bool,

    /// Override the handler failure policy (allow or suppress)
    #[arg(long, value_name = "POLICY", global = true)]
    on_failure: Option<FailurePolicy>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a replay script through the emitter and print each outcome
    Replay {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
    /// Validate a replay script and exit
    Check {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
    /// Print the normalization tables
    Tables,
    /// Resolve a single keydown given on the command line
    Resolve {
        /// Legacy numeric key code
        #[arg(long)]
        code: u16,
        /// Physical key identifier, e.g. Digit1
        #[arg(long, default_value = "")]
        physical: String,
        /// Host-reported key string
        #[arg(long, default_value = "")]
        key: String,
        #[arg(long)]
        shift: bool,
        #[arg(long)]
        ctrl: bool,
        #[arg(long)]
        alt: bool,
        #[arg(long)]
        meta: bool,
    },
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("failed to load default settings")?,
    };
    if args.alternate_hyphen {
        settings.set_alternate_hyphen_code(true);
    }
    Ok(settings)
}

fn build_tables(settings: &Settings) -> anyhow::Result<KeyTables> {
    KeyTables::with_options(settings.table_options()).context("inconsistent key tables")
}

fn load_script(path: &Path) -> anyhow::Result<Script> {
    Script::from_toml_path(path).with_context(|| format!("invalid script {}", path.display()))
}

fn describe(outcome: &Outcome) -> String {
    let keys: Vec<String> = outcome
        .emissions
        .iter()
        .map(|e| {
            if e.claimed {
                format!("{} (claimed)", e.key)
            } else {
                e.key.to_string()
            }
        })
        .collect();
    let mut line = format!(
        "{:<15} {:<14} {:<8} {}",
        outcome.phase.as_str(),
        outcome.disposition.to_string(),
        outcome.default_action.to_string(),
        keys.join(", ")
    );
    if outcome.failures > 0 {
        line.push_str(&format!("  [{} handler failure(s)]", outcome.failures));
    }
    line
}

fn replay(args: &Args, settings: &Settings, path: &Path) -> anyhow::Result<()> {
    let script = load_script(path)?;
    let policy = args.on_failure.unwrap_or(settings.failure_policy());
    let mut emitter = KeyEmitter::with_policy(Arc::new(build_tables(settings)?), policy);

    let claims = settings.claims().iter().chain(script.claims.iter()).cloned();
    emitter.subscribe(ClaimSet::new(claims));

    for (index, event) in script.events.iter().enumerate() {
        let outcome = emitter.dispatch(event);
        println!("{:>4}  {}", index + 1, describe(&outcome));
    }
    Ok(())
}

fn check(path: &Path) -> anyhow::Result<()> {
    let script = load_script(path)?;
    println!(
        "Script is valid: {} event(s), {} claim(s)",
        script.events.len(),
        script.claims.len()
    );
    Ok(())
}

fn print_tables(tables: &KeyTables) {
    println!("Shift map ({} entries):", tables.shift_map().len());
    for (base, shifted) in tables.shift_map().iter() {
        println!("  {:<6} -> {}", base, shifted);
    }

    println!("Special codes ({} entries):", tables.special_codes().len());
    for (code, name) in tables.special_codes().iter() {
        println!("  {:>4} -> {}", code.code(), name);
    }

    let codes = |set: &keyemit_core::mapping::CodeSet| {
        set.iter()
            .map(|c| c.code().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    println!("Bare modifier codes: {}", codes(tables.ignored_codes()));
    println!("Non-character codes: {}", codes(tables.non_character_codes()));

    let physical: Vec<&str> = tables.shifted_physical_codes().collect();
    println!("Shifted physical codes: {}", physical.join(" "));
    println!("IME sentinel: {}", tables.ime_sentinel().code());
}

fn resolve(tables: &KeyTables, event: &RawKeyEvent) {
    match resolve_keydown(tables, event) {
        KeyDownResolution::ImeInProgress => println!("keydown:  ime composition in progress"),
        KeyDownResolution::BareModifier => println!("keydown:  bare modifier, nothing emitted"),
        KeyDownResolution::NativeInput => println!("keydown:  native input, left to keypress"),
        KeyDownResolution::Key(key) => println!("keydown:  {}", key),
    }
    match resolve_keypress(tables, event) {
        Some(key) => println!("keypress: {}", key),
        None => println!("keypress: nothing emitted"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let settings = load_settings(&args)?;
    log::debug!(
        "settings from {}, policy {}",
        settings
            .source_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string()),
        settings.failure_policy()
    );

    match &args.command {
        Command::Replay { script } => replay(&args, &settings, script),
        Command::Check { script } => check(script),
        Command::Tables => {
            print_tables(&build_tables(&settings)?);
            Ok(())
        }
        Command::Resolve {
            code,
            physical,
            key,
            shift,
            ctrl,
            alt,
            meta,
        } => {
            let event = RawKeyEvent::new(*code, physical, key).with_modifiers(ModifierState {
                shift: *shift,
                ctrl: *ctrl,
                alt: *alt,
                meta: *meta,
            });
            resolve(&build_tables(&settings)?, &event);
            Ok(())
        }
    }
}
