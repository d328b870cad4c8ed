// Keyemit Replay Script Tests
//
// Feeds parsed replay scripts through an emitter.
//
// Run with: cargo test --features settings-file --test replay_test

#[cfg(feature = "settings-file")]
mod tests {
    use keyemit_core::{
        ClaimSet, DefaultAction, Disposition, KeyEmitter, KeyRecorder, Script, Settings,
    };
    use std::sync::Arc;

    const SCRIPT: &str = r#"
claim = ["shift+tab", "ctrl+k"]

[[event]]
phase = "keydown"
key_code = 72
code = "KeyH"
key = "h"

[[event]]
phase = "keypress"
key_code = 104
code = "KeyH"
key = "h"

[[event]]
phase = "keydown"
key_code = 16
code = "ShiftLeft"
key = "Shift"
shift = true

[[event]]
phase = "keydown"
key_code = 9
code = "Tab"
key = "Tab"
shift = true

[[event]]
phase = "keydown"
key_code = 75
code = "KeyK"
key = "k"
ctrl = true

[[event]]
phase = "keydown"
key_code = 229

[[event]]
phase = "composition_end"
data = "你好"
"#;

    fn run(script: &Script, emitter: &mut KeyEmitter) -> Vec<(Disposition, DefaultAction)> {
        script
            .events
            .iter()
            .map(|event| {
                let outcome = emitter.dispatch(event);
                (outcome.disposition, outcome.default_action)
            })
            .collect()
    }

    #[test]
    fn test_replay_script() {
        let script = Script::from_toml_str(SCRIPT).unwrap();
        let mut emitter = KeyEmitter::default();
        let recorder = KeyRecorder::new();
        emitter.subscribe(recorder.clone());
        emitter.subscribe(ClaimSet::new(script.claims.clone()));

        let results = run(&script, &mut emitter);
        assert_eq!(
            results,
            vec![
                (Disposition::NativeInput, DefaultAction::Allow),
                (Disposition::Emitted, DefaultAction::Allow),
                (Disposition::BareModifier, DefaultAction::Allow),
                (Disposition::Emitted, DefaultAction::Suppress),
                (Disposition::Emitted, DefaultAction::Suppress),
                (Disposition::ImeInProgress, DefaultAction::Allow),
                (Disposition::Emitted, DefaultAction::Allow),
            ]
        );

        let keys: Vec<String> = recorder.keys().into_iter().map(|k| k.into_string()).collect();
        assert_eq!(keys, vec!["h", "shift+tab", "ctrl+k", "你", "好"]);
    }

    #[test]
    fn test_settings_drive_tables_and_claims() {
        let settings = Settings::from_toml(
            r#"
[host]
alternate_hyphen_code = true

[claims]
keys = ["ctrl+-"]
"#,
        )
        .unwrap();

        let tables = keyemit_core::KeyTables::with_options(settings.table_options()).unwrap();
        let mut emitter = KeyEmitter::with_policy(Arc::new(tables), settings.failure_policy());
        emitter.subscribe(ClaimSet::new(settings.claims().iter().cloned()));

        let script = Script::from_toml_str(
            r#"
[[event]]
phase = "keydown"
key_code = 173
code = "Minus"
key = "-"
ctrl = true
"#,
        )
        .unwrap();

        let results = run(&script, &mut emitter);
        assert_eq!(results, vec![(Disposition::Emitted, DefaultAction::Suppress)]);
    }
}
