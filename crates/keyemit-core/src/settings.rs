// Keyemit Settings Module
// Host quirks, handler failure policy and demo claims loaded from TOML

#![cfg(feature = "settings-file")]

use std::path::{Path, PathBuf};

use crate::config::parse_canonical_key;
use crate::key::{codes, CanonicalKey, KeyCode};
use crate::mapping::{HostQuirks, TableOptions};
use crate::output::FailurePolicy;

/// Settings that shape table construction and emission
///
/// These settings are loaded from a TOML file
/// (default: ~/.config/keyemit/settings.toml).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Host-specific table corrections
    quirks: HostQuirks,

    /// Keydown code reported during IME composition
    ime_sentinel: KeyCode,

    /// How failing handlers count towards suppression
    failure_policy: FailurePolicy,

    /// Keys claimed by the stock claim handler
    claims: Vec<CanonicalKey>,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    host: Option<HostSettings>,

    #[serde(default)]
    handlers: Option<HandlerSettings>,

    #[serde(default)]
    claims: Option<ClaimSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct HostSettings {
    #[serde(default)]
    alternate_hyphen_code: Option<toml::Value>,
    #[serde(default)]
    ime_sentinel: Option<u16>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct HandlerSettings {
    #[serde(default)]
    failure_policy: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ClaimSettings {
    #[serde(default)]
    keys: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create settings with every default
    pub fn new() -> Self {
        Self {
            quirks: HostQuirks::default(),
            ime_sentinel: codes::IME_PROCESS,
            failure_policy: FailurePolicy::default(),
            claims: Vec::new(),
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(host) = toml_settings.host {
            if let Some(value) = host.alternate_hyphen_code {
                settings.quirks.alternate_hyphen_code = parse_bool_value(&value)?;
            }
            if let Some(code) = host.ime_sentinel {
                settings.ime_sentinel = KeyCode(code);
            }
        }

        if let Some(handlers) = toml_settings.handlers {
            if let Some(policy) = handlers.failure_policy {
                settings.failure_policy = policy
                    .parse()
                    .map_err(SettingsError::InvalidValue)?;
            }
        }

        if let Some(claims) = toml_settings.claims {
            for key in claims.keys {
                let combo = parse_canonical_key(&key)
                    .map_err(|e| SettingsError::InvalidValue(format!("claim '{}': {}", key, e)))?;
                settings.claims.push(combo.to_canonical());
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keyemit").join("settings.toml"))
    }

    /// Load from default location (~/.config/keyemit/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn quirks(&self) -> HostQuirks {
        self.quirks
    }

    pub fn set_alternate_hyphen_code(&mut self, enabled: bool) {
        self.quirks.alternate_hyphen_code = enabled;
    }

    pub fn ime_sentinel(&self) -> KeyCode {
        self.ime_sentinel
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn claims(&self) -> &[CanonicalKey] {
        &self.claims
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Options for building key tables
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            quirks: self.quirks,
            ime_sentinel: self.ime_sentinel,
        }
    }
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, SettingsError> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(SettingsError::InvalidValue(format!(
                "Cannot convert '{}' to boolean",
                s
            ))),
        },
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to boolean",
            value
        ))),
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Keyemit Settings
# Place this file at: ~/.config/keyemit/settings.toml

[host]
# Set when the host reports the hyphen key as code 173 (Firefox does)
alternate_hyphen_code = false
# Keydown code reported while an IME composition is in progress
ime_sentinel = 229

[handlers]
# What a failing handler means for the host default action: "allow" or "suppress"
failure_policy = "allow"

[claims]
# Keys claimed by the stock claim handler (their host default is suppressed)
keys = ["ctrl+k", "shift+tab"]
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::new();
        assert!(!settings.quirks().alternate_hyphen_code);
        assert_eq!(settings.ime_sentinel(), codes::IME_PROCESS);
        assert_eq!(settings.failure_policy(), FailurePolicy::Allow);
        assert!(settings.claims().is_empty());
    }

    #[test]
    fn test_settings_from_toml() {
        let toml = r#"
[host]
alternate_hyphen_code = true
ime_sentinel = 230

[handlers]
failure_policy = "suppress"

[claims]
keys = ["ctrl+k", "shift+tab"]
"#;

        let settings = Settings::from_toml(toml).unwrap();
        assert!(settings.quirks().alternate_hyphen_code);
        assert_eq!(settings.ime_sentinel(), KeyCode(230));
        assert_eq!(settings.failure_policy(), FailurePolicy::Suppress);
        assert_eq!(
            settings.claims(),
            &[CanonicalKey::from("ctrl+k"), CanonicalKey::from("shift+tab")]
        );
    }

    #[test]
    fn test_settings_with_string_booleans() {
        let settings = Settings::from_toml("[host]\nalternate_hyphen_code = \"yes\"\n").unwrap();
        assert!(settings.quirks().alternate_hyphen_code);
        let settings = Settings::from_toml("[host]\nalternate_hyphen_code = 0\n").unwrap();
        assert!(!settings.quirks().alternate_hyphen_code);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_toml("[handlers]\nfailure_policy = \"sometimes\"\n"),
            Err(SettingsError::InvalidValue(_))
        ));
        assert!(matches!(
            Settings::from_toml("[claims]\nkeys = [\"meta+ctrl+k\"]\n"),
            Err(SettingsError::InvalidValue(_))
        ));
        assert!(matches!(
            Settings::from_toml("[host]\nunknown = 1\n"),
            Err(SettingsError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_content_parses() {
        let settings = Settings::from_toml(default_settings_content()).unwrap();
        assert_eq!(settings.claims().len(), 2);
        assert_eq!(settings.table_options().ime_sentinel, codes::IME_PROCESS);
    }

    #[test]
    fn test_default_path_under_config_dir() {
        if let Some(path) = Settings::default_path() {
            assert!(path.ends_with("keyemit/settings.toml"));
        }
    }
}
