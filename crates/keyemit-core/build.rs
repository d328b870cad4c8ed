use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// A named legacy key code: constant name, numeric value, extra lookup aliases.
struct NamedCode {
    name: String,
    code: u16,
    aliases: &'static [&'static str],
    doc: Option<&'static str>,
}

impl NamedCode {
    fn new(name: &str, code: u16) -> Self {
        Self {
            name: name.to_string(),
            code,
            aliases: &[],
            doc: None,
        }
    }

    fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn doc(mut self, doc: &'static str) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// The DOM `KeyboardEvent.keyCode` values the normalizer refers to by name
fn named_codes() -> Vec<NamedCode> {
    let mut named = vec![
        NamedCode::new("BACKSPACE", 8),
        NamedCode::new("TAB", 9),
        NamedCode::new("ENTER", 13).aliases(&["RETURN"]),
        NamedCode::new("SHIFT", 16),
        NamedCode::new("CTRL", 17).aliases(&["CONTROL"]),
        NamedCode::new("ALT", 18),
        NamedCode::new("CAPS_LOCK", 20).aliases(&["CAPSLOCK"]),
        NamedCode::new("ESCAPE", 27).aliases(&["ESC"]),
        NamedCode::new("SPACE", 32),
        NamedCode::new("PAGE_UP", 33),
        NamedCode::new("PAGE_DOWN", 34),
        NamedCode::new("END", 35),
        NamedCode::new("HOME", 36),
        NamedCode::new("LEFT", 37),
        NamedCode::new("UP", 38),
        NamedCode::new("RIGHT", 39),
        NamedCode::new("DOWN", 40),
        NamedCode::new("INSERT", 45),
        NamedCode::new("DELETE", 46),
    ];

    for digit in 0..10u16 {
        named.push(NamedCode::new(&format!("DIGIT_{}", digit), 48 + digit));
    }
    for offset in 0..26u16 {
        let letter = char::from(b'A' + offset as u8);
        named.push(NamedCode::new(&format!("KEY_{}", letter), 65 + offset));
    }

    named.extend([
        NamedCode::new("LEFT_META", 91),
        NamedCode::new("RIGHT_META", 93),
        NamedCode::new("ALTERNATE_HYPHEN", 173).doc("Hyphen as reported by Firefox"),
        NamedCode::new("SEMICOLON", 186),
        NamedCode::new("EQUAL", 187),
        NamedCode::new("COMMA", 188),
        NamedCode::new("MINUS", 189),
        NamedCode::new("PERIOD", 190),
        NamedCode::new("SLASH", 191),
        NamedCode::new("BACKQUOTE", 192),
        NamedCode::new("BRACKET_LEFT", 219),
        NamedCode::new("BACKSLASH", 220),
        NamedCode::new("BRACKET_RIGHT", 221),
        NamedCode::new("QUOTE", 222),
        NamedCode::new("IME_PROCESS", 229)
            .doc("Reported by hosts while an IME composition is in progress"),
    ]);
    named
}

/// Display name: digits and letters show as the character they type
fn display_name(named: &NamedCode) -> &str {
    named
        .name
        .strip_prefix("DIGIT_")
        .or_else(|| named.name.strip_prefix("KEY_"))
        .unwrap_or(&named.name)
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("key_codes.rs");
    let named = named_codes();
    let mut out = String::new();

    // The KeyCode newtype wrapper
    out.push_str(
        r#"
/// Represents a legacy numeric key code as reported by the host.
///
/// The numeric values match the DOM `KeyboardEvent.keyCode` values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub fn code(self) -> u16 {
        self.0
    }

    pub fn name(self) -> &'static str {
        code_name(self.0)
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        KeyCode(code)
    }
}

impl From<KeyCode> for u16 {
    fn from(code: KeyCode) -> Self {
        code.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCode {
    type Err = String;

    /// Accepts a number or a code name such as `tab`, `esc` or `a`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(raw) = s.parse::<u16>() {
            return Ok(KeyCode(raw));
        }
        code_from_name(s).ok_or_else(|| format!("Unknown key code: {}", s))
    }
}
"#,
    );

    // Named constants
    out.push_str("\n/// Named legacy key codes referenced by the normalization tables.\npub mod codes {\n    use super::KeyCode;\n\n");
    for n in &named {
        if let Some(doc) = n.doc {
            writeln!(out, "    /// {}", doc).unwrap();
        }
        writeln!(out, "    pub const {}: KeyCode = KeyCode({});", n.name, n.code).unwrap();
    }
    out.push_str("}\n");

    // code -> display name
    out.push_str("\n/// Display name for a legacy key code\npub fn code_name(code: u16) -> &'static str {\n    match code {\n");
    for n in &named {
        writeln!(out, "        {} => \"{}\",", n.code, display_name(n)).unwrap();
    }
    out.push_str("        _ => \"UNKNOWN\",\n    }\n}\n");

    // name -> code, case-insensitive, with aliases
    out.push_str("\n/// Try to parse a code name to a legacy key code\npub fn code_from_name(name: &str) -> Option<KeyCode> {\n    let code = match name.to_uppercase().as_str() {\n");
    for n in &named {
        let mut patterns = vec![format!("\"{}\"", display_name(n))];
        patterns.extend(n.aliases.iter().map(|a| format!("\"{}\"", a)));
        writeln!(out, "        {} => {},", patterns.join(" | "), n.code).unwrap();
    }
    out.push_str("        _ => return None,\n    };\n    Some(KeyCode(code))\n}\n");

    fs::write(&dest_path, out).unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}
