// Keyemit Config API - Canonical Key Parser
// Parses canonical key strings like "ctrl+meta+k" into structured components

use std::str::FromStr;

use smallvec::SmallVec;

use crate::combo::Combo;
use crate::modifier::Modifier;

/// Errors that can occur during canonical key parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    /// Empty input string
    #[error("canonical key cannot be empty")]
    EmptyInput,
    /// Input is only modifier prefixes (e.g., "ctrl+")
    #[error("canonical key '{0}' has no base key")]
    MissingBase(String),
    /// A modifier prefix appears twice
    #[error("modifier '{0}' repeated")]
    DuplicateModifier(Modifier),
    /// Prefixes are not in shift, alt, ctrl, meta order
    #[error("modifier '{later}' must come before '{earlier}'")]
    OutOfOrder { earlier: Modifier, later: Modifier },
}

/// Parse a canonical key string into modifiers and base key.
///
/// Leading `<modifier>+` prefixes are stripped as long as something remains,
/// so `ctrl++` parses as ctrl on the base key `+`. The prefixes must follow
/// the canonical order without repeats.
///
/// # Examples
/// ```
/// use keyemit_core::config::parse_canonical_key;
/// use keyemit_core::Modifier;
/// let combo = parse_canonical_key("ctrl+meta+k").unwrap();
/// assert_eq!(combo.modifiers(), &[Modifier::Ctrl, Modifier::Meta]);
/// assert_eq!(combo.base(), "k");
/// ```
pub fn parse_canonical_key(exp: &str) -> Result<Combo, KeyParseError> {
    if exp.is_empty() {
        return Err(KeyParseError::EmptyInput);
    }

    let mut rest = exp;
    let mut modifiers: SmallVec<[Modifier; 4]> = SmallVec::new();

    while let Some((head, tail)) = rest.split_once('+') {
        let Ok(modifier) = Modifier::from_str(head) else {
            break;
        };
        if tail.is_empty() {
            return Err(KeyParseError::MissingBase(exp.to_string()));
        }
        if modifiers.contains(&modifier) {
            return Err(KeyParseError::DuplicateModifier(modifier));
        }
        if let Some(&last) = modifiers.last() {
            if last > modifier {
                return Err(KeyParseError::OutOfOrder {
                    earlier: last,
                    later: modifier,
                });
            }
        }
        modifiers.push(modifier);
        rest = tail;
    }

    Ok(Combo::new(modifiers, rest))
}

impl FromStr for Combo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_canonical_key(s)
    }
}
