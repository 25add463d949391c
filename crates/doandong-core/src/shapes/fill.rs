//! Fill colours.

use crate::error::CanvasError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted CSS colour keyword.
const MAX_KEYWORD_LEN: usize = 32;

/// A CSS fill colour, kept verbatim as entered.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and alphabetic colour
/// keywords such as `lightblue` or `transparent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fill(String);

impl Fill {
    /// Validate and wrap a colour string.
    pub fn parse(input: &str) -> Result<Self, CanvasError> {
        let value = input.trim();
        if is_hex_color(value) || is_keyword(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(CanvasError::InvalidFill(input.to_string()))
        }
    }

    /// Wrap a colour constant known to be valid.
    pub(crate) fn named(value: &'static str) -> Self {
        debug_assert!(is_hex_color(value) || is_keyword(value));
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

fn is_keyword(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_KEYWORD_LEN
        && value.chars().all(|c| c.is_ascii_alphabetic())
}

impl TryFrom<String> for Fill {
    type Error = CanvasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Fill::parse(&value)
    }
}

impl From<Fill> for String {
    fn from(fill: Fill) -> Self {
        fill.0
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
