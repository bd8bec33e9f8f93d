// ABOUTME: Machine-image identifier parsing and validation.
// ABOUTME: Handles numeric image ids and provider slugs like ubuntu-24-04-x64.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseImageIdError {
    #[error("image identifier cannot be empty")]
    Empty,

    #[error("invalid character in image identifier: {0}")]
    InvalidChar(char),
}

/// A machine-image identifier: either a numeric provider id or a slug.
///
/// Both forms participate in the composite fleet tag, so the textual
/// representation is what matters; the numeric form is kept around for
/// provider calls that want it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    pub fn parse(input: &str) -> Result<Self, ParseImageIdError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageIdError::Empty);
        }

        for c in input.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '.' && c != '_' {
                return Err(ParseImageIdError::InvalidChar(c));
            }
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form, when the identifier is a raw provider id.
    pub fn as_numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
