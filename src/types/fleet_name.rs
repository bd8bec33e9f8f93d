// ABOUTME: Validated fleet identifier.
// ABOUTME: Ensures fleet names are usable as provider tags (RFC 1123 labels).

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetNameError {
    #[error("fleet name cannot be empty")]
    Empty,

    #[error("fleet name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("fleet name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("fleet name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("fleet name must be lowercase")]
    NotLowercase,

    #[error("invalid character in fleet name: '{0}'")]
    InvalidChar(char),
}

/// A fleet's logical name. Doubles as the provider tag all fleet members
/// carry, so the character set is restricted to what tags accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FleetName(String);

impl FleetName {
    pub fn new(value: &str) -> Result<Self, FleetNameError> {
        if value.is_empty() {
            return Err(FleetNameError::Empty);
        }

        if value.len() > 63 {
            return Err(FleetNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(FleetNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(FleetNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(FleetNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(FleetNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FleetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
