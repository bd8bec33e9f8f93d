// ABOUTME: Provider error taxonomy shared by all capability traits.
// ABOUTME: NotFound is the only variant repositories translate to None.

use thiserror::Error;

/// Errors from provider operations.
///
/// `NotFound` is special: repository-style callers translate it into an
/// absent result and never raise it past that boundary. Every other
/// variant propagates unchanged to the CLI surface.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("resource not found")]
    NotFound,

    #[error("provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("response decode error: {0}")]
    Decode(String),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}
