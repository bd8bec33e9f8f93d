// ABOUTME: Provider abstraction: capability traits plus the HTTP client.
// ABOUTME: Everything above this module speaks traits, never reqwest.

mod error;
pub mod http;
mod traits;

pub use error::ProviderError;
pub use traits::*;

pub use http::ApiClient;
