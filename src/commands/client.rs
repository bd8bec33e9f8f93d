// ABOUTME: Provider client construction shared by command handlers.
// ABOUTME: Resolves the API token and builds the reqwest-backed client.

use flotilla::config::Config;
use flotilla::error::Result;
use flotilla::provider::ApiClient;

/// Build a provider client from configuration, resolving the token.
pub fn connect(config: &Config) -> Result<ApiClient> {
    let token = config.provider.token.resolve()?;
    let client = ApiClient::new(&config.provider.endpoint, token)?;
    Ok(client)
}
