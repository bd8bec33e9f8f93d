// ABOUTME: Action status polling trait for cloud providers.
// ABOUTME: Fetches the current status of an asynchronous provider-side action.

use async_trait::async_trait;

use super::shared_types::ActionRecord;
use crate::provider::ProviderError;
use crate::types::ActionId;

/// Asynchronous action status lookups.
#[async_trait]
pub trait ActionOps: Send + Sync {
    /// Fetch the current status of an action by id.
    async fn get_action(&self, id: ActionId) -> Result<ActionRecord, ProviderError>;
}
