// ABOUTME: Instance operations trait for cloud providers.
// ABOUTME: List by tag, fetch by id, delete, and fetch the state map.

use async_trait::async_trait;

use super::shared_types::InstanceRecord;
use crate::provider::ProviderError;
use crate::types::{FleetTag, InstanceId, StateMap};

/// Instance query and lifecycle operations.
#[async_trait]
pub trait InstanceOps: Send + Sync {
    /// List all instances carrying the given tag, in provider order.
    async fn list_by_tag(&self, tag: &FleetTag) -> Result<Vec<InstanceRecord>, ProviderError>;

    /// Fetch a single instance. A provider "not found" is a normal
    /// `None`, never an error.
    async fn get_instance(
        &self,
        id: InstanceId,
    ) -> Result<Option<InstanceRecord>, ProviderError>;

    /// Destroy an instance.
    async fn delete_instance(&self, id: InstanceId) -> Result<(), ProviderError>;
}

/// The external health/state collaborator: fetches the free-form state
/// map for one instance.
#[async_trait]
pub trait StateOps: Send + Sync {
    async fn instance_state(&self, id: InstanceId) -> Result<StateMap, ProviderError>;
}
