// ABOUTME: Floating IP operations trait for cloud providers.
// ABOUTME: List, create-bound-to-instance, and reassign returning an action handle.

use async_trait::async_trait;
use std::net::IpAddr;

use super::shared_types::{ActionRecord, FloatingIpRecord};
use crate::provider::ProviderError;
use crate::types::InstanceId;

/// Floating IP operations.
#[async_trait]
pub trait FloatingIpOps: Send + Sync {
    /// List every floating IP the account owns, assigned or not.
    async fn list_floating_ips(&self) -> Result<Vec<FloatingIpRecord>, ProviderError>;

    /// Create a new floating IP bound to the given instance.
    async fn create_floating_ip(
        &self,
        instance: InstanceId,
    ) -> Result<FloatingIpRecord, ProviderError>;

    /// Request reassignment of an existing floating IP to another
    /// instance. The provider performs this asynchronously; the returned
    /// action handle must be polled for completion.
    async fn reassign_floating_ip(
        &self,
        ip: IpAddr,
        instance: InstanceId,
    ) -> Result<ActionRecord, ProviderError>;
}
