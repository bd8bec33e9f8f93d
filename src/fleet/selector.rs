// ABOUTME: Fleet membership queries and canonical/expired/destroyable selection.
// ABOUTME: Built on the provider instance listing and the filter engine.

use std::net::IpAddr;

use crate::provider::{InstanceOps, ProviderError};
use crate::types::{FleetName, FleetTag, ImageId};

use super::{Filter, Instance, InstanceCollection};

/// State-map key the state collaborator sets when an instance has
/// drained its work and is safe to remove.
pub const IDLE_KEY: &str = "idle";

/// Answers "which instances belong to this fleet" and "which one is
/// canonical".
pub struct Selector<'a, P: ?Sized> {
    provider: &'a P,
}

impl<'a, P: InstanceOps + ?Sized> Selector<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// All instances carrying the tag, in provider-returned order.
    pub async fn list_fleet(&self, tag: &FleetTag) -> Result<InstanceCollection, ProviderError> {
        let records = self.provider.list_by_tag(tag).await?;
        Ok(InstanceCollection::from_records(records))
    }

    /// The current instance for the fleet/image pair: the member of the
    /// composite identity tag with the most recent creation time.
    ///
    /// Equal creation timestamps keep the instance listed first by the
    /// provider ("later wins" leaves the current winner on ties).
    pub async fn canonical_instance(
        &self,
        fleet: &FleetName,
        image: &ImageId,
    ) -> Result<Option<Instance>, ProviderError> {
        let tag = FleetTag::identity(fleet, image);
        let members = self.list_fleet(&tag).await?;
        Ok(members.newest().cloned())
    }

    /// Fleet members created strictly before the reference instance,
    /// in source-listing order: the candidates a completed rollover has
    /// left behind.
    ///
    /// A fleet with at most one member never expires anything, and the
    /// caller must supply the reference from a live assigned-IP lookup:
    /// no witness that the rollover happened means no expiry.
    pub async fn expired_instances(
        &self,
        tag: &FleetTag,
        reference: &Instance,
    ) -> Result<Vec<Instance>, ProviderError> {
        let members = self.list_fleet(tag).await?;
        if members.len() <= 1 {
            return Ok(Vec::new());
        }

        Ok(members
            .iter()
            .filter(|instance| instance.created_at < reference.created_at)
            .cloned()
            .collect())
    }
}

/// Fleet members that are idle and not currently serving the excluded
/// address. Pure: operates on an already-enriched collection.
pub fn destroyable_instances(fleet: &InstanceCollection, excluded_ip: IpAddr) -> Vec<Instance> {
    fleet
        .filtered(&Filter::include(IDLE_KEY, true))
        .filtered(&Filter::exclude("ips", excluded_ip.to_string()))
        .to_vec()
}
