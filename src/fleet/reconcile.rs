// ABOUTME: Floating IP reconciliation: make the fleet's IP point at the canonical instance.
// ABOUTME: Create, no-op, and reassign paths, each gated by the confirmation engine.

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;

use crate::provider::{
    ActionOps, ActionRecord, FloatingIpOps, InstanceOps, ProviderError,
};
use crate::types::{ActionId, FleetName, FleetTag, ImageId, InstanceId};

use super::confirm::{confirm, ConfirmBudget, ConfirmError, ConfirmHandler};
use super::{Instance, Selector};

/// A floating IP and the fleet instance it currently points at.
/// Built fresh on every lookup, never cached across invocations.
#[derive(Debug, Clone)]
pub struct AssignedIp {
    pub ip: IpAddr,
    pub instance: Instance,
}

/// Successful reconciliation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    /// A new floating IP was created for the target instance.
    Created { ip: IpAddr, target: InstanceId },

    /// The IP already pointed at the target; nothing was mutated.
    AlreadyAssigned { ip: IpAddr, instance: InstanceId },

    /// The IP was moved from the source instance to the target.
    Reassigned {
        ip: IpAddr,
        source: InstanceId,
        target: InstanceId,
    },
}

/// Reconciliation failures, each carrying enough context for an
/// operator to act without re-querying the provider.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The fleet has no current instance. An empty fleet is a valid,
    /// reportable state, not a provider error.
    #[error("fleet has no current instance")]
    NoInstance,

    /// No floating IP is assigned to any fleet member.
    #[error("no floating IP is assigned to the fleet")]
    NoFloatingIp,

    /// The create-only entry point found an existing assignment.
    #[error("fleet already has a floating IP: {ip}")]
    AlreadyHasIp { ip: IpAddr },

    /// The IP was created but never appeared on the target's address
    /// list within the budget.
    #[error("floating IP {ip} did not appear on instance {target} within {}s", timeout.as_secs())]
    CreateTimedOut {
        ip: IpAddr,
        target: InstanceId,
        timeout: Duration,
    },

    /// The reassignment action never reached completed within the
    /// budget; the provider-side action may be stuck.
    #[error("reassigning {ip} from instance {source_instance} to {target} did not complete within {}s", timeout.as_secs())]
    ReassignTimedOut {
        ip: IpAddr,
        source_instance: InstanceId,
        target: InstanceId,
        timeout: Duration,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Confirmation handler for the create path: re-fetch the target
/// instance until the new IP shows up on its address list.
struct AddressVisible<'a, P: ?Sized> {
    provider: &'a P,
    instance: InstanceId,
    ip: IpAddr,
}

#[async_trait]
impl<P: InstanceOps + ?Sized> ConfirmHandler for AddressVisible<'_, P> {
    type Evidence = Option<Instance>;

    async fn probe(&self) -> Result<Self::Evidence, ProviderError> {
        let record = self.provider.get_instance(self.instance).await?;
        Ok(record.and_then(Instance::from_record))
    }

    fn is_done(&self, evidence: &Self::Evidence) -> bool {
        evidence
            .as_ref()
            .is_some_and(|instance| instance.has_address(self.ip))
    }
}

/// Confirmation handler for the reassign path: poll the action until
/// its status is completed.
struct ActionCompleted<'a, P: ?Sized> {
    provider: &'a P,
    action: ActionId,
}

#[async_trait]
impl<P: ActionOps + ?Sized> ConfirmHandler for ActionCompleted<'_, P> {
    type Evidence = ActionRecord;

    async fn probe(&self) -> Result<Self::Evidence, ProviderError> {
        self.provider.get_action(self.action).await
    }

    fn is_done(&self, evidence: &Self::Evidence) -> bool {
        evidence.status.is_completed()
    }
}

/// Makes the fleet's floating IP point at the canonical instance,
/// exactly once, idempotently. Holds no state between invocations.
pub struct Reconciler<'a, P: ?Sized> {
    provider: &'a P,
    budget: ConfirmBudget,
}

impl<'a, P> Reconciler<'a, P>
where
    P: InstanceOps + FloatingIpOps + ActionOps + ?Sized,
{
    pub fn new(provider: &'a P, budget: ConfirmBudget) -> Self {
        Self { provider, budget }
    }

    /// The floating IP currently assigned to a member of the fleet.
    pub async fn current_assignment(
        &self,
        fleet: &FleetName,
    ) -> Result<Option<AssignedIp>, ProviderError> {
        let tag = FleetTag::fleet(fleet);

        for record in self.provider.list_floating_ips().await? {
            let Some(instance_record) = record.instance else {
                continue;
            };
            let Some(instance) = Instance::from_record(instance_record) else {
                continue;
            };
            if !instance.has_tag(tag.as_str()) {
                continue;
            }

            let ip = parse_ip(&record.ip)?;
            return Ok(Some(AssignedIp { ip, instance }));
        }

        Ok(None)
    }

    /// Ensure the floating IP follows the canonical instance.
    pub async fn ensure_assigned(
        &self,
        fleet: &FleetName,
        image: &ImageId,
    ) -> Result<AssignOutcome, ReconcileError> {
        let target = self.resolve_target(fleet, image).await?;

        match self.current_assignment(fleet).await? {
            None => self.create_and_confirm(&target).await,
            Some(assigned) if assigned.instance.id() == target.id() => {
                Ok(AssignOutcome::AlreadyAssigned {
                    ip: assigned.ip,
                    instance: target.id(),
                })
            }
            Some(assigned) => self.reassign_and_confirm(&assigned, &target).await,
        }
    }

    /// Bootstrap entry point for a brand-new fleet: create an IP when
    /// none is expected, refusing if one is already assigned.
    pub async fn create_only(
        &self,
        fleet: &FleetName,
        image: &ImageId,
    ) -> Result<AssignOutcome, ReconcileError> {
        let target = self.resolve_target(fleet, image).await?;

        if let Some(assigned) = self.current_assignment(fleet).await? {
            return Err(ReconcileError::AlreadyHasIp { ip: assigned.ip });
        }

        self.create_and_confirm(&target).await
    }

    async fn resolve_target(
        &self,
        fleet: &FleetName,
        image: &ImageId,
    ) -> Result<Instance, ReconcileError> {
        Selector::new(self.provider)
            .canonical_instance(fleet, image)
            .await?
            .ok_or(ReconcileError::NoInstance)
    }

    async fn create_and_confirm(
        &self,
        target: &Instance,
    ) -> Result<AssignOutcome, ReconcileError> {
        let record = self.provider.create_floating_ip(target.id()).await?;
        let ip = parse_ip(&record.ip)?;

        let handler = AddressVisible {
            provider: self.provider,
            instance: target.id(),
            ip,
        };

        match confirm(&handler, self.budget).await {
            Ok(_) => Ok(AssignOutcome::Created {
                ip,
                target: target.id(),
            }),
            Err(ConfirmError::TimedOut { .. }) => Err(ReconcileError::CreateTimedOut {
                ip,
                target: target.id(),
                timeout: self.budget.timeout,
            }),
            Err(ConfirmError::Provider(e)) => Err(e.into()),
        }
    }

    async fn reassign_and_confirm(
        &self,
        assigned: &AssignedIp,
        target: &Instance,
    ) -> Result<AssignOutcome, ReconcileError> {
        let action = self
            .provider
            .reassign_floating_ip(assigned.ip, target.id())
            .await?;

        let handler = ActionCompleted {
            provider: self.provider,
            action: ActionId::new(action.id),
        };

        match confirm(&handler, self.budget).await {
            Ok(_) => Ok(AssignOutcome::Reassigned {
                ip: assigned.ip,
                source: assigned.instance.id(),
                target: target.id(),
            }),
            Err(ConfirmError::TimedOut { .. }) => Err(ReconcileError::ReassignTimedOut {
                ip: assigned.ip,
                source_instance: assigned.instance.id(),
                target: target.id(),
                timeout: self.budget.timeout,
            }),
            Err(ConfirmError::Provider(e)) => Err(e.into()),
        }
    }
}

fn parse_ip(raw: &str) -> Result<IpAddr, ProviderError> {
    raw.parse()
        .map_err(|_| ProviderError::Decode(format!("invalid ip address in response: {raw}")))
}
