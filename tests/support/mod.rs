// ABOUTME: Shared test support: a scripted fake provider.
// ABOUTME: Implements the provider traits from fixed data and records every call.

// Each test binary only uses some of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::IpAddr;

use flotilla::provider::{
    ActionOps, ActionRecord, ActionStatus, AddressRecord, FloatingIpOps, FloatingIpRecord,
    InstanceOps, InstanceRecord, NetworksRecord, ProviderError, StateOps,
};
use flotilla::types::{ActionId, FleetTag, InstanceId, StateMap};

/// One recorded provider call, for asserting what a run did (and did
/// not) touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListByTag(String),
    GetInstance(u64),
    DeleteInstance(u64),
    InstanceState(u64),
    ListFloatingIps,
    CreateFloatingIp(u64),
    ReassignFloatingIp(String, u64),
    GetAction(u64),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::DeleteInstance(_) | Call::CreateFloatingIp(_) | Call::ReassignFloatingIp(_, _)
        )
    }
}

/// Scripted provider double backed by fixed records.
pub struct FakeProvider {
    instances: Mutex<Vec<InstanceRecord>>,
    floating_ips: Mutex<Vec<FloatingIpRecord>>,
    actions: Mutex<HashMap<u64, ActionStatus>>,
    states: Mutex<HashMap<u64, StateMap>>,
    create_ip: String,
    reassign_action_id: u64,
    calls: Mutex<Vec<Call>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            instances: Mutex::new(Vec::new()),
            floating_ips: Mutex::new(Vec::new()),
            actions: Mutex::new(HashMap::new()),
            states: Mutex::new(HashMap::new()),
            create_ip: "203.0.113.100".to_string(),
            reassign_action_id: 999,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instance(self, record: InstanceRecord) -> Self {
        self.instances.lock().push(record);
        self
    }

    pub fn with_floating_ip(self, ip: &str, backing: Option<InstanceRecord>) -> Self {
        self.floating_ips.lock().push(FloatingIpRecord {
            ip: ip.to_string(),
            instance: backing,
        });
        self
    }

    pub fn with_action(self, id: u64, status: ActionStatus) -> Self {
        self.actions.lock().insert(id, status);
        self
    }

    pub fn with_state(self, instance_id: u64, state: StateMap) -> Self {
        self.states.lock().insert(instance_id, state);
        self
    }

    pub fn with_create_ip(mut self, ip: &str) -> Self {
        self.create_ip = ip.to_string();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn mutation_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl InstanceOps for FakeProvider {
    async fn list_by_tag(&self, tag: &FleetTag) -> Result<Vec<InstanceRecord>, ProviderError> {
        self.record(Call::ListByTag(tag.as_str().to_string()));
        Ok(self
            .instances
            .lock()
            .iter()
            .filter(|r| r.tags.iter().any(|t| t == tag.as_str()))
            .cloned()
            .collect())
    }

    async fn get_instance(
        &self,
        id: InstanceId,
    ) -> Result<Option<InstanceRecord>, ProviderError> {
        self.record(Call::GetInstance(id.value()));
        Ok(self
            .instances
            .lock()
            .iter()
            .find(|r| r.id == Some(id.value()))
            .cloned())
    }

    async fn delete_instance(&self, id: InstanceId) -> Result<(), ProviderError> {
        self.record(Call::DeleteInstance(id.value()));
        let mut instances = self.instances.lock();
        let before = instances.len();
        instances.retain(|r| r.id != Some(id.value()));
        if instances.len() == before {
            return Err(ProviderError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl StateOps for FakeProvider {
    async fn instance_state(&self, id: InstanceId) -> Result<StateMap, ProviderError> {
        self.record(Call::InstanceState(id.value()));
        Ok(self.states.lock().get(&id.value()).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl FloatingIpOps for FakeProvider {
    async fn list_floating_ips(&self) -> Result<Vec<FloatingIpRecord>, ProviderError> {
        self.record(Call::ListFloatingIps);
        Ok(self.floating_ips.lock().clone())
    }

    async fn create_floating_ip(
        &self,
        instance: InstanceId,
    ) -> Result<FloatingIpRecord, ProviderError> {
        self.record(Call::CreateFloatingIp(instance.value()));
        Ok(FloatingIpRecord {
            ip: self.create_ip.clone(),
            instance: None,
        })
    }

    async fn reassign_floating_ip(
        &self,
        ip: IpAddr,
        instance: InstanceId,
    ) -> Result<ActionRecord, ProviderError> {
        self.record(Call::ReassignFloatingIp(ip.to_string(), instance.value()));
        Ok(ActionRecord {
            id: self.reassign_action_id,
            status: ActionStatus::InProgress,
        })
    }
}

#[async_trait]
impl ActionOps for FakeProvider {
    async fn get_action(&self, id: ActionId) -> Result<ActionRecord, ProviderError> {
        self.record(Call::GetAction(id.value()));
        match self.actions.lock().get(&id.value()) {
            Some(status) => Ok(ActionRecord {
                id: id.value(),
                status: *status,
            }),
            None => Err(ProviderError::NotFound),
        }
    }
}

/// Build a well-formed instance record for tests.
pub fn instance_record(
    id: u64,
    created_at: &str,
    ips: &[&str],
    tags: &[&str],
) -> InstanceRecord {
    InstanceRecord {
        id: Some(id),
        name: format!("api-{id}"),
        status: Some("active".to_string()),
        created_at: Some(created_at.to_string()),
        networks: NetworksRecord {
            v4: ips
                .iter()
                .map(|ip| AddressRecord {
                    ip_address: (*ip).to_string(),
                    kind: "public".to_string(),
                })
                .collect(),
            v6: vec![],
        },
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
    }
}
