// ABOUTME: Wire-shape records shared across provider trait definitions.
// ABOUTME: InstanceRecord, FloatingIpRecord, ActionRecord as the API returns them.

use serde::Deserialize;

/// An instance as the provider's list/get endpoints return it.
///
/// Fields the domain model requires are optional here: a record the API
/// hands back half-formed is dropped at conversion instead of failing
/// the whole listing.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceRecord {
    pub id: Option<u64>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub networks: NetworksRecord,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Per-family address listings inside an instance record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworksRecord {
    #[serde(default)]
    pub v4: Vec<AddressRecord>,

    #[serde(default)]
    pub v6: Vec<AddressRecord>,
}

/// One assigned address inside an instance record.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressRecord {
    pub ip_address: String,

    /// "public" or "private" on the wire.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A floating IP as the provider's listing returns it, with the backing
/// instance embedded when one is assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct FloatingIpRecord {
    pub ip: String,

    #[serde(default)]
    pub instance: Option<InstanceRecord>,
}

/// An asynchronous provider-side action handle.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRecord {
    pub id: u64,

    #[serde(default)]
    pub status: ActionStatus,
}

/// Status of an asynchronous provider action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    #[default]
    InProgress,
    Completed,
    Errored,
    #[serde(other)]
    Unknown,
}

impl ActionStatus {
    pub fn is_completed(self) -> bool {
        self == ActionStatus::Completed
    }
}
