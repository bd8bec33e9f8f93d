// ABOUTME: Domain model for one cloud compute instance.
// ABOUTME: Built from provider records; enriched with a state map afterwards.

use chrono::{DateTime, Utc};
use std::fmt;
use std::net::IpAddr;

use crate::provider::InstanceRecord;
use crate::types::{FieldValue, InstanceId, Scalar, StateMap};

/// Lifecycle status as reported by the provider.
///
/// The set is closed; any value the provider adds later maps to
/// `Unknown` instead of failing the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceStatus {
    New,
    Active,
    Off,
    Archive,
    Unknown,
}

impl InstanceStatus {
    pub fn from_provider(value: &str) -> Self {
        match value {
            "new" => InstanceStatus::New,
            "active" => InstanceStatus::Active,
            "off" => InstanceStatus::Off,
            "archive" => InstanceStatus::Archive,
            _ => InstanceStatus::Unknown,
        }
    }

    pub fn is_active(self) -> bool {
        self == InstanceStatus::Active
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstanceStatus::New => "new",
            InstanceStatus::Active => "active",
            InstanceStatus::Off => "off",
            InstanceStatus::Archive => "archive",
            InstanceStatus::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Whether an address is reachable from outside the provider network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// One network address assigned to an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub ip: IpAddr,
    pub visibility: Visibility,
}

/// One cloud compute instance.
///
/// The id is immutable once constructed. State enrichment replaces only
/// the state map; identity, networks, and tags are fixed at conversion
/// time. Every reconciliation pass re-fetches fresh instances, so
/// nothing here is ever updated in place beyond enrichment.
#[derive(Debug, Clone)]
pub struct Instance {
    id: InstanceId,
    pub name: String,
    pub status: InstanceStatus,
    pub created_at: DateTime<Utc>,
    pub addresses: Vec<Address>,
    pub tags: Vec<String>,
    state: StateMap,
}

impl Instance {
    /// Convert a wire record into a domain instance.
    ///
    /// Returns `None` for records missing an id or a parseable creation
    /// timestamp; addresses that fail to parse are skipped individually.
    pub fn from_record(record: InstanceRecord) -> Option<Self> {
        let id = InstanceId::new(record.id?);
        let created_at = record
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())?
            .with_timezone(&Utc);

        let status = record
            .status
            .as_deref()
            .map(InstanceStatus::from_provider)
            .unwrap_or(InstanceStatus::Unknown);

        let mut addresses = Vec::new();
        for address in record.networks.v4.into_iter().chain(record.networks.v6) {
            let Ok(ip) = address.ip_address.parse::<IpAddr>() else {
                continue;
            };
            let visibility = if address.kind == "private" {
                Visibility::Private
            } else {
                Visibility::Public
            };
            addresses.push(Address { ip, visibility });
        }

        Some(Self {
            id,
            name: record.name,
            status,
            created_at,
            addresses,
            tags: record.tags,
            state: StateMap::new(),
        })
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn state(&self) -> &StateMap {
        &self.state
    }

    /// Attach state-map data from the state collaborator.
    pub fn enrich_state(&mut self, state: StateMap) {
        self.state = state;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn has_address(&self, ip: IpAddr) -> bool {
        self.addresses.iter().any(|a| a.ip == ip)
    }

    pub fn public_address(&self) -> Option<IpAddr> {
        self.addresses
            .iter()
            .find(|a| a.visibility == Visibility::Public)
            .map(|a| a.ip)
    }

    /// Resolve a filterable field by name: first-class attributes first,
    /// then the state map.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Scalar(Scalar::Int(self.id.value() as i64))),
            "name" => Some(FieldValue::Scalar(Scalar::Str(self.name.clone()))),
            "status" => Some(FieldValue::Scalar(Scalar::Str(self.status.to_string()))),
            "ips" => Some(FieldValue::List(
                self.addresses
                    .iter()
                    .map(|a| Scalar::Str(a.ip.to_string()))
                    .collect(),
            )),
            "tags" => Some(FieldValue::List(
                self.tags.iter().map(|t| Scalar::Str(t.clone())).collect(),
            )),
            other => self.state.get(other).cloned(),
        }
    }
}
