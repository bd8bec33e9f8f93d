// ABOUTME: Predicate engine for selecting instances by field values.
// ABOUTME: Positive/negative match with scalar-equality and array-membership semantics.

use crate::types::{FieldValue, Scalar};

use super::Instance;

/// Filter polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Keep instances whose field equals/contains the value.
    Include,
    /// Keep instances whose field does not equal/contain the value.
    Exclude,
}

/// One predicate over an instance's exposed field values.
///
/// An unset field never matches positively and always matches
/// negatively: "unknown" uniformly means "does not have this property".
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: String,
    value: Scalar,
    mode: MatchMode,
}

impl Filter {
    pub fn include(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            mode: MatchMode::Include,
        }
    }

    pub fn exclude(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            mode: MatchMode::Exclude,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Evaluate this predicate against one instance.
    pub fn matches(&self, instance: &Instance) -> bool {
        let hit = match instance.field(&self.field) {
            None => false,
            Some(FieldValue::Scalar(stored)) => stored == self.value,
            Some(FieldValue::List(items)) => items.contains(&self.value),
        };

        match self.mode {
            MatchMode::Include => hit,
            MatchMode::Exclude => !hit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{AddressRecord, InstanceRecord, NetworksRecord};
    use crate::types::StateMap;

    fn instance_with_ips(ips: &[&str]) -> Instance {
        let record = InstanceRecord {
            id: Some(1),
            name: "api-1".to_string(),
            status: Some("active".to_string()),
            created_at: Some("2026-01-05T10:00:00Z".to_string()),
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
            tags: vec![],
        };
        Instance::from_record(record).unwrap()
    }

    #[test]
    fn array_field_matches_by_membership() {
        let instance = instance_with_ips(&["127.0.0.1", "10.0.0.1"]);

        assert!(Filter::include("ips", "127.0.0.1").matches(&instance));
        assert!(!Filter::exclude("ips", "127.0.0.1").matches(&instance));
        assert!(!Filter::include("ips", "9.9.9.9").matches(&instance));
        assert!(Filter::exclude("ips", "9.9.9.9").matches(&instance));
    }

    #[test]
    fn unset_field_never_matches_positively_always_negatively() {
        let instance = instance_with_ips(&["127.0.0.1"]);

        assert!(!Filter::include("is-active", true).matches(&instance));
        assert!(Filter::exclude("is-active", true).matches(&instance));
    }

    #[test]
    fn scalar_field_matches_by_exact_equality() {
        let mut instance = instance_with_ips(&["127.0.0.1"]);
        let mut state = StateMap::new();
        state.insert("queue-depth", 3i64);
        state.insert("idle", true);
        instance.enrich_state(state);

        assert!(Filter::include("queue-depth", 3i64).matches(&instance));
        assert!(!Filter::include("queue-depth", 4i64).matches(&instance));
        assert!(Filter::include("idle", true).matches(&instance));
        assert!(!Filter::include("idle", false).matches(&instance));
    }

    #[test]
    fn scalar_types_never_cross_match() {
        let mut instance = instance_with_ips(&["127.0.0.1"]);
        let mut state = StateMap::new();
        state.insert("count", 1i64);
        instance.enrich_state(state);

        assert!(!Filter::include("count", 1.0).matches(&instance));
        assert!(!Filter::include("count", true).matches(&instance));
        assert!(!Filter::include("count", "1").matches(&instance));
    }

    #[test]
    fn first_class_status_field_is_filterable() {
        let instance = instance_with_ips(&["127.0.0.1"]);

        assert!(Filter::include("status", "active").matches(&instance));
        assert!(!Filter::include("status", "off").matches(&instance));
    }
}
