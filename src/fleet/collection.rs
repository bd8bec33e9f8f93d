// ABOUTME: Ordered, de-duplicated set of instances with pure derived operations.
// ABOUTME: Filter, sort-by-creation-descending, first, newest.

use std::collections::HashSet;

use crate::provider::InstanceRecord;
use crate::types::InstanceId;

use super::{Filter, Instance};

/// An ordered, id-deduplicated set of instances.
///
/// Construction drops malformed records silently and keeps the first
/// occurrence of each id. All derived operations are pure and return a
/// new collection or borrowed value.
#[derive(Debug, Clone, Default)]
pub struct InstanceCollection {
    items: Vec<Instance>,
}

impl InstanceCollection {
    /// Build from provider wire records, dropping malformed entries.
    pub fn from_records(records: Vec<InstanceRecord>) -> Self {
        Self::from_instances(records.into_iter().filter_map(Instance::from_record))
    }

    pub fn from_instances(instances: impl IntoIterator<Item = Instance>) -> Self {
        let mut seen: HashSet<InstanceId> = HashSet::new();
        let items = instances
            .into_iter()
            .filter(|instance| seen.insert(instance.id()))
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&Instance> {
        self.items.first()
    }

    pub fn to_vec(&self) -> Vec<Instance> {
        self.items.clone()
    }

    /// Apply one predicate, preserving relative order.
    pub fn filtered(&self, filter: &Filter) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|instance| filter.matches(instance))
                .cloned()
                .collect(),
        }
    }

    /// Sort by creation time, newest first.
    ///
    /// The sort is stable: instances with identical timestamps keep
    /// their provider-returned relative order, so the comparator must
    /// return Equal for equal timestamps rather than inventing an order.
    pub fn sorted_newest_first(&self) -> Self {
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { items }
    }

    /// The most recently created instance, if any.
    pub fn newest(&self) -> Option<&Instance> {
        self.items
            .iter()
            .reduce(|winner, candidate| {
                // Strict "later wins": equal timestamps keep the current winner.
                if candidate.created_at > winner.created_at {
                    candidate
                } else {
                    winner
                }
            })
    }
}

impl IntoIterator for InstanceCollection {
    type Item = Instance;
    type IntoIter = std::vec::IntoIter<Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a InstanceCollection {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{InstanceRecord, NetworksRecord};

    fn record(id: u64, created_at: &str) -> InstanceRecord {
        InstanceRecord {
            id: Some(id),
            name: format!("api-{id}"),
            status: Some("active".to_string()),
            created_at: Some(created_at.to_string()),
            networks: NetworksRecord::default(),
            tags: vec![],
        }
    }

    fn malformed() -> InstanceRecord {
        InstanceRecord {
            id: None,
            name: String::new(),
            status: None,
            created_at: None,
            networks: NetworksRecord::default(),
            tags: vec![],
        }
    }

    #[test]
    fn construction_drops_malformed_and_duplicate_entries() {
        let collection = InstanceCollection::from_records(vec![
            record(1, "2026-01-01T00:00:00Z"),
            malformed(),
            record(2, "2026-01-02T00:00:00Z"),
            record(1, "2026-01-03T00:00:00Z"),
        ]);

        assert_eq!(collection.len(), 2);
        let ids: Vec<u64> = collection.iter().map(|i| i.id().value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn newest_picks_latest_creation_time_in_any_order() {
        let collection = InstanceCollection::from_records(vec![
            record(2, "2026-01-02T00:00:00Z"),
            record(3, "2026-01-03T00:00:00Z"),
            record(1, "2026-01-01T00:00:00Z"),
        ]);

        assert_eq!(collection.newest().unwrap().id().value(), 3);
    }

    #[test]
    fn newest_tie_break_keeps_first_encountered() {
        let collection = InstanceCollection::from_records(vec![
            record(7, "2026-01-01T00:00:00Z"),
            record(8, "2026-01-01T00:00:00Z"),
        ]);

        assert_eq!(collection.newest().unwrap().id().value(), 7);
    }

    #[test]
    fn sorted_newest_first_is_stable_on_equal_timestamps() {
        let collection = InstanceCollection::from_records(vec![
            record(5, "2026-01-01T00:00:00Z"),
            record(9, "2026-01-02T00:00:00Z"),
            record(6, "2026-01-01T00:00:00Z"),
        ]);

        let ids: Vec<u64> = collection
            .sorted_newest_first()
            .iter()
            .map(|i| i.id().value())
            .collect();
        assert_eq!(ids, vec![9, 5, 6]);
    }

    #[test]
    fn newest_of_empty_collection_is_none() {
        let collection = InstanceCollection::default();
        assert!(collection.newest().is_none());
    }
}
