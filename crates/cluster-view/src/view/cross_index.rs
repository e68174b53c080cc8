//! Maintenance cross-index
//!
//! Relates maintenances to the nodes they affect, in both directions.
//! Maintenances without a group id are not part of the index.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use cluster_types::{MaintenanceDefinition, NodeIndex};

use super::resolution::ResolutionIndex;

/// Indexes of the sequencer nodes a maintenance references
pub(crate) fn affected_sequencer_node_indexes(
    mnt: &MaintenanceDefinition,
    resolution: &ResolutionIndex,
) -> BTreeSet<NodeIndex> {
    mnt.sequencer_nodes
        .iter()
        .filter_map(|n| resolution.resolve_reference(n))
        .collect()
}

/// Indexes of the nodes backing the shards a maintenance references
pub(crate) fn affected_storage_node_indexes(
    mnt: &MaintenanceDefinition,
    resolution: &ResolutionIndex,
) -> BTreeSet<NodeIndex> {
    mnt.shards
        .iter()
        .filter_map(|s| resolution.resolve_reference(&s.node))
        .collect()
}

#[derive(Debug)]
pub(crate) struct MaintenanceIndex {
    /// Keyed and therefore ordered by group id
    maintenance_id_to_maintenance: BTreeMap<String, Arc<MaintenanceDefinition>>,
    maintenance_id_to_node_indexes: HashMap<String, Vec<NodeIndex>>,
    node_index_to_maintenance_ids: HashMap<NodeIndex, Vec<String>>,
}

impl MaintenanceIndex {
    pub(crate) fn build(
        maintenances: &[Arc<MaintenanceDefinition>],
        resolution: &ResolutionIndex,
    ) -> Self {
        let mut maintenance_id_to_maintenance = BTreeMap::new();
        let mut skipped = 0usize;
        for mnt in maintenances {
            let Some(group_id) = &mnt.group_id else {
                skipped += 1;
                continue;
            };
            if maintenance_id_to_maintenance
                .insert(group_id.clone(), mnt.clone())
                .is_some()
            {
                warn!(
                    "Duplicate maintenance group id {}, keeping the later definition",
                    group_id
                );
            }
        }
        if skipped > 0 {
            debug!("Skipped {} maintenances without group id", skipped);
        }

        let mut node_index_to_maintenance_ids: HashMap<NodeIndex, Vec<String>> = resolution
            .node_indexes()
            .iter()
            .map(|ni| (*ni, Vec::new()))
            .collect();
        let mut maintenance_id_to_node_indexes = HashMap::with_capacity(maintenance_id_to_maintenance.len());

        // Ids are visited in sorted order, so each per-node list comes out sorted and unique
        for (group_id, mnt) in &maintenance_id_to_maintenance {
            let mut node_indexes = affected_sequencer_node_indexes(mnt, resolution);
            node_indexes.extend(affected_storage_node_indexes(mnt, resolution));

            for ni in &node_indexes {
                match node_index_to_maintenance_ids.get_mut(ni) {
                    Some(ids) => ids.push(group_id.clone()),
                    None => debug!(
                        "Maintenance {} references N{} which is not in the cluster view",
                        group_id, ni
                    ),
                }
            }
            maintenance_id_to_node_indexes.insert(group_id.clone(), node_indexes.into_iter().collect());
        }

        debug!(
            "Built maintenance index: {} maintenances over {} nodes",
            maintenance_id_to_maintenance.len(),
            node_index_to_maintenance_ids.len()
        );

        Self {
            maintenance_id_to_maintenance,
            maintenance_id_to_node_indexes,
            node_index_to_maintenance_ids,
        }
    }

    /// Group ids in lexicographic order
    pub(crate) fn maintenance_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.maintenance_id_to_maintenance.keys().map(String::as_str)
    }

    pub(crate) fn maintenance(&self, maintenance_id: &str) -> Option<&Arc<MaintenanceDefinition>> {
        self.maintenance_id_to_maintenance.get(maintenance_id)
    }

    pub(crate) fn maintenances(&self) -> impl Iterator<Item = (&str, &Arc<MaintenanceDefinition>)> + '_ {
        self.maintenance_id_to_maintenance
            .iter()
            .map(|(id, mnt)| (id.as_str(), mnt))
    }

    /// Sorted indexes of every node the maintenance references, in the view or not
    pub(crate) fn node_indexes(&self, maintenance_id: &str) -> Option<&[NodeIndex]> {
        self.maintenance_id_to_node_indexes
            .get(maintenance_id)
            .map(Vec::as_slice)
    }

    /// Sorted group ids of the maintenances affecting a node
    pub(crate) fn maintenance_ids_for(&self, node_index: NodeIndex) -> &[String] {
        self.node_index_to_maintenance_ids
            .get(&node_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Maintenances affecting a node, ordered by group id
    pub(crate) fn maintenances_for(&self, node_index: NodeIndex) -> Vec<Arc<MaintenanceDefinition>> {
        self.maintenance_ids_for(node_index)
            .iter()
            .filter_map(|id| self.maintenance(id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cluster_types::{NodeConfig, NodeId, NodeState, SequencingState, ShardId, ShardOperationalState};

    fn resolution(indexes: &[NodeIndex]) -> ResolutionIndex {
        let configs: Vec<_> = indexes
            .iter()
            .map(|i| Arc::new(NodeConfig::new(*i, format!("host-{}", i)).with_storage(2)))
            .collect();
        let states: Vec<_> = indexes.iter().map(|i| Arc::new(NodeState::new(*i))).collect();
        ResolutionIndex::build(&configs, &states)
    }

    fn mnt(group_id: Option<&str>, shards: &[NodeIndex], sequencers: &[NodeIndex]) -> Arc<MaintenanceDefinition> {
        Arc::new(
            MaintenanceDefinition::new(group_id.map(str::to_string), "user", "reason")
                .with_shards(
                    shards.iter().map(|i| ShardId::new(NodeId::from_index(*i), 0)).collect(),
                    ShardOperationalState::Drained,
                )
                .with_sequencer_nodes(
                    sequencers.iter().map(|i| NodeId::from_index(*i)).collect(),
                    SequencingState::Disabled,
                ),
        )
    }

    #[test]
    fn test_bidirectional_relation() {
        let res = resolution(&[0, 1, 2]);
        let index = MaintenanceIndex::build(
            &[mnt(Some("b"), &[1], &[2]), mnt(Some("a"), &[1, 0], &[])],
            &res,
        );
        assert_eq!(index.maintenance_ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(index.node_indexes("a"), Some(&[0, 1][..]));
        assert_eq!(index.node_indexes("b"), Some(&[1, 2][..]));
        assert_eq!(index.maintenance_ids_for(1), &["a".to_string(), "b".to_string()]);
        assert_eq!(index.maintenance_ids_for(2), &["b".to_string()]);
        assert_eq!(index.maintenances_for(0).len(), 1);
    }

    #[test]
    fn test_missing_group_id_is_excluded() {
        let res = resolution(&[0]);
        let index = MaintenanceIndex::build(&[mnt(None, &[0], &[0])], &res);
        assert_eq!(index.maintenance_ids().count(), 0);
        assert!(index.maintenance_ids_for(0).is_empty());
    }

    #[test]
    fn test_duplicate_group_id_last_wins() {
        let res = resolution(&[0, 1]);
        let index = MaintenanceIndex::build(&[mnt(Some("g"), &[0], &[]), mnt(Some("g"), &[1], &[])], &res);
        assert_eq!(index.maintenance_ids().count(), 1);
        assert_eq!(index.node_indexes("g"), Some(&[1][..]));
        assert!(index.maintenance_ids_for(0).is_empty());
        assert_eq!(index.maintenance_ids_for(1), &["g".to_string()]);
    }

    #[test]
    fn test_nodes_outside_universe() {
        let res = resolution(&[0]);
        let index = MaintenanceIndex::build(&[mnt(Some("g"), &[0, 5], &[])], &res);
        assert_eq!(index.node_indexes("g"), Some(&[0, 5][..]));
        assert!(index.maintenance_ids_for(5).is_empty());
        assert_eq!(index.maintenance_ids_for(0), &["g".to_string()]);
    }
}
