//! Joined read model of a single maintenance

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use cluster_types::{
    MaintenanceDefinition, MaintenanceProgress, NodeId, NodeIndex, SequencingState, ShardId,
    ShardOperationalState,
};

use crate::node_view::NodeView;

/// A maintenance definition joined with the views of every node it affects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceView {
    group_id: String,
    maintenance: Arc<MaintenanceDefinition>,
    affected_sequencer_node_indexes: Vec<NodeIndex>,
    affected_storage_node_indexes: Vec<NodeIndex>,
    #[serde(skip)]
    node_index_to_node_view: BTreeMap<NodeIndex, Arc<NodeView>>,
}

impl MaintenanceView {
    /// Both index lists must be sorted and deduplicated.
    pub fn new(
        group_id: String,
        maintenance: Arc<MaintenanceDefinition>,
        affected_sequencer_node_indexes: Vec<NodeIndex>,
        affected_storage_node_indexes: Vec<NodeIndex>,
        node_index_to_node_view: BTreeMap<NodeIndex, Arc<NodeView>>,
    ) -> Self {
        Self {
            group_id,
            maintenance,
            affected_sequencer_node_indexes,
            affected_storage_node_indexes,
            node_index_to_node_view,
        }
    }

    pub fn maintenance(&self) -> &MaintenanceDefinition {
        &self.maintenance
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn user(&self) -> &str {
        &self.maintenance.user
    }

    pub fn reason(&self) -> &str {
        &self.maintenance.reason
    }

    pub fn shards(&self) -> &[ShardId] {
        &self.maintenance.shards
    }

    pub fn sequencer_nodes(&self) -> &[NodeId] {
        &self.maintenance.sequencer_nodes
    }

    pub fn shard_target_state(&self) -> ShardOperationalState {
        self.maintenance.shard_target_state
    }

    pub fn sequencer_target_state(&self) -> SequencingState {
        self.maintenance.sequencer_target_state
    }

    pub fn skip_safety_checks(&self) -> bool {
        self.maintenance.skip_safety_checks
    }

    pub fn force_restore_rebuilding(&self) -> bool {
        self.maintenance.force_restore_rebuilding
    }

    pub fn allow_passive_drains(&self) -> bool {
        self.maintenance.allow_passive_drains
    }

    pub fn progress(&self) -> MaintenanceProgress {
        self.maintenance.progress
    }

    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.maintenance.created_on
    }

    pub fn expires_on(&self) -> Option<DateTime<Utc>> {
        self.maintenance.expires_on
    }

    /// Sorted indexes of the sequencer nodes this maintenance targets
    pub fn affected_sequencer_node_indexes(&self) -> &[NodeIndex] {
        &self.affected_sequencer_node_indexes
    }

    /// Sorted indexes of the nodes hosting shards this maintenance targets
    pub fn affected_storage_node_indexes(&self) -> &[NodeIndex] {
        &self.affected_storage_node_indexes
    }

    /// Sorted union of sequencer and storage node indexes
    pub fn affected_node_indexes(&self) -> Vec<NodeIndex> {
        let mut indexes: Vec<NodeIndex> = self
            .affected_sequencer_node_indexes
            .iter()
            .chain(self.affected_storage_node_indexes.iter())
            .copied()
            .collect();
        indexes.sort_unstable();
        indexes.dedup();
        indexes
    }

    /// Views of affected nodes known to the cluster view, by node index
    pub fn affected_node_views(&self) -> impl Iterator<Item = &NodeView> + '_ {
        self.node_index_to_node_view.values().map(|nv| nv.as_ref())
    }

    pub fn get_node_view(&self, node_index: NodeIndex) -> Option<&NodeView> {
        self.node_index_to_node_view.get(&node_index).map(|nv| nv.as_ref())
    }

    fn find_node_view(&self, node: &NodeId) -> Option<&NodeView> {
        match (node.node_index, &node.name) {
            (Some(ni), _) => self.get_node_view(ni),
            (None, Some(name)) => self.affected_node_views().find(|nv| nv.node_name() == name),
            (None, None) => None,
        }
    }

    /// Current operational state of every shard targeted by this maintenance
    ///
    /// Wildcard shards are expanded with the node's declared shard count.
    /// Shards on nodes unknown to the view, or without reported state, map to `None`.
    pub fn shard_operational_states(&self) -> Vec<(ShardId, Option<ShardOperationalState>)> {
        let mut states = Vec::new();
        for shard in self.shards() {
            let Some(nv) = self.find_node_view(&shard.node) else {
                states.push((shard.clone(), None));
                continue;
            };
            if !nv.is_storage() {
                continue;
            }
            let shard_indexes = if shard.is_all_shards() {
                0..nv.shard_index_bound()
            } else {
                shard.shard_index..shard.shard_index + 1
            };
            for shard_index in shard_indexes {
                let state = nv.shard_state(shard_index).map(|s| s.current_operational_state);
                states.push((ShardId::new(nv.node_id().clone(), shard_index), state));
            }
        }
        states
    }

    /// Current sequencing state of every sequencer node targeted by this maintenance
    pub fn sequencer_states(&self) -> Vec<(NodeId, Option<SequencingState>)> {
        self.sequencer_nodes()
            .iter()
            .map(|node| match self.find_node_view(node) {
                Some(nv) => (nv.node_id().clone(), nv.sequencing_state()),
                None => (node.clone(), None),
            })
            .collect()
    }

    /// Whether every targeted shard and sequencer already reached its target state
    pub fn is_everything_done(&self) -> bool {
        let shards_done = self
            .shard_operational_states()
            .iter()
            .all(|(_, state)| *state == Some(self.shard_target_state()));
        let sequencers_done = self
            .sequencer_states()
            .iter()
            .all(|(_, state)| *state == Some(self.sequencer_target_state()));
        shards_done && sequencers_done
    }

    pub fn is_blocked(&self) -> bool {
        self.progress() == MaintenanceProgress::BlockedUntilSafe
    }

    pub fn is_in_progress(&self) -> bool {
        self.progress() == MaintenanceProgress::InProgress
    }

    pub fn is_completed(&self) -> bool {
        self.progress() == MaintenanceProgress::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cluster_types::{NodeConfig, NodeState, ShardState, ALL_SHARDS};

    fn node(index: NodeIndex, states: &[ShardOperationalState]) -> Arc<NodeView> {
        let config = NodeConfig::new(index, format!("host-{}", index))
            .with_storage(states.len() as u32)
            .with_sequencer(1.0);
        let state = NodeState::new(index)
            .with_sequencing_state(SequencingState::Disabled)
            .with_shard_states(
                states
                    .iter()
                    .map(|s| ShardState {
                        current_operational_state: *s,
                        ..Default::default()
                    })
                    .collect(),
            );
        Arc::new(NodeView::new(Arc::new(config), Arc::new(state), Vec::new()))
    }

    fn view(mnt: MaintenanceDefinition, nodes: Vec<Arc<NodeView>>) -> MaintenanceView {
        let map = nodes.into_iter().map(|nv| (nv.node_index(), nv)).collect();
        MaintenanceView::new(
            mnt.group_id.clone().unwrap_or_default(),
            Arc::new(mnt),
            vec![1],
            vec![0],
            map,
        )
    }

    #[test]
    fn test_affected_node_indexes_union() {
        let mnt = MaintenanceDefinition::new(Some("g".to_string()), "u", "r");
        let mv = MaintenanceView::new(
            "g".to_string(),
            Arc::new(mnt),
            vec![1, 3],
            vec![0, 3],
            BTreeMap::new(),
        );
        assert_eq!(mv.affected_node_indexes(), vec![0, 1, 3]);
        assert_eq!(mv.affected_node_views().count(), 0);
    }

    #[test]
    fn test_shard_operational_states_expand_wildcard() {
        let mnt = MaintenanceDefinition::new(Some("g".to_string()), "u", "r").with_shards(
            vec![ShardId::new(NodeId::from_index(0), ALL_SHARDS)],
            ShardOperationalState::Drained,
        );
        let mv = view(
            mnt,
            vec![node(
                0,
                &[ShardOperationalState::Drained, ShardOperationalState::Enabled],
            )],
        );
        let states = mv.shard_operational_states();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].0.shard_index, 0);
        assert_eq!(states[0].1, Some(ShardOperationalState::Drained));
        assert_eq!(states[1].1, Some(ShardOperationalState::Enabled));
        assert!(!mv.is_everything_done());
    }

    #[test]
    fn test_is_everything_done() {
        let mnt = MaintenanceDefinition::new(Some("g".to_string()), "u", "r")
            .with_shards(
                vec![ShardId::new(NodeId::from_name("host-0"), 1)],
                ShardOperationalState::Drained,
            )
            .with_sequencer_nodes(vec![NodeId::from_index(1)], SequencingState::Disabled)
            .with_progress(MaintenanceProgress::InProgress);
        let mv = view(
            mnt,
            vec![
                node(
                    0,
                    &[ShardOperationalState::Enabled, ShardOperationalState::Drained],
                ),
                node(1, &[]),
            ],
        );
        assert!(mv.is_everything_done());
        assert!(mv.is_in_progress());
        assert!(!mv.is_blocked());
        assert!(!mv.is_completed());
    }

    #[test]
    fn test_unknown_node_is_not_done() {
        let mnt = MaintenanceDefinition::new(Some("g".to_string()), "u", "r").with_shards(
            vec![ShardId::new(NodeId::from_index(9), 0)],
            ShardOperationalState::Drained,
        );
        let mv = view(mnt, Vec::new());
        assert_eq!(mv.shard_operational_states()[0].1, None);
        assert!(!mv.is_everything_done());
    }
}
