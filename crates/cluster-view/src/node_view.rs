//! Joined read model of a single node

use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use cluster_types::{
    MaintenanceDefinition, NodeConfig, NodeId, NodeIndex, NodeRole, NodeState, SequencingState,
    ShardDataHealth, ShardIndex, ShardOperationalState, ShardState, ShardStorageState,
};

/// A node's configuration and state joined with the maintenances affecting it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    node_id: NodeId,
    node_config: Arc<NodeConfig>,
    node_state: Arc<NodeState>,
    /// Sorted by maintenance group id
    maintenances: Vec<Arc<MaintenanceDefinition>>,
}

impl NodeView {
    pub fn new(
        node_config: Arc<NodeConfig>,
        node_state: Arc<NodeState>,
        maintenances: Vec<Arc<MaintenanceDefinition>>,
    ) -> Self {
        let node_id = NodeId::new(Some(node_config.node_index), Some(node_config.name.clone()));
        let node_id = match &node_config.data_address {
            Some(address) => node_id.with_address(address.clone()),
            None => node_id,
        };
        Self {
            node_id,
            node_config,
            node_state,
            maintenances,
        }
    }

    pub fn node_index(&self) -> NodeIndex {
        self.node_config.node_index
    }

    pub fn node_name(&self) -> &str {
        &self.node_config.name
    }

    /// Canonical, fully populated identity of this node
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn node_config(&self) -> &NodeConfig {
        &self.node_config
    }

    pub fn node_state(&self) -> &NodeState {
        &self.node_state
    }

    pub fn maintenances(&self) -> &[Arc<MaintenanceDefinition>] {
        &self.maintenances
    }

    pub fn data_address(&self) -> Option<&str> {
        self.node_config.data_address.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.node_config.location.as_deref()
    }

    pub fn roles(&self) -> &BTreeSet<NodeRole> {
        &self.node_config.roles
    }

    pub fn is_sequencer(&self) -> bool {
        self.node_config.is_sequencer()
    }

    pub fn is_storage(&self) -> bool {
        self.node_config.is_storage()
    }

    /// Declared shard count, zero for non-storage nodes
    pub fn num_shards(&self) -> u32 {
        self.node_config.num_shards()
    }

    /// Exclusive upper bound of valid shard indexes, clamped to `ShardIndex::MAX`
    pub fn shard_index_bound(&self) -> ShardIndex {
        ShardIndex::try_from(self.num_shards()).unwrap_or(ShardIndex::MAX)
    }

    pub fn sequencer_weight(&self) -> Option<f64> {
        self.node_config.sequencer.as_ref().map(|s| s.weight)
    }

    pub fn sequencing_state(&self) -> Option<SequencingState> {
        self.node_state.sequencing_state
    }

    pub fn shard_states(&self) -> &[ShardState] {
        &self.node_state.shard_states
    }

    pub fn shard_state(&self, shard_index: ShardIndex) -> Option<&ShardState> {
        usize::try_from(shard_index)
            .ok()
            .and_then(|i| self.node_state.shard_states.get(i))
    }

    pub fn shards_operational_state(&self) -> Vec<ShardOperationalState> {
        self.shard_states()
            .iter()
            .map(|s| s.current_operational_state)
            .collect()
    }

    pub fn shards_data_health(&self) -> Vec<ShardDataHealth> {
        self.shard_states().iter().map(|s| s.data_health).collect()
    }

    pub fn shards_storage_state(&self) -> Vec<ShardStorageState> {
        self.shard_states().iter().map(|s| s.storage_state).collect()
    }

    pub fn is_in_maintenance(&self) -> bool {
        !self.maintenances.is_empty()
    }
}
