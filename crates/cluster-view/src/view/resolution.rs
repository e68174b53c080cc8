//! Node resolution index
//!
//! Defines the node universe of a cluster view: the indexes that have both a
//! configuration record and a state record.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use cluster_types::{NodeConfig, NodeId, NodeIndex, NodeState};

#[derive(Debug)]
pub(crate) struct ResolutionIndex {
    /// Sorted ascending
    node_indexes: Vec<NodeIndex>,
    node_index_to_node_config: HashMap<NodeIndex, Arc<NodeConfig>>,
    node_index_to_node_state: HashMap<NodeIndex, Arc<NodeState>>,
    /// Names of nodes in the universe only
    node_name_to_node_index: HashMap<String, NodeIndex>,
}

impl ResolutionIndex {
    pub(crate) fn build(nodes_config: &[Arc<NodeConfig>], nodes_state: &[Arc<NodeState>]) -> Self {
        let node_index_to_node_config: HashMap<NodeIndex, Arc<NodeConfig>> = nodes_config
            .iter()
            .map(|nc| (nc.node_index, nc.clone()))
            .collect();
        let node_index_to_node_state: HashMap<NodeIndex, Arc<NodeState>> = nodes_state
            .iter()
            .map(|ns| (ns.node_index, ns.clone()))
            .collect();

        let config_indexes: BTreeSet<NodeIndex> = node_index_to_node_config.keys().copied().collect();
        let state_indexes: BTreeSet<NodeIndex> = node_index_to_node_state.keys().copied().collect();
        for ni in config_indexes.symmetric_difference(&state_indexes) {
            debug!("Excluding N{}: config and state are not both present", ni);
        }
        let node_indexes: Vec<NodeIndex> = config_indexes.intersection(&state_indexes).copied().collect();

        let mut node_name_to_node_index = HashMap::with_capacity(node_indexes.len());
        for ni in &node_indexes {
            if let Some(nc) = node_index_to_node_config.get(ni) {
                if let Some(previous) = node_name_to_node_index.insert(nc.name.clone(), *ni) {
                    warn!(
                        "Duplicate node name {}: N{} shadows N{}",
                        nc.name, ni, previous
                    );
                }
            }
        }

        debug!(
            "Built resolution index: {} nodes ({} configs, {} states)",
            node_indexes.len(),
            nodes_config.len(),
            nodes_state.len()
        );

        Self {
            node_indexes,
            node_index_to_node_config,
            node_index_to_node_state,
            node_name_to_node_index,
        }
    }

    pub(crate) fn node_indexes(&self) -> &[NodeIndex] {
        &self.node_indexes
    }

    pub(crate) fn config_for(&self, node_index: NodeIndex) -> Option<&Arc<NodeConfig>> {
        self.node_index_to_node_config.get(&node_index)
    }

    pub(crate) fn state_for(&self, node_index: NodeIndex) -> Option<&Arc<NodeState>> {
        self.node_index_to_node_state.get(&node_index)
    }

    /// Every node of the universe with its config and state, by ascending index
    pub(crate) fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Arc<NodeConfig>, &Arc<NodeState>)> + '_ {
        self.node_indexes.iter().filter_map(move |ni| {
            let nc = self.config_for(*ni)?;
            let ns = self.state_for(*ni)?;
            Some((*ni, nc, ns))
        })
    }

    /// Node index a reference points at
    ///
    /// An explicit index is taken as is. A reference carrying only a name is
    /// resolved against the names of the universe.
    pub(crate) fn resolve_reference(&self, node: &NodeId) -> Option<NodeIndex> {
        match (node.node_index, &node.name) {
            (Some(ni), _) => Some(ni),
            (None, Some(name)) => self.node_name_to_node_index.get(name).copied(),
            (None, None) => None,
        }
    }
}
