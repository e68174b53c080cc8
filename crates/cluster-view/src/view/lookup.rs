//! Node and maintenance lookups

use std::sync::Arc;

use cluster_types::{MaintenanceDefinition, NodeConfig, NodeId, NodeIndex, NodeState};

use super::ClusterView;
use crate::error::{ClusterViewError, Result};
use crate::maintenance_view::MaintenanceView;
use crate::node_view::NodeView;

/// Key identifying a node: its index, its name, or both
///
/// When both are given they must resolve to the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLookup<'a> {
    Index(NodeIndex),
    Name(&'a str),
    Both { index: NodeIndex, name: &'a str },
}

impl<'a> NodeLookup<'a> {
    /// Build a lookup from optional parts, failing when neither is given
    pub fn new(node_index: Option<NodeIndex>, node_name: Option<&'a str>) -> Result<Self> {
        match (node_index, node_name) {
            (Some(index), Some(name)) => Ok(Self::Both { index, name }),
            (Some(index), None) => Ok(Self::Index(index)),
            (None, Some(name)) => Ok(Self::Name(name)),
            (None, None) => Err(ClusterViewError::InvalidArgument(
                "Either node_name or node_index must be specified".to_string(),
            )),
        }
    }

    pub fn from_node_id(node_id: &'a NodeId) -> Result<Self> {
        Self::new(node_id.node_index, node_id.name.as_deref())
    }
}

impl From<NodeIndex> for NodeLookup<'_> {
    fn from(index: NodeIndex) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for NodeLookup<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl ClusterView {
    /// Resolve a [`NodeLookup`] to its node view
    ///
    /// The index is checked before the name, so a request where both are
    /// unknown reports the index.
    pub fn lookup_node<'a>(&self, lookup: impl Into<NodeLookup<'a>>) -> Result<&NodeView> {
        match lookup.into() {
            NodeLookup::Index(index) => self.get_node_view_by_node_index(index),
            NodeLookup::Name(name) => self.get_node_view_by_node_name(name),
            NodeLookup::Both { index, name } => {
                let by_node_index = self.get_node_view_by_node_index(index)?;
                let by_node_name = self.get_node_view_by_node_name(name)?;
                if by_node_index.node_index() != by_node_name.node_index() {
                    return Err(ClusterViewError::IdentityConflict {
                        node_index: index,
                        node_name: name.to_string(),
                    });
                }
                Ok(by_node_index)
            }
        }
    }

    /// Node view by index, by name, or by both
    pub fn get_node_view(&self, node_index: Option<NodeIndex>, node_name: Option<&str>) -> Result<&NodeView> {
        self.lookup_node(NodeLookup::new(node_index, node_name)?)
    }

    /// Canonical identity for a possibly partial one
    ///
    /// When several nodes share a name the name belongs to the highest index,
    /// so the canonical id of a shadowed node fails with `IdentityConflict`.
    pub fn normalize_node_id(&self, node_id: &NodeId) -> Result<NodeId> {
        Ok(self.lookup_node(NodeLookup::from_node_id(node_id)?)?.node_id().clone())
    }

    pub fn get_node_index(&self, node_name: &str) -> Result<NodeIndex> {
        Ok(self.lookup_node(node_name)?.node_index())
    }

    pub fn get_node_name(&self, node_index: NodeIndex) -> Result<&str> {
        Ok(self.lookup_node(node_index)?.node_name())
    }

    pub fn get_node_config(&self, node_index: Option<NodeIndex>, node_name: Option<&str>) -> Result<&NodeConfig> {
        Ok(self.get_node_view(node_index, node_name)?.node_config())
    }

    pub fn get_node_state(&self, node_index: Option<NodeIndex>, node_name: Option<&str>) -> Result<&NodeState> {
        Ok(self.get_node_view(node_index, node_name)?.node_state())
    }

    pub fn get_node_id(&self, node_index: Option<NodeIndex>, node_name: Option<&str>) -> Result<&NodeId> {
        Ok(self.get_node_view(node_index, node_name)?.node_id())
    }

    pub fn get_node_maintenances(
        &self,
        node_index: Option<NodeIndex>,
        node_name: Option<&str>,
    ) -> Result<&[Arc<MaintenanceDefinition>]> {
        Ok(self.get_node_view(node_index, node_name)?.maintenances())
    }

    // ==================== By node index ====================

    pub fn get_node_view_by_node_index(&self, node_index: NodeIndex) -> Result<&NodeView> {
        self.node_views()
            .by_index(node_index)
            .map(|nv| nv.as_ref())
            .ok_or_else(|| ClusterViewError::NodeNotFound(format!("node_index={}", node_index)))
    }

    pub fn get_node_name_by_node_index(&self, node_index: NodeIndex) -> Result<&str> {
        Ok(self.get_node_view_by_node_index(node_index)?.node_name())
    }

    pub fn get_node_config_by_node_index(&self, node_index: NodeIndex) -> Result<&NodeConfig> {
        Ok(self.get_node_view_by_node_index(node_index)?.node_config())
    }

    pub fn get_node_state_by_node_index(&self, node_index: NodeIndex) -> Result<&NodeState> {
        Ok(self.get_node_view_by_node_index(node_index)?.node_state())
    }

    pub fn get_node_maintenances_by_node_index(&self, node_index: NodeIndex) -> Result<&[Arc<MaintenanceDefinition>]> {
        Ok(self.get_node_view_by_node_index(node_index)?.maintenances())
    }

    // ==================== By node name ====================

    pub fn get_node_view_by_node_name(&self, node_name: &str) -> Result<&NodeView> {
        self.node_views()
            .by_name(node_name)
            .map(|nv| nv.as_ref())
            .ok_or_else(|| ClusterViewError::NodeNotFound(format!("node_name={}", node_name)))
    }

    pub fn get_node_index_by_node_name(&self, node_name: &str) -> Result<NodeIndex> {
        Ok(self.get_node_view_by_node_name(node_name)?.node_index())
    }

    pub fn get_node_config_by_node_name(&self, node_name: &str) -> Result<&NodeConfig> {
        Ok(self.get_node_view_by_node_name(node_name)?.node_config())
    }

    pub fn get_node_state_by_node_name(&self, node_name: &str) -> Result<&NodeState> {
        Ok(self.get_node_view_by_node_name(node_name)?.node_state())
    }

    pub fn get_node_maintenances_by_node_name(&self, node_name: &str) -> Result<&[Arc<MaintenanceDefinition>]> {
        Ok(self.get_node_view_by_node_name(node_name)?.maintenances())
    }

    // ==================== Maintenances ====================

    pub fn get_maintenance_by_id(&self, maintenance_id: &str) -> Result<&MaintenanceDefinition> {
        self.maintenance_index()
            .maintenance(maintenance_id)
            .map(|mnt| mnt.as_ref())
            .ok_or_else(|| ClusterViewError::MaintenanceNotFound(maintenance_id.to_string()))
    }

    pub fn get_maintenance_view_by_id(&self, maintenance_id: &str) -> Result<&MaintenanceView> {
        self.maintenance_views()
            .get(maintenance_id)
            .ok_or_else(|| ClusterViewError::MaintenanceNotFound(maintenance_id.to_string()))
    }

    /// Sorted indexes of every node the maintenance references
    pub fn get_node_indexes_by_maintenance_id(&self, maintenance_id: &str) -> Result<&[NodeIndex]> {
        self.maintenance_index()
            .node_indexes(maintenance_id)
            .ok_or_else(|| ClusterViewError::MaintenanceNotFound(maintenance_id.to_string()))
    }
}
