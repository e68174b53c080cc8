//! Cluster view
//!
//! A read-only model over one snapshot of node configs, node states and
//! maintenance definitions. Derived indexes are computed on first use and
//! kept for the lifetime of the view.
//!
//! # Usage Example
//! ```ignore
//! use cluster_view::ClusterView;
//!
//! let view = ClusterView::new(nodes_config, nodes_state, maintenances);
//! let nv = view.get_node_view_by_node_name("host-1")?;
//! for mv in view.all_maintenance_views() {
//!     println!("{} by {}", mv.group_id(), mv.user());
//! }
//! ```

mod composite;
mod cross_index;
mod lookup;
mod resolution;
mod search;


pub use lookup::NodeLookup;
pub use search::MaintenanceSearch;

use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use cluster_types::{MaintenanceDefinition, NodeConfig, NodeIndex, NodeState};

use crate::maintenance_view::MaintenanceView;
use crate::node_view::NodeView;
use crate::snapshot::ClusterSnapshot;
use composite::{build_maintenance_views, NodeViewIndex};
use cross_index::MaintenanceIndex;
use resolution::ResolutionIndex;

/// Queryable view over a single cluster snapshot
///
/// Immutable after construction. Each derived index is initialized at most
/// once, also under concurrent first access.
#[derive(Debug)]
pub struct ClusterView {
    nodes_config: Vec<Arc<NodeConfig>>,
    nodes_state: Vec<Arc<NodeState>>,
    maintenances: Vec<Arc<MaintenanceDefinition>>,

    resolution: OnceCell<ResolutionIndex>,
    maintenance_index: OnceCell<MaintenanceIndex>,
    node_views: OnceCell<NodeViewIndex>,
    maintenance_views: OnceCell<BTreeMap<String, MaintenanceView>>,
}

impl ClusterView {
    pub fn new(
        nodes_config: Vec<NodeConfig>,
        nodes_state: Vec<NodeState>,
        maintenances: Vec<MaintenanceDefinition>,
    ) -> Self {
        Self {
            nodes_config: nodes_config.into_iter().map(Arc::new).collect(),
            nodes_state: nodes_state.into_iter().map(Arc::new).collect(),
            maintenances: maintenances.into_iter().map(Arc::new).collect(),
            resolution: OnceCell::new(),
            maintenance_index: OnceCell::new(),
            node_views: OnceCell::new(),
            maintenance_views: OnceCell::new(),
        }
    }

    pub fn from_snapshot(snapshot: ClusterSnapshot) -> Self {
        Self::new(snapshot.nodes_config, snapshot.nodes_state, snapshot.maintenances)
    }

    /// Build every derived index now instead of on first access
    pub fn warm_up(&self) -> &Self {
        self.maintenance_views();
        self
    }

    pub fn nodes_config(&self) -> &[Arc<NodeConfig>] {
        &self.nodes_config
    }

    pub fn nodes_state(&self) -> &[Arc<NodeState>] {
        &self.nodes_state
    }

    pub fn maintenances(&self) -> &[Arc<MaintenanceDefinition>] {
        &self.maintenances
    }

    // ==================== Memoized indexes ====================

    fn resolution(&self) -> &ResolutionIndex {
        self.resolution
            .get_or_init(|| ResolutionIndex::build(&self.nodes_config, &self.nodes_state))
    }

    fn maintenance_index(&self) -> &MaintenanceIndex {
        self.maintenance_index
            .get_or_init(|| MaintenanceIndex::build(&self.maintenances, self.resolution()))
    }

    fn node_views(&self) -> &NodeViewIndex {
        self.node_views
            .get_or_init(|| NodeViewIndex::build(self.resolution(), self.maintenance_index()))
    }

    fn maintenance_views(&self) -> &BTreeMap<String, MaintenanceView> {
        self.maintenance_views.get_or_init(|| {
            build_maintenance_views(self.resolution(), self.maintenance_index(), self.node_views())
        })
    }

    // ==================== Enumeration ====================

    /// Node indexes of the view, ascending
    pub fn all_node_indexes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.resolution().node_indexes().iter().copied()
    }

    /// Node views ordered by node index
    pub fn all_node_views(&self) -> impl Iterator<Item = &NodeView> + '_ {
        self.node_views().iter().map(|nv| nv.as_ref())
    }

    /// Node names ordered by node index
    pub fn all_node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.all_node_views().map(NodeView::node_name)
    }

    /// Maintenance group ids in lexicographic order
    pub fn all_maintenance_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.maintenance_index().maintenance_ids()
    }

    /// Maintenances ordered by group id
    pub fn all_maintenances(&self) -> impl Iterator<Item = &MaintenanceDefinition> + '_ {
        self.maintenance_index().maintenances().map(|(_, mnt)| mnt.as_ref())
    }

    /// Maintenance views ordered by group id
    pub fn all_maintenance_views(&self) -> impl Iterator<Item = &MaintenanceView> + '_ {
        self.maintenance_views().values()
    }
}
