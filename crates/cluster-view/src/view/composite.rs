//! Composite view builder
//!
//! Materializes [`NodeView`] and [`MaintenanceView`] objects from the
//! resolution and maintenance indexes.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use cluster_types::NodeIndex;

use super::cross_index::{affected_sequencer_node_indexes, affected_storage_node_indexes, MaintenanceIndex};
use super::resolution::ResolutionIndex;
use crate::maintenance_view::MaintenanceView;
use crate::node_view::NodeView;

#[derive(Debug)]
pub(crate) struct NodeViewIndex {
    node_index_to_node_view: BTreeMap<NodeIndex, Arc<NodeView>>,
    node_name_to_node_view: HashMap<String, Arc<NodeView>>,
}

impl NodeViewIndex {
    pub(crate) fn build(resolution: &ResolutionIndex, maintenances: &MaintenanceIndex) -> Self {
        let node_index_to_node_view: BTreeMap<NodeIndex, Arc<NodeView>> = resolution
            .nodes()
            .map(|(ni, nc, ns)| {
                let nv = NodeView::new(nc.clone(), ns.clone(), maintenances.maintenances_for(ni));
                (ni, Arc::new(nv))
            })
            .collect();

        // Duplicate names overwrite: the highest node index wins
        let node_name_to_node_view = node_index_to_node_view
            .values()
            .map(|nv| (nv.node_name().to_string(), nv.clone()))
            .collect();

        debug!("Built {} node views", node_index_to_node_view.len());

        Self {
            node_index_to_node_view,
            node_name_to_node_view,
        }
    }

    pub(crate) fn by_index(&self, node_index: NodeIndex) -> Option<&Arc<NodeView>> {
        self.node_index_to_node_view.get(&node_index)
    }

    pub(crate) fn by_name(&self, node_name: &str) -> Option<&Arc<NodeView>> {
        self.node_name_to_node_view.get(node_name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Arc<NodeView>> + '_ {
        self.node_index_to_node_view.values()
    }
}

/// Build one [`MaintenanceView`] per indexed maintenance, keyed by group id
///
/// Affected nodes are re-derived through the cross-index rather than read off
/// the raw definition. Nodes outside the view have no [`NodeView`] to join and
/// are left out of the node mapping.
pub(crate) fn build_maintenance_views(
    resolution: &ResolutionIndex,
    maintenances: &MaintenanceIndex,
    node_views: &NodeViewIndex,
) -> BTreeMap<String, MaintenanceView> {
    let mut views = BTreeMap::new();
    for (group_id, mnt) in maintenances.maintenances() {
        let mut node_index_to_node_view = BTreeMap::new();
        for ni in maintenances.node_indexes(group_id).unwrap_or_default() {
            match node_views.by_index(*ni) {
                Some(nv) => {
                    node_index_to_node_view.insert(*ni, nv.clone());
                }
                None => warn!(
                    "Maintenance {} affects N{} which has no node view",
                    group_id, ni
                ),
            }
        }

        let view = MaintenanceView::new(
            group_id.to_string(),
            mnt.clone(),
            affected_sequencer_node_indexes(mnt, resolution).into_iter().collect(),
            affected_storage_node_indexes(mnt, resolution).into_iter().collect(),
            node_index_to_node_view,
        );
        views.insert(group_id.to_string(), view);
    }

    debug!("Built {} maintenance views", views.len());
    views
}
