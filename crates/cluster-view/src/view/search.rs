//! Shard expansion and maintenance search

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use cluster_types::{
    MaintenanceProgress, NodeId, NodeIndex, SequencingState, ShardId, ShardIndex, ShardOperationalState,
};

use super::{ClusterView, NodeLookup};
use crate::error::Result;
use crate::maintenance_view::MaintenanceView;

/// Criteria for [`ClusterView::search_maintenances`]
///
/// Every criterion that is set narrows the result further. An empty search
/// matches every maintenance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceSearch {
    /// Matches as both sequencer nodes and "all shards" of each node
    pub node_ids: Option<Vec<NodeId>>,
    /// Exact shard footprint, compared after expansion
    pub shards: Option<Vec<ShardId>>,
    pub shard_target_state: Option<ShardOperationalState>,
    /// Exact set of sequencer nodes, duplicates ignored
    pub sequencer_nodes: Option<Vec<NodeId>>,
    pub sequencer_target_state: Option<SequencingState>,
    pub user: Option<String>,
    pub reason: Option<String>,
    pub skip_safety_checks: Option<bool>,
    pub force_restore_rebuilding: Option<bool>,
    pub allow_passive_drains: Option<bool>,
    pub group_id: Option<String>,
    pub progress: Option<MaintenanceProgress>,
}

impl MaintenanceSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_ids(mut self, node_ids: Vec<NodeId>) -> Self {
        self.node_ids = Some(node_ids);
        self
    }

    pub fn shards(mut self, shards: Vec<ShardId>) -> Self {
        self.shards = Some(shards);
        self
    }

    pub fn shard_target_state(mut self, state: ShardOperationalState) -> Self {
        self.shard_target_state = Some(state);
        self
    }

    /// Duplicates, including nodes also given in `node_ids`, collapse into one
    pub fn sequencer_nodes(mut self, nodes: Vec<NodeId>) -> Self {
        self.sequencer_nodes = Some(nodes);
        self
    }

    pub fn sequencer_target_state(mut self, state: SequencingState) -> Self {
        self.sequencer_target_state = Some(state);
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn skip_safety_checks(mut self, value: bool) -> Self {
        self.skip_safety_checks = Some(value);
        self
    }

    pub fn force_restore_rebuilding(mut self, value: bool) -> Self {
        self.force_restore_rebuilding = Some(value);
        self
    }

    pub fn allow_passive_drains(mut self, value: bool) -> Self {
        self.allow_passive_drains = Some(value);
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn progress(mut self, progress: MaintenanceProgress) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Keep the candidates matching `pred`
fn retain_matching<'v>(
    mvs: Vec<&'v MaintenanceView>,
    pred: impl Fn(&MaintenanceView) -> bool,
) -> Vec<&'v MaintenanceView> {
    mvs.into_iter().filter(|mv| pred(*mv)).collect()
}

impl ClusterView {
    /// Expand shards and nodes into a canonical, sorted list of concrete shards
    ///
    /// Each node in `node_ids` stands for all of its shards. Wildcard shards
    /// expand to `0..num_shards` of their node. Shards on non-storage nodes and
    /// shard indexes outside `0..num_shards` are dropped. The result is
    /// deduplicated and sorted by node index, then shard index, and every
    /// entry carries the canonical node identity.
    ///
    /// Fails only when a node cannot be resolved. Canonical ids of nodes
    /// shadowed by a duplicate name do not round-trip and fail with
    /// `IdentityConflict`.
    pub fn expand_shards(&self, shards: &[ShardId], node_ids: &[NodeId]) -> Result<Vec<ShardId>> {
        let wildcards: Vec<ShardId> = node_ids.iter().cloned().map(ShardId::all).collect();

        let mut ret: BTreeMap<(NodeIndex, ShardIndex), ShardId> = BTreeMap::new();
        for shard in shards.iter().chain(wildcards.iter()) {
            let node_view = self.get_node_view(shard.node.node_index, shard.node.name.as_deref())?;
            if !node_view.is_storage() {
                continue;
            }

            let num_shards = node_view.shard_index_bound();
            let range = if shard.is_all_shards() {
                0..num_shards
            } else if (0..num_shards).contains(&shard.shard_index) {
                shard.shard_index..shard.shard_index + 1
            } else {
                debug!("Dropping {}: node has {} shards", shard, num_shards);
                continue;
            };

            for shard_index in range {
                ret.entry((node_view.node_index(), shard_index))
                    .or_insert_with(|| ShardId::new(node_view.node_id().clone(), shard_index));
            }
        }

        Ok(ret.into_values().collect())
    }

    /// Maintenance views matching every criterion set in `search`
    ///
    /// Results keep the order of [`ClusterView::all_maintenance_views`]. No
    /// match is an empty result, not an error.
    pub fn search_maintenances(&self, search: &MaintenanceSearch) -> Result<Vec<&MaintenanceView>> {
        let mut mvs: Vec<&MaintenanceView> = self.all_maintenance_views().collect();

        let mut shards = search.shards.clone();
        let mut sequencer_nodes = search.sequencer_nodes.clone();
        if let Some(node_ids) = &search.node_ids {
            sequencer_nodes
                .get_or_insert_with(Vec::new)
                .extend(node_ids.iter().cloned());
            shards
                .get_or_insert_with(Vec::new)
                .extend(node_ids.iter().cloned().map(ShardId::all));
        }

        if let Some(shards) = &shards {
            let search_shards = self.expand_shards(shards, &[])?;
            let mut matching = Vec::with_capacity(mvs.len());
            for mv in mvs {
                if self.expand_shards(mv.shards(), &[])? == search_shards {
                    matching.push(mv);
                }
            }
            mvs = matching;
        }

        if let Some(state) = search.shard_target_state {
            mvs = retain_matching(mvs, |mv| mv.shard_target_state() == state);
        }

        if let Some(sequencer_nodes) = &sequencer_nodes {
            let normalized: BTreeSet<NodeIndex> = sequencer_nodes
                .iter()
                .map(|n| {
                    NodeLookup::from_node_id(n)
                        .and_then(|lookup| self.lookup_node(lookup))
                        .map(|nv| nv.node_index())
                })
                .collect::<Result<_>>()?;
            let normalized: Vec<NodeIndex> = normalized.into_iter().collect();
            mvs = retain_matching(mvs, |mv| mv.affected_sequencer_node_indexes() == normalized.as_slice());
        }

        if let Some(state) = search.sequencer_target_state {
            mvs = retain_matching(mvs, |mv| mv.sequencer_target_state() == state);
        }

        if let Some(user) = &search.user {
            mvs = retain_matching(mvs, |mv| mv.user() == user.as_str());
        }

        if let Some(reason) = &search.reason {
            mvs = retain_matching(mvs, |mv| mv.reason() == reason.as_str());
        }

        if let Some(value) = search.skip_safety_checks {
            mvs = retain_matching(mvs, |mv| mv.skip_safety_checks() == value);
        }

        if let Some(value) = search.force_restore_rebuilding {
            mvs = retain_matching(mvs, |mv| mv.force_restore_rebuilding() == value);
        }

        if let Some(value) = search.allow_passive_drains {
            mvs = retain_matching(mvs, |mv| mv.allow_passive_drains() == value);
        }

        if let Some(group_id) = &search.group_id {
            mvs = retain_matching(mvs, |mv| mv.group_id() == group_id.as_str());
        }

        if let Some(progress) = search.progress {
            mvs = retain_matching(mvs, |mv| mv.progress() == progress);
        }

        Ok(mvs)
    }
}
