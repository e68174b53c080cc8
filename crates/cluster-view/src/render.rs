//! Text and JSON rendering of query results

use serde::Serialize;

use crate::maintenance_view::MaintenanceView;
use crate::node_view::NodeView;

fn join<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    let parts: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(",")
    }
}

/// One tab-separated line describing a node
pub fn node_line(nv: &NodeView) -> String {
    format!(
        "N{}\t{}\troles={}\tshards={}\tmaintenances={}",
        nv.node_index(),
        nv.node_name(),
        join(nv.roles()),
        nv.num_shards(),
        join(nv.maintenances().iter().filter_map(|m| m.group_id.as_deref())),
    )
}

/// One tab-separated line describing a maintenance
pub fn maintenance_line(mv: &MaintenanceView) -> String {
    format!(
        "{}\tuser={}\tprogress={}\tshards={}\tsequencers={}\tnodes={}",
        mv.group_id(),
        mv.user(),
        mv.progress(),
        join(mv.shards()),
        join(mv.sequencer_nodes()),
        join(mv.affected_node_indexes().iter().map(|ni| format!("N{}", ni))),
    )
}

pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
