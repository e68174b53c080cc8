mod common;

use cluster_types::{
    to_shard_id, MaintenanceProgress, NodeId, SequencingState, ShardOperationalState,
};
use cluster_view::{ClusterView, ClusterViewError, MaintenanceSearch, MaintenanceView};

fn view() -> ClusterView {
    ClusterView::from_snapshot(common::snapshot())
}

fn group_ids(mvs: &[&MaintenanceView]) -> Vec<String> {
    mvs.iter().map(|mv| mv.group_id().to_string()).collect()
}

#[test]
fn test_node_without_state_is_excluded() {
    let view = view();
    assert_eq!(view.all_node_indexes().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    assert!(matches!(
        view.get_node_view(None, Some("store-6")),
        Err(ClusterViewError::NodeNotFound(_))
    ));
}

#[test]
fn test_maintenance_ids_sort_lexicographically() {
    let view = view();
    assert_eq!(
        view.all_maintenance_ids().collect::<Vec<_>>(),
        vec!["10", "9", "disable-seq-1", "drain-store-3"]
    );
}

#[test]
fn test_name_only_references_resolve() {
    let view = view();
    assert_eq!(view.get_node_indexes_by_maintenance_id("disable-seq-1").unwrap(), &[1]);
    assert_eq!(view.get_node_indexes_by_maintenance_id("9").unwrap(), &[5]);

    let ids: Vec<_> = view
        .get_node_maintenances_by_node_name("seq-1")
        .unwrap()
        .iter()
        .filter_map(|m| m.group_id.clone())
        .collect();
    assert_eq!(ids, vec!["disable-seq-1"]);
}

#[test]
fn test_unnamed_maintenance_does_not_touch_nodes() {
    let view = view();
    let ids: Vec<_> = view
        .get_node_maintenances_by_node_index(4)
        .unwrap()
        .iter()
        .filter_map(|m| m.group_id.clone())
        .collect();
    assert_eq!(ids, vec!["10"]);
}

#[test]
fn test_maintenance_view_progress() {
    let view = view();
    let drain = view.get_maintenance_view_by_id("drain-store-3").unwrap();
    assert!(drain.is_completed());
    assert!(drain.is_everything_done());
    assert!(drain.created_on().is_some());

    let partial = view.get_maintenance_view_by_id("10").unwrap();
    assert!(partial.is_in_progress());
    assert!(!partial.is_everything_done());
    assert_eq!(
        partial.shard_operational_states()[0].1,
        Some(ShardOperationalState::MigratingData)
    );

    let blocked = view.get_maintenance_view_by_id("9").unwrap();
    assert!(blocked.is_blocked());
    assert_eq!(blocked.affected_sequencer_node_indexes(), &[5]);
    assert_eq!(blocked.affected_storage_node_indexes(), &[5]);

    let disable = view.get_maintenance_view_by_id("disable-seq-1").unwrap();
    assert_eq!(
        disable.sequencer_states(),
        vec![(
            NodeId::new(Some(1), Some("seq-1".to_string())),
            Some(SequencingState::Disabled)
        )]
    );
    assert!(disable.is_everything_done());
}

#[test]
fn test_expand_from_literals() {
    let view = view();
    let shards = vec![to_shard_id("n3:s1").unwrap(), to_shard_id("N0").unwrap()];
    let expanded = view.expand_shards(&shards, &[NodeId::from_name("store-4")]).unwrap();
    let rendered: Vec<_> = expanded.iter().map(|s| s.to_string()).collect();
    assert_eq!(rendered, vec!["N3:S1", "N4:S0", "N4:S1", "N4:S2", "N4:S3"]);
}

#[test]
fn test_search_by_node_matches_storage_and_sequencer() {
    let view = view();
    let found = view
        .search_maintenances(&MaintenanceSearch::new().node_ids(vec![NodeId::from_index(5)]))
        .unwrap();
    assert_eq!(group_ids(&found), vec!["9"]);

    // Storage-only maintenance has no sequencers, so a node search cannot match it
    let found = view
        .search_maintenances(&MaintenanceSearch::new().node_ids(vec![NodeId::from_index(3)]))
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_search_shard_footprint_must_be_exact() {
    let view = view();
    let found = view
        .search_maintenances(&MaintenanceSearch::new().shards(vec![to_shard_id("N3:S0").unwrap()]))
        .unwrap();
    assert!(found.is_empty());

    let found = view
        .search_maintenances(&MaintenanceSearch::new().shards(vec![to_shard_id("N3").unwrap()]))
        .unwrap();
    assert_eq!(group_ids(&found), vec!["drain-store-3"]);
}

#[test]
fn test_search_combined_criteria() {
    let view = view();
    let found = view
        .search_maintenances(
            &MaintenanceSearch::new()
                .user("alice")
                .reason("disk swap")
                .shard_target_state(ShardOperationalState::Drained),
        )
        .unwrap();
    assert_eq!(group_ids(&found), vec!["10", "drain-store-3"]);

    let found = view
        .search_maintenances(
            &MaintenanceSearch::new()
                .user("alice")
                .progress(MaintenanceProgress::Completed),
        )
        .unwrap();
    assert_eq!(group_ids(&found), vec!["drain-store-3"]);
}
