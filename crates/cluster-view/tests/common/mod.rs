// Shared snapshot fixture for integration tests

use cluster_view::ClusterSnapshot;

/// Six-node cluster: N0-N2 sequencers, N3-N5 storage with 4 shards each,
/// N6 configured but not yet reporting state
pub const SNAPSHOT_JSON: &str = r#"{
  "nodes_config": [
    {"node_index": 0, "name": "seq-0", "roles": ["SEQUENCER"], "sequencer": {"weight": 1.0}},
    {"node_index": 1, "name": "seq-1", "roles": ["SEQUENCER"], "sequencer": {"weight": 1.0}},
    {"node_index": 2, "name": "seq-2", "roles": ["SEQUENCER"], "sequencer": {"weight": 0.5}},
    {"node_index": 3, "name": "store-3", "data_address": "10.0.0.3:4440", "location": "r1.dc1.c1.row1.rack1",
     "roles": ["STORAGE"], "storage": {"num_shards": 4}},
    {"node_index": 4, "name": "store-4", "roles": ["STORAGE"], "storage": {"num_shards": 4}},
    {"node_index": 5, "name": "store-5", "roles": ["STORAGE", "SEQUENCER"], "sequencer": {"weight": 1.0},
     "storage": {"num_shards": 4}},
    {"node_index": 6, "name": "store-6", "roles": ["STORAGE"], "storage": {"num_shards": 4}}
  ],
  "nodes_state": [
    {"node_index": 0, "sequencing_state": "ENABLED"},
    {"node_index": 1, "sequencing_state": "DISABLED"},
    {"node_index": 2, "sequencing_state": "ENABLED"},
    {"node_index": 3, "shard_states": [
      {"data_health": "HEALTHY", "current_operational_state": "DRAINED", "storage_state": "NONE"},
      {"data_health": "HEALTHY", "current_operational_state": "DRAINED", "storage_state": "NONE"},
      {"data_health": "HEALTHY", "current_operational_state": "DRAINED", "storage_state": "NONE"},
      {"data_health": "HEALTHY", "current_operational_state": "DRAINED", "storage_state": "NONE"}
    ]},
    {"node_index": 4, "shard_states": [
      {"data_health": "HEALTHY", "current_operational_state": "ENABLED", "storage_state": "READ_WRITE"},
      {"data_health": "HEALTHY", "current_operational_state": "MIGRATING_DATA", "storage_state": "DATA_MIGRATION"},
      {"data_health": "HEALTHY", "current_operational_state": "ENABLED", "storage_state": "READ_WRITE"},
      {"data_health": "HEALTHY", "current_operational_state": "ENABLED", "storage_state": "READ_WRITE"}
    ]},
    {"node_index": 5, "sequencing_state": "ENABLED"}
  ],
  "maintenances": [
    {"group_id": "drain-store-3", "user": "alice", "reason": "disk swap",
     "shards": [{"node": {"node_index": 3}, "shard_index": -1}],
     "shard_target_state": "DRAINED", "progress": "COMPLETED",
     "created_on": "2024-05-01T10:00:00Z"},
    {"group_id": "disable-seq-1", "user": "bob", "reason": "kernel upgrade",
     "sequencer_nodes": [{"name": "seq-1"}], "sequencer_target_state": "DISABLED",
     "progress": "COMPLETED"},
    {"group_id": "10", "user": "alice", "reason": "disk swap",
     "shards": [{"node": {"node_index": 4}, "shard_index": 1}],
     "shard_target_state": "DRAINED", "progress": "IN_PROGRESS", "allow_passive_drains": true},
    {"group_id": "9", "user": "carol", "reason": "rack move",
     "shards": [{"node": {"name": "store-5"}, "shard_index": -1}],
     "shard_target_state": "MAY_DISAPPEAR",
     "sequencer_nodes": [{"node_index": 5}], "sequencer_target_state": "DISABLED",
     "progress": "BLOCKED_UNTIL_SAFE", "skip_safety_checks": true},
    {"group_id": null, "user": "ghost", "reason": "never persisted",
     "shards": [{"node": {"node_index": 4}, "shard_index": 0}]}
  ]
}"#;

pub fn snapshot() -> ClusterSnapshot {
    ClusterSnapshot::from_json(SNAPSHOT_JSON).expect("fixture snapshot must parse")
}
