//! Maintenance definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::node::{NodeId, SequencingState, ShardOperationalState};
use crate::shard::ShardId;

/// Overall progress of a maintenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceProgress {
    Unknown,
    /// Waiting for safety checks to pass
    BlockedUntilSafe,
    InProgress,
    Completed,
}

impl Default for MaintenanceProgress {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for MaintenanceProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceProgress::Unknown => write!(f, "unknown"),
            MaintenanceProgress::BlockedUntilSafe => write!(f, "blocked_until_safe"),
            MaintenanceProgress::InProgress => write!(f, "in_progress"),
            MaintenanceProgress::Completed => write!(f, "completed"),
        }
    }
}

/// Operator-declared intent to change the state of shards and sequencers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceDefinition {
    /// Maintenance group identifier, assigned by the admin service
    #[serde(default)]
    pub group_id: Option<String>,
    /// Shards affected by this maintenance
    #[serde(default)]
    pub shards: Vec<ShardId>,
    /// Target operational state for `shards`
    #[serde(default)]
    pub shard_target_state: ShardOperationalState,
    /// Sequencer nodes affected by this maintenance
    #[serde(default)]
    pub sequencer_nodes: Vec<NodeId>,
    /// Target sequencing state for `sequencer_nodes`
    #[serde(default)]
    pub sequencer_target_state: SequencingState,
    pub user: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub skip_safety_checks: bool,
    #[serde(default)]
    pub force_restore_rebuilding: bool,
    #[serde(default)]
    pub allow_passive_drains: bool,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress: MaintenanceProgress,
}

impl MaintenanceDefinition {
    /// Create a maintenance with no shards or sequencers
    pub fn new(group_id: Option<String>, user: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            group_id,
            shards: Vec::new(),
            shard_target_state: ShardOperationalState::default(),
            sequencer_nodes: Vec::new(),
            sequencer_target_state: SequencingState::default(),
            user: user.into(),
            reason: reason.into(),
            skip_safety_checks: false,
            force_restore_rebuilding: false,
            allow_passive_drains: false,
            created_on: None,
            expires_on: None,
            progress: MaintenanceProgress::default(),
        }
    }

    pub fn with_shards(mut self, shards: Vec<ShardId>, target: ShardOperationalState) -> Self {
        self.shards = shards;
        self.shard_target_state = target;
        self
    }

    pub fn with_sequencer_nodes(mut self, nodes: Vec<NodeId>, target: SequencingState) -> Self {
        self.sequencer_nodes = nodes;
        self.sequencer_target_state = target;
        self
    }

    pub fn with_progress(mut self, progress: MaintenanceProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Whether the maintenance has an expiry that lies before `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_on.map_or(false, |expires_on| expires_on <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        let mut mnt = MaintenanceDefinition::new(Some("g1".to_string()), "alice", "repair");
        assert!(!mnt.is_expired(now));

        mnt.expires_on = Some(now - Duration::seconds(1));
        assert!(mnt.is_expired(now));

        mnt.expires_on = Some(now + Duration::hours(1));
        assert!(!mnt.is_expired(now));
    }

    #[test]
    fn test_deserialize_minimal() {
        let mnt: MaintenanceDefinition =
            serde_json::from_str(r#"{"group_id": null, "user": "bob"}"#).unwrap();
        assert!(mnt.group_id.is_none());
        assert!(mnt.shards.is_empty());
        assert_eq!(mnt.progress, MaintenanceProgress::Unknown);
        assert_eq!(mnt.shard_target_state, ShardOperationalState::Unknown);
    }
}
