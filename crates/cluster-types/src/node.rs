//! Node identity, configuration and runtime state definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::ParseError;

/// Numeric node index, unique within a cluster
pub type NodeIndex = u32;

/// Node identity
///
/// Any subset of the fields may be set. A fully populated identity is
/// obtained by resolving a partial one against a cluster view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    #[serde(default)]
    pub node_index: Option<NodeIndex>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl NodeId {
    pub fn new(node_index: Option<NodeIndex>, name: Option<String>) -> Self {
        Self {
            node_index,
            name,
            address: None,
        }
    }

    pub fn from_index(node_index: NodeIndex) -> Self {
        Self::new(Some(node_index), None)
    }

    pub fn from_name(name: impl Into<String>) -> Self {
        Self::new(None, Some(name.into()))
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.node_index, &self.name) {
            (Some(index), _) => write!(f, "N{}", index),
            (None, Some(name)) => write!(f, "{}", name),
            (None, None) => write!(f, "<unknown>"),
        }
    }
}

/// Role a node plays in the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeRole {
    Sequencer,
    Storage,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRole::Sequencer => write!(f, "sequencer"),
            NodeRole::Storage => write!(f, "storage"),
        }
    }
}

/// Storage membership state of a shard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShardStorageState {
    None,
    ReadOnly,
    ReadWrite,
    DataMigration,
    Provisioning,
}

impl Default for ShardStorageState {
    fn default() -> Self {
        Self::None
    }
}

impl FromStr for ShardStorageState {
    type Err = ParseError;

    /// Parses the upper-case enumeration name, e.g. `READ_ONLY`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(Self::None),
            "READ_ONLY" => Ok(Self::ReadOnly),
            "READ_WRITE" => Ok(Self::ReadWrite),
            "DATA_MIGRATION" => Ok(Self::DataMigration),
            "PROVISIONING" => Ok(Self::Provisioning),
            _ => Err(ParseError::UnknownStorageState(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShardStorageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShardStorageState::None => write!(f, "none"),
            ShardStorageState::ReadOnly => write!(f, "read_only"),
            ShardStorageState::ReadWrite => write!(f, "read_write"),
            ShardStorageState::DataMigration => write!(f, "data_migration"),
            ShardStorageState::Provisioning => write!(f, "provisioning"),
        }
    }
}

/// Operational state of a shard as reported by the admin service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShardOperationalState {
    Unknown,
    Enabled,
    MayDisappear,
    Drained,
    MigratingData,
    Enabling,
    Provisioning,
    PassiveDraining,
    Invalid,
}

impl Default for ShardOperationalState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for ShardOperationalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShardOperationalState::Unknown => write!(f, "unknown"),
            ShardOperationalState::Enabled => write!(f, "enabled"),
            ShardOperationalState::MayDisappear => write!(f, "may_disappear"),
            ShardOperationalState::Drained => write!(f, "drained"),
            ShardOperationalState::MigratingData => write!(f, "migrating_data"),
            ShardOperationalState::Enabling => write!(f, "enabling"),
            ShardOperationalState::Provisioning => write!(f, "provisioning"),
            ShardOperationalState::PassiveDraining => write!(f, "passive_draining"),
            ShardOperationalState::Invalid => write!(f, "invalid"),
        }
    }
}

/// Health of the data stored on a shard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShardDataHealth {
    Unknown,
    Healthy,
    Unavailable,
    Lost,
    Empty,
}

impl Default for ShardDataHealth {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for ShardDataHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShardDataHealth::Unknown => write!(f, "unknown"),
            ShardDataHealth::Healthy => write!(f, "healthy"),
            ShardDataHealth::Unavailable => write!(f, "unavailable"),
            ShardDataHealth::Lost => write!(f, "lost"),
            ShardDataHealth::Empty => write!(f, "empty"),
        }
    }
}

/// Sequencing state of a sequencer node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SequencingState {
    Unknown,
    Enabled,
    Boycotted,
    Disabled,
}

impl Default for SequencingState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for SequencingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequencingState::Unknown => write!(f, "unknown"),
            SequencingState::Enabled => write!(f, "enabled"),
            SequencingState::Boycotted => write!(f, "boycotted"),
            SequencingState::Disabled => write!(f, "disabled"),
        }
    }
}

/// Sequencer role configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Relative share of logs sequenced by this node
    pub weight: f64,
}

/// Storage role configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Relative share of data stored on this node
    #[serde(default = "default_storage_weight")]
    pub weight: f64,
    /// Number of shards on this node
    pub num_shards: u32,
}

fn default_storage_weight() -> f64 {
    1.0
}

/// Node configuration record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub node_index: NodeIndex,
    pub name: String,
    /// Data address (host:port)
    #[serde(default)]
    pub data_address: Option<String>,
    /// Location string, e.g. `region.dc.cluster.row.rack`
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub roles: BTreeSet<NodeRole>,
    #[serde(default)]
    pub sequencer: Option<SequencerConfig>,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
}

impl NodeConfig {
    pub fn new(node_index: NodeIndex, name: impl Into<String>) -> Self {
        Self {
            node_index,
            name: name.into(),
            data_address: None,
            location: None,
            roles: BTreeSet::new(),
            sequencer: None,
            storage: None,
        }
    }

    /// Add the sequencer role
    pub fn with_sequencer(mut self, weight: f64) -> Self {
        self.roles.insert(NodeRole::Sequencer);
        self.sequencer = Some(SequencerConfig { weight });
        self
    }

    /// Add the storage role with `num_shards` shards
    pub fn with_storage(mut self, num_shards: u32) -> Self {
        self.roles.insert(NodeRole::Storage);
        self.storage = Some(StorageConfig {
            weight: default_storage_weight(),
            num_shards,
        });
        self
    }

    pub fn with_data_address(mut self, data_address: impl Into<String>) -> Self {
        self.data_address = Some(data_address.into());
        self
    }

    pub fn is_sequencer(&self) -> bool {
        self.roles.contains(&NodeRole::Sequencer)
    }

    pub fn is_storage(&self) -> bool {
        self.roles.contains(&NodeRole::Storage)
    }

    /// Declared shard count, zero for non-storage nodes
    pub fn num_shards(&self) -> u32 {
        match &self.storage {
            Some(storage) if self.is_storage() => storage.num_shards,
            _ => 0,
        }
    }
}

/// Runtime state of a single shard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardState {
    #[serde(default)]
    pub data_health: ShardDataHealth,
    #[serde(default)]
    pub current_operational_state: ShardOperationalState,
    #[serde(default)]
    pub storage_state: ShardStorageState,
}

/// Node runtime state record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    pub node_index: NodeIndex,
    /// Present for sequencer nodes only
    #[serde(default)]
    pub sequencing_state: Option<SequencingState>,
    /// Indexed by shard index
    #[serde(default)]
    pub shard_states: Vec<ShardState>,
}

impl NodeState {
    pub fn new(node_index: NodeIndex) -> Self {
        Self {
            node_index,
            sequencing_state: None,
            shard_states: Vec::new(),
        }
    }

    pub fn with_sequencing_state(mut self, state: SequencingState) -> Self {
        self.sequencing_state = Some(state);
        self
    }

    pub fn with_shard_states(mut self, shard_states: Vec<ShardState>) -> Self {
        self.shard_states = shard_states;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::from_index(7).to_string(), "N7");
        assert_eq!(NodeId::from_name("host-a").to_string(), "host-a");
        assert_eq!(NodeId::default().to_string(), "<unknown>");
    }

    #[test]
    fn test_num_shards_requires_storage_role() {
        let storage = NodeConfig::new(0, "n0").with_storage(4);
        assert!(storage.is_storage());
        assert_eq!(storage.num_shards(), 4);

        let mut sequencer = NodeConfig::new(1, "n1").with_sequencer(1.0);
        sequencer.storage = Some(StorageConfig {
            weight: 1.0,
            num_shards: 4,
        });
        assert!(!sequencer.is_storage());
        assert_eq!(sequencer.num_shards(), 0);
    }

    #[test]
    fn test_node_config_deserialize_defaults() {
        let config: NodeConfig =
            serde_json::from_str(r#"{"node_index": 2, "name": "n2", "roles": ["STORAGE"], "storage": {"num_shards": 3}}"#)
                .unwrap();
        assert_eq!(config.node_index, 2);
        assert!(config.is_storage());
        assert_eq!(config.num_shards(), 3);
        assert_eq!(config.storage.unwrap().weight, 1.0);
        assert!(config.data_address.is_none());
    }
}
