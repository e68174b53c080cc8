//! Core cluster identity and record types
//!
//! Provides the building blocks consumed by cluster tooling:
//! - Node identities and node configuration/state records
//! - Shard identities, including the "all shards" wildcard
//! - Maintenance definitions
//! - Stateless converters from operator-supplied strings

pub mod convert;
pub mod error;
pub mod location;
pub mod maintenance;
pub mod node;
pub mod shard;

// Re-export commonly used types
pub use convert::{to_replication, to_shard_id, to_storage_state};
pub use error::ParseError;
pub use location::{LocationScope, ReplicationProperty};
pub use maintenance::{MaintenanceDefinition, MaintenanceProgress};
pub use node::{
    NodeConfig, NodeId, NodeIndex, NodeRole, NodeState, SequencerConfig, SequencingState,
    ShardDataHealth, ShardOperationalState, ShardState, ShardStorageState, StorageConfig,
};
pub use shard::{ShardId, ShardIndex, ALL_SHARDS};
