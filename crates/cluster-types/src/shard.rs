//! Shard identity
//!
//! A shard is addressed by the node hosting it plus a shard index on that
//! node. The index may be the [`ALL_SHARDS`] wildcard.

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Shard index on a storage node
pub type ShardIndex = i32;

/// Wildcard shard index meaning "every shard of the node"
pub const ALL_SHARDS: ShardIndex = -1;

/// Shard identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShardId {
    /// Node hosting the shard
    pub node: NodeId,
    /// Shard index, or [`ALL_SHARDS`]
    pub shard_index: ShardIndex,
}

impl ShardId {
    pub fn new(node: NodeId, shard_index: ShardIndex) -> Self {
        Self { node, shard_index }
    }

    /// Wildcard shard covering every shard of `node`
    pub fn all(node: NodeId) -> Self {
        Self {
            node,
            shard_index: ALL_SHARDS,
        }
    }

    pub fn is_all_shards(&self) -> bool {
        self.shard_index == ALL_SHARDS
    }
}

impl std::fmt::Display for ShardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_all_shards() {
            write!(f, "{}", self.node)
        } else {
            write!(f, "{}:S{}", self.node, self.shard_index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_id_display() {
        assert_eq!(ShardId::new(NodeId::from_index(3), 5).to_string(), "N3:S5");
        assert_eq!(ShardId::all(NodeId::from_index(3)).to_string(), "N3");
    }

    #[test]
    fn test_shard_id_wildcard() {
        assert!(ShardId::all(NodeId::from_index(0)).is_all_shards());
        assert!(!ShardId::new(NodeId::from_index(0), 0).is_all_shards());
    }
}
