//! Cluster view errors

use cluster_types::{NodeIndex, ParseError};
use thiserror::Error;

/// Errors surfaced by [`crate::ClusterView`] lookups
///
/// All of them describe the caller's request against an immutable snapshot,
/// so none is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterViewError {
    /// No node with the requested index or name
    #[error("Node not found: {0}")]
    NodeNotFound(String),
    /// Index and name were both given but belong to different nodes
    #[error(
        "Node with node_name={node_name} and Node with node_index={node_index} are not the same node"
    )]
    IdentityConflict {
        node_index: NodeIndex,
        node_name: String,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// No maintenance with the requested group id
    #[error("Maintenance not found: {0}")]
    MaintenanceNotFound(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, ClusterViewError>;
