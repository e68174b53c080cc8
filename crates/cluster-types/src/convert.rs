//! Conversion helpers for operator-supplied strings
//!
//! Stateless converters used by command-line tooling to turn shard literals,
//! storage state names and replication maps into typed values.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use crate::error::ParseError;
use crate::location::{LocationScope, ReplicationProperty};
use crate::node::{NodeId, NodeIndex, ShardStorageState};
use crate::shard::{ShardId, ShardIndex, ALL_SHARDS};

/// Shard or node literal: a node index with an optional shard index.
/// Examples: `N0`, `N1:S5`
static SHARD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^N(?P<node_index>[0-9]+)(:S(?P<shard_index>[0-9]+))?$")
        .expect("shard pattern is a valid regex")
});

/// Parse an `Nx:Sy` literal into a [`ShardId`]
///
/// Matching is case-insensitive. The `:Sy` part is optional; when absent the
/// shard index is [`ALL_SHARDS`].
pub fn to_shard_id(scope: &str) -> Result<ShardId, ParseError> {
    let scope = scope.to_uppercase();
    if scope.is_empty() {
        return Err(ParseError::Empty("scope"));
    }
    let captures = SHARD_PATTERN
        .captures(&scope)
        .ok_or_else(|| ParseError::InvalidShard(scope.clone()))?;

    let node_index: NodeIndex = captures["node_index"]
        .parse()
        .map_err(|_| ParseError::InvalidShard(scope.clone()))?;
    let shard_index: ShardIndex = match captures.name("shard_index") {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| ParseError::InvalidShard(scope.clone()))?,
        None => ALL_SHARDS,
    };

    Ok(ShardId::new(NodeId::from_index(node_index), shard_index))
}

/// Parse a storage state name, ignoring case and treating `-` as `_`
///
/// E.g. `read-only`, `read_only`, `READ_ONLY` and `READ-ONLY` are all valid.
pub fn to_storage_state(raw_state: &str) -> Result<ShardStorageState, ParseError> {
    let normal_state = raw_state.to_uppercase().replace('-', "_");
    if normal_state.is_empty() {
        return Err(ParseError::Empty("storage-state"));
    }
    normal_state.parse()
}

/// Convert a map like `{"rack": 3, "node": 2}` into a [`ReplicationProperty`]
///
/// Scope names are case-insensitive. `None` passes through as `None`.
pub fn to_replication(
    raw_repl: Option<&HashMap<String, u32>>,
) -> Result<Option<ReplicationProperty>, ParseError> {
    let Some(raw_repl) = raw_repl else {
        return Ok(None);
    };

    let mut res = BTreeMap::new();
    for (scope, value) in raw_repl {
        let scope: LocationScope = scope.to_uppercase().parse()?;
        res.insert(scope, *value);
    }
    Ok(Some(ReplicationProperty::new(res)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_shard_id() {
        let shard = to_shard_id("N1:S5").unwrap();
        assert_eq!(shard.node.node_index, Some(1));
        assert_eq!(shard.shard_index, 5);

        let shard = to_shard_id("n12:s0").unwrap();
        assert_eq!(shard.node.node_index, Some(12));
        assert_eq!(shard.shard_index, 0);

        let shard = to_shard_id("N3").unwrap();
        assert_eq!(shard.node, NodeId::from_index(3));
        assert_eq!(shard.shard_index, ALL_SHARDS);
    }

    #[test]
    fn test_to_shard_id_invalid() {
        assert_eq!(to_shard_id(""), Err(ParseError::Empty("scope")));
        assert!(matches!(to_shard_id("S1"), Err(ParseError::InvalidShard(_))));
        assert!(matches!(to_shard_id("N1:"), Err(ParseError::InvalidShard(_))));
        assert!(matches!(to_shard_id("N1:S2x"), Err(ParseError::InvalidShard(_))));
        assert!(matches!(to_shard_id(" N1"), Err(ParseError::InvalidShard(_))));
        assert!(matches!(
            to_shard_id("N99999999999"),
            Err(ParseError::InvalidShard(_))
        ));
    }

    #[test]
    fn test_to_storage_state() {
        for raw in ["read-only", "read_only", "READ_ONLY", "READ-ONLY", "Read-Only"] {
            assert_eq!(to_storage_state(raw).unwrap(), ShardStorageState::ReadOnly);
        }
        assert_eq!(
            to_storage_state("data-migration").unwrap(),
            ShardStorageState::DataMigration
        );
        assert_eq!(to_storage_state("none").unwrap(), ShardStorageState::None);
        assert_eq!(to_storage_state(""), Err(ParseError::Empty("storage-state")));
        assert!(matches!(
            to_storage_state("writable"),
            Err(ParseError::UnknownStorageState(_))
        ));
    }

    #[test]
    fn test_to_replication() {
        assert_eq!(to_replication(None).unwrap(), None);

        let raw: HashMap<String, u32> =
            [("rack".to_string(), 3), ("Node".to_string(), 2)].into_iter().collect();
        let repl = to_replication(Some(&raw)).unwrap().unwrap();
        assert_eq!(repl.len(), 2);
        assert_eq!(repl.get(LocationScope::Rack), Some(3));
        assert_eq!(repl.get(LocationScope::Node), Some(2));
        assert_eq!(repl.get(LocationScope::Region), None);

        let raw: HashMap<String, u32> = [("galaxy".to_string(), 1)].into_iter().collect();
        assert!(matches!(
            to_replication(Some(&raw)),
            Err(ParseError::UnknownLocationScope(_))
        ));
    }
}
