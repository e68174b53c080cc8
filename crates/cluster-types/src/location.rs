//! Location scopes and replication properties

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ParseError;

/// Failure domain scope, from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationScope {
    Node,
    Rack,
    Row,
    Cluster,
    DataCenter,
    Region,
    Root,
}

impl FromStr for LocationScope {
    type Err = ParseError;

    /// Parses the upper-case enumeration name, e.g. `DATA_CENTER`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NODE" => Ok(Self::Node),
            "RACK" => Ok(Self::Rack),
            "ROW" => Ok(Self::Row),
            "CLUSTER" => Ok(Self::Cluster),
            "DATA_CENTER" => Ok(Self::DataCenter),
            "REGION" => Ok(Self::Region),
            "ROOT" => Ok(Self::Root),
            _ => Err(ParseError::UnknownLocationScope(s.to_string())),
        }
    }
}

impl std::fmt::Display for LocationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationScope::Node => write!(f, "node"),
            LocationScope::Rack => write!(f, "rack"),
            LocationScope::Row => write!(f, "row"),
            LocationScope::Cluster => write!(f, "cluster"),
            LocationScope::DataCenter => write!(f, "data_center"),
            LocationScope::Region => write!(f, "region"),
            LocationScope::Root => write!(f, "root"),
        }
    }
}

/// Replication requirement: number of copies per failure domain scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationProperty(pub BTreeMap<LocationScope, u32>);

impl ReplicationProperty {
    pub fn new(scopes: BTreeMap<LocationScope, u32>) -> Self {
        Self(scopes)
    }

    pub fn get(&self, scope: LocationScope) -> Option<u32> {
        self.0.get(&scope).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
