//! Cluster snapshot files
//!
//! A snapshot bundles node configs, node states and maintenance definitions
//! captured at one point in time. Snapshots are stored as JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use cluster_types::{MaintenanceDefinition, NodeConfig, NodeState};

/// Snapshot error
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("File not found: {0}")]
    NotFound(PathBuf),
}

/// Point-in-time capture of cluster configuration, state and maintenances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub nodes_config: Vec<NodeConfig>,
    #[serde(default)]
    pub nodes_state: Vec<NodeState>,
    #[serde(default)]
    pub maintenances: Vec<MaintenanceDefinition>,
}

impl ClusterSnapshot {
    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(content).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }
}

/// JSON file holding a [`ClusterSnapshot`]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot
    pub async fn load(&self) -> Result<ClusterSnapshot, SnapshotError> {
        if !self.path.exists() {
            return Err(SnapshotError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).await?;
        let snapshot = ClusterSnapshot::from_json(&content)?;

        info!(
            "Loaded cluster snapshot: {} node configs, {} node states, {} maintenances",
            snapshot.nodes_config.len(),
            snapshot.nodes_state.len(),
            snapshot.maintenances.len()
        );

        Ok(snapshot)
    }

    /// Save the snapshot
    pub async fn save(&self, snapshot: &ClusterSnapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Write to temp file first, then atomically rename
        let temp_path = self.path.with_extension("json.tmp");
        let content = snapshot.to_json()?;

        fs::write(&temp_path, &content).await?;
        fs::rename(&temp_path, &self.path).await?;

        info!("Saved cluster snapshot to {:?}", self.path);

        Ok(())
    }
}
