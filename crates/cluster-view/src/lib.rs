//! Cluster View - read-only model of a storage cluster snapshot
//!
//! Answers "what do we know about node X / shard X / maintenance X, and how
//! are they related?" from one immutable snapshot.
//!
//! # Features
//! - Node lookup by index, by name, or both with consistency checks
//! - Node and maintenance cross-indexing
//! - Wildcard shard expansion against per-node shard counts
//! - Multi-criteria maintenance search
//!
//! # Usage Example
//! ```ignore
//! use cluster_view::{ClusterView, MaintenanceSearch, SnapshotFile};
//!
//! let snapshot = SnapshotFile::new("snapshot.json").load().await?;
//! let view = ClusterView::from_snapshot(snapshot);
//! let drains = view.search_maintenances(&MaintenanceSearch::new().user("alice"))?;
//! ```

pub mod config;
pub mod error;
pub mod maintenance_view;
pub mod node_view;
pub mod render;
pub mod snapshot;
pub mod view;

// Re-export commonly used types
pub use config::{ConfigError, OutputFormat, ViewConfig};
pub use error::{ClusterViewError, Result};
pub use maintenance_view::MaintenanceView;
pub use node_view::NodeView;
pub use snapshot::{ClusterSnapshot, SnapshotError, SnapshotFile};
pub use view::{ClusterView, MaintenanceSearch, NodeLookup};
