//! Cluster view command-line entry point

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use cluster_types::{to_shard_id, NodeId, ShardId, ALL_SHARDS};
use cluster_view::render::{maintenance_line, node_line, to_json};
use cluster_view::{
    ClusterView, ClusterViewError, MaintenanceSearch, OutputFormat, SnapshotFile, ViewConfig,
};

/// Cluster View - query nodes, shards and maintenances in a cluster snapshot
#[derive(Parser, Debug)]
#[command(name = "cluster-view")]
#[command(about = "Query nodes, shards and maintenances of a cluster snapshot")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot file (overrides the configuration)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Log level (overrides the configuration)
    #[arg(long)]
    log_level: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every node
    Nodes,
    /// Show one node, by index (`3`, `N3`) or name
    Node { node: String },
    /// List every maintenance
    Maintenances {
        /// Hide maintenances past their expiry time
        #[arg(long)]
        active: bool,
    },
    /// Show one maintenance by group id
    Maintenance { group_id: String },
    /// Expand shard literals (`N1`, `N1:S2`) and nodes into concrete shards
    Expand {
        shards: Vec<String>,
        #[arg(long = "node")]
        nodes: Vec<String>,
    },
    /// Search maintenances; every given criterion must match
    Search {
        #[arg(long = "node")]
        nodes: Vec<String>,
        #[arg(long = "shard")]
        shards: Vec<String>,
        #[arg(long = "sequencer")]
        sequencers: Vec<String>,
        /// e.g. DRAINED, MAY_DISAPPEAR
        #[arg(long)]
        shard_target_state: Option<String>,
        /// e.g. DISABLED
        #[arg(long)]
        sequencer_target_state: Option<String>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        group_id: Option<String>,
        /// e.g. IN_PROGRESS, BLOCKED_UNTIL_SAFE
        #[arg(long)]
        progress: Option<String>,
        #[arg(long)]
        skip_safety_checks: Option<bool>,
        #[arg(long)]
        force_restore_rebuilding: Option<bool>,
        #[arg(long)]
        allow_passive_drains: Option<bool>,
    },
}

/// Node argument: a bare index, an `N<index>` literal, or a name
fn parse_node_id(raw: &str) -> NodeId {
    if let Ok(index) = raw.parse() {
        return NodeId::from_index(index);
    }
    match to_shard_id(raw) {
        Ok(shard) if shard.shard_index == ALL_SHARDS => shard.node,
        _ => NodeId::from_name(raw),
    }
}

/// Parse an upper-case enumeration name through its serde representation
fn parse_enum<T: DeserializeOwned>(raw: &str) -> anyhow::Result<T> {
    let normalized = raw.to_uppercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .with_context(|| format!("unknown value '{}'", raw))
}

fn parse_shards(raw: &[String]) -> cluster_view::Result<Vec<ShardId>> {
    raw.iter()
        .map(|s| to_shard_id(s).map_err(ClusterViewError::from))
        .collect()
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(view: &ClusterView, command: Command, json: bool, pretty: bool) -> anyhow::Result<()> {
    match command {
        Command::Nodes => {
            let nodes: Vec<_> = view.all_node_views().collect();
            if json {
                println!("{}", to_json(&nodes, pretty)?);
            } else {
                nodes.iter().for_each(|nv| println!("{}", node_line(nv)));
            }
        }
        Command::Node { node } => {
            let node_id = parse_node_id(&node);
            let nv = view.get_node_view(node_id.node_index, node_id.name.as_deref())?;
            if json {
                println!("{}", to_json(nv, pretty)?);
            } else {
                println!("{}", node_line(nv));
            }
        }
        Command::Maintenances { active } => {
            let now = Utc::now();
            let mvs: Vec<_> = view
                .all_maintenance_views()
                .filter(|mv| !active || !mv.maintenance().is_expired(now))
                .collect();
            if json {
                println!("{}", to_json(&mvs, pretty)?);
            } else {
                mvs.iter().for_each(|mv| println!("{}", maintenance_line(mv)));
            }
        }
        Command::Maintenance { group_id } => {
            let mv = view.get_maintenance_view_by_id(&group_id)?;
            if json {
                println!("{}", to_json(mv, pretty)?);
            } else {
                println!("{}", maintenance_line(mv));
            }
        }
        Command::Expand { shards, nodes } => {
            let shards = parse_shards(&shards)?;
            let nodes: Vec<NodeId> = nodes.iter().map(|n| parse_node_id(n)).collect();
            let expanded = view.expand_shards(&shards, &nodes)?;
            if json {
                println!("{}", to_json(&expanded, pretty)?);
            } else {
                expanded.iter().for_each(|s| println!("{}", s));
            }
        }
        Command::Search {
            nodes,
            shards,
            sequencers,
            shard_target_state,
            sequencer_target_state,
            user,
            reason,
            group_id,
            progress,
            skip_safety_checks,
            force_restore_rebuilding,
            allow_passive_drains,
        } => {
            let search = MaintenanceSearch {
                node_ids: non_empty(nodes.iter().map(|n| parse_node_id(n)).collect()),
                shards: non_empty(parse_shards(&shards)?),
                shard_target_state: shard_target_state.as_deref().map(parse_enum).transpose()?,
                sequencer_nodes: non_empty(sequencers.iter().map(|n| parse_node_id(n)).collect()),
                sequencer_target_state: sequencer_target_state
                    .as_deref()
                    .map(parse_enum)
                    .transpose()?,
                user,
                reason,
                skip_safety_checks,
                force_restore_rebuilding,
                allow_passive_drains,
                group_id,
                progress: progress.as_deref().map(parse_enum).transpose()?,
            };
            debug!("Searching maintenances: {:?}", search);

            let mvs = view.search_maintenances(&search)?;
            if json {
                println!("{}", to_json(&mvs, pretty)?);
            } else {
                mvs.iter().for_each(|mv| println!("{}", maintenance_line(mv)));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewConfig::from_file(path)?,
        None => ViewConfig::default(),
    };
    if let Some(snapshot) = args.snapshot {
        config.snapshot.path = snapshot;
    }
    if let Some(level) = args.log_level {
        config.log.level = level;
    }
    if args.json {
        config.output.format = OutputFormat::Json;
    }

    init_logging(&config.log.level)?;

    let snapshot_file = SnapshotFile::new(&config.snapshot.path);
    let snapshot = snapshot_file
        .load()
        .await
        .with_context(|| format!("failed to load snapshot {:?}", snapshot_file.path()))?;
    let view = ClusterView::from_snapshot(snapshot);
    if config.snapshot.eager {
        view.warm_up();
    }

    run(
        &view,
        args.command,
        config.output.format == OutputFormat::Json,
        config.output.pretty,
    )
}
