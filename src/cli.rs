use crate::analysis::CycleMode;
use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modgraph")]
#[command(about = "Map module dependencies, cycles and file roles in a JS/TS source tree")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Used when no subcommand is given
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze a source tree and write the three report files (default)
    Analyze(AnalyzeArgs),

    /// Generate a starter .modgraph.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Root directory to scan
    #[arg(default_value = "src")]
    pub path: PathBuf,

    /// Directory the reports are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Config file (defaults to .modgraph.toml in the scanned root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stop after this many files and mark the report as truncated
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Maximum diagram edges drawn per file
    #[arg(long)]
    pub max_edges_per_node: Option<usize>,

    /// Maximum diagram edges overall
    #[arg(long)]
    pub max_edges: Option<usize>,

    /// Cycle reporting: back-edge (one per DFS back edge) or scc (one per component)
    #[arg(long, default_value = "back-edge")]
    pub cycle_mode: CycleMode,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("src"),
            out_dir: PathBuf::from("."),
            config: None,
            max_nodes: None,
            max_edges_per_node: None,
            max_edges: None,
            cycle_mode: CycleMode::BackEdge,
            quiet: false,
        }
    }
}

impl AnalyzeArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_nodes) = self.max_nodes {
            config.scan.max_nodes = max_nodes;
        }
        if let Some(per_node) = self.max_edges_per_node {
            config.diagram.max_edges_per_node = per_node;
        }
        if let Some(max_edges) = self.max_edges {
            config.diagram.max_edges = max_edges;
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory where to create .modgraph.toml
    #[arg(default_value = ".")]
    pub path: PathBuf,
}
