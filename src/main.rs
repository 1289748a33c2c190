use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use verbena_engine::{Engine, RunMemory};
use verbena_graph::{Graph, GraphDef};
use verbena_nodes::default_registry;

/// Verbena - a node-graph workflow execution engine
#[derive(Parser)]
#[command(name = "verbena")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Execute a graph definition
  Run {
    /// Path to the graph definition (JSON)
    graph_file: PathBuf,

    /// Path to a JSON object seeding the run memory
    #[arg(long)]
    memory: Option<PathBuf>,
  },

  /// Build and linearize a graph definition without executing it
  Validate {
    /// Path to the graph definition (JSON)
    graph_file: PathBuf,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Run { graph_file, memory } => run(graph_file, memory),
    Commands::Validate { graph_file } => validate(graph_file),
  }
}

fn load_graph(graph_file: &PathBuf) -> Result<Graph> {
  let content = fs::read_to_string(graph_file)
    .with_context(|| format!("failed to read {}", graph_file.display()))?;
  let def: GraphDef = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse {}", graph_file.display()))?;
  Ok(Graph::build(&def)?)
}

fn run(graph_file: PathBuf, memory_file: Option<PathBuf>) -> Result<()> {
  let graph = load_graph(&graph_file)?;

  let mut memory = match memory_file {
    Some(path) => {
      let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
      let values: std::collections::HashMap<String, serde_json::Value> =
        serde_json::from_str(&content)
          .with_context(|| format!("failed to parse {}", path.display()))?;
      RunMemory::from(values)
    }
    None => RunMemory::new(),
  };

  let engine = Engine::new(default_registry());
  let report = engine.run(&graph, &mut memory)?;

  let output = serde_json::json!({
    "run_id": report.run_id,
    "visits": report.visits,
    "results": report.results,
    "memory": memory,
  });
  println!("{}", serde_json::to_string_pretty(&output)?);

  Ok(())
}

fn validate(graph_file: PathBuf) -> Result<()> {
  let graph = load_graph(&graph_file)?;
  let engine = Engine::new(default_registry());
  let order = engine.linear_order(&graph)?;

  println!(
    "{}",
    serde_json::to_string_pretty(&serde_json::json!({
      "nodes": graph.len(),
      "linear_order": order.as_slice(),
    }))?
  );

  Ok(())
}
