use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wireflow_client::{ClientConfig, Executor, HttpBackend};
use wireflow_config::{NodeKind, Position, Workflow};
use wireflow_editor::WorkflowEditor;
use wireflow_workflow::{analyze, export, read_from_file, write_to_dir};

/// Wireflow - build workflow graphs and run them on the workflow backend
#[derive(Parser)]
#[command(name = "wireflow")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory holding config.json (default: ~/.wireflow)
  #[arg(long, global = true, env = "WIREFLOW_DATA_DIR")]
  data_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Create an empty workflow file named after the workflow
  New {
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Directory to write the file into
    #[arg(long, default_value = ".")]
    dir: PathBuf,
  },

  /// Validate a workflow file and print a summary of its graph
  Inspect { workflow_file: PathBuf },

  /// Edit the nodes of a workflow file
  Node {
    #[command(subcommand)]
    action: NodeAction,
  },

  /// Connect two nodes of a workflow file
  Connect {
    workflow_file: PathBuf,
    from: String,
    to: String,
  },

  /// Execute a workflow on the backend and print per-node results
  Run {
    workflow_file: PathBuf,
    #[command(flatten)]
    backend: BackendArgs,
  },

  /// Save a workflow to the backend
  Save {
    workflow_file: PathBuf,
    #[command(flatten)]
    backend: BackendArgs,
  },
}

#[derive(Subcommand)]
enum NodeAction {
  /// Add a node of the given type
  Add {
    workflow_file: PathBuf,
    /// One of: http, condition, loop, delay, script, parallel, data, webhook
    #[arg(long = "type")]
    kind: NodeKind,
    #[arg(long)]
    label: Option<String>,
    /// Canvas x position (random when omitted)
    #[arg(long, requires = "y")]
    x: Option<f64>,
    /// Canvas y position (random when omitted)
    #[arg(long, requires = "x")]
    y: Option<f64>,
  },

  /// Delete a node and its connections
  Delete { workflow_file: PathBuf, node_id: String },

  /// Move a node on the canvas
  Move {
    workflow_file: PathBuf,
    node_id: String,
    #[arg(long)]
    x: f64,
    #[arg(long)]
    y: f64,
  },

  /// Merge a JSON object into a node's config
  Config {
    workflow_file: PathBuf,
    node_id: String,
    /// JSON object, e.g. '{"url": "https://example.com"}'
    patch: String,
  },
}

/// Backend settings; flags and environment override the config file.
#[derive(Args)]
struct BackendArgs {
  #[arg(long, env = "WIREFLOW_API_URL")]
  api_url: Option<String>,
  #[arg(long, env = "WIREFLOW_PROJECT_ID")]
  project_id: Option<String>,
  #[arg(long, env = "WIREFLOW_API_TOKEN", hide_env_values = true)]
  api_token: Option<String>,
  #[arg(long)]
  timeout_ms: Option<u64>,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let data_dir = match cli.data_dir {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".wireflow"),
  };

  let rt = tokio::runtime::Runtime::new()?;
  match cli.command {
    Some(command) => rt.block_on(run_command(command, data_dir)),
    None => {
      println!("wireflow - use --help to see available commands");
      Ok(())
    }
  }
}

async fn run_command(command: Commands, data_dir: PathBuf) -> Result<()> {
  match command {
    Commands::New {
      name,
      description,
      dir,
    } => {
      let workflow = Workflow {
        description,
        ..Workflow::new(name)
      };
      let path = write_to_dir(&dir, &workflow)
        .await
        .with_context(|| format!("failed to write workflow into {}", dir.display()))?;
      println!("{}", path.display());
    }
    Commands::Inspect { workflow_file } => {
      let workflow = load(&workflow_file).await?;
      inspect(&workflow)?;
    }
    Commands::Node { action } => edit_node(action).await?,
    Commands::Connect {
      workflow_file,
      from,
      to,
    } => {
      let mut editor = WorkflowEditor::from_workflow(load(&workflow_file).await?);
      if !editor.begin_connection(&from) {
        bail!("node '{}' not found", from);
      }
      let connection_id = editor
        .complete_connection(&to)
        .with_context(|| format!("cannot connect '{}' to '{}'", from, to))?;
      store(&workflow_file, editor.workflow()).await?;
      println!("{}", connection_id);
    }
    Commands::Run {
      workflow_file,
      backend,
    } => run_workflow(&workflow_file, backend, &data_dir).await?,
    Commands::Save {
      workflow_file,
      backend,
    } => {
      let (executor, editor) = connect(&workflow_file, backend, &data_dir).await?;
      let saved = executor
        .save(&editor)
        .await
        .context("failed to save workflow")?;
      println!("{}", serde_json::to_string_pretty(&saved)?);
    }
  }

  Ok(())
}

async fn edit_node(action: NodeAction) -> Result<()> {
  match action {
    NodeAction::Add {
      workflow_file,
      kind,
      label,
      x,
      y,
    } => {
      let mut editor = WorkflowEditor::from_workflow(load(&workflow_file).await?);
      let node_id = match (x, y) {
        (Some(x), Some(y)) => editor.add_node_at(kind, Position::new(x, y)),
        _ => editor.add_node(kind),
      };
      if let Some(label) = label {
        editor.update_node_label(&node_id, label)?;
      }
      store(&workflow_file, editor.workflow()).await?;
      println!("{}", node_id);
    }
    NodeAction::Delete {
      workflow_file,
      node_id,
    } => {
      let mut editor = WorkflowEditor::from_workflow(load(&workflow_file).await?);
      if !editor.delete_node(&node_id) {
        bail!("node '{}' not found", node_id);
      }
      store(&workflow_file, editor.workflow()).await?;
    }
    NodeAction::Move {
      workflow_file,
      node_id,
      x,
      y,
    } => {
      let mut editor = WorkflowEditor::from_workflow(load(&workflow_file).await?);
      if !editor.move_node(&node_id, Position::new(x, y)) {
        bail!("node '{}' not found", node_id);
      }
      store(&workflow_file, editor.workflow()).await?;
    }
    NodeAction::Config {
      workflow_file,
      node_id,
      patch,
    } => {
      let patch: serde_json::Value =
        serde_json::from_str(&patch).context("failed to parse config patch JSON")?;
      let mut editor = WorkflowEditor::from_workflow(load(&workflow_file).await?);
      editor.update_node_config(&node_id, &patch)?;
      store(&workflow_file, editor.workflow()).await?;
    }
  }

  Ok(())
}

async fn run_workflow(
  workflow_file: &Path,
  backend: BackendArgs,
  data_dir: &Path,
) -> Result<()> {
  let (executor, editor) = connect(workflow_file, backend, data_dir).await?;

  let cancel = CancellationToken::new();
  let ctrl_c = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      ctrl_c.cancel();
    }
  });

  let summary = executor
    .run(&editor, cancel)
    .await
    .context("workflow run failed")?;
  eprintln!(
    "Run finished: {} succeeded, {} failed, {} without result",
    summary.succeeded, summary.failed, summary.missing
  );

  let editor = editor.lock().await;
  let output: serde_json::Map<String, serde_json::Value> = editor
    .workflow()
    .nodes
    .iter()
    .map(|node| {
      let result = editor.node_result(&node.id);
      (
        node.id.clone(),
        serde_json::json!({
          "label": node.label,
          "status": node.status,
          "error": result.and_then(|r| r.error.clone()),
          "data": result.and_then(|r| r.data.clone()),
        }),
      )
    })
    .collect();
  println!("{}", serde_json::to_string_pretty(&output)?);

  Ok(())
}

/// Load the workflow and build an executor from config file, env and flags.
async fn connect(
  workflow_file: &Path,
  args: BackendArgs,
  data_dir: &Path,
) -> Result<(Executor<HttpBackend>, Arc<Mutex<WorkflowEditor>>)> {
  let config_path = data_dir.join("config.json");
  let mut config = ClientConfig::load(&config_path)
    .await
    .with_context(|| format!("failed to load config: {}", config_path.display()))?;

  if let Some(api_url) = args.api_url {
    config.api_url = api_url;
  }
  if args.project_id.is_some() {
    config.project_id = args.project_id;
  }
  if args.api_token.is_some() {
    config.api_token = args.api_token;
  }
  if args.timeout_ms.is_some() {
    config.timeout_ms = args.timeout_ms;
  }

  let project_id = config
    .project_id
    .clone()
    .context("no project id: pass --project-id or set it in config.json")?;
  let backend = HttpBackend::new(&config).context("failed to create backend client")?;

  info!(api_url = %config.api_url, project_id = %project_id, "using backend");

  let workflow = load(workflow_file).await?;
  let editor = Arc::new(Mutex::new(WorkflowEditor::from_workflow(workflow)));
  Ok((Executor::new(backend, project_id), editor))
}

fn inspect(workflow: &Workflow) -> Result<()> {
  let topology = analyze(workflow);

  let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
  for node in &workflow.nodes {
    *kinds.entry(node.kind().as_str()).or_default() += 1;
  }

  let summary = serde_json::json!({
    "name": workflow.name,
    "description": workflow.description,
    "nodes": workflow.nodes.len(),
    "connections": workflow.connections.len(),
    "variables": workflow.variables.keys().collect::<Vec<_>>(),
    "node_types": kinds,
    "entry_points": topology.entry_points,
    "join_points": topology.join_points,
    "has_cycle": topology.has_cycle,
  });
  println!("{}", serde_json::to_string_pretty(&summary)?);

  Ok(())
}

async fn load(workflow_file: &Path) -> Result<Workflow> {
  read_from_file(workflow_file)
    .await
    .with_context(|| format!("failed to load workflow file: {}", workflow_file.display()))
}

async fn store(workflow_file: &Path, workflow: &Workflow) -> Result<()> {
  let document = export(workflow)?;
  tokio::fs::write(workflow_file, document)
    .await
    .with_context(|| format!("failed to write workflow file: {}", workflow_file.display()))
}
