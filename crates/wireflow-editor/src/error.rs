use thiserror::Error;
use wireflow_workflow::WorkflowError;

#[derive(Debug, Error)]
pub enum EditorError {
  #[error("node not found: {0}")]
  NodeNotFound(String),

  /// The patch was not an object, or the merged config no longer matches
  /// the node's type.
  #[error("invalid config patch for node '{node_id}': {message}")]
  InvalidConfigPatch { node_id: String, message: String },

  /// A run was requested while another one is still dispatching or
  /// reconciling.
  #[error("a workflow run is already in progress")]
  RunInProgress,

  #[error("no workflow run is in progress")]
  NoActiveRun,

  #[error(transparent)]
  Workflow(#[from] WorkflowError),
}
