use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
  /// The document could not be parsed or failed structural validation.
  /// Callers treat every reason the same way; the detail is for messages.
  #[error("malformed workflow file: {0}")]
  MalformedWorkflowFile(#[from] MalformedReason),

  #[error("failed to serialize workflow: {0}")]
  Serialize(#[source] serde_json::Error),

  /// The workflow name does not make a plain file name inside the target
  /// directory.
  #[error("workflow name '{name}' cannot be used as a file name")]
  InvalidFileName { name: String },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Why a workflow document was rejected.
#[derive(Debug, Error)]
pub enum MalformedReason {
  #[error("invalid JSON: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("file is not valid UTF-8")]
  NotUtf8,

  #[error("duplicate node id: {node_id}")]
  DuplicateNodeId { node_id: String },

  #[error("duplicate connection id: {connection_id}")]
  DuplicateConnectionId { connection_id: String },

  #[error("connection '{connection_id}' references unknown node '{node_id}'")]
  DanglingConnection {
    connection_id: String,
    node_id: String,
  },

  #[error("connection '{connection_id}' connects node '{node_id}' to itself")]
  SelfLoop {
    connection_id: String,
    node_id: String,
  },

  #[error("node '{node_id}' has a non-finite position")]
  InvalidPosition { node_id: String },

  #[error("invalid config for node '{node_id}': {message}")]
  InvalidConfig { node_id: String, message: String },
}
