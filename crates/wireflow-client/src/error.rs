use thiserror::Error;
use wireflow_editor::EditorError;

/// Errors talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
  /// The request could not be sent or the connection failed.
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  /// The backend answered with a non-success status.
  #[error("backend returned {status}: {body}")]
  Status { status: u16, body: String },

  /// The response body was not the expected JSON.
  #[error("invalid response body: {0}")]
  Decode(#[source] serde_json::Error),

  #[error("invalid backend url: {0}")]
  InvalidUrl(#[from] url::ParseError),
}

/// Errors of a run or save driven by the [`Executor`](crate::Executor).
#[derive(Debug, Error)]
pub enum ExecutorError {
  /// The editor refused to start or finish the run.
  #[error("run rejected: {0}")]
  RunRejected(#[from] EditorError),

  /// The execute request failed. Node statuses were not changed.
  #[error("execution dispatch failed: {0}")]
  ExecutionDispatchFailed(#[source] BackendError),

  #[error("save failed: {0}")]
  SaveFailed(#[source] BackendError),

  #[error("execution cancelled")]
  Cancelled,
}

/// Errors loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid config file: {0}")]
  Parse(#[from] serde_json::Error),
}
