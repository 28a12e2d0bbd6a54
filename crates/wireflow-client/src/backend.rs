use async_trait::async_trait;
use wireflow_config::{ExecutionRequest, ExecutionResponse, SaveRequest, SavedWorkflow};

use crate::error::BackendError;

/// The workflow backend's API.
///
/// Implementations provide the transport (HTTP, in-process fakes for tests).
/// The backend evaluates the graph; this side only sends it and reads results.
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
  /// Execute a workflow. One request, one response; no progress streaming.
  async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResponse, BackendError>;

  /// Persist a workflow for a project.
  async fn save(&self, request: &SaveRequest) -> Result<SavedWorkflow, BackendError>;
}
