use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use wireflow_config::{SaveRequest, SavedWorkflow};
use wireflow_editor::{ReconcileSummary, WorkflowEditor};

use crate::backend::WorkflowBackend;
use crate::error::ExecutorError;

/// An editor shared between the UI side and in-flight runs.
pub type SharedEditor = Arc<Mutex<WorkflowEditor>>;

/// Runs and saves the workflow of an editor against a backend.
pub struct Executor<B: WorkflowBackend> {
  backend: B,
  project_id: String,
}

impl<B: WorkflowBackend> Executor<B> {
  pub fn new(backend: B, project_id: impl Into<String>) -> Self {
    Self {
      backend,
      project_id: project_id.into(),
    }
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  pub fn project_id(&self) -> &str {
    &self.project_id
  }

  /// Execute the editor's workflow and reconcile the results onto its nodes.
  ///
  /// The editor is locked only to start and to finish the run, so it stays
  /// editable while the request is in flight. A run requested while another
  /// is outstanding fails with [`ExecutorError::RunRejected`]. On dispatch failure
  /// or cancellation the run is aborted and node statuses are left as they
  /// were. Dropping the returned future mid-flight aborts the run as well.
  pub async fn run(
    &self,
    editor: &SharedEditor,
    cancel: CancellationToken,
  ) -> Result<ReconcileSummary, ExecutorError> {
    let request = editor.lock().await.begin_run(self.project_id.as_str())?;
    let workflow_name = request.workflow.name.clone();
    let guard = RunGuard::new(editor);

    let outcome = tokio::select! {
      _ = cancel.cancelled() => None,
      result = self.backend.execute(&request) => Some(result),
    };

    let mut editor = editor.lock().await;
    guard.disarm();
    match outcome {
      Some(Ok(response)) => Ok(editor.complete_run(response)?),
      Some(Err(e)) => {
        error!(
          workflow = %workflow_name,
          error = %e,
          "workflow execution dispatch failed"
        );
        editor.abort_run(e.to_string())?;
        Err(ExecutorError::ExecutionDispatchFailed(e))
      }
      None => {
        info!(workflow = %workflow_name, "workflow execution cancelled");
        editor.abort_run("cancelled")?;
        Err(ExecutorError::Cancelled)
      }
    }
  }

  /// Persist the editor's current workflow.
  pub async fn save(&self, editor: &Mutex<WorkflowEditor>) -> Result<SavedWorkflow, ExecutorError> {
    let request = SaveRequest {
      workflow: editor.lock().await.workflow().clone(),
      project_id: self.project_id.clone(),
    };

    match self.backend.save(&request).await {
      Ok(saved) => {
        info!(
          workflow = %request.workflow.name,
          id = saved.id.as_deref().unwrap_or("-"),
          "workflow saved"
        );
        Ok(saved)
      }
      Err(e) => {
        error!(workflow = %request.workflow.name, error = %e, "workflow save failed");
        Err(ExecutorError::SaveFailed(e))
      }
    }
  }
}

/// Aborts a dispatched run when its future is dropped before finishing.
struct RunGuard<'a> {
  editor: &'a SharedEditor,
  armed: bool,
}

impl<'a> RunGuard<'a> {
  fn new(editor: &'a SharedEditor) -> Self {
    Self {
      editor,
      armed: true,
    }
  }

  /// Call with the editor locked, right before the run is closed.
  fn disarm(mut self) {
    self.armed = false;
  }
}

impl Drop for RunGuard<'_> {
  fn drop(&mut self) {
    if !self.armed {
      return;
    }
    warn!("workflow run dropped before completion");

    if let Ok(mut editor) = self.editor.try_lock() {
      let _ = editor.abort_run("run dropped");
      return;
    }

    // Editor is locked elsewhere. The run stays Dispatching until this lands.
    let editor = self.editor.clone();
    match Handle::try_current() {
      Ok(handle) => {
        handle.spawn(async move {
          let _ = editor.lock().await.abort_run("run dropped");
        });
      }
      Err(_) => error!("no runtime to abort the dropped workflow run; editor stays dispatching"),
    }
  }
}
