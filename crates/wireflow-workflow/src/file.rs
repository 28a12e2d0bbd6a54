use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::info;
use wireflow_config::Workflow;

use crate::document::{export, import};
use crate::error::{MalformedReason, WorkflowError};

/// File name used when exporting a workflow.
///
/// Spaces become underscores; every other character is kept as-is.
/// Example: "My Flow!" -> "My_Flow!.json"
pub fn export_file_name(name: &str) -> String {
  format!("{}.json", name.replace(' ', "_"))
}

/// Export a workflow into `dir`, named after the workflow.
///
/// The file always lands directly in `dir`. Blank names and names containing a
/// path separator are rejected with [`WorkflowError::InvalidFileName`].
/// Returns the path of the written file.
pub async fn write_to_dir(dir: &Path, workflow: &Workflow) -> Result<PathBuf, WorkflowError> {
  let file_name = export_file_name(&workflow.name);
  if !is_plain_file_name(&workflow.name, &file_name) {
    return Err(WorkflowError::InvalidFileName {
      name: workflow.name.clone(),
    });
  }

  let document = export(workflow)?;
  let path = dir.join(file_name);
  fs::write(&path, document).await?;

  info!(
    workflow = %workflow.name,
    path = %path.display(),
    "exported workflow"
  );

  Ok(path)
}

fn is_plain_file_name(name: &str, file_name: &str) -> bool {
  let mut components = Path::new(file_name).components();
  !name.trim().is_empty()
    && !file_name.contains(['/', '\\'])
    && matches!(
      (components.next(), components.next()),
      (Some(Component::Normal(_)), None)
    )
}

/// Read a workflow file as UTF-8 text and import it.
pub async fn read_from_file(path: &Path) -> Result<Workflow, WorkflowError> {
  let bytes = fs::read(path).await?;
  let text = String::from_utf8(bytes).map_err(|_| MalformedReason::NotUtf8)?;
  import(&text)
}
