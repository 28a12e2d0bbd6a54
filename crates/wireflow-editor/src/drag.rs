//! Drag-session state for moving nodes with a pointer.

use serde::Serialize;
use wireflow_config::Position;

use crate::editor::WorkflowEditor;

/// Pointer drag state of the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
  #[default]
  Idle,
  Dragging {
    node_id: String,
    /// Pointer position minus node position at pointer-down.
    offset: Position,
  },
}

impl DragState {
  pub fn node_id(&self) -> Option<&str> {
    match self {
      DragState::Idle => None,
      DragState::Dragging { node_id, .. } => Some(node_id),
    }
  }
}

/// A drag gesture in progress.
///
/// Dropping the session ends the drag, so the editor returns to
/// [`DragState::Idle`] whether the gesture finished with a pointer-up, was
/// cancelled, or the caller bailed out early.
pub struct DragSession<'a> {
  editor: &'a mut WorkflowEditor,
}

impl<'a> DragSession<'a> {
  pub(crate) fn new(editor: &'a mut WorkflowEditor) -> Self {
    Self { editor }
  }

  /// Move the dragged node so that it stays under the pointer.
  pub fn move_to(&mut self, pointer: Position) -> bool {
    self.editor.pointer_move(pointer)
  }

  pub fn node_id(&self) -> Option<&str> {
    self.editor.drag_state().node_id()
  }

  pub fn editor(&self) -> &WorkflowEditor {
    &*self.editor
  }
}

impl Drop for DragSession<'_> {
  fn drop(&mut self) {
    self.editor.pointer_up();
  }
}
