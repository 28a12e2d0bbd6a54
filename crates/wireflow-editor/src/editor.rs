use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;
use wireflow_config::{
  Connection, ExecutionRequest, ExecutionResponse, Node, NodeConfig, NodeKind, NodeResult,
  NodeStatus, Position, Workflow,
};
use wireflow_workflow::check_config;

use crate::drag::{DragSession, DragState};
use crate::error::EditorError;
use crate::events::{EditorEvent, EditorNotifier, NoopNotifier};
use crate::geometry::{BezierPath, connection_path};
use crate::intent::EditorIntent;
use crate::palette::template;
use crate::run::{ReconcileSummary, RunState, reconcile};

/// Region of the canvas where new nodes are dropped when no position is given.
const SPAWN_X: std::ops::Range<f64> = 100.0..500.0;
const SPAWN_Y: std::ops::Range<f64> = 100.0..400.0;

/// Controller that owns a workflow and applies editing intents to it.
///
/// All mutations are synchronous. The editor never touches the network; a run
/// is split into [`begin_run`](Self::begin_run), which hands out the request,
/// and [`complete_run`](Self::complete_run) / [`abort_run`](Self::abort_run),
/// which close it. Between the two the workflow stays editable.
pub struct WorkflowEditor {
  workflow: Workflow,
  selected: Option<String>,
  connecting_from: Option<String>,
  drag: DragState,
  run_state: RunState,
  /// Latest result per node from the last reconciled run.
  results: HashMap<String, NodeResult>,
  notifier: Arc<dyn EditorNotifier>,
}

impl Default for WorkflowEditor {
  fn default() -> Self {
    Self::from_workflow(Workflow::default())
  }
}

impl WorkflowEditor {
  /// Create an editor with an empty workflow.
  pub fn new(name: impl Into<String>) -> Self {
    Self::from_workflow(Workflow::new(name))
  }

  /// Create an editor over an existing workflow.
  pub fn from_workflow(workflow: Workflow) -> Self {
    Self::with_notifier(workflow, Arc::new(NoopNotifier))
  }

  pub fn with_notifier(workflow: Workflow, notifier: Arc<dyn EditorNotifier>) -> Self {
    Self {
      workflow,
      selected: None,
      connecting_from: None,
      drag: DragState::Idle,
      run_state: RunState::Idle,
      results: HashMap::new(),
      notifier,
    }
  }

  pub fn workflow(&self) -> &Workflow {
    &self.workflow
  }

  pub fn selected_node(&self) -> Option<&str> {
    self.selected.as_deref()
  }

  /// Source node of the pending connection, if in connecting mode.
  pub fn connecting_from(&self) -> Option<&str> {
    self.connecting_from.as_deref()
  }

  pub fn is_connecting(&self) -> bool {
    self.connecting_from.is_some()
  }

  pub fn drag_state(&self) -> &DragState {
    &self.drag
  }

  pub fn run_state(&self) -> RunState {
    self.run_state
  }

  /// Latest execution result for a node, if the last run reported one.
  pub fn node_result(&self, node_id: &str) -> Option<&NodeResult> {
    self.results.get(node_id)
  }

  fn emit(&self, event: EditorEvent) {
    self.notifier.notify(event);
  }

  fn set_selection(&mut self, node_id: Option<String>) {
    if self.selected != node_id {
      self.selected = node_id.clone();
      self.emit(EditorEvent::SelectionChanged { node_id });
    }
  }

  // -- Nodes ----------------------------------------------------------------

  /// Add a node of `kind` at a random spot on the canvas and select it.
  ///
  /// Returns the new node's id.
  pub fn add_node(&mut self, kind: NodeKind) -> String {
    let mut rng = rand::rng();
    let position = Position::new(rng.random_range(SPAWN_X), rng.random_range(SPAWN_Y));
    self.add_node_at(kind, position)
  }

  /// Add a node of `kind` at `position` and select it.
  ///
  /// A non-finite position is replaced by a random spot on the canvas.
  pub fn add_node_at(&mut self, kind: NodeKind, position: Position) -> String {
    if !position.is_finite() {
      return self.add_node(kind);
    }
    let template = template(kind);
    let node = Node {
      id: new_node_id(),
      label: template.label.to_string(),
      icon: template.icon.to_string(),
      color: template.color.to_string(),
      position,
      config: NodeConfig::default_for(kind),
      status: NodeStatus::Idle,
    };
    let node_id = node.id.clone();

    debug!(node_id = %node_id, kind = %kind, "adding node");
    self.workflow.nodes.push(node);
    self.emit(EditorEvent::NodeAdded {
      node_id: node_id.clone(),
      kind,
    });
    self.set_selection(Some(node_id.clone()));

    node_id
  }

  /// Move a node. Returns `false` if there is no such node or the position
  /// is not finite.
  pub fn move_node(&mut self, node_id: &str, position: Position) -> bool {
    if !position.is_finite() {
      return false;
    }
    let Some(node) = self.workflow.get_node_mut(node_id) else {
      return false;
    };
    node.position = position;
    self.emit(EditorEvent::NodeMoved {
      node_id: node_id.to_string(),
      position,
    });
    true
  }

  /// Delete a node and every connection that touches it.
  ///
  /// Returns `false` if there is no such node.
  pub fn delete_node(&mut self, node_id: &str) -> bool {
    let Some(index) = self.workflow.nodes.iter().position(|n| n.id == node_id) else {
      return false;
    };
    self.workflow.nodes.remove(index);

    let mut removed_connections = Vec::new();
    self.workflow.connections.retain(|c| {
      if c.touches(node_id) {
        removed_connections.push(c.id.clone());
        false
      } else {
        true
      }
    });
    self.results.remove(node_id);

    debug!(
      node_id = %node_id,
      removed_connections = removed_connections.len(),
      "deleted node"
    );
    self.emit(EditorEvent::NodeDeleted {
      node_id: node_id.to_string(),
      removed_connections,
    });

    if self.selected.as_deref() == Some(node_id) {
      self.set_selection(None);
    }
    if self.connecting_from.as_deref() == Some(node_id) {
      self.cancel_connection();
    }
    if self.drag.node_id() == Some(node_id) {
      self.drag = DragState::Idle;
    }

    true
  }

  /// Shallow-merge the fields of `patch` into a node's config.
  ///
  /// Cross-field references (e.g. `trueNode`) are not checked. The node is
  /// left unchanged if the patch is not an object, or the merged config no
  /// longer fits the node's type or is out of range.
  pub fn update_node_config(
    &mut self,
    node_id: &str,
    patch: &serde_json::Value,
  ) -> Result<(), EditorError> {
    let node = self
      .workflow
      .get_node_mut(node_id)
      .ok_or_else(|| EditorError::NodeNotFound(node_id.to_string()))?;

    let fields = patch
      .as_object()
      .ok_or_else(|| EditorError::InvalidConfigPatch {
        node_id: node_id.to_string(),
        message: "patch must be a JSON object".to_string(),
      })?;

    let invalid = |message: String| EditorError::InvalidConfigPatch {
      node_id: node_id.to_string(),
      message,
    };
    let config = node
      .config
      .merged(fields)
      .map_err(|e| invalid(e.to_string()))?;
    check_config(&config).map_err(|message| invalid(message.to_string()))?;
    node.config = config;

    self.emit(EditorEvent::NodeUpdated {
      node_id: node_id.to_string(),
    });
    Ok(())
  }

  pub fn update_node_label(
    &mut self,
    node_id: &str,
    label: impl Into<String>,
  ) -> Result<(), EditorError> {
    let node = self
      .workflow
      .get_node_mut(node_id)
      .ok_or_else(|| EditorError::NodeNotFound(node_id.to_string()))?;
    node.label = label.into();

    self.emit(EditorEvent::NodeUpdated {
      node_id: node_id.to_string(),
    });
    Ok(())
  }

  /// Select a node. Returns `false` if there is no such node.
  pub fn select_node(&mut self, node_id: &str) -> bool {
    if !self.workflow.contains_node(node_id) {
      return false;
    }
    self.set_selection(Some(node_id.to_string()));
    true
  }

  pub fn clear_selection(&mut self) {
    self.set_selection(None);
  }

  // -- Connections ----------------------------------------------------------

  /// Enter connecting mode with `node_id` as the source.
  ///
  /// Ignored if the node does not exist. Starting over while already
  /// connecting replaces the pending source.
  pub fn begin_connection(&mut self, node_id: &str) -> bool {
    if !self.workflow.contains_node(node_id) {
      return false;
    }
    self.connecting_from = Some(node_id.to_string());
    self.emit(EditorEvent::ConnectingChanged {
      source: self.connecting_from.clone(),
    });
    true
  }

  /// Finish the pending connection at `node_id`.
  ///
  /// A connection is added only while connecting, to an existing node other
  /// than the source, and if the same edge does not exist yet. Connecting
  /// mode is left in every case. Returns the new connection's id.
  pub fn complete_connection(&mut self, node_id: &str) -> Option<String> {
    let source = self.connecting_from.take()?;
    self.emit(EditorEvent::ConnectingChanged { source: None });

    if source == node_id || !self.workflow.contains_node(node_id) {
      debug!(from = %source, to = %node_id, "ignoring invalid connection");
      return None;
    }
    let exists = self
      .workflow
      .connections
      .iter()
      .any(|c| c.from == source && c.to == node_id);
    if exists {
      return None;
    }

    let connection = Connection {
      id: new_connection_id(),
      from: source,
      to: node_id.to_string(),
    };
    let connection_id = connection.id.clone();
    self.emit(EditorEvent::ConnectionAdded {
      connection_id: connection.id.clone(),
      from: connection.from.clone(),
      to: connection.to.clone(),
    });
    self.workflow.connections.push(connection);

    Some(connection_id)
  }

  /// Leave connecting mode without adding anything.
  pub fn cancel_connection(&mut self) {
    if self.connecting_from.take().is_some() {
      self.emit(EditorEvent::ConnectingChanged { source: None });
    }
  }

  pub fn delete_connection(&mut self, connection_id: &str) -> bool {
    let before = self.workflow.connections.len();
    self.workflow.connections.retain(|c| c.id != connection_id);
    if self.workflow.connections.len() == before {
      return false;
    }
    self.emit(EditorEvent::ConnectionDeleted {
      connection_id: connection_id.to_string(),
    });
    true
  }

  /// Curves for every connection, keyed by connection id, in draw order.
  pub fn connection_paths(&self) -> Vec<(String, BezierPath)> {
    self
      .workflow
      .connections
      .iter()
      .filter_map(|c| {
        let from = self.workflow.get_node(&c.from)?;
        let to = self.workflow.get_node(&c.to)?;
        Some((c.id.clone(), connection_path(from.position, to.position)))
      })
      .collect()
  }

  // -- Metadata -------------------------------------------------------------

  pub fn set_name(&mut self, name: impl Into<String>) {
    self.workflow.name = name.into();
    self.emit(EditorEvent::MetadataChanged);
  }

  pub fn set_description(&mut self, description: impl Into<String>) {
    self.workflow.description = description.into();
    self.emit(EditorEvent::MetadataChanged);
  }

  pub fn set_variable(&mut self, key: impl Into<String>, value: serde_json::Value) {
    self.workflow.variables.insert(key.into(), value);
    self.emit(EditorEvent::MetadataChanged);
  }

  pub fn remove_variable(&mut self, key: &str) -> Option<serde_json::Value> {
    let removed = self.workflow.variables.remove(key);
    if removed.is_some() {
      self.emit(EditorEvent::MetadataChanged);
    }
    removed
  }

  // -- Documents ------------------------------------------------------------

  pub fn export_document(&self) -> Result<String, EditorError> {
    Ok(wireflow_workflow::export(&self.workflow)?)
  }

  /// Replace the workflow with an imported document.
  ///
  /// On failure the current workflow is left untouched.
  pub fn import_document(&mut self, document: &str) -> Result<(), EditorError> {
    let workflow = wireflow_workflow::import(document).inspect_err(|e| {
      warn!(error = %e, "rejected workflow document");
    })?;
    self.replace_workflow(workflow);
    Ok(())
  }

  /// Replace the workflow and reset transient editing state.
  pub fn replace_workflow(&mut self, workflow: Workflow) {
    info!(workflow = %workflow.name, nodes = workflow.nodes.len(), "loaded workflow");
    self.workflow = workflow;
    self.connecting_from = None;
    self.drag = DragState::Idle;
    self.results.clear();
    self.emit(EditorEvent::WorkflowReplaced);
    self.set_selection(None);
  }

  // -- Intents --------------------------------------------------------------

  /// Apply one intent from the UI layer.
  ///
  /// Intents that target missing nodes or form invalid connections are
  /// no-ops; only config and label updates report errors.
  pub fn apply(&mut self, intent: EditorIntent) -> Result<(), EditorError> {
    match intent {
      EditorIntent::AddNode { kind, position } => {
        match position {
          Some(position) => self.add_node_at(kind, position),
          None => self.add_node(kind),
        };
      }
      EditorIntent::MoveNode { node_id, position } => {
        self.move_node(&node_id, position);
      }
      EditorIntent::DeleteNode { node_id } => {
        self.delete_node(&node_id);
      }
      EditorIntent::BeginConnection { node_id } => {
        self.begin_connection(&node_id);
      }
      EditorIntent::CompleteConnection { node_id } => {
        self.complete_connection(&node_id);
      }
      EditorIntent::CancelConnection => self.cancel_connection(),
      EditorIntent::DeleteConnection { connection_id } => {
        self.delete_connection(&connection_id);
      }
      EditorIntent::UpdateNodeConfig { node_id, patch } => {
        self.update_node_config(&node_id, &patch)?;
      }
      EditorIntent::UpdateNodeLabel { node_id, label } => {
        self.update_node_label(&node_id, label)?;
      }
      EditorIntent::SelectNode { node_id } => match node_id {
        Some(node_id) => {
          self.select_node(&node_id);
        }
        None => self.clear_selection(),
      },
      EditorIntent::SetName { name } => self.set_name(name),
      EditorIntent::SetDescription { description } => self.set_description(description),
      EditorIntent::SetVariable { key, value } => self.set_variable(key, value),
      EditorIntent::RemoveVariable { key } => {
        self.remove_variable(&key);
      }
    }
    Ok(())
  }

  // -- Dragging -------------------------------------------------------------

  /// Start dragging a node grabbed at `pointer`.
  ///
  /// Returns `false` for unknown nodes. A drag already in progress is
  /// replaced.
  pub fn pointer_down(&mut self, node_id: &str, pointer: Position) -> bool {
    let Some(node) = self.workflow.get_node(node_id) else {
      return false;
    };
    let offset = Position::new(pointer.x - node.position.x, pointer.y - node.position.y);
    self.drag = DragState::Dragging {
      node_id: node_id.to_string(),
      offset,
    };
    self.set_selection(Some(node_id.to_string()));
    true
  }

  /// Move the dragged node with the pointer. Returns `false` when not
  /// dragging.
  pub fn pointer_move(&mut self, pointer: Position) -> bool {
    let DragState::Dragging { node_id, offset } = &self.drag else {
      return false;
    };
    let position = Position::new(pointer.x - offset.x, pointer.y - offset.y);
    let node_id = node_id.clone();
    self.move_node(&node_id, position)
  }

  pub fn pointer_up(&mut self) {
    self.drag = DragState::Idle;
  }

  pub fn pointer_cancel(&mut self) {
    self.drag = DragState::Idle;
  }

  /// Start a scoped drag. The drag ends when the returned session is dropped.
  pub fn drag(&mut self, node_id: &str, pointer: Position) -> Option<DragSession<'_>> {
    if self.pointer_down(node_id, pointer) {
      Some(DragSession::new(self))
    } else {
      None
    }
  }

  // -- Runs -----------------------------------------------------------------

  /// Start a run and return the request to send to the backend.
  ///
  /// Fails with [`EditorError::RunInProgress`] unless the editor is idle.
  /// Node statuses are not cleared here; they change when results arrive.
  pub fn begin_run(&mut self, project_id: impl Into<String>) -> Result<ExecutionRequest, EditorError> {
    if self.run_state != RunState::Idle {
      warn!(
        workflow = %self.workflow.name,
        state = ?self.run_state,
        "rejecting run while another is in progress"
      );
      return Err(EditorError::RunInProgress);
    }

    self.run_state = RunState::Dispatching;
    info!(
      workflow = %self.workflow.name,
      nodes = self.workflow.nodes.len(),
      "dispatching workflow run"
    );
    self.emit(EditorEvent::RunStarted);

    Ok(ExecutionRequest {
      workflow: self.workflow.clone(),
      project_id: project_id.into(),
    })
  }

  /// Merge the backend's results onto the current nodes and end the run.
  ///
  /// Nodes added since the run started, or otherwise absent from the
  /// results, end up idle.
  pub fn complete_run(
    &mut self,
    response: ExecutionResponse,
  ) -> Result<ReconcileSummary, EditorError> {
    if self.run_state != RunState::Dispatching {
      return Err(EditorError::NoActiveRun);
    }
    self.run_state = RunState::Reconciling;

    let summary = reconcile(&mut self.workflow.nodes, &response.results);
    let mut results = response.results;
    self.results = self
      .workflow
      .nodes
      .iter()
      .filter_map(|n| results.remove_entry(&n.id))
      .collect();

    self.run_state = RunState::Idle;
    info!(
      workflow = %self.workflow.name,
      succeeded = summary.succeeded,
      failed = summary.failed,
      missing = summary.missing,
      "workflow run reconciled"
    );
    self.emit(EditorEvent::RunReconciled { summary });

    Ok(summary)
  }

  /// End the run without results. Node statuses are left unchanged.
  pub fn abort_run(&mut self, error: impl Into<String>) -> Result<(), EditorError> {
    if self.run_state != RunState::Dispatching {
      return Err(EditorError::NoActiveRun);
    }
    self.run_state = RunState::Idle;
    self.emit(EditorEvent::RunFailed {
      error: error.into(),
    });
    Ok(())
  }
}

fn new_node_id() -> String {
  format!("node_{}", Uuid::now_v7().simple())
}

fn new_connection_id() -> String {
  format!("conn_{}", Uuid::new_v4().simple())
}
