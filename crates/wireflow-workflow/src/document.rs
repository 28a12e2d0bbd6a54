use std::collections::HashSet;

use tracing::debug;
use wireflow_config::{NodeConfig, NodeStatus, Workflow};

use crate::error::{MalformedReason, WorkflowError};

/// Serialize a workflow to the portable JSON document.
pub fn export(workflow: &Workflow) -> Result<String, WorkflowError> {
  serde_json::to_string_pretty(workflow).map_err(WorkflowError::Serialize)
}

/// Parse and validate a workflow document.
///
/// Any parse or shape failure is reported as
/// [`WorkflowError::MalformedWorkflowFile`]; nothing is partially recovered.
/// Imported workflows carry no live run state, so every node comes back idle.
pub fn import(document: &str) -> Result<Workflow, WorkflowError> {
  let mut workflow: Workflow = serde_json::from_str(document).map_err(MalformedReason::from)?;
  validate(&workflow)?;
  reset_statuses(&mut workflow);

  debug!(
    workflow = %workflow.name,
    nodes = workflow.nodes.len(),
    connections = workflow.connections.len(),
    "imported workflow document"
  );

  Ok(workflow)
}

/// Set every node's status back to idle.
pub fn reset_statuses(workflow: &mut Workflow) {
  for node in &mut workflow.nodes {
    node.status = NodeStatus::Idle;
  }
}

/// Check the structural invariants of a workflow.
pub fn validate(workflow: &Workflow) -> Result<(), MalformedReason> {
  let mut node_ids = HashSet::new();
  for node in &workflow.nodes {
    if !node_ids.insert(node.id.as_str()) {
      return Err(MalformedReason::DuplicateNodeId {
        node_id: node.id.clone(),
      });
    }
    if !node.position.is_finite() {
      return Err(MalformedReason::InvalidPosition {
        node_id: node.id.clone(),
      });
    }
    validate_config(&node.id, &node.config)?;
  }

  let mut connection_ids = HashSet::new();
  for connection in &workflow.connections {
    if !connection_ids.insert(connection.id.as_str()) {
      return Err(MalformedReason::DuplicateConnectionId {
        connection_id: connection.id.clone(),
      });
    }
    for endpoint in [&connection.from, &connection.to] {
      if !node_ids.contains(endpoint.as_str()) {
        return Err(MalformedReason::DanglingConnection {
          connection_id: connection.id.clone(),
          node_id: endpoint.clone(),
        });
      }
    }
    if connection.from == connection.to {
      return Err(MalformedReason::SelfLoop {
        connection_id: connection.id.clone(),
        node_id: connection.from.clone(),
      });
    }
  }

  Ok(())
}

fn validate_config(node_id: &str, config: &NodeConfig) -> Result<(), MalformedReason> {
  check_config(config).map_err(|message| MalformedReason::InvalidConfig {
    node_id: node_id.to_string(),
    message: message.to_string(),
  })
}

/// Range checks a single node config must pass to be importable.
pub fn check_config(config: &NodeConfig) -> Result<(), &'static str> {
  match config {
    NodeConfig::Loop(c) if c.max_iterations < 1 => Err("maxIterations must be at least 1"),
    NodeConfig::Delay(c) if !(c.duration.is_finite() && c.duration >= 0.0) => {
      Err("duration must be a non-negative number")
    }
    NodeConfig::Webhook(c) if !(c.timeout.is_finite() && c.timeout >= 0.0) => {
      Err("timeout must be a non-negative number")
    }
    _ => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn document(nodes: serde_json::Value, connections: serde_json::Value) -> String {
    json!({
      "name": "Test",
      "description": "",
      "nodes": nodes,
      "connections": connections,
      "variables": {}
    })
    .to_string()
  }

  fn delay(id: &str) -> serde_json::Value {
    json!({
      "id": id,
      "type": "delay",
      "label": "Delay",
      "icon": "⏱",
      "color": "#6B7280",
      "position": {"x": 0, "y": 0},
      "config": {"duration": 10, "unit": "ms"},
      "status": "running"
    })
  }

  fn malformed(result: Result<Workflow, WorkflowError>) -> MalformedReason {
    match result {
      Err(WorkflowError::MalformedWorkflowFile(reason)) => reason,
      other => panic!("expected malformed workflow file, got {:?}", other),
    }
  }

  #[test]
  fn test_import_resets_status() {
    let workflow = import(&document(json!([delay("a")]), json!([]))).unwrap();
    assert_eq!(workflow.nodes[0].status, NodeStatus::Idle);
  }

  #[test]
  fn test_import_rejects_invalid_json() {
    let reason = malformed(import("{ not json"));
    assert!(matches!(reason, MalformedReason::Parse(_)));
  }

  #[test]
  fn test_import_rejects_missing_nodes() {
    let reason = malformed(import(r#"{"name": "x", "connections": []}"#));
    assert!(matches!(reason, MalformedReason::Parse(_)));
  }

  #[test]
  fn test_import_rejects_dangling_connection() {
    let doc = document(
      json!([delay("x1")]),
      json!([{"id": "c1", "from": "x1", "to": "x2"}]),
    );
    let reason = malformed(import(&doc));
    assert!(matches!(
      reason,
      MalformedReason::DanglingConnection { ref node_id, .. } if node_id == "x2"
    ));
  }

  #[test]
  fn test_import_rejects_self_loop() {
    let doc = document(
      json!([delay("a")]),
      json!([{"id": "c1", "from": "a", "to": "a"}]),
    );
    assert!(matches!(
      malformed(import(&doc)),
      MalformedReason::SelfLoop { .. }
    ));
  }

  #[test]
  fn test_import_rejects_duplicate_ids() {
    let doc = document(json!([delay("a"), delay("a")]), json!([]));
    assert!(matches!(
      malformed(import(&doc)),
      MalformedReason::DuplicateNodeId { .. }
    ));

    let doc = document(
      json!([delay("a"), delay("b")]),
      json!([
        {"id": "c1", "from": "a", "to": "b"},
        {"id": "c1", "from": "b", "to": "a"}
      ]),
    );
    assert!(matches!(
      malformed(import(&doc)),
      MalformedReason::DuplicateConnectionId { .. }
    ));
  }

  #[test]
  fn test_import_rejects_out_of_range_config() {
    let mut node = delay("a");
    node["config"]["duration"] = json!(-5);
    let doc = document(json!([node]), json!([]));
    assert!(matches!(
      malformed(import(&doc)),
      MalformedReason::InvalidConfig { .. }
    ));

    let looped = json!({
      "id": "l",
      "type": "loop",
      "position": {"x": 0, "y": 0},
      "config": {"items": "[]", "variable": "item", "maxIterations": 0}
    });
    let doc = document(json!([looped]), json!([]));
    assert!(matches!(
      malformed(import(&doc)),
      MalformedReason::InvalidConfig { .. }
    ));
  }

  #[test]
  fn test_export_import_roundtrip() {
    let doc = document(
      json!([delay("a"), delay("b")]),
      json!([{"id": "c1", "from": "a", "to": "b"}]),
    );
    let workflow = import(&doc).unwrap();
    let again = import(&export(&workflow).unwrap()).unwrap();
    assert_eq!(again, workflow);
  }
}
