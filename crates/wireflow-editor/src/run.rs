//! Run state and reconciliation of execution results onto nodes.

use std::collections::HashMap;

use serde::Serialize;
use wireflow_config::{Node, NodeResult, NodeStatus};

/// Where the editor is in the lifecycle of a run.
///
/// Only one run may be outstanding at a time: a new run can start only from
/// `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
  #[default]
  Idle,
  /// The request was built and is waiting on the backend.
  Dispatching,
  /// Results arrived and are being merged onto nodes.
  Reconciling,
}

/// Counts of the status each node ended with after reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
  pub succeeded: usize,
  pub failed: usize,
  /// Nodes with no entry in the results, reset to idle.
  pub missing: usize,
}

/// Status a node gets from its (possibly absent) result entry.
pub fn status_for(result: Option<&NodeResult>) -> NodeStatus {
  match result {
    Some(r) if r.success => NodeStatus::Success,
    Some(_) => NodeStatus::Error,
    None => NodeStatus::Idle,
  }
}

/// Apply execution results to every node currently in the graph.
///
/// Results for ids that are no longer in the graph are ignored.
pub fn reconcile(nodes: &mut [Node], results: &HashMap<String, NodeResult>) -> ReconcileSummary {
  let mut summary = ReconcileSummary::default();

  for node in nodes.iter_mut() {
    node.status = status_for(results.get(&node.id));
    match node.status {
      NodeStatus::Success => summary.succeeded += 1,
      NodeStatus::Error => summary.failed += 1,
      _ => summary.missing += 1,
    }
  }

  summary
}

#[cfg(test)]
mod tests {
  use super::*;
  use wireflow_config::{NodeConfig, NodeKind, Position};

  fn node(id: &str, status: NodeStatus) -> Node {
    Node {
      id: id.to_string(),
      label: String::new(),
      icon: String::new(),
      color: String::new(),
      position: Position::default(),
      config: NodeConfig::default_for(NodeKind::Delay),
      status,
    }
  }

  #[test]
  fn test_status_for() {
    let ok = NodeResult {
      success: true,
      ..Default::default()
    };
    let failed = NodeResult {
      success: false,
      error: Some("boom".to_string()),
      data: None,
    };

    assert_eq!(status_for(Some(&ok)), NodeStatus::Success);
    assert_eq!(status_for(Some(&failed)), NodeStatus::Error);
    assert_eq!(status_for(Some(&NodeResult::default())), NodeStatus::Error);
    assert_eq!(status_for(None), NodeStatus::Idle);
  }

  #[test]
  fn test_reconcile_resets_absent_nodes() {
    let mut nodes = vec![
      node("a", NodeStatus::Error),
      node("b", NodeStatus::Success),
      node("c", NodeStatus::Running),
    ];
    let mut results = HashMap::new();
    results.insert(
      "a".to_string(),
      NodeResult {
        success: true,
        ..Default::default()
      },
    );
    results.insert(
      "gone".to_string(),
      NodeResult {
        success: true,
        ..Default::default()
      },
    );

    let summary = reconcile(&mut nodes, &results);

    assert_eq!(nodes[0].status, NodeStatus::Success);
    assert_eq!(nodes[1].status, NodeStatus::Idle);
    assert_eq!(nodes[2].status, NodeStatus::Idle);
    assert_eq!(
      summary,
      ReconcileSummary {
        succeeded: 1,
        failed: 0,
        missing: 2,
      }
    );
  }
}
