use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use wireflow_config::Workflow;

/// Shape of a workflow's connection graph, as shown by `wireflow inspect`.
///
/// Ids are listed in workflow order. Connections with an endpoint that is
/// not a node of the workflow are not counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Topology {
  /// Nodes nothing connects into.
  pub entry_points: Vec<String>,
  /// Nodes with more than one incoming connection.
  pub join_points: Vec<String>,
  /// Cycles are legal in an edited workflow; the backend decides what they mean.
  pub has_cycle: bool,
}

/// Count incoming edges per node and run Kahn's algorithm over them.
pub fn analyze(workflow: &Workflow) -> Topology {
  let mut incoming: HashMap<&str, usize> = workflow
    .nodes
    .iter()
    .map(|n| (n.id.as_str(), 0))
    .collect();
  let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();

  for connection in &workflow.connections {
    let (from, to) = (connection.from.as_str(), connection.to.as_str());
    if !incoming.contains_key(from) {
      continue;
    }
    let Some(count) = incoming.get_mut(to) else {
      continue;
    };
    *count += 1;
    outgoing.entry(from).or_default().push(to);
  }

  let in_order = |pred: fn(usize) -> bool| -> Vec<String> {
    workflow
      .nodes
      .iter()
      .filter(|n| incoming.get(n.id.as_str()).copied().is_some_and(pred))
      .map(|n| n.id.clone())
      .collect()
  };
  let entry_points = in_order(|count: usize| count == 0);
  let join_points = in_order(|count: usize| count > 1);

  let mut remaining = incoming.clone();
  let mut ready: VecDeque<&str> = entry_points.iter().map(String::as_str).collect();
  let mut visited = 0;
  while let Some(node) = ready.pop_front() {
    visited += 1;
    for next in outgoing.get(node).into_iter().flatten() {
      if let Some(count) = remaining.get_mut(next) {
        *count -= 1;
        if *count == 0 {
          ready.push_back(*next);
        }
      }
    }
  }

  Topology {
    entry_points,
    join_points,
    has_cycle: visited < remaining.len(),
  }
}
