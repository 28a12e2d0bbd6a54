use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::node::Node;

/// A workflow document: the unit of save, export and execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub description: String,
  /// Nodes in insertion order, which is also the canvas z-order.
  pub nodes: Vec<Node>,
  pub connections: Vec<Connection>,
  #[serde(default)]
  pub variables: BTreeMap<String, serde_json::Value>,
}

impl Workflow {
  /// Create an empty workflow with the given name.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }

  /// Get a node by ID.
  pub fn get_node(&self, node_id: &str) -> Option<&Node> {
    self.nodes.iter().find(|n| n.id == node_id)
  }

  /// Get a mutable node by ID.
  pub fn get_node_mut(&mut self, node_id: &str) -> Option<&mut Node> {
    self.nodes.iter_mut().find(|n| n.id == node_id)
  }

  pub fn contains_node(&self, node_id: &str) -> bool {
    self.get_node(node_id).is_some()
  }
}
