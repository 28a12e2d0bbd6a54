use serde::{Deserialize, Serialize};

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
  pub id: String,
  pub from: String,
  pub to: String,
}

impl Connection {
  /// Whether this connection touches the given node on either end.
  pub fn touches(&self, node_id: &str) -> bool {
    self.from == node_id || self.to == node_id
  }
}
