use serde::Deserialize;
use wireflow_config::{NodeKind, Position};

/// An editing request sent by the UI layer.
///
/// Intents deserialize from JSON such as
/// `{"intent": "move_node", "node_id": "node_1", "position": {"x": 10, "y": 20}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum EditorIntent {
  AddNode {
    kind: NodeKind,
    #[serde(default)]
    position: Option<Position>,
  },
  MoveNode {
    node_id: String,
    position: Position,
  },
  DeleteNode {
    node_id: String,
  },
  BeginConnection {
    node_id: String,
  },
  CompleteConnection {
    node_id: String,
  },
  CancelConnection,
  DeleteConnection {
    connection_id: String,
  },
  UpdateNodeConfig {
    node_id: String,
    patch: serde_json::Value,
  },
  UpdateNodeLabel {
    node_id: String,
    label: String,
  },
  SelectNode {
    #[serde(default)]
    node_id: Option<String>,
  },
  SetName {
    name: String,
  },
  SetDescription {
    description: String,
  },
  SetVariable {
    key: String,
    value: serde_json::Value,
  },
  RemoveVariable {
    key: String,
  },
}
