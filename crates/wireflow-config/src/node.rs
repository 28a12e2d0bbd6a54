use serde::{Deserialize, Serialize, Serializer};

use crate::config::NodeConfig;
use crate::enums::{NodeKind, NodeStatus};

/// Canvas coordinates of a node's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

impl Position {
  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  pub fn is_finite(&self) -> bool {
    self.x.is_finite() && self.y.is_finite()
  }
}

/// A single step in a workflow graph.
///
/// The node's `type` is derived from its [`NodeConfig`] variant, so the two
/// can never disagree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
  pub id: String,
  pub label: String,
  pub icon: String,
  pub color: String,
  pub position: Position,
  pub config: NodeConfig,
  pub status: NodeStatus,
}

impl Node {
  pub fn kind(&self) -> NodeKind {
    self.config.kind()
  }
}

/// Wire form of a node, before the config payload is checked against `type`.
#[derive(Deserialize)]
struct RawNode {
  id: String,
  #[serde(rename = "type")]
  kind: NodeKind,
  #[serde(default)]
  label: String,
  #[serde(default)]
  icon: String,
  #[serde(default)]
  color: String,
  position: Position,
  config: serde_json::Value,
  #[serde(default)]
  status: NodeStatus,
}

impl TryFrom<RawNode> for Node {
  type Error = String;

  fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
    let config = NodeConfig::from_value(raw.kind, raw.config)
      .map_err(|e| format!("invalid {} config for node '{}': {}", raw.kind, raw.id, e))?;

    Ok(Node {
      id: raw.id,
      label: raw.label,
      icon: raw.icon,
      color: raw.color,
      position: raw.position,
      config,
      status: raw.status,
    })
  }
}

#[derive(Serialize)]
struct NodeRef<'a> {
  id: &'a str,
  #[serde(rename = "type")]
  kind: NodeKind,
  label: &'a str,
  icon: &'a str,
  color: &'a str,
  position: &'a Position,
  config: &'a NodeConfig,
  status: NodeStatus,
}

impl Serialize for Node {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    NodeRef {
      id: &self.id,
      kind: self.kind(),
      label: &self.label,
      icon: &self.icon,
      color: &self.color,
      position: &self.position,
      config: &self.config,
      status: self.status,
    }
    .serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::DelayConfig;
  use crate::enums::DelayUnit;
  use serde_json::json;

  fn delay_node() -> Node {
    Node {
      id: "n1".to_string(),
      label: "Wait".to_string(),
      icon: "⏱".to_string(),
      color: "#6B7280".to_string(),
      position: Position::new(120.0, 80.5),
      config: NodeConfig::Delay(DelayConfig {
        duration: 2.0,
        unit: DelayUnit::S,
      }),
      status: NodeStatus::Success,
    }
  }

  #[test]
  fn test_node_wire_shape() {
    let value = serde_json::to_value(delay_node()).unwrap();
    assert_eq!(
      value,
      json!({
        "id": "n1",
        "type": "delay",
        "label": "Wait",
        "icon": "⏱",
        "color": "#6B7280",
        "position": {"x": 120.0, "y": 80.5},
        "config": {"duration": 2.0, "unit": "s"},
        "status": "success"
      })
    );
  }

  #[test]
  fn test_node_deserialize_roundtrip() {
    let node = delay_node();
    let json = serde_json::to_string(&node).unwrap();
    let parsed: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, node);
  }

  #[test]
  fn test_node_config_must_match_type() {
    let value = json!({
      "id": "n1",
      "type": "loop",
      "position": {"x": 0, "y": 0},
      "config": {"duration": 2.0, "unit": "s"}
    });
    let err = serde_json::from_value::<Node>(value).unwrap_err();
    assert!(err.to_string().contains("invalid loop config"));
  }

  #[test]
  fn test_node_defaults_presentation_and_status() {
    let value = json!({
      "id": "n1",
      "type": "data",
      "position": {"x": 1, "y": 2},
      "config": {"transform": "", "inputVariable": "a", "outputVariable": "b"}
    });
    let node: Node = serde_json::from_value(value).unwrap();
    assert_eq!(node.kind(), NodeKind::Data);
    assert_eq!(node.status, NodeStatus::Idle);
    assert_eq!(node.label, "");
  }
}
