use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed palette of node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
  Http,
  Condition,
  Loop,
  Delay,
  Script,
  Parallel,
  Data,
  Webhook,
}

impl NodeKind {
  /// All node kinds, in palette order.
  pub const ALL: [NodeKind; 8] = [
    NodeKind::Http,
    NodeKind::Condition,
    NodeKind::Loop,
    NodeKind::Delay,
    NodeKind::Script,
    NodeKind::Parallel,
    NodeKind::Data,
    NodeKind::Webhook,
  ];

  /// The wire name of this kind, as it appears in the `type` field.
  pub fn as_str(&self) -> &'static str {
    match self {
      NodeKind::Http => "http",
      NodeKind::Condition => "condition",
      NodeKind::Loop => "loop",
      NodeKind::Delay => "delay",
      NodeKind::Script => "script",
      NodeKind::Parallel => "parallel",
      NodeKind::Data => "data",
      NodeKind::Webhook => "webhook",
    }
  }
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for NodeKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    NodeKind::ALL
      .into_iter()
      .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| format!("unknown node type: {}", s))
  }
}

/// Run-time status of a node, driven by execution results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
  #[default]
  Idle,
  Running,
  Success,
  Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
  #[default]
  Get,
  Post,
  Put,
  Delete,
  Patch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayUnit {
  #[default]
  Ms,
  S,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_node_kind_from_str() {
    assert_eq!("http".parse::<NodeKind>().unwrap(), NodeKind::Http);
    assert_eq!("Webhook".parse::<NodeKind>().unwrap(), NodeKind::Webhook);
    assert!("graphql".parse::<NodeKind>().is_err());
  }

  #[test]
  fn test_enum_wire_names() {
    assert_eq!(
      serde_json::to_value(HttpMethod::Patch).unwrap(),
      serde_json::json!("PATCH")
    );
    assert_eq!(
      serde_json::to_value(DelayUnit::S).unwrap(),
      serde_json::json!("s")
    );
    assert_eq!(
      serde_json::to_value(NodeStatus::Success).unwrap(),
      serde_json::json!("success")
    );
  }
}
