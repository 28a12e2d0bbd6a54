use serde::Serialize;
use wireflow_config::NodeKind;

/// Presentation defaults for a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeTemplate {
  pub kind: NodeKind,
  pub label: &'static str,
  pub icon: &'static str,
  pub color: &'static str,
}

const PALETTE: [NodeTemplate; 8] = [
  NodeTemplate {
    kind: NodeKind::Http,
    label: "HTTP Request",
    icon: "🌐",
    color: "#3B82F6",
  },
  NodeTemplate {
    kind: NodeKind::Condition,
    label: "Condition",
    icon: "🔀",
    color: "#F59E0B",
  },
  NodeTemplate {
    kind: NodeKind::Loop,
    label: "Loop",
    icon: "🔁",
    color: "#8B5CF6",
  },
  NodeTemplate {
    kind: NodeKind::Delay,
    label: "Delay",
    icon: "⏱️",
    color: "#6B7280",
  },
  NodeTemplate {
    kind: NodeKind::Script,
    label: "Script",
    icon: "📝",
    color: "#10B981",
  },
  NodeTemplate {
    kind: NodeKind::Parallel,
    label: "Parallel",
    icon: "⚡",
    color: "#EC4899",
  },
  NodeTemplate {
    kind: NodeKind::Data,
    label: "Data Transform",
    icon: "🔄",
    color: "#06B6D4",
  },
  NodeTemplate {
    kind: NodeKind::Webhook,
    label: "Webhook",
    icon: "🪝",
    color: "#EF4444",
  },
];

/// The node palette, in display order.
pub fn palette() -> &'static [NodeTemplate] {
  &PALETTE
}

pub fn template(kind: NodeKind) -> &'static NodeTemplate {
  match kind {
    NodeKind::Http => &PALETTE[0],
    NodeKind::Condition => &PALETTE[1],
    NodeKind::Loop => &PALETTE[2],
    NodeKind::Delay => &PALETTE[3],
    NodeKind::Script => &PALETTE[4],
    NodeKind::Parallel => &PALETTE[5],
    NodeKind::Data => &PALETTE[6],
    NodeKind::Webhook => &PALETTE[7],
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_palette_covers_every_kind_once() {
    let kinds: Vec<NodeKind> = palette().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, NodeKind::ALL.to_vec());
    for kind in NodeKind::ALL {
      assert_eq!(template(kind).kind, kind);
    }
  }
}
