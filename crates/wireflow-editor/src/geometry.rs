//! Curve geometry for drawing connections between nodes.

use serde::Serialize;
use wireflow_config::Position;

/// Rendered node width on the canvas.
pub const NODE_WIDTH: f64 = 200.0;
/// Rendered node height on the canvas.
pub const NODE_HEIGHT: f64 = 80.0;

/// A cubic Bezier curve from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BezierPath {
  pub start: Position,
  pub control1: Position,
  pub control2: Position,
  pub end: Position,
}

impl BezierPath {
  /// SVG path data, e.g. `M 300 140 C 350 140, 350 240, 400 240`.
  pub fn to_svg(&self) -> String {
    format!(
      "M {} {} C {} {}, {} {}, {} {}",
      self.start.x,
      self.start.y,
      self.control1.x,
      self.control1.y,
      self.control2.x,
      self.control2.y,
      self.end.x,
      self.end.y
    )
  }
}

/// Curve from the right-middle of the source node to the left-middle of the
/// target node. Control points sit half the horizontal distance in from each
/// end, level with their anchor.
pub fn connection_path(from: Position, to: Position) -> BezierPath {
  let start = Position::new(from.x + NODE_WIDTH, from.y + NODE_HEIGHT / 2.0);
  let end = Position::new(to.x, to.y + NODE_HEIGHT / 2.0);
  let half_dx = (end.x - start.x) / 2.0;

  BezierPath {
    start,
    control1: Position::new(start.x + half_dx, start.y),
    control2: Position::new(end.x - half_dx, end.y),
    end,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_connection_path_anchors() {
    let path = connection_path(Position::new(100.0, 100.0), Position::new(400.0, 200.0));

    assert_eq!(path.start, Position::new(300.0, 140.0));
    assert_eq!(path.end, Position::new(400.0, 240.0));
    assert_eq!(path.control1, Position::new(350.0, 140.0));
    assert_eq!(path.control2, Position::new(350.0, 240.0));
    assert_eq!(path.to_svg(), "M 300 140 C 350 140, 350 240, 400 240");
  }

  #[test]
  fn test_connection_path_backwards() {
    // Target left of the source: control points cross over.
    let path = connection_path(Position::new(500.0, 0.0), Position::new(100.0, 0.0));

    assert_eq!(path.start.x, 700.0);
    assert_eq!(path.end.x, 100.0);
    assert_eq!(path.control1.x, 400.0);
    assert_eq!(path.control2.x, 400.0);
  }
}
