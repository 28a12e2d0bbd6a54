//! Editor events and notifiers.
//!
//! Every state change of a [`WorkflowEditor`](crate::WorkflowEditor) emits an
//! event so that a UI layer can re-render, or a server can stream the change
//! to connected clients.

use serde::Serialize;
use tokio::sync::mpsc;
use wireflow_config::{NodeKind, Position};

use crate::run::ReconcileSummary;

/// Events emitted by the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
  NodeAdded {
    node_id: String,
    kind: NodeKind,
  },

  NodeMoved {
    node_id: String,
    position: Position,
  },

  /// A node was removed together with every connection touching it.
  NodeDeleted {
    node_id: String,
    removed_connections: Vec<String>,
  },

  /// Config or label of a node changed.
  NodeUpdated { node_id: String },

  ConnectionAdded {
    connection_id: String,
    from: String,
    to: String,
  },

  ConnectionDeleted { connection_id: String },

  SelectionChanged { node_id: Option<String> },

  /// Connecting mode was entered (`Some`) or left (`None`).
  ConnectingChanged { source: Option<String> },

  /// Name, description or variables changed.
  MetadataChanged,

  /// The whole workflow was replaced by an import.
  WorkflowReplaced,

  RunStarted,

  RunReconciled { summary: ReconcileSummary },

  /// The run ended without results; node statuses were left as they were.
  RunFailed { error: String },
}

/// Trait for receiving editor events.
///
/// The editor calls `notify` for each event. Implementations decide what to
/// do with them (re-render, broadcast, log, ignore).
pub trait EditorNotifier: Send + Sync {
  fn notify(&self, event: EditorEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl EditorNotifier for NoopNotifier {
  fn notify(&self, _event: EditorEvent) {}
}

/// A notifier that sends events to an unbounded channel.
///
/// Use this when events are consumed asynchronously, e.g. forwarded to a UI
/// over a websocket.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  // Unbounded so that editing never waits on a slow subscriber. Event volume
  // is one per user gesture.
  sender: mpsc::UnboundedSender<EditorEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<EditorEvent>) -> Self {
    Self { sender }
  }

  /// Create a notifier together with the receiving end of its channel.
  pub fn channel() -> (Self, mpsc::UnboundedReceiver<EditorEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self::new(sender), receiver)
  }
}

impl EditorNotifier for ChannelNotifier {
  fn notify(&self, event: EditorEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
