//! Wireflow Editor
//!
//! This crate provides [`WorkflowEditor`], the controller behind the visual
//! workflow canvas. A UI layer sends it intents (add, move, connect, delete,
//! configure) and subscribes to the [`EditorEvent`]s it emits; the editor can
//! be exercised without any rendering framework.
//!
//! # Architecture
//!
//! ```text
//! UI intents ──► WorkflowEditor ──► EditorNotifier (events)
//!                   │      ▲
//!       begin_run   │      │ complete_run / abort_run
//!                   ▼      │
//!              ExecutionRequest ──► backend (wireflow-client)
//! ```
//!
//! The editor owns:
//! - the [`Workflow`](wireflow_config::Workflow) being edited
//! - selection, connecting mode and the [`DragState`]
//! - the [`RunState`] and the latest per-node results

mod drag;
mod editor;
mod error;
mod events;
mod geometry;
mod intent;
mod palette;
mod run;

pub use drag::{DragSession, DragState};
pub use editor::WorkflowEditor;
pub use error::EditorError;
pub use events::{ChannelNotifier, EditorEvent, EditorNotifier, NoopNotifier};
pub use geometry::{BezierPath, NODE_HEIGHT, NODE_WIDTH, connection_path};
pub use intent::EditorIntent;
pub use palette::{NodeTemplate, palette, template};
pub use run::{ReconcileSummary, RunState, reconcile, status_for};
