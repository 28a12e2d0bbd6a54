//! Wireflow Config
//!
//! This crate contains the serializable document types for Wireflow workflows.
//! These types are the in-memory shape of a workflow as it is edited on the
//! canvas, exported to a file, or sent to the backend for execution.
//!
//! Documents can be loaded from:
//! - JSON files exported by the editor (`<name>.json`)
//! - The body of the backend's save endpoint
//!
//! Structural validation (unique ids, no dangling connections) lives in
//! `wireflow-workflow`; these types only describe the shape.

mod config;
mod connection;
mod enums;
mod execution;
mod node;
mod workflow;

pub use config::{
  ConditionConfig, DataConfig, DelayConfig, HttpConfig, LoopConfig, NodeConfig, ParallelConfig,
  ScriptConfig, WebhookConfig,
};
pub use connection::Connection;
pub use enums::{DelayUnit, HttpMethod, NodeKind, NodeStatus};
pub use execution::{ExecutionRequest, ExecutionResponse, NodeResult, SaveRequest, SavedWorkflow};
pub use node::{Node, Position};
pub use workflow::Workflow;
