//! Wireflow Workflow
//!
//! This crate turns workflow documents into trusted in-memory values and back.
//!
//! Key differences from `wireflow-config`:
//! - Imported documents are validated (unique ids, no dangling or self-loop
//!   connections, config values in range)
//! - Imported node statuses are reset to idle
//! - Export file naming and file I/O live here
//! - [`analyze`] summarizes entry points, join points and cycles

mod document;
mod error;
mod file;
mod topology;

pub use document::{check_config, export, import, reset_statuses, validate};
pub use error::{MalformedReason, WorkflowError};
pub use file::{export_file_name, read_from_file, write_to_dir};
pub use topology::{Topology, analyze};
