//! Wireflow Client
//!
//! This crate connects a [`WorkflowEditor`](wireflow_editor::WorkflowEditor)
//! to the workflow backend.
//!
//! - [`WorkflowBackend`] is the seam to the backend's execute and save
//!   endpoints; [`HttpBackend`] implements it over HTTP with `reqwest`.
//! - [`Executor`] drives one run at a time: it takes the request from the
//!   editor, sends it without holding the editor lock, and reconciles the
//!   response (or aborts the run on failure or cancellation).
//!
//! # Usage
//!
//! ```ignore
//! let config = ClientConfig::load(&path).await?;
//! let backend = HttpBackend::new(&config)?;
//! let executor = Executor::new(backend, "project-1");
//!
//! let editor: SharedEditor = Arc::new(Mutex::new(WorkflowEditor::new("Flow")));
//! let summary = executor.run(&editor, CancellationToken::new()).await?;
//! ```

mod backend;
mod config;
mod error;
mod executor;
mod http;

pub use backend::WorkflowBackend;
pub use config::ClientConfig;
pub use error::{BackendError, ConfigError, ExecutorError};
pub use executor::{Executor, SharedEditor};
pub use http::HttpBackend;
