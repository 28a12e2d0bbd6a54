use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Connection settings for the workflow backend.
///
/// Stored as JSON, e.g. `~/.wireflow/config.json`:
///
/// ```json
/// {
///   "api_url": "https://app.example.com",
///   "project_id": "proj_123",
///   "timeout_ms": 30000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
  /// Base URL the `/api/...` paths are resolved against.
  #[serde(default = "default_api_url")]
  pub api_url: String,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub project_id: Option<String>,

  /// Sent as a bearer token when present.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub api_token: Option<String>,

  /// Request timeout. No timeout when unset.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timeout_ms: Option<u64>,
}

fn default_api_url() -> String {
  "http://localhost:3000".to_string()
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api_url: default_api_url(),
      project_id: None,
      api_token: None,
      timeout_ms: None,
    }
  }
}

impl ClientConfig {
  /// Load a config file. A missing file yields the defaults.
  pub async fn load(path: &Path) -> Result<Self, ConfigError> {
    match tokio::fs::read_to_string(path).await {
      Ok(content) => Ok(serde_json::from_str(&content)?),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
      Err(e) => Err(e.into()),
    }
  }

  pub fn timeout(&self) -> Option<Duration> {
    self.timeout_ms.map(Duration::from_millis)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_load_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::load(&dir.path().join("config.json"))
      .await
      .unwrap();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.timeout(), None);
  }

  #[tokio::test]
  async fn test_load_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"project_id": "p1", "timeout_ms": 1500}"#).unwrap();

    let config = ClientConfig::load(&path).await.unwrap();
    assert_eq!(config.api_url, "http://localhost:3000");
    assert_eq!(config.project_id.as_deref(), Some("p1"));
    assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
  }

  #[tokio::test]
  async fn test_load_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(
      ClientConfig::load(&path).await,
      Err(ConfigError::Parse(_))
    ));
  }
}
