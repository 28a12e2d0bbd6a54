//! Payloads exchanged with the workflow backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::workflow::Workflow;

/// Body of `POST /api/workflows/execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
  pub workflow: Workflow,
  pub project_id: String,
}

/// Per-node outcome reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeResult {
  #[serde(default)]
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<serde_json::Value>,
}

/// Response of `POST /api/workflows/execute`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResponse {
  /// Results keyed by node id. Nodes may be missing.
  #[serde(default)]
  pub results: HashMap<String, NodeResult>,
}

/// Body of `POST /api/workflows`: the workflow fields plus the project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
  #[serde(flatten)]
  pub workflow: Workflow,
  pub project_id: String,
}

/// Response of `POST /api/workflows`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedWorkflow {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_execution_request_shape() {
    let request = ExecutionRequest {
      workflow: Workflow::new("Flow"),
      project_id: "proj-1".to_string(),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["projectId"], "proj-1");
    assert_eq!(value["workflow"]["name"], "Flow");
    assert_eq!(value["workflow"]["nodes"], json!([]));
  }

  #[test]
  fn test_save_request_is_flattened() {
    let request = SaveRequest {
      workflow: Workflow::new("Flow"),
      project_id: "proj-1".to_string(),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["name"], "Flow");
    assert_eq!(value["projectId"], "proj-1");
    assert!(value.get("workflow").is_none());
  }

  #[test]
  fn test_execution_response_partial_entries() {
    let response: ExecutionResponse = serde_json::from_value(json!({
      "results": {
        "a": {"success": true, "data": {"status": 200}},
        "b": {"success": false, "error": "timeout"}
      }
    }))
    .unwrap();

    assert!(response.results["a"].success);
    assert_eq!(response.results["a"].data, Some(json!({"status": 200})));
    assert_eq!(response.results["b"].error.as_deref(), Some("timeout"));
  }
}
