use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{DelayUnit, HttpMethod, NodeKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
  pub method: HttpMethod,
  pub url: String,
  #[serde(default)]
  pub headers: BTreeMap<String, String>,
  #[serde(default)]
  pub body: String,
  /// Output extraction rules: variable name -> path into the response.
  #[serde(default)]
  pub extract: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionConfig {
  pub expression: String,
  #[serde(default)]
  pub true_node: Option<String>,
  #[serde(default)]
  pub false_node: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopConfig {
  /// A JSON array literal or an expression yielding one.
  pub items: String,
  pub variable: String,
  pub max_iterations: u32,
}

impl Default for LoopConfig {
  fn default() -> Self {
    Self {
      items: "[]".to_string(),
      variable: "item".to_string(),
      max_iterations: 100,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayConfig {
  pub duration: f64,
  pub unit: DelayUnit,
}

impl Default for DelayConfig {
  fn default() -> Self {
    Self {
      duration: 1000.0,
      unit: DelayUnit::Ms,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig {
  pub language: String,
  pub code: String,
}

impl Default for ScriptConfig {
  fn default() -> Self {
    Self {
      language: "javascript".to_string(),
      code: String::new(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelConfig {
  #[serde(default)]
  pub branches: Vec<String>,
  pub wait_for_all: bool,
}

impl Default for ParallelConfig {
  fn default() -> Self {
    Self {
      branches: Vec::new(),
      wait_for_all: true,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataConfig {
  pub transform: String,
  pub input_variable: String,
  pub output_variable: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
  pub url: String,
  #[serde(default)]
  pub secret: String,
  /// Timeout in milliseconds.
  pub timeout: f64,
}

impl Default for WebhookConfig {
  fn default() -> Self {
    Self {
      url: String::new(),
      secret: String::new(),
      timeout: 30_000.0,
    }
  }
}

/// Type-specific node configuration.
///
/// The variant determines the node's `type`. On the wire only the payload is
/// written under `config`; the tag lives in the node's `type` field, so
/// deserialization goes through [`NodeConfig::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeConfig {
  Http(HttpConfig),
  Condition(ConditionConfig),
  Loop(LoopConfig),
  Delay(DelayConfig),
  Script(ScriptConfig),
  Parallel(ParallelConfig),
  Data(DataConfig),
  Webhook(WebhookConfig),
}

impl NodeConfig {
  /// The default configuration for a freshly created node of `kind`.
  pub fn default_for(kind: NodeKind) -> Self {
    match kind {
      NodeKind::Http => NodeConfig::Http(HttpConfig::default()),
      NodeKind::Condition => NodeConfig::Condition(ConditionConfig::default()),
      NodeKind::Loop => NodeConfig::Loop(LoopConfig::default()),
      NodeKind::Delay => NodeConfig::Delay(DelayConfig::default()),
      NodeKind::Script => NodeConfig::Script(ScriptConfig::default()),
      NodeKind::Parallel => NodeConfig::Parallel(ParallelConfig::default()),
      NodeKind::Data => NodeConfig::Data(DataConfig::default()),
      NodeKind::Webhook => NodeConfig::Webhook(WebhookConfig::default()),
    }
  }

  /// Parse a config payload for a node of the given kind.
  pub fn from_value(kind: NodeKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
    Ok(match kind {
      NodeKind::Http => NodeConfig::Http(serde_json::from_value(value)?),
      NodeKind::Condition => NodeConfig::Condition(serde_json::from_value(value)?),
      NodeKind::Loop => NodeConfig::Loop(serde_json::from_value(value)?),
      NodeKind::Delay => NodeConfig::Delay(serde_json::from_value(value)?),
      NodeKind::Script => NodeConfig::Script(serde_json::from_value(value)?),
      NodeKind::Parallel => NodeConfig::Parallel(serde_json::from_value(value)?),
      NodeKind::Data => NodeConfig::Data(serde_json::from_value(value)?),
      NodeKind::Webhook => NodeConfig::Webhook(serde_json::from_value(value)?),
    })
  }

  pub fn kind(&self) -> NodeKind {
    match self {
      NodeConfig::Http(_) => NodeKind::Http,
      NodeConfig::Condition(_) => NodeKind::Condition,
      NodeConfig::Loop(_) => NodeKind::Loop,
      NodeConfig::Delay(_) => NodeKind::Delay,
      NodeConfig::Script(_) => NodeKind::Script,
      NodeConfig::Parallel(_) => NodeKind::Parallel,
      NodeConfig::Data(_) => NodeKind::Data,
      NodeConfig::Webhook(_) => NodeKind::Webhook,
    }
  }

  /// Shallow-merge the top-level fields of `patch` into this config.
  ///
  /// Fields not named in the patch keep their value. The result must still
  /// parse as a config of the same kind.
  pub fn merged(
    &self,
    patch: &serde_json::Map<String, serde_json::Value>,
  ) -> Result<Self, serde_json::Error> {
    let mut current = match serde_json::to_value(self)? {
      serde_json::Value::Object(map) => map,
      _ => serde_json::Map::new(),
    };
    for (key, value) in patch {
      current.insert(key.clone(), value.clone());
    }
    NodeConfig::from_value(self.kind(), serde_json::Value::Object(current))
  }
}
