//! Integration tests for workflow document import/export.

use std::collections::BTreeMap;

use serde_json::json;
use wireflow_config::{
  ConditionConfig, Connection, HttpConfig, HttpMethod, Node, NodeConfig, NodeKind, NodeStatus,
  ParallelConfig, Position, Workflow,
};
use wireflow_workflow::{MalformedReason, WorkflowError, export, import};

fn node(id: &str, config: NodeConfig, status: NodeStatus) -> Node {
  Node {
    id: id.to_string(),
    label: format!("{} node", config.kind()),
    icon: "*".to_string(),
    color: "#000000".to_string(),
    position: Position::new(10.5, -3.0),
    config,
    status,
  }
}

fn full_workflow() -> Workflow {
  let mut headers = BTreeMap::new();
  headers.insert("Authorization".to_string(), "Bearer {{token}}".to_string());
  let mut extract = BTreeMap::new();
  extract.insert("userId".to_string(), "$.data.id".to_string());

  let mut nodes = vec![
    node(
      "fetch",
      NodeConfig::Http(HttpConfig {
        method: HttpMethod::Post,
        url: "https://api.example.com/users".to_string(),
        headers,
        body: r#"{"name": "test"}"#.to_string(),
        extract,
      }),
      NodeStatus::Success,
    ),
    node(
      "check",
      NodeConfig::Condition(ConditionConfig {
        expression: "userId != null".to_string(),
        true_node: Some("fanout".to_string()),
        false_node: None,
      }),
      NodeStatus::Error,
    ),
    node(
      "fanout",
      NodeConfig::Parallel(ParallelConfig {
        branches: vec!["fetch".to_string(), "check".to_string()],
        wait_for_all: false,
      }),
      NodeStatus::Running,
    ),
  ];

  for kind in [
    NodeKind::Loop,
    NodeKind::Delay,
    NodeKind::Script,
    NodeKind::Data,
    NodeKind::Webhook,
  ] {
    nodes.push(node(
      kind.as_str(),
      NodeConfig::default_for(kind),
      NodeStatus::Idle,
    ));
  }

  let mut variables = BTreeMap::new();
  variables.insert("baseUrl".to_string(), json!("https://api.example.com"));
  variables.insert("retries".to_string(), json!(3));
  variables.insert("flags".to_string(), json!({"dryRun": true}));

  Workflow {
    name: "User Sync".to_string(),
    description: "Sync users between systems".to_string(),
    nodes,
    connections: vec![
      Connection {
        id: "c1".to_string(),
        from: "fetch".to_string(),
        to: "check".to_string(),
      },
      Connection {
        id: "c2".to_string(),
        from: "check".to_string(),
        to: "fanout".to_string(),
      },
    ],
    variables,
  }
}

#[test]
fn test_roundtrip_resets_only_status() {
  let workflow = full_workflow();
  let imported = import(&export(&workflow).unwrap()).unwrap();

  let mut expected = workflow.clone();
  for node in &mut expected.nodes {
    node.status = NodeStatus::Idle;
  }

  assert_eq!(imported, expected);
}

#[test]
fn test_export_uses_documented_field_names() {
  let document = export(&full_workflow()).unwrap();
  let value: serde_json::Value = serde_json::from_str(&document).unwrap();

  assert_eq!(value["nodes"][0]["type"], "http");
  assert_eq!(value["nodes"][0]["config"]["method"], "POST");
  assert_eq!(value["nodes"][1]["config"]["trueNode"], "fanout");
  assert_eq!(value["nodes"][2]["config"]["waitForAll"], false);
  assert_eq!(value["nodes"][3]["config"]["maxIterations"], 100);
  assert_eq!(value["nodes"][2]["status"], "running");
  assert_eq!(value["connections"][0]["from"], "fetch");
  assert_eq!(value["variables"]["retries"], 3);
}

#[test]
fn test_import_rejects_connection_to_missing_node() {
  let document = json!({
    "nodes": [{
      "id": "x1",
      "type": "script",
      "position": {"x": 0, "y": 0},
      "config": {"language": "javascript", "code": ""}
    }],
    "connections": [{"id": "c1", "from": "x1", "to": "x2"}]
  })
  .to_string();

  match import(&document) {
    Err(WorkflowError::MalformedWorkflowFile(MalformedReason::DanglingConnection {
      connection_id,
      node_id,
    })) => {
      assert_eq!(connection_id, "c1");
      assert_eq!(node_id, "x2");
    }
    other => panic!("expected dangling connection, got {:?}", other),
  }
}

#[test]
fn test_import_rejects_unknown_node_type() {
  let document = json!({
    "nodes": [{
      "id": "x1",
      "type": "graphql",
      "position": {"x": 0, "y": 0},
      "config": {}
    }],
    "connections": []
  })
  .to_string();

  assert!(matches!(
    import(&document),
    Err(WorkflowError::MalformedWorkflowFile(MalformedReason::Parse(_)))
  ));
}
