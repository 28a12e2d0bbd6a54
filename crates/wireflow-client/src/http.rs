use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use wireflow_config::{ExecutionRequest, ExecutionResponse, SaveRequest, SavedWorkflow};

use crate::backend::WorkflowBackend;
use crate::config::ClientConfig;
use crate::error::BackendError;

const EXECUTE_PATH: &str = "/api/workflows/execute";
const SAVE_PATH: &str = "/api/workflows";

/// [`WorkflowBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
  client: Client,
  base_url: Url,
  api_token: Option<String>,
}

impl HttpBackend {
  pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout() {
      builder = builder.timeout(timeout);
    }

    Ok(Self {
      client: builder.build()?,
      base_url: Url::parse(&config.api_url)?,
      api_token: config.api_token.clone(),
    })
  }

  /// Resolve an absolute API path against the base URL.
  fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
    Ok(self.base_url.join(path)?)
  }

  async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
  where
    B: Serialize + ?Sized + Sync,
    R: DeserializeOwned,
  {
    let url = self.endpoint(path)?;
    debug!(url = %url, "sending backend request");

    let mut request = self.client.post(url).json(body);
    if let Some(token) = &self.api_token {
      request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
      return Err(BackendError::Status {
        status: status.as_u16(),
        body: text,
      });
    }

    serde_json::from_str(&text).map_err(BackendError::Decode)
  }
}

#[async_trait]
impl WorkflowBackend for HttpBackend {
  async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResponse, BackendError> {
    self.post_json(EXECUTE_PATH, request).await
  }

  async fn save(&self, request: &SaveRequest) -> Result<SavedWorkflow, BackendError> {
    self.post_json(SAVE_PATH, request).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn backend(api_url: &str) -> HttpBackend {
    HttpBackend::new(&ClientConfig {
      api_url: api_url.to_string(),
      ..Default::default()
    })
    .unwrap()
  }

  #[test]
  fn test_endpoint_ignores_base_path() {
    let backend = backend("https://app.example.com/dashboard/");
    assert_eq!(
      backend.endpoint(EXECUTE_PATH).unwrap().as_str(),
      "https://app.example.com/api/workflows/execute"
    );
  }

  #[test]
  fn test_invalid_base_url() {
    let result = HttpBackend::new(&ClientConfig {
      api_url: "not a url".to_string(),
      ..Default::default()
    });
    assert!(matches!(result, Err(BackendError::InvalidUrl(_))));
  }
}
