use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;

/// Raw outcome of one HTTP exchange. `body` is `None` for empty responses (204).
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl TransportResponse {
    pub fn json(status: u16, body: Value) -> Self {
        TransportResponse {
            status,
            body: Some(body),
        }
    }

    pub fn no_content() -> Self {
        TransportResponse {
            status: 204,
            body: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The seam between components and the network.
///
/// Paths are relative to the backend base (`/roster`, `/staff/3`) and never
/// carry the query string. Only failures to complete the exchange are
/// `Err`; HTTP error statuses come back as a normal response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, String)])
        -> Result<TransportResponse, ApiError>;
    async fn post(&self, path: &str, body: &Value) -> Result<TransportResponse, ApiError>;
    async fn delete(&self, path: &str) -> Result<TransportResponse, ApiError>;
}

pub struct ReqwestTransport {
    client: Client,
    base: Url,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(ReqwestTransport {
            client,
            base: config.api_base.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn finish(response: reqwest::Response) -> Result<TransportResponse, ApiError> {
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) => Some(value),
                // Non-JSON error pages (proxies, 502s) keep their text for the message.
                Err(_) => Some(Value::String(String::from_utf8_lossy(&bytes).into_owned())),
            }
        };
        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<TransportResponse, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::finish(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<TransportResponse, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::finish(response).await
    }

    async fn delete(&self, path: &str) -> Result<TransportResponse, ApiError> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::finish(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn transport_for(base: &str) -> ReqwestTransport {
        let config = Config {
            api_base: Url::parse(base).unwrap(),
            timeout: Duration::from_secs(1),
            export_dir: PathBuf::from("."),
        };
        ReqwestTransport::new(&config).unwrap()
    }

    #[test]
    fn joins_base_and_path() {
        assert_eq!(
            transport_for("http://localhost:8000").url("/staff/1"),
            "http://localhost:8000/staff/1"
        );
        assert_eq!(
            transport_for("https://host.example/api/").url("/export/roster.csv"),
            "https://host.example/api/export/roster.csv"
        );
    }
}
