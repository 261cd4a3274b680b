use axum::{body::Bytes, http::StatusCode};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use crate::backend::{models::Recipe, upload::SearchUpload};
use crate::config::BackendConfig;
use crate::{Error, Result};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the external recipe recommendation service
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    url: String,
}

/// Successful backend response, body kept as received
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl BackendReply {
    pub fn recipes(&self) -> Result<Vec<Recipe>> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Re-encode the upload and POST it to the backend. No retries.
    pub async fn forward(&self, upload: SearchUpload) -> Result<BackendReply> {
        debug!(
            "Forwarding search to {} (image: {}, description: {})",
            self.url,
            upload.has_image(),
            upload.description.is_some()
        );

        let form = upload.into_form()?;
        let response = self.client.post(&self.url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            error!("Backend error: {} - {}", status, error_body);
            return Err(Error::Backend(status));
        }

        let body = response.bytes().await?;

        // Passed through as-is, but it has to be JSON
        serde_json::from_slice::<serde_json::Value>(&body)?;

        Ok(BackendReply { status, body })
    }

    /// Whether the backend answers at all; any HTTP status counts
    pub async fn probe(&self) -> bool {
        match self
            .client
            .head(&self.url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(_) => true,
            Err(e) => {
                debug!("Backend probe failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> BackendConfig {
        BackendConfig {
            url: url.to_string(),
            timeout_seconds: 5,
            user_agent: "MunchMatch/test".to_string(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new(&config("http://localhost:8501/api/search"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().url(), "http://localhost:8501/api/search");
    }

    #[test]
    fn test_reply_recipes() {
        let reply = BackendReply {
            status: StatusCode::OK,
            body: Bytes::from_static(
                br#"[{"title":"Ramen","ingredients":"noodles","instructions":"Boil.","score":0.8,"image_weight":1.0}]"#,
            ),
        };

        let recipes = reply.recipes().unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Ramen");
    }

    #[tokio::test]
    async fn test_forward_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/search")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = BackendClient::new(&config(&format!("{}/api/search", server.url()))).unwrap();
        let result = client
            .forward(SearchUpload {
                description: Some("soup".to_string()),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(Error::Backend(status)) if status.as_u16() == 503));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_forward_rejects_non_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/search")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = BackendClient::new(&config(&format!("{}/api/search", server.url()))).unwrap();
        let result = client.forward(SearchUpload::default()).await;

        assert!(matches!(result, Err(Error::InvalidJson(_))));
    }

    #[tokio::test]
    async fn test_probe_unreachable() {
        // Port 9 (discard) is not expected to run an HTTP server
        let client = BackendClient::new(&config("http://127.0.0.1:9/api/search")).unwrap();
        assert!(!client.probe().await);
    }
}
