//! Remote todo source client

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::TodoPage;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::endpoint::TodoEndpoint;
use super::error::NetworkError;
use super::monitor::NetworkMonitor;

/// Where the reconciler gets the remote todo list from
#[async_trait]
pub trait TodoSource: Send + Sync {
    /// Fetch the remote todo list in one request
    async fn fetch_todo_list(&self) -> Result<TodoPage, NetworkError>;
}

/// HTTP client for the remote todo API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    monitor: Arc<dyn NetworkMonitor>,
}

impl ApiClient {
    /// Create a client for `base_url` whose requests give up after `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration, monitor: Arc<dyn NetworkMonitor>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            monitor,
        })
    }

    async fn request(&self, endpoint: TodoEndpoint) -> Result<TodoPage, NetworkError> {
        let url = endpoint.url(&self.base_url);
        let mut request = self.client.request(endpoint.method(), &url);
        for (name, value) in endpoint.headers() {
            request = request.header(*name, *value);
        }

        debug!("{} {}", endpoint.method(), url);
        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            NetworkError::from(e)
        })?;

        let status = response.status();
        info!("{} {} -> {}", endpoint.method(), url, status.as_u16());
        if !status.is_success() {
            return Err(NetworkError::from_status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| NetworkError::TransportError(e.to_string()))?;
        if bytes.is_empty() {
            return Err(NetworkError::NoData);
        }

        serde_json::from_slice::<TodoPage>(&bytes).map_err(|e| NetworkError::DecodingFailed(e.to_string()))
    }
}

#[async_trait]
impl TodoSource for ApiClient {
    async fn fetch_todo_list(&self) -> Result<TodoPage, NetworkError> {
        if !self.monitor.has_internet_connection() {
            debug!("Skipping todo fetch: no internet connection");
            return Err(NetworkError::NoInternetConnection);
        }
        self.request(TodoEndpoint::FetchTodos).await
    }
}
