//! REST client for the Container API

use crate::error::{ContainerError, Result};
use async_trait::async_trait;
use gcp_auth::TokenProvider;
use gke_api::v1::{CLOUD_PLATFORM_SCOPE, DEFAULT_ENDPOINT};
use gke_api::{ApiErrorEnvelope, Cluster, ListClustersResponse};
use gke_core::{BoxError, ClusterManager, Connector};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Container API client configuration
#[derive(Clone, Debug)]
pub struct ContainerConfig {
    /// API root, e.g. `https://container.googleapis.com/v1`
    pub base_url: String,
    /// Timeout for a single request
    pub timeout: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Obtain an access token for the cloud-platform scope from Application
/// Default Credentials
pub async fn access_token() -> Result<String> {
    AdcTokenSource::new().await?.access_token().await
}

/// Source of bearer tokens for Container API requests
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// Tokens for the cloud-platform scope from Application Default Credentials
pub struct AdcTokenSource {
    provider: Arc<dyn TokenProvider>,
}

impl AdcTokenSource {
    pub async fn new() -> Result<Self> {
        Ok(Self::from_provider(gcp_auth::provider().await?))
    }

    pub fn from_provider(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl AccessTokenSource for AdcTokenSource {
    async fn access_token(&self) -> Result<String> {
        let token = self.provider.token(&[CLOUD_PLATFORM_SCOPE]).await?;
        Ok(token.as_str().to_string())
    }
}

/// ContainerClient issues authenticated requests to the Container API
pub struct ContainerClient {
    http: reqwest::Client,
    tokens: Arc<dyn AccessTokenSource>,
    base_url: String,
}

impl ContainerClient {
    /// Create a client using Application Default Credentials
    pub async fn new(config: &ContainerConfig) -> Result<Self> {
        let tokens = AdcTokenSource::new().await?;
        Self::with_token_source(config, Arc::new(tokens))
    }

    /// Create a client with an explicit token source
    pub fn with_token_source(
        config: &ContainerConfig,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            tokens,
            base_url: config.base_url.clone(),
        })
    }

    /// URL of a resource relative to the API root
    pub fn url(&self, resource: &str) -> String {
        resource_url(&self.base_url, resource)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let token = self.tokens.access_token().await?;

        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Container API returned {} for {}", status, url);
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// List clusters under `projects/<project>/locations/<location>`
    pub async fn list(&self, parent: &str) -> Result<ListClustersResponse> {
        self.get(&self.url(&format!("{}/clusters", parent))).await
    }

    /// Get a cluster by `projects/<project>/locations/<location>/clusters/<name>`
    pub async fn cluster(&self, name: &str) -> Result<Cluster> {
        self.get(&self.url(name)).await
    }
}

#[async_trait]
impl ClusterManager for ContainerClient {
    async fn list_clusters(&self, parent: &str) -> std::result::Result<ListClustersResponse, BoxError> {
        Ok(self.list(parent).await?)
    }

    async fn get_cluster(&self, name: &str) -> std::result::Result<Cluster, BoxError> {
        Ok(self.cluster(name).await?)
    }
}

/// Connects a fresh ContainerClient on every resolver call
#[derive(Clone, Debug, Default)]
pub struct ContainerConnector {
    config: ContainerConfig,
}

impl ContainerConnector {
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for ContainerConnector {
    async fn connect(&self) -> std::result::Result<Box<dyn ClusterManager>, BoxError> {
        let client = ContainerClient::new(&self.config).await?;
        Ok(Box::new(client))
    }
}

fn resource_url(base_url: &str, resource: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        resource.trim_start_matches('/')
    )
}

fn api_error(code: u16, body: &str) -> ContainerError {
    match ApiErrorEnvelope::parse(body) {
        Some(envelope) => ContainerError::Api {
            code,
            status: envelope.error.status,
            message: envelope.error.message,
        },
        None => ContainerError::Api {
            code,
            status: String::new(),
            message: body.trim().to_string(),
        },
    }
}
