//! Kubernetes client construction from a synthesized kubeconfig

use crate::kubeconfig::SynthesizedConfig;
use crate::{BoxError, ResolverError, Result};
use kube::config::KubeConfigOptions;
use kube::{Client, Config};
use std::fmt;
use tracing::debug;

/// A connected Kubernetes client and the transport configuration it was built from
#[derive(Clone)]
pub struct ClusterClient {
    context: String,
    client: Client,
    config: Config,
}

impl ClusterClient {
    /// Build a client for the synthesized configuration's single context
    pub async fn from_synthesized(synthesized: &SynthesizedConfig) -> Result<Self> {
        let context = synthesized.context().to_string();
        let transport_error = |source: BoxError| {
            ResolverError::TransportBuild {
                context: context.clone(),
                source,
            }
        };

        let kubeconfig = synthesized.to_kubeconfig()?;
        let options = KubeConfigOptions {
            context: Some(context.clone()),
            ..Default::default()
        };

        let config = Config::from_custom_kubeconfig(kubeconfig, &options)
            .await
            .map_err(|e| transport_error(Box::new(e)))?;

        // kube's rustls connector needs a process-level crypto provider;
        // an Err here only means one is already installed
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = Client::try_from(config.clone()).map_err(|e| transport_error(Box::new(e)))?;

        debug!("Built kubernetes client for {} at {}", context, config.cluster_url);
        Ok(Self {
            context,
            client,
            config,
        })
    }

    /// Context name the client was built for
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Get the underlying Kubernetes client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get the transport configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Split into the client and its configuration
    pub fn into_parts(self) -> (Client, Config) {
        (self.client, self.config)
    }
}

impl fmt::Debug for ClusterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterClient")
            .field("context", &self.context)
            .field("cluster_url", &self.config.cluster_url)
            .finish_non_exhaustive()
    }
}
