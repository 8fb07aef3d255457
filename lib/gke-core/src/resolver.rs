//! Cluster credential resolver
//!
//! Lists and fetches GKE clusters, and turns a cluster descriptor into a
//! connected Kubernetes client. Every call connects a fresh control-plane
//! client; nothing is cached between calls.

use crate::client::ClusterClient;
use crate::config::ResolverConfig;
use crate::credentials::{CredentialProvider, GcpAuthProvider};
use crate::kubeconfig::SynthesizedConfig;
use crate::manager::{ClusterManager, Connector};
use crate::{ResolverError, Result};
use gke_api::v1::{cluster_resource_name, locations_parent, ALL_LOCATIONS};
use gke_api::{Cluster, ListClustersResponse};
use std::sync::Arc;
use tracing::{debug, info};

/// ClusterResolver resolves GKE clusters in one project and region
pub struct ClusterResolver<C> {
    config: ResolverConfig,
    connector: C,
    credentials: Arc<dyn CredentialProvider>,
}

impl<C: Connector> ClusterResolver<C> {
    /// Create a resolver using the `gcp` auth provider for synthesized kubeconfigs
    pub fn new(config: ResolverConfig, connector: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            connector,
            credentials: Arc::new(GcpAuthProvider::new()),
        })
    }

    /// Replace the credential provider
    pub fn with_credentials(mut self, credentials: impl CredentialProvider + 'static) -> Self {
        self.credentials = Arc::new(credentials);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    async fn connect(&self) -> Result<Box<dyn ClusterManager>> {
        self.connector.connect().await.map_err(ResolverError::ClientInit)
    }

    /// List clusters across all locations of the project
    pub async fn list_clusters(&self) -> Result<ListClustersResponse> {
        let manager = self.connect().await?;
        let parent = locations_parent(&self.config.project, ALL_LOCATIONS);
        debug!("Listing clusters under {}", parent);

        let clusters = manager
            .list_clusters(&parent)
            .await
            .map_err(ResolverError::List)?;

        debug!("Found {} clusters", clusters.clusters.len());
        Ok(clusters)
    }

    /// Fetch a single cluster in the configured region
    pub async fn get_cluster(&self, name: &str) -> Result<Cluster> {
        if name.is_empty() {
            return Err(ResolverError::InvalidClusterName);
        }

        let manager = self.connect().await?;
        let resource = cluster_resource_name(&self.config.project, &self.config.region, name);
        debug!("Getting cluster {}", resource);

        manager.get_cluster(&resource).await.map_err(ResolverError::Get)
    }

    /// Fetch a cluster and synthesize a single-context kubeconfig for it
    pub async fn get_cluster_kubeconfig(&self, name: &str) -> Result<SynthesizedConfig> {
        let cluster = self.get_cluster(name).await?;
        SynthesizedConfig::from_cluster(&self.config.project, &cluster, self.credentials.as_ref())
    }

    /// Fetch a cluster and build a connected Kubernetes client for it
    pub async fn get_cluster_client(&self, name: &str) -> Result<ClusterClient> {
        let synthesized = self.get_cluster_kubeconfig(name).await?;
        let client = ClusterClient::from_synthesized(&synthesized).await?;

        info!("Resolved kubernetes client for {}", client.context());
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::AuthInfoEntry;
    use crate::BoxError;
    use async_trait::async_trait;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use gke_api::MasterAuth;
    use serde_json::json;
    use std::sync::Mutex;

    const TEST_CA: &str = include_str!("../testdata/ca.crt");

    /// Anonymous credentials, so client construction needs no Google credentials
    struct AnonymousProvider;

    impl CredentialProvider for AnonymousProvider {
        fn auth_info(&self) -> AuthInfoEntry {
            AuthInfoEntry::default()
        }
    }

    #[derive(Clone, Default)]
    struct FakeManager {
        list: ListClustersResponse,
        clusters: Vec<Cluster>,
        error: Option<String>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ClusterManager for FakeManager {
        async fn list_clusters(&self, parent: &str) -> std::result::Result<ListClustersResponse, BoxError> {
            self.requests.lock().unwrap().push(parent.to_string());
            match &self.error {
                Some(e) => Err(e.clone().into()),
                None => Ok(self.list.clone()),
            }
        }

        async fn get_cluster(&self, name: &str) -> std::result::Result<Cluster, BoxError> {
            self.requests.lock().unwrap().push(name.to_string());
            if let Some(e) = &self.error {
                return Err(e.clone().into());
            }
            let short = name.rsplit('/').next().unwrap_or_default();
            self.clusters
                .iter()
                .find(|c| c.name == short)
                .cloned()
                .ok_or_else(|| format!("Not found: {}", name).into())
        }
    }

    struct FakeConnector {
        manager: Option<FakeManager>,
    }

    #[async_trait]
    impl Connector for FakeConnector {
        async fn connect(&self) -> std::result::Result<Box<dyn ClusterManager>, BoxError> {
            match &self.manager {
                Some(manager) => Ok(Box::new(manager.clone())),
                None => Err("no application default credentials".into()),
            }
        }
    }

    fn cluster(name: &str, location: &str, endpoint: &str, ca: &str) -> Cluster {
        Cluster {
            name: name.to_string(),
            location: location.to_string(),
            endpoint: endpoint.to_string(),
            master_auth: Some(MasterAuth {
                cluster_ca_certificate: ca.to_string(),
                ..Default::default()
            }),
            status: "RUNNING".to_string(),
            ..Default::default()
        }
    }

    fn resolver(manager: FakeManager) -> ClusterResolver<FakeConnector> {
        ClusterResolver::new(
            ResolverConfig::new("acme", "us-central1").unwrap(),
            FakeConnector {
                manager: Some(manager),
            },
        )
        .unwrap()
        .with_credentials(AnonymousProvider)
    }

    #[tokio::test]
    async fn test_list_clusters_passes_response_through() {
        let mut unmodeled = cluster("prod", "us-central1", "34.1.2.3", "YWJj");
        unmodeled.extra.insert("autopilot".to_string(), json!({ "enabled": true }));

        let list = ListClustersResponse {
            clusters: vec![
                unmodeled,
                cluster("staging", "europe-west1-b", "10.0.0.1", "YWJj"),
            ],
            missing_zones: vec!["asia-east1-a".to_string()],
        };
        let manager = FakeManager {
            list: list.clone(),
            ..Default::default()
        };
        let requests = manager.requests.clone();

        let result = resolver(manager).list_clusters().await.unwrap();

        assert_eq!(result, list);
        assert_eq!(
            requests.lock().unwrap().as_slice(),
            ["projects/acme/locations/-".to_string()]
        );
    }

    #[tokio::test]
    async fn test_list_clusters_error() {
        let manager = FakeManager {
            error: Some("permission denied".to_string()),
            ..Default::default()
        };

        let err = resolver(manager).list_clusters().await.unwrap_err();
        assert!(matches!(err, ResolverError::List(_)));
        assert_eq!(
            err.to_string(),
            "error listing container clusters: permission denied"
        );
    }

    #[tokio::test]
    async fn test_get_cluster_uses_region_path() {
        let prod = cluster("prod", "us-central1", "34.1.2.3", "YWJj");
        let manager = FakeManager {
            clusters: vec![prod.clone()],
            ..Default::default()
        };
        let requests = manager.requests.clone();

        let result = resolver(manager).get_cluster("prod").await.unwrap();

        assert_eq!(result, prod);
        assert_eq!(
            requests.lock().unwrap().as_slice(),
            ["projects/acme/locations/us-central1/clusters/prod".to_string()]
        );
    }

    #[tokio::test]
    async fn test_get_cluster_not_found() {
        let err = resolver(FakeManager::default())
            .get_cluster("missing")
            .await
            .unwrap_err();

        assert!(matches!(err, ResolverError::Get(_)));
        assert!(err.to_string().starts_with("error getting container cluster: "));
    }

    #[tokio::test]
    async fn test_empty_cluster_name_skips_network() {
        let manager = FakeManager::default();
        let requests = manager.requests.clone();

        let err = resolver(manager).get_cluster("").await.unwrap_err();

        assert!(matches!(err, ResolverError::InvalidClusterName));
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connector_failure_is_client_init() {
        let resolver = ClusterResolver::new(
            ResolverConfig::new("acme", "us-central1").unwrap(),
            FakeConnector { manager: None },
        )
        .unwrap();

        let err = resolver.list_clusters().await.unwrap_err();
        assert!(matches!(err, ResolverError::ClientInit(_)));
        assert!(err
            .to_string()
            .starts_with("could not create google container client"));

        let err = resolver.get_cluster_client("prod").await.unwrap_err();
        assert!(matches!(err, ResolverError::ClientInit(_)));
    }

    #[tokio::test]
    async fn test_kubeconfig_uses_descriptor_location() {
        // Zonal cluster addressed through its region
        let manager = FakeManager {
            clusters: vec![cluster("prod", "us-central1-a", "34.1.2.3", "YWJj")],
            ..Default::default()
        };

        let config = resolver(manager).get_cluster_kubeconfig("prod").await.unwrap();

        assert_eq!(config.context(), "gke_acme_us-central1-a_prod");
        let entry = config.cluster().unwrap();
        assert_eq!(entry.server, "https://34.1.2.3");
        assert_eq!(entry.certificate_authority_data, b"abc".to_vec());
    }

    #[tokio::test]
    async fn test_invalid_certificate_returns_no_client() {
        let manager = FakeManager {
            clusters: vec![cluster("prod", "us-central1", "34.1.2.3", "not-base64!")],
            ..Default::default()
        };

        let result = resolver(manager).get_cluster_client("prod").await;

        match result {
            Err(ResolverError::CertificateDecode {
                context,
                certificate,
                ..
            }) => {
                assert_eq!(context, "gke_acme_us-central1_prod");
                assert_eq!(certificate, "not-base64!");
            }
            other => panic!("expected certificate decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_cluster_client() {
        let ca = STANDARD.encode(TEST_CA);
        let manager = FakeManager {
            clusters: vec![cluster("prod", "us-central1", "34.1.2.3", &ca)],
            ..Default::default()
        };

        let client = resolver(manager).get_cluster_client("prod").await.unwrap();

        assert_eq!(client.context(), "gke_acme_us-central1_prod");
        assert_eq!(client.config().cluster_url.scheme_str(), Some("https"));
        assert_eq!(client.config().cluster_url.host(), Some("34.1.2.3"));
        assert!(client.config().root_cert.is_some());
    }

    #[tokio::test]
    async fn test_invalid_server_url_is_transport_error() {
        let ca = STANDARD.encode(TEST_CA);
        let manager = FakeManager {
            clusters: vec![cluster("prod", "us-central1", "not a host", &ca)],
            ..Default::default()
        };

        let err = resolver(manager).get_cluster_client("prod").await.unwrap_err();

        match err {
            ResolverError::TransportBuild { context, .. } => {
                assert_eq!(context, "gke_acme_us-central1_prod");
            }
            other => panic!("expected transport build error, got {}", other),
        }
    }
}
