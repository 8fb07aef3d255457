//! Control-plane collaborators consumed by the resolver

use crate::BoxError;
use async_trait::async_trait;
use gke_api::{Cluster, ListClustersResponse};

/// Cluster-management API offering list and get
#[async_trait]
pub trait ClusterManager: Send + Sync {
    /// List clusters under `parent` (`projects/<p>/locations/<l>`, `-` for all)
    async fn list_clusters(&self, parent: &str) -> Result<ListClustersResponse, BoxError>;

    /// Fetch a cluster by its fully-qualified resource name
    async fn get_cluster(&self, name: &str) -> Result<Cluster, BoxError>;
}

/// Creates a fresh control-plane client for each resolver call
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn ClusterManager>, BoxError>;
}
