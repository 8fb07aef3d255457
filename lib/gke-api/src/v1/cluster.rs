use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Cluster is a GKE cluster descriptor as returned by
/// `projects.locations.clusters.get`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Cluster name, unique within a project and location
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Server-assigned unique identifier
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Region or zone the cluster control plane lives in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// Zones the cluster's nodes are placed in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<String>,

    /// IP address (or host) of the cluster's Kubernetes master endpoint
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub endpoint: String,

    /// Authentication material for the master endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_auth: Option<MasterAuth>,

    /// Lifecycle status: PROVISIONING, RUNNING, RECONCILING, STOPPING, ERROR, DEGRADED
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status_message: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_master_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_node_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnetwork: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,

    /// RFC3339 creation timestamp
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub create_time: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource_labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_pools: Vec<NodePool>,

    /// Every other field returned by the API, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Cluster {
    /// Base64-encoded public certificate of the cluster's root CA, or an
    /// empty string when the descriptor carries no master auth
    pub fn ca_certificate(&self) -> &str {
        self.master_auth
            .as_ref()
            .map(|auth| auth.cluster_ca_certificate.as_str())
            .unwrap_or_default()
    }

    /// Whether the control plane reports RUNNING
    pub fn is_running(&self) -> bool {
        self.status == "RUNNING"
    }
}

/// MasterAuth holds the credentials used to reach the master endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterAuth {
    /// Base64-encoded public certificate that is the root of trust for the cluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_ca_certificate: String,

    /// Base64-encoded client certificate, only set when client certificates are enabled
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_certificate: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// NodePool is a group of nodes within a cluster
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePool {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Response of `projects.locations.clusters.list`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClustersResponse {
    /// Clusters in the requested project and location(s); omitted by the API when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<Cluster>,

    /// Zones that could not be reached while listing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_zones: Vec<String>,
}
