//! Kubeconfig synthesis from GKE cluster descriptors

use crate::credentials::{AuthInfoEntry, CredentialProvider};
use crate::{ResolverError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use gke_api::Cluster;
use kube::config::Kubeconfig;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Context name for a cluster: `gke_<project>_<location>_<name>`
pub fn context_name(project: &str, location: &str, name: &str) -> String {
    format!("gke_{}_{}_{}", project, location, name)
}

/// Server URL for a master endpoint. GKE reports bare hosts; any scheme
/// already present is replaced so the URL carries exactly one.
pub fn server_url(endpoint: &str) -> String {
    let host = match endpoint.find("://") {
        Some(idx) => &endpoint[idx + 3..],
        None => endpoint,
    };
    format!("https://{}", host)
}

/// Decode a base64 certificate, skipping line breaks the way PEM-wrapped
/// payloads carry them
fn decode_certificate(encoded: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact)
}

/// A kubeconfig `cluster` entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterEntry {
    pub server: String,
    /// Decoded CA certificate (PEM bytes for real clusters)
    pub certificate_authority_data: Vec<u8>,
}

/// A kubeconfig `context` entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextEntry {
    pub cluster: String,
    pub auth_info: String,
}

/// In-memory kubeconfig scoped to exactly one cluster, context and user,
/// all keyed by the same context name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthesizedConfig {
    context: String,
    pub clusters: BTreeMap<String, ClusterEntry>,
    pub contexts: BTreeMap<String, ContextEntry>,
    pub auth_infos: BTreeMap<String, AuthInfoEntry>,
}

impl SynthesizedConfig {
    /// Build the configuration for `cluster`. Location and name come from
    /// the descriptor, not from what the caller asked for.
    pub fn from_cluster(
        project: &str,
        cluster: &Cluster,
        credentials: &dyn CredentialProvider,
    ) -> Result<Self> {
        let context = context_name(project, &cluster.location, &cluster.name);

        let encoded = cluster.ca_certificate();
        let certificate_authority_data =
            decode_certificate(encoded)
                .map_err(|source| ResolverError::CertificateDecode {
                    context: context.clone(),
                    certificate: encoded.to_string(),
                    source,
                })?;

        let server = server_url(&cluster.endpoint);
        debug!("Synthesized kubeconfig context {} for {}", context, server);

        let mut clusters = BTreeMap::new();
        clusters.insert(
            context.clone(),
            ClusterEntry {
                server,
                certificate_authority_data,
            },
        );

        let mut contexts = BTreeMap::new();
        contexts.insert(
            context.clone(),
            ContextEntry {
                cluster: context.clone(),
                auth_info: context.clone(),
            },
        );

        let mut auth_infos = BTreeMap::new();
        auth_infos.insert(context.clone(), credentials.auth_info());

        Ok(Self {
            context,
            clusters,
            contexts,
            auth_infos,
        })
    }

    /// The single context name, also the current context
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Cluster entry of the current context
    pub fn cluster(&self) -> Option<&ClusterEntry> {
        self.clusters.get(&self.context)
    }

    /// Render as a standard kubeconfig document
    pub fn to_document(&self) -> Value {
        let clusters: Vec<Value> = self
            .clusters
            .iter()
            .map(|(name, cluster)| {
                let mut entry = json!({ "server": cluster.server });
                if !cluster.certificate_authority_data.is_empty() {
                    entry["certificate-authority-data"] =
                        json!(STANDARD.encode(&cluster.certificate_authority_data));
                }
                json!({ "name": name, "cluster": entry })
            })
            .collect();

        let contexts: Vec<Value> = self
            .contexts
            .iter()
            .map(|(name, context)| {
                json!({
                    "name": name,
                    "context": { "cluster": context.cluster, "user": context.auth_info },
                })
            })
            .collect();

        let users: Vec<Value> = self
            .auth_infos
            .iter()
            .map(|(name, auth_info)| json!({ "name": name, "user": auth_info }))
            .collect();

        json!({
            "apiVersion": "v1",
            "kind": "Config",
            "clusters": clusters,
            "contexts": contexts,
            "users": users,
            "current-context": self.context,
        })
    }

    /// Convert into kube's kubeconfig model
    pub fn to_kubeconfig(&self) -> Result<Kubeconfig> {
        serde_json::from_value(self.to_document()).map_err(|e| ResolverError::TransportBuild {
            context: self.context.clone(),
            source: Box::new(e),
        })
    }

    /// Render as kubeconfig YAML
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.to_document())
    }
}
