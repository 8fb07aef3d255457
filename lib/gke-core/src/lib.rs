//! Cluster credential resolution for GKE
//!
//! This library provides:
//! - ClusterResolver for listing and fetching clusters through a control-plane connector
//! - Kubeconfig synthesis scoped to a single cluster context
//! - Kubernetes client construction from the synthesized kubeconfig
//! - Pluggable credential providers for the kubeconfig's user entry

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod kubeconfig;
pub mod manager;
pub mod resolver;

pub use client::ClusterClient;
pub use config::ResolverConfig;
pub use credentials::{
    AuthInfoEntry, AuthProviderEntry, CredentialProvider, GcpAuthProvider, StaticTokenProvider,
};
pub use error::{BoxError, ResolverError, Result};
pub use kubeconfig::{context_name, server_url, SynthesizedConfig};
pub use manager::{ClusterManager, Connector};
pub use resolver::ClusterResolver;
