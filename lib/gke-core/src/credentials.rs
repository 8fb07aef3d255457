//! Credential providers for synthesized kubeconfigs
//!
//! A provider decides what the single `users` entry of a synthesized
//! kubeconfig contains. The resolver never acquires or refreshes tokens
//! itself; that is left to whatever mechanism the entry points at.

use gke_api::v1::CLOUD_PLATFORM_SCOPE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name kube uses to select the Google OAuth auth provider
pub const GCP_AUTH_PROVIDER: &str = "gcp";

/// Supplies the auth-info entry of a synthesized kubeconfig
pub trait CredentialProvider: Send + Sync {
    fn auth_info(&self) -> AuthInfoEntry;
}

/// A kubeconfig `user` entry
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuthInfoEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<AuthProviderEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl fmt::Debug for AuthInfoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInfoEntry")
            .field("auth_provider", &self.auth_provider)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// External auth-provider reference, e.g. `gcp` with its options
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthProviderEntry {
    pub name: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// Defers token acquisition to kube's `gcp` auth provider
#[derive(Clone, Debug)]
pub struct GcpAuthProvider {
    scopes: Vec<String>,
}

impl GcpAuthProvider {
    pub fn new() -> Self {
        Self {
            scopes: vec![CLOUD_PLATFORM_SCOPE.to_string()],
        }
    }

    /// Request additional OAuth scopes on top of cloud-platform
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

impl Default for GcpAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for GcpAuthProvider {
    fn auth_info(&self) -> AuthInfoEntry {
        let mut config = BTreeMap::new();
        // kube splits this on commas
        config.insert("scopes".to_string(), self.scopes.join(","));

        AuthInfoEntry {
            auth_provider: Some(AuthProviderEntry {
                name: GCP_AUTH_PROVIDER.to_string(),
                config,
            }),
            token: None,
        }
    }
}

/// Embeds a bearer token obtained out of band (e.g. `gcloud auth print-access-token`)
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl CredentialProvider for StaticTokenProvider {
    fn auth_info(&self) -> AuthInfoEntry {
        AuthInfoEntry {
            auth_provider: None,
            token: Some(self.token.clone()),
        }
    }
}
