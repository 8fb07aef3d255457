//! Resolver configuration

use crate::{ResolverError, Result};
use serde::{Deserialize, Serialize};

/// Project and region every resolver operation is scoped to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// GCP project ID owning the clusters
    pub project: String,
    /// Region (or zone) used to address a single cluster
    pub region: String,
}

impl ResolverConfig {
    /// Create a configuration, rejecting empty project or region
    pub fn new(project: impl Into<String>, region: impl Into<String>) -> Result<Self> {
        let config = Self {
            project: project.into(),
            region: region.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.project.trim().is_empty() {
            return Err(ResolverError::InvalidConfig("project must not be empty".to_string()));
        }
        if self.region.trim().is_empty() {
            return Err(ResolverError::InvalidConfig("region must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ResolverConfig::new("acme", "us-central1").unwrap();
        assert_eq!(config.project, "acme");
        assert_eq!(config.region, "us-central1");
    }

    #[test]
    fn test_empty_project_rejected() {
        let result = ResolverConfig::new("", "us-central1");
        assert!(matches!(result, Err(ResolverError::InvalidConfig(_))));
    }

    #[test]
    fn test_blank_region_rejected() {
        let result = ResolverConfig::new("acme", "  ");
        assert!(matches!(result, Err(ResolverError::InvalidConfig(_))));
    }
}
