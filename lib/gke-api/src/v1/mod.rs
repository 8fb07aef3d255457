/// Container API version v1

pub mod cluster;
pub mod status;
pub mod resource;

pub use cluster::{Cluster, ListClustersResponse, MasterAuth, NodePool};
pub use status::{ApiErrorEnvelope, ApiStatus};
pub use resource::{cluster_resource_name, locations_parent, ALL_LOCATIONS};

/// Default endpoint for the Container API
pub const DEFAULT_ENDPOINT: &str = "https://container.googleapis.com/v1";
/// OAuth scope granting access to Google Cloud APIs
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
