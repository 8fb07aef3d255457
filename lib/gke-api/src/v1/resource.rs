//! Resource names for the Container API

/// Location wildcard matching every region and zone of a project
pub const ALL_LOCATIONS: &str = "-";

/// Parent resource for cluster listing: `projects/<project>/locations/<location>`
pub fn locations_parent(project: &str, location: &str) -> String {
    format!("projects/{}/locations/{}", project, location)
}

/// Fully-qualified cluster name: `projects/<project>/locations/<location>/clusters/<cluster>`
pub fn cluster_resource_name(project: &str, location: &str, cluster: &str) -> String {
    format!("{}/clusters/{}", locations_parent(project, location), cluster)
}
