//! GKE Container API types
//!
//! This library defines the subset of the `container.googleapis.com` v1
//! resources used to resolve cluster credentials:
//! - Cluster: a GKE cluster descriptor (endpoint, CA certificate, location)
//! - ListClustersResponse: the result of listing clusters under a project
//! - ApiErrorEnvelope: the error body returned by Google APIs
//!
//! Fields that are not modeled explicitly are kept in a flattened map so
//! descriptors pass through unchanged.

pub mod v1;

pub use v1::{
    ApiErrorEnvelope, ApiStatus, Cluster, ListClustersResponse, MasterAuth, NodePool,
};
