//! Google Container API client
//!
//! Talks to `container.googleapis.com` over REST, authenticating with
//! Application Default Credentials, and plugs into the resolver as its
//! control-plane connector.

pub mod client;
pub mod error;

pub use client::{
    access_token, AccessTokenSource, AdcTokenSource, ContainerClient, ContainerConfig,
    ContainerConnector,
};
pub use error::ContainerError;
