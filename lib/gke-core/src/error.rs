use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolverError>;

/// Boxed error returned by control-plane and transport collaborators
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Invalid resolver configuration: {0}")]
    InvalidConfig(String),

    #[error("Cluster name must not be empty")]
    InvalidClusterName,

    #[error("could not create google container client: {0}")]
    ClientInit(#[source] BoxError),

    #[error("error listing container clusters: {0}")]
    List(#[source] BoxError),

    #[error("error getting container cluster: {0}")]
    Get(#[source] BoxError),

    #[error("invalid certificate cluster={context} cert={certificate}: {source}")]
    CertificateDecode {
        context: String,
        certificate: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("error building kubernetes client for {context}: {source}")]
    TransportBuild {
        context: String,
        #[source]
        source: BoxError,
    },
}
