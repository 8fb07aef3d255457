use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContainerError>;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Authentication error: {0}")]
    Auth(#[from] gcp_auth::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Container API error {code} {status}: {message}")]
    Api {
        code: u16,
        status: String,
        message: String,
    },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
