use serde::{Deserialize, Serialize};

/// Error body returned by Google APIs on non-2xx responses
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiStatus,
}

/// Status carried in an error body
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// HTTP status code
    #[serde(default)]
    pub code: u16,

    #[serde(default)]
    pub message: String,

    /// Canonical status name, e.g. NOT_FOUND or PERMISSION_DENIED
    #[serde(default)]
    pub status: String,
}

impl ApiErrorEnvelope {
    /// Parse an error body, returning None when it is not an error envelope
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
