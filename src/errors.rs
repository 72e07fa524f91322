use thiserror::Error;

/// Errors returned while dispatching a verification request or decoding its
/// response.
///
/// A non-zero `status` in the response body is not an error at this level;
/// see [`crate::domain::entities::status_code::handle_error`].
#[derive(Debug, Error)]
pub enum AppStoreError {
    #[error("Invalid endpoint URL '{url}': {reason}.")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Failed to encode verification request: {0}.")]
    Serialize(#[source] serde_json::Error),

    #[error("Callout to '{url}' failed to send: {source}.")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse callout response from '{url}': {source}.")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Verification did not complete within {0:?}.")]
    TimedOut(std::time::Duration),

    #[error("Invalid configuration: {0}.")]
    Config(String),
}

impl AppStoreError {
    /// Whether the error came from the network layer (including timeouts
    /// enforced by the HTTP client).
    pub fn is_transport(&self) -> bool {
        matches!(self, AppStoreError::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, AppStoreError::Decode { .. })
    }
}
