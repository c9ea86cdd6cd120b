use thiserror::Error;

/// Failures talking to the generative-text service.
///
/// These never reach callers of [`crate::Advisor::get_advice`]; they are
/// logged and replaced with a fixed reply.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("response deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}
