//! HTTP failure taxonomy for the REST client.

use store::ResourceError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, CORS, ...).
    #[error("{method} {url} failed: {source}")]
    Request {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{method} {url} returned {status}")]
    Status {
        method: &'static str,
        url: String,
        status: reqwest::StatusCode,
    },

    /// The configured base URL cannot address an item.
    #[error("cannot build item url from {url}: {reason}")]
    Url { url: String, reason: String },

    /// The response body did not match the expected shape.
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ApiError> for ResourceError {
    fn from(err: ApiError) -> Self {
        ResourceError::Network(err.to_string())
    }
}
