use thiserror::Error;

/// Errors returned by Imagga operations.
#[derive(Error, Debug)]
pub enum TaggerError {
    /// The image could not be serialized as JPEG.
    #[error("Could not get JPEG representation of image: {0}")]
    Encoding(String),

    /// Imagga returned a non-success HTTP status.
    #[error("Imagga returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Network-level request failure with context.
    #[error("{context}: {source}")]
    Network {
        context: String,
        source: reqwest::Error,
    },

    /// The response body was not JSON or was missing expected fields.
    #[error("Invalid response: {0}")]
    Parse(String),

    /// The cancellation token fired while a request was in flight.
    #[error("Workflow was cancelled")]
    Cancelled,

    /// The configuration could not produce a usable client.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TaggerError {
    /// True for failures of the transport layer (connection or status).
    pub fn is_transport(&self) -> bool {
        matches!(self, TaggerError::Http { .. } | TaggerError::Network { .. })
    }
}

impl From<serde_json::Error> for TaggerError {
    fn from(err: serde_json::Error) -> Self {
        TaggerError::Parse(err.to_string())
    }
}

impl From<image::ImageError> for TaggerError {
    fn from(err: image::ImageError) -> Self {
        TaggerError::Encoding(err.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TaggerError>;
