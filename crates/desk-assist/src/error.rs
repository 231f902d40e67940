//! Generation errors

/// Errors from a description generator
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// No API key configured
    #[error("no API key configured")]
    MissingApiKey,

    /// The model answered with no text
    #[error("model returned no text")]
    EmptyResponse,

    /// Transport or decoding failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },
}
