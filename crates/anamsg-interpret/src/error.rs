//! Interpretation client error types.

/// Errors from the interpretation subsystem.
#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    /// HTTP transport error after retries were exhausted.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// The endpoint that failed.
        endpoint: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The interpretation endpoint returned a non-2xx status.
    #[error("interpretation endpoint {endpoint} returned {status}: {body}")]
    Api {
        /// The endpoint that responded.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The response envelope or the model's JSON payload failed to parse.
    #[error("failed to deserialize interpretation response: {0}")]
    Deserialization(String),

    /// The model's output is internally inconsistent with the schema —
    /// a label that does not match its own index, or a time outside
    /// 24-hour format. Rejected rather than silently re-mapped.
    #[error("interpretation does not match the schema: {0}")]
    SchemaMismatch(String),

    /// The interpreted field codes failed to encode.
    #[error(transparent)]
    Codec(#[from] anamsg_core::CodecError),

    /// Client construction failed.
    #[error("client configuration error: {0}")]
    Config(String),
}
