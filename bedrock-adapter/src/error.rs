use thiserror::Error;

/// Errors returned by Bedrock adapter operations.
#[derive(Debug, Error)]
pub enum BedrockError {
    /// Transport failure, including connect and read deadline expiry.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Bedrock returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, unparsed.
        body: String,
    },

    /// The response body did not have the Converse shape.
    #[error("Malformed Converse response: {0}")]
    MalformedResponse(String),

    /// The response message carried no text content block.
    #[error("Bedrock returned no text block.")]
    NoTextBlock,

    /// The request body could not be encoded.
    #[error("Failed to encode Converse request: {0}")]
    Encode(#[from] serde_json::Error),

    /// No AWS credentials could be resolved for signing.
    #[error("AWS credentials unavailable: {0}")]
    Credentials(String),

    /// The request could not be SigV4-signed.
    #[error("Request signing failed: {0}")]
    Signing(String),

    /// The adapter configuration cannot be used to build a client.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
