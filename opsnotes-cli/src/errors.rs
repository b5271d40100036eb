use thiserror::Error;

/// Errors surfaced by the `opsnotes` binary.
///
/// Extraction itself never fails; these cover everything around it.
#[derive(Debug, Error)]
pub enum CliError {
    /// The notes were refused before extraction.
    #[error("Invalid notes: {0}")]
    Input(#[from] opsnotes_extractor::input::InputError),

    /// The Bedrock client could not be built.
    #[error("Bedrock client error: {0}")]
    Bedrock(#[from] opsnotes_bedrock::BedrockError),

    /// Reading notes or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The log subscriber could not be installed.
    #[error("Logging setup error: {0}")]
    Logging(String),
}
