//! Wire types for the Bedrock Runtime `Converse` operation.

use serde::{Deserialize, Serialize};

use crate::error::BedrockError;

/// A single text content block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBlock {
    /// The block text.
    pub text: String,
}

/// A conversation message sent to the model.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Message {
    /// Message role (`user` or `assistant`).
    pub role: &'static str,
    /// Message content blocks.
    pub content: Vec<TextBlock>,
}

/// Sampling parameters for a Converse call.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Request body of `POST /model/{modelId}/converse`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConverseRequest {
    /// System instruction blocks.
    pub system: Vec<TextBlock>,
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// Sampling parameters.
    pub inference_config: InferenceConfig,
}

impl ConverseRequest {
    /// Build a single-turn request: one system block, one user message.
    #[must_use]
    pub fn single_turn(system: &str, user: &str, max_tokens: u32, temperature: f32) -> Self {
        Self {
            system: vec![TextBlock {
                text: system.to_string(),
            }],
            messages: vec![Message {
                role: "user",
                content: vec![TextBlock {
                    text: user.to_string(),
                }],
            }],
            inference_config: InferenceConfig {
                max_tokens,
                temperature,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConverseResponse {
    output: ConverseOutput,
}

#[derive(Debug, Deserialize)]
struct ConverseOutput {
    message: OutputMessage,
}

#[derive(Debug, Deserialize)]
struct OutputMessage {
    content: Vec<OutputBlock>,
}

// Non-text blocks (reasoning, tool use) deserialize with `text: None`.
#[derive(Debug, Deserialize)]
struct OutputBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Pull the first text block out of a Converse response body.
///
/// # Errors
///
/// Returns `BedrockError::MalformedResponse` when the body is not a Converse
/// response, and `BedrockError::NoTextBlock` when no block carries text.
pub fn parse_converse_text(body: &str) -> Result<String, BedrockError> {
    let response: ConverseResponse = serde_json::from_str(body)
        .map_err(|e| BedrockError::MalformedResponse(e.to_string()))?;

    response
        .output
        .message
        .content
        .into_iter()
        .find_map(|block| block.text)
        .ok_or(BedrockError::NoTextBlock)
}
