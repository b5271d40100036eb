//! The remote model seam.
//!
//! The pipeline only ever sees text in, text out, or a [`ClientError`].
//! Transport details (deadlines, endpoints, auth) belong to the
//! implementation behind [`InferenceClient`].

use std::sync::Arc;

use async_trait::async_trait;
use opsnotes_bedrock::{BedrockClient, BedrockError, ConverseRequest};
use thiserror::Error;

/// Token budget used when a call does not specify one.
pub const DEFAULT_MAX_TOKENS: u32 = 900;
/// Sampling temperature used when a call does not specify one.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Unified error for any remote model failure.
///
/// Transport errors, deadline expiry, bad status codes and malformed or
/// empty responses all collapse into this one kind. Only the message is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
}

impl ClientError {
    /// Creates a client error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<BedrockError> for ClientError {
    fn from(err: BedrockError) -> Self {
        Self::new(err.to_string())
    }
}

/// One model call. Built fresh per attempt and never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInvocation {
    /// System-level instructions.
    pub system_instructions: String,
    /// The user turn.
    pub user_prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl ModelInvocation {
    /// Creates an invocation with the default token budget and temperature.
    #[must_use]
    pub fn new(system_instructions: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_instructions: system_instructions.into(),
            user_prompt: user_prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Overrides the token budget and temperature.
    #[must_use]
    pub const fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }
}

/// A text-in, text-out model service.
///
/// Implementations make exactly one remote call per `invoke` and never retry;
/// retries are the caller's business. Implementations must be shareable
/// across concurrent pipeline runs.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends one invocation and returns the model's text.
    async fn invoke(&self, invocation: &ModelInvocation) -> Result<String, ClientError>;
}

#[async_trait]
impl<T: InferenceClient + ?Sized> InferenceClient for Arc<T> {
    async fn invoke(&self, invocation: &ModelInvocation) -> Result<String, ClientError> {
        (**self).invoke(invocation).await
    }
}

#[async_trait]
impl InferenceClient for BedrockClient {
    async fn invoke(&self, invocation: &ModelInvocation) -> Result<String, ClientError> {
        let request = ConverseRequest::single_turn(
            &invocation.system_instructions,
            &invocation.user_prompt,
            invocation.max_tokens,
            invocation.temperature,
        );
        Ok(self.converse(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_defaults() {
        let inv = ModelInvocation::new("sys", "user");
        assert_eq!(inv.max_tokens, 900);
        assert!((inv.temperature - 0.2).abs() < f32::EPSILON);

        let inv = inv.with_sampling(400, 0.0);
        assert_eq!(inv.max_tokens, 400);
        assert!(inv.temperature.abs() < f32::EPSILON);
    }

    #[test]
    fn test_bedrock_errors_collapse_to_message() {
        let err = ClientError::from(BedrockError::NoTextBlock);
        assert_eq!(err.message(), "Bedrock returned no text block.");

        let err = ClientError::from(BedrockError::Status {
            status: 429,
            body: "slow down".to_string(),
        });
        assert!(err.to_string().contains("429"));
    }
}
