//! Rust adapter for the AWS Bedrock Runtime `Converse` API.
//!
//! This crate provides a thin, single-shot client: one HTTP request per call,
//! fixed connect/read deadlines, and no transport-level retry. Callers that
//! want retry semantics own them.
//!
//! Requests authenticate with a Bedrock API key when one is configured, and
//! are SigV4-signed with AWS credentials otherwise.

/// Connection configuration and environment resolution.
pub mod config;
/// Converse request/response wire types.
pub mod converse;
/// Error types returned by adapter operations.
pub mod error;
/// SigV4 signing with AWS credentials.
pub mod sigv4;

pub use config::{BedrockConfig, StaticCredentials};
pub use converse::{parse_converse_text, ConverseRequest};
pub use error::BedrockError;
pub use sigv4::RequestSigner;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;

/// High-level client for the Bedrock Runtime Converse operation.
///
/// Cheap to clone; clones share one connection pool. The configuration is
/// fixed at construction.
#[derive(Debug, Clone)]
pub struct BedrockClient {
    http: reqwest::Client,
    url: Url,
    signer: Option<RequestSigner>,
    config: BedrockConfig,
}

impl BedrockClient {
    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `BedrockError::InvalidConfig` if the endpoint URL or API key
    /// cannot be used, or `BedrockError::Http` if the HTTP client fails to
    /// build.
    pub fn new(config: BedrockConfig) -> Result<Self, BedrockError> {
        let url = converse_url(&config)?;

        let mut headers = HeaderMap::new();
        let signer = if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| BedrockError::InvalidConfig(format!("api key: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
            None
        } else if let Some(credentials) = &config.credentials {
            Some(RequestSigner::from_static(&config.region, credentials))
        } else {
            Some(RequestSigner::from_default_chain(&config.region))
        };

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.connect_timeout + config.read_timeout)
            .build()?;

        Ok(Self {
            http,
            url,
            signer,
            config,
        })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &BedrockConfig {
        &self.config
    }

    /// Sends a Converse request and returns the first text block.
    ///
    /// # Errors
    ///
    /// Returns `BedrockError` on missing credentials, transport failure or
    /// deadline expiry, a non-success status, a malformed body, or a response
    /// without text.
    pub async fn converse(&self, request: &ConverseRequest) -> Result<String, BedrockError> {
        tracing::debug!(
            model_id = %self.config.model_id,
            max_tokens = request.inference_config.max_tokens,
            temperature = request.inference_config.temperature,
            signed = self.signer.is_some(),
            "Sending Converse request"
        );

        let body = serde_json::to_vec(request)?;
        let mut builder = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(signer) = &self.signer {
            for (name, value) in signer.sign_post(self.url.as_str(), &body).await? {
                builder = builder.header(name, value);
            }
        }

        let response = builder.body(body).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BedrockError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_converse_text(&body)
    }

    /// Single-turn convenience wrapper around [`converse`](Self::converse).
    ///
    /// # Errors
    ///
    /// Same as [`converse`](Self::converse).
    pub async fn converse_text(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, BedrockError> {
        let request = ConverseRequest::single_turn(system, user, max_tokens, temperature);
        self.converse(&request).await
    }
}

fn converse_url(config: &BedrockConfig) -> Result<Url, BedrockError> {
    let base = config.base_url();
    let mut url = Url::parse(&base)
        .map_err(|e| BedrockError::InvalidConfig(format!("endpoint {base}: {e}")))?;

    url.path_segments_mut()
        .map_err(|()| BedrockError::InvalidConfig(format!("endpoint {base} cannot be a base")))?
        .pop_if_empty()
        .extend(["model", config.model_id.as_str(), "converse"]);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converse_url_regional() {
        let config = BedrockConfig::new().with_model_id("us.amazon.nova-2-lite-v1:0");
        let url = converse_url(&config).unwrap();
        assert_eq!(
            url.as_str(),
            "https://bedrock-runtime.us-east-1.amazonaws.com/model/us.amazon.nova-2-lite-v1:0/converse"
        );
    }

    #[test]
    fn test_converse_url_override_keeps_prefix() {
        let config = BedrockConfig::new()
            .with_endpoint("http://localhost:8080/proxy/")
            .with_model_id("m");
        let url = converse_url(&config).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/model/m/converse");
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = BedrockConfig::new().with_endpoint("not a url");
        assert!(matches!(
            BedrockClient::new(config),
            Err(BedrockError::InvalidConfig(_))
        ));
    }
}
