//! Connection configuration for the Bedrock Runtime client.

use std::fmt;
use std::time::Duration;

/// Environment variable holding the AWS region.
pub const REGION_ENV_VAR: &str = "AWS_REGION";
/// Environment variable holding the Bedrock model identifier.
pub const MODEL_ID_ENV_VAR: &str = "NOVA_MODEL_ID";
/// Environment variable overriding the Bedrock Runtime base URL.
pub const ENDPOINT_ENV_VAR: &str = "BEDROCK_ENDPOINT";
/// Environment variable holding a Bedrock API key (bearer token).
pub const API_KEY_ENV_VAR: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";
/// Model used when none is configured.
pub const DEFAULT_MODEL_ID: &str = "amazon.nova-2-lite-v1:0";

/// Fixed AWS credentials for SigV4 signing.
///
/// Only needed when the standard credential chain should be bypassed.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    pub session_token: Option<String>,
}

impl StaticCredentials {
    /// Long-lived credentials without a session token.
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Set or clear the session token.
    #[must_use]
    pub fn with_session_token(mut self, session_token: Option<String>) -> Self {
        self.session_token = session_token;
        self
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

/// Configuration for a [`BedrockClient`](crate::BedrockClient).
///
/// Built once and handed to the client constructor. The client never reads
/// the process environment on its own, and never mutates its configuration
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedrockConfig {
    /// AWS region hosting the runtime endpoint.
    pub region: String,

    /// Bedrock model identifier passed in the Converse path.
    pub model_id: String,

    /// Base URL override (None = regional AWS endpoint).
    pub endpoint: Option<String>,

    /// Bedrock API key sent as a bearer token. Takes precedence over SigV4.
    pub api_key: Option<String>,

    /// Credentials for SigV4 signing when no API key is set
    /// (None = standard AWS credential chain).
    pub credentials: Option<StaticCredentials>,

    /// Deadline for establishing the connection.
    ///
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Deadline for waiting on the response once connected.
    ///
    /// Default: 15 seconds
    pub read_timeout: Duration,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            endpoint: None,
            api_key: None,
            credentials: None,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(15),
        }
    }
}

impl BedrockConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the process environment.
    ///
    /// Reads [`REGION_ENV_VAR`], [`MODEL_ID_ENV_VAR`], [`ENDPOINT_ENV_VAR`]
    /// and [`API_KEY_ENV_VAR`]; anything unset keeps its default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            region: get(REGION_ENV_VAR).unwrap_or(defaults.region),
            model_id: get(MODEL_ID_ENV_VAR).unwrap_or(defaults.model_id),
            endpoint: get(ENDPOINT_ENV_VAR),
            api_key: get(API_KEY_ENV_VAR),
            ..defaults
        }
    }

    /// Set the AWS region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the model identifier.
    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Override the runtime base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sign with fixed credentials instead of the standard chain.
    #[must_use]
    pub fn with_credentials(mut self, credentials: StaticCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the connect and read deadlines.
    #[must_use]
    pub const fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.endpoint.as_ref().map_or_else(
            || format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
            |e| e.trim_end_matches('/').to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = BedrockConfig::default();
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(15));
        assert!(config.api_key.is_none());
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_static_credentials_debug_hides_secrets() {
        let credentials = StaticCredentials::new("AKIDEXAMPLE", "very-secret")
            .with_session_token(Some("session-secret".to_string()));
        let printed = format!("{:?}", BedrockConfig::new().with_credentials(credentials));

        assert!(printed.contains("AKIDEXAMPLE"));
        assert!(!printed.contains("very-secret"));
        assert!(!printed.contains("session-secret"));
    }

    #[test]
    fn test_from_lookup_overrides_and_ignores_blank() {
        let mut env = HashMap::new();
        env.insert(REGION_ENV_VAR, "eu-west-1".to_string());
        env.insert(MODEL_ID_ENV_VAR, "  ".to_string());
        env.insert(API_KEY_ENV_VAR, "token".to_string());

        let config = BedrockConfig::from_lookup(|k| env.get(k).cloned());

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.api_key.as_deref(), Some("token"));
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_base_url() {
        let config = BedrockConfig::new().with_region("ap-south-1");
        assert_eq!(
            config.base_url(),
            "https://bedrock-runtime.ap-south-1.amazonaws.com"
        );

        let config = config.with_endpoint("http://127.0.0.1:9000/");
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
    }
}
